//! Integration tests for Settings layered loading.
//!
//! These tests pass explicit config paths so they never depend on the
//! user's global config or on `COURSEMAP_*` variables.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use coursemap::application::ApplicationError;
use coursemap::config::{local_config_path, Settings};

#[test]
fn given_local_config_when_loading_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "catalog = \"data/abcu.csv\"\nnormalize_queries = false\n",
    )
    .unwrap();

    let settings = Settings::load_files_only(None, Some(dir.path())).expect("load settings");

    assert_eq!(settings.catalog, PathBuf::from("data/abcu.csv"));
    assert!(!settings.normalize_queries);
}

#[test]
fn given_partial_local_config_when_loading_then_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "normalize_queries = false\n").unwrap();

    let settings = Settings::load_files_only(None, Some(dir.path())).expect("load settings");

    assert_eq!(settings.catalog, Settings::default().catalog);
    assert!(!settings.normalize_queries);
}

#[test]
fn given_global_and_local_config_when_loading_then_local_wins() {
    let global_dir = TempDir::new().unwrap();
    let global_path = global_dir.path().join("coursemap.toml");
    fs::write(
        &global_path,
        "catalog = \"/srv/global.csv\"\nnormalize_queries = false\n",
    )
    .unwrap();

    let local_dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(local_dir.path()),
        "catalog = \"local.csv\"\n",
    )
    .unwrap();

    let settings = Settings::load_files_only(Some(&global_path), Some(local_dir.path()))
        .expect("load settings");

    assert_eq!(settings.catalog, PathBuf::from("local.csv"));
    assert!(
        !settings.normalize_queries,
        "global value should survive when local does not set it"
    );
}

#[test]
fn given_missing_config_files_when_loading_then_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let settings =
        Settings::load_files_only(Some(&dir.path().join("absent.toml")), Some(dir.path()))
            .expect("load settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn given_invalid_config_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "normalize_queries = \"sometimes\"\n").unwrap();

    let err = Settings::load_files_only(None, Some(dir.path())).unwrap_err();
    assert!(matches!(err, ApplicationError::Config { .. }), "got {err:?}");
}
