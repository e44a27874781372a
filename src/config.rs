//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/coursemap/coursemap.toml`
//! 3. Local config: `<dir>/.coursemap.toml` (usually the working directory)
//! 4. Environment variables: `COURSEMAP_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for coursemap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Catalog file loaded when none is given (default: courses.csv)
    pub catalog: PathBuf,
    /// Trim and uppercase course lookups (default: true)
    pub normalize_queries: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("courses.csv"),
            normalize_queries: true,
        }
    }
}

/// Get the XDG config directory for coursemap.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "coursemap").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("coursemap.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".coursemap.toml")
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Unknown variables leave the input unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory searched for `.coursemap.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let builder = Self::file_layers(global_config_path().as_deref(), local_dir)?.add_source(
            Environment::with_prefix("COURSEMAP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    /// Load defaults and config files only, ignoring `COURSEMAP_*` variables.
    pub fn load_files_only(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        Self::finish(Self::file_layers(global_path, local_dir)?)
    }

    fn file_layers(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
    ) -> Result<ConfigBuilder<config::builder::DefaultState>, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("catalog", defaults.catalog.to_string_lossy().to_string())
            .map_err(config_err)?
            .set_default("normalize_queries", defaults.normalize_queries)
            .map_err(config_err)?;

        if let Some(global) = global_path {
            builder = builder.add_source(File::from(global.to_path_buf()).required(false));
        }
        if let Some(dir) = local_dir {
            builder = builder.add_source(File::from(local_config_path(dir)).required(false));
        }
        Ok(builder)
    }

    fn finish(
        builder: ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ApplicationError> {
        let config = builder.build().map_err(config_err)?;
        let mut settings: Self = config.try_deserialize().map_err(config_err)?;
        settings.expand_paths();
        Ok(settings)
    }

    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.catalog.to_string_lossy().as_ref());
        self.catalog = PathBuf::from(expanded);
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# coursemap configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/coursemap/coursemap.toml
#   Local:  ./.coursemap.toml
#   Env:    COURSEMAP_* environment variables

# Catalog file used when --catalog is not given (~ and $VAR are expanded)
# catalog = "courses.csv"

# Trim and uppercase course numbers before lookup
# normalize_queries = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_files_when_loading_then_uses_defaults() {
        let settings = Settings::load_files_only(None, None).expect("load defaults");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn given_tilde_in_catalog_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            catalog: PathBuf::from("~/courses.csv"),
            normalize_queries: true,
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let catalog = settings.catalog.to_string_lossy();
        assert!(
            catalog.starts_with(&home),
            "catalog should start with home dir: {}",
            catalog
        );
        assert!(!catalog.contains('~'));
    }

    #[test]
    fn given_unknown_variable_when_expanding_then_keeps_input() {
        assert_eq!(
            expand_env_vars("$COURSEMAP_SURELY_UNSET_VAR/courses.csv"),
            "$COURSEMAP_SURELY_UNSET_VAR/courses.csv"
        );
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let parsed: Settings = toml::from_str(&Settings::template()).expect("template parses");
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips_through_toml() {
        let settings = Settings {
            catalog: PathBuf::from("/data/abcu.csv"),
            normalize_queries: false,
        };
        let text = settings.to_toml().expect("serialize");
        assert!(text.contains("normalize_queries = false"));
        let parsed: Settings = toml::from_str(&text).expect("parse");
        assert_eq!(parsed, settings);
    }
}
