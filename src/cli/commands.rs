//! Command dispatch: one function per subcommand

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::menu::Menu;
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::CourseIndex;
use crate::infrastructure::{InfraError, ServiceContainer};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(Commands::Completion { shell }) = &cli.command {
        return completion(*shell);
    }

    let cwd = std::env::current_dir().map_err(|e| InfraError::io("resolve working directory", e))?;
    let settings = Settings::load(Some(&cwd))?;
    let container = ServiceContainer::new(settings);
    let catalog = catalog_path(cli, &container);

    match &cli.command {
        Some(Commands::List) => list(&container, &catalog),
        Some(Commands::Show { course }) => show(&container, &catalog, course),
        Some(Commands::Check) => check(&container, &catalog),
        Some(Commands::Tree { depth }) => tree(&container, &catalog, *depth),
        Some(Commands::Menu) | None => menu(&container, catalog),
        Some(Commands::Config { command }) => config(&container, command, &cwd),
        Some(Commands::Completion { .. }) => Ok(()),
    }
}

/// `--catalog` wins over the configured catalog.
fn catalog_path(cli: &Cli, container: &ServiceContainer) -> PathBuf {
    cli.catalog
        .clone()
        .unwrap_or_else(|| container.settings.catalog.clone())
}

fn load(container: &ServiceContainer, catalog: &Path) -> CliResult<CourseIndex> {
    let index = container.catalog.load(catalog)?;
    debug!("loaded {} courses", index.len());
    Ok(index)
}

#[instrument(skip(container))]
fn list(container: &ServiceContainer, catalog: &Path) -> CliResult<()> {
    let index = load(container, catalog)?;
    output::header("Here is a sample schedule:");
    for course in container.catalog.list(&index) {
        output::info(course);
    }
    Ok(())
}

#[instrument(skip(container))]
fn show(container: &ServiceContainer, catalog: &Path, query: &str) -> CliResult<()> {
    let index = load(container, catalog)?;
    match container.catalog.find(&index, query) {
        Some(course) => {
            output::info(&course.details());
            Ok(())
        }
        None => Err(CliError::CourseNotFound(container.catalog.normalize(query))),
    }
}

#[instrument(skip(container))]
fn check(container: &ServiceContainer, catalog: &Path) -> CliResult<()> {
    let index = load(container, catalog)?;
    let unresolved = container.catalog.unresolved_prerequisites(&index);
    if unresolved.is_empty() {
        output::success(&format!(
            "{} courses, all prerequisites resolve",
            index.len()
        ));
        return Ok(());
    }

    output::header("Unresolved prerequisites:");
    for item in &unresolved {
        output::failure(&format!("{} requires {}", item.course, item.prerequisite));
    }
    Err(CliError::Unresolved(unresolved.len()))
}

#[instrument(skip(container))]
fn tree(container: &ServiceContainer, catalog: &Path, depth: usize) -> CliResult<()> {
    let index = load(container, catalog)?;
    match index.shape(depth) {
        Some(shape) => {
            output::info(&shape);
            output::info(&format!(
                "{} courses, depth {}",
                index.len(),
                index.depth()
            ));
        }
        None => output::warning("catalog is empty"),
    }
    Ok(())
}

#[instrument(skip(container))]
fn menu(container: &ServiceContainer, catalog: PathBuf) -> CliResult<()> {
    let stdin = io::stdin();
    let mut session = Menu::new(container, catalog, stdin.lock(), io::stdout());
    session.run()?;
    Ok(())
}

fn config(container: &ServiceContainer, command: &ConfigCommands, cwd: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Init => output::info(&Settings::template()),
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unavailable>".to_string());
            output::info(&format!("global: {global}"));
            output::info(&format!("local:  {}", local_config_path(cwd).display()));
        }
    }
    Ok(())
}

fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
