//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Course planner: load a course catalog, list it, and look up courses
#[derive(Parser, Debug)]
#[command(name = "coursemap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Catalog file (default: `catalog` from config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print all courses
    List,

    /// Print one course with its prerequisites
    Show {
        /// Course number (trimmed and uppercased unless disabled in config)
        course: String,
    },

    /// Report prerequisites missing from the catalog
    Check,

    /// Show the shape of the course index
    Tree {
        /// Levels to draw before folding the rest into a count
        #[arg(long, default_value_t = crate::domain::SHAPE_DEPTH)]
        depth: usize,
    },

    /// Interactive menu
    Menu,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print config template
    Init,

    /// Show config paths
    Path,
}
