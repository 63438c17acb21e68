//! Command-line definitions.

use clap::{Parser, Subcommand};
use lazytodo_core::FilterMode;
use std::path::PathBuf;

/// lazytodo - a small persistent task list
#[derive(Parser, Debug)]
#[command(name = "lazytodo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Task database file (defaults to $LAZYTODO_DB_PATH or the temp dir)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for log files; logging is off when unset
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a task to the end of the list
    Add {
        /// Task text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Show tasks
    List {
        /// Which tasks to show (all, active, completed)
        #[arg(short, long, default_value = "all", value_parser = parse_filter)]
        filter: FilterMode,

        /// Keep manual order instead of newest first
        #[arg(long)]
        oldest: bool,
    },

    /// Flip a task between open and done
    Toggle {
        /// Task id or unique id prefix
        id: String,
    },

    /// Delete a task
    Remove {
        /// Task id or unique id prefix
        id: String,
    },

    /// Replace a task's text; blank text leaves it unchanged
    Edit {
        /// Task id or unique id prefix
        id: String,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Move a task so it sits right before another one
    Move {
        /// Task to move
        source: String,
        /// Task it should end up in front of
        target: String,
    },

    /// Delete all completed tasks
    ClearCompleted,

    /// Print the raw task list as JSON
    Dump,

    /// Print the core version
    Version,
}

fn parse_filter(value: &str) -> Result<FilterMode, String> {
    value.parse::<FilterMode>().map_err(|err| err.to_string())
}
