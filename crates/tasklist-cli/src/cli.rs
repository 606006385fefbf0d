use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI surface definition.
#[derive(Parser, Debug)]
#[command(
    name = "tasklist",
    about = "In-memory todo list with a search box mirrored into the page URL",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Initial page location, e.g. `/?search=learn`. Overrides `initial_url` from config.
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Optional subcommand; defaults to launching the TUI when absent.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Launch the interactive TUI (press q or Esc in the list to exit).
    Tui,
    /// Print the seeded task list, optionally filtered.
    List {
        /// Search text applied before printing.
        #[arg(long)]
        search: Option<String>,
        /// Print the whole state as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Replay a script of commands (one per line, `-` for stdin) and print the result.
    Run {
        script: PathBuf,
        /// Print the whole state as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print version and exit.
    Version,
    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Create a default config file if one does not exist.
    Init,
}
