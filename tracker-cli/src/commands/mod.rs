//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod inspect;
mod url;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Plan the commit status for a pipeline run JSON file ("-" for stdin)
    Inspect {
        /// Path to the pipeline run JSON document
        file: String,

        /// Plan the status even if the run did not opt in
        #[arg(long)]
        force: bool,
    },
    /// Resolve the provider driver for a repository URL
    Driver {
        /// Repository URL
        url: String,
    },
    /// Extract the repository path from a repository URL
    Repo {
        /// Repository URL
        url: String,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Inspect { file, force } => inspect::handle_inspect(&file, force, config),
        Commands::Driver { url } => url::handle_driver(&url, config),
        Commands::Repo { url } => url::handle_repo(&url, config),
    }
}
