//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod dashboard;
mod login;
mod run;
mod submissions;

pub use submissions::SubmissionCommands;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Log in with a demo account
    Login {
        /// Account role
        #[arg(long, value_enum)]
        role: login::RoleArg,

        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Log out and clear the session
    Logout,
    /// Show the active session
    Whoami,
    /// Submit a code file and wait for the grading verdict
    Run {
        /// Path to the code file
        file: PathBuf,
    },
    /// Save a code file as a new version without waiting for grading
    Save {
        /// Path to the code file
        file: PathBuf,
    },
    /// List locally saved versions
    Versions,
    /// Server-side submission management
    Submissions {
        #[command(subcommand)]
        command: SubmissionCommands,
    },
    /// Aggregate submission stats for TAs
    Dashboard,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Login {
            role,
            email,
            password,
        } => login::handle_login(config, role, &email, &password),
        Commands::Logout => login::handle_logout(config),
        Commands::Whoami => login::handle_whoami(config),
        Commands::Run { file } => run::handle_run(config, &file).await,
        Commands::Save { file } => run::handle_save(config, &file).await,
        Commands::Versions => run::handle_versions(config),
        Commands::Submissions { command } => {
            submissions::handle_submission_command(command, config).await
        }
        Commands::Dashboard => dashboard::handle_dashboard(config).await,
    }
}
