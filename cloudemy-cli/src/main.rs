//! Cloudemy CLI
//!
//! Terminal front-end for the Cloudemy auto-grading platform. Students
//! submit code, track saved versions, and finalize their official answer;
//! TAs view aggregate submission stats. All grading happens in the external
//! service; this binary only renders what the service reports.

mod commands;
mod config;
mod id_resolver;
mod session;
mod state;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cloudemy")]
#[command(about = "Cloudemy auto-grading platform CLI", long_about = None)]
struct Cli {
    /// Grading service URL
    #[arg(
        long,
        env = "CLOUDEMY_API_URL",
        default_value = "http://localhost:8000"
    )]
    api_url: String,

    /// Assignment to work against
    #[arg(long, env = "CLOUDEMY_ASSIGNMENT", default_value = "A1")]
    assignment: String,

    /// Directory for session and version state (default: ~/.cloudemy)
    #[arg(long, env = "CLOUDEMY_STATE_DIR")]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cloudemy=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config::new(cli.api_url, cli.assignment, cli.state_dir)?;

    handle_command(cli.command, &config).await
}
