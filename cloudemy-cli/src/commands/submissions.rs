//! Submission command handlers
//!
//! Server-side view of saved versions: listing, detail, and the irrevocable
//! finalize action.

use anyhow::Result;
use clap::Subcommand;
use colored::*;

use cloudemy_client::GradingClient;
use cloudemy_core::domain::session::{Role, Session};
use cloudemy_core::domain::submission::RemoteStatus;
use cloudemy_core::dto::submission::{SubmissionDetail, SubmissionListItem};

use crate::config::Config;
use crate::id_resolver::resolve_submission_id;
use crate::session;

/// Submission subcommands
#[derive(Subcommand)]
pub enum SubmissionCommands {
    /// List submissions for the assignment
    List {
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Page size
        #[arg(long, default_value_t = 50)]
        size: u32,
    },
    /// Show one submission in detail
    Get {
        /// Submission id or unambiguous prefix
        id: String,
    },
    /// Finalize a submission as the official answer
    Finalize {
        /// Submission id or unambiguous prefix
        id: String,

        /// Note recorded with the finalization
        #[arg(long, default_value = "final answer")]
        note: String,
    },
}

/// Handle submission commands
pub async fn handle_submission_command(
    command: SubmissionCommands,
    config: &Config,
) -> Result<()> {
    let client = GradingClient::new(&config.api_url);

    match command {
        SubmissionCommands::List { page, size } => {
            session::require(&config.state_dir, Role::Student)?;
            list_submissions(&client, config, page, size).await
        }
        SubmissionCommands::Get { id } => {
            session::require(&config.state_dir, Role::Student)?;
            get_submission(&client, config, &id).await
        }
        SubmissionCommands::Finalize { id, note } => {
            let active = session::require(&config.state_dir, Role::Student)?;
            finalize_submission(&client, config, &active, &id, &note).await
        }
    }
}

/// List submissions for the assignment
async fn list_submissions(
    client: &GradingClient,
    config: &Config,
    page: u32,
    size: u32,
) -> Result<()> {
    let list = client
        .list_submissions(&config.assignment_id, page, size)
        .await?;

    if list.items.is_empty() {
        println!(
            "{}",
            "No submissions yet. Save or run some code first.".yellow()
        );
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Found {} submission(s) for assignment {} (page {} of size {}):",
            list.total, config.assignment_id, list.page, list.size
        )
        .bold()
    );
    println!();
    for (index, item) in list.items.iter().enumerate() {
        print_list_item(index, item);
    }

    Ok(())
}

/// Show one submission in detail
async fn get_submission(client: &GradingClient, config: &Config, id: &str) -> Result<()> {
    let id = resolve_submission_id(client, &config.assignment_id, id).await?;
    let detail = client.get_submission(&id).await?;

    print_detail(&detail);

    Ok(())
}

/// Finalize a submission
async fn finalize_submission(
    client: &GradingClient,
    config: &Config,
    active: &Session,
    id: &str,
    note: &str,
) -> Result<()> {
    let id = resolve_submission_id(client, &config.assignment_id, id).await?;

    match client.finalize_submission(&id, note).await {
        Ok(receipt) => {
            println!("{}", "✓ Submission finalized!".green().bold());
            println!();
            println!("  Submitter:  {}", active.display_name.bold());
            println!("  Submission: {}", receipt.submission_id);
            println!(
                "  Time:       {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!("  Status:     {}", colorize_status(&receipt.status));
            println!();
            println!(
                "{}",
                "This version is now your official answer and cannot be changed.".dimmed()
            );
            Ok(())
        }
        Err(e) if e.is_already_finalized() => {
            // Finalizing twice is a no-op for the user, not a failure.
            println!(
                "{}",
                format!("Submission {} is already finalized; nothing to do.", id).yellow()
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Print one row of the submission list
fn print_list_item(index: usize, item: &SubmissionListItem) {
    println!(
        "  {} Version {} ({})",
        "▸".cyan(),
        index + 1,
        item.submission_id.dimmed()
    );
    println!(
        "    Status: {} | Language: {} | Created: {}",
        colorize_status(&item.status),
        item.language,
        item.created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    if item.score > 0.0 {
        println!("    Score:  {}", format!("{}", item.score).bold());
    }
    println!();
}

/// Print detailed submission information
fn print_detail(detail: &SubmissionDetail) {
    println!("{}", "Submission Details:".bold());
    println!("  ID:         {}", detail.submission_id.cyan());
    println!("  Assignment: {}", detail.assignment_id);
    println!("  Language:   {}", detail.language);
    println!("  Status:     {}", colorize_status(&detail.status));
    println!("  Score:      {}", detail.score);
    println!(
        "  Finalized:  {}",
        if detail.finalized {
            "yes".green()
        } else {
            "no".normal()
        }
    );
    println!(
        "  Created:    {}",
        detail.created_at.format("%Y-%m-%d %H:%M:%S")
    );

    if let Some(metrics) = &detail.metrics {
        println!(
            "  Metrics:    {:.2} ms, {:.1} MB",
            metrics.time_ms, metrics.memory_mb
        );
    }

    if !detail.fail_tags.is_empty() {
        println!("  Fail tags:  {}", detail.fail_tags.join(", ").yellow());
    }

    if !detail.feedback.is_empty() {
        println!("\n{}", "Feedback:".bold());
        for entry in &detail.feedback {
            println!("  {}: {}", entry.case.cyan(), entry.message);
        }
    }
}

/// Colorize a remote status for display
pub(crate) fn colorize_status(status: &RemoteStatus) -> colored::ColoredString {
    let status_str = status.to_string();
    match status {
        RemoteStatus::Completed | RemoteStatus::Successed => status_str.green(),
        RemoteStatus::Failed | RemoteStatus::Timeout => status_str.red(),
        RemoteStatus::Running => status_str.cyan(),
        RemoteStatus::Finalized => status_str.magenta(),
        RemoteStatus::Pending | RemoteStatus::Other(_) => status_str.yellow(),
    }
}
