//! Run, save, and versions command handlers
//!
//! `run` is the editor's "run code" action: submit, poll to a verdict, show
//! the result. `save` is "save version": create a submission and record it
//! locally without waiting for grading.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::*;
use tokio::sync::mpsc;

use cloudemy_client::GradingClient;
use cloudemy_core::domain::run::{RunOutcome, RunStatus};
use cloudemy_core::domain::session::Role;
use cloudemy_core::domain::submission::RemoteStatus;
use cloudemy_core::dto::submission::CreateSubmission;
use cloudemy_poller::{PollConfig, PollerError, RunRequest, RunSlot, SubmissionPoller};

use crate::commands::submissions::colorize_status;
use crate::config::Config;
use crate::session;
use crate::state;

/// The single language this platform grades.
const LANGUAGE: &str = "python";

/// Submit a code file and poll to a verdict
pub async fn handle_run(config: &Config, file: &Path) -> Result<()> {
    session::require(&config.state_dir, Role::Student)?;

    let code = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read code file {:?}", file))?;

    let client = Arc::new(GradingClient::new(&config.api_url));
    let poller = SubmissionPoller::new(client, PollConfig::default());
    let slot = RunSlot::new();
    let token = slot.begin();

    let (tx, mut rx) = mpsc::unbounded_channel::<RunOutcome>();
    let progress = tokio::spawn(async move {
        while let Some(update) = rx.recv().await {
            if update.status == RunStatus::Pending {
                println!("{} Submitted, grading in progress...", "▸".cyan());
            }
        }
    });

    let request = RunRequest {
        assignment_id: config.assignment_id.clone(),
        language: LANGUAGE.to_string(),
        code: code.clone(),
    };
    let result = poller.run(request, &token, &tx).await;
    drop(tx);
    let _ = progress.await;

    match result {
        Ok(Some(outcome)) => {
            print_outcome(&outcome);
            record_run(config, &outcome, &code)?;
            Ok(())
        }
        // The slot is private to this invocation, so nothing cancels it.
        Ok(None) => Ok(()),
        Err(PollerError::InvalidInput(msg)) => anyhow::bail!(msg),
        Err(e) => Err(e.into()),
    }
}

/// Create a submission without polling and record it as a version
pub async fn handle_save(config: &Config, file: &Path) -> Result<()> {
    session::require(&config.state_dir, Role::Student)?;

    let code = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read code file {:?}", file))?;
    if code.trim().is_empty() {
        anyhow::bail!("code file is empty; nothing to save");
    }

    let client = GradingClient::new(&config.api_url);
    let created = client
        .create_submission(CreateSubmission {
            assignment_id: config.assignment_id.clone(),
            language: LANGUAGE.to_string(),
            code: code.clone(),
        })
        .await?;

    let mut versions = state::load_versions(&config.state_dir)?;
    let label = versions
        .record(
            &created.submission_id,
            created.status.clone(),
            created.attempt,
            &code,
        )
        .label
        .clone();
    state::store_versions(&config.state_dir, &versions)?;

    println!(
        "{} Version {} saved (submission {}, status {}, attempt {})",
        "✓".green(),
        label.bold(),
        created.submission_id.dimmed(),
        colorize_status(&created.status),
        created.attempt
    );

    Ok(())
}

/// List locally saved versions
pub fn handle_versions(config: &Config) -> Result<()> {
    session::require(&config.state_dir, Role::Student)?;

    let versions = state::load_versions(&config.state_dir)?;

    if versions.is_empty() {
        println!("{}", "No saved versions yet.".yellow());
        return Ok(());
    }

    println!("{}", format!("{} saved version(s):", versions.len()).bold());
    println!();
    for version in versions.iter() {
        println!(
            "  {} {}  {}",
            "▸".cyan(),
            version.label.bold(),
            version
                .saved_at
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .dimmed()
        );
        println!(
            "    Submission: {} | Status: {}",
            version.submission_id.dimmed(),
            colorize_status(&version.status)
        );
        if !version.preview.is_empty() {
            println!("    {}", version.preview.dimmed());
        }
        println!();
    }

    Ok(())
}

/// Append the run to the local version list when a submission was created.
fn record_run(config: &Config, outcome: &RunOutcome, code: &str) -> Result<()> {
    let Some(id) = &outcome.submission_id else {
        return Ok(());
    };

    let mut versions = state::load_versions(&config.state_dir)?;
    let status = outcome
        .remote_status
        .clone()
        .unwrap_or(RemoteStatus::Pending);
    let label = versions
        .record(id, status, outcome.attempt.unwrap_or(0), code)
        .label
        .clone();
    state::store_versions(&config.state_dir, &versions)?;

    println!("  Recorded as version {}", label.cyan());
    Ok(())
}

/// Print the terminal outcome of a run
fn print_outcome(outcome: &RunOutcome) {
    match outcome.status {
        RunStatus::Success => println!("{}", "✓ Run succeeded".green().bold()),
        RunStatus::Error => println!("{}", "✗ Run failed".red().bold()),
        RunStatus::Pending => return,
    }

    if let Some(message) = &outcome.message {
        println!("  {}", message.red());
    }
    if let Some(id) = &outcome.submission_id {
        println!("  Submission: {}", id.dimmed());
    }
    if let Some(status) = &outcome.remote_status {
        println!("  Status:     {}", colorize_status(status));
    }
    if let Some(score) = outcome.score {
        println!("  Score:      {}", format!("{score}").bold());
    }
    if let Some(metrics) = &outcome.metrics {
        println!(
            "  Metrics:    {:.2} ms, {:.1} MB",
            metrics.time_ms, metrics.memory_mb
        );
    }
    if !outcome.fail_tags.is_empty() {
        println!("  Fail tags:  {}", outcome.fail_tags.join(", ").yellow());
    }
    if !outcome.feedback.is_empty() {
        println!("  {}", "Feedback:".bold());
        for entry in &outcome.feedback {
            println!("    {}: {}", entry.case.cyan(), entry.message);
        }
    }
}
