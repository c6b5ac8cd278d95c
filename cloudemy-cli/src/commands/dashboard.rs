//! TA dashboard
//!
//! Aggregate stats computed live from the submission list, replacing the
//! per-student drill-down the grading service does not expose yet.

use std::collections::BTreeMap;

use anyhow::Result;
use colored::*;

use cloudemy_client::GradingClient;
use cloudemy_core::domain::session::Role;
use cloudemy_core::domain::submission::RemoteStatus;
use cloudemy_core::dto::submission::SubmissionListItem;

use crate::config::Config;
use crate::session;

/// How many rows to aggregate over.
const DASHBOARD_PAGE_SIZE: u32 = 200;

/// Fetch the submission list and render aggregate stats
pub async fn handle_dashboard(config: &Config) -> Result<()> {
    session::require(&config.state_dir, Role::Ta)?;

    let client = GradingClient::new(&config.api_url);
    let list = client
        .list_submissions(&config.assignment_id, 1, DASHBOARD_PAGE_SIZE)
        .await?;

    let stats = DashboardStats::from_items(&list.items);

    println!(
        "{}",
        format!("Submission stats for assignment {}:", config.assignment_id).bold()
    );
    println!();
    println!("  Total submissions: {}", list.total.to_string().bold());
    println!(
        "  Finalized:         {} ({:.1}%)",
        stats.finalized.to_string().bold(),
        stats.finalized_rate() * 100.0
    );
    match stats.average_score {
        Some(average) => println!("  Average score:     {:.1}", average),
        None => println!("  Average score:     {}", "no graded submissions".dimmed()),
    }
    if let Some(top) = stats.top_score {
        println!("  Top score:         {top}");
    }

    if !stats.by_status.is_empty() {
        println!();
        println!("{}", "By status:".bold());
        for (status, count) in &stats.by_status {
            println!("  {:<12} {}", status, count);
        }
    }

    Ok(())
}

/// Aggregates over one page of the submission list.
#[derive(Debug, Default)]
struct DashboardStats {
    counted: usize,
    finalized: usize,
    average_score: Option<f64>,
    top_score: Option<f64>,
    by_status: BTreeMap<String, usize>,
}

impl DashboardStats {
    fn from_items(items: &[SubmissionListItem]) -> Self {
        let mut stats = Self {
            counted: items.len(),
            ..Self::default()
        };

        let mut graded_total = 0.0;
        let mut graded = 0usize;

        for item in items {
            *stats.by_status.entry(item.status.to_string()).or_default() += 1;

            if item.status == RemoteStatus::Finalized {
                stats.finalized += 1;
            }

            if item.status.is_success() || item.status == RemoteStatus::Finalized {
                graded += 1;
                graded_total += item.score;
                stats.top_score = Some(stats.top_score.unwrap_or(item.score).max(item.score));
            }
        }

        if graded > 0 {
            stats.average_score = Some(graded_total / graded as f64);
        }

        stats
    }

    fn finalized_rate(&self) -> f64 {
        if self.counted == 0 {
            return 0.0;
        }
        self.finalized as f64 / self.counted as f64
    }
}
