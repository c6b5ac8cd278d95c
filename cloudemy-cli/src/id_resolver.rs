//! Submission id resolution
//!
//! Submission ids are opaque strings assigned by the grading service; users
//! can pass a short unambiguous prefix instead of a full id. Resolution works
//! against the assignment's submission list.

use anyhow::{Context, Result, anyhow};

use cloudemy_client::GradingClient;
use cloudemy_core::dto::submission::SubmissionListItem;

/// Page size used when fetching the list for resolution.
const RESOLVE_PAGE_SIZE: u32 = 200;

/// Resolve an id or prefix to a full submission id.
pub async fn resolve_submission_id(
    client: &GradingClient,
    assignment_id: &str,
    id_or_prefix: &str,
) -> Result<String> {
    let list = client
        .list_submissions(assignment_id, 1, RESOLVE_PAGE_SIZE)
        .await
        .context("Failed to fetch submissions for id resolution")?;

    match_prefix(&list.items, id_or_prefix).map(|item| item.submission_id.clone())
}

/// Find the single list entry matching an id or prefix.
///
/// An exact match wins even when it is also a prefix of other ids.
pub fn match_prefix<'a>(
    items: &'a [SubmissionListItem],
    id_or_prefix: &str,
) -> Result<&'a SubmissionListItem> {
    if let Some(exact) = items.iter().find(|i| i.submission_id == id_or_prefix) {
        return Ok(exact);
    }

    let matches: Vec<_> = items
        .iter()
        .filter(|i| i.submission_id.starts_with(id_or_prefix))
        .collect();

    match matches.len() {
        0 => Err(anyhow!(
            "No submission found with id starting with '{}'",
            id_or_prefix
        )),
        1 => Ok(matches[0]),
        _ => {
            let ids: Vec<String> = matches.iter().map(|i| i.submission_id.clone()).collect();
            Err(anyhow!(
                "Ambiguous prefix '{}' matches multiple submissions: {}",
                id_or_prefix,
                ids.join(", ")
            ))
        }
    }
}
