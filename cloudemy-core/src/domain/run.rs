//! Run outcome domain types
//!
//! A "run" is one round trip through the grading service: create a
//! submission, wait for a verdict. The types here are the locally normalized
//! view of that round trip, shown to the user and never sent back to the
//! service.

use serde::{Deserialize, Serialize};

use crate::domain::submission::{ExecutionMetrics, FeedbackEntry, RemoteStatus};

/// Local tri-state display status for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Pending,
    Success,
    Error,
}

/// Normalized result of a run, rendered to the user.
///
/// Created fresh on each run; the pending form is emitted immediately when a
/// run is accepted, the full form once a terminal verdict (or failure) is
/// known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub status: RunStatus,
    /// Human-readable cause, set on error outcomes.
    pub message: Option<String>,
    pub submission_id: Option<String>,
    /// Raw status from the last observed snapshot, if a verdict arrived.
    pub remote_status: Option<RemoteStatus>,
    /// Attempt number the service assigned at creation.
    pub attempt: Option<u32>,
    pub output: Option<String>,
    pub score: Option<f64>,
    pub fail_tags: Vec<String>,
    pub feedback: Vec<FeedbackEntry>,
    pub metrics: Option<ExecutionMetrics>,
}

impl RunOutcome {
    /// The intermediate outcome emitted while the run is in flight.
    pub fn pending() -> Self {
        Self {
            status: RunStatus::Pending,
            message: None,
            submission_id: None,
            remote_status: None,
            attempt: None,
            output: None,
            score: None,
            fail_tags: Vec::new(),
            feedback: Vec::new(),
            metrics: None,
        }
    }

    /// A terminal error outcome carrying a human-readable cause.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: RunStatus::Error,
            message: Some(message.into()),
            ..Self::pending()
        }
    }

    /// Attaches the submission id once the service has assigned one.
    pub fn with_submission(mut self, id: impl Into<String>) -> Self {
        self.submission_id = Some(id.into());
        self
    }

    /// Attaches the attempt number from the create response.
    pub fn with_attempt(mut self, attempt: u32) -> Self {
        self.attempt = Some(attempt);
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.status != RunStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_is_not_terminal() {
        let outcome = RunOutcome::pending();
        assert_eq!(outcome.status, RunStatus::Pending);
        assert!(!outcome.is_terminal());
    }

    #[test]
    fn test_error_carries_message() {
        let outcome = RunOutcome::error("grading service unreachable").with_submission("sub-1");
        assert_eq!(outcome.status, RunStatus::Error);
        assert_eq!(
            outcome.message.as_deref(),
            Some("grading service unreachable")
        );
        assert_eq!(outcome.submission_id.as_deref(), Some("sub-1"));
        assert!(outcome.is_terminal());
    }
}
