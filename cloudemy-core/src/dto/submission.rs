//! Submission DTOs

use serde::{Deserialize, Serialize};

use crate::domain::submission::{ExecutionMetrics, FeedbackEntry, RemoteStatus};

/// Request body for `POST /submissions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubmission {
    pub assignment_id: String,
    pub language: String,
    pub code: String,
}

/// Response body for `POST /submissions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionCreated {
    pub submission_id: String,
    pub status: RemoteStatus,
    pub attempt: u32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Response body for `GET /submissions/{id}`.
///
/// Score, tags, feedback and metrics are filled in by the service once
/// grading completes; before that they are absent or zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionDetail {
    pub submission_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub assignment_id: String,
    pub language: String,
    pub status: RemoteStatus,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub fail_tags: Vec<String>,
    #[serde(default)]
    pub feedback: Vec<FeedbackEntry>,
    #[serde(default)]
    pub metrics: Option<ExecutionMetrics>,
    #[serde(default)]
    pub finalized: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// One row of the submission list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionListItem {
    pub submission_id: String,
    pub language: String,
    pub status: RemoteStatus,
    #[serde(default)]
    pub score: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Response body for `GET /submissions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionList {
    pub items: Vec<SubmissionListItem>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

/// Request body for `POST /submissions/{id}/finalize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizeSubmission {
    pub note: String,
}

/// Response body for `POST /submissions/{id}/finalize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizeReceipt {
    pub submission_id: String,
    pub status: RemoteStatus,
}
