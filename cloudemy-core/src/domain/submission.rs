//! Submission domain types

use serde::{Deserialize, Serialize};

/// Status of a submission as reported by the grading service.
///
/// The service uses an open set of string tokens; the variants below cover
/// every token observed in practice, and anything else lands in `Other` so a
/// new server-side token degrades to "not yet terminal" instead of a
/// deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RemoteStatus {
    Pending,
    Running,
    Completed,
    Successed,
    Failed,
    Timeout,
    Finalized,
    /// Unrecognized token, preserved verbatim.
    Other(String),
}

impl RemoteStatus {
    /// The wire token for this status.
    pub fn as_str(&self) -> &str {
        match self {
            RemoteStatus::Pending => "PENDING",
            RemoteStatus::Running => "RUNNING",
            RemoteStatus::Completed => "COMPLETED",
            RemoteStatus::Successed => "SUCCESSED",
            RemoteStatus::Failed => "FAILED",
            RemoteStatus::Timeout => "TIMEOUT",
            RemoteStatus::Finalized => "FINALIZED",
            RemoteStatus::Other(token) => token,
        }
    }

    /// Grading finished and the submission passed.
    pub fn is_success(&self) -> bool {
        matches!(self, RemoteStatus::Completed | RemoteStatus::Successed)
    }

    /// Grading finished and the submission failed or timed out remotely.
    pub fn is_failure(&self) -> bool {
        matches!(self, RemoteStatus::Failed | RemoteStatus::Timeout)
    }

    /// No further state change is expected without a new submission.
    pub fn is_terminal(&self) -> bool {
        self.is_success() || self.is_failure()
    }
}

impl From<String> for RemoteStatus {
    fn from(token: String) -> Self {
        match token.as_str() {
            "PENDING" => RemoteStatus::Pending,
            "RUNNING" => RemoteStatus::Running,
            "COMPLETED" => RemoteStatus::Completed,
            "SUCCESSED" => RemoteStatus::Successed,
            "FAILED" => RemoteStatus::Failed,
            "TIMEOUT" => RemoteStatus::Timeout,
            "FINALIZED" => RemoteStatus::Finalized,
            _ => RemoteStatus::Other(token),
        }
    }
}

impl From<RemoteStatus> for String {
    fn from(status: RemoteStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Execution time and memory usage reported once grading completes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExecutionMetrics {
    #[serde(rename = "timeMs")]
    pub time_ms: f64,
    #[serde(rename = "memoryMB")]
    pub memory_mb: f64,
}

/// Per-case grader feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub case: String,
    pub message: String,
}
