//! Local version tracking
//!
//! An ordered list of the submission attempts this client knows about.
//! Appended on each save or run; the grading service remains the authority
//! on submission state, so entries only record what was observed at the
//! moment of submission.

use serde::{Deserialize, Serialize};

use crate::domain::submission::RemoteStatus;

/// One locally-recorded submission attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeVersion {
    /// Local label (`v1`, `v2`, ...), assigned in append order.
    pub label: String,
    pub submission_id: String,
    /// Status reported by the service when the attempt was created.
    pub status: RemoteStatus,
    pub attempt: u32,
    pub saved_at: chrono::DateTime<chrono::Utc>,
    /// First line of the submitted code, for list previews.
    pub preview: String,
}

/// Append-only store of locally-known attempts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionStore {
    versions: Vec<CodeVersion>,
}

impl VersionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an attempt and returns the entry with its assigned label.
    pub fn record(
        &mut self,
        submission_id: impl Into<String>,
        status: RemoteStatus,
        attempt: u32,
        code: &str,
    ) -> &CodeVersion {
        let version = CodeVersion {
            label: format!("v{}", self.versions.len() + 1),
            submission_id: submission_id.into(),
            status,
            attempt,
            saved_at: chrono::Utc::now(),
            preview: code.lines().next().unwrap_or_default().to_string(),
        };
        self.versions.push(version);
        // Just pushed, so the list is non-empty.
        self.versions.last().unwrap()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CodeVersion> {
        self.versions.iter()
    }

    pub fn latest(&self) -> Option<&CodeVersion> {
        self.versions.last()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
