//! Submission endpoint wrappers

use tracing::debug;

use crate::GradingClient;
use crate::error::{ClientError, Result};
use cloudemy_core::dto::submission::{
    CreateSubmission, FinalizeReceipt, FinalizeSubmission, SubmissionCreated, SubmissionDetail,
    SubmissionList,
};

impl GradingClient {
    /// Create a new submission for grading
    ///
    /// # Arguments
    /// * `req` - Assignment id, language, and code to submit
    ///
    /// # Returns
    /// The created submission's id, initial status, and attempt number
    pub async fn create_submission(&self, req: CreateSubmission) -> Result<SubmissionCreated> {
        let url = format!("{}/submissions", self.base_url());
        debug!(assignment_id = %req.assignment_id, "creating submission");
        let response = self.post(&url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Fetch the current state of a submission
    ///
    /// # Arguments
    /// * `id` - The submission id assigned by the service
    ///
    /// # Returns
    /// The submission snapshot (status, score, tags, feedback, metrics)
    ///
    /// Fails with [`ClientError::NotFound`] if the service does not know the
    /// id.
    pub async fn get_submission(&self, id: &str) -> Result<SubmissionDetail> {
        let url = format!("{}/submissions/{}", self.base_url(), id);
        debug!(submission_id = %id, "fetching submission");
        let response = self.get(&url).send().await?;

        if response.status().as_u16() == 404 {
            return Err(ClientError::NotFound(id.to_string()));
        }

        self.handle_response(response).await
    }

    /// List submissions for an assignment, paged
    ///
    /// # Arguments
    /// * `assignment_id` - The assignment to list submissions for
    /// * `page` - 1-based page number
    /// * `size` - Page size
    pub async fn list_submissions(
        &self,
        assignment_id: &str,
        page: u32,
        size: u32,
    ) -> Result<SubmissionList> {
        let url = format!("{}/submissions", self.base_url());
        debug!(assignment_id, page, size, "listing submissions");
        let response = self
            .get(&url)
            .query(&[
                ("assignment_id", assignment_id.to_string()),
                ("page", page.to_string()),
                ("size", size.to_string()),
            ])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Irrevocably mark a submission as the final answer
    ///
    /// # Arguments
    /// * `id` - The submission id to finalize
    /// * `note` - Free-form note recorded with the finalization
    ///
    /// Fails with [`ClientError::AlreadyFinalized`] when the service reports
    /// the submission was finalized before; other failures keep their
    /// transport or API shape so outages are never mistaken for a repeat
    /// finalize.
    pub async fn finalize_submission(&self, id: &str, note: &str) -> Result<FinalizeReceipt> {
        let url = format!("{}/submissions/{}/finalize", self.base_url(), id);
        debug!(submission_id = %id, "finalizing submission");
        let response = self
            .post(&url)
            .json(&FinalizeSubmission {
                note: note.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(classify_finalize_failure(id, status.as_u16(), body));
        }

        self.handle_response(response).await
    }
}

/// Map a non-2xx finalize response to the right error.
///
/// A 409 conflict, or any other 4xx whose body mentions the finalized state,
/// is the repeat-finalize case; everything else stays a plain API error.
fn classify_finalize_failure(id: &str, status: u16, body: String) -> ClientError {
    let mentions_finalized = body.to_ascii_lowercase().contains("finalized");
    if status == 409 || ((400..500).contains(&status) && mentions_finalized) {
        ClientError::AlreadyFinalized(id.to_string())
    } else {
        ClientError::api_error(status, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_maps_to_already_finalized() {
        let err = classify_finalize_failure("sub-1", 409, "conflict".to_string());
        assert!(err.is_already_finalized());
    }

    #[test]
    fn test_finalized_body_maps_to_already_finalized() {
        let err = classify_finalize_failure(
            "sub-1",
            400,
            r#"{"detail": "submission already FINALIZED"}"#.to_string(),
        );
        assert!(err.is_already_finalized());
    }

    #[test]
    fn test_server_errors_stay_api_errors() {
        // An outage must not read as "already finalized".
        let err = classify_finalize_failure("sub-1", 502, "bad gateway".to_string());
        assert!(!err.is_already_finalized());
        assert!(err.is_server_error());
    }

    #[test]
    fn test_unrelated_client_error_stays_api_error() {
        let err = classify_finalize_failure("sub-1", 422, "note too long".to_string());
        assert!(!err.is_already_finalized());
        assert!(err.is_client_error());
    }
}
