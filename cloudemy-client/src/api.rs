//! Trait seam over the submission API
//!
//! The poller and anything else with lifecycle behavior depend on this trait
//! rather than on [`GradingClient`] directly, so tests can script a backend
//! without a network.

use async_trait::async_trait;

use crate::GradingClient;
use crate::error::Result;
use cloudemy_core::dto::submission::{
    CreateSubmission, FinalizeReceipt, SubmissionCreated, SubmissionDetail, SubmissionList,
};

/// The four operations the grading service exposes.
#[async_trait]
pub trait SubmissionApi: Send + Sync {
    /// Submit code for grading.
    async fn create_submission(&self, req: CreateSubmission) -> Result<SubmissionCreated>;

    /// Fetch a submission's current state.
    async fn get_submission(&self, id: &str) -> Result<SubmissionDetail>;

    /// List submissions for an assignment, paged.
    async fn list_submissions(
        &self,
        assignment_id: &str,
        page: u32,
        size: u32,
    ) -> Result<SubmissionList>;

    /// Mark a submission as the final answer.
    async fn finalize_submission(&self, id: &str, note: &str) -> Result<FinalizeReceipt>;
}

#[async_trait]
impl SubmissionApi for GradingClient {
    async fn create_submission(&self, req: CreateSubmission) -> Result<SubmissionCreated> {
        GradingClient::create_submission(self, req).await
    }

    async fn get_submission(&self, id: &str) -> Result<SubmissionDetail> {
        GradingClient::get_submission(self, id).await
    }

    async fn list_submissions(
        &self,
        assignment_id: &str,
        page: u32,
        size: u32,
    ) -> Result<SubmissionList> {
        GradingClient::list_submissions(self, assignment_id, page, size).await
    }

    async fn finalize_submission(&self, id: &str, note: &str) -> Result<FinalizeReceipt> {
        GradingClient::finalize_submission(self, id, note).await
    }
}
