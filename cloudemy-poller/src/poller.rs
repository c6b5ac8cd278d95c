//! Submission lifecycle poller
//!
//! One run moves through `INIT -> SUBMITTING -> POLLING` and ends in exactly
//! one of: succeeded, failed remotely, timed out locally, or aborted on a
//! client failure. The poller emits a pending outcome the moment a run is
//! accepted and exactly one terminal outcome afterwards; a cancelled run
//! emits nothing further.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, info, warn};

use cloudemy_client::SubmissionApi;
use cloudemy_core::domain::run::{RunOutcome, RunStatus};
use cloudemy_core::domain::submission::RemoteStatus;
use cloudemy_core::dto::submission::{CreateSubmission, SubmissionDetail};

use crate::cancel::CancelToken;
use crate::config::PollConfig;

/// Errors the poller reports to its caller directly.
///
/// Everything that happens after a run is accepted is reported through the
/// terminal [`RunOutcome`] instead, so the caller is never left waiting.
#[derive(Debug, Error)]
pub enum PollerError {
    /// Local precondition failure; the network is never touched.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Rejected polling parameters.
    #[error("invalid poll configuration: {0}")]
    InvalidConfig(String),
}

/// One code-execution request.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub assignment_id: String,
    pub language: String,
    pub code: String,
}

/// Drives submissions to a terminal outcome against any [`SubmissionApi`]
/// backend.
pub struct SubmissionPoller<B: SubmissionApi> {
    backend: Arc<B>,
    config: PollConfig,
}

impl<B: SubmissionApi> SubmissionPoller<B> {
    pub fn new(backend: Arc<B>, config: PollConfig) -> Self {
        Self { backend, config }
    }

    /// Runs one submission to completion.
    ///
    /// Emits [`RunOutcome::pending`] on `updates` immediately after accepting
    /// the input, then exactly one terminal outcome, which is also returned.
    /// Returns `Ok(None)` when `cancel` fires first; nothing further is
    /// emitted in that case.
    ///
    /// Two calls with identical input create two independent submissions;
    /// the poller performs no deduplication.
    pub async fn run(
        &self,
        request: RunRequest,
        cancel: &CancelToken,
        updates: &mpsc::UnboundedSender<RunOutcome>,
    ) -> Result<Option<RunOutcome>, PollerError> {
        self.config.validate()?;

        if request.code.trim().is_empty() {
            return Err(PollerError::InvalidInput(
                "code must not be empty".to_string(),
            ));
        }

        if cancel.is_cancelled() {
            return Ok(None);
        }

        // The caller gets its "running" indicator before the create call
        // resolves.
        let _ = updates.send(RunOutcome::pending());

        let created = match self
            .backend
            .create_submission(CreateSubmission {
                assignment_id: request.assignment_id,
                language: request.language,
                code: request.code,
            })
            .await
        {
            Ok(created) => created,
            Err(e) => {
                warn!("submission create failed: {e}");
                return Ok(Some(emit(
                    updates,
                    RunOutcome::error(format!("submission failed: {e}")),
                )));
            }
        };

        info!(
            submission_id = %created.submission_id,
            attempt = created.attempt,
            "submission created, polling for verdict"
        );

        for query in 1..=self.config.max_attempts {
            if cancel.is_cancelled() {
                debug!(submission_id = %created.submission_id, "run cancelled");
                return Ok(None);
            }

            let snapshot = match self.backend.get_submission(&created.submission_id).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!(submission_id = %created.submission_id, "status query failed: {e}");
                    let outcome = RunOutcome::error(format!("status query failed: {e}"))
                        .with_submission(&created.submission_id)
                        .with_attempt(created.attempt);
                    return Ok(Some(emit(updates, outcome)));
                }
            };

            debug!(query, status = %snapshot.status, "status query");

            if snapshot.status.is_terminal() {
                let outcome = verdict_outcome(&snapshot).with_attempt(created.attempt);
                return Ok(Some(emit(updates, outcome)));
            }

            if query < self.config.max_attempts {
                if cancel.is_cancelled() {
                    debug!(submission_id = %created.submission_id, "run cancelled");
                    return Ok(None);
                }
                time::sleep(self.config.interval).await;
            }
        }

        // Attempt budget exhausted without a verdict. This is the local
        // timeout, distinct from the service's own TIMEOUT status.
        let outcome = RunOutcome::error(format!(
            "grading timed out: no verdict after {} status checks",
            self.config.max_attempts
        ))
        .with_submission(&created.submission_id)
        .with_attempt(created.attempt);
        Ok(Some(emit(updates, outcome)))
    }
}

/// Send a terminal outcome to the caller and hand it back for the return
/// value. A dropped receiver is not an error; the outcome is still returned.
fn emit(updates: &mpsc::UnboundedSender<RunOutcome>, outcome: RunOutcome) -> RunOutcome {
    let _ = updates.send(outcome.clone());
    outcome
}

/// Collapse a terminal submission snapshot into a display outcome.
///
/// This is the only place remote status semantics are interpreted.
fn verdict_outcome(snapshot: &SubmissionDetail) -> RunOutcome {
    let (status, message) = if snapshot.status.is_success() {
        (RunStatus::Success, None)
    } else {
        let message = match snapshot.status {
            RemoteStatus::Timeout => "execution timed out on the grading service".to_string(),
            _ => format!("grading reported failure ({})", snapshot.status),
        };
        (RunStatus::Error, Some(message))
    };

    RunOutcome {
        status,
        message,
        submission_id: Some(snapshot.submission_id.clone()),
        remote_status: Some(snapshot.status.clone()),
        attempt: None,
        output: feedback_text(snapshot),
        score: Some(snapshot.score),
        fail_tags: snapshot.fail_tags.clone(),
        feedback: snapshot.feedback.clone(),
        metrics: snapshot.metrics,
    }
}

/// Grader feedback rendered as one line per case.
fn feedback_text(snapshot: &SubmissionDetail) -> Option<String> {
    if snapshot.feedback.is_empty() {
        return None;
    }
    Some(
        snapshot
            .feedback
            .iter()
            .map(|entry| format!("{}: {}", entry.case, entry.message))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use cloudemy_client::error::{ClientError, Result as ClientResult};
    use cloudemy_core::domain::submission::FeedbackEntry;
    use cloudemy_core::dto::submission::{
        FinalizeReceipt, SubmissionCreated, SubmissionList,
    };

    /// Backend that replays a scripted sequence of status-query results.
    /// When the script runs dry it keeps answering RUNNING, so the attempt
    /// budget is the only thing that can stop the loop.
    struct ScriptedBackend {
        create_error: Mutex<Option<ClientError>>,
        statuses: Mutex<VecDeque<std::result::Result<RemoteStatus, ClientError>>>,
        create_calls: AtomicU32,
        status_calls: AtomicU32,
        cancel_after_status: Option<CancelToken>,
    }

    impl ScriptedBackend {
        fn with_statuses(statuses: impl IntoIterator<Item = RemoteStatus>) -> Self {
            Self {
                create_error: Mutex::new(None),
                statuses: Mutex::new(statuses.into_iter().map(Ok).collect()),
                create_calls: AtomicU32::new(0),
                status_calls: AtomicU32::new(0),
                cancel_after_status: None,
            }
        }

        fn failing_create(err: ClientError) -> Self {
            let backend = Self::with_statuses([]);
            *backend.create_error.lock().unwrap() = Some(err);
            backend
        }

        fn failing_status_query(after: Vec<RemoteStatus>, err: ClientError) -> Self {
            let backend = Self::with_statuses(after);
            backend.statuses.lock().unwrap().push_back(Err(err));
            backend
        }

        fn detail(id: &str, status: RemoteStatus) -> SubmissionDetail {
            let graded = status.is_terminal();
            SubmissionDetail {
                submission_id: id.to_string(),
                user_id: None,
                assignment_id: "A1".to_string(),
                language: "python".to_string(),
                score: if graded { 95.0 } else { 0.0 },
                fail_tags: if status.is_failure() {
                    vec!["runtime-error".to_string()]
                } else {
                    Vec::new()
                },
                feedback: if graded {
                    vec![FeedbackEntry {
                        case: "case_1".to_string(),
                        message: "ok".to_string(),
                    }]
                } else {
                    Vec::new()
                },
                metrics: None,
                finalized: false,
                created_at: chrono::Utc::now(),
                status,
            }
        }

        fn create_count(&self) -> u32 {
            self.create_calls.load(Ordering::SeqCst)
        }

        fn status_count(&self) -> u32 {
            self.status_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SubmissionApi for ScriptedBackend {
        async fn create_submission(
            &self,
            _req: CreateSubmission,
        ) -> ClientResult<SubmissionCreated> {
            let n = self.create_calls.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(err) = self.create_error.lock().unwrap().take() {
                return Err(err);
            }
            Ok(SubmissionCreated {
                submission_id: format!("sub-{n}"),
                status: RemoteStatus::Pending,
                attempt: n,
                created_at: chrono::Utc::now(),
            })
        }

        async fn get_submission(&self, id: &str) -> ClientResult<SubmissionDetail> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            let next = self.statuses.lock().unwrap().pop_front();
            let result = match next {
                Some(Ok(status)) => Ok(Self::detail(id, status)),
                Some(Err(err)) => Err(err),
                None => Ok(Self::detail(id, RemoteStatus::Running)),
            };
            if let Some(token) = &self.cancel_after_status {
                token.cancel();
            }
            result
        }

        async fn list_submissions(
            &self,
            _assignment_id: &str,
            page: u32,
            size: u32,
        ) -> ClientResult<SubmissionList> {
            Ok(SubmissionList {
                items: Vec::new(),
                total: 0,
                page,
                size,
            })
        }

        async fn finalize_submission(&self, id: &str, _note: &str) -> ClientResult<FinalizeReceipt> {
            Err(ClientError::NotFound(id.to_string()))
        }
    }

    fn test_config() -> PollConfig {
        PollConfig::new(Duration::from_millis(1), 30)
    }

    fn request(code: &str) -> RunRequest {
        RunRequest {
            assignment_id: "A1".to_string(),
            language: "python".to_string(),
            code: code.to_string(),
        }
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<RunOutcome>) -> Vec<RunOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = rx.try_recv() {
            outcomes.push(outcome);
        }
        outcomes
    }

    async fn run_once(
        backend: Arc<ScriptedBackend>,
        code: &str,
    ) -> (
        Result<Option<RunOutcome>, PollerError>,
        Vec<RunOutcome>,
        Arc<ScriptedBackend>,
    ) {
        let poller = SubmissionPoller::new(Arc::clone(&backend), test_config());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let result = poller.run(request(code), &CancelToken::new(), &tx).await;
        (result, drain(&mut rx), backend)
    }

    #[tokio::test]
    async fn test_blank_code_never_touches_the_network() {
        let backend = Arc::new(ScriptedBackend::with_statuses([]));
        let (result, emitted, backend) = run_once(backend, "   \n\t").await;

        assert!(matches!(result, Err(PollerError::InvalidInput(_))));
        assert!(emitted.is_empty());
        assert_eq!(backend.create_count(), 0);
        assert_eq!(backend.status_count(), 0);
    }

    #[tokio::test]
    async fn test_emits_pending_then_exactly_one_terminal() {
        let backend = Arc::new(ScriptedBackend::with_statuses([
            RemoteStatus::Running,
            RemoteStatus::Completed,
        ]));
        let (result, emitted, _) = run_once(backend, "print(1)").await;

        let terminal = result.unwrap().unwrap();
        assert_eq!(emitted.len(), 2);
        assert_eq!(emitted[0].status, RunStatus::Pending);
        assert_eq!(emitted[1], terminal);
        assert_eq!(terminal.status, RunStatus::Success);
        assert_eq!(terminal.remote_status, Some(RemoteStatus::Completed));
        assert_eq!(terminal.attempt, Some(1));
        assert_eq!(terminal.score, Some(95.0));
        assert_eq!(terminal.output.as_deref(), Some("case_1: ok"));
    }

    #[tokio::test]
    async fn test_success_on_the_final_allowed_attempt() {
        let mut script = vec![RemoteStatus::Running; 29];
        script.push(RemoteStatus::Completed);
        let backend = Arc::new(ScriptedBackend::with_statuses(script));
        let (result, _, backend) = run_once(backend, "print(1)").await;

        assert_eq!(result.unwrap().unwrap().status, RunStatus::Success);
        assert_eq!(backend.status_count(), 30);
    }

    #[tokio::test]
    async fn test_local_timeout_spends_exactly_the_budget() {
        let backend = Arc::new(ScriptedBackend::with_statuses(vec![
            RemoteStatus::Running;
            30
        ]));
        let (result, emitted, backend) = run_once(backend, "print(1)").await;

        let terminal = result.unwrap().unwrap();
        assert_eq!(terminal.status, RunStatus::Error);
        let message = terminal.message.unwrap();
        assert!(message.contains("no verdict after 30 status checks"), "{message}");
        assert_eq!(backend.status_count(), 30);
        assert_eq!(emitted.len(), 2);
    }

    #[tokio::test]
    async fn test_create_failure_aborts_before_any_status_query() {
        let backend = Arc::new(ScriptedBackend::failing_create(ClientError::api_error(
            502,
            "bad gateway",
        )));
        let (result, emitted, backend) = run_once(backend, "print(1)").await;

        let terminal = result.unwrap().unwrap();
        assert_eq!(terminal.status, RunStatus::Error);
        assert!(terminal.message.unwrap().contains("502"));
        assert_eq!(backend.status_count(), 0);
        assert_eq!(emitted.len(), 2);
    }

    #[tokio::test]
    async fn test_remote_failure_stops_after_one_query() {
        let backend = Arc::new(ScriptedBackend::with_statuses([RemoteStatus::Failed]));
        let (result, _, backend) = run_once(backend, "print(1)").await;

        let terminal = result.unwrap().unwrap();
        assert_eq!(terminal.status, RunStatus::Error);
        assert!(terminal.message.unwrap().contains("FAILED"));
        assert_eq!(terminal.fail_tags, ["runtime-error"]);
        assert_eq!(backend.status_count(), 1);
    }

    #[tokio::test]
    async fn test_remote_timeout_message_differs_from_local_timeout() {
        let backend = Arc::new(ScriptedBackend::with_statuses([RemoteStatus::Timeout]));
        let (result, _, _) = run_once(backend, "print(1)").await;

        let message = result.unwrap().unwrap().message.unwrap();
        assert!(message.contains("timed out on the grading service"), "{message}");
        assert!(!message.contains("status checks"));
    }

    #[tokio::test]
    async fn test_status_query_failure_aborts_the_loop() {
        let backend = Arc::new(ScriptedBackend::failing_status_query(
            vec![RemoteStatus::Running],
            ClientError::api_error(500, "internal error"),
        ));
        let (result, _, backend) = run_once(backend, "print(1)").await;

        let terminal = result.unwrap().unwrap();
        assert_eq!(terminal.status, RunStatus::Error);
        assert_eq!(terminal.submission_id.as_deref(), Some("sub-1"));
        assert_eq!(backend.status_count(), 2);
    }

    #[tokio::test]
    async fn test_unrecognized_status_keeps_polling() {
        let backend = Arc::new(ScriptedBackend::with_statuses([
            RemoteStatus::Other("WARMING_UP".to_string()),
            RemoteStatus::Successed,
        ]));
        let (result, _, backend) = run_once(backend, "print(1)").await;

        assert_eq!(result.unwrap().unwrap().status, RunStatus::Success);
        assert_eq!(backend.status_count(), 2);
    }

    #[tokio::test]
    async fn test_identical_input_creates_independent_submissions() {
        let backend = Arc::new(ScriptedBackend::with_statuses([
            RemoteStatus::Completed,
            RemoteStatus::Completed,
        ]));
        let poller = SubmissionPoller::new(Arc::clone(&backend), test_config());
        let (tx, _rx) = mpsc::unbounded_channel();

        let first = poller
            .run(request("print(1)"), &CancelToken::new(), &tx)
            .await
            .unwrap()
            .unwrap();
        let second = poller
            .run(request("print(1)"), &CancelToken::new(), &tx)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(backend.create_count(), 2);
        assert_ne!(first.submission_id, second.submission_id);
    }

    #[tokio::test]
    async fn test_pre_cancelled_run_emits_nothing() {
        let backend = Arc::new(ScriptedBackend::with_statuses([RemoteStatus::Completed]));
        let poller = SubmissionPoller::new(Arc::clone(&backend), test_config());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let token = CancelToken::new();
        token.cancel();
        let result = poller.run(request("print(1)"), &token, &tx).await;

        assert!(matches!(result, Ok(None)));
        assert!(drain(&mut rx).is_empty());
        assert_eq!(backend.create_count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_during_polling_suppresses_terminal_outcome() {
        let token = CancelToken::new();
        let mut backend = ScriptedBackend::with_statuses(vec![RemoteStatus::Running; 5]);
        backend.cancel_after_status = Some(token.clone());
        let backend = Arc::new(backend);

        let poller = SubmissionPoller::new(Arc::clone(&backend), test_config());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let result = poller.run(request("print(1)"), &token, &tx).await;

        assert!(matches!(result, Ok(None)));
        // Only the pending emission made it out before the cancellation.
        let emitted = drain(&mut rx);
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].status, RunStatus::Pending);
        assert_eq!(backend.status_count(), 1);
    }
}
