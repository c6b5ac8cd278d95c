//! Cloudemy Submission Poller
//!
//! Drives one code-execution request to a terminal outcome: create a
//! submission through the grading service, poll its status at a fixed
//! interval until a verdict arrives or the attempt budget runs out, and
//! normalize whatever happened into a single display outcome.
//!
//! The poller owns the lifecycle; the HTTP client stays a dumb wrapper.
//! Cancellation is cooperative: a [`CancelToken`] is checked before every
//! network call and every scheduled continuation, and [`RunSlot`] implements
//! the one-outstanding-run contract where starting a new run cancels the
//! previous one.

pub mod cancel;
pub mod config;
pub mod poller;
pub mod slot;

pub use cancel::CancelToken;
pub use config::PollConfig;
pub use poller::{PollerError, RunRequest, SubmissionPoller};
pub use slot::RunSlot;

// Local attempt tracking lives in core; re-exported here because every
// accepted run or save appends an entry.
pub use cloudemy_core::domain::version::{CodeVersion, VersionStore};
