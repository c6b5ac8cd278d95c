//! Current-run slot
//!
//! The one piece of shared state between runs: whoever owns the slot owns
//! "the current run". Beginning a new run hands out a fresh token and cancels
//! whatever was in flight, so at most one run per slot ever reaches a
//! terminal emission.

use std::sync::Mutex;

use crate::cancel::CancelToken;

/// Owner of the current run's cancellation token.
#[derive(Debug, Default)]
pub struct RunSlot {
    current: Mutex<Option<CancelToken>>,
}

impl RunSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any in-flight run and returns the token for the next one.
    pub fn begin(&self) -> CancelToken {
        let mut current = self.current.lock().unwrap();
        if let Some(previous) = current.take() {
            previous.cancel();
        }
        let token = CancelToken::new();
        *current = Some(token.clone());
        token
    }

    /// Cancels the current run without starting a new one.
    pub fn cancel(&self) {
        if let Some(token) = self.current.lock().unwrap().take() {
            token.cancel();
        }
    }
}
