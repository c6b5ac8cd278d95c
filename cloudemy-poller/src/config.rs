//! Poller configuration

use std::time::Duration;

use crate::poller::PollerError;

/// Polling parameters for one run.
///
/// The attempt budget bounds the total wait: a run issues at most
/// `max_attempts` status queries, one every `interval`.
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    /// Delay between consecutive status queries
    pub interval: Duration,

    /// Maximum number of status queries before the run is declared locally
    /// timed out
    pub max_attempts: u32,
}

impl PollConfig {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), PollerError> {
        if self.max_attempts == 0 {
            return Err(PollerError::InvalidConfig(
                "max_attempts must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: 30,
        }
    }
}
