//! Error types for the grading client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the grading service
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (DNS, connection refused, transport-level timeout)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Service returned a non-2xx status code
    #[error("grading service error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body text, kept for diagnostics
        message: String,
    },

    /// Success status but a malformed body
    #[error("failed to parse response: {0}")]
    ParseError(String),

    /// The service does not know the submission id
    #[error("submission not found: {0}")]
    NotFound(String),

    /// Finalize was called on a submission that is already finalized
    #[error("submission already finalized: {0}")]
    AlreadyFinalized(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is the calm finalize-twice case
    pub fn is_already_finalized(&self) -> bool {
        matches!(self, Self::AlreadyFinalized(_))
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_class_helpers() {
        let err = ClientError::api_error(404, "no such submission");
        assert!(err.is_not_found());
        assert!(err.is_client_error());
        assert!(!err.is_server_error());

        let err = ClientError::api_error(502, "bad gateway");
        assert!(err.is_server_error());
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_already_finalized_is_distinct() {
        let err = ClientError::AlreadyFinalized("sub-1".to_string());
        assert!(err.is_already_finalized());
        assert!(!err.is_client_error());
    }
}
