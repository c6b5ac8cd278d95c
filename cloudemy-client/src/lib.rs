//! Cloudemy Grading Client
//!
//! A type-safe HTTP client for the Cloudemy grading service.
//!
//! The client is a pure request/response wrapper: no retries, no
//! interpretation of status semantics. Callers that need lifecycle behavior
//! (such as polling a submission to a verdict) build it on top of the
//! [`SubmissionApi`] trait this crate exposes.
//!
//! # Example
//!
//! ```no_run
//! use cloudemy_client::GradingClient;
//! use cloudemy_core::dto::submission::CreateSubmission;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cloudemy_client::ClientError> {
//!     let client = GradingClient::new("http://localhost:8000");
//!
//!     let created = client.create_submission(CreateSubmission {
//!         assignment_id: "A1".to_string(),
//!         language: "python".to_string(),
//!         code: "print('hello')".to_string(),
//!     }).await?;
//!
//!     println!("Created submission: {}", created.submission_id);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
mod submissions;

pub use api::SubmissionApi;
pub use error::{ClientError, Result};

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Header that suppresses the browser-warning interstitial of the tunneling
/// proxy the service is deployed behind. Harmless when the service is
/// reachable directly.
const TUNNEL_BYPASS_HEADER: &str = "ngrok-skip-browser-warning";

/// HTTP client for the Cloudemy grading service
///
/// Covers the full submission surface: create, status query, listing, and
/// finalization.
#[derive(Debug, Clone)]
pub struct GradingClient {
    /// Base URL of the grading service (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl GradingClient {
    /// Create a new grading client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the grading service
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new grading client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use cloudemy_client::GradingClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = GradingClient::with_client("http://localhost:8000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the grading service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url).header(TUNNEL_BYPASS_HEADER, "true")
    }

    pub(crate) fn post(&self, url: &str) -> RequestBuilder {
        self.client.post(url).header(TUNNEL_BYPASS_HEADER, "true")
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the request
    /// failed, or deserializes the response body if successful.
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
