//! Remote inference server backend
//!
//! Talks to any server exposing the OpenAI-compatible chat-completion route
//! (llama.cpp server, llama-cpp-python, vLLM, ...).
//!
//! # Features
//!
//! - Async HTTP communication driven by a private runtime, blocking API
//! - Configurable host and request timeout
//! - Non-200 answers surface as `BackendError::Status`
//!
//! No retry or backoff happens here; one call is one HTTP request.
//!
//! # Examples
//!
//! ```no_run
//! use taxonomer_llm::RemoteBackend;
//!
//! let backend = RemoteBackend::default_host().unwrap();
//! assert_eq!(backend.endpoint(), "http://localhost:8000/v1/chat/completions");
//! ```

use crate::BackendError;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use taxonomer_domain::{ChatCompletion, CompletionBackend, CompletionRequest};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

/// Default inference server
pub const DEFAULT_HOST: &str = "http://localhost:8000";

/// Default timeout for a single completion request (2 minutes)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Chat-completion route, relative to the host
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Remote HTTP completion backend
///
/// Owns a current-thread tokio runtime so callers stay synchronous. Do not
/// call [`CompletionBackend::complete`] from inside another tokio runtime; use
/// [`RemoteBackend::complete_async`] there instead.
pub struct RemoteBackend {
    host: String,
    client: reqwest::Client,
    runtime: Runtime,
    verbose: bool,
}

impl RemoteBackend {
    /// Create a new remote backend
    ///
    /// # Parameters
    ///
    /// - `host`: Server base URL (e.g., "http://localhost:8000")
    /// - `timeout`: Per-request timeout
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Configuration` if the host is not an http(s)
    /// URL, the timeout is zero, or the HTTP client / runtime cannot be built.
    pub fn new(host: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let host = host.into();
        if !(host.starts_with("http://") || host.starts_with("https://")) {
            return Err(BackendError::Configuration(format!(
                "host must be an http(s) URL, got '{}'",
                host
            )));
        }
        if timeout.is_zero() {
            return Err(BackendError::Configuration("timeout must be greater than 0".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| BackendError::Configuration(format!("Failed to start runtime: {}", e)))?;

        Ok(Self {
            host: host.trim_end_matches('/').to_string(),
            client,
            runtime,
            verbose: false,
        })
    }

    /// Create a backend pointing at `http://localhost:8000`
    pub fn default_host() -> Result<Self, BackendError> {
        Self::new(DEFAULT_HOST, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Log every request and response status at info level
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Server base URL, without trailing slash
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Full chat-completion URL
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.host, CHAT_COMPLETIONS_PATH)
    }

    /// Send one chat-completion request
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The server is unreachable or the request times out
    /// - The server answers with any status other than 200
    /// - The response body is not a completion envelope
    pub async fn complete_async(&self, request: &CompletionRequest) -> Result<ChatCompletion, BackendError> {
        let url = self.endpoint();

        if self.verbose {
            info!(endpoint = %url, max_tokens = request.max_tokens, "Sending completion request");
        }
        debug!(body = ?serde_json::to_string(request).ok(), "Completion request body");

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if self.verbose {
            info!(status = status.as_u16(), "Completion response received");
        }

        if status != reqwest::StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<ChatCompletion>()
            .await
            .map_err(|e| BackendError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

impl CompletionBackend for RemoteBackend {
    type Error = BackendError;

    fn complete(&self, request: &CompletionRequest) -> Result<ChatCompletion, Self::Error> {
        self.runtime.block_on(self.complete_async(request))
    }
}

impl std::fmt::Debug for RemoteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteBackend")
            .field("host", &self.host)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}
