//! Taxonomer completion backends
//!
//! Implementations of the `CompletionBackend` trait from `taxonomer-domain`.
//!
//! # Architecture
//!
//! The classifier only ever talks to the trait. Where inference happens is a
//! construction-time choice:
//!
//! # Backends
//!
//! - `RemoteBackend`: OpenAI-compatible HTTP inference server (`/v1/chat/completions`)
//! - `LocalBackend`: In-process model behind the `ChatModel` trait
//! - `MockBackend`: Deterministic mock for testing
//!
//! # Examples
//!
//! ```
//! use taxonomer_llm::MockBackend;
//! use taxonomer_domain::{ChatMessage, CompletionBackend, CompletionRequest, ResponseFormat};
//! use serde_json::json;
//!
//! let backend = MockBackend::new(r#"{"Topics": ["villas"]}"#);
//! let request = CompletionRequest {
//!     messages: vec![ChatMessage::user("classify")],
//!     response_format: ResponseFormat::json_object(json!({"type": "object"})),
//!     max_tokens: 150,
//!     temperature: 0.1,
//! };
//! let completion = backend.complete(&request).unwrap();
//! assert_eq!(completion.first_content(), Some(r#"{"Topics": ["villas"]}"#));
//! ```

#![warn(missing_docs)]

pub mod local;
pub mod remote;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use taxonomer_domain::{ChatCompletion, CompletionBackend, CompletionRequest, Role};
use thiserror::Error;

pub use local::{ChatModel, LocalBackend, LocalModelOptions};
pub use remote::RemoteBackend;

/// Errors that can occur while talking to a completion backend
#[derive(Error, Debug)]
pub enum BackendError {
    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// Server answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// Completion envelope could not be read
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Backend constructed with unusable settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// In-process model failure
    #[error("Model error: {0}")]
    Model(String),
}

/// Mock completion backend for deterministic testing
///
/// Returns pre-configured message content without running any model. Every
/// request is recorded so tests can inspect the prompt and schema that were
/// sent.
///
/// # Examples
///
/// ```
/// use taxonomer_llm::MockBackend;
///
/// let mut backend = MockBackend::default();
/// backend.add_response("villa", r#"{"Topics": ["housing"]}"#);
/// backend.add_error("outage");
/// assert_eq!(backend.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockBackend {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

#[derive(Debug, Clone)]
enum MockReply {
    Content(String),
    Failure,
}

impl MockBackend {
    /// Create a new MockBackend answering every request with `content`
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            default_response: content.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer with `content` when the user prompt contains `needle`
    pub fn add_response(&mut self, needle: impl Into<String>, content: impl Into<String>) {
        lock(&self.responses).insert(needle.into(), MockReply::Content(content.into()));
    }

    /// Fail with a communication error when the user prompt contains `needle`
    pub fn add_error(&mut self, needle: impl Into<String>) {
        lock(&self.responses).insert(needle.into(), MockReply::Failure);
    }

    /// Number of completed calls
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Most recent request, if any
    pub fn last_request(&self) -> Option<CompletionRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Forget recorded requests
    pub fn reset(&self) {
        lock(&self.requests).clear();
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new("{}")
    }
}

impl CompletionBackend for MockBackend {
    type Error = BackendError;

    fn complete(&self, request: &CompletionRequest) -> Result<ChatCompletion, Self::Error> {
        lock(&self.requests).push(request.clone());

        let prompt = request
            .messages
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let responses = lock(&self.responses);
        let reply = responses
            .iter()
            .filter(|(needle, _)| prompt.contains(needle.as_str()))
            // Longest needle wins so overlapping keys stay deterministic
            .max_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| b.cmp(a)))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(MockReply::Content(content)) => Ok(ChatCompletion::from_content(content)),
            Some(MockReply::Failure) => Err(BackendError::Communication("Mock error".to_string())),
            None => Ok(ChatCompletion::from_content(self.default_response.clone())),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use taxonomer_domain::{ChatMessage, ResponseFormat};

    fn request(prompt: &str) -> CompletionRequest {
        CompletionRequest {
            messages: vec![ChatMessage::system("system"), ChatMessage::user(prompt)],
            response_format: ResponseFormat::json_object(json!({"type": "object", "properties": {}})),
            max_tokens: 150,
            temperature: 0.1,
        }
    }

    #[test]
    fn test_mock_backend_default() {
        let backend = MockBackend::new(r#"{"Gender": ["Male"]}"#);
        let completion = backend.complete(&request("anything")).unwrap();
        assert_eq!(completion.first_content(), Some(r#"{"Gender": ["Male"]}"#));
    }

    #[test]
    fn test_mock_backend_specific_responses() {
        let mut backend = MockBackend::default();
        backend.add_response("villa", r#"{"Topics": ["housing"]}"#);
        backend.add_response("football", r#"{"Topics": ["sport"]}"#);

        let villa = backend.complete(&request("a seaside villa")).unwrap();
        assert_eq!(villa.first_content(), Some(r#"{"Topics": ["housing"]}"#));

        let game = backend.complete(&request("football tonight")).unwrap();
        assert_eq!(game.first_content(), Some(r#"{"Topics": ["sport"]}"#));

        let other = backend.complete(&request("weather")).unwrap();
        assert_eq!(other.first_content(), Some("{}"));
    }

    #[test]
    fn test_mock_backend_longest_needle_wins() {
        let mut backend = MockBackend::default();
        backend.add_response("villa", "short");
        backend.add_response("villa living", "long");

        let completion = backend.complete(&request("villa living is calm")).unwrap();
        assert_eq!(completion.first_content(), Some("long"));
    }

    #[test]
    fn test_mock_backend_records_requests() {
        let backend = MockBackend::default();
        assert_eq!(backend.call_count(), 0);
        assert!(backend.last_request().is_none());

        backend.complete(&request("first")).unwrap();
        backend.complete(&request("second")).unwrap();
        assert_eq!(backend.call_count(), 2);
        assert_eq!(backend.last_request().unwrap().messages[1].content, "second");

        backend.reset();
        assert_eq!(backend.call_count(), 0);
    }

    #[test]
    fn test_mock_backend_error() {
        let mut backend = MockBackend::default();
        backend.add_error("outage");

        let result = backend.complete(&request("during the outage"));
        assert!(matches!(result, Err(BackendError::Communication(_))));
    }

    #[test]
    fn test_mock_backend_clone_shares_state() {
        let first = MockBackend::new("{}");
        let second = first.clone();

        first.complete(&request("x")).unwrap();

        // Both handles see the same call log
        assert_eq!(first.call_count(), 1);
        assert_eq!(second.call_count(), 1);
    }
}
