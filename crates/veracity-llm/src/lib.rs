//! Veracity LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `veracity-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Gemini `generateContent` API
//!
//! # Examples
//!
//! ```
//! use veracity_llm::MockProvider;
//! use veracity_domain::traits::{GenerationRequest, LlmProvider};
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let request = GenerationRequest::new("test prompt");
//! let result = tokio_test::block_on(provider.generate(&request)).unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod gemini;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;
use veracity_domain::traits::{GenerationRequest, LlmProvider};

pub use gemini::GeminiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// No API credential was configured
    #[error("Missing API credential: set {0}")]
    MissingCredential(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text {
        body: String,
        delay: Option<Duration>,
    },
    Error(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses keyed by request contents without making
/// any network calls. Clones share responses, call count and the last request.
///
/// # Examples
///
/// ```
/// use veracity_llm::MockProvider;
/// use veracity_domain::traits::{GenerationRequest, LlmProvider};
///
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// provider.add_error("prompt2", "boom");
///
/// let ok = tokio_test::block_on(provider.generate(&GenerationRequest::new("prompt1")));
/// assert_eq!(ok.unwrap(), "response1");
///
/// let err = tokio_test::block_on(provider.generate(&GenerationRequest::new("prompt2")));
/// assert!(err.is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<GenerationRequest>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a specific response for requests with the given contents
    pub fn add_response(&mut self, contents: impl Into<String>, response: impl Into<String>) {
        self.insert(
            contents.into(),
            MockReply::Text {
                body: response.into(),
                delay: None,
            },
        );
    }

    /// Add a response that is only returned after `delay`
    pub fn add_delayed_response(
        &mut self,
        contents: impl Into<String>,
        response: impl Into<String>,
        delay: Duration,
    ) {
        self.insert(
            contents.into(),
            MockReply::Text {
                body: response.into(),
                delay: Some(delay),
            },
        );
    }

    /// Configure to return an error for requests with the given contents
    pub fn add_error(&mut self, contents: impl Into<String>, message: impl Into<String>) {
        self.insert(contents.into(), MockReply::Error(message.into()));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap_or_else(PoisonError::into_inner) = 0;
    }

    /// The most recent request received, if any
    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn insert(&mut self, contents: String, reply: MockReply) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(contents, reply);
    }

    fn reply_for(&self, request: &GenerationRequest) -> MockReply {
        *self.call_count.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        *self.last_request.lock().unwrap_or_else(PoisonError::into_inner) = Some(request.clone());

        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&request.contents)
            .cloned()
            .unwrap_or_else(|| MockReply::Text {
                body: self.default_response.clone(),
                delay: None,
            })
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn generate(&self, request: &GenerationRequest) -> Result<String, Self::Error> {
        match self.reply_for(request) {
            MockReply::Text { body, delay } => {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                Ok(body)
            }
            MockReply::Error(message) => Err(LlmError::Communication(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    fn request(contents: &str) -> GenerationRequest {
        GenerationRequest::new(contents)
    }

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = block_on(provider.generate(&request("any prompt")));
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(block_on(provider.generate(&request("hello"))).unwrap(), "world");
        assert_eq!(block_on(provider.generate(&request("foo"))).unwrap(), "bar");
        assert_eq!(
            block_on(provider.generate(&request("unknown"))).unwrap(),
            "Default mock response"
        );
    }

    #[test]
    fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        block_on(provider.generate(&request("prompt1"))).unwrap();
        assert_eq!(provider.call_count(), 1);

        block_on(provider.generate(&request("prompt2"))).unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt", "network down");

        let result = block_on(provider.generate(&request("bad prompt")));
        match result {
            Err(LlmError::Communication(message)) => assert_eq!(message, "network down"),
            other => panic!("Expected Communication error, got {:?}", other),
        }
    }

    #[test]
    fn test_mock_provider_records_last_request() {
        let provider = MockProvider::new("ok");
        let sent = request("analyze me").with_temperature(0.3).expecting_json();
        block_on(provider.generate(&sent)).unwrap();

        assert_eq!(provider.last_request(), Some(sent));
    }

    #[test]
    fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        block_on(provider1.generate(&request("test"))).unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_provider_delayed_response() {
        let mut provider = MockProvider::default();
        provider.add_delayed_response("slow", "eventually", Duration::from_millis(20));

        let started = std::time::Instant::now();
        let result = provider.generate(&request("slow")).await.unwrap();
        assert_eq!(result, "eventually");
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
