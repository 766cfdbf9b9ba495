//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use std::future::Future;

/// A single text-generation call to the external collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// User-facing content sent to the model
    pub contents: String,

    /// Optional system instruction describing the expected output
    pub system_instruction: Option<String>,

    /// Sampling temperature
    pub temperature: f32,

    /// Requested response MIME type (e.g. `application/json`)
    pub response_mime_type: Option<String>,
}

impl GenerationRequest {
    /// Default sampling temperature when none is set
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    /// Create a request with only contents
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
            system_instruction: None,
            temperature: Self::DEFAULT_TEMPERATURE,
            response_mime_type: None,
        }
    }

    /// Attach a system instruction
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Request JSON-typed output
    pub fn expecting_json(mut self) -> Self {
        self.response_mime_type = Some("application/json".to_string());
        self
    }
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (veracity-llm)
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: std::fmt::Display + Send;

    /// Generate raw text for a request
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for durable keyed storage of small string values
///
/// Implemented by the infrastructure layer (veracity-store)
pub trait KeyValueStorage {
    /// Error type for storage operations
    type Error;

    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}
