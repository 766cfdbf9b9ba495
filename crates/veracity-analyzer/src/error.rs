//! Error types for the analyzer

use thiserror::Error;

/// Errors that can occur while analyzing text or running the quiz
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Input is empty after trimming
    #[error("Please enter text to analyze")]
    EmptyInput,

    /// Input exceeds the maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// No LLM provider was initialized (e.g. missing API key)
    #[error("The AI client is not initialized; check the API key configuration")]
    ServiceUnavailable,

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// The LLM call exceeded the configured timeout
    #[error("LLM request timed out")]
    Timeout,

    /// The response could not be decoded into the expected shape
    #[error("The response data is not in the expected format: {reason}")]
    MalformedPayload {
        /// What went wrong while decoding
        reason: String,
        /// The untouched response text, kept for diagnostics
        raw: String,
    },

    /// The quiz payload was empty or not a JSON array
    #[error("Quiz data is empty or not in the expected format")]
    InvalidQuizData,

    /// Score store error
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalyzerError {
    /// Build a malformed-payload error that keeps the raw response
    pub fn malformed(reason: impl Into<String>, raw: &str) -> Self {
        AnalyzerError::MalformedPayload {
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }

    /// Whether the error was raised locally before contacting the LLM
    pub fn is_validation(&self) -> bool {
        matches!(self, AnalyzerError::EmptyInput | AnalyzerError::TextTooLong(_, _))
    }
}

impl From<veracity_store::StoreError> for AnalyzerError {
    fn from(e: veracity_store::StoreError) -> Self {
        AnalyzerError::Store(e.to_string())
    }
}
