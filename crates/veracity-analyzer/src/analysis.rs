//! Credibility analysis flow

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::flow::{self, Guarded, Outcome};
use crate::{parser, prompt};
use std::sync::Arc;
use tracing::{debug, info, warn};
use veracity_domain::traits::LlmProvider;
use veracity_domain::AnalysisResult;

/// Explanation shown when the analysis could not be completed
pub const RETRY_MESSAGE: &str = "An error occurred during analysis. Please try again later.";

/// Explanation shown when no LLM provider is configured
pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "The AI client is not initialized; check the API key configuration.";

/// Check that `text` may be sent for analysis
///
/// Length is counted in characters, not bytes, and is checked first: an
/// over-length text is rejected as too long whatever it contains.
///
/// # Errors
///
/// - `TextTooLong` if the text has more than `max_length` characters
/// - `EmptyInput` if the text is empty or whitespace only
pub fn validate_input(text: &str, max_length: usize) -> Result<(), AnalyzerError> {
    let length = text.chars().count();
    if length > max_length {
        return Err(AnalyzerError::TextTooLong(length, max_length));
    }

    if text.trim().is_empty() {
        return Err(AnalyzerError::EmptyInput);
    }

    Ok(())
}

/// Observable state of an [`AnalysisFlow`]
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AnalysisState {
    /// Nothing has been requested yet
    #[default]
    Idle,
    /// A request is in flight
    Requesting,
    /// The latest request produced a result
    Succeeded(AnalysisResult),
    /// The latest request failed; `result` is an UNKNOWN fallback
    Failed {
        /// Fallback result carrying a user-facing explanation
        result: AnalysisResult,
        /// Human-readable description of the failure
        error: String,
    },
}

impl AnalysisState {
    /// The result to display, if the flow has finished a request
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisState::Succeeded(result) | AnalysisState::Failed { result, .. } => Some(result),
            AnalysisState::Idle | AnalysisState::Requesting => None,
        }
    }

    /// The failure message, if the latest request failed
    pub fn error(&self) -> Option<&str> {
        match self {
            AnalysisState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Whether a request is in flight
    pub fn is_requesting(&self) -> bool {
        matches!(self, AnalysisState::Requesting)
    }
}

/// Drives one credibility analysis at a time
///
/// A newer [`AnalysisFlow::analyze`] call always wins: when an older call
/// completes after it started, the older result is discarded.
pub struct AnalysisFlow<L> {
    provider: Option<Arc<L>>,
    config: AnalyzerConfig,
    state: Guarded<AnalysisState>,
}

impl<L: LlmProvider> AnalysisFlow<L> {
    /// Create a flow backed by `provider`
    pub fn new(provider: Arc<L>, config: AnalyzerConfig) -> Self {
        Self::with_provider(Some(provider), config)
    }

    /// Create a flow with no LLM provider
    ///
    /// Every analysis fails immediately with the service-unavailable message.
    pub fn unavailable(config: AnalyzerConfig) -> Self {
        Self::with_provider(None, config)
    }

    /// Create a flow from an optional provider
    pub fn with_provider(provider: Option<Arc<L>>, config: AnalyzerConfig) -> Self {
        Self {
            provider,
            config,
            state: Guarded::new(AnalysisState::Idle),
        }
    }

    /// Whether an LLM provider is configured
    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    /// Analyze `text` and publish the result
    ///
    /// Collaborator and decoding failures do not surface as `Err`: they move
    /// the flow to [`AnalysisState::Failed`] with an UNKNOWN fallback result.
    ///
    /// # Errors
    ///
    /// Only input validation errors. The flow state is left unchanged and no
    /// request is made.
    pub async fn analyze(&self, text: &str) -> Result<Outcome<AnalysisState>, AnalyzerError> {
        validate_input(text, self.config.max_text_length)?;

        let ticket = self.state.begin(AnalysisState::Requesting);
        info!(length = text.chars().count(), ?ticket, "Analysis requested");

        let next = match self.request(text).await {
            Ok(result) => {
                debug!(rating = %result.rating(), "Analysis succeeded");
                AnalysisState::Succeeded(result)
            }
            Err(e) => {
                warn!("Analysis failed: {}", e);
                let explanation = match e {
                    AnalyzerError::ServiceUnavailable => SERVICE_UNAVAILABLE_MESSAGE,
                    _ => RETRY_MESSAGE,
                };
                AnalysisState::Failed {
                    result: AnalysisResult::unknown(explanation),
                    error: e.to_string(),
                }
            }
        };

        let outcome = self.state.complete(ticket, next);
        if outcome.is_superseded() {
            warn!(?ticket, "Discarding superseded analysis response");
        }
        Ok(outcome)
    }

    /// Snapshot of the current state
    pub fn state(&self) -> AnalysisState {
        self.state.snapshot()
    }

    /// Return to [`AnalysisState::Idle`], discarding any in-flight request
    pub fn reset(&self) {
        self.state.reset(AnalysisState::Idle);
    }

    /// Active configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    async fn request(&self, text: &str) -> Result<AnalysisResult, AnalyzerError> {
        let provider = self
            .provider
            .as_deref()
            .ok_or(AnalyzerError::ServiceUnavailable)?;

        let request = prompt::analysis_request(text, &self.config);
        let raw = flow::generate(provider, &request, self.config.request_timeout()).await?;
        debug!(bytes = raw.len(), "Analysis response received");

        parser::normalize_analysis(&raw)
    }
}
