//! Veracity Analyzer
//!
//! Credibility analysis and literacy quiz flows on top of an LLM provider.
//!
//! # Overview
//!
//! The analyzer sends social-media text to an LLM, normalizes whatever comes
//! back into an [`AnalysisResult`](veracity_domain::AnalysisResult), and runs
//! a three-question quiz whose answers move the persisted resilience score.
//! All judgment is delegated to the LLM; this crate only validates input,
//! builds prompts, decodes responses and keeps flow state.
//!
//! # Architecture
//!
//! ```text
//! Text → validate → prompt → LLM → normalize → AnalysisState
//! Quiz → prompt → LLM → normalize → Ready → submit → ScoreStore
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use veracity_analyzer::{AnalysisFlow, AnalyzerConfig};
//! use veracity_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = Arc::new(MockProvider::new(
//!     r#"{"reliability": "NEEDS_VERIFICATION", "explanation": "No source given."}"#,
//! ));
//! let flow = AnalysisFlow::new(llm, AnalyzerConfig::default());
//!
//! flow.analyze("Scientists confirm chocolate cures colds!").await?;
//!
//! if let Some(result) = flow.state().result() {
//!     println!("{}: {}", result.rating(), result.explanation());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod analysis;
mod config;
mod error;
mod flow;
mod parser;
mod prompt;
mod quiz;


pub use analysis::{
    validate_input, AnalysisFlow, AnalysisState, RETRY_MESSAGE, SERVICE_UNAVAILABLE_MESSAGE,
};
pub use config::AnalyzerConfig;
pub use error::AnalyzerError;
pub use flow::{Outcome, Ticket};
pub use parser::{normalize_analysis, normalize_quiz, strip_fence, MISSING_EXPLANATION};
pub use prompt::{analysis_request, quiz_request};
pub use quiz::{AdvanceOutcome, QuizFlow, QuizState, SubmitOutcome};
