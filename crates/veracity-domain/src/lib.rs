//! Veracity Domain Layer
//!
//! This crate contains the core vocabulary shared by every other Veracity crate.
//! It has ZERO external dependencies and defines the value objects, policy
//! constants and trait interfaces that the infrastructure layers implement.
//!
//! ## Key Concepts
//!
//! - **Reliability rating**: the five-way credibility verdict for analyzed text
//! - **Analysis result**: rating plus explanation, fact-check keywords and sources
//! - **Quiz question**: a three-option literacy question with one correct answer
//! - **Resilience score**: a 0-100 gamification metric driven by quiz answers
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure value types and policy only
//! - LLM access and durable storage are reached through the traits in [`traits`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod quiz;
pub mod rating;
pub mod score;
pub mod traits;

// Re-exports for convenience
pub use analysis::{AnalysisResult, SuggestedSource, MAX_MEANINGFUL_SOURCES};
pub use quiz::{QuizBatch, QuizOption, QuizQuestion};
pub use rating::ReliabilityRating;
pub use score::{
    ResilienceScore, ScoreBand, INITIAL_RESILIENCE_SCORE, QUIZ_CORRECT_ANSWER_POINTS,
    QUIZ_INCORRECT_ANSWER_PENALTY, RESILIENCE_SCORE_KEY,
};

/// Maximum accepted length of text submitted for analysis, in characters.
pub const MAX_TEXT_LENGTH: usize = 5000;
