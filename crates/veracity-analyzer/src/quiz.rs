//! Literacy quiz flow

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::flow::{self, Guarded, Outcome};
use crate::{parser, prompt};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use veracity_domain::traits::{KeyValueStorage, LlmProvider};
use veracity_domain::{QuizBatch, QuizQuestion, ResilienceScore};
use veracity_store::ScoreStore;

/// Observable state of a [`QuizFlow`]
#[derive(Debug, Clone, PartialEq)]
pub enum QuizState {
    /// A batch is being fetched
    Loading,
    /// A question is shown and accepts a selection
    Ready {
        /// Current batch
        batch: QuizBatch,
        /// Position of the current question
        index: usize,
        /// Text of the selected option, if any
        selected: Option<String>,
    },
    /// The answer to the current question has been submitted
    Feedback {
        /// Current batch
        batch: QuizBatch,
        /// Position of the current question
        index: usize,
        /// Text of the submitted option
        selected: String,
        /// Whether the answer was right; `None` if the option was not found
        was_correct: Option<bool>,
    },
    /// Fetching or decoding the batch failed
    Error(String),
}

impl QuizState {
    /// The question currently on screen
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self {
            QuizState::Ready { batch, index, .. } | QuizState::Feedback { batch, index, .. } => {
                batch.get(*index)
            }
            QuizState::Loading | QuizState::Error(_) => None,
        }
    }
}

/// Result of [`QuizFlow::submit`]
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    /// Whether the answer was right; `None` if the option was not found
    pub was_correct: Option<bool>,
    /// The question's explanation
    pub explanation: String,
    /// Text of the correct option
    pub correct_answer: Option<String>,
    /// Score after the update, if it was recorded
    pub score: Option<ResilienceScore>,
}

/// Result of [`QuizFlow::advance`]
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// Moved to the question at this index
    NextQuestion(usize),
    /// The batch was finished and a new one was requested
    BatchCompleted(Outcome<QuizState>),
}

struct Answer {
    was_correct: Option<bool>,
    explanation: String,
    correct_answer: Option<String>,
}

enum Step {
    Next(usize),
    Refetch,
    Ignored,
}

/// Drives the quiz: fetch a batch, answer each question, repeat
///
/// Answers are scored through the shared [`ScoreStore`].
pub struct QuizFlow<L, S> {
    provider: Option<Arc<L>>,
    scores: Arc<ScoreStore<S>>,
    config: AnalyzerConfig,
    state: Guarded<QuizState>,
}

impl<L, S> QuizFlow<L, S>
where
    L: LlmProvider,
    S: KeyValueStorage,
    S::Error: fmt::Display,
{
    /// Create a flow backed by `provider`
    pub fn new(provider: Arc<L>, scores: Arc<ScoreStore<S>>, config: AnalyzerConfig) -> Self {
        Self::with_provider(Some(provider), scores, config)
    }

    /// Create a flow with no LLM provider; every load ends in an error state
    pub fn unavailable(scores: Arc<ScoreStore<S>>, config: AnalyzerConfig) -> Self {
        Self::with_provider(None, scores, config)
    }

    /// Create a flow from an optional provider
    pub fn with_provider(
        provider: Option<Arc<L>>,
        scores: Arc<ScoreStore<S>>,
        config: AnalyzerConfig,
    ) -> Self {
        Self {
            provider,
            scores,
            config,
            state: Guarded::new(QuizState::Loading),
        }
    }

    /// Fetch a new batch and show its first question
    ///
    /// Failures land in [`QuizState::Error`]; nothing is retried.
    pub async fn load(&self) -> Outcome<QuizState> {
        let ticket = self.state.begin(QuizState::Loading);
        info!(?ticket, "Quiz batch requested");

        let next = match self.fetch().await {
            Ok(batch) => {
                debug!(questions = batch.len(), "Quiz batch loaded");
                QuizState::Ready {
                    batch,
                    index: 0,
                    selected: None,
                }
            }
            Err(e) => {
                warn!("Quiz load failed: {}", e);
                QuizState::Error(e.to_string())
            }
        };

        let outcome = self.state.complete(ticket, next);
        if outcome.is_superseded() {
            warn!(?ticket, "Discarding superseded quiz batch");
        }
        outcome
    }

    /// Reload after an error
    pub async fn retry(&self) -> Outcome<QuizState> {
        self.load().await
    }

    /// Select the option with text `option_text`
    ///
    /// Only allowed while a question is awaiting an answer; replaces any
    /// earlier selection. Returns whether the selection was taken.
    pub fn select(&self, option_text: &str) -> bool {
        self.state.update(|state| match state {
            QuizState::Ready {
                batch,
                index,
                selected,
            } => {
                let known = batch
                    .get(*index)
                    .is_some_and(|question| question.find_option(option_text).is_some());
                if known {
                    *selected = Some(option_text.to_string());
                }
                known
            }
            _ => false,
        })
    }

    /// Select the option at `position` (zero-based) of the current question
    pub fn select_index(&self, position: usize) -> bool {
        let text = self
            .current_question()
            .and_then(|question| question.options.get(position).map(|o| o.text.clone()));
        match text {
            Some(text) => self.select(&text),
            None => false,
        }
    }

    /// Lock in the selected answer and score it
    ///
    /// Returns `None` when no question is awaiting an answer or nothing is
    /// selected. The score is updated at most once per question.
    pub fn submit(&self) -> Option<SubmitOutcome> {
        let answer = self.state.update(|state| {
            let QuizState::Ready {
                batch,
                index,
                selected: Some(selected),
            } = state
            else {
                return None;
            };

            let question = batch.get(*index)?;
            let answer = Answer {
                was_correct: question.find_option(selected).map(|o| o.is_correct),
                explanation: question.explanation.clone(),
                correct_answer: question.correct_option().map(|o| o.text.clone()),
            };

            *state = QuizState::Feedback {
                batch: batch.clone(),
                index: *index,
                selected: selected.clone(),
                was_correct: answer.was_correct,
            };
            Some(answer)
        })?;

        let score = answer.was_correct.and_then(|is_correct| {
            self.scores
                .record_quiz_answer(is_correct)
                .map_err(|e| warn!("Failed to record quiz answer: {}", e))
                .ok()
        });

        Some(SubmitOutcome {
            was_correct: answer.was_correct,
            explanation: answer.explanation,
            correct_answer: answer.correct_answer,
            score,
        })
    }

    /// Move past the answered question
    ///
    /// After the last question a fresh batch is fetched. Returns `None` unless
    /// an answer has been submitted.
    pub async fn advance(&self) -> Option<AdvanceOutcome> {
        let step = self.state.update(|state| match state {
            QuizState::Feedback { batch, index, .. } if batch.is_last(*index) => Step::Refetch,
            QuizState::Feedback { batch, index, .. } => {
                let next = *index + 1;
                *state = QuizState::Ready {
                    batch: batch.clone(),
                    index: next,
                    selected: None,
                };
                Step::Next(next)
            }
            _ => Step::Ignored,
        });

        match step {
            Step::Next(index) => Some(AdvanceOutcome::NextQuestion(index)),
            Step::Refetch => {
                info!("Quiz batch completed");
                Some(AdvanceOutcome::BatchCompleted(self.load().await))
            }
            Step::Ignored => None,
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> QuizState {
        self.state.snapshot()
    }

    /// The question currently on screen
    pub fn current_question(&self) -> Option<QuizQuestion> {
        self.state.snapshot().current_question().cloned()
    }

    /// Current resilience score
    pub fn score(&self) -> ResilienceScore {
        self.scores.score()
    }

    /// Shared score store
    pub fn scores(&self) -> &Arc<ScoreStore<S>> {
        &self.scores
    }

    async fn fetch(&self) -> Result<QuizBatch, AnalyzerError> {
        let provider = self
            .provider
            .as_deref()
            .ok_or(AnalyzerError::ServiceUnavailable)?;

        let request = prompt::quiz_request(&self.config);
        let raw = flow::generate(provider, &request, self.config.request_timeout()).await?;
        debug!(bytes = raw.len(), "Quiz response received");

        parser::normalize_quiz(&raw)
    }
}
