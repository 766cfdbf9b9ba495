//! Normalize raw LLM output into analysis results and quiz batches
//!
//! Everything here is a pure function of the input text.

use crate::error::AnalyzerError;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;
use veracity_domain::{
    AnalysisResult, QuizBatch, QuizOption, QuizQuestion, ReliabilityRating, SuggestedSource,
};

/// Explanation used when the model did not provide one
pub const MISSING_EXPLANATION: &str = "No explanation was provided.";

#[derive(Deserialize)]
struct SourcePayload {
    #[serde(default)]
    title: Option<String>,
    url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionPayload {
    #[serde(default)]
    id: Option<String>,
    question_text: String,
    options: Vec<OptionPayload>,
    #[serde(default)]
    explanation: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionPayload {
    text: String,
    #[serde(default)]
    is_correct: bool,
}

/// Extract the body of a fenced code block, if the text is one
///
/// LLMs sometimes wrap JSON in markdown code blocks, optionally tagged with a
/// language name. Text that is not fenced is returned trimmed.
pub fn strip_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };

    let body = inner
        .trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '_')
        .trim();

    if body.is_empty() {
        trimmed
    } else {
        body
    }
}

fn parse_json(raw: &str) -> Result<Value, AnalyzerError> {
    serde_json::from_str(strip_fence(raw))
        .map_err(|e| AnalyzerError::malformed(format!("JSON parse error: {}", e), raw))
}

/// Normalize a credibility-analysis response
///
/// The rating falls back to `UNKNOWN` whenever it is not an exact member of
/// the enumeration; explanation, keywords and sources are defaulted when
/// absent. Unknown fields are ignored.
///
/// # Errors
///
/// `MalformedPayload` when the text is not JSON or not a JSON object.
pub fn normalize_analysis(raw: &str) -> Result<AnalysisResult, AnalyzerError> {
    let json = parse_json(raw)?;
    let obj = json
        .as_object()
        .ok_or_else(|| AnalyzerError::malformed("Expected JSON object", raw))?;

    let rating = ReliabilityRating::from_wire(obj.get("reliability").and_then(Value::as_str));

    let explanation = obj
        .get("explanation")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .unwrap_or(MISSING_EXPLANATION);

    Ok(AnalysisResult::new(
        rating,
        explanation,
        parse_keywords(obj),
        parse_sources(obj),
        Some(raw.to_string()),
    ))
}

fn parse_keywords(obj: &Map<String, Value>) -> Vec<String> {
    match obj.get("keywords_for_fact_check") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(other) => {
            warn!("Ignoring keywords_for_fact_check of unexpected type: {}", other);
            Vec::new()
        }
    }
}

fn parse_sources(obj: &Map<String, Value>) -> Vec<SuggestedSource> {
    match obj.get("suggested_sources") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| {
                match SourcePayload::deserialize(item) {
                    Ok(source) => Some(SuggestedSource::new(source.title, source.url)),
                    Err(e) => {
                        warn!("Dropping suggested source {}: {}", idx, e);
                        None
                    }
                }
            })
            .collect(),
        Some(other) => {
            warn!("Ignoring suggested_sources of unexpected type: {}", other);
            Vec::new()
        }
    }
}

/// Normalize a quiz-generation response
///
/// # Errors
///
/// - `MalformedPayload` when the text is not JSON or a question cannot be decoded
/// - `InvalidQuizData` when the JSON is not a non-empty array
pub fn normalize_quiz(raw: &str) -> Result<QuizBatch, AnalyzerError> {
    let json = parse_json(raw)?;
    let items = match json.as_array() {
        Some(items) if !items.is_empty() => items,
        _ => return Err(AnalyzerError::InvalidQuizData),
    };

    let mut questions = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let payload = QuestionPayload::deserialize(item)
            .map_err(|e| AnalyzerError::malformed(format!("Question {}: {}", idx + 1, e), raw))?;

        let question = QuizQuestion {
            id: payload.id.unwrap_or_else(|| format!("q{}", idx + 1)),
            question_text: payload.question_text,
            options: payload
                .options
                .into_iter()
                .map(|option| QuizOption::new(option.text, option.is_correct))
                .collect(),
            explanation: payload.explanation,
        };

        // Shape is a prompt convention; deviations are reported, not rejected.
        if question.options.len() != 3 || question.correct_count() != 1 {
            warn!(
                "Quiz question {} has {} options and {} marked correct",
                question.id,
                question.options.len(),
                question.correct_count()
            );
        }

        questions.push(question);
    }

    QuizBatch::new(questions).ok_or(AnalyzerError::InvalidQuizData)
}
