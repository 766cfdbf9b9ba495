//! End-to-end scenarios for veracity-analyzer
//!
//! Each scenario wires the flows to a mock LLM and a real SQLite-backed score
//! store, the same way the CLI does.

use std::sync::Arc;
use veracity_analyzer::{AnalysisFlow, AnalyzerConfig, AnalyzerError, QuizFlow, QuizState};
use veracity_domain::ReliabilityRating;
use veracity_llm::MockProvider;
use veracity_store::{ScoreStore, SqliteStorage};

const QUIZ: &str = r#"```json
[
  {
    "id": "q1",
    "questionText": "Which is a warning sign?",
    "options": [
      {"text": "Urgent call to share", "isCorrect": true},
      {"text": "Named author", "isCorrect": false},
      {"text": "Linked study", "isCorrect": false}
    ],
    "explanation": "Manufactured urgency discourages checking."
  },
  {
    "id": "q2",
    "questionText": "Where do you verify a quote?",
    "options": [
      {"text": "A screenshot", "isCorrect": false},
      {"text": "The primary source", "isCorrect": true},
      {"text": "A reply thread", "isCorrect": false}
    ],
    "explanation": "Go to the primary source."
  }
]
```"#;

#[tokio::test]
async fn scenario_empty_input_is_rejected_locally() {
    let llm = MockProvider::default();
    let flow = AnalysisFlow::new(Arc::new(llm.clone()), AnalyzerConfig::default());

    let err = flow.analyze("").await.unwrap_err();

    assert!(matches!(err, AnalyzerError::EmptyInput));
    assert_eq!(err.to_string(), "Please enter text to analyze");
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn scenario_well_formed_analysis() {
    let llm = MockProvider::new(
        r#"{"reliability":"LIKELY_ACCURATE","explanation":"ok","keywords_for_fact_check":["x"]}"#,
    );
    let flow = AnalysisFlow::new(Arc::new(llm), AnalyzerConfig::default());

    flow.analyze("The museum reopens on Monday.").await.unwrap();

    let state = flow.state();
    let result = state.result().unwrap();
    assert_eq!(result.rating(), ReliabilityRating::LikelyAccurate);
    assert_eq!(result.explanation(), "ok");
    assert_eq!(result.fact_check_keywords(), ["x"]);
    assert!(result.suggested_sources().is_empty());
}

#[tokio::test]
async fn scenario_invalid_json_shows_unknown_with_message() {
    let llm = MockProvider::new("<html>502 Bad Gateway</html>");
    let flow = AnalysisFlow::new(Arc::new(llm), AnalyzerConfig::default());

    flow.analyze("Anything").await.unwrap();

    let state = flow.state();
    assert_eq!(state.result().unwrap().rating(), ReliabilityRating::Unknown);
    assert!(!state.error().unwrap().is_empty());
}

#[tokio::test]
async fn scenario_quiz_moves_score_and_persists() {
    let scores = Arc::new(ScoreStore::open(SqliteStorage::new(":memory:").unwrap()).unwrap());
    let flow = QuizFlow::new(
        Arc::new(MockProvider::new(QUIZ)),
        Arc::clone(&scores),
        AnalyzerConfig::default(),
    );

    flow.load().await;
    assert!(matches!(flow.state(), QuizState::Ready { .. }));
    assert_eq!(scores.score().value(), 50);

    flow.select("Urgent call to share");
    assert_eq!(flow.submit().unwrap().score.unwrap().value(), 60);

    flow.advance().await;
    flow.select("A screenshot");
    assert_eq!(flow.submit().unwrap().score.unwrap().value(), 55);

    drop(flow);
    let scores = Arc::try_unwrap(scores).unwrap();
    let reopened = ScoreStore::open(scores.into_storage()).unwrap();
    assert_eq!(reopened.score().value(), 55);
}
