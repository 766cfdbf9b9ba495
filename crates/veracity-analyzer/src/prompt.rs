//! LLM prompts for credibility analysis and quiz generation

use crate::config::AnalyzerConfig;
use veracity_domain::traits::GenerationRequest;
use veracity_domain::ReliabilityRating;

/// Build the request that asks the LLM to rate `text`
///
/// The user text is sent as-is; the JSON schema lives in the system
/// instruction.
pub fn analysis_request(text: &str, config: &AnalyzerConfig) -> GenerationRequest {
    GenerationRequest::new(text)
        .with_system_instruction(analysis_instruction())
        .with_temperature(config.analysis_temperature)
        .expecting_json()
}

/// Build the request that asks the LLM for a batch of quiz questions
pub fn quiz_request(config: &AnalyzerConfig) -> GenerationRequest {
    GenerationRequest::new(QUIZ_PROMPT)
        .with_temperature(config.quiz_temperature)
        .expecting_json()
}

fn analysis_instruction() -> String {
    let choices: Vec<&str> = ReliabilityRating::ALL
        .iter()
        .filter(|rating| rating.is_known())
        .map(|rating| rating.as_str())
        .collect();

    ANALYSIS_INSTRUCTIONS.replace("{ratings}", &choices.join("|"))
}

const ANALYSIS_INSTRUCTIONS: &str = r#"You are an expert at judging the risk that a social-media post contains disinformation or misinformation.
Analyze the provided text and answer in the following JSON format:
{
  "reliability": "<one of {ratings}>",
  "explanation": "<the result of the analysis and its grounds>",
  "keywords_for_fact_check": ["<keyword 1>", "<keyword 2>"],
  "suggested_sources": [{"title": "<article title>", "url": "<URL>"}, {"title": "<article title 2>", "url": "<URL 2>"}]
}
While analyzing, watch for inflammatory wording, missing evidence, one-sided claims, expressions that manufacture urgency, and unnatural URLs.
Include at most 2 suggested_sources, and only when they are highly relevant. The field may be omitted otherwise."#;

const QUIZ_PROMPT: &str = r#"Create 3 multiple-choice questions about disinformation, each with 3 options, in the following JSON format. Give every question a short explanation.
[
  {
    "id": "q1",
    "questionText": "Question text",
    "options": [
      {"text": "Option 1", "isCorrect": false},
      {"text": "Option 2", "isCorrect": true},
      {"text": "Option 3", "isCorrect": false}
    ],
    "explanation": "Short explanation of the correct answer"
  }
]
Important: follow the format above exactly and produce 3 questions. Wrap them in an array where each element is one question object, and mark exactly one option per question as correct."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_request_carries_text_and_schema() {
        let request = analysis_request("Breaking: the moon is cheese!", &AnalyzerConfig::default());

        assert_eq!(request.contents, "Breaking: the moon is cheese!");
        assert_eq!(request.temperature, 0.3);
        assert_eq!(request.response_mime_type.as_deref(), Some("application/json"));

        let instruction = request.system_instruction.unwrap();
        assert!(instruction.contains("keywords_for_fact_check"));
        assert!(instruction.contains("suggested_sources"));
        assert!(instruction.contains(
            "HIGHLY_SUSPICIOUS|POTENTIALLY_MISLEADING|NEEDS_VERIFICATION|LIKELY_ACCURATE"
        ));
        assert!(!instruction.contains("{ratings}"));
        assert!(!instruction.contains("UNKNOWN"));
    }

    #[test]
    fn test_quiz_request() {
        let request = quiz_request(&AnalyzerConfig::default());

        assert_eq!(request.temperature, 0.7);
        assert!(request.system_instruction.is_none());
        assert!(request.contents.contains("questionText"));
        assert!(request.contents.contains("isCorrect"));
    }

    #[test]
    fn test_temperatures_follow_config() {
        let config = AnalyzerConfig {
            analysis_temperature: 0.1,
            quiz_temperature: 0.9,
            ..AnalyzerConfig::default()
        };
        assert_eq!(analysis_request("x", &config).temperature, 0.1);
        assert_eq!(quiz_request(&config).temperature, 0.9);
    }
}
