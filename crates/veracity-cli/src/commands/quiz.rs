//! Quiz command implementation.

use crate::cli::QuizArgs;
use crate::error::Result;
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fmt;
use veracity_analyzer::{AdvanceOutcome, QuizFlow, QuizState};
use veracity_domain::traits::{KeyValueStorage, LlmProvider};
use veracity_domain::ResilienceScore;

/// Totals for one quiz session.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSummary {
    /// Questions answered
    pub answered: usize,
    /// Questions answered correctly
    pub correct: usize,
    /// Score at the end of the session
    pub score: ResilienceScore,
}

/// Execute the quiz command.
pub async fn execute_quiz<L, S>(
    args: QuizArgs,
    flow: &QuizFlow<L, S>,
    formatter: &Formatter,
) -> Result<()>
where
    L: LlmProvider,
    S: KeyValueStorage,
    S::Error: fmt::Display,
{
    let mut editor = DefaultEditor::new()?;
    let summary = run_quiz(flow, formatter, args.rounds, |prompt| {
        read_answer(&mut editor, prompt)
    })
    .await?;

    print_summary(&summary, formatter);
    Ok(())
}

/// Print the totals of a finished session.
pub fn print_summary(summary: &QuizSummary, formatter: &Formatter) {
    println!(
        "{}",
        formatter.info(&format!(
            "Answered {} ({} correct). Resilience score: {}/100",
            summary.answered,
            summary.correct,
            summary.score.value()
        ))
    );
}

/// Read one line; interrupt and end of input both mean "stop".
pub fn read_answer(editor: &mut DefaultEditor, prompt: &str) -> Result<Option<String>> {
    match editor.readline(prompt) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Drive the quiz with answers from `read_line` until the user quits.
///
/// `read_line` returns `None` at end of input. With `rounds` set, the session
/// ends after that many answers.
pub async fn run_quiz<L, S, F>(
    flow: &QuizFlow<L, S>,
    formatter: &Formatter,
    rounds: Option<usize>,
    mut read_line: F,
) -> Result<QuizSummary>
where
    L: LlmProvider,
    S: KeyValueStorage,
    S::Error: fmt::Display,
    F: FnMut(&str) -> Result<Option<String>>,
{
    let mut answered = 0;
    let mut correct = 0;

    if matches!(flow.state(), QuizState::Loading) {
        println!("{}", formatter.info("Loading questions..."));
        flow.load().await;
    }

    while rounds.map_or(true, |limit| answered < limit) {
        match flow.state() {
            QuizState::Loading => {
                flow.load().await;
            }
            QuizState::Error(message) => {
                println!("{}", formatter.error(&message));
                match read_line("Press Enter to retry or q to quit: ")? {
                    Some(line) if !is_quit(&line) => {
                        flow.retry().await;
                    }
                    _ => break,
                }
            }
            QuizState::Feedback { .. } => {
                if let Some(AdvanceOutcome::BatchCompleted(_)) = flow.advance().await {
                    println!("{}", formatter.info("Batch complete. Here are new questions."));
                }
            }
            QuizState::Ready { batch, index, .. } => {
                let Some(question) = batch.get(index) else {
                    break;
                };
                println!("{}", formatter.format_question(question, index, batch.len()));

                let Some(line) = read_line("Your answer (number, q to quit): ")? else {
                    break;
                };
                let line = line.trim();
                if is_quit(line) {
                    break;
                }

                let selected = line
                    .parse::<usize>()
                    .ok()
                    .filter(|choice| *choice >= 1)
                    .is_some_and(|choice| flow.select_index(choice - 1));
                if !selected {
                    println!(
                        "{}",
                        formatter.warning(&format!(
                            "Enter a number between 1 and {}",
                            question.options.len()
                        ))
                    );
                    continue;
                }

                if let Some(outcome) = flow.submit() {
                    answered += 1;
                    if outcome.was_correct == Some(true) {
                        correct += 1;
                    }
                    println!("{}\n", formatter.format_feedback(&outcome));
                }
            }
        }
    }

    Ok(QuizSummary {
        answered,
        correct,
        score: flow.score(),
    })
}

fn is_quit(line: &str) -> bool {
    matches!(line.trim(), "q" | "quit" | "exit")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::collections::VecDeque;
    use std::sync::Arc;
    use veracity_analyzer::AnalyzerConfig;
    use veracity_llm::MockProvider;
    use veracity_store::{MemoryStorage, ScoreStore};

    const QUIZ: &str = r#"[
        {"id": "q1", "questionText": "First?", "options": [
            {"text": "a", "isCorrect": false},
            {"text": "b", "isCorrect": true},
            {"text": "c", "isCorrect": false}
        ], "explanation": "b is right"},
        {"id": "q2", "questionText": "Second?", "options": [
            {"text": "x", "isCorrect": true},
            {"text": "y", "isCorrect": false},
            {"text": "z", "isCorrect": false}
        ], "explanation": "x is right"}
    ]"#;

    fn flow(llm: &MockProvider) -> QuizFlow<MockProvider, MemoryStorage> {
        let scores = Arc::new(ScoreStore::open(MemoryStorage::new()).unwrap());
        QuizFlow::new(Arc::new(llm.clone()), scores, AnalyzerConfig::default())
    }

    fn scripted(lines: &[&str]) -> impl FnMut(&str) -> Result<Option<String>> {
        let mut lines: VecDeque<String> = lines.iter().map(|s| s.to_string()).collect();
        move |_| Ok(lines.pop_front())
    }

    fn formatter() -> Formatter {
        Formatter::new(OutputFormat::Table, false)
    }

    #[tokio::test]
    async fn test_answers_update_score() {
        let llm = MockProvider::new(QUIZ);
        let flow = flow(&llm);

        let summary = run_quiz(&flow, &formatter(), Some(2), scripted(&["2", "2"]))
            .await
            .unwrap();

        assert_eq!(summary.answered, 2);
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.score.value(), 55);
    }

    #[tokio::test]
    async fn test_invalid_answers_are_reasked() {
        let llm = MockProvider::new(QUIZ);
        let flow = flow(&llm);

        let summary = run_quiz(&flow, &formatter(), None, scripted(&["abc", "0", "9", "q"]))
            .await
            .unwrap();

        assert_eq!(summary.answered, 0);
        assert_eq!(summary.score.value(), 50);
        assert!(matches!(flow.state(), QuizState::Ready { selected: None, .. }));
    }

    #[tokio::test]
    async fn test_end_of_input_stops() {
        let llm = MockProvider::new(QUIZ);
        let flow = flow(&llm);

        let summary = run_quiz(&flow, &formatter(), None, scripted(&["2"]))
            .await
            .unwrap();

        assert_eq!(summary.answered, 1);
        assert_eq!(summary.correct, 1);
    }

    #[tokio::test]
    async fn test_error_state_offers_retry() {
        let llm = MockProvider::new("[]");
        let flow = flow(&llm);

        let summary = run_quiz(&flow, &formatter(), None, scripted(&["", "q"]))
            .await
            .unwrap();

        assert_eq!(summary.answered, 0);
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn test_new_batch_after_last_question() {
        let llm = MockProvider::new(QUIZ);
        let flow = flow(&llm);

        let summary = run_quiz(&flow, &formatter(), Some(3), scripted(&["2", "1", "2"]))
            .await
            .unwrap();

        assert_eq!(summary.answered, 3);
        assert_eq!(summary.correct, 3);
        assert_eq!(summary.score.value(), 80);
        assert_eq!(llm.call_count(), 2);
    }
}
