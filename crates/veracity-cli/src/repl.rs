//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::commands;
use crate::commands::quiz::{print_summary, read_answer, run_quiz};
use crate::config::Config;
use crate::context::AppContext;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::config::Config as EditorConfig;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Run the interactive REPL.
pub async fn run_repl(context: &AppContext, config: &Config, formatter: &Formatter) -> Result<()> {
    println!(
        "{}",
        formatter.info("Veracity REPL - Type 'help' for commands, 'exit' to quit")
    );
    if !context.analysis.is_available() {
        println!(
            "{}",
            formatter.warning(veracity_analyzer::SERVICE_UNAVAILABLE_MESSAGE)
        );
    }
    println!();

    let editor_config = EditorConfig::builder()
        .max_history_size(config.settings.history_size)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("veracity> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(ReplCommand::Analyze(text)) => {
                        let rendered = commands::analyze::analyze_text(
                            &context.analysis,
                            &text,
                            false,
                            formatter,
                        )
                        .await;
                        match rendered {
                            Ok(output) => println!("{}", output),
                            Err(e) => eprintln!("{}", render_analyze_error(&e, formatter)),
                        }
                    }
                    Ok(ReplCommand::Quiz) => {
                        let session = run_quiz(&context.quiz, formatter, None, |prompt| {
                            read_answer(&mut editor, prompt)
                        })
                        .await;
                        match session {
                            Ok(summary) => print_summary(&summary, formatter),
                            Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                        }
                    }
                    Ok(ReplCommand::Score) => {
                        if let Err(e) = commands::execute_score(&context.scores, formatter) {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Analyze(String),
    Quiz,
    Score,
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map(|(command, rest)| (command, rest.trim()))
        .unwrap_or((line, ""));

    match command {
        "" => Err(CliError::InvalidInput("Empty command".to_string())),
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "analyze" | "a" => {
            if rest.is_empty() {
                return Err(CliError::InvalidInput("Usage: analyze <text>".to_string()));
            }
            Ok(ReplCommand::Analyze(rest.to_string()))
        }
        "quiz" => Ok(ReplCommand::Quiz),
        "score" => Ok(ReplCommand::Score),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            command
        ))),
    }
}

/// Input the user can fix is a warning, anything else an error.
fn render_analyze_error(error: &CliError, formatter: &Formatter) -> String {
    match error {
        CliError::Analyzer(e) if e.is_validation() => formatter.warning(&e.to_string()),
        other => formatter.error(&other.to_string()),
    }
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::home()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  analyze <text>, a <text>       - Rate the credibility of a post");
    println!("  quiz                           - Take the information-literacy quiz");
    println!("  score                          - Show your resilience score");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_keeps_full_text() {
        assert_eq!(
            parse_repl_command("analyze  Breaking: aliens   landed ").unwrap(),
            ReplCommand::Analyze("Breaking: aliens   landed".to_string())
        );
        assert_eq!(
            parse_repl_command("a short").unwrap(),
            ReplCommand::Analyze("short".to_string())
        );
    }

    #[test]
    fn test_parse_analyze_requires_text() {
        assert!(matches!(
            parse_repl_command("analyze"),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_repl_command("quiz").unwrap(), ReplCommand::Quiz);
        assert_eq!(parse_repl_command("score").unwrap(), ReplCommand::Score);
        assert_eq!(parse_repl_command("?").unwrap(), ReplCommand::Help);
        assert_eq!(parse_repl_command("exit").unwrap(), ReplCommand::Exit);
    }

    #[test]
    fn test_validation_errors_render_as_warnings() {
        use crate::config::OutputFormat;
        use veracity_analyzer::AnalyzerError;

        let formatter = Formatter::new(OutputFormat::Table, false);
        let too_long = CliError::Analyzer(AnalyzerError::TextTooLong(5001, 5000));
        assert_eq!(
            render_analyze_error(&too_long, &formatter),
            formatter.warning(&AnalyzerError::TextTooLong(5001, 5000).to_string())
        );

        let timeout = CliError::Analyzer(AnalyzerError::Timeout);
        assert_eq!(
            render_analyze_error(&timeout, &formatter),
            formatter.error(&timeout.to_string())
        );
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = parse_repl_command("learn stuff").unwrap_err();
        assert!(err.to_string().contains("Unknown command: learn"));
    }
}
