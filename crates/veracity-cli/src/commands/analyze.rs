//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fs;
use std::io::{self, Read};
use veracity_analyzer::{AnalysisFlow, AnalysisState};
use veracity_domain::traits::LlmProvider;

/// Execute the analyze command.
pub async fn execute_analyze<L: LlmProvider>(
    args: AnalyzeArgs,
    flow: &AnalysisFlow<L>,
    formatter: &Formatter,
) -> Result<()> {
    let text = read_input(&args)?;
    println!("{}", analyze_text(flow, &text, args.raw, formatter).await?);
    Ok(())
}

/// Read the text to analyze from the argument, a file or stdin.
pub fn read_input(args: &AnalyzeArgs) -> Result<String> {
    if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else if let Some(file_path) = &args.file {
        Ok(fs::read_to_string(file_path)?)
    } else if let Some(text) = &args.text {
        Ok(text.clone())
    } else {
        Err(CliError::InvalidInput(
            "Provide text, --file or --stdin".to_string(),
        ))
    }
}

/// Run one analysis and render the resulting state.
pub async fn analyze_text<L: LlmProvider>(
    flow: &AnalysisFlow<L>,
    text: &str,
    show_raw: bool,
    formatter: &Formatter,
) -> Result<String> {
    flow.analyze(text).await?;

    match flow.state() {
        AnalysisState::Succeeded(result) => formatter.format_analysis(&result, None, show_raw),
        AnalysisState::Failed { result, error } => {
            formatter.format_analysis(&result, Some(&error), show_raw)
        }
        AnalysisState::Idle | AnalysisState::Requesting => Err(CliError::InvalidInput(
            "Analysis did not complete".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::sync::Arc;
    use tempfile::NamedTempFile;
    use veracity_analyzer::{AnalyzerConfig, AnalyzerError};
    use veracity_llm::MockProvider;

    fn args(text: Option<&str>, file: Option<String>) -> AnalyzeArgs {
        AnalyzeArgs {
            text: text.map(str::to_string),
            file,
            stdin: false,
            raw: false,
        }
    }

    #[test]
    fn test_read_input_from_text_and_file() {
        assert_eq!(read_input(&args(Some("hello"), None)).unwrap(), "hello");

        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "from a file").unwrap();
        let from_file = read_input(&args(None, Some(file.path().display().to_string()))).unwrap();
        assert_eq!(from_file, "from a file");

        assert!(matches!(
            read_input(&args(None, None)),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_analyze_text_renders_rating() {
        let llm = MockProvider::new(r#"{"reliability":"HIGHLY_SUSPICIOUS","explanation":"fake"}"#);
        let flow = AnalysisFlow::new(Arc::new(llm), AnalyzerConfig::default());
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let output = analyze_text(&flow, "Share before it gets deleted!", false, &formatter)
            .await
            .unwrap();
        assert_eq!(output, "HIGHLY_SUSPICIOUS");
    }

    #[tokio::test]
    async fn test_analyze_text_reports_failure() {
        let llm = MockProvider::new("not json");
        let flow = AnalysisFlow::new(Arc::new(llm), AnalyzerConfig::default());
        let formatter = Formatter::new(OutputFormat::Table, false);

        let output = analyze_text(&flow, "text", false, &formatter).await.unwrap();
        assert!(output.contains("Unable to determine"));
        assert!(output.contains("⚠"));
    }

    #[tokio::test]
    async fn test_analyze_text_propagates_validation() {
        let flow = AnalysisFlow::new(Arc::new(MockProvider::default()), AnalyzerConfig::default());
        let formatter = Formatter::new(OutputFormat::Table, false);

        let err = analyze_text(&flow, "  ", false, &formatter).await.unwrap_err();
        assert!(matches!(err, CliError::Analyzer(AnalyzerError::EmptyInput)));
    }
}
