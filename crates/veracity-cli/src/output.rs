//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use veracity_analyzer::SubmitOutcome;
use veracity_domain::{AnalysisResult, QuizQuestion, ReliabilityRating, ResilienceScore};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an analysis result.
    ///
    /// `error` is the failure message when the analysis degraded to UNKNOWN.
    pub fn format_analysis(
        &self,
        result: &AnalysisResult,
        error: Option<&str>,
        show_raw: bool,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_analysis_json(result, error, show_raw),
            OutputFormat::Table => Ok(self.format_analysis_table(result, error, show_raw)),
            OutputFormat::Quiet => Ok(result.rating().as_str().to_string()),
        }
    }

    fn format_analysis_json(
        &self,
        result: &AnalysisResult,
        error: Option<&str>,
        show_raw: bool,
    ) -> Result<String> {
        let sources: Vec<serde_json::Value> = result
            .meaningful_sources()
            .map(|s| serde_json::json!({ "title": s.title, "url": s.url }))
            .collect();

        let mut json = serde_json::json!({
            "reliability": result.rating().as_str(),
            "label": result.rating().label(),
            "explanation": result.explanation(),
            "keywords_for_fact_check": result.fact_check_keywords(),
            "suggested_sources": sources,
        });

        if let Some(error) = error {
            json["error"] = serde_json::Value::from(error);
        }
        if show_raw {
            json["raw_response"] = serde_json::Value::from(result.raw_response());
        }

        Ok(serde_json::to_string_pretty(&json)?)
    }

    fn format_analysis_table(
        &self,
        result: &AnalysisResult,
        error: Option<&str>,
        show_raw: bool,
    ) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Rating", &self.rating_label(result.rating())]);
        builder.push_record(["Explanation", result.explanation()]);

        if !result.fact_check_keywords().is_empty() {
            builder.push_record(["Keywords", &result.fact_check_keywords().join(", ")]);
        }

        let sources: Vec<String> = result
            .meaningful_sources()
            .map(|s| format!("{} <{}>", s.display_title(), s.url))
            .collect();
        if !sources.is_empty() {
            builder.push_record(["Sources", &sources.join("\n")]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut out = table.to_string();
        if let Some(error) = error {
            out.push('\n');
            out.push_str(&self.warning(error));
        }
        if show_raw {
            out.push_str("\n\nRaw response:\n");
            out.push_str(result.raw_response().unwrap_or("(none)"));
        }
        out
    }

    /// Format the resilience score.
    pub fn format_score(&self, score: ResilienceScore) -> Result<String> {
        let band = score.band();
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "score": score.value(),
                "band": band.as_str(),
                "message": band.message(),
            }))?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Score", "Band", "Message"]);
                builder.push_record([
                    format!("{}/100", score.value()),
                    band.as_str().to_string(),
                    band.message().to_string(),
                ]);
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(score.value().to_string()),
        }
    }

    /// Format a quiz question with numbered options.
    pub fn format_question(&self, question: &QuizQuestion, index: usize, total: usize) -> String {
        let mut out = self.colorize(
            &format!("Question {}/{}: {}", index + 1, total, question.question_text),
            "cyan",
        );
        for (i, option) in question.options.iter().enumerate() {
            out.push_str(&format!("\n  {}) {}", i + 1, option.text));
        }
        out
    }

    /// Format the feedback shown after an answer.
    pub fn format_feedback(&self, outcome: &SubmitOutcome) -> String {
        let mut lines = Vec::new();

        match (outcome.was_correct, &outcome.correct_answer) {
            (Some(true), _) => lines.push(self.success("Correct!")),
            (Some(false), Some(answer)) => {
                lines.push(self.error(&format!("Incorrect. The answer is: {}", answer)))
            }
            (Some(false), None) => lines.push(self.error("Incorrect.")),
            (None, _) => lines.push(self.warning("That answer could not be scored.")),
        }

        if !outcome.explanation.is_empty() {
            lines.push(outcome.explanation.clone());
        }
        if let Some(score) = outcome.score {
            lines.push(self.info(&format!("Resilience score: {}/100", score.value())));
        }

        lines.join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn rating_label(&self, rating: ReliabilityRating) -> String {
        let color = match rating {
            ReliabilityRating::HighlySuspicious => "red",
            ReliabilityRating::PotentiallyMisleading => "yellow",
            ReliabilityRating::NeedsVerification => "cyan",
            ReliabilityRating::LikelyAccurate => "green",
            ReliabilityRating::Unknown => "magenta",
        };
        self.colorize(rating.label(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}
