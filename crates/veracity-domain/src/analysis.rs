//! Analysis result module

use crate::rating::ReliabilityRating;

/// Number of suggested sources that are considered meaningful for display
pub const MAX_MEANINGFUL_SOURCES: usize = 2;

/// A source the reader can consult to verify the analyzed text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedSource {
    /// Article or page title, when the model supplied one
    pub title: Option<String>,

    /// Location of the source
    pub url: String,
}

impl SuggestedSource {
    /// Create a new suggested source
    pub fn new(title: Option<String>, url: impl Into<String>) -> Self {
        Self {
            title,
            url: url.into(),
        }
    }

    /// Title to display, falling back to the URL
    pub fn display_title(&self) -> &str {
        match &self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => &self.url,
        }
    }
}

/// Credibility assessment for one analysis request
///
/// Built once by the normalizer (or as a fallback by the analysis flow) and
/// never mutated afterwards; all fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    rating: ReliabilityRating,
    explanation: String,
    fact_check_keywords: Vec<String>,
    suggested_sources: Vec<SuggestedSource>,
    raw_response: Option<String>,
}

impl AnalysisResult {
    /// Create a fully specified result
    pub fn new(
        rating: ReliabilityRating,
        explanation: impl Into<String>,
        fact_check_keywords: Vec<String>,
        suggested_sources: Vec<SuggestedSource>,
        raw_response: Option<String>,
    ) -> Self {
        Self {
            rating,
            explanation: explanation.into(),
            fact_check_keywords,
            suggested_sources,
            raw_response,
        }
    }

    /// Fallback result used whenever no rating can be established
    pub fn unknown(explanation: impl Into<String>) -> Self {
        Self::new(
            ReliabilityRating::Unknown,
            explanation,
            Vec::new(),
            Vec::new(),
            None,
        )
    }

    /// The credibility verdict
    pub fn rating(&self) -> ReliabilityRating {
        self.rating
    }

    /// Reasoning behind the verdict
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Keywords the reader can search to fact-check the text
    pub fn fact_check_keywords(&self) -> &[String] {
        &self.fact_check_keywords
    }

    /// Every source the model returned
    pub fn suggested_sources(&self) -> &[SuggestedSource] {
        &self.suggested_sources
    }

    /// At most two sources that carry a usable URL
    pub fn meaningful_sources(&self) -> impl Iterator<Item = &SuggestedSource> {
        self.suggested_sources
            .iter()
            .filter(|source| !source.url.trim().is_empty())
            .take(MAX_MEANINGFUL_SOURCES)
    }

    /// Untouched model output, kept for debugging
    pub fn raw_response(&self) -> Option<&str> {
        self.raw_response.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_result() {
        let result = AnalysisResult::unknown("try again");
        assert_eq!(result.rating(), ReliabilityRating::Unknown);
        assert_eq!(result.explanation(), "try again");
        assert!(result.fact_check_keywords().is_empty());
        assert!(result.suggested_sources().is_empty());
        assert!(result.raw_response().is_none());
    }

    #[test]
    fn test_meaningful_sources_caps_and_skips_empty_urls() {
        let result = AnalysisResult::new(
            ReliabilityRating::NeedsVerification,
            "check it",
            vec![],
            vec![
                SuggestedSource::new(Some("Empty".into()), ""),
                SuggestedSource::new(Some("One".into()), "https://one.example"),
                SuggestedSource::new(None, "https://two.example"),
                SuggestedSource::new(Some("Three".into()), "https://three.example"),
            ],
            None,
        );

        let urls: Vec<&str> = result.meaningful_sources().map(|s| s.url.as_str()).collect();
        assert_eq!(urls, vec!["https://one.example", "https://two.example"]);
        assert_eq!(result.suggested_sources().len(), 4);
    }

    #[test]
    fn test_display_title_falls_back_to_url() {
        let source = SuggestedSource::new(Some("  ".into()), "https://x.example");
        assert_eq!(source.display_title(), "https://x.example");

        let source = SuggestedSource::new(Some("Report".into()), "https://x.example");
        assert_eq!(source.display_title(), "Report");
    }
}
