//! Reliability rating module

use std::fmt;

/// Credibility verdict assigned to analyzed text
///
/// `Unknown` is the fallback for any value that cannot be proven to be one of
/// the other four. Code that cannot establish a rating must produce `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReliabilityRating {
    /// Strong signs of disinformation
    HighlySuspicious,

    /// Contains framing or claims likely to mislead
    PotentiallyMisleading,

    /// Plausible but unverified; check before sharing
    NeedsVerification,

    /// Consistent with reliable information
    LikelyAccurate,

    /// No rating could be determined
    #[default]
    Unknown,
}

impl ReliabilityRating {
    /// All ratings in declaration order
    pub const ALL: [ReliabilityRating; 5] = [
        ReliabilityRating::HighlySuspicious,
        ReliabilityRating::PotentiallyMisleading,
        ReliabilityRating::NeedsVerification,
        ReliabilityRating::LikelyAccurate,
        ReliabilityRating::Unknown,
    ];

    /// Get the wire name used in LLM payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            ReliabilityRating::HighlySuspicious => "HIGHLY_SUSPICIOUS",
            ReliabilityRating::PotentiallyMisleading => "POTENTIALLY_MISLEADING",
            ReliabilityRating::NeedsVerification => "NEEDS_VERIFICATION",
            ReliabilityRating::LikelyAccurate => "LIKELY_ACCURATE",
            ReliabilityRating::Unknown => "UNKNOWN",
        }
    }

    /// Parse an exact wire name
    ///
    /// Matching is case sensitive: `"likely_accurate"` is not a member.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rating| rating.as_str() == s)
    }

    /// Total conversion from an optional wire value
    ///
    /// Missing or unrecognized values become [`ReliabilityRating::Unknown`].
    pub fn from_wire(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or(ReliabilityRating::Unknown)
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ReliabilityRating::HighlySuspicious => "Highly suspicious",
            ReliabilityRating::PotentiallyMisleading => "Potentially misleading",
            ReliabilityRating::NeedsVerification => "Needs verification",
            ReliabilityRating::LikelyAccurate => "Likely accurate",
            ReliabilityRating::Unknown => "Unable to determine",
        }
    }

    /// Whether the rating is a concrete verdict
    pub fn is_known(&self) -> bool {
        !matches!(self, ReliabilityRating::Unknown)
    }
}

impl fmt::Display for ReliabilityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReliabilityRating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid reliability rating: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for rating in ReliabilityRating::ALL {
            assert_eq!(ReliabilityRating::parse(rating.as_str()), Some(rating));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(ReliabilityRating::parse("likely_accurate"), None);
        assert_eq!(ReliabilityRating::parse("LIKELY ACCURATE"), None);
    }

    #[test]
    fn test_from_wire_falls_back_to_unknown() {
        assert_eq!(ReliabilityRating::from_wire(None), ReliabilityRating::Unknown);
        assert_eq!(
            ReliabilityRating::from_wire(Some("TOTALLY_FAKE")),
            ReliabilityRating::Unknown
        );
        assert_eq!(
            ReliabilityRating::from_wire(Some("NEEDS_VERIFICATION")),
            ReliabilityRating::NeedsVerification
        );
    }

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(ReliabilityRating::default(), ReliabilityRating::Unknown);
        assert!(!ReliabilityRating::Unknown.is_known());
        assert!(ReliabilityRating::HighlySuspicious.is_known());
    }

    #[test]
    fn test_from_str_error() {
        let err = "nope".parse::<ReliabilityRating>().unwrap_err();
        assert!(err.contains("nope"));
    }
}
