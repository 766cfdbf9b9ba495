//! Resilience score module
//!
//! The score is a 0-100 measure of how well the user spots misinformation.
//! It only moves through [`ResilienceScore::apply`], which clamps the result.

use std::fmt;

/// Score a new user starts with
pub const INITIAL_RESILIENCE_SCORE: u8 = 50;

/// Points awarded for a correct quiz answer
pub const QUIZ_CORRECT_ANSWER_POINTS: i64 = 10;

/// Points deducted for an incorrect quiz answer
pub const QUIZ_INCORRECT_ANSWER_PENALTY: i64 = 5;

/// Storage key under which the score is persisted
pub const RESILIENCE_SCORE_KEY: &str = "resilienceScore";

const MIN_SCORE: i64 = 0;
const MAX_SCORE: i64 = 100;

/// Resilience score in `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResilienceScore(u8);

impl ResilienceScore {
    /// Create a score, clamping `value` into `[0, 100]`
    pub fn new(value: i64) -> Self {
        Self(value.clamp(MIN_SCORE, MAX_SCORE) as u8)
    }

    /// The numeric value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Apply a signed change and clamp the result
    pub fn apply(&self, delta: i64) -> Self {
        Self::new(i64::from(self.0).saturating_add(delta))
    }

    /// Change applied for one quiz answer
    pub fn quiz_delta(is_correct: bool) -> i64 {
        if is_correct {
            QUIZ_CORRECT_ANSWER_POINTS
        } else {
            -QUIZ_INCORRECT_ANSWER_PENALTY
        }
    }

    /// Parse a persisted plain decimal string
    ///
    /// Surrounding whitespace is ignored and out-of-range values are clamped.
    /// Returns `None` when the text is not an integer.
    pub fn parse_stored(text: &str) -> Option<Self> {
        text.trim().parse::<i64>().ok().map(Self::new)
    }

    /// Value in its persisted form
    pub fn to_stored(&self) -> String {
        self.0.to_string()
    }

    /// Performance band for this score
    pub fn band(&self) -> ScoreBand {
        match self.0 {
            85..=100 => ScoreBand::Excellent,
            70..=84 => ScoreBand::Good,
            50..=69 => ScoreBand::Fair,
            25..=49 => ScoreBand::Developing,
            _ => ScoreBand::Beginner,
        }
    }
}

impl Default for ResilienceScore {
    fn default() -> Self {
        Self(INITIAL_RESILIENCE_SCORE)
    }
}

impl fmt::Display for ResilienceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse performance band used when presenting a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreBand {
    /// 85 and above
    Excellent,
    /// 70 to 84
    Good,
    /// 50 to 69
    Fair,
    /// 25 to 49
    Developing,
    /// Below 25
    Beginner,
}

impl ScoreBand {
    /// Short band name
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::Fair => "fair",
            ScoreBand::Developing => "developing",
            ScoreBand::Beginner => "beginner",
        }
    }

    /// Encouragement shown next to the score
    pub fn message(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent! You are very good at seeing through misinformation.",
            ScoreBand::Good => "Going well! Your information literacy is at a high level.",
            ScoreBand::Fair => "Not bad. Keep learning to sharpen your judgment.",
            ScoreBand::Developing => "There is room to improve. Practice with the quiz!",
            ScoreBand::Beginner => "Take the quiz regularly to build your information literacy.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_score() {
        assert_eq!(ResilienceScore::default().value(), 50);
    }

    #[test]
    fn test_clamping_at_bounds() {
        let start = ResilienceScore::default();
        assert_eq!(start.apply(-1000).value(), 0);
        assert_eq!(start.apply(1000).value(), 100);
        assert_eq!(start.apply(i64::MAX).value(), 100);
        assert_eq!(start.apply(i64::MIN).value(), 0);
    }

    #[test]
    fn test_quiz_deltas() {
        let start = ResilienceScore::default();
        assert_eq!(start.apply(ResilienceScore::quiz_delta(true)).value(), 60);
        assert_eq!(start.apply(ResilienceScore::quiz_delta(false)).value(), 45);
    }

    #[test]
    fn test_parse_stored() {
        assert_eq!(ResilienceScore::parse_stored("72"), Some(ResilienceScore::new(72)));
        assert_eq!(ResilienceScore::parse_stored(" 9\n"), Some(ResilienceScore::new(9)));
        assert_eq!(ResilienceScore::parse_stored("250"), Some(ResilienceScore::new(100)));
        assert_eq!(ResilienceScore::parse_stored("abc"), None);
        assert_eq!(ResilienceScore::parse_stored(""), None);
    }

    #[test]
    fn test_bands() {
        assert_eq!(ResilienceScore::new(100).band(), ScoreBand::Excellent);
        assert_eq!(ResilienceScore::new(85).band(), ScoreBand::Excellent);
        assert_eq!(ResilienceScore::new(84).band(), ScoreBand::Good);
        assert_eq!(ResilienceScore::new(50).band(), ScoreBand::Fair);
        assert_eq!(ResilienceScore::new(25).band(), ScoreBand::Developing);
        assert_eq!(ResilienceScore::new(24).band(), ScoreBand::Beginner);
    }

    proptest! {
        #[test]
        fn prop_apply_stays_in_range(start in 0i64..=100, delta in any::<i64>()) {
            let value = ResilienceScore::new(start).apply(delta).value();
            prop_assert!(value <= 100);
        }

        #[test]
        fn prop_apply_is_exact_inside_range(start in 0i64..=100, delta in -100i64..=100) {
            let expected = (start + delta).clamp(0, 100);
            prop_assert_eq!(i64::from(ResilienceScore::new(start).apply(delta).value()), expected);
        }
    }
}
