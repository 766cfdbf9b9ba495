//! Configuration for the analyzer

use serde::{Deserialize, Serialize};
use std::time::Duration;
use veracity_domain::MAX_TEXT_LENGTH;

/// Configuration for the analysis and quiz flows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Sampling temperature for credibility analysis
    pub analysis_temperature: f32,

    /// Sampling temperature for quiz generation
    pub quiz_temperature: f32,

    /// Maximum time for a single LLM call (seconds, 0 = no limit)
    pub request_timeout_secs: u64,
}

impl AnalyzerConfig {
    /// Get the request timeout, if one is configured
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        for (name, value) in [
            ("analysis_temperature", self.analysis_temperature),
            ("quiz_temperature", self.quiz_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(format!("{} must be between 0.0 and 2.0", name));
            }
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_text_length: MAX_TEXT_LENGTH,
            analysis_temperature: 0.3,
            quiz_temperature: 0.7,
            request_timeout_secs: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_text_length, 5000);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_invalid_max_text_length() {
        let config = AnalyzerConfig {
            max_text_length: 0,
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_temperature() {
        let config = AnalyzerConfig {
            quiz_temperature: 3.5,
            ..AnalyzerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("quiz_temperature"));
    }

    #[test]
    fn test_timeout_enabled() {
        let config = AnalyzerConfig {
            request_timeout_secs: 30,
            ..AnalyzerConfig::default()
        };
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AnalyzerConfig::from_toml("max_text_length = 280").unwrap();
        assert_eq!(config.max_text_length, 280);
        assert_eq!(config.analysis_temperature, 0.3);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AnalyzerConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = AnalyzerConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}
