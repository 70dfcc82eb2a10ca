//! Screening configuration
//!
//! Everything the analysis pipeline needs at runtime: the default
//! language, scoring calibration, crisis lexicon, localized bundles and
//! the TTS voice policy. Loaded from YAML once at startup, validated by
//! [`ScreeningValidator`], then shared read-only across requests.

mod bundles;
mod crisis;
mod scoring;
mod validator;

pub use bundles::{BundlesConfig, LocalizedBundle};
pub use crisis::CrisisConfig;
pub use scoring::{KeywordCategory, ScoringConfig, ScoringThresholds};
pub use validator::{
    ScreeningValidator, ValidationFinding, ValidationReport, ValidationSeverity,
};

use crate::ConfigError;
use mindcare_core::Language;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which voice the TTS engine speaks replies with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtsLanguagePolicy {
    /// Always synthesize with the default language voice.
    #[default]
    AlwaysDefault,
    /// Synthesize with the detected language's voice.
    MatchDetected,
}

/// Root screening configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreeningConfig {
    /// Language used when detection lands outside the supported set.
    #[serde(default)]
    pub default_language: Language,

    /// Stress scoring calibration.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Crisis phrase lexicon.
    #[serde(default)]
    pub crisis: CrisisConfig,

    /// Localized response content and hotlines.
    #[serde(default)]
    pub bundles: BundlesConfig,

    /// Voice selection for synthesized replies.
    #[serde(default)]
    pub tts_language_policy: TtsLanguagePolicy,
}

impl ScreeningConfig {
    /// Load from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::FileNotFound(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
