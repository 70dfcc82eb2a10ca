//! Configuration management for the screening service
//!
//! Supports loading configuration from:
//! - YAML files
//! - Environment variables (MINDCARE__ prefix)
//!
//! # Screening Configuration
//!
//! All clinical calibration lives in config/screening.yaml:
//! - scoring: keyword categories, weights, band thresholds
//! - crisis: crisis phrase lexicon
//! - bundles: per-language response content plus hotlines
//! - tts_language_policy: voice selection for synthesized replies
//!
//! [`ScreeningConfig`] ships working defaults, so a missing file means
//! the built-in calibration rather than a startup failure. A present
//! but invalid file is a hard error, and [`ScreeningValidator`] gates
//! startup on the loaded result either way.

pub mod screening;
pub mod settings;

pub use screening::{
    BundlesConfig, CrisisConfig, KeywordCategory, LocalizedBundle, ScoringConfig,
    ScoringThresholds, ScreeningConfig, ScreeningValidator, TtsLanguagePolicy,
    ValidationFinding, ValidationReport, ValidationSeverity,
};
pub use settings::{
    load_settings, ObservabilityConfig, RuntimeEnvironment, ServerConfig, Settings, SpeechConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
