//! Supported screening languages
//!
//! The service responds in a closed set of languages. Classifier output is
//! mapped onto this set through [`Language::from_tag`]; anything outside it
//! falls back to [`Language::default`] upstream, and the fallback is recorded
//! on the analysis result rather than treated as an error.

use serde::{Deserialize, Serialize};

/// Languages the screening service can respond in.
///
/// Serialized by short code ("en", "hi", "ta") in both API payloads and
/// YAML configuration, so bundle maps key directly on this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// English
    #[default]
    #[serde(rename = "en")]
    English,
    /// Romanised Hindi-English mix
    #[serde(rename = "hi")]
    Hinglish,
    /// Tamil, including romanised Tamil
    #[serde(rename = "ta")]
    Tamil,
}

impl Language {
    /// Short code used in configs, API payloads and TTS requests.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hinglish => "hi",
            Language::Tamil => "ta",
        }
    }

    /// Human-readable display name.
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hinglish => "Hinglish",
            Language::Tamil => "Tamil",
        }
    }

    /// Parse a raw classifier tag into a supported language.
    ///
    /// Accepts short codes and display names in any case, with surrounding
    /// whitespace ignored. Returns `None` for tags outside the supported
    /// set; the caller decides whether that means fallback.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Language::English),
            "hi" | "hinglish" => Some(Language::Hinglish),
            "ta" | "tamil" => Some(Language::Tamil),
            _ => None,
        }
    }

    /// All supported languages, default first.
    pub fn all() -> &'static [Language] {
        &[Language::English, Language::Hinglish, Language::Tamil]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
