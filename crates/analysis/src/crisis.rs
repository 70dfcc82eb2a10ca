//! Crisis detection
//!
//! Scans a transcript for crisis phrases. Detection runs before stress
//! scoring and short-circuits it: a single hit puts the whole request on
//! the crisis path.

use mindcare_config::CrisisConfig;

/// Detects crisis phrases in a transcript.
///
/// Matching is case-insensitive substring search, the same primitive the
/// stress scorer uses. A phrase inside a longer word also triggers
/// ("kill" inside "skill"); the detector reports the first configured
/// phrase found, in lexicon order.
pub struct CrisisDetector {
    phrases: Vec<String>,
}

impl CrisisDetector {
    pub fn new(config: &CrisisConfig) -> Self {
        Self {
            phrases: config.phrases.iter().map(|p| p.to_lowercase()).collect(),
        }
    }

    /// First configured phrase found in `text`, if any.
    pub fn detect(&self, text: &str) -> Option<&str> {
        let text_lower = text.to_lowercase();
        self.phrases
            .iter()
            .find(|p| text_lower.contains(p.as_str()))
            .map(|p| p.as_str())
    }

    /// Check whether `text` contains any crisis phrase.
    pub fn is_crisis(&self, text: &str) -> bool {
        self.detect(text).is_some()
    }
}
