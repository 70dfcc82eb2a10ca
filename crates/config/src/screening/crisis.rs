//! Crisis lexicon configuration

use serde::{Deserialize, Serialize};

/// Crisis phrase lexicon.
///
/// Phrases are matched as case-insensitive substrings, the same way the
/// stress keywords are. A phrase embedded inside a longer word also
/// triggers ("kill" inside "skill"); the detector reports whichever
/// configured phrase matches first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisConfig {
    #[serde(default = "default_crisis_phrases")]
    pub phrases: Vec<String>,
}

fn default_crisis_phrases() -> Vec<String> {
    vec![
        "suicide".to_string(),
        "kill".to_string(),
        "die".to_string(),
        "give up".to_string(),
        "end life".to_string(),
        "varamudiyala".to_string(),
    ]
}

impl Default for CrisisConfig {
    fn default() -> Self {
        Self {
            phrases: default_crisis_phrases(),
        }
    }
}
