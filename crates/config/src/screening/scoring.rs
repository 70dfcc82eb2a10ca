//! Stress scoring calibration
//!
//! Keyword categories with weights, plus the thresholds that band a
//! total into low/medium/high. The defaults reproduce the pilot
//! calibration; deployments override them via `screening.yaml` without
//! a rebuild.

use mindcare_core::StressLevel;
use serde::{Deserialize, Serialize};

/// One keyword category contributing to the stress score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCategory {
    /// Stable name surfaced in results and logs.
    pub name: String,
    /// Phrases matched as case-insensitive substrings of the input.
    pub phrases: Vec<String>,
    /// Weight added to the total when the category matches.
    pub weight: u32,
}

/// Inclusive upper bounds for the lower two stress bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringThresholds {
    /// Totals up to this value (inclusive) are Low.
    #[serde(default = "default_low_max")]
    pub low_max: u32,

    /// Totals above `low_max` up to this value (inclusive) are Medium.
    /// Anything above is High.
    #[serde(default = "default_medium_max")]
    pub medium_max: u32,
}

fn default_low_max() -> u32 {
    2
}
fn default_medium_max() -> u32 {
    4
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self {
            low_max: default_low_max(),
            medium_max: default_medium_max(),
        }
    }
}

impl ScoringThresholds {
    /// Band a total score into a stress level.
    pub fn level_for(&self, total: u32) -> StressLevel {
        if total <= self.low_max {
            StressLevel::Low
        } else if total <= self.medium_max {
            StressLevel::Medium
        } else {
            StressLevel::High
        }
    }
}

/// Scoring configuration: categories, band thresholds, stacking rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Keyword categories, evaluated in order.
    #[serde(default = "default_categories")]
    pub categories: Vec<KeywordCategory>,

    /// Band thresholds applied to the summed weights.
    #[serde(default)]
    pub thresholds: ScoringThresholds,

    /// When true, every matching phrase adds its category weight again.
    /// When false, a category contributes its weight at most once no
    /// matter how many of its phrases appear.
    #[serde(default)]
    pub stack_within_category: bool,
}

fn default_categories() -> Vec<KeywordCategory> {
    vec![
        KeywordCategory {
            name: "study_pressure".to_string(),
            phrases: vec![
                "exam".to_string(),
                "study".to_string(),
                "marks".to_string(),
                "score".to_string(),
                "padikka".to_string(),
            ],
            weight: 1,
        },
        KeywordCategory {
            name: "sleep_disruption".to_string(),
            phrases: vec![
                "sleep".to_string(),
                "can't sleep".to_string(),
                "thoongala".to_string(),
                "sona nahi".to_string(),
            ],
            weight: 2,
        },
        KeywordCategory {
            name: "anxiety".to_string(),
            phrases: vec![
                "stress".to_string(),
                "anxiety".to_string(),
                "pressure".to_string(),
                "tense".to_string(),
                "bayama".to_string(),
            ],
            weight: 2,
        },
    ]
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            thresholds: ScoringThresholds::default(),
            stack_within_category: false,
        }
    }
}
