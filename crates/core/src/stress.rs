//! Stress scoring types
//!
//! The scorer sums weights of matched keyword categories and bands the
//! total into a [`StressLevel`]. These types only carry the outcome; the
//! calibration (categories, weights, thresholds) lives in configuration.

use serde::{Deserialize, Serialize};

/// Coarse stress band derived from the keyword score.
///
/// Ordered so that comparisons read naturally: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

impl StressLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StressLevel::Low => "low",
            StressLevel::Medium => "medium",
            StressLevel::High => "high",
        }
    }
}

impl std::fmt::Display for StressLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A keyword category that contributed to the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryHit {
    /// Category name from the scoring calibration.
    pub category: String,
    /// Weight the category added to the total.
    pub weight: u32,
    /// The phrase that matched first within the category.
    pub phrase: String,
}

/// Outcome of scoring one transcript against the keyword calibration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressScore {
    /// Sum of contributing category weights.
    pub total: u32,
    /// Band the total falls into.
    pub level: StressLevel,
    /// Categories that matched, in calibration order.
    pub hits: Vec<CategoryHit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(StressLevel::Low < StressLevel::Medium);
        assert!(StressLevel::Medium < StressLevel::High);
    }

    #[test]
    fn test_level_serde() {
        assert_eq!(
            serde_json::to_string(&StressLevel::Medium).unwrap(),
            "\"medium\""
        );
        let level: StressLevel = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(level, StressLevel::High);
    }

    #[test]
    fn test_score_serialization_shape() {
        let score = StressScore {
            total: 3,
            level: StressLevel::Medium,
            hits: vec![CategoryHit {
                category: "study_pressure".to_string(),
                weight: 1,
                phrase: "exam".to_string(),
            }],
        };
        let json = serde_json::to_value(&score).unwrap();
        assert_eq!(json["total"], 3);
        assert_eq!(json["level"], "medium");
        assert_eq!(json["hits"][0]["phrase"], "exam");
    }
}
