//! Stress scoring
//!
//! Scores a transcript against the configured keyword calibration.
//! Matching is case-insensitive substring search over the whole input,
//! not tokenized: "pressure" inside "pressured" counts.

use mindcare_config::{ScoringConfig, ScoringThresholds};
use mindcare_core::{CategoryHit, StressScore};

struct PreparedCategory {
    name: String,
    phrases: Vec<String>,
    weight: u32,
}

/// Scores transcripts against the keyword calibration.
///
/// Construction lowercases every configured phrase once; scoring then
/// lowercases the input and scans. Stateless between calls, safe to
/// share across concurrent requests.
pub struct StressScorer {
    categories: Vec<PreparedCategory>,
    thresholds: ScoringThresholds,
    stack_within_category: bool,
}

impl StressScorer {
    pub fn new(config: &ScoringConfig) -> Self {
        let categories = config
            .categories
            .iter()
            .map(|c| PreparedCategory {
                name: c.name.clone(),
                phrases: c.phrases.iter().map(|p| p.to_lowercase()).collect(),
                weight: c.weight,
            })
            .collect();

        Self {
            categories,
            thresholds: config.thresholds.clone(),
            stack_within_category: config.stack_within_category,
        }
    }

    /// Score a transcript.
    ///
    /// By default each category contributes its weight at most once, no
    /// matter how many of its phrases appear. With stacking enabled,
    /// every matching phrase adds the weight again.
    pub fn score(&self, text: &str) -> StressScore {
        let text_lower = text.to_lowercase();
        let mut total = 0u32;
        let mut hits = Vec::new();

        for category in &self.categories {
            if self.stack_within_category {
                for phrase in &category.phrases {
                    if text_lower.contains(phrase.as_str()) {
                        total += category.weight;
                        hits.push(CategoryHit {
                            category: category.name.clone(),
                            weight: category.weight,
                            phrase: phrase.clone(),
                        });
                    }
                }
            } else if let Some(phrase) = category
                .phrases
                .iter()
                .find(|p| text_lower.contains(p.as_str()))
            {
                total += category.weight;
                hits.push(CategoryHit {
                    category: category.name.clone(),
                    weight: category.weight,
                    phrase: phrase.clone(),
                });
            }
        }

        StressScore {
            total,
            level: self.thresholds.level_for(total),
            hits,
        }
    }
}
