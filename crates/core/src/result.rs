//! Analysis result types
//!
//! [`AnalysisResult`] is the complete outcome of one screening request and
//! the shape the HTTP API serializes back to clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::language::Language;
use crate::stress::{StressLevel, StressScore};

/// A crisis helpline surfaced alongside crisis responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotline {
    pub name: String,
    pub number: String,
}

/// Localized content selected for the caller.
///
/// Crisis content replaces coping strategies entirely; the two never
/// appear together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseContent {
    /// Immediate-support message plus helplines.
    Crisis {
        message: String,
        hotlines: Vec<Hotline>,
    },
    /// Coping strategies for the scored stress level.
    Support { strategies: Vec<String> },
}

impl ResponseContent {
    pub fn is_crisis(&self) -> bool {
        matches!(self, ResponseContent::Crisis { .. })
    }
}

/// Complete outcome of one screening request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Unique id for this analysis.
    pub id: Uuid,
    /// When the analysis ran.
    pub created_at: DateTime<Utc>,
    /// The analysed text (transcript or direct input).
    pub text: String,
    /// Language the response content is localized for.
    pub language: Language,
    /// Raw tag the classifier reported, before mapping.
    pub raw_language_tag: String,
    /// True when the raw tag fell outside the supported set and the
    /// default language was used instead.
    pub language_fallback: bool,
    /// True when a crisis phrase matched. Stress scoring is skipped.
    pub crisis: bool,
    /// The crisis phrase that matched, when `crisis` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crisis_phrase: Option<String>,
    /// Stress score. `None` on the crisis path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress: Option<StressScore>,
    /// Localized response content for the caller.
    pub response: ResponseContent,
}

impl AnalysisResult {
    /// Stress level, when the stress path ran.
    pub fn stress_level(&self) -> Option<StressLevel> {
        self.stress.as_ref().map(|s| s.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stress::CategoryHit;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            text: "exam stress".to_string(),
            language: Language::English,
            raw_language_tag: "en".to_string(),
            language_fallback: false,
            crisis: false,
            crisis_phrase: None,
            stress: Some(StressScore {
                total: 3,
                level: StressLevel::Medium,
                hits: vec![CategoryHit {
                    category: "study_pressure".to_string(),
                    weight: 1,
                    phrase: "exam".to_string(),
                }],
            }),
            response: ResponseContent::Support {
                strategies: vec!["Practice 10-min deep breathing".to_string()],
            },
        }
    }

    #[test]
    fn test_stress_level_helper() {
        let result = sample_result();
        assert_eq!(result.stress_level(), Some(StressLevel::Medium));
        assert!(!result.response.is_crisis());
    }

    #[test]
    fn test_crisis_fields_omitted_when_absent() {
        let json = serde_json::to_value(&sample_result()).unwrap();
        assert!(json.get("crisis_phrase").is_none());
        assert_eq!(json["crisis"], false);
        assert_eq!(json["response"]["kind"], "support");
    }

    #[test]
    fn test_crisis_response_tagging() {
        let content = ResponseContent::Crisis {
            message: "You are not alone. Please reach out for help.".to_string(),
            hotlines: vec![Hotline {
                name: "Tele-MANAS India".to_string(),
                number: "14416".to_string(),
            }],
        };
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["kind"], "crisis");
        assert_eq!(json["hotlines"][0]["number"], "14416");
        assert!(content.is_crisis());
    }
}
