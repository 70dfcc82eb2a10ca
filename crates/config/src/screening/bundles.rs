//! Localized response bundles
//!
//! Per-language content (crisis message plus coping strategies) and the
//! shared hotline list. Lookup falls back to the default language when a
//! bundle is missing, so a partially translated config still serves every
//! caller.

use mindcare_core::{Hotline, Language};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response content for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedBundle {
    /// Message delivered on the crisis path.
    pub crisis_message: String,
    /// Coping strategies delivered on the stress path.
    pub strategies: Vec<String>,
}

/// All localized bundles plus hotlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundlesConfig {
    /// Bundles keyed by language code.
    #[serde(default = "default_bundles")]
    pub bundles: HashMap<Language, LocalizedBundle>,

    /// Hotlines appended to every crisis response regardless of language.
    #[serde(default = "default_hotlines")]
    pub hotlines: Vec<Hotline>,
}

impl BundlesConfig {
    /// Bundle for `language`, falling back to `default_language`.
    pub fn bundle_for(
        &self,
        language: Language,
        default_language: Language,
    ) -> Option<&LocalizedBundle> {
        self.bundles
            .get(&language)
            .or_else(|| self.bundles.get(&default_language))
    }
}

fn default_bundles() -> HashMap<Language, LocalizedBundle> {
    let mut bundles = HashMap::new();
    bundles.insert(
        Language::English,
        LocalizedBundle {
            crisis_message: "You are not alone. Please reach out for help.".to_string(),
            strategies: vec![
                "Use Pomodoro for study (25m work + 5m break)".to_string(),
                "Reduce caffeine after evening".to_string(),
                "Experiment with sleep schedule".to_string(),
                "Practice 10-min deep breathing".to_string(),
            ],
        },
    );
    bundles.insert(
        Language::Hinglish,
        LocalizedBundle {
            crisis_message: "Aap akelay nahi ho. Please help contact karo.".to_string(),
            strategies: vec![
                "25 minute study + 5 minute break use karo".to_string(),
                "Shaam ke baad caffeine kam karo".to_string(),
                "Sona ek fix time pe try karo".to_string(),
                "10 minute deep breathing helpful hota hai".to_string(),
            ],
        },
    );
    bundles.insert(
        Language::Tamil,
        LocalizedBundle {
            crisis_message: "Neenga thani illa. Please help thedu.".to_string(),
            strategies: vec![
                "25 nimisham padichu 5 nimisham break edunga".to_string(),
                "Saayanga coffee avoid pannunga".to_string(),
                "Daily same time la thoongunga".to_string(),
                "10 nimisham deep breathing try panlaam".to_string(),
            ],
        },
    );
    bundles
}

fn default_hotlines() -> Vec<Hotline> {
    vec![
        Hotline {
            name: "Tele-MANAS India".to_string(),
            number: "14416".to_string(),
        },
        Hotline {
            name: "NIMHANS".to_string(),
            number: "+91-80-46110007".to_string(),
        },
    ]
}

impl Default for BundlesConfig {
    fn default() -> Self {
        Self {
            bundles: default_bundles(),
            hotlines: default_hotlines(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bundles_cover_all_languages() {
        let config = BundlesConfig::default();
        for lang in Language::all() {
            assert!(config.bundles.contains_key(lang), "missing {}", lang);
        }
        assert_eq!(config.hotlines.len(), 2);
        assert_eq!(config.hotlines[0].number, "14416");
    }

    #[test]
    fn test_bundle_lookup_with_fallback() {
        let mut config = BundlesConfig::default();
        config.bundles.remove(&Language::Tamil);

        let bundle = config
            .bundle_for(Language::Tamil, Language::English)
            .unwrap();
        assert_eq!(
            bundle.crisis_message,
            "You are not alone. Please reach out for help."
        );

        let bundle = config
            .bundle_for(Language::Hinglish, Language::English)
            .unwrap();
        assert!(bundle.crisis_message.starts_with("Aap akelay"));
    }

    #[test]
    fn test_bundles_from_yaml_keyed_by_code() {
        let yaml = r#"
bundles:
  en:
    crisis_message: "Reach out."
    strategies: ["Breathe"]
  ta:
    crisis_message: "Neenga thani illa."
    strategies: ["Breathe (ta)"]
hotlines:
  - name: "Tele-MANAS India"
    number: "14416"
"#;
        let config: BundlesConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.bundles.len(), 2);
        assert!(config.bundles.contains_key(&Language::Tamil));
        assert!(config.bundle_for(Language::Hinglish, Language::English).is_some());
    }
}
