//! Response selection
//!
//! Picks the localized content for a completed analysis: the crisis
//! message plus hotlines on the crisis path, coping strategies on the
//! stress path. A missing bundle falls back to the default language, so
//! selection cannot fail once the config has passed startup validation.

use mindcare_config::BundlesConfig;
use mindcare_core::{Language, ResponseContent};

/// Selects localized response content.
pub struct ResponseSelector {
    bundles: BundlesConfig,
    default_language: Language,
}

impl ResponseSelector {
    pub fn new(bundles: BundlesConfig, default_language: Language) -> Self {
        Self {
            bundles,
            default_language,
        }
    }

    /// Content for `language`, crisis or support.
    pub fn select(&self, language: Language, crisis: bool) -> ResponseContent {
        let bundle = self.bundles.bundle_for(language, self.default_language);

        if crisis {
            ResponseContent::Crisis {
                message: bundle.map(|b| b.crisis_message.clone()).unwrap_or_default(),
                hotlines: self.bundles.hotlines.clone(),
            }
        } else {
            ResponseContent::Support {
                strategies: bundle.map(|b| b.strategies.clone()).unwrap_or_default(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> ResponseSelector {
        ResponseSelector::new(BundlesConfig::default(), Language::English)
    }

    #[test]
    fn test_crisis_selection_includes_hotlines() {
        let content = selector().select(Language::English, true);
        match content {
            ResponseContent::Crisis { message, hotlines } => {
                assert_eq!(message, "You are not alone. Please reach out for help.");
                assert_eq!(hotlines.len(), 2);
                assert_eq!(hotlines[0].name, "Tele-MANAS India");
            }
            ResponseContent::Support { .. } => panic!("expected crisis content"),
        }
    }

    #[test]
    fn test_support_selection_is_localized() {
        let content = selector().select(Language::Tamil, false);
        match content {
            ResponseContent::Support { strategies } => {
                assert_eq!(strategies.len(), 4);
                assert!(strategies[0].contains("nimisham"));
            }
            ResponseContent::Crisis { .. } => panic!("expected support content"),
        }
    }

    #[test]
    fn test_missing_bundle_falls_back_to_default() {
        let mut bundles = BundlesConfig::default();
        bundles.bundles.remove(&Language::Tamil);
        let selector = ResponseSelector::new(bundles, Language::English);

        let content = selector.select(Language::Tamil, false);
        match content {
            ResponseContent::Support { strategies } => {
                assert!(strategies[0].starts_with("Use Pomodoro"));
            }
            ResponseContent::Crisis { .. } => panic!("expected support content"),
        }
    }

    #[test]
    fn test_hinglish_crisis_message() {
        let content = selector().select(Language::Hinglish, true);
        match content {
            ResponseContent::Crisis { message, .. } => {
                assert_eq!(message, "Aap akelay nahi ho. Please help contact karo.");
            }
            ResponseContent::Support { .. } => panic!("expected crisis content"),
        }
    }
}
