//! Language identification
//!
//! Wraps the classifier boundary and maps its raw tag onto the supported
//! language set. An unsupported tag is not an error: the identifier falls
//! back to the configured default, records the fallback on the detection
//! and logs it. Classifier failures propagate.

use std::sync::Arc;

use mindcare_core::{Language, LanguageClassifier, Result};
use tracing::info;

/// Outcome of language identification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageDetection {
    /// Supported language responses will be localized for.
    pub language: Language,
    /// Raw tag the classifier reported.
    pub raw_tag: String,
    /// True when the raw tag fell outside the supported set.
    pub fallback_applied: bool,
}

/// Maps classifier output onto the supported language set.
pub struct LanguageIdentifier {
    classifier: Arc<dyn LanguageClassifier>,
    default_language: Language,
}

impl LanguageIdentifier {
    pub fn new(classifier: Arc<dyn LanguageClassifier>, default_language: Language) -> Self {
        Self {
            classifier,
            default_language,
        }
    }

    /// Identify the language of `text`.
    pub async fn identify(&self, text: &str) -> Result<LanguageDetection> {
        let raw_tag = self.classifier.classify(text).await?;

        match Language::from_tag(&raw_tag) {
            Some(language) => Ok(LanguageDetection {
                language,
                raw_tag,
                fallback_applied: false,
            }),
            None => {
                info!(
                    classifier = self.classifier.name(),
                    raw_tag = %raw_tag,
                    fallback = %self.default_language,
                    "Unsupported language tag, falling back to default"
                );
                Ok(LanguageDetection {
                    language: self.default_language,
                    raw_tag,
                    fallback_applied: true,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mindcare_core::ScreeningError;

    struct FixedClassifier(&'static str);

    #[async_trait]
    impl LanguageClassifier for FixedClassifier {
        async fn classify(&self, _text: &str) -> Result<String> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingClassifier;

    #[async_trait]
    impl LanguageClassifier for FailingClassifier {
        async fn classify(&self, _text: &str) -> Result<String> {
            Err(ScreeningError::LanguageId("model unavailable".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn identifier(tag: &'static str) -> LanguageIdentifier {
        LanguageIdentifier::new(Arc::new(FixedClassifier(tag)), Language::English)
    }

    #[tokio::test]
    async fn test_supported_tag_maps_directly() {
        let detection = identifier("ta").identify("vanakkam").await.unwrap();
        assert_eq!(detection.language, Language::Tamil);
        assert_eq!(detection.raw_tag, "ta");
        assert!(!detection.fallback_applied);
    }

    #[tokio::test]
    async fn test_display_name_tag_is_accepted() {
        let detection = identifier("Hinglish").identify("kya haal").await.unwrap();
        assert_eq!(detection.language, Language::Hinglish);
        assert!(!detection.fallback_applied);
    }

    #[tokio::test]
    async fn test_unsupported_tag_falls_back() {
        let detection = identifier("fr").identify("bonjour").await.unwrap();
        assert_eq!(detection.language, Language::English);
        assert_eq!(detection.raw_tag, "fr");
        assert!(detection.fallback_applied);
    }

    #[tokio::test]
    async fn test_fallback_respects_configured_default() {
        let identifier =
            LanguageIdentifier::new(Arc::new(FixedClassifier("xx")), Language::Tamil);
        let detection = identifier.identify("text").await.unwrap();
        assert_eq!(detection.language, Language::Tamil);
        assert!(detection.fallback_applied);
    }

    #[tokio::test]
    async fn test_classifier_failure_propagates() {
        let identifier =
            LanguageIdentifier::new(Arc::new(FailingClassifier), Language::English);
        let err = identifier.identify("text").await.unwrap_err();
        assert!(matches!(err, ScreeningError::LanguageId(_)));
    }
}
