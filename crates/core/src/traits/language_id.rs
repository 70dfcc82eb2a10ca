//! Language classification trait

use crate::error::Result;
use async_trait::async_trait;

/// Language classifier interface
///
/// Produces a raw, free-form language tag for a piece of text ("en",
/// "English", "fr", ...). Mapping the tag onto the supported language
/// set, and falling back when it lands outside it, happens downstream;
/// implementations should report what they detect without clamping.
#[async_trait]
pub trait LanguageClassifier: Send + Sync + 'static {
    /// Classify text, returning the raw tag
    async fn classify(&self, text: &str) -> Result<String>;

    /// Get classifier name for logging
    fn name(&self) -> &str;
}
