//! Built-in script-heuristic language classifier
//!
//! Counts characters per Unicode script block and tags the text by the
//! dominant block: Tamil -> "ta", Devanagari -> "hi", anything else
//! (including romanised Hindi or Tamil) -> "en". Deployments that need
//! better detection attach their own [`LanguageClassifier`].

use async_trait::async_trait;
use mindcare_core::{LanguageClassifier, Result};

#[derive(Debug, Clone, Copy)]
enum ScriptBlock {
    Tamil,
    Devanagari,
}

impl ScriptBlock {
    fn unicode_range(&self) -> (u32, u32) {
        match self {
            Self::Tamil => (0x0B80, 0x0BFF),
            Self::Devanagari => (0x0900, 0x097F),
        }
    }

    fn contains_char(&self, c: char) -> bool {
        let code = c as u32;
        let (start, end) = self.unicode_range();
        code >= start && code <= end
    }

    fn tag(&self) -> &'static str {
        match self {
            Self::Tamil => "ta",
            Self::Devanagari => "hi",
        }
    }
}

/// Script-counting classifier used when no external classifier is attached.
#[derive(Debug, Default)]
pub struct ScriptHeuristicClassifier;

impl ScriptHeuristicClassifier {
    pub fn new() -> Self {
        Self
    }

    fn dominant_script(text: &str) -> Option<ScriptBlock> {
        const BLOCKS: [ScriptBlock; 2] = [ScriptBlock::Tamil, ScriptBlock::Devanagari];

        let mut counts = [0u32; 2];
        for c in text.chars() {
            for (slot, script) in counts.iter_mut().zip(BLOCKS) {
                if script.contains_char(c) {
                    *slot += 1;
                    break;
                }
            }
        }

        // Fixed evaluation order: equal counts resolve to the last
        // block in BLOCKS on every call
        BLOCKS
            .into_iter()
            .zip(counts)
            .filter(|&(_, count)| count > 0)
            .max_by_key(|&(_, count)| count)
            .map(|(script, _)| script)
    }
}

#[async_trait]
impl LanguageClassifier for ScriptHeuristicClassifier {
    async fn classify(&self, text: &str) -> Result<String> {
        let tag = Self::dominant_script(text)
            .map(|s| s.tag())
            .unwrap_or("en");
        Ok(tag.to_string())
    }

    fn name(&self) -> &str {
        "script-heuristic"
    }
}
