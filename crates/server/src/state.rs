//! Application State
//!
//! Shared state across all handlers. Everything is an immutable `Arc`,
//! so cloning per request is cheap and no locking is involved.

use std::sync::Arc;

use mindcare_config::{ScreeningConfig, Settings};
use mindcare_pipeline::ScreeningPipeline;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Server settings, fixed for the process lifetime
    pub settings: Arc<Settings>,
    /// Screening configuration the pipeline was built from
    pub config: Arc<ScreeningConfig>,
    /// Shared analysis pipeline
    pub pipeline: Arc<ScreeningPipeline>,
}

impl AppState {
    /// Create application state with a pipeline built from `config`
    pub fn new(settings: Settings, config: ScreeningConfig) -> Self {
        let config = Arc::new(config);
        let pipeline = Arc::new(ScreeningPipeline::new(config.clone()));
        Self {
            settings: Arc::new(settings),
            config,
            pipeline,
        }
    }

    /// Create application state around an existing pipeline
    ///
    /// Use this when speech engines or a custom language classifier have
    /// been attached to the pipeline before serving.
    pub fn with_pipeline(
        settings: Settings,
        config: Arc<ScreeningConfig>,
        pipeline: ScreeningPipeline,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            config,
            pipeline: Arc::new(pipeline),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_clone_shares_pipeline() {
        let state = AppState::new(Settings::default(), ScreeningConfig::default());
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.pipeline, &cloned.pipeline));
        assert!(Arc::ptr_eq(&state.config, &cloned.config));
    }

    #[test]
    fn test_with_pipeline_keeps_attached_engines() {
        let config = Arc::new(ScreeningConfig::default());
        let pipeline = ScreeningPipeline::new(config.clone());
        let state = AppState::with_pipeline(Settings::default(), config, pipeline);
        assert!(!state.pipeline.has_speech_to_text());
        assert!(!state.pipeline.has_text_to_speech());
    }
}
