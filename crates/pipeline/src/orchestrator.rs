//! Screening Pipeline Orchestrator
//!
//! Coordinates language identification, crisis detection, stress scoring
//! and response selection for one request. Crisis detection runs before
//! stress scoring and short-circuits it: a crisis result never carries a
//! stress score.
//!
//! Stage walk per request:
//!
//! ```text
//! Idle -> LanguageDetected -> CrisisPath  -> Completed
//!                         \-> StressPath  -> Completed
//! ```
//!
//! The pipeline holds no per-request state; a single instance behind an
//! `Arc` serves concurrent requests.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use mindcare_analysis::{CrisisDetector, LanguageIdentifier, ResponseSelector, StressScorer};
use mindcare_config::{ScreeningConfig, TtsLanguagePolicy};
use mindcare_core::{
    AnalysisResult, AudioHandle, AudioInput, LanguageClassifier, ResponseContent, Result,
    ScreeningError, SpeechToText, TextToSpeech, Transcript,
};

use crate::classifier::ScriptHeuristicClassifier;

/// Stages a request moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Waiting for input
    Idle,
    /// Language resolved, branching next
    LanguageDetected,
    /// Crisis phrase found, stress scoring skipped
    CrisisPath,
    /// No crisis phrase, stress scoring ran
    StressPath,
    /// Result assembled
    Completed,
}

/// Screening pipeline orchestrator
pub struct ScreeningPipeline {
    config: Arc<ScreeningConfig>,
    identifier: LanguageIdentifier,
    scorer: StressScorer,
    detector: CrisisDetector,
    selector: ResponseSelector,
    /// Speech-to-text engine for audio requests
    stt: Option<Arc<dyn SpeechToText>>,
    /// Text-to-speech engine for spoken replies
    tts: Option<Arc<dyn TextToSpeech>>,
}

impl ScreeningPipeline {
    /// Create a pipeline with the built-in script-heuristic classifier.
    pub fn new(config: Arc<ScreeningConfig>) -> Self {
        Self::with_classifier(config, Arc::new(ScriptHeuristicClassifier::new()))
    }

    /// Create a pipeline with a custom language classifier.
    pub fn with_classifier(
        config: Arc<ScreeningConfig>,
        classifier: Arc<dyn LanguageClassifier>,
    ) -> Self {
        let identifier = LanguageIdentifier::new(classifier, config.default_language);
        let scorer = StressScorer::new(&config.scoring);
        let detector = CrisisDetector::new(&config.crisis);
        let selector = ResponseSelector::new(config.bundles.clone(), config.default_language);

        Self {
            config,
            identifier,
            scorer,
            detector,
            selector,
            stt: None,
            tts: None,
        }
    }

    /// Attach a speech-to-text engine. Audio requests fail without one.
    pub fn with_speech_to_text(mut self, stt: Arc<dyn SpeechToText>) -> Self {
        self.stt = Some(stt);
        self
    }

    /// Attach a text-to-speech engine. Replies stay text-only without one.
    pub fn with_text_to_speech(mut self, tts: Arc<dyn TextToSpeech>) -> Self {
        self.tts = Some(tts);
        self
    }

    pub fn has_speech_to_text(&self) -> bool {
        self.stt.is_some()
    }

    pub fn has_text_to_speech(&self) -> bool {
        self.tts.is_some()
    }

    /// Run the screening analysis over text input.
    ///
    /// Whitespace-only input is rejected as invalid. Classifier failures
    /// propagate; an unsupported language does not, it falls back to the
    /// default language with the fallback recorded on the result.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let text = text.trim();
        debug!(stage = ?PipelineStage::Idle, chars = text.len(), "Screening request received");
        if text.is_empty() {
            return Err(ScreeningError::InvalidInput(
                "Text input is empty".to_string(),
            ));
        }

        let detection = self.identifier.identify(text).await?;
        debug!(
            stage = ?PipelineStage::LanguageDetected,
            language = %detection.language,
            raw_tag = %detection.raw_tag,
            fallback = detection.fallback_applied,
            "Language resolved"
        );

        let crisis_phrase = self.detector.detect(text).map(str::to_string);
        let crisis = crisis_phrase.is_some();

        let (stress, response) = if crisis {
            warn!(
                stage = ?PipelineStage::CrisisPath,
                phrase = crisis_phrase.as_deref().unwrap_or(""),
                "Crisis phrase detected, skipping stress scoring"
            );
            (None, self.selector.select(detection.language, true))
        } else {
            let score = self.scorer.score(text);
            debug!(
                stage = ?PipelineStage::StressPath,
                total = score.total,
                level = %score.level,
                hits = score.hits.len(),
                "Stress scored"
            );
            let response = self.selector.select(detection.language, false);
            (Some(score), response)
        };

        let result = AnalysisResult {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            text: text.to_string(),
            language: detection.language,
            raw_language_tag: detection.raw_tag,
            language_fallback: detection.fallback_applied,
            crisis,
            crisis_phrase,
            stress,
            response,
        };

        info!(
            stage = ?PipelineStage::Completed,
            id = %result.id,
            language = %result.language,
            crisis = result.crisis,
            level = result
                .stress_level()
                .map(|l| l.as_str())
                .unwrap_or("n/a"),
            "Screening analysis completed"
        );

        Ok(result)
    }

    /// Transcribe an audio payload with the attached speech-to-text engine.
    pub async fn transcribe(&self, audio: &AudioInput) -> Result<Transcript> {
        if audio.is_empty() {
            return Err(ScreeningError::InvalidInput(
                "Audio payload is empty".to_string(),
            ));
        }

        let stt = self.stt.as_ref().ok_or_else(|| {
            ScreeningError::Transcription("No speech-to-text engine attached".to_string())
        })?;

        let transcript = stt.transcribe(audio).await?;
        debug!(
            model = stt.model_name(),
            format = %audio.format,
            chars = transcript.text.len(),
            "Audio transcribed"
        );

        Ok(transcript)
    }

    /// Run the screening analysis over an audio payload.
    ///
    /// Transcribes, then analyzes the transcript as text. An empty
    /// transcript surfaces as invalid input, the same as empty text.
    pub async fn analyze_audio(&self, audio: &AudioInput) -> Result<AnalysisResult> {
        let transcript = self.transcribe(audio).await?;
        self.analyze(&transcript.text).await
    }

    /// Synthesize the spoken reply for a completed analysis.
    ///
    /// Crisis results speak the localized crisis message; stress results
    /// speak the caller's own text back. The voice language follows the
    /// configured policy. Returns `Ok(None)` when no text-to-speech
    /// engine is attached.
    pub async fn render_speech(&self, result: &AnalysisResult) -> Result<Option<AudioHandle>> {
        let Some(tts) = self.tts.as_ref() else {
            return Ok(None);
        };

        let language = match self.config.tts_language_policy {
            TtsLanguagePolicy::AlwaysDefault => self.config.default_language,
            TtsLanguagePolicy::MatchDetected => result.language,
        };

        let text = match &result.response {
            ResponseContent::Crisis { message, .. } => message.as_str(),
            ResponseContent::Support { .. } => result.text.as_str(),
        };

        let handle = tts.synthesize(text, language).await?;
        debug!(model = tts.model_name(), language = %language, "Reply synthesized");
        Ok(Some(handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindcare_core::{Language, StressLevel};

    fn pipeline() -> ScreeningPipeline {
        ScreeningPipeline::new(Arc::new(ScreeningConfig::default()))
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected() {
        let err = pipeline().analyze("   ").await.unwrap_err();
        assert!(matches!(err, ScreeningError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_stress_path_produces_score_and_strategies() {
        let result = pipeline().analyze("exam stress").await.unwrap();
        assert!(!result.crisis);
        assert_eq!(result.stress_level(), Some(StressLevel::Medium));
        assert!(matches!(result.response, ResponseContent::Support { .. }));
    }

    #[tokio::test]
    async fn test_crisis_short_circuits_stress_scoring() {
        let result = pipeline()
            .analyze("exam stress, I want to give up")
            .await
            .unwrap();
        assert!(result.crisis);
        assert_eq!(result.crisis_phrase.as_deref(), Some("give up"));
        assert!(result.stress.is_none());
        assert!(result.response.is_crisis());
    }

    #[tokio::test]
    async fn test_script_heuristic_resolves_tamil() {
        let result = pipeline().analyze("வணக்கம் நண்பா").await.unwrap();
        assert_eq!(result.language, Language::Tamil);
        assert!(!result.language_fallback);
    }

    #[tokio::test]
    async fn test_analyze_audio_without_stt_fails() {
        let audio = AudioInput::new(vec![1u8; 8], mindcare_core::AudioFormat::Wav);
        let err = pipeline().analyze_audio(&audio).await.unwrap_err();
        assert!(matches!(err, ScreeningError::Transcription(_)));
    }

    #[tokio::test]
    async fn test_analyze_audio_rejects_empty_payload() {
        let audio = AudioInput::new(Vec::new(), mindcare_core::AudioFormat::Mp3);
        let err = pipeline().analyze_audio(&audio).await.unwrap_err();
        assert!(matches!(err, ScreeningError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_render_speech_without_tts_is_none() {
        let p = pipeline();
        let result = p.analyze("exam stress").await.unwrap();
        assert!(p.render_speech(&result).await.unwrap().is_none());
    }
}
