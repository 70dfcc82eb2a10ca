//! Speech processing traits

use crate::audio::{AudioHandle, AudioInput, Transcript};
use crate::error::Result;
use crate::language::Language;
use async_trait::async_trait;

/// Speech-to-Text interface
///
/// Production deployments wrap a cached engine loaded once at startup;
/// the pipeline only ever holds it behind an `Arc`, so `transcribe`
/// takes `&self` and must be safe to call concurrently.
///
/// # Example
///
/// ```ignore
/// let stt: Arc<dyn SpeechToText> = Arc::new(WhisperStt::load("tiny")?);
/// let transcript = stt.transcribe(&audio).await?;
/// println!("Transcribed: {}", transcript.text);
/// ```
#[async_trait]
pub trait SpeechToText: Send + Sync + 'static {
    /// Transcribe an audio payload
    ///
    /// # Arguments
    /// * `audio` - Raw audio bytes plus container format
    ///
    /// # Returns
    /// Transcript text with an optional language hint
    async fn transcribe(&self, audio: &AudioInput) -> Result<Transcript>;

    /// Get model name for logging
    fn model_name(&self) -> &str;
}

/// Text-to-Speech interface
///
/// # Example
///
/// ```ignore
/// let tts: Arc<dyn TextToSpeech> = Arc::new(GttsEngine::new());
/// let audio = tts.synthesize("You are not alone.", Language::English).await?;
/// ```
#[async_trait]
pub trait TextToSpeech: Send + Sync + 'static {
    /// Synthesize text to audio
    ///
    /// # Arguments
    /// * `text` - Text to speak
    /// * `language` - Voice language for synthesis
    ///
    /// # Returns
    /// Handle to the synthesized audio
    async fn synthesize(&self, text: &str, language: Language) -> Result<AudioHandle>;

    /// Get model name for logging
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct MockStt;

    #[async_trait]
    impl SpeechToText for MockStt {
        async fn transcribe(&self, _audio: &AudioInput) -> Result<Transcript> {
            Ok(Transcript::new("hello world"))
        }

        fn model_name(&self) -> &str {
            "mock-stt"
        }
    }

    struct MockTts;

    #[async_trait]
    impl TextToSpeech for MockTts {
        async fn synthesize(&self, _text: &str, language: Language) -> Result<AudioHandle> {
            Ok(AudioHandle {
                path: PathBuf::from(format!("/tmp/out-{}.mp3", language.code())),
                mime_type: "audio/mpeg".to_string(),
            })
        }

        fn model_name(&self) -> &str {
            "mock-tts"
        }
    }

    #[tokio::test]
    async fn test_mock_stt() {
        let stt = MockStt;
        let audio = AudioInput::new(vec![0u8; 16], crate::audio::AudioFormat::Wav);
        let transcript = stt.transcribe(&audio).await.unwrap();
        assert_eq!(transcript.text, "hello world");
        assert_eq!(stt.model_name(), "mock-stt");
    }

    #[tokio::test]
    async fn test_mock_tts_uses_language() {
        let tts = MockTts;
        let handle = tts.synthesize("hi", Language::Tamil).await.unwrap();
        assert_eq!(handle.path, PathBuf::from("/tmp/out-ta.mp3"));
    }

    #[test]
    fn test_traits_are_object_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn SpeechToText>>();
        assert_send_sync::<Box<dyn TextToSpeech>>();
    }
}
