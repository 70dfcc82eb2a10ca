//! HTTP Speech-to-Text Engine
//!
//! Forwards uploaded audio to a transcription sidecar (a faster-whisper
//! service in the default deployment) and returns the transcript. The
//! sidecar owns model loading and caching; this adapter only does the
//! HTTP exchange, so the server process never blocks on model startup.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use mindcare_core::{AudioInput, Result, ScreeningError, SpeechToText, Transcript};

/// HTTP transcription engine configuration
#[derive(Debug, Clone)]
pub struct HttpSttConfig {
    /// Base URL of the transcription service
    pub endpoint: String,
    /// Model label reported by `model_name`, for logging only
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HttpSttConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8091".to_string(),
            model: "whisper-tiny".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Request sent to the transcription service
#[derive(Debug, Serialize)]
struct TranscribeRequest {
    /// Base64 encoded audio bytes
    audio: String,
    /// Container format (wav, mp3, m4a)
    format: String,
}

/// Response from the transcription service
#[derive(Debug, Deserialize)]
struct TranscribeResponse {
    text: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Speech-to-text over HTTP
pub struct HttpSttEngine {
    config: HttpSttConfig,
    client: Client,
}

impl HttpSttEngine {
    /// Create a new engine
    pub fn new(config: HttpSttConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ScreeningError::Transcription(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create with default config
    pub fn new_default() -> Result<Self> {
        Self::new(HttpSttConfig::default())
    }

    /// Create with a custom service endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        Self::new(HttpSttConfig {
            endpoint: endpoint.into(),
            ..Default::default()
        })
    }

    /// Build a service URL
    fn service_url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint.trim_end_matches('/'), path)
    }

    /// Check if the transcription service is reachable
    pub async fn is_available(&self) -> bool {
        self.client
            .get(self.service_url("/health"))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl SpeechToText for HttpSttEngine {
    async fn transcribe(&self, audio: &AudioInput) -> Result<Transcript> {
        let request = TranscribeRequest {
            audio: BASE64.encode(&audio.data),
            format: audio.format.as_str().to_string(),
        };

        let response = self
            .client
            .post(self.service_url("/transcribe"))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ScreeningError::Transcription(format!("Transcription request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ScreeningError::Transcription(format!(
                "Transcription service error {}: {}",
                status, body
            )));
        }

        let result: TranscribeResponse = response.json().await.map_err(|e| {
            ScreeningError::Transcription(format!("Failed to parse transcription response: {}", e))
        })?;

        if let Some(error) = &result.error {
            return Err(ScreeningError::Transcription(format!(
                "Transcription service reported: {}",
                error
            )));
        }

        tracing::debug!(
            model = %self.config.model,
            transcript_len = result.text.len(),
            "Audio transcribed"
        );

        Ok(Transcript {
            text: result.text,
            language_hint: result.language,
        })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindcare_core::AudioFormat;

    #[test]
    fn test_config_default() {
        let config = HttpSttConfig::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:8091");
        assert_eq!(config.model, "whisper-tiny");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_service_url_trims_trailing_slash() {
        let engine = HttpSttEngine::with_endpoint("http://stt.internal:9000/").unwrap();
        assert_eq!(
            engine.service_url("/transcribe"),
            "http://stt.internal:9000/transcribe"
        );
        assert_eq!(engine.service_url("/health"), "http://stt.internal:9000/health");
    }

    #[test]
    fn test_request_serialization() {
        let audio = AudioInput::new(vec![1, 2, 3, 4], AudioFormat::Mp3);
        let request = TranscribeRequest {
            audio: BASE64.encode(&audio.data),
            format: audio.format.as_str().to_string(),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"audio\":\"AQIDBA==\""));
        assert!(json.contains("\"format\":\"mp3\""));
    }

    #[test]
    fn test_response_parsing() {
        let result: TranscribeResponse =
            serde_json::from_str(r#"{"text": "I feel anxious", "language": "en"}"#).unwrap();
        assert_eq!(result.text, "I feel anxious");
        assert_eq!(result.language.as_deref(), Some("en"));
        assert!(result.error.is_none());

        // Minimal shape: only the text field is required
        let result: TranscribeResponse = serde_json::from_str(r#"{"text": ""}"#).unwrap();
        assert_eq!(result.text, "");
        assert!(result.language.is_none());
    }

    #[test]
    fn test_model_name() {
        let engine = HttpSttEngine::new_default().unwrap();
        assert_eq!(engine.model_name(), "whisper-tiny");
    }
}
