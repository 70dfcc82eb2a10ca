//! HTTP Text-to-Speech Engine
//!
//! Sends reply text to a synthesis sidecar (a gTTS service in the
//! default deployment) and writes the returned audio to a temp file.
//! Callers own the file and remove it once the bytes are delivered.

use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use mindcare_core::{AudioFormat, AudioHandle, Language, Result, ScreeningError, TextToSpeech};

/// HTTP synthesis engine configuration
#[derive(Debug, Clone)]
pub struct HttpTtsConfig {
    /// Base URL of the synthesis service
    pub endpoint: String,
    /// Model label reported by `model_name`, for logging only
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HttpTtsConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8092".to_string(),
            model: "gtts".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Request sent to the synthesis service
#[derive(Debug, Serialize)]
struct SynthesizeRequest {
    text: String,
    /// Voice language code (en, hi, ta)
    language: String,
}

/// Response from the synthesis service
#[derive(Debug, Deserialize)]
struct SynthesizeResponse {
    /// Base64 encoded audio bytes
    audio: String,
    /// Container format of the audio, mp3 when absent
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Text-to-speech over HTTP
pub struct HttpTtsEngine {
    config: HttpTtsConfig,
    client: Client,
}

impl HttpTtsEngine {
    /// Create a new engine
    pub fn new(config: HttpTtsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ScreeningError::Synthesis(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create with default config
    pub fn new_default() -> Result<Self> {
        Self::new(HttpTtsConfig::default())
    }

    /// Create with a custom service endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        Self::new(HttpTtsConfig {
            endpoint: endpoint.into(),
            ..Default::default()
        })
    }

    /// Build a service URL
    fn service_url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint.trim_end_matches('/'), path)
    }

    /// Check if the synthesis service is reachable
    pub async fn is_available(&self) -> bool {
        self.client
            .get(self.service_url("/health"))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Write synthesized bytes to a kept temp file
    fn write_audio_file(&self, data: &[u8], format: AudioFormat) -> Result<AudioHandle> {
        let mut file = tempfile::Builder::new()
            .prefix("mindcare-tts-")
            .suffix(&format!(".{}", format.as_str()))
            .tempfile()
            .map_err(|e| {
                ScreeningError::Synthesis(format!("Failed to create audio file: {}", e))
            })?;

        file.write_all(data).map_err(|e| {
            ScreeningError::Synthesis(format!("Failed to write audio file: {}", e))
        })?;

        // Keep the file past this scope; the caller removes it after delivery
        let (_, path) = file.keep().map_err(|e| {
            ScreeningError::Synthesis(format!("Failed to persist audio file: {}", e))
        })?;

        Ok(AudioHandle {
            path,
            mime_type: format.mime_type().to_string(),
        })
    }
}

#[async_trait]
impl TextToSpeech for HttpTtsEngine {
    async fn synthesize(&self, text: &str, language: Language) -> Result<AudioHandle> {
        let request = SynthesizeRequest {
            text: text.to_string(),
            language: language.code().to_string(),
        };

        let response = self
            .client
            .post(self.service_url("/synthesize"))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ScreeningError::Synthesis(format!("Synthesis request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ScreeningError::Synthesis(format!(
                "Synthesis service error {}: {}",
                status, body
            )));
        }

        let result: SynthesizeResponse = response.json().await.map_err(|e| {
            ScreeningError::Synthesis(format!("Failed to parse synthesis response: {}", e))
        })?;

        if let Some(error) = &result.error {
            return Err(ScreeningError::Synthesis(format!(
                "Synthesis service reported: {}",
                error
            )));
        }

        let data = BASE64.decode(&result.audio).map_err(|e| {
            ScreeningError::Synthesis(format!("Invalid base64 audio in response: {}", e))
        })?;

        let format = result
            .format
            .as_deref()
            .and_then(AudioFormat::parse)
            .unwrap_or(AudioFormat::Mp3);

        let handle = self.write_audio_file(&data, format)?;
        tracing::debug!(
            model = %self.config.model,
            language = %language,
            path = %handle.path.display(),
            "Reply audio written"
        );

        Ok(handle)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
