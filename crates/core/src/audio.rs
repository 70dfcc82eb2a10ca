//! Audio payload types for the speech boundaries
//!
//! Audio bytes are opaque to this service. Decoding happens inside the
//! speech-to-text engine and synthesis inside the text-to-speech engine,
//! both behind the traits in [`crate::traits`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Container formats accepted for uploaded audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Wav,
    Mp3,
    M4a,
}

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::M4a => "m4a",
        }
    }

    /// Content type for the container.
    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::M4a => "audio/mp4",
        }
    }

    /// Parse a format label ("wav", "mp3", "m4a"), case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wav" => Some(AudioFormat::Wav),
            "mp3" => Some(AudioFormat::Mp3),
            "m4a" => Some(AudioFormat::M4a),
            _ => None,
        }
    }

    /// All accepted formats, for error messages and API docs.
    pub fn all() -> &'static [AudioFormat] {
        &[AudioFormat::Mp3, AudioFormat::Wav, AudioFormat::M4a]
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw audio bytes handed to the transcriber.
#[derive(Debug, Clone)]
pub struct AudioInput {
    pub data: Vec<u8>,
    pub format: AudioFormat,
}

impl AudioInput {
    pub fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Handle to synthesized speech written by the text-to-speech engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioHandle {
    /// Where the synthesized audio was written.
    pub path: PathBuf,
    /// Content type of the file at `path`.
    pub mime_type: String,
}

/// Text recovered from an audio input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    /// The recognised text.
    pub text: String,
    /// Language hint reported by the engine, when it has one.
    pub language_hint: Option<String>,
}

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language_hint: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(AudioFormat::parse("wav"), Some(AudioFormat::Wav));
        assert_eq!(AudioFormat::parse("MP3"), Some(AudioFormat::Mp3));
        assert_eq!(AudioFormat::parse(" m4a "), Some(AudioFormat::M4a));
        assert_eq!(AudioFormat::parse("ogg"), None);
    }

    #[test]
    fn test_format_mime_types() {
        assert_eq!(AudioFormat::Wav.mime_type(), "audio/wav");
        assert_eq!(AudioFormat::Mp3.mime_type(), "audio/mpeg");
        assert_eq!(AudioFormat::M4a.mime_type(), "audio/mp4");
    }

    #[test]
    fn test_audio_input_empty() {
        let input = AudioInput::new(Vec::new(), AudioFormat::Wav);
        assert!(input.is_empty());
        let input = AudioInput::new(vec![0u8; 4], AudioFormat::Wav);
        assert!(!input.is_empty());
    }
}
