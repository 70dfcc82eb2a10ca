//! Error taxonomy for screening requests
//!
//! An unsupported language is deliberately not represented here: it is
//! handled by falling back to the default language and flagging the
//! result, never by failing the request. Configuration errors live in
//! the config crate because they are startup concerns.

use thiserror::Error;

/// Errors surfaced while handling a single screening request.
#[derive(Error, Debug)]
pub enum ScreeningError {
    /// Input was empty or otherwise unusable. Maps to a client error.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The speech-to-text engine failed to produce a transcript.
    #[error("Transcription failed: {0}")]
    Transcription(String),

    /// The language classifier failed to produce a tag.
    #[error("Language identification failed: {0}")]
    LanguageId(String),

    /// The text-to-speech engine failed to synthesize audio.
    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),
}

pub type Result<T> = std::result::Result<T, ScreeningError>;
