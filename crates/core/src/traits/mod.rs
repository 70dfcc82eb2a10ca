//! Collaborator traits for the screening pipeline
//!
//! The pipeline depends on three external capabilities, each behind a
//! trait so backends can be swapped and tests can use mocks:
//!
//! ```text
//! Speech:
//!   - SpeechToText: audio -> transcript
//!   - TextToSpeech: text -> synthesized audio handle
//!
//! Language:
//!   - LanguageClassifier: text -> raw language tag
//! ```
//!
//! All traits are `Send + Sync + 'static` so a single engine instance
//! can be shared behind an `Arc` across concurrent requests.

mod language_id;
mod speech;

pub use language_id::LanguageClassifier;
pub use speech::{SpeechToText, TextToSpeech};
