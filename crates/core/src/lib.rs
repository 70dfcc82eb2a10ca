//! Core traits and types for the mental-health screening service
//!
//! This crate is the shared vocabulary for the workspace:
//! - The supported [`Language`] set and tag parsing
//! - Stress scoring types ([`StressLevel`], [`StressScore`], [`CategoryHit`])
//! - The [`AnalysisResult`] produced for every screening request
//! - Audio payload types for the speech boundaries
//! - Collaborator traits ([`SpeechToText`], [`TextToSpeech`],
//!   [`LanguageClassifier`])
//!
//! It carries no analysis logic and no I/O. Concrete engines live behind
//! the traits so the pipeline can be exercised with mocks.

pub mod audio;
pub mod error;
pub mod language;
pub mod result;
pub mod stress;
pub mod traits;

// Domain types
pub use language::Language;
pub use result::{AnalysisResult, Hotline, ResponseContent};
pub use stress::{CategoryHit, StressLevel, StressScore};

// Audio payloads for the speech boundaries
pub use audio::{AudioFormat, AudioHandle, AudioInput, Transcript};

// Error taxonomy
pub use error::{Result, ScreeningError};

// Collaborator traits
pub use traits::{LanguageClassifier, SpeechToText, TextToSpeech};
