//! Analysis components for the screening pipeline
//!
//! Four components, each built once from a [`mindcare_config::ScreeningConfig`]
//! section and shared read-only across requests:
//! - [`LanguageIdentifier`]: classifier tag -> supported language, with fallback
//! - [`StressScorer`]: keyword calibration -> banded stress score
//! - [`CrisisDetector`]: crisis lexicon scan
//! - [`ResponseSelector`]: localized content selection
//!
//! Scoring, detection and selection are pure synchronous functions of
//! their input; only language identification awaits a collaborator.

pub mod crisis;
pub mod language_id;
pub mod response;
pub mod stress;

pub use crisis::CrisisDetector;
pub use language_id::{LanguageDetection, LanguageIdentifier};
pub use response::ResponseSelector;
pub use stress::StressScorer;
