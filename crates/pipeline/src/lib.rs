//! Screening pipeline orchestration
//!
//! Wires the analysis components into a single entry point per request:
//! - [`ScreeningPipeline::analyze`] for text
//! - [`ScreeningPipeline::analyze_audio`] for transcribed audio
//! - [`ScreeningPipeline::render_speech`] for the spoken reply
//!
//! Speech engines are optional collaborators attached with the `with_*`
//! builders; without them the pipeline is text-in, text-out. The
//! built-in [`ScriptHeuristicClassifier`] handles language tagging when
//! no external classifier is attached, and [`HttpSttEngine`] /
//! [`HttpTtsEngine`] adapt sidecar services to the speech traits.

pub mod classifier;
pub mod orchestrator;
pub mod stt;
pub mod tts;

pub use classifier::ScriptHeuristicClassifier;
pub use orchestrator::{PipelineStage, ScreeningPipeline};
pub use stt::{HttpSttConfig, HttpSttEngine};
pub use tts::{HttpTtsConfig, HttpTtsEngine};
