//! Screening Server
//!
//! HTTP surface for the screening pipeline. The binary wires settings,
//! configuration validation and tracing around [`create_router`];
//! embedders can build their own state (for example with speech engines
//! attached) and mount the same router.

pub mod http;
pub mod state;

pub use http::create_router;
pub use state::AppState;
