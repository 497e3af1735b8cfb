//! Build pipeline: configuration and orchestration
//!
//! The pure core lives in [`crate::tokens`] and [`crate::emit`]; this module
//! is the I/O shell around it.

pub mod config;
pub mod executor;

pub use config::BuildConfig;
pub use executor::{BuildReport, PipelineExecutor};
