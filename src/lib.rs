//! # tokengen
//!
//! A build pipeline for design tokens: hierarchical JSON token sources are
//! merged into one normalized tree, symbolic `{dot.path}` references are
//! resolved, and per-platform source artifacts (Swift, Kotlin, TypeScript,
//! CSS) plus asset catalogs and materialized themes are rendered from the
//! result.
//!
//! The whole pipeline is a batch transform: read JSON → merge → normalize →
//! resolve references → group → render → write files.

pub mod emit;
pub mod error;
pub mod pipeline;
pub mod tokens;

pub use error::TokenError;
