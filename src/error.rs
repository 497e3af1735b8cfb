//! Error types for the token build pipeline
//!
//! Locally recoverable conditions (missing source file, unresolved reference)
//! never show up here; they are absorbed where they occur and represented as
//! data. These variants are the structural defects that abort a build.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid build config '{path}': {message}")]
    Config { path: PathBuf, message: String },

    #[error("identifier collision in category '{category}': '{identifier}' derived from both '{first}' and '{second}'")]
    IdentifierCollision {
        category: String,
        identifier: String,
        first: String,
        second: String,
    },

    #[error("unknown platform '{0}'")]
    UnknownPlatform(String),
}
