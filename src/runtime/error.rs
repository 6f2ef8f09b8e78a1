//! Error types for the style engine
//!
//! Resolution itself is total. Only sheet loading and configuration loading
//! can fail.

use std::io;
use thiserror::Error;

use crate::syntax::ParseError;

/// Top-level engine error
#[derive(Debug, Error)]
pub enum StyleError {
    /// Malformed stylesheet text. The previously loaded sheet stays active.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Invalid engine configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error while reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON error while decoding configuration
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for engine results
pub type Result<T> = std::result::Result<T, StyleError>;
