//! Error handling for ytformats
//!
//! Lookups and filters never fail; these errors only come from loading
//! records or settings and from strict selection.

use thiserror::Error;

/// Main error type for ytformats
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No format matches {0}")]
    NoMatch(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}
