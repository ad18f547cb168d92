//! Error types for the transition engine.
//!
//! None of these escape the `Director`: load failures abort the in-flight
//! transition and colour errors fall back to the previous value.

use thiserror::Error;

/// Result type for configuration loading.
pub type CoreResult<T> = Result<T, ConfigError>;

/// Geometry could not be fetched or decoded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("fetch failed for {path}: {reason}")]
    Fetch { path: String, reason: String },

    #[error("could not parse point cloud {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("point cloud {0} has no points")]
    Empty(String),
}

/// A colour string from configuration or UI that could not be normalised.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("unrecognised colour syntax: {0:?}")]
    Syntax(String),

    #[error("colour component out of range in {0:?}")]
    Range(String),
}

/// The show configuration document is unusable.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("show has no sections")]
    NoSections,

    #[error("duplicate section id: {0}")]
    DuplicateId(String),
}
