//! Error types for the reservoir loop layer.

use std::path::PathBuf;

use hl_core::HlError;
use hl_lti::LtiError;

/// Result type for reservoir loop operations.
pub type LoopResult<T> = Result<T, LoopError>;

/// Errors raised while building or analysing the reservoir loop.
#[derive(Debug, thiserror::Error)]
pub enum LoopError {
    #[error("Degenerate plant parameterization: {what}")]
    DegeneratePlant { what: &'static str },

    #[error("Invalid controller gains: {what}")]
    InvalidGains { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Plant configuration error: {0}")]
    Config(String),

    #[error("Failed to read plant file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cross-check failed: {0}")]
    Mismatch(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Lti(#[from] LtiError),

    #[error(transparent)]
    Core(#[from] HlError),
}
