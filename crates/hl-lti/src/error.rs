//! Error types for LTI operations.

use hl_core::HlError;
use thiserror::Error;

/// Result type for LTI operations.
pub type LtiResult<T> = Result<T, LtiError>;

/// Errors that can occur while building or simulating transfer functions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LtiError {
    /// Denominator collapsed to the zero polynomial.
    #[error("Denominator polynomial is zero")]
    ZeroDenominator,

    /// Numerator degree exceeds denominator degree.
    #[error(
        "Improper transfer function: numerator degree {num_degree} exceeds denominator degree {den_degree}"
    )]
    Improper { num_degree: usize, den_degree: usize },

    /// Invalid argument provided to an LTI function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Time-domain simulation could not proceed.
    #[error("Simulation failed: {what}")]
    Simulation { what: String },

    #[error(transparent)]
    Core(#[from] HlError),
}
