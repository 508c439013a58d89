use thiserror::Error;

pub type HlResult<T> = Result<T, HlError>;

/// Value-level failures shared by every hydroloop crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HlError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
