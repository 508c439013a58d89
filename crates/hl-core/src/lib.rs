//! hl-core: shared foundation for hydroloop.
//!
//! Contains:
//! - units (uom SI types + constructors for the plant constants)
//! - numeric (Real + finite/positive guards)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{HlError, HlResult};
pub use numeric::*;
pub use units::*;
