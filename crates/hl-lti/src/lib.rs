//! Linear time-invariant system primitives for hydroloop.
//!
//! This crate holds everything that operates on a transfer function without
//! knowing where it came from:
//! - Polynomial and rational (transfer function) algebra
//! - Controllable canonical state-space realization
//! - Fixed-step RK4 step-response simulation with a capped horizon
//! - Step characteristics (rise/settling time, overshoot, peak, ...)
//! - Frequency response, pole locations and root locus data
//!
//! # Conventions
//!
//! - Polynomial coefficients are stored in descending powers of `s`
//! - Non-settling responses are not errors; their characteristics carry
//!   `f64::INFINITY` / `f64::NAN` sentinels

pub mod error;
pub mod frequency;
pub mod integrator;
pub mod locus;
pub mod polynomial;
pub mod response;
pub mod state_space;
pub mod step_info;
pub mod transfer_function;

pub use error::{LtiError, LtiResult};
pub use frequency::{BodePoint, bode, logspace};
pub use integrator::{Dynamics, Integrator, RK4};
pub use locus::{LocusPoint, root_locus};
pub use polynomial::Polynomial;
pub use response::{StepOptions, StepResponse, step};
pub use state_space::StateSpace;
pub use step_info::StepInfo;
pub use transfer_function::TransferFunction;

pub use nalgebra::Complex;
