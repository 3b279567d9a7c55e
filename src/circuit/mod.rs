//! Circuit parameter representation and validation.
//!
//! The engine models a single series RLC loop driven by an input voltage.
//! [`CircuitParameters`] holds the component values and initial state; every
//! solve receives a complete, immutable copy of it. [`validate_parameters`]
//! is the boundary where out-of-range values are rejected, so the solvers can
//! stay free of checks. [`validate_frequency_parameters`] is the looser check
//! used when only the frequency response is evaluated, which admits L = 0.

mod types;
mod validate;

pub use types::*;
pub use validate::{validate_frequency_parameters, validate_parameters, validate_sample_rate};
