//! Numerical engine for the series RLC loop.
//!
//! Two independent, stateless solvers:
//!
//! - [`transient`] integrates the loop equations sample by sample for an
//!   arbitrary input waveform (Heun's method, fixed step).
//! - [`frequency`] evaluates the closed-form sinusoidal steady-state
//!   response of each component, for Bode plots.
//!
//! Neither re-validates its parameters; callers go through
//! [`validate_parameters`](crate::circuit::validate_parameters) (or, for
//! the frequency response alone,
//! [`validate_frequency_parameters`](crate::circuit::validate_frequency_parameters))
//! first.

pub mod frequency;
pub mod transient;

pub use frequency::{
    response, sweep, BranchResponse, ComponentSweep, FrequencyResponse, FrequencySweep, SweepRange,
};
pub use transient::{solve, solve_with, InductorVoltage, SimulationResult};
