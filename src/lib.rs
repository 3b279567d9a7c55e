//! # RLC Lab
//!
//! Simulation engine for a series RLC circuit, built for an educational tool
//! that plots circuit voltages in real time and plays them back as audio.
//!
//! This library provides:
//! - A fixed-step time-domain solver for arbitrary input waveforms
//! - Closed-form frequency response (Bode magnitude and phase) per component
//! - Standard component value tables with nearest-value snapping
//! - An orchestrator that ties both solvers together and decimates results
//!   for display
//!
//! ## Architecture
//!
//! - [`circuit`] - Circuit parameters, diagnostics and validation
//! - [`standard_values`] - Standard value tables and snapping
//! - [`solver`] - Time-domain and frequency-domain solvers
//! - [`sources`] - Input signals and test waveforms
//! - [`simulation`] - Orchestration and display decimation
//! - [`units`] - Engineering-notation values (`4.7u`, `10k`)
//! - [`audio`] - Raw PCM I/O (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! rlc-lab transient --r 10 --l 1m --c 1u --waveform square --frequency 200 > vc.f32
//! ffmpeg -i input.wav -f f32le -ac 1 -ar 44100 - | rlc-lab transient --stdin --sample-rate 44100 --probe vl --normalize | ffmpeg -f f32le -ac 1 -ar 44100 -i - output.wav
//! rlc-lab bode --r 50 --l 10m --c 1u
//! ```
//!
//! ### Library
//!
//! ```
//! use rlc_lab::{CircuitParameters, Simulation};
//! use rlc_lab::sources::{Shape, Waveform};
//!
//! let params = CircuitParameters::new(50.0, 0.01, 1e-6);
//! let input = Waveform::new(Shape::Square, 500.0).generate(0.01, 50_000.0).unwrap();
//! let report = Simulation::new().run(&params, &input).unwrap();
//! assert_eq!(report.result.len(), input.len());
//! ```
//!
//! ## Simulation Method
//!
//! The loop state is the capacitor charge q and the loop current i. For each
//! sample, with dt = 1/sample_rate, Heun's method takes an Euler predictor
//! step and corrects it with the average of the slopes at both ends. The
//! step size is fixed; accuracy depends on ω₀·dt being small.

pub mod circuit;
pub mod error;
pub mod simulation;
pub mod solver;
pub mod sources;
pub mod standard_values;
pub mod units;

#[cfg(feature = "cli")]
pub mod audio;

// Re-export main types for convenience
pub use circuit::{
    validate_frequency_parameters, validate_parameters, CircuitParameters, ComponentKind, Probe,
};
pub use error::{Result, RlcError};
pub use simulation::{Simulation, SimulationConfig, SimulationReport};
pub use solver::{response, solve, FrequencyResponse, FrequencySweep, SimulationResult};
pub use standard_values::{nearest, StandardValueTable};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmRlcLab;

/// Default sample rate for synthetic waveforms, in Hz
pub const DEFAULT_SAMPLE_RATE: f64 = 50_000.0;

/// Default synthetic window length, in seconds
pub const DEFAULT_DURATION: f64 = 0.010;
