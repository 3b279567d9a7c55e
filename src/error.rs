//! Error types for the RLC lab engine.
//!
//! This module provides a unified error type [`RlcError`] covering parameter
//! validation, sweep configuration, value parsing and the CLI/WASM front ends.
//! The solvers themselves never fail: invalid inputs are rejected here, at the
//! validation boundary, before any solve runs.

use thiserror::Error;

/// Result type alias using [`RlcError`].
pub type Result<T> = std::result::Result<T, RlcError>;

/// Unified error type for all RLC lab operations.
#[derive(Error, Debug)]
pub enum RlcError {
    // ============ Validation Errors ============
    /// A circuit parameter is out of range or not finite
    #[error("Invalid parameter '{param}' (value: {value:e}): {message}")]
    InvalidParameter {
        param: String,
        value: f64,
        message: String,
    },

    /// Sample rate must be positive and finite
    #[error("Invalid sample rate {value} Hz: must be positive and finite")]
    InvalidSampleRate { value: f64 },

    /// Frequency sweep bounds or point count are unusable
    #[error("Degenerate frequency sweep: {message}")]
    DegenerateSweep { message: String },

    /// Waveform generator settings are unusable
    #[error("Invalid waveform: {message}")]
    InvalidWaveform { message: String },

    // ============ Lookup / Parsing Errors ============
    /// Engineering-notation value could not be parsed
    #[error("Invalid value '{text}' (expected a number with optional p/n/u/m/k/M/G suffix)")]
    InvalidValue { text: String },

    /// Unknown waveform name
    #[error("Unknown waveform '{name}' (expected sine, square, triangle, sawtooth or step)")]
    UnknownWaveform { name: String },

    /// Unknown component name
    #[error("Unknown component '{name}' (expected input, i, r, l or c)")]
    UnknownComponent { name: String },

    // ============ I/O Errors ============
    /// Error reading audio input
    #[error("Audio input error: {message}")]
    AudioInputError { message: String },

    /// Error writing audio output
    #[error("Audio output error: {message}")]
    AudioOutputError { message: String },

    /// Error serializing a report
    #[cfg(feature = "cli")]
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RlcError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(param: impl Into<String>, value: f64, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            value,
            message: message.into(),
        }
    }

    /// Create a degenerate sweep error
    pub fn degenerate_sweep(message: impl Into<String>) -> Self {
        Self::DegenerateSweep {
            message: message.into(),
        }
    }

    /// Create an invalid waveform error
    pub fn invalid_waveform(message: impl Into<String>) -> Self {
        Self::InvalidWaveform {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = RlcError::invalid_parameter("R", -1.0, "must be positive");
        let msg = err.to_string();
        assert!(msg.contains("'R'"));
        assert!(msg.contains("must be positive"));
    }

    #[test]
    fn test_degenerate_sweep_message() {
        let err = RlcError::degenerate_sweep("p_max must exceed p_min");
        assert_eq!(
            err.to_string(),
            "Degenerate frequency sweep: p_max must exceed p_min"
        );
    }
}
