//! Parameter validation.

use crate::error::{RlcError, Result};

use super::CircuitParameters;

/// Validate circuit parameters before a time-domain solve.
///
/// Checks everything [`validate_frequency_parameters`] does, and also
/// rejects L = 0: the time-domain solver divides by L.
pub fn validate_parameters(params: &CircuitParameters) -> Result<()> {
    validate_frequency_parameters(params)?;

    if params.l == 0.0 {
        return Err(RlcError::invalid_parameter(
            "L",
            params.l,
            "inductance must be non-zero for time-domain simulation",
        ));
    }

    Ok(())
}

/// Validate circuit parameters for the frequency response only.
///
/// Checks:
/// - R, L, C, vC0 and i0 are all finite
/// - R > 0 and C > 0
/// - L >= 0 (an RC loop has a well-defined response)
pub fn validate_frequency_parameters(params: &CircuitParameters) -> Result<()> {
    let fields = [
        ("R", params.r),
        ("L", params.l),
        ("C", params.c),
        ("vC0", params.vc0),
        ("i0", params.i0),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(RlcError::invalid_parameter(name, value, "must be finite"));
        }
    }

    if params.r <= 0.0 {
        return Err(RlcError::invalid_parameter("R", params.r, "resistance must be positive"));
    }

    if params.l < 0.0 {
        return Err(RlcError::invalid_parameter("L", params.l, "inductance cannot be negative"));
    }

    if params.c <= 0.0 {
        return Err(RlcError::invalid_parameter("C", params.c, "capacitance must be positive"));
    }

    Ok(())
}

/// Validate a sample rate (Hz).
pub fn validate_sample_rate(sample_rate: f64) -> Result<()> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(RlcError::InvalidSampleRate { value: sample_rate })
    }
}
