//! Closed-form frequency response of the series loop.
//!
//! With the input as reference, the loop impedance is
//! Z = R + j(ωL - 1/(ωC)) and each component voltage is the input scaled by
//! that component's impedance over Z. Magnitudes are returned in dB and
//! phases in degrees.

use std::f64::consts::FRAC_PI_2;
use std::f64::consts::PI;

use num_complex::Complex;
use serde::Serialize;

use crate::error::{RlcError, Result};

/// Gain and phase of one component voltage relative to the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BranchResponse {
    /// 20·log10(|V_component| / |V_in|)
    pub magnitude_db: f64,
    /// Phase of V_component relative to V_in, in degrees
    pub phase_deg: f64,
}

impl BranchResponse {
    fn from_gain(gain: f64, phase_rad: f64) -> Self {
        Self {
            magnitude_db: 20.0 * gain.log10(),
            phase_deg: phase_rad.to_degrees(),
        }
    }
}

/// Response of all three components at one angular frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyResponse {
    pub resistor: BranchResponse,
    pub inductor: BranchResponse,
    pub capacitor: BranchResponse,
}

/// Evaluate the response at angular frequency `omega` (rad/s).
///
/// Pure and allocation-free. Parameters are not validated: R ≤ 0, C ≤ 0,
/// L < 0 or ω = 0 give meaningless (NaN or infinite) results.
pub fn response(omega: f64, r: f64, l: f64, c: f64) -> FrequencyResponse {
    let x_l = l * omega;
    let x_c = 1.0 / (c * omega);
    let z = Complex::new(r, x_l - x_c);
    let z_mag = z.norm();
    let z_arg = z.arg();

    FrequencyResponse {
        resistor: BranchResponse::from_gain(r / z_mag, -z_arg),
        inductor: BranchResponse::from_gain(x_l / z_mag, FRAC_PI_2 - z_arg),
        capacitor: BranchResponse::from_gain(x_c / z_mag, -FRAC_PI_2 - z_arg),
    }
}

/// Evenly spaced points on the log10(frequency) axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepRange {
    /// Lowest power of ten (f_min = 10^p_min Hz)
    pub p_min: f64,
    /// Highest power of ten (f_max = 10^p_max Hz)
    pub p_max: f64,
    /// Number of intervals; the sweep has `intervals + 1` points
    pub intervals: usize,
}

impl SweepRange {
    /// Create a validated range.
    pub fn new(p_min: f64, p_max: f64, intervals: usize) -> Result<Self> {
        let range = Self {
            p_min,
            p_max,
            intervals,
        };
        range.validate()?;
        Ok(range)
    }

    /// Reject non-finite bounds, an empty or inverted range, and zero intervals.
    pub fn validate(&self) -> Result<()> {
        if !self.p_min.is_finite() || !self.p_max.is_finite() {
            return Err(RlcError::degenerate_sweep(format!(
                "bounds must be finite (p_min = {}, p_max = {})",
                self.p_min, self.p_max
            )));
        }
        if self.p_max <= self.p_min {
            return Err(RlcError::degenerate_sweep(format!(
                "p_max ({}) must be greater than p_min ({})",
                self.p_max, self.p_min
            )));
        }
        if self.intervals == 0 {
            return Err(RlcError::degenerate_sweep("point count must be positive"));
        }
        Ok(())
    }

    /// Number of points in the sweep.
    pub fn len(&self) -> usize {
        self.intervals + 1
    }

    /// Always false for a validated range.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The log10(f) value of point `k`.
    pub fn point(&self, k: usize) -> f64 {
        self.p_min + (self.p_max - self.p_min) * (k as f64 / self.intervals as f64)
    }

    /// Iterate over all log10(f) points, from p_min to p_max.
    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=self.intervals).map(move |k| self.point(k))
    }
}

/// Magnitude and phase sequences for one component.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComponentSweep {
    pub magnitude_db: Vec<f64>,
    pub phase_deg: Vec<f64>,
}

impl ComponentSweep {
    fn with_capacity(n: usize) -> Self {
        Self {
            magnitude_db: Vec::with_capacity(n),
            phase_deg: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, branch: BranchResponse) {
        self.magnitude_db.push(branch.magnitude_db);
        self.phase_deg.push(branch.phase_deg);
    }
}

/// Bode data for all three components, indexed by log10(frequency).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrequencySweep {
    /// X axis: log10 of the frequency in Hz
    pub log10_frequencies: Vec<f64>,
    pub resistor: ComponentSweep,
    pub inductor: ComponentSweep,
    pub capacitor: ComponentSweep,
}

impl FrequencySweep {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.log10_frequencies.len()
    }

    /// True if the sweep holds no points.
    pub fn is_empty(&self) -> bool {
        self.log10_frequencies.is_empty()
    }
}

/// Evaluate [`response`] at every point of `range`.
///
/// Each point p is converted to f = 10^p and ω = 2πf, so the sweep never
/// touches ω = 0. Fails only if the range itself is degenerate.
pub fn sweep(range: &SweepRange, r: f64, l: f64, c: f64) -> Result<FrequencySweep> {
    range.validate()?;
    log::trace!(
        "Frequency sweep 10^{} .. 10^{} Hz, {} points",
        range.p_min,
        range.p_max,
        range.len()
    );

    let n = range.len();
    let mut out = FrequencySweep {
        log10_frequencies: Vec::with_capacity(n),
        resistor: ComponentSweep::with_capacity(n),
        inductor: ComponentSweep::with_capacity(n),
        capacitor: ComponentSweep::with_capacity(n),
    };

    for p in range.points() {
        let omega = 2.0 * PI * 10f64.powf(p);
        let resp = response(omega, r, l, c);
        out.log10_frequencies.push(p);
        out.resistor.push(resp.resistor);
        out.inductor.push(resp.inductor);
        out.capacitor.push(resp.capacitor);
    }

    Ok(out)
}
