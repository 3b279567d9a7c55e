//! Core types for circuit representation.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RlcError, Result};
use crate::standard_values::{StandardValueTable, CAPACITANCE, INDUCTANCE, RESISTANCE};

/// Relative band around ζ = 1 treated as critically damped.
const CRITICAL_DAMPING_TOLERANCE: f64 = 1e-9;

/// Component values and initial state of a series RLC circuit.
///
/// All values are SI: ohms, henries, farads, volts and amperes. The
/// struct is plain data; it is checked by
/// [`validate_parameters`](super::validate_parameters) rather than on
/// construction, so the UI layer can hold intermediate values while the
/// user is still editing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitParameters {
    /// Resistance in ohms (must be > 0)
    pub r: f64,
    /// Inductance in henries (must be > 0 for time-domain solves)
    pub l: f64,
    /// Capacitance in farads (must be > 0)
    pub c: f64,
    /// Initial capacitor voltage in volts
    #[serde(default)]
    pub vc0: f64,
    /// Initial inductor current in amperes
    #[serde(default)]
    pub i0: f64,
}

/// How the circuit responds to a step, derived from the damping ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Damping {
    /// ζ < 1: rings before settling
    Underdamped,
    /// ζ = 1: fastest settling without overshoot
    CriticallyDamped,
    /// ζ > 1: settles slowly without ringing
    Overdamped,
}

impl CircuitParameters {
    /// Create parameters with zero initial state.
    pub fn new(r: f64, l: f64, c: f64) -> Self {
        Self {
            r,
            l,
            c,
            vc0: 0.0,
            i0: 0.0,
        }
    }

    /// Set the initial capacitor voltage and inductor current.
    pub fn with_initial_state(mut self, vc0: f64, i0: f64) -> Self {
        self.vc0 = vc0;
        self.i0 = i0;
        self
    }

    /// Undamped resonant angular frequency ω₀ = 1/√(LC), in rad/s.
    pub fn resonant_angular_frequency(&self) -> f64 {
        1.0 / (self.l * self.c).sqrt()
    }

    /// Undamped resonant frequency f₀ = ω₀/2π, in Hz.
    pub fn resonant_frequency(&self) -> f64 {
        self.resonant_angular_frequency() / (2.0 * PI)
    }

    /// Damping ratio ζ = (R/2)·√(C/L).
    pub fn damping_ratio(&self) -> f64 {
        0.5 * self.r * (self.c / self.l).sqrt()
    }

    /// Quality factor Q = (1/R)·√(L/C).
    pub fn quality_factor(&self) -> f64 {
        (self.l / self.c).sqrt() / self.r
    }

    /// Classify the step response.
    pub fn damping(&self) -> Damping {
        let zeta = self.damping_ratio();
        if (zeta - 1.0).abs() <= CRITICAL_DAMPING_TOLERANCE {
            Damping::CriticallyDamped
        } else if zeta < 1.0 {
            Damping::Underdamped
        } else {
            Damping::Overdamped
        }
    }

    /// Return a copy with R, L and C snapped to their standard tables,
    /// using each kind's conventional display scale. Initial state is kept.
    pub fn snapped(&self) -> Result<Self> {
        Ok(Self {
            r: ComponentKind::Resistance.snap(self.r)?,
            l: ComponentKind::Inductance.snap(self.l)?,
            c: ComponentKind::Capacitance.snap(self.c)?,
            ..*self
        })
    }
}

/// The three kinds of passive component in the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Resistance,
    Inductance,
    Capacitance,
}

impl ComponentKind {
    /// Parse a kind from a short name (`r`, `l`, `c` or the full word).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "r" | "resistance" | "resistor" => Some(Self::Resistance),
            "l" | "inductance" | "inductor" => Some(Self::Inductance),
            "c" | "capacitance" | "capacitor" => Some(Self::Capacitance),
            _ => None,
        }
    }

    /// SI unit symbol.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Resistance => "Ω",
            Self::Inductance => "H",
            Self::Capacitance => "F",
        }
    }

    /// Scale the standard table is expressed in: kΩ, mH and µF.
    pub fn display_scale(&self) -> f64 {
        match self {
            Self::Resistance => 1e3,
            Self::Inductance => 1e-3,
            Self::Capacitance => 1e-6,
        }
    }

    /// The standard value table for this kind.
    pub fn table(&self) -> &'static StandardValueTable {
        match self {
            Self::Resistance => &RESISTANCE,
            Self::Inductance => &INDUCTANCE,
            Self::Capacitance => &CAPACITANCE,
        }
    }

    /// Snap an SI value to the nearest standard value at the display scale.
    ///
    /// NaN has no nearest entry, so non-finite values are rejected rather
    /// than resolved to the first table entry.
    pub fn snap(&self, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(RlcError::invalid_parameter(
                self.to_string(),
                value,
                "cannot snap a non-finite value",
            ));
        }
        Ok(self.table().snap(value, self.display_scale()))
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resistance => write!(f, "R"),
            Self::Inductance => write!(f, "L"),
            Self::Capacitance => write!(f, "C"),
        }
    }
}

/// A signal that can be probed from a simulation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Probe {
    /// The driving input voltage
    Input,
    /// Loop current
    Current,
    /// Voltage across the resistor
    Resistor,
    /// Voltage across the inductor
    Inductor,
    /// Voltage across the capacitor
    #[default]
    Capacitor,
}

impl Probe {
    /// Parse a probe name.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "input" | "in" | "vin" => Ok(Self::Input),
            "i" | "current" => Ok(Self::Current),
            "r" | "vr" => Ok(Self::Resistor),
            "l" | "vl" => Ok(Self::Inductor),
            "c" | "vc" => Ok(Self::Capacitor),
            _ => Err(RlcError::UnknownComponent {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "vin"),
            Self::Current => write!(f, "i"),
            Self::Resistor => write!(f, "vR"),
            Self::Inductor => write!(f, "vL"),
            Self::Capacitor => write!(f, "vC"),
        }
    }
}
