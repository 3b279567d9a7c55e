//! Periodic test waveforms.
//!
//! Shapes are bipolar (-1..1, except the step which is a constant 1) and
//! scaled by amplitude plus a DC offset.

use std::f64::consts::PI;

use crate::circuit::validate_sample_rate;
use crate::error::{RlcError, Result};

use super::{InputClass, InputSignal};

/// Longest signal `generate` will allocate (200 s at 50 kHz).
pub const MAX_GENERATED_SAMPLES: usize = 10_000_000;

/// Waveform shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    /// Sine wave
    #[default]
    Sine,
    /// Square wave, high for the first half period
    Square,
    /// Triangle wave, rising through zero at phase 0
    Triangle,
    /// Rising ramp from -1 to 1
    Sawtooth,
    /// Constant 1 from the first sample (unit step)
    Step,
}

impl Shape {
    /// Parse shape from string.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sine" | "sin" => Ok(Self::Sine),
            "square" | "sq" => Ok(Self::Square),
            "triangle" | "tri" => Ok(Self::Triangle),
            "sawtooth" | "saw" => Ok(Self::Sawtooth),
            "step" | "dc" => Ok(Self::Step),
            _ => Err(RlcError::UnknownWaveform {
                name: s.to_string(),
            }),
        }
    }

    /// Value at `phase` in [0, 1).
    fn value(&self, phase: f64) -> f64 {
        match self {
            Self::Sine => (2.0 * PI * phase).sin(),
            Self::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Self::Triangle => {
                if phase < 0.25 {
                    4.0 * phase
                } else if phase < 0.75 {
                    2.0 - 4.0 * phase
                } else {
                    4.0 * phase - 4.0
                }
            }
            Self::Sawtooth => 2.0 * phase - 1.0,
            Self::Step => 1.0,
        }
    }
}

/// A parametric waveform generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waveform {
    pub shape: Shape,
    /// Peak amplitude in volts
    pub amplitude: f64,
    /// Frequency in Hz (ignored for [`Shape::Step`])
    pub frequency: f64,
    /// DC offset in volts
    pub offset: f64,
}

impl Default for Waveform {
    fn default() -> Self {
        Self {
            shape: Shape::Sine,
            amplitude: 1.0,
            frequency: 1000.0,
            offset: 0.0,
        }
    }
}

impl Waveform {
    /// Create a unit-amplitude waveform with no offset.
    pub fn new(shape: Shape, frequency: f64) -> Self {
        Self {
            shape,
            frequency,
            ..Self::default()
        }
    }

    /// Set the peak amplitude (volts).
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Set the DC offset (volts).
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Value at time `t` seconds.
    pub fn value_at(&self, t: f64) -> f64 {
        let phase = (self.frequency * t).rem_euclid(1.0);
        self.offset + self.amplitude * self.shape.value(phase)
    }

    /// Sample `duration` seconds at `sample_rate` Hz into a
    /// [`InputClass::ShortSynthetic`] signal.
    pub fn generate(&self, duration: f64, sample_rate: f64) -> Result<InputSignal> {
        validate_sample_rate(sample_rate)?;
        if !(duration.is_finite() && duration > 0.0) {
            return Err(RlcError::invalid_waveform(format!(
                "duration must be positive, got {duration}"
            )));
        }
        if self.shape != Shape::Step && !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(RlcError::invalid_waveform(format!(
                "frequency must be positive, got {}",
                self.frequency
            )));
        }
        if !self.amplitude.is_finite() || !self.offset.is_finite() {
            return Err(RlcError::invalid_waveform("amplitude and offset must be finite"));
        }

        let n = (duration * sample_rate).round();
        if n > MAX_GENERATED_SAMPLES as f64 {
            return Err(RlcError::invalid_waveform(format!(
                "{duration} s at {sample_rate} Hz is {n} samples, limit is {MAX_GENERATED_SAMPLES}"
            )));
        }
        let n = n as usize;
        let samples = (0..n)
            .map(|k| self.value_at(k as f64 / sample_rate))
            .collect();
        InputSignal::new(samples, sample_rate, InputClass::ShortSynthetic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sine() {
        // 1 kHz at 4 kHz: phases 0, 0.25, 0.5, 0.75
        let sig = Waveform::new(Shape::Sine, 1000.0).generate(0.001, 4000.0).unwrap();
        let s = sig.samples();
        assert_eq!(s.len(), 4);
        assert_abs_diff_eq!(s[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s[1], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s[2], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s[3], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_triangle() {
        let sig = Waveform::new(Shape::Triangle, 1000.0).generate(0.001, 8000.0).unwrap();
        let expected = [0.0, 0.5, 1.0, 0.5, 0.0, -0.5, -1.0, -0.5];
        for (got, want) in sig.samples().iter().zip(expected) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_square_and_sawtooth() {
        let sq = Waveform::new(Shape::Square, 1000.0).with_amplitude(2.0);
        assert_eq!(sq.value_at(0.0001), 2.0);
        assert_eq!(sq.value_at(0.0006), -2.0);

        let saw = Waveform::new(Shape::Sawtooth, 1000.0).with_offset(1.0);
        assert_abs_diff_eq!(saw.value_at(0.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(saw.value_at(0.0005), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_step_ignores_frequency() {
        let sig = Waveform::new(Shape::Step, 0.0).generate(0.01, 50_000.0).unwrap();
        assert_eq!(sig.len(), 500);
        assert_eq!(sig.class(), InputClass::ShortSynthetic);
        assert!(sig.samples().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_invalid_settings() {
        assert!(Waveform::new(Shape::Sine, 0.0).generate(0.01, 48_000.0).is_err());
        assert!(Waveform::new(Shape::Sine, 100.0).generate(0.0, 48_000.0).is_err());
        assert!(Waveform::new(Shape::Sine, 100.0).generate(0.01, -1.0).is_err());
        assert!(matches!(Shape::parse("noise"), Err(RlcError::UnknownWaveform { .. })));
        assert!(matches!(
            Waveform::new(Shape::Sine, 100.0).generate(1e12, 48_000.0),
            Err(RlcError::InvalidWaveform { .. })
        ));
        assert_eq!(Shape::parse("SAW").unwrap(), Shape::Sawtooth);
    }
}
