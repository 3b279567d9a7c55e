//! Sampled input sequences.

use crate::circuit::validate_sample_rate;
use crate::error::Result;

/// Where an input sequence came from. Selects the display policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputClass {
    /// A few milliseconds of generated waveform
    #[default]
    ShortSynthetic,
    /// Seconds of decoded audio
    LongAudio,
}

/// A uniformly sampled input voltage sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSignal {
    samples: Vec<f64>,
    sample_rate: f64,
    class: InputClass,
}

impl InputSignal {
    /// Wrap samples taken at `sample_rate` Hz.
    pub fn new(samples: Vec<f64>, sample_rate: f64, class: InputClass) -> Result<Self> {
        validate_sample_rate(sample_rate)?;
        Ok(Self {
            samples,
            sample_rate,
            class,
        })
    }

    /// Wrap decoded audio (mono, f32) as a [`InputClass::LongAudio`] signal.
    pub fn from_audio(samples: &[f32], sample_rate: f64) -> Result<Self> {
        let samples = samples.iter().map(|&s| s as f64).collect();
        Self::new(samples, sample_rate, InputClass::LongAudio)
    }

    /// The samples, in volts.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Input class.
    pub fn class(&self) -> InputClass {
        self.class
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Represented duration in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }
}
