//! Orchestration of a full recompute.
//!
//! [`Simulation::run`] validates the parameters, integrates the input,
//! decimates the result for plotting and evaluates both Bode sweeps. Every
//! call is a complete, synchronous recompute that returns freshly
//! allocated data; callers replace their previous report rather than merge.

mod display;

pub use display::{decimate, DisplayPolicy, DisplayTrace, DISPLAY_POINTS};

use serde::Serialize;

use crate::circuit::{validate_frequency_parameters, validate_parameters, CircuitParameters, Damping};
use crate::error::Result;
use crate::solver::{solve_with, sweep, FrequencySweep, InductorVoltage, SimulationResult, SweepRange};
use crate::sources::InputSignal;

/// Default log10(f) lower bound for both sweeps (1 Hz).
pub const DEFAULT_SWEEP_P_MIN: f64 = 0.0;

/// Default log10(f) upper bound for both sweeps (100 kHz).
pub const DEFAULT_SWEEP_P_MAX: f64 = 5.0;

/// Default number of sweep intervals.
pub const DEFAULT_SWEEP_INTERVALS: usize = DISPLAY_POINTS;

/// Configuration for the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// log10(f) range for the magnitude plot.
    pub magnitude_range: SweepRange,
    /// log10(f) range for the phase plot.
    pub phase_range: SweepRange,
    /// How the inductor voltage is reported.
    pub inductor_voltage: InductorVoltage,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let range = SweepRange {
            p_min: DEFAULT_SWEEP_P_MIN,
            p_max: DEFAULT_SWEEP_P_MAX,
            intervals: DEFAULT_SWEEP_INTERVALS,
        };
        Self {
            magnitude_range: range,
            phase_range: range,
            inductor_voltage: InductorVoltage::default(),
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the magnitude sweep range.
    pub fn with_magnitude_range(mut self, range: SweepRange) -> Self {
        self.magnitude_range = range;
        self
    }

    /// Set the phase sweep range.
    pub fn with_phase_range(mut self, range: SweepRange) -> Self {
        self.phase_range = range;
        self
    }

    /// Set the inductor voltage mode.
    pub fn with_inductor_voltage(mut self, mode: InductorVoltage) -> Self {
        self.inductor_voltage = mode;
        self
    }
}

/// Everything the plotting and playback collaborators consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Parameters the report was computed for
    pub parameters: CircuitParameters,
    /// Undamped resonant frequency in Hz
    pub resonant_frequency: f64,
    /// Step response classification
    pub damping: Damping,
    /// Full-rate result, for audio playback at the input sample rate
    #[serde(skip)]
    pub result: SimulationResult,
    /// Decimated traces for the time-domain plot
    pub trace: DisplayTrace,
    /// Sweep over the magnitude range
    pub magnitude: FrequencySweep,
    /// Sweep over the phase range
    pub phase: FrequencySweep,
}

/// The simulation orchestrator.
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    /// Create an orchestrator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an orchestrator with custom configuration.
    pub fn with_config(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run the time-domain solve and both sweeps.
    pub fn run(&self, params: &CircuitParameters, input: &InputSignal) -> Result<SimulationReport> {
        let result = self.transient(params, input)?;
        let (magnitude, phase) = self.bode(params)?;

        let policy = DisplayPolicy::for_class(input.class());
        let nominal = policy.nominal_sample_rate;
        if (input.sample_rate() - nominal).abs() > nominal * 1e-9 {
            log::warn!(
                "{:?} input at {} Hz (nominal {} Hz): display window is {:.4} s instead of {:.4} s",
                input.class(),
                input.sample_rate(),
                nominal,
                policy.window_samples() as f64 / input.sample_rate(),
                policy.nominal_window()
            );
        }
        if input.len() < policy.window_samples() {
            log::warn!(
                "Input has {} samples, fewer than the {} needed to fill the display",
                input.len(),
                policy.window_samples()
            );
        }

        let trace = DisplayTrace::build(input.samples(), &result, input.sample_rate(), policy);

        Ok(SimulationReport {
            parameters: *params,
            resonant_frequency: params.resonant_frequency(),
            damping: params.damping(),
            result,
            trace,
            magnitude,
            phase,
        })
    }

    /// Validate and integrate only, at full rate.
    pub fn transient(&self, params: &CircuitParameters, input: &InputSignal) -> Result<SimulationResult> {
        validate_parameters(params)?;
        log::debug!(
            "Transient solve: {} samples at {} Hz ({:?}), R={} L={} C={}",
            input.len(),
            input.sample_rate(),
            input.class(),
            params.r,
            params.l,
            params.c
        );
        Ok(solve_with(
            input.samples(),
            params,
            input.sample_rate(),
            self.config.inductor_voltage,
        ))
    }

    /// Validate and evaluate the magnitude and phase sweeps. L = 0 is
    /// accepted here; the inductor trace is then -inf dB.
    pub fn bode(&self, params: &CircuitParameters) -> Result<(FrequencySweep, FrequencySweep)> {
        validate_frequency_parameters(params)?;
        let magnitude = sweep(&self.config.magnitude_range, params.r, params.l, params.c)?;
        let phase = sweep(&self.config.phase_range, params.r, params.l, params.c)?;
        Ok((magnitude, phase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RlcError;
    use crate::sources::{InputClass, Shape, Waveform};
    use approx::assert_relative_eq;

    fn params() -> CircuitParameters {
        CircuitParameters::new(50.0, 0.01, 1e-6)
    }

    #[test]
    fn test_run_short_synthetic() {
        let input = Waveform::new(Shape::Sine, 1000.0).generate(0.02, 50_000.0).unwrap();
        let report = Simulation::new().run(&params(), &input).unwrap();

        assert_eq!(report.result.len(), 1000);
        assert_eq!(report.trace.len(), DISPLAY_POINTS);
        // 500 points at stride 1 and 50 kHz: last point just under 10 ms
        assert_relative_eq!(report.trace.time[DISPLAY_POINTS - 1], 499.0 / 50_000.0, max_relative = 1e-12);
        assert_eq!(report.trace.v_c[10], report.result.v_c[10]);
        assert_eq!(report.magnitude.len(), DEFAULT_SWEEP_INTERVALS + 1);
        assert_eq!(report.phase.len(), DEFAULT_SWEEP_INTERVALS + 1);
        assert_eq!(report.damping, Damping::Underdamped);
    }

    #[test]
    fn test_run_long_audio_uses_stride() {
        let samples = vec![0.25_f32; 44_100];
        let input = InputSignal::from_audio(&samples, 44_100.0).unwrap();
        let report = Simulation::new().run(&params(), &input).unwrap();

        // 44100 samples at stride 1764 -> 25 points
        assert_eq!(report.trace.len(), 25);
        assert_eq!(report.trace.current[1], report.result.current[1764]);
        assert_relative_eq!(report.trace.time[1], 0.04, max_relative = 1e-12);
    }

    #[test]
    fn test_run_rejects_invalid_parameters() {
        let input = InputSignal::new(vec![0.0; 10], 1000.0, InputClass::ShortSynthetic).unwrap();
        let bad = CircuitParameters::new(100.0, 0.01, -1e-6);
        assert!(matches!(
            Simulation::new().run(&bad, &input),
            Err(RlcError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_run_rejects_degenerate_sweep() {
        let config = SimulationConfig::new().with_phase_range(SweepRange {
            p_min: 3.0,
            p_max: 2.0,
            intervals: 100,
        });
        let input = InputSignal::new(vec![0.0; 10], 1000.0, InputClass::ShortSynthetic).unwrap();
        assert!(matches!(
            Simulation::with_config(config).run(&params(), &input),
            Err(RlcError::DegenerateSweep { .. })
        ));
    }

    #[test]
    fn test_empty_input_yields_empty_report() {
        let input = InputSignal::new(Vec::new(), 50_000.0, InputClass::ShortSynthetic).unwrap();
        let report = Simulation::new().run(&params(), &input).unwrap();
        assert!(report.result.is_empty());
        assert!(report.trace.is_empty());
    }

    #[test]
    fn test_bode_accepts_rc_loop() {
        let rc = CircuitParameters::new(1000.0, 0.0, 1e-6);
        let (magnitude, _) = Simulation::new().bode(&rc).unwrap();

        // RC low-pass corner at 1/(2π·RC) ≈ 159 Hz: capacitor flat at 1 Hz
        assert!(magnitude.capacitor.magnitude_db[0].abs() < 1e-3);
        assert!(magnitude.inductor.magnitude_db.iter().all(|&db| db == f64::NEG_INFINITY));

        let input = InputSignal::new(vec![0.0; 10], 1000.0, InputClass::ShortSynthetic).unwrap();
        assert!(matches!(
            Simulation::new().transient(&rc, &input),
            Err(RlcError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_separate_sweep_ranges() {
        let config = SimulationConfig::new()
            .with_magnitude_range(SweepRange::new(1.0, 4.0, 30).unwrap())
            .with_phase_range(SweepRange::new(2.0, 3.0, 10).unwrap());
        let (magnitude, phase) = Simulation::with_config(config).bode(&params()).unwrap();

        assert_eq!(magnitude.len(), 31);
        assert_eq!(phase.len(), 11);
        assert_eq!(magnitude.log10_frequencies[0], 1.0);
        assert_eq!(phase.log10_frequencies[0], 2.0);
    }

    #[test]
    fn test_run_does_not_mutate_inputs() {
        let p = params();
        let input = Waveform::new(Shape::Square, 500.0).generate(0.005, 50_000.0).unwrap();
        let before = input.clone();
        let sim = Simulation::new();
        let a = sim.run(&p, &input).unwrap();
        let b = sim.run(&p, &input).unwrap();
        assert_eq!(input, before);
        assert_eq!(a, b);
    }
}
