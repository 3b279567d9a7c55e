//! Decimation of dense solver output to a fixed number of plot points.
//!
//! Each input class has a fixed stride and point count chosen so that, at
//! the class's nominal sample rate, the plot spans a fixed window: 10 ms for
//! synthetic waveforms and 20 s for audio.

use serde::Serialize;

use crate::solver::SimulationResult;
use crate::sources::InputClass;

/// Nominal number of points per plotted trace.
pub const DISPLAY_POINTS: usize = 500;

/// Stride and point count for one input class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayPolicy {
    /// Sample rate the stride was chosen for (Hz)
    pub nominal_sample_rate: f64,
    /// Keep every `stride`-th sample
    pub stride: usize,
    /// Maximum number of points kept
    pub points: usize,
}

/// 500 × 1 samples at 50 kHz = 10 ms
static SHORT_SYNTHETIC_POLICY: DisplayPolicy = DisplayPolicy {
    nominal_sample_rate: 50_000.0,
    stride: 1,
    points: DISPLAY_POINTS,
};

/// 500 × 1764 samples at 44.1 kHz = 20 s
static LONG_AUDIO_POLICY: DisplayPolicy = DisplayPolicy {
    nominal_sample_rate: 44_100.0,
    stride: 1764,
    points: DISPLAY_POINTS,
};

impl DisplayPolicy {
    /// Policy for an input class.
    pub fn for_class(class: InputClass) -> &'static DisplayPolicy {
        match class {
            InputClass::ShortSynthetic => &SHORT_SYNTHETIC_POLICY,
            InputClass::LongAudio => &LONG_AUDIO_POLICY,
        }
    }

    /// Number of input samples the full window covers.
    pub fn window_samples(&self) -> usize {
        self.stride * self.points
    }

    /// Window duration in seconds at the nominal sample rate.
    pub fn nominal_window(&self) -> f64 {
        self.window_samples() as f64 / self.nominal_sample_rate
    }

    /// Number of points a sequence of `len` samples decimates to.
    pub fn point_count(&self, len: usize) -> usize {
        len.div_ceil(self.stride.max(1)).min(self.points)
    }
}

/// Keep samples 0, stride, 2·stride, ... up to `points` of them.
pub fn decimate(samples: &[f64], stride: usize, points: usize) -> Vec<f64> {
    samples
        .iter()
        .step_by(stride.max(1))
        .take(points)
        .copied()
        .collect()
}

/// Decimated, index-aligned traces ready for plotting against time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayTrace {
    /// Time of each point in seconds
    pub time: Vec<f64>,
    pub input: Vec<f64>,
    pub current: Vec<f64>,
    pub v_r: Vec<f64>,
    pub v_l: Vec<f64>,
    pub v_c: Vec<f64>,
}

impl DisplayTrace {
    /// Decimate the input and every result sequence with `policy`.
    pub fn build(
        input: &[f64],
        result: &SimulationResult,
        sample_rate: f64,
        policy: &DisplayPolicy,
    ) -> Self {
        let stride = policy.stride.max(1);
        let points = policy.points;
        let n = policy.point_count(input.len());

        Self {
            time: (0..n).map(|k| (k * stride) as f64 / sample_rate).collect(),
            input: decimate(input, stride, points),
            current: decimate(&result.current, stride, points),
            v_r: decimate(&result.v_r, stride, points),
            v_l: decimate(&result.v_l, stride, points),
            v_c: decimate(&result.v_c, stride, points),
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// True if there are no points.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_policy_windows() {
        let short = DisplayPolicy::for_class(InputClass::ShortSynthetic);
        assert_relative_eq!(short.nominal_window(), 0.010, max_relative = 1e-12);
        assert_eq!(short.points, DISPLAY_POINTS);

        let long = DisplayPolicy::for_class(InputClass::LongAudio);
        assert_relative_eq!(long.nominal_window(), 20.0, max_relative = 1e-12);
        assert_eq!(long.points, DISPLAY_POINTS);
        assert_eq!(long.stride, 1764);
        assert_eq!(long.nominal_sample_rate, 44_100.0);
        assert_eq!(short.stride, 1);
        assert_eq!(short.nominal_sample_rate, 50_000.0);
    }

    #[test]
    fn test_decimate() {
        let data: Vec<f64> = (0..10).map(|k| k as f64).collect();
        assert_eq!(decimate(&data, 3, 100), vec![0.0, 3.0, 6.0, 9.0]);
        assert_eq!(decimate(&data, 2, 3), vec![0.0, 2.0, 4.0]);
        assert_eq!(decimate(&data, 1, 4), vec![0.0, 1.0, 2.0, 3.0]);
        assert!(decimate(&[], 5, 10).is_empty());
    }

    #[test]
    fn test_point_count() {
        let policy = DisplayPolicy {
            nominal_sample_rate: 1000.0,
            stride: 4,
            points: 5,
        };
        assert_eq!(policy.point_count(0), 0);
        assert_eq!(policy.point_count(1), 1);
        assert_eq!(policy.point_count(9), 3);
        assert_eq!(policy.point_count(1000), 5);
    }

    #[test]
    fn test_trace_alignment() {
        let policy = DisplayPolicy {
            nominal_sample_rate: 1000.0,
            stride: 2,
            points: 3,
        };
        let input = vec![1.0; 7];
        let result = SimulationResult {
            current: (0..7).map(|k| k as f64).collect(),
            v_r: (0..7).map(|k| 10.0 * k as f64).collect(),
            v_l: vec![0.0; 7],
            v_c: vec![0.5; 7],
        };
        let trace = DisplayTrace::build(&input, &result, 1000.0, &policy);

        assert_eq!(trace.len(), 3);
        assert_eq!(trace.time, vec![0.0, 0.002, 0.004]);
        assert_eq!(trace.current, vec![0.0, 2.0, 4.0]);
        assert_eq!(trace.v_r, vec![0.0, 20.0, 40.0]);
        assert_eq!(trace.input.len(), 3);
        assert_eq!(trace.v_c.len(), 3);
    }
}
