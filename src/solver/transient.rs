//! Fixed-step time-domain solver.
//!
//! The loop is described by charge q on the capacitor and loop current i:
//!
//! ```text
//! dq/dt = i
//! di/dt = (v_in - R·i - q/C) / L
//! ```
//!
//! and integrated with Heun's method (explicit trapezoidal predictor-corrector)
//! at dt = 1/sample_rate. There is no error control: the local truncation
//! error is O(dt³), which is small at audio sample rates as long as
//! ω₀·dt stays well below 1, but the result is an approximation.

use serde::Serialize;

use crate::circuit::{CircuitParameters, Probe};

/// How the inductor voltage is derived for each sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum InductorVoltage {
    /// vL = L·di/dt, with di/dt re-evaluated at the corrected state.
    #[default]
    Derivative,
    /// vL = v_in - vR - vC (Kirchhoff's voltage law around the loop).
    Kirchhoff,
}

/// Current and component voltages, index-aligned with the input samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Loop current (A)
    pub current: Vec<f64>,
    /// Resistor voltage, always exactly R·current (V)
    pub v_r: Vec<f64>,
    /// Inductor voltage (V)
    pub v_l: Vec<f64>,
    /// Capacitor voltage (V)
    pub v_c: Vec<f64>,
}

impl SimulationResult {
    fn with_capacity(n: usize) -> Self {
        Self {
            current: Vec::with_capacity(n),
            v_r: Vec::with_capacity(n),
            v_l: Vec::with_capacity(n),
            v_c: Vec::with_capacity(n),
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// True when the input was empty.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Sequence for a probe. The input is not part of the result.
    pub fn get(&self, probe: Probe) -> Option<&[f64]> {
        match probe {
            Probe::Input => None,
            Probe::Current => Some(&self.current),
            Probe::Resistor => Some(&self.v_r),
            Probe::Inductor => Some(&self.v_l),
            Probe::Capacitor => Some(&self.v_c),
        }
    }
}

/// Integrate the circuit over `input`, one step per sample.
///
/// `r`, `l` and `c` must already be validated (R > 0, L > 0, C > 0, all
/// finite); nothing is re-checked here and invalid values propagate as
/// NaN or infinity. The output has exactly `input.len()` samples.
pub fn solve(
    input: &[f64],
    r: f64,
    l: f64,
    c: f64,
    vc0: f64,
    i0: f64,
    sample_rate: f64,
) -> SimulationResult {
    let params = CircuitParameters {
        r,
        l,
        c,
        vc0,
        i0,
    };
    solve_with(input, &params, sample_rate, InductorVoltage::Derivative)
}

/// Same as [`solve`], taking a parameter set and an inductor voltage mode.
pub fn solve_with(
    input: &[f64],
    params: &CircuitParameters,
    sample_rate: f64,
    mode: InductorVoltage,
) -> SimulationResult {
    let mut result = SimulationResult::with_capacity(input.len());
    let Some((&first, rest)) = input.split_first() else {
        return result;
    };

    let CircuitParameters { r, l, c, vc0, i0 } = *params;
    let dt = 1.0 / sample_rate;
    let half_dt = 0.5 * dt;
    let inv_l = 1.0 / l;
    let di_dt = |v_in: f64, q: f64, i: f64| inv_l * (v_in - r * i - q / c);

    let mut record = |v_in: f64, q: f64, i: f64, di: f64| {
        let v_r = r * i;
        let v_c = q / c;
        let v_l = match mode {
            InductorVoltage::Derivative => l * di,
            InductorVoltage::Kirchhoff => v_in - v_r - v_c,
        };
        result.current.push(i);
        result.v_r.push(v_r);
        result.v_l.push(v_l);
        result.v_c.push(v_c);
    };

    // First sample is the initial state, not an integration step
    let mut q = c * vc0;
    let mut i = i0;
    record(first, q, i, di_dt(first, q, i));

    for &v_in in rest {
        // Predictor (explicit Euler)
        let di = di_dt(v_in, q, i);
        let q_pred = q + i * dt;
        let i_pred = i + di * dt;

        // Corrector (trapezoidal average of the two slopes)
        let di_pred = di_dt(v_in, q_pred, i_pred);
        q += (i + i_pred) * half_dt;
        i += (di + di_pred) * half_dt;

        record(v_in, q, i, di_dt(v_in, q, i));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_zero_input_gives_zero_output() {
        let input = vec![0.0; 10];
        let res = solve(&input, 100.0, 0.01, 0.0001, 0.0, 0.0, 1000.0);

        assert_eq!(res.len(), 10);
        for seq in [&res.current, &res.v_r, &res.v_l, &res.v_c] {
            assert_eq!(seq.len(), 10);
            assert!(seq.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_empty_input() {
        let res = solve(&[], 100.0, 0.01, 0.0001, 1.0, 0.5, 1000.0);
        assert!(res.is_empty());
        assert!(res.v_c.is_empty() && res.v_l.is_empty() && res.v_r.is_empty());
    }

    #[test]
    fn test_output_length_matches_input() {
        for n in [0usize, 1, 2, 7, 1000] {
            let input: Vec<f64> = (0..n).map(|k| (k as f64 * 0.1).sin()).collect();
            let res = solve(&input, 47.0, 0.02, 2.2e-6, 0.3, -0.01, 44_100.0);
            assert_eq!(res.len(), n);
            assert_eq!(res.v_r.len(), n);
            assert_eq!(res.v_l.len(), n);
            assert_eq!(res.v_c.len(), n);
        }
    }

    #[test]
    fn test_resistor_voltage_is_exactly_r_times_current() {
        let r = 33.0;
        let input: Vec<f64> = (0..2000)
            .map(|k| if (k / 50) % 2 == 0 { 1.0 } else { -0.7 })
            .collect();
        let res = solve(&input, r, 0.005, 1e-6, 0.2, 0.01, 48_000.0);

        for (v_r, i) in res.v_r.iter().zip(&res.current) {
            assert_eq!(*v_r, r * *i);
        }
    }

    #[test]
    fn test_unit_step_charges_capacitor() {
        let input = vec![1.0; 5000];
        let res = solve(&input, 10.0, 0.001, 1e-6, 0.0, 0.0, 50_000.0);

        let v_end = res.v_c[4999];
        assert!((v_end - 1.0).abs() < 0.01, "vC[4999] = {v_end}");
    }

    #[test]
    fn test_step_response_tracks_closed_form() {
        // Underdamped: α = R/2L = 5000, ω₀ = 1/√(LC) ≈ 31623 rad/s
        let (r, l, c) = (10.0, 0.001, 1e-6);
        let sample_rate = 1_000_000.0;
        let input = vec![1.0; 1000];
        let res = solve(&input, r, l, c, 0.0, 0.0, sample_rate);

        let alpha = r / (2.0 * l);
        let omega_d = (1.0 / (l * c) - alpha * alpha).sqrt();
        for (k, &v_c) in res.v_c.iter().enumerate() {
            let t = k as f64 / sample_rate;
            let exact = 1.0
                - (-alpha * t).exp() * ((omega_d * t).cos() + alpha / omega_d * (omega_d * t).sin());
            assert_abs_diff_eq!(v_c, exact, epsilon = 0.01);
        }
    }

    #[test]
    fn test_initial_sample_is_initial_state() {
        let (r, l, c) = (100.0, 0.01, 1e-4);
        let res = solve(&[0.5, 0.5], r, l, c, 2.0, 0.1, 1000.0);

        assert_relative_eq!(res.v_c[0], 2.0, max_relative = 1e-12);
        assert_eq!(res.current[0], 0.1);
        // vL(0) = L·(v_in - R·i0 - vC0)/L
        assert_relative_eq!(res.v_l[0], 0.5 - r * 0.1 - 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_single_step_uses_current_input_sample() {
        // dt = 1 ms; step 1 integrates with v_in[1] = 1.0, not v_in[0] = 0.3
        let (r, l, c) = (10.0, 0.01, 1e-4);
        let (vc0, i0) = (0.5, 0.02);
        let dt = 1e-3;
        let v_in = 1.0;
        let di_dt = |q: f64, i: f64| (v_in - r * i - q / c) / l;

        let q0 = c * vc0;
        let di0 = di_dt(q0, i0);
        let q_pred = q0 + i0 * dt;
        let i_pred = i0 + di0 * dt;
        let q1 = q0 + 0.5 * dt * (i0 + i_pred);
        let i1 = i0 + 0.5 * dt * (di0 + di_dt(q_pred, i_pred));
        let v_l1 = l * di_dt(q1, i1);

        // Worked by hand: di0 = 30, i_pred = 0.05, di_pred = -20
        assert_abs_diff_eq!(q1, 8.5e-5, epsilon = 1e-15);
        assert_abs_diff_eq!(i1, 0.025, epsilon = 1e-12);
        assert_abs_diff_eq!(v_l1, -0.1, epsilon = 1e-9);

        let res = solve(&[0.3, v_in], r, l, c, vc0, i0, 1000.0);
        assert_abs_diff_eq!(res.v_c[1], q1 / c, epsilon = 1e-12);
        assert_abs_diff_eq!(res.current[1], i1, epsilon = 1e-12);
        assert_abs_diff_eq!(res.v_r[1], r * i1, epsilon = 1e-12);
        assert_abs_diff_eq!(res.v_l[1], v_l1, epsilon = 1e-9);
    }

    #[test]
    fn test_charged_capacitor_discharges() {
        let input = vec![0.0; 20_000];
        let res = solve(&input, 1000.0, 0.01, 1e-6, 5.0, 0.0, 100_000.0);

        assert_relative_eq!(res.v_c[0], 5.0, max_relative = 1e-12);
        assert!(res.v_c[19_999].abs() < 1e-3);
        // Discharge current flows against the capacitor voltage
        assert!(res.current[10] < 0.0);
    }

    #[test]
    fn test_kirchhoff_mode_closes_the_loop() {
        let input: Vec<f64> = (0..500).map(|k| (k as f64 * 0.05).sin()).collect();
        let params = CircuitParameters::new(22.0, 0.002, 4.7e-6);
        let kvl = solve_with(&input, &params, 48_000.0, InductorVoltage::Kirchhoff);

        for k in 0..input.len() {
            assert_abs_diff_eq!(
                kvl.v_r[k] + kvl.v_l[k] + kvl.v_c[k],
                input[k],
                epsilon = 1e-12
            );
        }

        // Only vL differs between the two modes
        let deriv = solve_with(&input, &params, 48_000.0, InductorVoltage::Derivative);
        assert_eq!(deriv.current, kvl.current);
        assert_eq!(deriv.v_c, kvl.v_c);
        for k in 0..input.len() {
            assert_abs_diff_eq!(deriv.v_l[k], kvl.v_l[k], epsilon = 1e-9);
        }
    }

    #[test]
    fn test_deterministic() {
        let input: Vec<f64> = (0..300).map(|k| ((k * 7) % 13) as f64 - 6.0).collect();
        let a = solve(&input, 10.0, 0.01, 1e-5, 0.0, 0.0, 8000.0);
        let b = solve(&input, 10.0, 0.01, 1e-5, 0.0, 0.0, 8000.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_probe_lookup() {
        let res = solve(&[1.0, 1.0], 10.0, 0.01, 1e-5, 0.0, 0.0, 8000.0);
        assert_eq!(res.get(Probe::Capacitor), Some(res.v_c.as_slice()));
        assert_eq!(res.get(Probe::Current), Some(res.current.as_slice()));
        assert_eq!(res.get(Probe::Input), None);
    }
}
