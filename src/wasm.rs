//! WASM bindings for RLC Lab.
//!
//! This module provides JavaScript-friendly bindings so the browser UI can
//! recompute plots and audio whenever a slider moves.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmRlcLab, snap_value } from 'rlc_lab';
//!
//! await init();
//!
//! const lab = new WasmRlcLab(50, 0.01, 1e-6, 0, 0);
//!
//! // Audio buffer from a decoded clip, played back at the same rate
//! const vc = lab.simulate_block(clip.getChannelData(0), clip.sampleRate, 'vc');
//!
//! // Bode plot: [log10_f..., R_db..., L_db..., C_db...]
//! const mag = lab.bode_magnitude(0, 5, 500);
//!
//! const r = snap_value('r', 14000); // 13000
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{validate_frequency_parameters, CircuitParameters, ComponentKind, Probe};
use crate::error::RlcError;
use crate::simulation::Simulation;
use crate::solver::{sweep, FrequencySweep, SweepRange};
use crate::sources::{InputSignal, Shape, Waveform};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: RlcError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-compatible RLC circuit engine.
///
/// Holds one validated parameter set. Every call is a full recompute; build
/// a new instance when the user changes a component value.
#[wasm_bindgen]
pub struct WasmRlcLab {
    params: CircuitParameters,
}

#[wasm_bindgen]
impl WasmRlcLab {
    /// Create an engine for the given component values and initial state.
    ///
    /// L = 0 is accepted so an RC loop can be plotted; the time-domain
    /// methods reject it.
    ///
    /// # Returns
    /// A new `WasmRlcLab` or an error if the parameters are invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(r: f64, l: f64, c: f64, vc0: f64, i0: f64) -> Result<WasmRlcLab, JsValue> {
        let params = CircuitParameters::new(r, l, c).with_initial_state(vc0, i0);
        validate_frequency_parameters(&params).map_err(to_js)?;
        Ok(WasmRlcLab { params })
    }

    /// Simulate an input block and return the requested signal
    /// (`vin`, `i`, `vr`, `vl` or `vc`) at the input sample rate.
    #[wasm_bindgen]
    pub fn simulate_block(&self, input: &[f32], sample_rate: f64, probe: &str) -> Result<Vec<f32>, JsValue> {
        let probe = Probe::parse(probe).map_err(to_js)?;
        let signal = InputSignal::from_audio(input, sample_rate).map_err(to_js)?;
        let result = Simulation::new()
            .transient(&self.params, &signal)
            .map_err(to_js)?;

        let out = result.get(probe).unwrap_or(signal.samples());
        Ok(out.iter().map(|&v| v as f32).collect())
    }

    /// Decimated time-domain trace for a generated waveform, flattened as
    /// `[time..., vin..., i..., vR..., vL..., vC...]`.
    #[wasm_bindgen]
    pub fn display_trace(
        &self,
        shape: &str,
        frequency: f64,
        amplitude: f64,
        duration: f64,
        sample_rate: f64,
    ) -> Result<Vec<f64>, JsValue> {
        let shape = Shape::parse(shape).map_err(to_js)?;
        let signal = Waveform::new(shape, frequency)
            .with_amplitude(amplitude)
            .generate(duration, sample_rate)
            .map_err(to_js)?;
        let report = Simulation::new().run(&self.params, &signal).map_err(to_js)?;

        let t = report.trace;
        Ok([t.time, t.input, t.current, t.v_r, t.v_l, t.v_c].concat())
    }

    /// Magnitude sweep flattened as `[log10_f..., R_db..., L_db..., C_db...]`.
    #[wasm_bindgen]
    pub fn bode_magnitude(&self, p_min: f64, p_max: f64, intervals: usize) -> Result<Vec<f64>, JsValue> {
        let sweep = self.sweep(p_min, p_max, intervals)?;
        Ok([
            sweep.log10_frequencies,
            sweep.resistor.magnitude_db,
            sweep.inductor.magnitude_db,
            sweep.capacitor.magnitude_db,
        ]
        .concat())
    }

    /// Phase sweep flattened as `[log10_f..., R_deg..., L_deg..., C_deg...]`.
    #[wasm_bindgen]
    pub fn bode_phase(&self, p_min: f64, p_max: f64, intervals: usize) -> Result<Vec<f64>, JsValue> {
        let sweep = self.sweep(p_min, p_max, intervals)?;
        Ok([
            sweep.log10_frequencies,
            sweep.resistor.phase_deg,
            sweep.inductor.phase_deg,
            sweep.capacitor.phase_deg,
        ]
        .concat())
    }

    /// Undamped resonant frequency in Hz.
    #[wasm_bindgen(getter)]
    pub fn resonant_frequency(&self) -> f64 {
        self.params.resonant_frequency()
    }

    /// Quality factor of the loop.
    #[wasm_bindgen(getter)]
    pub fn quality_factor(&self) -> f64 {
        self.params.quality_factor()
    }
}

impl WasmRlcLab {
    fn sweep(&self, p_min: f64, p_max: f64, intervals: usize) -> Result<FrequencySweep, JsValue> {
        let range = SweepRange::new(p_min, p_max, intervals).map_err(to_js)?;
        let p = &self.params;
        sweep(&range, p.r, p.l, p.c).map_err(to_js)
    }
}

/// Snap an SI value to the nearest standard value for kind `r`, `l` or `c`.
#[wasm_bindgen]
pub fn snap_value(kind: &str, value: f64) -> Result<f64, JsValue> {
    let kind = ComponentKind::from_str(kind).ok_or_else(|| {
        to_js(RlcError::UnknownComponent {
            name: kind.to_string(),
        })
    })?;
    kind.snap(value).map_err(to_js)
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the default synthetic sample rate.
#[wasm_bindgen]
pub fn default_sample_rate() -> f64 {
    crate::DEFAULT_SAMPLE_RATE
}
