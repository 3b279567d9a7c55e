//! Engineering notation for component values.
//!
//! Values like `10k`, `4.7u` or `100n` are accepted wherever the CLI or the
//! WASM bindings take a resistance, inductance or capacitance.

use crate::error::{RlcError, Result};

/// SI prefixes used when formatting, largest first.
const PREFIXES: [(f64, &str); 8] = [
    (1e9, "G"),
    (1e6, "M"),
    (1e3, "k"),
    (1.0, ""),
    (1e-3, "m"),
    (1e-6, "µ"),
    (1e-9, "n"),
    (1e-12, "p"),
];

/// Parse a number string with optional unit suffix.
///
/// Recognized suffixes: `p`, `n`, `u`/`µ`, `m`, `k`/`K`, `M`, `G`.
pub fn parse_value(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let invalid = || RlcError::InvalidValue {
        text: text.to_string(),
    };

    let last = trimmed.chars().last().ok_or_else(invalid)?;
    let multiplier = match last {
        'p' => 1e-12,
        'n' => 1e-9,
        'u' | 'µ' => 1e-6,
        'm' => 1e-3,
        'k' | 'K' => 1e3,
        'M' => 1e6,
        'G' => 1e9,
        _ => 1.0,
    };
    let num_str = if multiplier != 1.0 {
        &trimmed[..trimmed.len() - last.len_utf8()]
    } else {
        trimmed
    };

    let value = num_str.parse::<f64>().map_err(|_| invalid())? * multiplier;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid())
    }
}

/// Format a value with an SI prefix and unit, e.g. `4.7µF` or `10kΩ`.
pub fn format_value(value: f64, unit: &str) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}{}", value, unit);
    }

    let magnitude = value.abs();
    let (scale, prefix) = PREFIXES
        .iter()
        .copied()
        .find(|(scale, _)| magnitude >= *scale)
        .unwrap_or(PREFIXES[PREFIXES.len() - 1]);

    let mut digits = format!("{:.3}", value / scale);
    if digits.contains('.') {
        let keep = digits.trim_end_matches('0').trim_end_matches('.').len();
        digits.truncate(keep);
    }
    format!("{}{}{}", digits, prefix, unit)
}
