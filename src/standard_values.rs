//! Standard component values and nearest-value snapping.
//!
//! When the user drags a parameter slider, the raw value is snapped to the
//! closest entry of a fixed table of manufacturable magnitudes. Tables hold
//! dimensionless magnitudes spanning 10..1000; the caller applies the unit
//! scale (kΩ, mH, µF, ...).

/// E24 series over two decades, closed at 1000.
const E24_10_TO_1000: [f64; 49] = [
    10.0, 11.0, 12.0, 13.0, 15.0, 16.0, 18.0, 20.0, 22.0, 24.0, 27.0, 30.0, 33.0, 36.0, 39.0,
    43.0, 47.0, 51.0, 56.0, 62.0, 68.0, 75.0, 82.0, 91.0, 100.0, 110.0, 120.0, 130.0, 150.0,
    160.0, 180.0, 200.0, 220.0, 240.0, 270.0, 300.0, 330.0, 360.0, 390.0, 430.0, 470.0, 510.0,
    560.0, 620.0, 680.0, 750.0, 820.0, 910.0, 1000.0,
];

/// Standard resistance magnitudes.
pub static RESISTANCE: StandardValueTable = StandardValueTable::new(&E24_10_TO_1000);

/// Standard inductance magnitudes.
pub static INDUCTANCE: StandardValueTable = StandardValueTable::new(&E24_10_TO_1000);

/// Standard capacitance magnitudes.
pub static CAPACITANCE: StandardValueTable = StandardValueTable::new(&E24_10_TO_1000);

/// An immutable ascending table of standard magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardValueTable {
    values: &'static [f64],
}

impl StandardValueTable {
    /// Wrap an ascending, non-empty slice.
    pub const fn new(values: &'static [f64]) -> Self {
        assert!(!values.is_empty(), "standard value table must not be empty");
        Self { values }
    }

    /// The table entries, ascending.
    pub fn values(&self) -> &'static [f64] {
        self.values
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; tables are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The entry closest to `target`. Ties go to the smaller entry.
    pub fn nearest(&self, target: f64) -> f64 {
        nearest(self.values, target).unwrap_or(self.values[0])
    }

    /// Snap an SI value: divide by `scale`, resolve the nearest entry,
    /// multiply back.
    pub fn snap(&self, value: f64, scale: f64) -> f64 {
        self.nearest(value / scale) * scale
    }
}

/// Find the entry of an ascending table that minimizes |target - value|.
///
/// The scan keeps the first candidate and only replaces it on a strictly
/// smaller distance, so equidistant entries resolve to the lower index.
/// Returns `None` for an empty table.
pub fn nearest(table: &[f64], target: f64) -> Option<f64> {
    let (&first, rest) = table.split_first()?;
    let mut best = first;
    let mut best_distance = (target - first).abs();

    for &value in rest {
        let distance = (target - value).abs();
        if distance < best_distance {
            best = value;
            best_distance = distance;
        }
    }

    Some(best)
}
