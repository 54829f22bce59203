//! Per-axis deadband noise gate
//!
//! Decimated accelerations whose magnitude falls below an axis-specific
//! threshold are forced to exactly zero. The zero/nonzero signal is also
//! what the zero-velocity detector counts, so the gate doubles as the
//! stillness indicator for drift correction.

use nalgebra::Vector3;

use crate::types::AXES;

/// Gate a single axis value against its threshold
///
/// Returns the gated value and whether it was zeroed. Values at or above
/// the threshold pass through unchanged (identity); below it the result
/// is exactly `0.0`.
pub fn apply_axis(value: f64, threshold: f64) -> (f64, bool) {
    if value.abs() < threshold {
        (0.0, true)
    } else {
        (value, false)
    }
}

/// Per-axis deadband filter with fixed thresholds
///
/// Thresholds are fixed constants chosen empirically per axis, not derived
/// from the calibration stddev; a zero threshold disables the gate for
/// that axis.
#[derive(Debug, Clone, Copy)]
pub struct Deadband {
    thresholds: Vector3<f64>,
}

impl Deadband {
    /// Create a filter with the given per-axis thresholds
    pub fn new(thresholds: Vector3<f64>) -> Self {
        Self { thresholds }
    }

    /// Gate a decimated acceleration vector
    ///
    /// Returns the gated vector and a per-axis flag marking which axes
    /// were zeroed this tick.
    pub fn apply(&self, accel: Vector3<f64>) -> (Vector3<f64>, [bool; AXES]) {
        let mut gated = Vector3::zeros();
        let mut zeroed = [false; AXES];
        for axis in 0..AXES {
            let (value, is_zero) = apply_axis(accel[axis], self.thresholds[axis]);
            gated[axis] = value;
            zeroed[axis] = is_zero;
        }
        (gated, zeroed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_maps_to_exact_zero() {
        let (value, is_zero) = apply_axis(0.0249, 0.025);
        assert_eq!(value, 0.0);
        assert!(is_zero);

        let (value, is_zero) = apply_axis(-0.01, 0.025);
        assert_eq!(value, 0.0);
        assert!(is_zero);
    }

    #[test]
    fn test_above_threshold_is_identity() {
        let (value, is_zero) = apply_axis(0.3, 0.025);
        assert_eq!(value, 0.3);
        assert!(!is_zero);

        let (value, is_zero) = apply_axis(-1.5, 0.025);
        assert_eq!(value, -1.5);
        assert!(!is_zero);
    }

    #[test]
    fn test_threshold_boundary_is_exclusive() {
        // |value| == threshold passes through
        let (value, is_zero) = apply_axis(0.025, 0.025);
        assert_eq!(value, 0.025);
        assert!(!is_zero);
    }

    #[test]
    fn test_zero_threshold_disables_gate() {
        // Degenerate case from an all-identical calibration window
        let (value, is_zero) = apply_axis(1e-9, 0.0);
        assert_eq!(value, 1e-9);
        assert!(!is_zero);
    }

    #[test]
    fn test_vector_apply_gates_per_axis() {
        let filter = Deadband::new(Vector3::new(0.025, 0.04, 0.04));
        let (gated, zeroed) = filter.apply(Vector3::new(0.05, 0.03, -0.1));

        assert_eq!(gated, Vector3::new(0.05, 0.0, -0.1));
        assert_eq!(zeroed, [false, true, false]);
    }
}
