//! Zero-velocity updates (ZUPT)
//!
//! Double-integrating a noisy, biased accelerometer accumulates unbounded
//! velocity and position drift within seconds. This detector counts
//! consecutive deadbanded-to-zero samples per axis and, after a sustained
//! run, clamps that axis's velocity to zero. It is a heuristic, not a true
//! stationarity detector; occasional false positives and negatives are an
//! accepted limitation in exchange for bounded drift at rest.

use crate::integration::AxisState;

/// Apply one zero/nonzero observation to an axis
///
/// A nonzero observation resets the run counter. A zero observation
/// extends it, and once the run reaches `run_length` the axis velocity is
/// forced to zero and the counter starts over. Position is left alone;
/// only the velocity drift is corrected.
pub fn apply(state: &mut AxisState, is_zero: bool, run_length: u32) {
    if !is_zero {
        state.zero_run = 0;
        return;
    }

    state.zero_run += 1;
    if state.zero_run >= run_length {
        state.prev_vel = 0.0;
        state.zero_run = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_velocity_after_run() {
        let mut state = AxisState {
            prev_accel: 0.0,
            prev_vel: 1.75,
            prev_pos: 0.4,
            zero_run: 0,
        };

        // Run length 3: two zeros keep the velocity, the third clamps it
        apply(&mut state, true, 3);
        apply(&mut state, true, 3);
        assert_eq!(state.prev_vel, 1.75);
        assert_eq!(state.zero_run, 2);

        apply(&mut state, true, 3);
        assert_eq!(state.prev_vel, 0.0);
        assert_eq!(state.zero_run, 0);
        // Position is never touched
        assert_eq!(state.prev_pos, 0.4);
    }

    #[test]
    fn test_nonzero_resets_run() {
        let mut state = AxisState {
            prev_vel: 2.0,
            zero_run: 0,
            ..Default::default()
        };

        apply(&mut state, true, 3);
        apply(&mut state, true, 3);
        apply(&mut state, false, 3);
        assert_eq!(state.zero_run, 0);

        // The interrupted run must start over from scratch
        apply(&mut state, true, 3);
        apply(&mut state, true, 3);
        assert_eq!(state.prev_vel, 2.0);
    }

    #[test]
    fn test_run_length_one_clamps_immediately() {
        let mut state = AxisState {
            prev_vel: -0.5,
            ..Default::default()
        };
        apply(&mut state, true, 1);
        assert_eq!(state.prev_vel, 0.0);
    }

    #[test]
    fn test_asymmetric_run_lengths() {
        // Default engine tuning: X clamps after 2 zeros, Y after 4
        let mut x = AxisState {
            prev_vel: 1.0,
            ..Default::default()
        };
        let mut y = AxisState {
            prev_vel: 1.0,
            ..Default::default()
        };

        for _ in 0..2 {
            apply(&mut x, true, 2);
            apply(&mut y, true, 4);
        }
        assert_eq!(x.prev_vel, 0.0);
        assert_eq!(y.prev_vel, 1.0);

        for _ in 0..2 {
            apply(&mut y, true, 4);
        }
        assert_eq!(y.prev_vel, 0.0);
    }
}
