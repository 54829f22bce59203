//! Trapezoidal double integration of acceleration
//!
//! Each tracked axis carries its previous acceleration, velocity, and
//! position; one decimated sample advances all three using the trapezoidal
//! rule. The time step is the fixed nominal block interval from the
//! engine settings, not a measured interval.

/// Integration and zero-run state for one axis
///
/// Owned by the engine and mutated once per decimated sample by the
/// zero-velocity detector and the integrator, in that order.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisState {
    /// Acceleration from the previous decimated sample
    pub prev_accel: f64,
    /// Velocity after the previous integration step
    pub prev_vel: f64,
    /// Position after the previous integration step
    pub prev_pos: f64,
    /// Consecutive deadbanded-to-zero samples observed on this axis
    pub zero_run: u32,
}

impl AxisState {
    /// Return the axis to rest at the origin
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Advance one axis by one decimated sample
///
/// Trapezoidal rule in both stages: velocity integrates the average of the
/// previous and current acceleration, position the average of the previous
/// and new velocity.
///
/// # Arguments
/// * `state` - Axis state, updated in place for the next call
/// * `accel` - Deadbanded, bias-corrected acceleration for this tick
/// * `dt` - Nominal elapsed time since the previous decimated sample
///
/// # Returns
/// The new `(velocity, position)` pair.
pub fn step(state: &mut AxisState, accel: f64, dt: f64) -> (f64, f64) {
    let vel = state.prev_vel + (state.prev_accel + (accel - state.prev_accel) * 0.5) * dt;
    let pos = state.prev_pos + (state.prev_vel + (vel - state.prev_vel) * 0.5) * dt;

    state.prev_accel = accel;
    state.prev_vel = vel;
    state.prev_pos = pos;

    (vel, pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_step_trapezoid() {
        let mut state = AxisState::default();
        let (vel, pos) = step(&mut state, 1.0, 0.1);

        // From rest: vel = 0.5 * (0 + 1) * 0.1, pos = 0.5 * (0 + vel) * 0.1
        assert!((vel - 0.05).abs() < 1e-12);
        assert!((pos - 0.0025).abs() < 1e-12);
        assert_eq!(state.prev_accel, 1.0);
        assert_eq!(state.prev_vel, vel);
        assert_eq!(state.prev_pos, pos);
    }

    #[test]
    fn test_constant_acceleration_closed_form() {
        let accel = 2.0;
        let dt = 0.04;
        let steps = 250; // 10 seconds
        let mut state = AxisState::default();

        let mut vel = 0.0;
        let mut pos = 0.0;
        for _ in 0..steps {
            (vel, pos) = step(&mut state, accel, dt);
        }

        let total_time = steps as f64 * dt;
        // Velocity lags the continuous solution by exactly half a step
        // because the first trapezoid starts from zero acceleration.
        let expected_vel = accel * total_time;
        assert!((vel - expected_vel).abs() < accel * dt);
        // Position matches 0.5 * a * t^2 within the same discretization error
        let expected_pos = 0.5 * accel * total_time * total_time;
        assert!((pos - expected_pos).abs() < accel * total_time * dt);
    }

    #[test]
    fn test_zero_acceleration_coasts() {
        let mut state = AxisState {
            prev_accel: 0.0,
            prev_vel: 3.0,
            prev_pos: 1.0,
            zero_run: 0,
        };
        let (vel, pos) = step(&mut state, 0.0, 0.5);

        // Velocity is unchanged; position advances linearly
        assert_eq!(vel, 3.0);
        assert!((pos - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_reset_returns_to_rest() {
        let mut state = AxisState::default();
        step(&mut state, 5.0, 0.1);
        state.zero_run = 3;

        state.reset();
        assert_eq!(state.prev_accel, 0.0);
        assert_eq!(state.prev_vel, 0.0);
        assert_eq!(state.prev_pos, 0.0);
        assert_eq!(state.zero_run, 0);
    }
}
