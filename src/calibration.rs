//! Stationary-window bias and noise estimation
//!
//! The engine starts uncalibrated and routes every incoming sample here
//! until a fixed-size window has been collected. The window yields a
//! per-axis bias (mean) and noise figure (population standard deviation);
//! the bias is subtracted from every subsequent reading before it enters
//! the processing pipeline.

use log::info;
use nalgebra::Vector3;

use crate::math::{mean, population_std_dev, sliding_median};
use crate::types::{AXES, CalibrationMode, CalibrationResult, Sample};

/// Window width of the optional median prefilter
const MEDIAN_PREFILTER_TAPS: usize = 7;

/// Outcome of feeding one sample to the calibrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationStatus {
    /// The window is still filling; the sample was consumed
    Collecting,
    /// This sample completed the window; statistics are ready
    Completed(CalibrationResult),
}

/// Accumulates a fixed window of raw samples and computes statistics once
///
/// The buffer is bounded by the configured capacity and cleared as soon as
/// the statistics are computed, so a subsequent recalibration starts from
/// an empty window.
#[derive(Debug, Clone)]
pub struct Calibrator {
    capacity: usize,
    mode: CalibrationMode,
    window: Vec<Vector3<f64>>,
}

impl Calibrator {
    /// Create a calibrator for a window of `capacity` raw samples
    pub fn new(capacity: usize, mode: CalibrationMode) -> Self {
        Self {
            capacity,
            mode,
            window: Vec::with_capacity(capacity),
        }
    }

    /// Append a raw sample to the calibration window
    ///
    /// Returns [`CalibrationStatus::Completed`] exactly once, for the
    /// sample that fills the window; the window is reset at that point so
    /// the next sample is not re-added here.
    pub fn feed(&mut self, sample: &Sample) -> CalibrationStatus {
        self.window.push(sample.accel);

        if self.window.len() < self.capacity {
            return CalibrationStatus::Collecting;
        }

        let result = self.compute();
        self.window.clear();
        info!(
            "calibration completed over {} samples: bias=({:.5}, {:.5}, {:.5}) stddev=({:.5}, {:.5}, {:.5})",
            self.capacity,
            result.bias.x,
            result.bias.y,
            result.bias.z,
            result.stddev.x,
            result.stddev.y,
            result.stddev.z,
        );
        CalibrationStatus::Completed(result)
    }

    fn compute(&self) -> CalibrationResult {
        let mut bias = Vector3::zeros();
        let mut stddev = Vector3::zeros();

        for axis in 0..AXES {
            let column: Vec<f64> = self.window.iter().map(|accel| accel[axis]).collect();
            let column = match self.mode {
                CalibrationMode::Plain => column,
                CalibrationMode::MedianPrefiltered => {
                    sliding_median(&column, MEDIAN_PREFILTER_TAPS)
                }
            };
            let m = mean(&column);
            bias[axis] = m;
            stddev[axis] = population_std_dev(&column, m);
        }

        CalibrationResult { bias, stddev }
    }

    /// Number of samples collected and the window capacity
    pub fn progress(&self) -> (usize, usize) {
        (self.window.len(), self.capacity)
    }

    /// Discard any partially collected window
    pub fn reset(&mut self) {
        self.window.clear();
    }
}
