//! Block-averaging decimation
//!
//! The raw sensor rate (hundreds of hertz) is both too fast and too noisy
//! to integrate directly. Averaging fixed-size blocks of consecutive
//! samples downsamples and smooths in one step: with a factor of 20, a
//! 500 Hz stream becomes a 25 Hz stream of block means.

use nalgebra::Vector3;

/// Accumulates raw samples and emits one averaged sample per block
#[derive(Debug, Clone)]
pub struct Decimator {
    factor: u32,
    sum: Vector3<f64>,
    count: u32,
}

impl Decimator {
    /// Create a decimator that averages blocks of `factor` samples
    pub fn new(factor: u32) -> Self {
        Self {
            factor,
            sum: Vector3::zeros(),
            count: 0,
        }
    }

    /// Add one raw sample to the current block
    ///
    /// Returns the block mean when the block fills, `None` otherwise. The
    /// caller must not advance integration on a `None` tick.
    pub fn accumulate(&mut self, accel: Vector3<f64>) -> Option<Vector3<f64>> {
        self.sum += accel;
        self.count += 1;

        if self.count < self.factor {
            return None;
        }

        let average = self.sum / f64::from(self.factor);
        self.sum = Vector3::zeros();
        self.count = 0;
        Some(average)
    }

    /// Discard the partially accumulated block
    pub fn reset(&mut self) {
        self.sum = Vector3::zeros();
        self.count = 0;
    }
}
