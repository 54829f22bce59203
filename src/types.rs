//! Core types and configuration for the dead-reckoning engine

use nalgebra::Vector3;

/// Number of sensor axes carried through the pipeline
pub const AXES: usize = 3;

/// A single timestamped accelerometer reading
///
/// Produced by the external transport and immutable once decoded. The
/// timestamp unit is whatever the transport delivers (the reference
/// transport sends nanoseconds); the engine never interprets it, so the
/// configured decimation/integration constants must match the chosen unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Raw acceleration per axis
    pub accel: Vector3<f64>,
    /// Sensor timestamp in transport units
    pub timestamp: f64,
}

impl Sample {
    /// Create a sample from a raw acceleration vector and timestamp
    pub fn new(accel: Vector3<f64>, timestamp: f64) -> Self {
        Self { accel, timestamp }
    }
}

/// Calibration strategy applied to the raw window before statistics
///
/// # Example
/// ```
/// use deadreckon::{CalibrationMode, EngineSettings};
///
/// let settings = EngineSettings {
///     calibration_mode: CalibrationMode::MedianPrefiltered,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalibrationMode {
    /// Per-axis mean and population standard deviation over the raw window
    #[default]
    Plain,
    /// A 7-tap sliding median is applied to each axis column first,
    /// suppressing outlier spikes before the statistics are computed
    MedianPrefiltered,
}

/// Per-axis bias and noise estimate produced by calibration
///
/// Computed once when the calibration window fills and immutable until
/// recalibration is explicitly requested.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalibrationResult {
    /// Constant sensor offset, subtracted from all subsequent readings
    pub bias: Vector3<f64>,
    /// Population standard deviation of the calibration window
    pub stddev: Vector3<f64>,
}

/// Dead-reckoning engine settings
///
/// All tuning constants of the pipeline. The defaults correspond to a
/// 500 Hz accelerometer decimated to 25 Hz, with the asymmetric per-axis
/// deadband and zero-velocity thresholds tuned for a handheld device held
/// flat (X is the quietest axis).
///
/// # Example
/// ```
/// use deadreckon::EngineSettings;
///
/// let settings = EngineSettings {
///     calibration_samples: 1000, // 2 s at 500 Hz
///     decimation_factor: 10,     // 500 Hz -> 50 Hz
///     block_interval: 0.02,      // must match the decimated rate
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    /// Size of the calibration window in raw samples
    pub calibration_samples: usize,
    /// Calibration strategy (plain or median-prefiltered statistics)
    pub calibration_mode: CalibrationMode,
    /// Number of raw samples averaged into one decimated sample
    pub decimation_factor: u32,
    /// Nominal duration of one decimation block in seconds
    ///
    /// Used as the fixed integration time step. The engine does not derive
    /// this from sample timestamps; decimation discards them, so the value
    /// must match `decimation_factor` divided by the real sensor rate.
    pub block_interval: f64,
    /// Per-axis deadband threshold; decimated accelerations below this
    /// magnitude are treated as zero
    pub deadband_threshold: Vector3<f64>,
    /// Per-axis count of consecutive zero samples after which the axis
    /// velocity is clamped to zero
    pub zupt_run_length: [u32; AXES],
    /// Axes whose velocity and position are integrated
    ///
    /// Calibration statistics and deadbanded acceleration are always
    /// computed and exposed for all axes; only integration is gated.
    pub tracked_axes: [bool; AXES],
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            calibration_samples: 2000,
            calibration_mode: CalibrationMode::default(),
            decimation_factor: 20,
            block_interval: 0.04,
            deadband_threshold: Vector3::new(0.025, 0.04, 0.04),
            zupt_run_length: [2, 4, 4],
            tracked_axes: [true, true, false],
        }
    }
}

/// Consistent, externally visible view of the engine
///
/// Published as a whole after every processed transport event, so the
/// acceleration, velocity, and position fields always belong to the same
/// processing tick.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSnapshot {
    /// Whether the calibration window has completed
    pub calibrated: bool,
    /// Estimated sensor bias (zero until calibrated)
    pub bias: Vector3<f64>,
    /// Estimated sensor noise (zero until calibrated)
    pub stddev: Vector3<f64>,
    /// Latest deadbanded, bias-corrected decimated acceleration
    pub accel: Vector3<f64>,
    /// Latest integrated velocity
    pub vel: Vector3<f64>,
    /// Latest integrated position
    pub pos: Vector3<f64>,
    /// Human-readable engine status for the display
    pub status: String,
}

impl Default for EngineSnapshot {
    fn default() -> Self {
        Self {
            calibrated: false,
            bias: Vector3::zeros(),
            stddev: Vector3::zeros(),
            accel: Vector3::zeros(),
            vel: Vector3::zeros(),
            pos: Vector3::zeros(),
            status: "waiting for samples".to_string(),
        }
    }
}

/// Transport connection lifecycle event
///
/// Updates the engine's status text only; calibration and integration
/// state are never touched, so the last snapshot stays valid ("frozen")
/// across a disconnect until the caller decides to recalibrate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// Transport connection established
    Opened,
    /// Transport connection closed
    Closed,
    /// Transport-level failure, with details for the status display
    Error(String),
}

/// Event delivered to the ingestion worker by the transport adapter
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// A decoded accelerometer sample
    Sample(Sample),
    /// A connection lifecycle change
    Connection(ConnectionEvent),
}
