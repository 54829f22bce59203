//! The dead-reckoning engine and its threaded ingestion handle
//!
//! [`Engine`] is the sequential pipeline: every arriving sample passes
//! through calibration or, once calibrated, through bias correction,
//! decimation, the deadband gate, zero-velocity detection, and double
//! integration. It has no internal concurrency and is the sole writer of
//! all pipeline state.
//!
//! [`EngineHandle`] wraps an `Engine` in a dedicated worker thread fed by
//! a channel, publishing a consistent [`EngineSnapshot`] after every event
//! for a renderer polling at its own frame rate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use log::{info, trace, warn};
use nalgebra::Vector3;

use crate::calibration::{CalibrationStatus, Calibrator};
use crate::deadband::Deadband;
use crate::decimation::Decimator;
use crate::integration::{self, AxisState};
use crate::types::{
    AXES, CalibrationResult, ConnectionEvent, EngineSettings, EngineSnapshot, Sample,
    TransportEvent,
};
use crate::zupt;

/// Sequential dead-reckoning pipeline
///
/// State machine: the engine starts uncalibrated and feeds every sample to
/// the calibrator; once the window completes it switches to tracking and
/// stays there until [`Engine::recalibrate`] is invoked.
///
/// # Example
/// ```
/// use deadreckon::{Engine, EngineSettings, Sample};
/// use nalgebra::Vector3;
///
/// let settings = EngineSettings {
///     calibration_samples: 4,
///     ..Default::default()
/// };
/// let mut engine = Engine::with_settings(settings);
///
/// for i in 0..4 {
///     engine.process(Sample::new(Vector3::zeros(), i as f64));
/// }
/// assert!(engine.is_calibrated());
/// ```
pub struct Engine {
    settings: EngineSettings,
    calibrator: Calibrator,
    decimator: Decimator,
    deadband: Deadband,
    axes: [AxisState; AXES],
    calibration: Option<CalibrationResult>,
    accel: Vector3<f64>,
    vel: Vector3<f64>,
    pos: Vector3<f64>,
    status: String,
}

impl Engine {
    /// Create an engine with default settings
    pub fn new() -> Self {
        Self::with_settings(EngineSettings::default())
    }

    /// Create an engine with the given settings
    pub fn with_settings(settings: EngineSettings) -> Self {
        Self {
            calibrator: Calibrator::new(settings.calibration_samples, settings.calibration_mode),
            decimator: Decimator::new(settings.decimation_factor),
            deadband: Deadband::new(settings.deadband_threshold),
            axes: [AxisState::default(); AXES],
            calibration: None,
            accel: Vector3::zeros(),
            vel: Vector3::zeros(),
            pos: Vector3::zeros(),
            status: "waiting for samples".to_string(),
            settings,
        }
    }

    /// Current engine settings
    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    /// Whether the calibration window has completed
    pub fn is_calibrated(&self) -> bool {
        self.calibration.is_some()
    }

    /// Process one incoming sample through the pipeline
    ///
    /// While uncalibrated the sample only feeds the calibration window;
    /// the sample that completes the window switches the engine to
    /// tracking, and the next sample is the first to be tracked.
    pub fn process(&mut self, sample: Sample) {
        match self.calibration {
            Some(calibration) => self.track(sample, calibration),
            None => match self.calibrator.feed(&sample) {
                CalibrationStatus::Completed(result) => {
                    self.calibration = Some(result);
                    self.status = "tracking".to_string();
                }
                CalibrationStatus::Collecting => {
                    let (collected, capacity) = self.calibrator.progress();
                    self.status = format!("calibrating {collected}/{capacity}");
                }
            },
        }
    }

    fn track(&mut self, sample: Sample, calibration: CalibrationResult) {
        let corrected = sample.accel - calibration.bias;

        let Some(block) = self.decimator.accumulate(corrected) else {
            return;
        };
        let (gated, zeroed) = self.deadband.apply(block);

        for axis in 0..AXES {
            if !self.settings.tracked_axes[axis] {
                continue;
            }
            zupt::apply(
                &mut self.axes[axis],
                zeroed[axis],
                self.settings.zupt_run_length[axis],
            );
            integration::step(&mut self.axes[axis], gated[axis], self.settings.block_interval);
        }

        self.accel = gated;
        for axis in 0..AXES {
            self.vel[axis] = self.axes[axis].prev_vel;
            self.pos[axis] = self.axes[axis].prev_pos;
        }
        trace!(
            "tick: accel=({:.4}, {:.4}) vel=({:.4}, {:.4}) pos=({:.4}, {:.4})",
            self.accel.x, self.accel.y, self.vel.x, self.vel.y, self.pos.x, self.pos.y,
        );
    }

    /// Apply a transport connection lifecycle event
    ///
    /// Only the status text changes; calibration and integration state are
    /// preserved so the last snapshot stays meaningful while disconnected.
    pub fn connection_event(&mut self, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Opened => {
                info!("transport connected");
                self.status = "connected".to_string();
            }
            ConnectionEvent::Closed => {
                warn!("transport connection closed");
                self.status = "connection closed".to_string();
            }
            ConnectionEvent::Error(details) => {
                warn!("transport error: {details}");
                self.status = format!("transport error: {details}");
            }
        }
    }

    /// Discard calibration and all tracking state, returning to uncalibrated
    pub fn recalibrate(&mut self) {
        info!("recalibration requested, resetting pipeline");
        self.calibration = None;
        self.calibrator.reset();
        self.decimator.reset();
        for axis in &mut self.axes {
            axis.reset();
        }
        self.accel = Vector3::zeros();
        self.vel = Vector3::zeros();
        self.pos = Vector3::zeros();
        self.status = "waiting for samples".to_string();
    }

    /// Build a consistent snapshot of the current engine state
    pub fn snapshot(&self) -> EngineSnapshot {
        let calibration = self.calibration.unwrap_or_default();
        EngineSnapshot {
            calibrated: self.calibration.is_some(),
            bias: calibration.bias,
            stddev: calibration.stddev,
            accel: self.accel,
            vel: self.vel,
            pos: self.pos,
            status: self.status.clone(),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// State shared between the ingestion worker and snapshot readers
struct Shared {
    snapshot: Mutex<EngineSnapshot>,
    recalibrate: AtomicBool,
}

impl Shared {
    fn publish(&self, snapshot: EngineSnapshot) {
        *self
            .snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    fn read(&self) -> EngineSnapshot {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Threaded engine driver for the two-cadence deployment
///
/// One worker thread owns the [`Engine`] and drains the transport channel;
/// it is the sole writer. After every event it publishes a complete
/// [`EngineSnapshot`] under a mutex held only for the swap, so a renderer
/// polling [`EngineHandle::snapshot`] at frame rate always observes values
/// from a single processing tick and never blocks ingestion for more than
/// that bounded critical section.
///
/// The worker ends when the transport side of the channel is dropped; the
/// last published snapshot stays readable.
pub struct EngineHandle {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl EngineHandle {
    /// Spawn the ingestion worker and begin draining `events`
    pub fn start(settings: EngineSettings, events: Receiver<TransportEvent>) -> Self {
        let shared = Arc::new(Shared {
            snapshot: Mutex::new(EngineSnapshot::default()),
            recalibrate: AtomicBool::new(false),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = thread::spawn(move || {
            let mut engine = Engine::with_settings(settings);
            for event in events {
                if worker_shared.recalibrate.swap(false, Ordering::AcqRel) {
                    engine.recalibrate();
                }
                match event {
                    TransportEvent::Sample(sample) => engine.process(sample),
                    TransportEvent::Connection(connection) => engine.connection_event(connection),
                }
                worker_shared.publish(engine.snapshot());
            }
            trace!("transport channel closed, ingestion worker exiting");
        });

        Self {
            shared,
            worker: Some(worker),
        }
    }

    /// Read the latest published snapshot
    pub fn snapshot(&self) -> EngineSnapshot {
        self.shared.read()
    }

    /// Request a reset to the uncalibrated state
    ///
    /// Safe to call concurrently with in-flight ingestion: the worker
    /// applies the reset between events, never inside one.
    pub fn recalibrate(&self) {
        self.shared.recalibrate.store(true, Ordering::Release);
    }

    /// Wait for the ingestion worker to drain the channel and exit
    ///
    /// Returns once every queued event has been processed and published.
    /// The last snapshot remains readable afterwards.
    pub fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
