//! Inertial dead-reckoning engine for lightweight indoor positioning
//!
//! Estimates per-axis velocity and position from a live stream of 3-axis
//! accelerometer samples. The pipeline is: stationary-window calibration
//! (bias and noise estimation), fixed-rate block-averaging decimation, a
//! per-axis deadband noise gate, zero-velocity updates to bound drift, and
//! trapezoidal double integration.
//!
//! The transport that produces samples and the renderer that displays the
//! result are external. The crate decodes transport payloads at the edge
//! ([`wire`]), runs the pipeline on a dedicated worker ([`EngineHandle`]),
//! and exposes consistent [`EngineSnapshot`] values for a renderer polling
//! at its own frame rate.
//!
//! # Features
//!
//! - Windowed bias/stddev calibration, plain or median-prefiltered
//! - Block-averaging decimation (e.g. 500 Hz -> 25 Hz)
//! - Asymmetric per-axis deadband and zero-velocity (ZUPT) thresholds
//! - Trapezoidal double integration per tracked axis
//! - Single-writer snapshot publication safe against a concurrent reader
//!
//! # Quick Start
//!
//! ```rust
//! use deadreckon::{Engine, EngineSettings, Sample};
//! use nalgebra::Vector3;
//!
//! let settings = EngineSettings {
//!     calibration_samples: 100,
//!     decimation_factor: 10,
//!     block_interval: 0.02,
//!     ..Default::default()
//! };
//! let mut engine = Engine::with_settings(settings);
//!
//! // Hold the sensor still while the calibration window fills
//! for i in 0..100 {
//!     engine.process(Sample::new(Vector3::zeros(), i as f64));
//! }
//! assert!(engine.is_calibrated());
//!
//! // Tracked samples advance velocity and position
//! for i in 100..110 {
//!     engine.process(Sample::new(Vector3::new(0.2, 0.0, 0.0), i as f64));
//! }
//! let snapshot = engine.snapshot();
//! assert!(snapshot.vel.x > 0.0);
//! ```
//!
//! For the threaded two-cadence setup (ingestion worker plus a polling
//! renderer), see [`EngineHandle`] and the `stream_replay` demo.

pub mod calibration;
pub mod deadband;
pub mod decimation;
mod engine;
pub mod integration;
mod math;
mod types;
pub mod wire;
pub mod zupt;

// Re-export the crate's primary surface
pub use calibration::{CalibrationStatus, Calibrator};
pub use deadband::Deadband;
pub use decimation::Decimator;
pub use engine::{Engine, EngineHandle};
pub use integration::AxisState;
pub use types::*;
pub use wire::{DecodeError, decode_sample};
