//! Decoding of transport sample payloads
//!
//! The transport delivers one JSON object per accelerometer reading:
//!
//! ```json
//! {"values": [0.01, -0.02, 9.81], "timestamp": 123456789}
//! ```
//!
//! Decoding happens at the edge, before anything reaches the engine, so a
//! malformed payload can be rejected and dropped without corrupting any
//! pipeline state.

use nalgebra::Vector3;
use serde::Deserialize;
use thiserror::Error;

use crate::types::Sample;

/// Conversion factor for transports that timestamp in nanoseconds
pub const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Rejection of a malformed transport payload
///
/// The offending sample is dropped by the caller; the engine never sees it.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Payload is not the expected JSON object
    #[error("invalid sample payload: {0}")]
    Malformed(#[from] serde_json::Error),
    /// `values` did not contain exactly one reading per axis
    #[error("expected 3 acceleration values, got {0}")]
    WrongArity(usize),
    /// A reading or timestamp was NaN or infinite
    #[error("non-finite value in sample payload")]
    NonFinite,
}

#[derive(Deserialize)]
struct SamplePayload {
    values: Vec<f64>,
    timestamp: f64,
}

/// Decode one transport message into a [`Sample`]
///
/// # Errors
/// Returns [`DecodeError`] if the payload is not valid JSON, does not carry
/// exactly three acceleration values, or contains non-finite numbers.
///
/// # Example
/// ```
/// use deadreckon::wire::decode_sample;
///
/// let sample = decode_sample(r#"{"values": [0.1, 0.2, 9.8], "timestamp": 1000}"#).unwrap();
/// assert_eq!(sample.accel.x, 0.1);
/// assert_eq!(sample.timestamp, 1000.0);
/// ```
pub fn decode_sample(payload: &str) -> Result<Sample, DecodeError> {
    let raw: SamplePayload = serde_json::from_str(payload)?;

    if raw.values.len() != 3 {
        return Err(DecodeError::WrongArity(raw.values.len()));
    }
    if !raw.values.iter().all(|v| v.is_finite()) || !raw.timestamp.is_finite() {
        return Err(DecodeError::NonFinite);
    }

    let accel = Vector3::new(raw.values[0], raw.values[1], raw.values[2]);
    Ok(Sample::new(accel, raw.timestamp))
}

/// Convert a nanosecond transport timestamp to seconds
pub fn nanos_to_secs(timestamp: f64) -> f64 {
    timestamp / NANOS_PER_SEC
}
