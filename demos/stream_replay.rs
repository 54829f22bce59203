//! Replays a synthetic accelerometer stream through the threaded engine,
//! the way a websocket transport adapter would: JSON payloads are decoded
//! at the edge, malformed ones dropped, and a display loop polls the
//! published snapshot while ingestion runs.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use deadreckon::{
    ConnectionEvent, EngineHandle, EngineSettings, TransportEvent, wire,
};
use log::warn;

const SAMPLE_PERIOD_NS: f64 = 2_000_000.0; // 500 Hz

fn main() {
    env_logger::init();

    let settings = EngineSettings {
        calibration_samples: 1000, // 2 s stationary window
        ..Default::default()
    };
    let (tx, rx) = mpsc::channel();
    let mut handle = EngineHandle::start(settings, rx);

    // Synthetic transport: stationary for the calibration window, a short
    // push along X, then stillness so the ZUPT clamps the drift.
    let producer = thread::spawn(move || {
        let _ = tx.send(TransportEvent::Connection(ConnectionEvent::Opened));

        for i in 0..4000u32 {
            let timestamp = f64::from(i) * SAMPLE_PERIOD_NS;
            let x = if (1500..1700).contains(&i) { 0.3 } else { 0.0 };
            let payload =
                format!(r#"{{"values": [{x}, 0.0, 9.81], "timestamp": {timestamp}}}"#);

            match wire::decode_sample(&payload) {
                Ok(sample) => {
                    let _ = tx.send(TransportEvent::Sample(sample));
                }
                Err(err) => warn!("dropping sample: {err}"),
            }
            thread::sleep(Duration::from_micros(500));
        }

        let _ = tx.send(TransportEvent::Connection(ConnectionEvent::Closed));
    });

    // Display loop at roughly 10 Hz
    while !producer.is_finished() {
        let snapshot = handle.snapshot();
        println!(
            "[{}] Vx(cm/s): {:>6.2}  Px(cm): {:>6.2}",
            snapshot.status,
            snapshot.vel.x * 100.0,
            snapshot.pos.x * 100.0,
        );
        thread::sleep(Duration::from_millis(100));
    }

    producer.join().expect("producer thread panicked");
    handle.join();

    let last = snapshot_line(&handle);
    println!("final: {last}");
}

fn snapshot_line(handle: &EngineHandle) -> String {
    let snapshot = handle.snapshot();
    format!(
        "{} bias=({:.4}, {:.4}, {:.4}) vel=({:.4}, {:.4}) pos=({:.4}, {:.4})",
        snapshot.status,
        snapshot.bias.x,
        snapshot.bias.y,
        snapshot.bias.z,
        snapshot.vel.x,
        snapshot.vel.y,
        snapshot.pos.x,
        snapshot.pos.y,
    )
}
