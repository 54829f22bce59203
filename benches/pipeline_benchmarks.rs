use criterion::{Criterion, black_box, criterion_group, criterion_main};
use deadreckon::{Engine, EngineSettings, Sample};
use nalgebra::Vector3;
use rand::prelude::*;
use rand_pcg::Pcg64;
use std::f64::consts::PI;

// Pre-generated sensor data to eliminate RNG overhead during benchmarks
struct PreGeneratedData {
    samples: Vec<Sample>,
    index: usize,
}

impl PreGeneratedData {
    fn new(count: usize, seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut samples = Vec::with_capacity(count);

        for i in 0..count {
            let time = i as f64 * 0.002; // 500 Hz sample rate
            let motion_phase = time * 0.5 * 2.0 * PI;

            // Gentle handheld motion plus sensor noise on top of a bias
            let accel = Vector3::new(
                0.05 * motion_phase.sin() + 0.02 + rng.random_range(-0.01..0.01),
                0.05 * (motion_phase * 1.3).cos() - 0.015 + rng.random_range(-0.01..0.01),
                9.81 + rng.random_range(-0.01..0.01),
            );

            samples.push(Sample::new(accel, time * 1e9));
        }

        Self { samples, index: 0 }
    }

    fn next(&mut self) -> Sample {
        let sample = self.samples[self.index];
        self.index = (self.index + 1) % self.samples.len();
        sample
    }
}

fn calibrated_engine(settings: EngineSettings) -> Engine {
    let mut engine = Engine::with_settings(settings);
    for i in 0..settings.calibration_samples {
        engine.process(Sample::new(Vector3::new(0.02, -0.015, 9.81), i as f64));
    }
    assert!(engine.is_calibrated());
    engine
}

fn bench_tracked_sample(c: &mut Criterion) {
    let mut data = PreGeneratedData::new(10_000, 42);
    let mut engine = calibrated_engine(EngineSettings::default());

    c.bench_function("process_tracked_sample", |b| {
        b.iter(|| {
            engine.process(black_box(data.next()));
            black_box(engine.snapshot().pos)
        })
    });
}

fn bench_calibration_window(c: &mut Criterion) {
    let settings = EngineSettings {
        calibration_samples: 2000,
        ..Default::default()
    };
    let data = PreGeneratedData::new(2000, 7);

    c.bench_function("calibration_window_2000", |b| {
        b.iter(|| {
            let mut engine = Engine::with_settings(settings);
            for sample in &data.samples {
                engine.process(black_box(*sample));
            }
            black_box(engine.is_calibrated())
        })
    });
}

criterion_group!(benches, bench_tracked_sample, bench_calibration_window);
criterion_main!(benches);
