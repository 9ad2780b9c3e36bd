//! Criterion benchmarks for the auto-wah engine
//!
//! Run with: cargo bench -p funky-engine
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use funky_core::{CoefficientSet, TransportState};
use funky_engine::{AutoWah, ResponseCurve};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_process_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("AutoWah");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("process_block", block_size),
            &block_size,
            |b, _| {
                let mut wah = AutoWah::new();
                wah.params().set_lfo_rate(3.0);
                wah.prepare(SAMPLE_RATE, block_size);
                let mut left = input.clone();
                let mut right = input.clone();
                b.iter(|| {
                    wah.process_block(
                        black_box(&mut left),
                        black_box(&mut right),
                        TransportState::Playing,
                    );
                });
            },
        );
    }

    group.finish();
}

fn bench_coefficients(c: &mut Criterion) {
    let mut group = c.benchmark_group("Coefficients");

    group.bench_function("bandpass_design", |b| {
        b.iter(|| {
            black_box(CoefficientSet::bandpass(
                black_box(1000.0),
                black_box(1.0),
                black_box(SAMPLE_RATE),
            ))
        });
    });

    let coeffs = CoefficientSet::bandpass(1000.0, 1.0, SAMPLE_RATE);
    group.bench_function("magnitude_db_at", |b| {
        b.iter(|| black_box(coeffs.magnitude_db_at(black_box(2500.0), SAMPLE_RATE)));
    });

    group.finish();
}

fn bench_response_curve(c: &mut Criterion) {
    let mut wah = AutoWah::new();
    wah.prepare(SAMPLE_RATE, 256);
    let view = wah.response_view();
    let params = wah.params().clone();

    c.bench_function("ResponseCurve/refresh_512", |b| {
        let mut curve = ResponseCurve::default();
        b.iter(|| {
            params.set_filter_quality(2.0);
            black_box(curve.refresh(&view, &params))
        });
    });
}

criterion_group!(benches, bench_process_block, bench_coefficients, bench_response_curve);
criterion_main!(benches);
