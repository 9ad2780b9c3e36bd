//! Integration tests combining the core primitives into a block-rate sweep.

use funky_core::{
    Biquad, CoefficientSet, DEFAULT_WAVETABLE_SIZE, LfoWavetable, NoteDivision, map_to_log10,
};
use std::f32::consts::PI;

fn generate_sine(freq: f32, sample_rate: f32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| (2.0 * PI * freq * i as f32 / sample_rate).sin())
        .collect()
}

fn rms(samples: &[f32]) -> f32 {
    (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
}

/// One full cycle of the table, read once per block, visits both sweep bounds.
#[test]
fn test_block_rate_sweep_covers_range() {
    let table = LfoWavetable::new(DEFAULT_WAVETABLE_SIZE);
    let (min, max) = (200.0, 5000.0);

    let mut lowest = f32::MAX;
    let mut highest = f32::MIN;
    let mut phase = 0.0f64;
    let increment = 7.3;
    while phase < DEFAULT_WAVETABLE_SIZE as f64 {
        let center = map_to_log10(table.lookup(phase), min, max);
        lowest = lowest.min(center);
        highest = highest.max(center);
        phase += increment;
    }

    assert!((highest - max).abs() < 0.5, "highest center {highest}");
    assert!(lowest < min * 1.01, "lowest center {lowest}");
}

/// Tempo-synced rate: a quarter note at 120 BPM is a 2 Hz sweep, so a
/// 512-sample block at 44.1 kHz advances the phase by 2 * 1024 / (44100 / 512).
#[test]
fn test_tempo_synced_increment() {
    let rate = NoteDivision::Quarter.to_hz(120.0);
    let increment = f64::from(rate) * DEFAULT_WAVETABLE_SIZE as f64 / (44100.0 / 512.0);
    assert!((increment - 23.777).abs() < 1e-3, "increment {increment}");
}

/// Filtering with a band-pass centered on the signal keeps its level;
/// centering far away removes most of it.
#[test]
fn test_bandpass_selectivity_on_sine() {
    let sr = 44100.0;
    let input = generate_sine(1000.0, sr, 8192);

    let run = |center: f32| {
        let mut filter = Biquad::new();
        filter.set_coefficients(CoefficientSet::bandpass(center, 4.0, sr));
        let mut buffer = input.clone();
        filter.process_in_place(&mut buffer);
        rms(&buffer[4096..])
    };

    let on_center = run(1000.0);
    let off_center = run(5000.0);

    assert!((on_center - rms(&input[4096..])).abs() < 0.02);
    assert!(off_center < on_center * 0.1, "on {on_center}, off {off_center}");
}

/// Updating coefficients every block while keeping filter memory never
/// produces non-finite output over a full sweep cycle.
#[test]
fn test_per_block_coefficient_updates_stay_finite() {
    let sr = 48000.0;
    let block = 256;
    let table = LfoWavetable::new(DEFAULT_WAVETABLE_SIZE);
    let input = generate_sine(440.0, sr, block * 200);

    let mut left = Biquad::new();
    let mut right = Biquad::new();
    let increment = 3.0 * DEFAULT_WAVETABLE_SIZE as f64 / (f64::from(sr) / block as f64);
    let mut phase = 0.0f64;

    for chunk in input.chunks(block) {
        let center = map_to_log10(table.lookup(phase), 30.0, 16000.0);
        let coeffs = CoefficientSet::bandpass(center, 8.0, sr);
        left.set_coefficients(coeffs);
        right.set_coefficients(coeffs);
        phase = (phase + increment) % DEFAULT_WAVETABLE_SIZE as f64;

        for &x in chunk {
            let l = left.process(x);
            let r = right.process(x);
            assert!(l.is_finite());
            assert_eq!(l.to_bits(), r.to_bits());
        }
    }
}
