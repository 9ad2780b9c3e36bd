//! Mathematical utility functions for DSP.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Range Mapping
//!
//! - [`map_to_log10`] - Map a proportion in \[0, 1\] onto a logarithmic range
//!
//! # Utilities
//!
//! - [`hz_to_omega`] - Frequency to angular frequency
//! - [`flush_denormal`] - Subnormal flushing for filter state

use libm::{expf, log10f, logf, powf};

/// Floor used when converting gains to decibels.
///
/// Zero, negative and non-finite gains all report this level.
pub const MINUS_INFINITY_DB: f32 = -120.0;

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use funky_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels, floored at [`MINUS_INFINITY_DB`].
///
/// # Example
/// ```rust
/// use funky_core::{linear_to_db, MINUS_INFINITY_DB};
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// assert_eq!(linear_to_db(0.0), MINUS_INFINITY_DB);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    if linear.is_nan() || linear <= 0.0 {
        return MINUS_INFINITY_DB;
    }
    (logf(linear) * FACTOR).max(MINUS_INFINITY_DB)
}

/// Map a proportion onto a logarithmic range.
///
/// Computes `10^(log10(min) + proportion * (log10(max) - log10(min)))`, so
/// `0.0` yields `min`, `1.0` yields `max` and equal steps in `proportion`
/// are equal frequency ratios. `min > max` gives an inverted mapping and
/// `min == max` a constant one. Non-positive bounds produce a non-finite
/// result, which callers clamp.
///
/// # Example
/// ```rust
/// use funky_core::map_to_log10;
///
/// assert!((map_to_log10(0.0, 200.0, 5000.0) - 200.0).abs() < 0.01);
/// assert!((map_to_log10(1.0, 200.0, 5000.0) - 5000.0).abs() < 0.5);
/// assert!((map_to_log10(0.5, 100.0, 10000.0) - 1000.0).abs() < 0.1);
/// ```
#[inline]
pub fn map_to_log10(proportion: f32, min: f32, max: f32) -> f32 {
    let log_min = log10f(min);
    let log_max = log10f(max);
    powf(10.0, log_min + proportion * (log_max - log_min))
}

/// Convert frequency in Hz to angular frequency (radians per sample).
#[inline]
pub fn hz_to_omega(freq_hz: f32, sample_rate: f32) -> f32 {
    core::f32::consts::TAU * freq_hz / sample_rate
}

/// Flush subnormal (denormalized) floats to zero.
///
/// Replaces values below 1e-20 with zero, which keeps a decaying biquad
/// out of the IEEE 754 subnormal range when the input goes silent.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_linear_roundtrip() {
        let original = 0.5;
        let db = linear_to_db(original);
        let back = db_to_linear(db);
        assert!(
            (original - back).abs() < 1e-5,
            "Roundtrip failed: {} -> {} -> {}",
            original,
            db,
            back
        );
    }

    #[test]
    fn test_db_known_values() {
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_linear(-6.0206) - 0.5).abs() < 0.001);
        assert!((db_to_linear(6.0206) - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_linear_to_db_floor() {
        assert_eq!(linear_to_db(0.0), MINUS_INFINITY_DB);
        assert_eq!(linear_to_db(-1.0), MINUS_INFINITY_DB);
        assert_eq!(linear_to_db(f32::NAN), MINUS_INFINITY_DB);
        assert_eq!(linear_to_db(1e-9), MINUS_INFINITY_DB);
        assert!((linear_to_db(1e-3) - (-60.0)).abs() < 0.01);
    }

    #[test]
    fn test_map_to_log10_endpoints() {
        assert!((map_to_log10(0.0, 30.0, 16000.0) - 30.0).abs() < 0.01);
        assert!((map_to_log10(1.0, 30.0, 16000.0) - 16000.0).abs() < 1.0);
    }

    #[test]
    fn test_map_to_log10_geometric_midpoint() {
        let mid = map_to_log10(0.5, 20.0, 20000.0);
        let expected = libm::sqrtf(20.0 * 20000.0);
        assert!((mid - expected).abs() < 0.5, "expected ~{expected}, got {mid}");
    }

    #[test]
    fn test_map_to_log10_inverted_and_flat() {
        // min > max sweeps downward
        assert!((map_to_log10(0.0, 5000.0, 200.0) - 5000.0).abs() < 0.5);
        assert!((map_to_log10(1.0, 5000.0, 200.0) - 200.0).abs() < 0.01);

        // min == max is constant
        for p in [0.0, 0.3, 1.0] {
            assert!((map_to_log10(p, 440.0, 440.0) - 440.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_map_to_log10_non_positive_bound() {
        assert!(!map_to_log10(0.5, 0.0, 1000.0).is_finite());
    }

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1.0), 1.0);
        assert_eq!(flush_denormal(-0.5), -0.5);
        assert_eq!(flush_denormal(1e-10), 1e-10);

        assert_eq!(flush_denormal(1e-21), 0.0);
        assert_eq!(flush_denormal(-1e-21), 0.0);
        assert_eq!(flush_denormal(0.0), 0.0);
    }
}
