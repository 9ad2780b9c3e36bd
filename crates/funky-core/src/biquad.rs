//! Biquad (bi-quadratic) filter structure and band-pass design.
//!
//! Coefficient calculation uses the RBJ Audio EQ Cookbook formulas. The
//! band-pass variant is the constant 0 dB peak gain form, so the response at
//! the center frequency is unity regardless of Q.

use core::f32::consts::PI;
use libm::{cos, cosf, sin, sinf, sqrt};

use crate::math::flush_denormal;

/// Lowest center frequency a band-pass design will accept, in Hz.
pub const MIN_CENTER_FREQUENCY: f32 = 1.0;

/// Highest center frequency as a fraction of the sample rate.
pub const MAX_CENTER_RATIO: f32 = 0.49;

/// Lowest Q a band-pass design will accept.
pub const MIN_Q: f32 = 0.01;

/// Normalized biquad coefficients (`a0` divided out).
///
/// ```text
/// H(z) = (b0 + b1 z^-1 + b2 z^-2) / (1 + a1 z^-1 + a2 z^-2)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientSet {
    /// Feedforward coefficient for x\[n\]
    pub b0: f32,
    /// Feedforward coefficient for x\[n-1\]
    pub b1: f32,
    /// Feedforward coefficient for x\[n-2\]
    pub b2: f32,
    /// Feedback coefficient for y\[n-1\]
    pub a1: f32,
    /// Feedback coefficient for y\[n-2\]
    pub a2: f32,
}

impl CoefficientSet {
    /// Identity response: `y[n] = x[n]`.
    pub const PASSTHROUGH: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Builds a set from raw cookbook coefficients, normalizing by `a0`.
    pub fn from_raw(b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) -> Self {
        let a0_inv = 1.0 / a0;
        Self {
            b0: b0 * a0_inv,
            b1: b1 * a0_inv,
            b2: b2 * a0_inv,
            a1: a1 * a0_inv,
            a2: a2 * a0_inv,
        }
    }

    /// Designs a constant 0 dB peak band-pass filter.
    ///
    /// Degenerate input never produces a non-finite set: the center is clamped
    /// with [`clamp_center_frequency`] and `q` is raised to [`MIN_Q`] when it is
    /// smaller or non-finite.
    ///
    /// # Example
    ///
    /// ```rust
    /// use funky_core::CoefficientSet;
    ///
    /// let coeffs = CoefficientSet::bandpass(1000.0, 1.0, 44100.0);
    /// assert!((coeffs.magnitude_at(1000.0, 44100.0) - 1.0).abs() < 1e-3);
    /// ```
    pub fn bandpass(frequency: f32, q: f32, sample_rate: f32) -> Self {
        let frequency = clamp_center_frequency(frequency, sample_rate);
        let q = if q.is_finite() { q.max(MIN_Q) } else { MIN_Q };
        let (b0, b1, b2, a0, a1, a2) = bandpass_coefficients(frequency, q, sample_rate);
        Self::from_raw(b0, b1, b2, a0, a1, a2)
    }

    /// Returns `true` when every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        self.b0.is_finite()
            && self.b1.is_finite()
            && self.b2.is_finite()
            && self.a1.is_finite()
            && self.a2.is_finite()
    }

    /// Linear magnitude of the transfer function at `frequency`.
    ///
    /// Evaluates `|H(e^jw)|` in double precision. Returns `0.0` for a
    /// non-positive or non-finite sample rate, a non-finite frequency, or a
    /// response whose denominator vanishes.
    pub fn magnitude_at(&self, frequency: f32, sample_rate: f32) -> f32 {
        if !frequency.is_finite() || !sample_rate.is_finite() || sample_rate <= 0.0 {
            return 0.0;
        }

        let omega = core::f64::consts::TAU * f64::from(frequency) / f64::from(sample_rate);
        let (cos1, sin1) = (cos(omega), sin(omega));
        let (cos2, sin2) = (cos(2.0 * omega), sin(2.0 * omega));

        let (b0, b1, b2) = (f64::from(self.b0), f64::from(self.b1), f64::from(self.b2));
        let (a1, a2) = (f64::from(self.a1), f64::from(self.a2));

        let num_re = b0 + b1 * cos1 + b2 * cos2;
        let num_im = -(b1 * sin1 + b2 * sin2);
        let den_re = 1.0 + a1 * cos1 + a2 * cos2;
        let den_im = -(a1 * sin1 + a2 * sin2);

        let den = den_re * den_re + den_im * den_im;
        if !den.is_finite() || den <= 0.0 {
            return 0.0;
        }

        sqrt((num_re * num_re + num_im * num_im) / den) as f32
    }

    /// Magnitude at `frequency` in decibels, floored at
    /// [`MINUS_INFINITY_DB`](crate::MINUS_INFINITY_DB).
    pub fn magnitude_db_at(&self, frequency: f32, sample_rate: f32) -> f32 {
        crate::math::linear_to_db(self.magnitude_at(frequency, sample_rate))
    }
}

impl Default for CoefficientSet {
    fn default() -> Self {
        Self::PASSTHROUGH
    }
}

/// Clamps a band-pass center into `[1 Hz, 0.49 * sample_rate]`.
///
/// Non-finite frequencies map to [`MIN_CENTER_FREQUENCY`].
///
/// ```rust
/// use funky_core::clamp_center_frequency;
///
/// assert_eq!(clamp_center_frequency(30000.0, 44100.0), 0.49 * 44100.0);
/// assert_eq!(clamp_center_frequency(f32::NAN, 44100.0), 1.0);
/// assert_eq!(clamp_center_frequency(0.0, 44100.0), 1.0);
/// ```
#[inline]
pub fn clamp_center_frequency(frequency: f32, sample_rate: f32) -> f32 {
    if !frequency.is_finite() {
        return MIN_CENTER_FREQUENCY;
    }
    let upper = (MAX_CENTER_RATIO * sample_rate).max(MIN_CENTER_FREQUENCY);
    frequency.clamp(MIN_CENTER_FREQUENCY, upper)
}

/// Direct Form I biquad filter.
///
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone)]
pub struct Biquad {
    coeffs: CoefficientSet,

    /// Input delay line: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output delay line: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Creates a new biquad with passthrough coefficients.
    pub fn new() -> Self {
        Self {
            coeffs: CoefficientSet::PASSTHROUGH,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Replaces the coefficients. Delay-line state is kept, so the change
    /// takes effect on the next sample without a discontinuity reset.
    #[inline]
    pub fn set_coefficients(&mut self, coeffs: CoefficientSet) {
        self.coeffs = coeffs;
    }

    /// Current coefficients.
    #[inline]
    pub fn coefficients(&self) -> CoefficientSet {
        self.coeffs
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = &self.coeffs;
        let output = c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = flush_denormal(output);

        output
    }

    /// Filters a buffer in place.
    #[inline]
    pub fn process_in_place(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clears the delay lines without touching the coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

/// Calculates band-pass filter coefficients using the RBJ cookbook formula.
///
/// This version has constant 0dB peak gain.
///
/// # Arguments
///
/// * `frequency` - Center frequency in Hz
/// * `q` - Q factor (bandwidth = frequency / Q)
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// (b0, b1, b2, a0, a1, a2) coefficients
pub fn bandpass_coefficients(frequency: f32, q: f32, sample_rate: f32) -> (f32, f32, f32, f32, f32, f32) {
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);

    let b0 = alpha;
    let b1 = 0.0;
    let b2 = -alpha;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biquad_passthrough() {
        let mut biquad = Biquad::new();

        for i in 0..10 {
            let input = i as f32 * 0.1;
            let output = biquad.process(input);
            assert!((output - input).abs() < 0.0001);
        }
    }

    #[test]
    fn test_biquad_clear() {
        let mut biquad = Biquad::new();
        biquad.set_coefficients(CoefficientSet::bandpass(1000.0, 1.0, 44100.0));

        for _ in 0..10 {
            biquad.process(1.0);
        }

        biquad.clear();

        assert_eq!(biquad.x1, 0.0);
        assert_eq!(biquad.x2, 0.0);
        assert_eq!(biquad.y1, 0.0);
        assert_eq!(biquad.y2, 0.0);
        // Coefficients survive a clear
        assert_eq!(
            biquad.coefficients(),
            CoefficientSet::bandpass(1000.0, 1.0, 44100.0)
        );
    }

    #[test]
    fn test_bandpass_coefficients() {
        let (b0, b1, b2, a0, a1, a2) = bandpass_coefficients(1000.0, 1.0, 44100.0);

        assert!(b0.is_finite());
        assert_eq!(b1, 0.0);
        assert_eq!(b2, -b0);
        assert!(a0 > 1.0);
        assert!(a1.is_finite());
        assert!(a2.is_finite());
    }

    #[test]
    fn test_from_raw_normalizes() {
        let c = CoefficientSet::from_raw(2.0, 4.0, 6.0, 2.0, 1.0, 0.5);
        assert_eq!(c.b0, 1.0);
        assert_eq!(c.b1, 2.0);
        assert_eq!(c.b2, 3.0);
        assert_eq!(c.a1, 0.5);
        assert_eq!(c.a2, 0.25);
    }

    #[test]
    fn test_bandpass_peak_at_center() {
        let c = CoefficientSet::bandpass(1000.0, 1.0, 44100.0);
        let peak = c.magnitude_db_at(1000.0, 44100.0);
        let below = c.magnitude_db_at(500.0, 44100.0);
        let above = c.magnitude_db_at(2000.0, 44100.0);

        assert!(peak.abs() < 0.01, "peak should be ~0 dB, got {peak}");
        assert!(below < peak - 3.0, "500 Hz should be attenuated, got {below}");
        assert!(above < peak - 3.0, "2000 Hz should be attenuated, got {above}");
    }

    #[test]
    fn test_bandpass_rejects_dc() {
        let c = CoefficientSet::bandpass(1000.0, 1.0, 44100.0);
        assert!(c.magnitude_at(0.0, 44100.0) < 1e-4);
    }

    #[test]
    fn test_bandpass_degenerate_input_stays_finite() {
        let sr = 44100.0;
        for (freq, q) in [
            (f32::NAN, 1.0),
            (f32::INFINITY, 1.0),
            (-100.0, 1.0),
            (0.0, 1.0),
            (40000.0, 1.0),
            (1000.0, 0.0),
            (1000.0, -3.0),
            (1000.0, f32::NAN),
        ] {
            let c = CoefficientSet::bandpass(freq, q, sr);
            assert!(c.is_finite(), "non-finite coefficients for f={freq} q={q}: {c:?}");
        }
    }

    #[test]
    fn test_clamp_center_frequency() {
        assert_eq!(clamp_center_frequency(1000.0, 48000.0), 1000.0);
        assert_eq!(clamp_center_frequency(-5.0, 48000.0), MIN_CENTER_FREQUENCY);
        assert_eq!(clamp_center_frequency(f32::NEG_INFINITY, 48000.0), MIN_CENTER_FREQUENCY);
        assert_eq!(clamp_center_frequency(30000.0, 48000.0), 0.49 * 48000.0);
    }

    #[test]
    fn test_magnitude_invalid_sample_rate() {
        let c = CoefficientSet::bandpass(1000.0, 1.0, 44100.0);
        assert_eq!(c.magnitude_at(1000.0, 0.0), 0.0);
        assert_eq!(c.magnitude_at(1000.0, f32::NAN), 0.0);
        assert_eq!(c.magnitude_at(f32::NAN, 44100.0), 0.0);
    }

    #[test]
    fn test_passthrough_magnitude_is_unity() {
        let c = CoefficientSet::PASSTHROUGH;
        for f in [20.0, 1000.0, 15000.0] {
            assert!((c.magnitude_at(f, 48000.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_biquad_bandpass_sine_gain() {
        // A sine at the center frequency passes at unity, an octave-and-more
        // away is attenuated.
        let sr = 44100.0;
        let gain_at = |freq: f32| {
            let mut biquad = Biquad::new();
            biquad.set_coefficients(CoefficientSet::bandpass(1000.0, 2.0, sr));
            let mut peak: f32 = 0.0;
            for i in 0..8820 {
                let x = libm::sinf(2.0 * PI * freq * i as f32 / sr);
                let y = biquad.process(x);
                if i > 4410 {
                    peak = peak.max(y.abs());
                }
            }
            peak
        };

        assert!((gain_at(1000.0) - 1.0).abs() < 0.02);
        assert!(gain_at(4000.0) < 0.3);
    }

    #[test]
    fn test_process_in_place_matches_per_sample() {
        let coeffs = CoefficientSet::bandpass(800.0, 3.0, 48000.0);
        let input: [f32; 64] = core::array::from_fn(|i| if i == 0 { 1.0 } else { 0.0 });

        let mut a = Biquad::new();
        a.set_coefficients(coeffs);
        let expected: [f32; 64] = core::array::from_fn(|i| a.process(input[i]));

        let mut b = Biquad::new();
        b.set_coefficients(coeffs);
        let mut buffer = input;
        b.process_in_place(&mut buffer);

        assert_eq!(buffer, expected);
    }
}
