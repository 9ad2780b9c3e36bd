//! Two independent band-pass filters sharing one coefficient set.

use funky_core::{Biquad, CoefficientSet};

/// Left and right [`Biquad`] sections.
///
/// Both channels always carry the same coefficients; their delay lines are
/// independent, so there is no cross-talk.
#[derive(Debug, Clone, Default)]
pub struct StereoFilter {
    left: Biquad,
    right: Biquad,
}

impl StereoFilter {
    /// Passthrough filters with cleared state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `coeffs` to both channels.
    #[inline]
    pub fn set_coefficients(&mut self, coeffs: &CoefficientSet) {
        self.left.set_coefficients(*coeffs);
        self.right.set_coefficients(*coeffs);
    }

    /// Current `(left, right)` coefficients.
    pub fn coefficients(&self) -> (CoefficientSet, CoefficientSet) {
        (self.left.coefficients(), self.right.coefficients())
    }

    /// Filters both channels in place.
    ///
    /// Processes `min(left.len(), right.len())` samples per channel.
    #[inline]
    pub fn process(&mut self, left: &mut [f32], right: &mut [f32]) {
        let len = left.len().min(right.len());
        self.left.process_in_place(&mut left[..len]);
        self.right.process_in_place(&mut right[..len]);
    }

    /// Flushes both delay lines.
    pub fn reset(&mut self) {
        self.left.clear();
        self.right.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficients_are_identical() {
        let mut filter = StereoFilter::new();
        let coeffs = CoefficientSet::bandpass(700.0, 2.0, 44100.0);
        filter.set_coefficients(&coeffs);

        let (l, r) = filter.coefficients();
        assert_eq!(l, coeffs);
        assert_eq!(r, coeffs);
    }

    #[test]
    fn channels_do_not_cross_talk() {
        let mut filter = StereoFilter::new();
        filter.set_coefficients(&CoefficientSet::bandpass(1000.0, 1.0, 44100.0));

        let mut left = vec![0.0f32; 256];
        let mut right = vec![0.0f32; 256];
        left[0] = 1.0;

        filter.process(&mut left, &mut right);

        assert!(left.iter().any(|&s| s != 0.0));
        assert!(right.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn identical_input_gives_identical_output() {
        let mut filter = StereoFilter::new();
        filter.set_coefficients(&CoefficientSet::bandpass(2500.0, 5.0, 48000.0));

        let input: Vec<f32> = (0..512).map(|i| ((i * 37) % 101) as f32 / 50.0 - 1.0).collect();
        let mut left = input.clone();
        let mut right = input;
        filter.process(&mut left, &mut right);

        assert_eq!(left, right);
    }

    #[test]
    fn reset_flushes_memory() {
        let mut filter = StereoFilter::new();
        filter.set_coefficients(&CoefficientSet::bandpass(1000.0, 1.0, 44100.0));

        let mut left = vec![1.0f32; 64];
        let mut right = vec![1.0f32; 64];
        filter.process(&mut left, &mut right);
        filter.reset();

        let mut left = vec![0.0f32; 16];
        let mut right = vec![0.0f32; 16];
        filter.process(&mut left, &mut right);
        assert!(left.iter().chain(&right).all(|&s| s == 0.0));
    }

    #[test]
    fn mismatched_lengths_process_common_prefix() {
        let mut filter = StereoFilter::new();
        let mut left = vec![1.0f32; 8];
        let mut right = vec![1.0f32; 4];
        filter.process(&mut left, &mut right);
        assert_eq!(left.len(), 8);
        assert_eq!(right.len(), 4);
    }
}
