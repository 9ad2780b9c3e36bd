//! Sweep rate resolution and block-rate phase accumulation.

use funky_core::index_to_division;

use crate::params::WahSettings;

/// Sweep rate in Hz for the given settings.
///
/// Free-running mode returns `lfo_rate`. Tempo-synced mode returns
/// `bpm / (60 * beats)` where `beats` comes from the note-duration table;
/// the index is clamped into the table. A non-finite or non-positive tempo,
/// or a non-finite or negative free-running rate, yields `0.0`, which holds
/// the sweep in place.
///
/// ```rust
/// use funky_engine::{WahSettings, modulation::resolve_rate};
///
/// let settings = WahSettings { use_note_duration: true, ..WahSettings::default() };
/// assert!((resolve_rate(&settings) - 2.0).abs() < 1e-6);
/// ```
pub fn resolve_rate(settings: &WahSettings) -> f32 {
    let rate = if settings.use_note_duration {
        if !settings.bpm.is_finite() || settings.bpm <= 0.0 {
            return 0.0;
        }
        index_to_division(settings.note_duration_index).to_hz(settings.bpm)
    } else {
        settings.lfo_rate
    };

    if rate.is_finite() && rate > 0.0 { rate } else { 0.0 }
}

/// Phase advance per block: `rate * table_size / (sample_rate / block_len)`.
///
/// Returns `0.0` when the sample rate or block length make the expression
/// meaningless.
pub fn phase_increment(rate_hz: f32, table_size: usize, sample_rate: f32, block_len: usize) -> f64 {
    if !sample_rate.is_finite() || sample_rate <= 0.0 || block_len == 0 {
        return 0.0;
    }
    let blocks_per_second = f64::from(sample_rate) / block_len as f64;
    f64::from(rate_hz) * table_size as f64 / blocks_per_second
}

/// Wavetable read position, advanced once per block.
#[derive(Debug, Clone, PartialEq)]
pub struct ModulationPhase {
    phase: f64,
    increment: f64,
    table_size: usize,
}

impl ModulationPhase {
    /// Starts at phase 0 over a table of `table_size` entries.
    pub fn new(table_size: usize) -> Self {
        Self {
            phase: 0.0,
            increment: 0.0,
            table_size,
        }
    }

    /// Current read position in `[0, table_size)`.
    #[inline]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Last computed per-block advance.
    #[inline]
    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// Table size the phase wraps at.
    pub fn table_size(&self) -> usize {
        self.table_size
    }

    /// Recomputes the per-block advance for a block of `block_len` samples.
    #[inline]
    pub fn set_rate(&mut self, rate_hz: f32, sample_rate: f32, block_len: usize) {
        self.increment = phase_increment(rate_hz, self.table_size, sample_rate, block_len);
    }

    /// Moves the phase forward by one increment, wrapping at the table size.
    #[inline]
    pub fn advance(&mut self) {
        if self.table_size == 0 {
            self.phase = 0.0;
            return;
        }
        let size = self.table_size as f64;
        let next = (self.phase + self.increment) % size;
        self.phase = if next.is_finite() && next >= 0.0 { next } else { 0.0 };
    }

    /// Back to phase 0. The increment is kept.
    #[inline]
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
