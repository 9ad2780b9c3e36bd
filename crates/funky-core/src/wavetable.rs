//! Precomputed LFO cycle for the wah sweep.
//!
//! The sweep reads one value per block, so a table lookup at block rate is
//! enough and avoids evaluating a cosine on the audio thread. The cycle
//! starts at its peak: phase 0 yields `1.0`.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::f64::consts::TAU;
use libm::{cos, floor, fmod};

/// Table length used by the engine.
pub const DEFAULT_WAVETABLE_SIZE: usize = 1024;

/// One cycle of a raised cosine, `(cos(2*pi*i/size) + 1) / 2`.
///
/// Values lie in \[0, 1\], `table[0] == 1.0`, and the table is symmetric
/// around `size / 2`.
///
/// # Example
///
/// ```rust
/// use funky_core::LfoWavetable;
///
/// let table = LfoWavetable::new(1024);
/// assert_eq!(table.lookup(0.0), 1.0);
/// assert!(table.lookup(512.0) < 1e-6);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LfoWavetable {
    table: Vec<f32>,
}

impl LfoWavetable {
    /// Builds a table with `size` entries.
    pub fn new(size: usize) -> Self {
        let mut wavetable = Self { table: Vec::new() };
        wavetable.initialize(size);
        wavetable
    }

    /// Rebuilds the table with `size` entries, reusing the allocation when
    /// the size is unchanged.
    pub fn initialize(&mut self, size: usize) {
        self.table.clear();
        self.table.extend((0..size).map(|i| raised_cosine(i, size)));
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` before the table has been built.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Raw table contents.
    pub fn as_slice(&self) -> &[f32] {
        &self.table
    }

    /// Value at `floor(phase)`.
    ///
    /// Phases outside `[0, len)` are wrapped into the table; a non-finite
    /// phase reads entry 0. An empty table yields `0.0`.
    #[inline]
    pub fn lookup(&self, phase: f64) -> f32 {
        let len = self.table.len();
        if len == 0 {
            return 0.0;
        }
        if !phase.is_finite() {
            return self.table[0];
        }

        let mut wrapped = fmod(floor(phase), len as f64);
        if wrapped < 0.0 {
            wrapped += len as f64;
        }
        self.table[(wrapped as usize).min(len - 1)]
    }
}

#[inline]
fn raised_cosine(index: usize, size: usize) -> f32 {
    ((cos(TAU * index as f64 / size as f64) + 1.0) / 2.0) as f32
}
