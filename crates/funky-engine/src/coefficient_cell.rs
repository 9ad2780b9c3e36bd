//! Double-buffered hand-off of the active filter state to readers.
//!
//! The audio thread is the only writer. It fills the slot readers are not
//! pointed at, then publishes a new generation with Release ordering; it
//! never waits and never allocates. Readers copy the slot selected by the
//! generation and retry when the generation moved while they were copying,
//! so a reader never returns a set mixing two publishes.
//!
//! The writer issues a Release fence before touching a slot, and readers an
//! Acquire fence before re-checking the generation. If a reader observes any
//! word from a newer publish, the fence pair guarantees it also observes the
//! newer generation and retries.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering, fence};

use funky_core::CoefficientSet;

const WORDS: usize = 7;

/// Everything the control context needs to draw the response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSnapshot {
    /// Coefficients applied to both channels.
    pub coefficients: CoefficientSet,
    /// Sweep output in Hz that produced the coefficients.
    pub center_frequency: f32,
    /// Sample rate the coefficients were designed for.
    pub sample_rate: f32,
}

impl FilterSnapshot {
    fn to_words(self) -> [u32; WORDS] {
        let c = self.coefficients;
        [
            c.b0.to_bits(),
            c.b1.to_bits(),
            c.b2.to_bits(),
            c.a1.to_bits(),
            c.a2.to_bits(),
            self.center_frequency.to_bits(),
            self.sample_rate.to_bits(),
        ]
    }

    fn from_words(words: [u32; WORDS]) -> Self {
        Self {
            coefficients: CoefficientSet {
                b0: f32::from_bits(words[0]),
                b1: f32::from_bits(words[1]),
                b2: f32::from_bits(words[2]),
                a1: f32::from_bits(words[3]),
                a2: f32::from_bits(words[4]),
            },
            center_frequency: f32::from_bits(words[5]),
            sample_rate: f32::from_bits(words[6]),
        }
    }
}

struct Slot {
    words: [AtomicU32; WORDS],
}

impl Slot {
    fn new(snapshot: FilterSnapshot) -> Self {
        Self {
            words: snapshot.to_words().map(AtomicU32::new),
        }
    }

    fn store(&self, snapshot: FilterSnapshot) {
        for (cell, word) in self.words.iter().zip(snapshot.to_words()) {
            cell.store(word, Ordering::Relaxed);
        }
    }

    fn load(&self) -> [u32; WORDS] {
        core::array::from_fn(|i| self.words[i].load(Ordering::Relaxed))
    }
}

/// Single-writer, multi-reader cell holding the latest [`FilterSnapshot`].
pub struct CoefficientCell {
    slots: [Slot; 2],
    generation: AtomicU64,
}

impl CoefficientCell {
    /// Creates a cell holding `initial` at generation 0.
    pub fn new(initial: FilterSnapshot) -> Self {
        Self {
            slots: [Slot::new(initial), Slot::new(initial)],
            generation: AtomicU64::new(0),
        }
    }

    /// Publishes a new snapshot. Only one thread may call this.
    #[inline]
    pub fn publish(&self, snapshot: FilterSnapshot) {
        let next = self.generation.load(Ordering::Relaxed).wrapping_add(1);
        fence(Ordering::Release);
        self.slots[(next & 1) as usize].store(snapshot);
        self.generation.store(next, Ordering::Release);
    }

    /// Latest complete snapshot.
    pub fn load(&self) -> FilterSnapshot {
        loop {
            let before = self.generation.load(Ordering::Acquire);
            let words = self.slots[(before & 1) as usize].load();
            fence(Ordering::Acquire);
            if self.generation.load(Ordering::Relaxed) == before {
                return FilterSnapshot::from_words(words);
            }
            std::hint::spin_loop();
        }
    }

    /// Number of publishes so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for CoefficientCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoefficientCell")
            .field("generation", &self.generation())
            .field("snapshot", &self.load())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    fn snapshot(center: f32) -> FilterSnapshot {
        FilterSnapshot {
            coefficients: CoefficientSet::bandpass(center, 1.0, 48000.0),
            center_frequency: center,
            sample_rate: 48000.0,
        }
    }

    #[test]
    fn initial_value_at_generation_zero() {
        let cell = CoefficientCell::new(snapshot(1000.0));
        assert_eq!(cell.generation(), 0);
        assert_eq!(cell.load(), snapshot(1000.0));
    }

    #[test]
    fn publish_replaces_and_bumps_generation() {
        let cell = CoefficientCell::new(snapshot(1000.0));
        cell.publish(snapshot(2000.0));
        assert_eq!(cell.generation(), 1);
        assert_eq!(cell.load(), snapshot(2000.0));

        cell.publish(snapshot(3000.0));
        assert_eq!(cell.generation(), 2);
        assert_eq!(cell.load(), snapshot(3000.0));
    }

    #[test]
    fn words_roundtrip() {
        let s = snapshot(1234.5);
        assert_eq!(FilterSnapshot::from_words(s.to_words()), s);
    }

    #[test]
    fn reader_never_sees_mixed_publishes() {
        let cell = Arc::new(CoefficientCell::new(snapshot(100.0)));
        let done = Arc::new(AtomicBool::new(false));

        let reader = {
            let cell = Arc::clone(&cell);
            let done = Arc::clone(&done);
            std::thread::spawn(move || {
                let mut reads = 0u64;
                while !done.load(Ordering::Acquire) {
                    let s = cell.load();
                    // Every published snapshot is self-consistent.
                    assert_eq!(s, snapshot(s.center_frequency), "torn read");
                    reads += 1;
                }
                reads
            })
        };

        for i in 0..20_000 {
            cell.publish(snapshot(100.0 + (i % 500) as f32 * 10.0));
        }
        done.store(true, Ordering::Release);

        let reads = reader.join().expect("reader thread panicked");
        assert!(reads > 0);
    }
}
