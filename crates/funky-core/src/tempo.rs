//! Note durations and transport state for tempo-synced sweeps.
//!
//! The `NoteDuration` parameter is a stepped index into [`NOTE_DIVISIONS`];
//! one full sweep cycle lasts that many beats at the current BPM.

/// Musical note divisions for tempo sync.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoteDivision {
    /// Whole note (4 beats)
    Whole,
    /// Half note (2 beats)
    Half,
    /// Quarter note (1 beat)
    #[default]
    Quarter,
    /// Eighth note (1/2 beat)
    Eighth,
    /// Sixteenth note (1/4 beat)
    Sixteenth,
}

/// Divisions in parameter-index order.
pub const NOTE_DIVISIONS: [NoteDivision; 5] = [
    NoteDivision::Whole,
    NoteDivision::Half,
    NoteDivision::Quarter,
    NoteDivision::Eighth,
    NoteDivision::Sixteenth,
];

/// Display labels matching [`NOTE_DIVISIONS`].
pub const DIVISION_LABELS: [&str; 5] = ["1 Note", "1/2 Note", "1/4 Note", "1/8 Note", "1/16 Note"];

impl NoteDivision {
    /// Convert note division to frequency in Hz at given BPM.
    ///
    /// # Example
    ///
    /// ```rust
    /// use funky_core::NoteDivision;
    ///
    /// // At 120 BPM, quarter note = 2 Hz
    /// let freq = NoteDivision::Quarter.to_hz(120.0);
    /// assert!((freq - 2.0).abs() < 0.001);
    ///
    /// // At 120 BPM, whole note = 0.5 Hz
    /// let freq = NoteDivision::Whole.to_hz(120.0);
    /// assert!((freq - 0.5).abs() < 0.001);
    /// ```
    pub fn to_hz(&self, bpm: f32) -> f32 {
        let beats_per_second = bpm / 60.0;
        beats_per_second / self.beats()
    }

    /// Get the number of beats this division represents.
    pub fn beats(&self) -> f32 {
        match self {
            NoteDivision::Whole => 4.0,
            NoteDivision::Half => 2.0,
            NoteDivision::Quarter => 1.0,
            NoteDivision::Eighth => 0.5,
            NoteDivision::Sixteenth => 0.25,
        }
    }

    /// Display label, e.g. `"1/4 Note"`.
    pub fn label(&self) -> &'static str {
        DIVISION_LABELS[division_to_index(*self)]
    }
}

/// Index of `division` within [`NOTE_DIVISIONS`].
pub fn division_to_index(division: NoteDivision) -> usize {
    match division {
        NoteDivision::Whole => 0,
        NoteDivision::Half => 1,
        NoteDivision::Quarter => 2,
        NoteDivision::Eighth => 3,
        NoteDivision::Sixteenth => 4,
    }
}

/// Division for a possibly out-of-range index.
///
/// Indices below 0 select the whole note and indices above 4 the sixteenth.
///
/// ```rust
/// use funky_core::{index_to_division, NoteDivision};
///
/// assert_eq!(index_to_division(2), NoteDivision::Quarter);
/// assert_eq!(index_to_division(-3), NoteDivision::Whole);
/// assert_eq!(index_to_division(9), NoteDivision::Sixteenth);
/// ```
pub fn index_to_division(index: i32) -> NoteDivision {
    NOTE_DIVISIONS[index.clamp(0, NOTE_DIVISIONS.len() as i32 - 1) as usize]
}

/// Transport state reported by the host for each block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransportState {
    /// Transport halted; the sweep rests at its start.
    #[default]
    Stopped,
    /// Transport running; the sweep advances every block.
    Playing,
}

impl TransportState {
    /// Returns `true` while the transport is running.
    pub fn is_playing(self) -> bool {
        self == TransportState::Playing
    }
}
