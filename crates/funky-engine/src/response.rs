//! Read-only view of the running filter for the control context.
//!
//! [`ResponseView`] answers point queries against the most recently
//! published coefficients. [`ResponseCurve`] is the control context's cached
//! curve over the audible range, recomputed only when something changed.

use std::sync::Arc;

use funky_core::{CoefficientSet, MINUS_INFINITY_DB, map_to_log10};

use crate::coefficient_cell::{CoefficientCell, FilterSnapshot};
use crate::params::WahParams;

/// Lowest frequency on the response curve.
pub const RESPONSE_MIN_FREQUENCY: f32 = 20.0;

/// Highest frequency on the response curve.
pub const RESPONSE_MAX_FREQUENCY: f32 = 20000.0;

/// Default number of curve points.
pub const DEFAULT_RESPONSE_POINTS: usize = 512;

/// Cloneable, thread-safe handle onto the engine's published filter.
///
/// Queries never block the audio thread; at worst a reader retries its copy
/// while a publish is in flight.
#[derive(Debug, Clone)]
pub struct ResponseView {
    cell: Arc<CoefficientCell>,
}

impl ResponseView {
    pub(crate) fn new(cell: Arc<CoefficientCell>) -> Self {
        Self { cell }
    }

    /// Latest published coefficients, center and sample rate as one set.
    pub fn snapshot(&self) -> FilterSnapshot {
        self.cell.load()
    }

    /// Linear gain of the current filter at `frequency_hz`.
    pub fn magnitude_at(&self, frequency_hz: f32, sample_rate: f32) -> f32 {
        self.cell.load().coefficients.magnitude_at(frequency_hz, sample_rate)
    }

    /// Gain in dB of the current filter at `frequency_hz`, floored at
    /// [`MINUS_INFINITY_DB`].
    pub fn magnitude_db_at(&self, frequency_hz: f32, sample_rate: f32) -> f32 {
        self.cell.load().coefficients.magnitude_db_at(frequency_hz, sample_rate)
    }

    /// Instantaneous sweep output in Hz.
    pub fn current_filter_frequency(&self) -> f32 {
        self.cell.load().center_frequency
    }

    /// Current coefficient set.
    pub fn coefficients(&self) -> CoefficientSet {
        self.cell.load().coefficients
    }

    /// Sample rate the current coefficients were designed for.
    pub fn sample_rate(&self) -> f32 {
        self.cell.load().sample_rate
    }

    /// Publish count; changes whenever new coefficients are available.
    pub fn generation(&self) -> u64 {
        self.cell.generation()
    }
}

/// One point of the cached response curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsePoint {
    /// Frequency in Hz.
    pub frequency: f32,
    /// Gain in dB.
    pub magnitude_db: f32,
}

/// Control-side cache of the filter response over 20 Hz to 20 kHz.
///
/// Point `i` of `n` sits at `map_to_log10(i / n, 20, 20000)`.
///
/// # Example
///
/// ```rust
/// use funky_core::TransportState;
/// use funky_engine::{AutoWah, ResponseCurve};
///
/// let mut wah = AutoWah::new();
/// wah.prepare(48000.0, 256);
///
/// let view = wah.response_view();
/// let mut curve = ResponseCurve::new(128);
/// assert!(curve.refresh(&view, wah.params()));
/// assert!(!curve.refresh(&view, wah.params()));
///
/// let (mut l, mut r) = (vec![0.0; 256], vec![0.0; 256]);
/// wah.process_block(&mut l, &mut r, TransportState::Playing);
/// assert!(curve.refresh(&view, wah.params()));
/// ```
#[derive(Debug, Clone)]
pub struct ResponseCurve {
    points: Vec<ResponsePoint>,
    generation: Option<u64>,
    center_frequency: f32,
    minimum_frequency: f32,
    maximum_frequency: f32,
}

impl ResponseCurve {
    /// Curve with `point_count` log-spaced points, not yet computed.
    pub fn new(point_count: usize) -> Self {
        let points = (0..point_count)
            .map(|i| ResponsePoint {
                frequency: map_to_log10(
                    i as f32 / point_count as f32,
                    RESPONSE_MIN_FREQUENCY,
                    RESPONSE_MAX_FREQUENCY,
                ),
                magnitude_db: MINUS_INFINITY_DB,
            })
            .collect();
        Self {
            points,
            generation: None,
            center_frequency: 0.0,
            minimum_frequency: 0.0,
            maximum_frequency: 0.0,
        }
    }

    /// Recomputes the curve if the parameters changed or new coefficients
    /// were published since the last refresh. Clears the parameter dirty
    /// flag. Returns `true` when the curve was recomputed.
    pub fn refresh(&mut self, view: &ResponseView, params: &WahParams) -> bool {
        let params_changed = params.take_dirty();
        let generation = view.generation();
        if !params_changed && self.generation == Some(generation) {
            return false;
        }

        let snapshot = view.snapshot();
        for point in &mut self.points {
            point.magnitude_db = snapshot
                .coefficients
                .magnitude_db_at(point.frequency, snapshot.sample_rate);
        }

        let settings = params.settings();
        self.minimum_frequency = settings.minimum_frequency;
        self.maximum_frequency = settings.maximum_frequency;
        self.center_frequency = snapshot.center_frequency;
        self.generation = Some(generation);
        true
    }

    /// Cached points, lowest frequency first.
    pub fn points(&self) -> &[ResponsePoint] {
        &self.points
    }

    /// Point with the highest gain, if any.
    pub fn peak(&self) -> Option<ResponsePoint> {
        self.points
            .iter()
            .copied()
            .max_by(|a, b| a.magnitude_db.total_cmp(&b.magnitude_db))
    }

    /// Sweep output at the last refresh.
    pub fn center_frequency(&self) -> f32 {
        self.center_frequency
    }

    /// Lower sweep bound at the last refresh, for marker drawing.
    pub fn minimum_frequency(&self) -> f32 {
        self.minimum_frequency
    }

    /// Upper sweep bound at the last refresh, for marker drawing.
    pub fn maximum_frequency(&self) -> f32 {
        self.maximum_frequency
    }

    /// `false` when the bounds are inverted or equal.
    pub fn sweep_range_valid(&self) -> bool {
        self.minimum_frequency < self.maximum_frequency
    }
}

impl Default for ResponseCurve {
    fn default() -> Self {
        Self::new(DEFAULT_RESPONSE_POINTS)
    }
}
