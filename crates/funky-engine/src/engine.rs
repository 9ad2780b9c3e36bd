//! The auto-wah engine: block-rate sweep driving a stereo band-pass.
//!
//! Each playing block the engine reads a parameter snapshot, resolves the
//! sweep rate, looks up the wavetable at the current phase, maps that onto
//! the sweep range on a log scale and designs a band-pass for the result.
//! Both channel filters get the same coefficients, which are also published
//! to the [`ResponseView`] for the control context.
//!
//! `process_block` never allocates, locks, or logs.

use std::sync::Arc;

use funky_core::{
    CoefficientSet, DEFAULT_WAVETABLE_SIZE, LfoWavetable, ParamDescriptor, ParameterInfo,
    TransportState, clamp_center_frequency, map_to_log10,
};

use crate::coefficient_cell::{CoefficientCell, FilterSnapshot};
use crate::error::StateError;
use crate::modulation::{ModulationPhase, resolve_rate};
use crate::params::{PARAM_COUNT, WahParams, WahSettings};
use crate::response::ResponseView;
use crate::stereo::StereoFilter;

/// Sample rate assumed before the first `prepare`.
pub const DEFAULT_SAMPLE_RATE: f32 = 48000.0;

/// Filter frequency reported before the first coefficient update.
pub const INITIAL_FILTER_FREQUENCY: f32 = 1000.0;

/// Lifecycle of an [`AutoWah`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    /// Not prepared; audio passes through untouched.
    #[default]
    Idle,
    /// Prepared, no playing block processed yet.
    Prepared,
    /// At least one playing block processed since `prepare`.
    Running,
}

/// Tempo-syncable auto-wah.
///
/// # Example
///
/// ```rust
/// use funky_core::TransportState;
/// use funky_engine::AutoWah;
///
/// let mut wah = AutoWah::new();
/// wah.prepare(44100.0, 512);
///
/// let mut left = vec![0.1f32; 512];
/// let mut right = vec![0.1f32; 512];
/// wah.process_block(&mut left, &mut right, TransportState::Playing);
///
/// assert!((wah.current_filter_frequency() - 5000.0).abs() < 0.5);
/// assert!((wah.phase() - 11.8886).abs() < 1e-3);
/// ```
#[derive(Debug)]
pub struct AutoWah {
    params: WahParams,
    wavetable: LfoWavetable,
    phase: ModulationPhase,
    filter: StereoFilter,
    published: Arc<CoefficientCell>,
    state: EngineState,
    sample_rate: f32,
    max_block_size: usize,
    /// Length of the last playing block, used when re-deriving outside `process_block`.
    block_len: usize,
    current_frequency: f32,
}

impl AutoWah {
    /// Engine with a fresh parameter store.
    pub fn new() -> Self {
        Self::with_params(WahParams::new())
    }

    /// Engine reading from an existing store.
    pub fn with_params(params: WahParams) -> Self {
        let initial = FilterSnapshot {
            coefficients: CoefficientSet::PASSTHROUGH,
            center_frequency: INITIAL_FILTER_FREQUENCY,
            sample_rate: DEFAULT_SAMPLE_RATE,
        };
        Self {
            params,
            wavetable: LfoWavetable::default(),
            phase: ModulationPhase::new(DEFAULT_WAVETABLE_SIZE),
            filter: StereoFilter::new(),
            published: Arc::new(CoefficientCell::new(initial)),
            state: EngineState::Idle,
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_block_size: 0,
            block_len: 0,
            current_frequency: INITIAL_FILTER_FREQUENCY,
        }
    }

    /// Shared parameter store.
    pub fn params(&self) -> &WahParams {
        &self.params
    }

    /// Read-only handle for the control context.
    pub fn response_view(&self) -> ResponseView {
        ResponseView::new(Arc::clone(&self.published))
    }

    /// Lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Sample rate from the last `prepare`.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Block size hint from the last `prepare`.
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Wavetable read position.
    pub fn phase(&self) -> f64 {
        self.phase.phase()
    }

    /// Phase advance computed for the last block.
    pub fn increment(&self) -> f64 {
        self.phase.increment()
    }

    /// Sweep output in Hz behind the current coefficients.
    pub fn current_filter_frequency(&self) -> f32 {
        self.current_frequency
    }

    /// `(left, right)` coefficients; always equal.
    pub fn coefficients(&self) -> (CoefficientSet, CoefficientSet) {
        self.filter.coefficients()
    }

    /// Readies the engine for audio at `sample_rate`.
    ///
    /// Builds the wavetable, flushes the filters, derives coefficients for
    /// phase 0 and leaves the phase at 0. Can be called again at any time,
    /// e.g. when the host changes sample rate. An invalid sample rate leaves
    /// the engine untouched.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            tracing::warn!(sample_rate, "ignoring prepare with invalid sample rate");
            return;
        }

        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        self.block_len = max_block_size;
        if self.wavetable.len() != DEFAULT_WAVETABLE_SIZE {
            self.wavetable.initialize(DEFAULT_WAVETABLE_SIZE);
        }
        self.filter.reset();
        self.phase.reset();

        let settings = self.params.settings();
        self.update_coefficients(&settings, max_block_size);
        self.state = EngineState::Prepared;

        tracing::info!(
            sample_rate,
            max_block_size,
            center_hz = self.current_frequency,
            "auto-wah prepared"
        );
    }

    /// Processes one stereo block in place.
    ///
    /// While playing, the sweep advances once per block and new coefficients
    /// take effect for the whole block. While stopped, the phase rests at 0
    /// and the last coefficients keep filtering. Idle engines and empty
    /// blocks leave the audio untouched.
    pub fn process_block(&mut self, left: &mut [f32], right: &mut [f32], transport: TransportState) {
        if self.state == EngineState::Idle {
            return;
        }
        let len = left.len().min(right.len());
        if len == 0 {
            return;
        }

        if transport.is_playing() {
            let settings = self.params.settings();
            self.update_coefficients(&settings, len);
            self.phase.advance();
            self.block_len = len;
            self.state = EngineState::Running;
        } else {
            self.phase.reset();
        }

        self.filter.process(&mut left[..len], &mut right[..len]);
    }

    /// Returns to `Idle`: phase 0, filter memory flushed. Idempotent.
    pub fn release(&mut self) {
        if self.state != EngineState::Idle {
            tracing::info!("auto-wah released");
        }
        self.state = EngineState::Idle;
        self.phase.reset();
        self.filter.reset();
    }

    /// Flushes filter memory and rewinds the sweep without changing state.
    pub fn reset(&mut self) {
        self.phase.reset();
        self.filter.reset();
    }

    /// Loads a state blob into the store, then re-derives coefficients once
    /// at the current phase without advancing it.
    pub fn restore_state(&mut self, blob: &[u8]) -> Result<(), StateError> {
        let applied = self.params.load_state(blob)?;
        if self.state != EngineState::Idle {
            let settings = self.params.settings();
            self.update_coefficients(&settings, self.block_len);
        }
        tracing::info!(applied, "auto-wah state restored");
        Ok(())
    }

    /// Serializes the current parameter values.
    pub fn save_state(&self) -> Result<Vec<u8>, StateError> {
        self.params.save_state()
    }

    /// Resolves rate and increment, then designs and publishes coefficients
    /// for the wavetable value at the current phase.
    fn update_coefficients(&mut self, settings: &WahSettings, block_len: usize) {
        let rate = resolve_rate(settings);
        self.phase.set_rate(rate, self.sample_rate, block_len);

        let sample = self.wavetable.lookup(self.phase.phase());
        let mapped = map_to_log10(sample, settings.minimum_frequency, settings.maximum_frequency);
        let center = clamp_center_frequency(mapped, self.sample_rate);
        let coefficients = CoefficientSet::bandpass(center, settings.filter_quality, self.sample_rate);

        self.filter.set_coefficients(&coefficients);
        self.current_frequency = center;
        self.published.publish(FilterSnapshot {
            coefficients,
            center_frequency: center,
            sample_rate: self.sample_rate,
        });
    }
}

impl Default for AutoWah {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterInfo for AutoWah {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        self.params.descriptor(index)
    }

    fn get_param(&self, index: usize) -> f32 {
        self.params.get_value(index).unwrap_or(0.0)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        self.params.set_value(index, value);
    }
}
