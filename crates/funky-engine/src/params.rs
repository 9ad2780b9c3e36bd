//! Lock-free parameter store shared by the audio and control contexts.
//!
//! `WahParams` is a cheaply cloneable handle over an `Arc`. Each parameter
//! value lives in its own `AtomicU32` (f32 bit-cast), written with Release
//! and read with Acquire, so the audio thread never blocks on a control
//! write. Reads of different parameters are independent; a block may see a
//! mix of old and new values across parameters, which is fine for this
//! effect.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

use funky_core::{
    DIVISION_LABELS, NoteDivision, ParamDescriptor, ParamId, ParamScale, ParamUnit,
    division_to_index,
};

use crate::error::ParamError;

/// Number of wah parameters.
pub const PARAM_COUNT: usize = 7;

/// First stable [`ParamId`]; the rest follow in [`WahParam::ALL`] order.
pub const BASE_PARAM_ID: u32 = 2000;

/// The wah parameters, in index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WahParam {
    /// Free-running sweep rate in Hz.
    FilterFrequency,
    /// Band-pass Q.
    FilterQuality,
    /// Lower sweep bound in Hz.
    MinimumFrequency,
    /// Upper sweep bound in Hz.
    MaximumFrequency,
    /// Tempo-sync toggle.
    UseNoteDuration,
    /// Manual tempo.
    Bpm,
    /// Index into the note-duration table.
    NoteDuration,
}

impl WahParam {
    /// All parameters in index order.
    pub const ALL: [Self; PARAM_COUNT] = [
        Self::FilterFrequency,
        Self::FilterQuality,
        Self::MinimumFrequency,
        Self::MaximumFrequency,
        Self::UseNoteDuration,
        Self::Bpm,
        Self::NoteDuration,
    ];

    /// Zero-based index.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parameter at `index`, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Stable string id used by presets and the control surface.
    pub const fn string_id(self) -> &'static str {
        match self {
            Self::FilterFrequency => "FilterFrequency",
            Self::FilterQuality => "FilterQuality",
            Self::MinimumFrequency => "MinimumFrequency",
            Self::MaximumFrequency => "MaximumFrequency",
            Self::UseNoteDuration => "UseNoteDuration",
            Self::Bpm => "BPM",
            Self::NoteDuration => "NoteDuration",
        }
    }

    /// Parameter with the given string id (exact match).
    pub fn from_string_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.string_id() == id)
    }

    /// Stable numeric id used in saved state.
    pub const fn param_id(self) -> ParamId {
        ParamId(BASE_PARAM_ID + self as u32)
    }

    /// Parameter with the given numeric id.
    pub fn from_param_id(id: ParamId) -> Option<Self> {
        id.0.checked_sub(BASE_PARAM_ID)
            .and_then(|offset| Self::from_index(offset as usize))
    }

    /// Full descriptor: range, default, scale and display metadata.
    pub fn descriptor(self) -> ParamDescriptor {
        let desc = match self {
            Self::FilterFrequency => {
                ParamDescriptor::rate_hz("Mod Frequency", "ModFreq", 0.1, 20.0, 1.0)
                    .with_group("sweep")
            }
            Self::FilterQuality => {
                ParamDescriptor::custom("Quality", "Q", ParamUnit::None, 0.1, 10.0, 1.0, 0.05)
                    .with_scale(ParamScale::Power(2.5))
                    .with_group("filter")
            }
            Self::MinimumFrequency => {
                ParamDescriptor::frequency_hz("Minimum Frequency", "MinFreq", 30.0, 16000.0, 200.0)
                    .with_group("filter")
            }
            Self::MaximumFrequency => {
                ParamDescriptor::frequency_hz("Maximum Frequency", "MaxFreq", 30.0, 16000.0, 5000.0)
                    .with_group("filter")
            }
            Self::UseNoteDuration => {
                ParamDescriptor::toggle("Use Note Duration", "Sync", false).with_group("sweep")
            }
            Self::Bpm => ParamDescriptor::tempo_bpm(20.0, 300.0, 120.0).with_group("sweep"),
            Self::NoteDuration => {
                ParamDescriptor::choice("Note Duration", "NoteDur", &DIVISION_LABELS, 2)
                    .with_group("sweep")
            }
        };
        desc.with_id(self.param_id(), self.string_id())
    }

    /// Clamps `value` to the range and snaps stepped parameters.
    ///
    /// The toggle stores `1.0` only for values above `0.5`; the note index
    /// rounds to the nearest entry.
    fn quantize(self, value: f32) -> f32 {
        let value = self.descriptor().clamp(value);
        match self {
            Self::UseNoteDuration => {
                if value > 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            Self::NoteDuration => value.round(),
            _ => value,
        }
    }
}

/// Flat, copyable snapshot of every parameter, read once per block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WahSettings {
    /// Free-running sweep rate in Hz.
    pub lfo_rate: f32,
    /// Band-pass Q.
    pub filter_quality: f32,
    /// Lower sweep bound in Hz.
    pub minimum_frequency: f32,
    /// Upper sweep bound in Hz.
    pub maximum_frequency: f32,
    /// Derive the rate from tempo instead of `lfo_rate`.
    pub use_note_duration: bool,
    /// Manual tempo.
    pub bpm: f32,
    /// Index into the note-duration table; clamped by the consumer.
    pub note_duration_index: i32,
}

impl WahSettings {
    /// `true` when the sweep runs upward from the minimum to the maximum.
    pub fn sweep_range_valid(&self) -> bool {
        self.minimum_frequency < self.maximum_frequency
    }
}

impl Default for WahSettings {
    fn default() -> Self {
        Self {
            lfo_rate: WahParam::FilterFrequency.descriptor().default,
            filter_quality: WahParam::FilterQuality.descriptor().default,
            minimum_frequency: WahParam::MinimumFrequency.descriptor().default,
            maximum_frequency: WahParam::MaximumFrequency.descriptor().default,
            use_note_duration: WahParam::UseNoteDuration.descriptor().default > 0.5,
            bpm: WahParam::Bpm.descriptor().default,
            note_duration_index: WahParam::NoteDuration.descriptor().default as i32,
        }
    }
}

struct WahParamsData {
    values: [AtomicU32; PARAM_COUNT],
    /// Bumped on every accepted write.
    version: AtomicU64,
    /// Set on every accepted write, cleared by the control context.
    dirty: AtomicBool,
}

/// Shared parameter store.
///
/// All automatable mutation goes through this handle. Writers may be on any
/// thread; the engine reads a [`WahSettings`] snapshot at the top of each
/// block.
///
/// # Example
///
/// ```rust
/// use funky_engine::{WahParam, WahParams};
///
/// let params = WahParams::new();
/// params.set_by_id("BPM", 96.0).unwrap();
/// assert_eq!(params.get(WahParam::Bpm), 96.0);
///
/// // Out-of-range writes are clamped
/// params.set_by_id("FilterQuality", 50.0).unwrap();
/// assert_eq!(params.get_by_id("FilterQuality"), Some(10.0));
/// ```
#[derive(Clone)]
pub struct WahParams {
    inner: Arc<WahParamsData>,
}

impl WahParams {
    /// Creates a store with every parameter at its default.
    pub fn new() -> Self {
        let values = WahParam::ALL.map(|p| AtomicU32::new(p.descriptor().default.to_bits()));
        Self {
            inner: Arc::new(WahParamsData {
                values,
                version: AtomicU64::new(0),
                dirty: AtomicBool::new(false),
            }),
        }
    }

    /// Number of parameters.
    pub fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    /// Descriptor by index.
    pub fn descriptor(&self, index: usize) -> Option<ParamDescriptor> {
        WahParam::from_index(index).map(WahParam::descriptor)
    }

    /// All descriptors in index order.
    pub fn descriptors(&self) -> [ParamDescriptor; PARAM_COUNT] {
        WahParam::ALL.map(WahParam::descriptor)
    }

    /// Index for a stable numeric id.
    pub fn index_by_id(&self, id: ParamId) -> Option<usize> {
        WahParam::from_param_id(id).map(WahParam::index)
    }

    /// Index for a stable string id.
    pub fn index_by_string_id(&self, id: &str) -> Option<usize> {
        WahParam::from_string_id(id).map(WahParam::index)
    }

    /// Read a parameter by index (lock-free).
    pub fn get_value(&self, index: usize) -> Option<f32> {
        self.inner
            .values
            .get(index)
            .map(|v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// Write a parameter by index (lock-free).
    ///
    /// The value is clamped to the descriptor range and stepped parameters
    /// are snapped. Non-finite values and unknown indices are ignored.
    /// Returns `true` when the write was accepted.
    pub fn set_value(&self, index: usize, value: f32) -> bool {
        let Some(param) = WahParam::from_index(index) else {
            return false;
        };
        if !value.is_finite() {
            return false;
        }
        self.inner.values[index].store(param.quantize(value).to_bits(), Ordering::Release);
        self.inner.version.fetch_add(1, Ordering::Release);
        self.inner.dirty.store(true, Ordering::Release);
        true
    }

    /// Read a parameter.
    pub fn get(&self, param: WahParam) -> f32 {
        f32::from_bits(self.inner.values[param.index()].load(Ordering::Acquire))
    }

    /// Write a parameter. See [`set_value`](Self::set_value).
    pub fn set(&self, param: WahParam, value: f32) -> bool {
        self.set_value(param.index(), value)
    }

    /// Read a parameter by stable string id.
    pub fn get_by_id(&self, id: &str) -> Option<f32> {
        WahParam::from_string_id(id).map(|p| self.get(p))
    }

    /// Write a parameter by stable string id.
    ///
    /// Non-finite values are ignored without error, matching
    /// [`set_value`](Self::set_value).
    pub fn set_by_id(&self, id: &str, value: f32) -> Result<(), ParamError> {
        let param = WahParam::from_string_id(id).ok_or_else(|| ParamError::unknown_id(id))?;
        self.set(param, value);
        Ok(())
    }

    /// Write a parameter by stable numeric id.
    pub fn set_by_param_id(&self, id: ParamId, value: f32) -> Result<(), ParamError> {
        let param = WahParam::from_param_id(id).ok_or(ParamError::UnknownParamId(id.0))?;
        self.set(param, value);
        Ok(())
    }

    /// Read a parameter as a normalized \[0, 1\] value.
    pub fn get_normalized(&self, index: usize) -> Option<f32> {
        let desc = self.descriptor(index)?;
        self.get_value(index).map(|v| desc.normalize(v))
    }

    /// Write a parameter from a normalized \[0, 1\] value (host automation).
    pub fn set_normalized(&self, index: usize, normalized: f32) -> bool {
        match self.descriptor(index) {
            Some(desc) => self.set_value(index, desc.denormalize(normalized.clamp(0.0, 1.0))),
            None => false,
        }
    }

    /// Restores every parameter to its default.
    pub fn reset_to_defaults(&self) {
        for param in WahParam::ALL {
            self.set(param, param.descriptor().default);
        }
    }

    /// Snapshot of all parameters.
    pub fn settings(&self) -> WahSettings {
        WahSettings {
            lfo_rate: self.get(WahParam::FilterFrequency),
            filter_quality: self.get(WahParam::FilterQuality),
            minimum_frequency: self.get(WahParam::MinimumFrequency),
            maximum_frequency: self.get(WahParam::MaximumFrequency),
            use_note_duration: self.get(WahParam::UseNoteDuration) > 0.5,
            bpm: self.get(WahParam::Bpm),
            note_duration_index: self.get(WahParam::NoteDuration) as i32,
        }
    }

    /// Number of accepted writes since creation.
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::Acquire)
    }

    /// Whether a write happened since the last [`take_dirty`](Self::take_dirty).
    pub fn is_dirty(&self) -> bool {
        self.inner.dirty.load(Ordering::Acquire)
    }

    /// Reads and clears the dirty flag.
    pub fn take_dirty(&self) -> bool {
        self.inner.dirty.swap(false, Ordering::AcqRel)
    }

    /// Set the free-running sweep rate in Hz.
    pub fn set_lfo_rate(&self, hz: f32) {
        self.set(WahParam::FilterFrequency, hz);
    }

    /// Set the band-pass Q.
    pub fn set_filter_quality(&self, q: f32) {
        self.set(WahParam::FilterQuality, q);
    }

    /// Set both sweep bounds.
    pub fn set_sweep_range(&self, minimum_hz: f32, maximum_hz: f32) {
        self.set(WahParam::MinimumFrequency, minimum_hz);
        self.set(WahParam::MaximumFrequency, maximum_hz);
    }

    /// Switch between tempo-synced and free-running sweep.
    pub fn set_use_note_duration(&self, enabled: bool) {
        self.set(WahParam::UseNoteDuration, if enabled { 1.0 } else { 0.0 });
    }

    /// Set the manual tempo.
    pub fn set_bpm(&self, bpm: f32) {
        self.set(WahParam::Bpm, bpm);
    }

    /// Set the sweep period as a note duration.
    pub fn set_note_duration(&self, division: NoteDivision) {
        self.set(WahParam::NoteDuration, division_to_index(division) as f32);
    }
}

impl Default for WahParams {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WahParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WahParams")
            .field("settings", &self.settings())
            .field("version", &self.version())
            .finish()
    }
}
