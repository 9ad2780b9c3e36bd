//! Parameter introspection for discoverable effect parameters.
//!
//! This module provides the [`ParameterInfo`] trait and supporting types that
//! let a host, a preset loader or the CLI discover and manipulate parameters
//! without knowing the effect's concrete type.
//!
//! # Design
//!
//! Parameters are addressed by zero-based index. Each one is described by a
//! [`ParamDescriptor`] carrying display metadata, its range, and:
//!
//! - [`ParamId`] - stable numeric ID used in saved state
//! - `string_id` - stable textual ID used by presets and the control surface
//! - [`ParamScale`] - normalization curve (linear, logarithmic, power)
//! - [`ParamFlags`] - capability flags (automatable, stepped, ...)
//!
//! # Example
//!
//! ```rust
//! use funky_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Sweep {
//!     rate: f32,
//! }
//!
//! impl ParameterInfo for Sweep {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::rate_hz("Rate", "Rate", 0.1, 20.0, 1.0)
//!                 .with_id(ParamId(100), "Rate")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.rate,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if let Some(desc) = self.param_info(index) {
//!             self.rate = desc.clamp(value);
//!         }
//!     }
//! }
//! ```

#[cfg(not(feature = "std"))]
use alloc::{format, string::String};

/// Scaling curve for parameter normalization.
///
/// Determines how a parameter's plain value maps to normalized \[0.0, 1.0\] space.
///
/// # Normalization Formulas
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`
/// - **Power(exp)**: `normalized = ((value - min) / (max - min)).powf(1.0 / exp)`
///
/// A JUCE-style skew factor `s` corresponds to `Power(1.0 / s)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParamScale {
    /// Linear mapping (default). Equal resolution across the range.
    #[default]
    Linear,
    /// Logarithmic mapping. More resolution at low values.
    /// Requires `min > 0.0`.
    Logarithmic,
    /// Power curve mapping with configurable exponent.
    /// exponent > 1.0 gives more resolution at the low end.
    Power(f32),
}

/// Stable parameter identifier that survives reordering.
///
/// Saved state is keyed by this value, so once assigned a `ParamId` must
/// never change for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(pub u32);

/// Parameter capability flags.
///
/// Use [`union`](Self::union) to combine.
///
/// ```rust
/// use funky_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::AUTOMATABLE));
/// assert!(flags.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter (default for all params).
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete steps (toggle or choice).
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Trait for effects that expose introspectable parameters.
///
/// Parameters are accessed by zero-based index, stable for the lifetime of
/// the instance. Use [`param_count`](Self::param_count) to determine valid
/// indices.
pub trait ParameterInfo {
    /// Returns the number of parameters this effect exposes.
    fn param_count(&self) -> usize;

    /// Returns the descriptor for the parameter at the given index.
    ///
    /// Returns `None` if `index >= param_count()`.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Gets the current value of the parameter at the given index.
    ///
    /// Returns `0.0` if `index >= param_count()`.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the value of the parameter at the given index.
    ///
    /// Implementations clamp to the descriptor's range and ignore
    /// out-of-bounds indices.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name (case-insensitive).
    ///
    /// Matches against [`ParamDescriptor::name`],
    /// [`ParamDescriptor::short_name`] and [`ParamDescriptor::string_id`].
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        for i in 0..self.param_count() {
            if let Some(desc) = self.param_info(i)
                && (desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name))
            {
                return Some(i);
            }
        }
        None
    }

    /// Returns the stable [`ParamId`] for the parameter at the given index.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }

    /// Finds a parameter index by its stable [`ParamId`].
    ///
    /// Scans all parameters (O(n)), suitable for setup paths, not audio.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

/// Describes a single parameter's metadata for display and validation.
///
/// # Short Name
///
/// The `short_name` field should be 8 characters or less so it fits small
/// hardware displays.
///
/// # Example
///
/// ```rust
/// use funky_core::{ParamDescriptor, ParamId};
///
/// let bpm = ParamDescriptor::tempo_bpm(20.0, 300.0, 120.0)
///     .with_id(ParamId(2005), "BPM");
/// assert_eq!(bpm.clamp(500.0), 300.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Minimum Frequency").
    pub name: &'static str,

    /// Short name for hardware displays, max 8 characters.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value for this parameter.
    pub min: f32,

    /// Maximum allowed value for this parameter.
    pub max: f32,

    /// Default value when the effect is initialized or reset.
    pub default: f32,

    /// Recommended step increment for encoder-based control.
    pub step: f32,

    /// Stable numeric ID for saved state.
    ///
    /// Default: `ParamId(0)` (unassigned).
    pub id: ParamId,

    /// Stable textual ID for presets and control-surface addressing.
    ///
    /// Default: `""` (unassigned).
    pub string_id: &'static str,

    /// Normalization curve for mapping between plain and normalized values.
    pub scale: ParamScale,

    /// Capability flags.
    pub flags: ParamFlags,

    /// Parameter group for display (e.g., `"filter"`, `"sweep"`).
    pub group: &'static str,

    /// Labels for a stepped choice parameter, indexed by the rounded value.
    ///
    /// Empty for continuous parameters.
    pub labels: &'static [&'static str],
}

impl ParamDescriptor {
    /// Linear parameter with explicit unit, range and step.
    pub const fn custom(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
        step: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            step,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
            group: "",
            labels: &[],
        }
    }

    /// LFO rate parameter in Hz.
    ///
    /// Uses logarithmic scaling for perceptually uniform rate control.
    pub const fn rate_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::custom(name, short_name, ParamUnit::Hertz, min, max, default, 0.1)
            .with_scale(ParamScale::Logarithmic)
    }

    /// Audio-range frequency parameter in Hz, logarithmic.
    pub const fn frequency_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::custom(name, short_name, ParamUnit::Hertz, min, max, default, 1.0)
            .with_scale(ParamScale::Logarithmic)
    }

    /// Tempo parameter in beats per minute.
    pub const fn tempo_bpm(min: f32, max: f32, default: f32) -> Self {
        Self::custom("BPM", "BPM", ParamUnit::BeatsPerMinute, min, max, default, 1.0)
    }

    /// On/off parameter stored as `0.0` / `1.0`.
    ///
    /// Values above `0.5` read as on.
    pub const fn toggle(name: &'static str, short_name: &'static str, default: bool) -> Self {
        let default = if default { 1.0 } else { 0.0 };
        Self::custom(name, short_name, ParamUnit::None, 0.0, 1.0, default, 1.0)
            .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED))
    }

    /// Stepped choice over `labels`, stored as the label index.
    pub const fn choice(
        name: &'static str,
        short_name: &'static str,
        labels: &'static [&'static str],
        default: usize,
    ) -> Self {
        let max = if labels.is_empty() { 0.0 } else { (labels.len() - 1) as f32 };
        let mut desc = Self::custom(name, short_name, ParamUnit::None, 0.0, max, default as f32, 1.0)
            .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED));
        desc.labels = labels;
        desc
    }

    /// Sets the stable parameter ID and string ID.
    ///
    /// ```rust
    /// use funky_core::{ParamDescriptor, ParamId};
    ///
    /// let desc = ParamDescriptor::tempo_bpm(20.0, 300.0, 120.0).with_id(ParamId(2005), "BPM");
    /// assert_eq!(desc.id, ParamId(2005));
    /// assert_eq!(desc.string_id, "BPM");
    /// ```
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the normalization scale.
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the parameter flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the parameter group.
    pub const fn with_group(mut self, group: &'static str) -> Self {
        self.group = group;
        self
    }

    /// Returns `true` for toggle and choice parameters.
    #[inline]
    pub fn is_stepped(&self) -> bool {
        self.flags.contains(ParamFlags::STEPPED)
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// ```rust
    /// use funky_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::frequency_hz("Min", "Min", 30.0, 16000.0, 200.0);
    /// assert_eq!(desc.clamp(1000.0), 1000.0);
    /// assert_eq!(desc.clamp(10.0), 30.0);
    /// assert_eq!(desc.clamp(20000.0), 16000.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    ///
    /// Respects the parameter's [`ParamScale`]:
    /// - **Linear**: `(value - min) / (max - min)`
    /// - **Logarithmic**: `ln(value/min) / ln(max/min)`, requires `min > 0`
    /// - **Power(exp)**: `((value - min) / (max - min)).powf(1.0 / exp)`
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 || value <= 0.0 {
                    return 0.0;
                }
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
            ParamScale::Power(exp) => {
                let linear = (value - self.min) / range;
                libm::powf(linear, 1.0 / exp)
            }
        }
    }

    /// Converts a normalized value (0.0 to 1.0) to the actual parameter range.
    ///
    /// Inverse of [`normalize`](Self::normalize), respecting [`ParamScale`].
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return self.min;
                }
                self.min * libm::powf(self.max / self.min, normalized)
            }
            ParamScale::Power(exp) => {
                let curved = libm::powf(normalized, exp);
                self.min + curved * (self.max - self.min)
            }
        }
    }

    /// Formats a value for display.
    ///
    /// Choice parameters show their label, toggles show `On`/`Off`, and
    /// everything else shows the number followed by the unit suffix.
    ///
    /// ```rust
    /// use funky_core::ParamDescriptor;
    ///
    /// let toggle = ParamDescriptor::toggle("Sync", "Sync", false);
    /// assert_eq!(toggle.format_value(1.0), "On");
    ///
    /// let bpm = ParamDescriptor::tempo_bpm(20.0, 300.0, 120.0);
    /// assert_eq!(bpm.format_value(120.0), "120.0 BPM");
    /// ```
    pub fn format_value(&self, value: f32) -> String {
        if !self.labels.is_empty() {
            let index = libm::roundf(self.clamp(value)) as usize;
            return String::from(self.labels[index.min(self.labels.len() - 1)]);
        }
        if self.is_stepped() && self.min == 0.0 && self.max == 1.0 {
            return String::from(if value > 0.5 { "On" } else { "Off" });
        }
        let precision = if self.step < 1.0 { 2 } else { 1 };
        format!("{value:.precision$}{}", self.unit.suffix())
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Hertz (Hz) - for sweep bounds and LFO rate.
    Hertz,

    /// Beats per minute - for tempo.
    BeatsPerMinute,

    /// No unit - for Q, toggles and choices.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use funky_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Hertz => " Hz",
            ParamUnit::BeatsPerMinute => " BPM",
            ParamUnit::None => "",
        }
    }
}
