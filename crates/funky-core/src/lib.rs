//! Funky Core - DSP primitives for the funky auto-wah
//!
//! The building blocks the sweep engine is assembled from, kept free of any
//! threading or host concerns so they can run on embedded targets too.
//!
//! # Filters
//!
//! - [`Biquad`] - Direct Form I second-order section
//! - [`CoefficientSet`] - Normalized biquad coefficients with band-pass design
//!   and frequency-response evaluation
//!
//! # Modulation
//!
//! - [`LfoWavetable`] - One precomputed cycle of a raised cosine in \[0, 1\]
//! - [`NoteDivision`] - Note durations for tempo-synced sweeps
//! - [`TransportState`] - Host transport as seen by the engine
//!
//! # Parameters
//!
//! - [`ParamDescriptor`], [`ParamId`], [`ParamScale`], [`ParamFlags`], [`ParamUnit`]
//! - [`ParameterInfo`] - Index-based parameter introspection
//!
//! # Utilities
//!
//! - [`map_to_log10`] - Logarithmic range mapping used for the sweep
//! - [`linear_to_db`] / [`db_to_linear`]
//!
//! # Example
//!
//! ```rust
//! use funky_core::{Biquad, CoefficientSet, LfoWavetable, map_to_log10};
//!
//! let table = LfoWavetable::new(1024);
//! let center = map_to_log10(table.lookup(0.0), 200.0, 5000.0);
//!
//! let mut filter = Biquad::new();
//! filter.set_coefficients(CoefficientSet::bandpass(center, 1.0, 48000.0));
//! let _out = filter.process(0.5);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod biquad;
pub mod math;
pub mod param_info;
pub mod tempo;
pub mod wavetable;

pub use biquad::{Biquad, CoefficientSet, bandpass_coefficients, clamp_center_frequency};
pub use math::{
    MINUS_INFINITY_DB, db_to_linear, flush_denormal, hz_to_omega, linear_to_db, map_to_log10,
};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit, ParameterInfo};
pub use tempo::{
    DIVISION_LABELS, NOTE_DIVISIONS, NoteDivision, TransportState, division_to_index,
    index_to_division,
};
pub use wavetable::{DEFAULT_WAVETABLE_SIZE, LfoWavetable};
