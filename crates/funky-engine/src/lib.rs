//! Funky Engine - real-time auto-wah
//!
//! A stereo band-pass filter whose center frequency sweeps between two
//! bounds, driven either by a free-running LFO rate or by a note duration at
//! a given tempo. Coefficients are recomputed once per block.
//!
//! # Threads
//!
//! - The audio context owns an [`AutoWah`] and calls
//!   [`process_block`](AutoWah::process_block). It never blocks, allocates,
//!   or logs there.
//! - The control context holds a [`WahParams`] clone to write parameters and
//!   a [`ResponseView`] to read the running filter, caching a
//!   [`ResponseCurve`] that refreshes only on change.
//!
//! # Example
//!
//! ```rust
//! use funky_core::TransportState;
//! use funky_engine::{AutoWah, ResponseCurve};
//!
//! let mut wah = AutoWah::new();
//! let params = wah.params().clone();
//! let view = wah.response_view();
//!
//! params.set_use_note_duration(true);
//! params.set_bpm(100.0);
//! wah.prepare(48000.0, 256);
//!
//! let mut left = vec![0.0f32; 256];
//! let mut right = vec![0.0f32; 256];
//! wah.process_block(&mut left, &mut right, TransportState::Playing);
//!
//! let mut curve = ResponseCurve::default();
//! curve.refresh(&view, &params);
//! assert!(curve.peak().is_some());
//! ```

pub mod coefficient_cell;
pub mod engine;
pub mod error;
pub mod modulation;
pub mod params;
pub mod response;
mod state;
pub mod stereo;

pub use coefficient_cell::{CoefficientCell, FilterSnapshot};
pub use engine::{AutoWah, DEFAULT_SAMPLE_RATE, EngineState, INITIAL_FILTER_FREQUENCY};
pub use error::{ParamError, StateError};
pub use modulation::{ModulationPhase, phase_increment, resolve_rate};
pub use params::{BASE_PARAM_ID, PARAM_COUNT, WahParam, WahParams, WahSettings};
pub use response::{
    DEFAULT_RESPONSE_POINTS, RESPONSE_MAX_FREQUENCY, RESPONSE_MIN_FREQUENCY, ResponseCurve,
    ResponsePoint, ResponseView,
};
pub use stereo::StereoFilter;
