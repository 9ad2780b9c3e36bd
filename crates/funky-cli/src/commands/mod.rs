//! CLI command implementations.

pub mod common;
pub mod params;
pub mod presets;
pub mod process;
pub mod response;
