//! Preset and configuration management for the funky auto-wah.
//!
//! # Features
//!
//! - **Presets**: named parameter sets stored as TOML, keyed by the
//!   parameters' stable string ids
//! - **Validation**: range checks, value parsing and the sweep range warning
//! - **Paths**: platform-specific user preset directory
//! - **Factory Presets**: built-in starting points
//!
//! # Example
//!
//! ```rust,no_run
//! use funky_config::{Preset, get_factory_preset, user_presets_dir};
//! use funky_engine::WahParams;
//!
//! let params = WahParams::new();
//! get_factory_preset("classic_funk").unwrap().apply(&params).unwrap();
//!
//! let mine = Preset::from_params("My Funk", &params).with_description("Tweaked");
//! mine.save(user_presets_dir().join("my_funk.toml")).unwrap();
//! ```

mod error;
mod preset;

/// Platform-specific paths for presets and configuration.
pub mod paths;

/// Preset and parameter validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use paths::{
    ensure_user_presets_dir, find_preset, list_user_presets, preset_name_from_path,
    user_config_dir, user_presets_dir,
};
pub use preset::Preset;
pub use validation::{
    ValidationError, ValidationResult, check_sweep_range, parse_param_value, validate_param,
    validate_preset,
};

/// Resolve a preset by factory name, file path or user preset name.
///
/// Factory presets take precedence over files with the same name.
pub fn resolve_preset(name: &str) -> Result<Preset, ConfigError> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }
    match find_preset(name) {
        Some(path) => Preset::load(path),
        None => Err(ConfigError::PresetNotFound(name.to_string())),
    }
}
