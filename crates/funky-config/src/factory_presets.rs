//! Factory presets compiled into the library.

use crate::Preset;

/// Internal identifiers of the factory presets.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "init",
    "classic_funk",
    "slow_sweep",
    "quack",
    "sixteenth_chop",
];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("classic_funk", CLASSIC_FUNK_PRESET),
    ("slow_sweep", SLOW_SWEEP_PRESET),
    ("quack", QUACK_PRESET),
    ("sixteenth_chop", SIXTEENTH_CHOP_PRESET),
];

const INIT_PRESET: &str = r#"
name = "Init"
description = "Default settings: 1 Hz sweep from 200 Hz to 5 kHz"

[params]
FilterFrequency = 1.0
FilterQuality = 1.0
MinimumFrequency = 200.0
MaximumFrequency = 5000.0
UseNoteDuration = 0.0
BPM = 120.0
NoteDuration = 2.0
"#;

const CLASSIC_FUNK_PRESET: &str = r#"
name = "Classic Funk"
description = "Quarter-note sweep at 100 BPM"

[params]
FilterQuality = 2.5
MinimumFrequency = 350.0
MaximumFrequency = 2200.0
UseNoteDuration = 1.0
BPM = 100.0
NoteDuration = 2.0
"#;

const SLOW_SWEEP_PRESET: &str = r#"
name = "Slow Sweep"
description = "Wide, gentle sweep for pads and clean chords"

[params]
FilterFrequency = 0.3
FilterQuality = 2.0
MinimumFrequency = 300.0
MaximumFrequency = 3000.0
UseNoteDuration = 0.0
"#;

const QUACK_PRESET: &str = r#"
name = "Quack"
description = "Fast, resonant sweep in the vocal range"

[params]
FilterFrequency = 6.0
FilterQuality = 6.0
MinimumFrequency = 400.0
MaximumFrequency = 2500.0
UseNoteDuration = 0.0
"#;

const SIXTEENTH_CHOP_PRESET: &str = r#"
name = "Sixteenth Chop"
description = "Sixteenth-note sweep at 120 BPM"

[params]
FilterQuality = 4.0
MinimumFrequency = 250.0
MaximumFrequency = 4000.0
UseNoteDuration = 1.0
BPM = 120.0
NoteDuration = 4.0
"#;

/// Get all factory presets.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by internal or display name (case-insensitive).
///
/// ```rust
/// use funky_config::get_factory_preset;
///
/// let preset = get_factory_preset("Classic Funk").unwrap();
/// assert_eq!(preset.get_param("BPM"), Some(100.0));
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    for (preset_name, toml) in FACTORY_PRESETS_TOML {
        if preset_name.to_lowercase() == name_lower {
            return Preset::from_toml(toml).ok();
        }
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Internal identifiers of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Whether `name` matches a factory preset (case-insensitive).
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
