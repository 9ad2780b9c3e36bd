//! Argument helpers shared by the commands.

use anyhow::Context;
use funky_config::{Preset, check_sweep_range, parse_param_value, resolve_preset, validate_param};
use funky_engine::WahParams;

/// Parse a `key=value` argument.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("Invalid parameter format: '{}' (expected key=value)", s)),
    }
}

/// Build a parameter store from an optional preset plus `key=value` overrides.
///
/// Overrides are applied after the preset. An inverted sweep range is
/// logged as a warning and left as-is.
pub fn build_params(preset: Option<&str>, overrides: &[(String, String)]) -> anyhow::Result<WahParams> {
    let params = WahParams::new();

    let mut effective = match preset {
        Some(name) => {
            let preset = resolve_preset(name)?;
            preset
                .apply(&params)
                .with_context(|| format!("applying preset '{}'", preset.name))?;
            tracing::info!(preset = %preset.name, "loaded preset");
            preset
        }
        None => Preset::default(),
    };

    for (key, raw) in overrides {
        let value = parse_param_value(key, raw)?;
        let param = validate_param(key, value)?;
        params.set(param, value);
        effective.params.insert(key.clone(), value);
    }

    if let Err(warning) = check_sweep_range(&effective) {
        tracing::warn!("{warning}");
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use funky_engine::WahParam;

    #[test]
    fn parse_key_val_splits_once() {
        assert_eq!(
            parse_key_val("BPM=96").unwrap(),
            ("BPM".to_string(), "96".to_string())
        );
        assert_eq!(
            parse_key_val("NoteDuration = 1/8 Note").unwrap(),
            ("NoteDuration".to_string(), "1/8 Note".to_string())
        );
        assert!(parse_key_val("BPM").is_err());
        assert!(parse_key_val("=3").is_err());
    }

    #[test]
    fn overrides_apply_after_preset() {
        let overrides = vec![("BPM".to_string(), "132".to_string())];
        let params = build_params(Some("classic_funk"), &overrides).unwrap();
        assert_eq!(params.get(WahParam::Bpm), 132.0);
        assert!(params.settings().use_note_duration);
    }

    #[test]
    fn bad_overrides_are_errors() {
        let unknown = vec![("Drive".to_string(), "1".to_string())];
        assert!(build_params(None, &unknown).is_err());

        let out_of_range = vec![("FilterQuality".to_string(), "11".to_string())];
        assert!(build_params(None, &out_of_range).is_err());
    }

    #[test]
    fn missing_preset_is_error() {
        assert!(build_params(Some("no_such_preset_24680"), &[]).is_err());
    }
}
