//! Preset and parameter validation.
//!
//! Parameters are addressed by their stable string id (see
//! [`WahParam::string_id`]). Values are checked against the descriptor
//! ranges before they reach the store, which would otherwise clamp them
//! silently.
//!
//! # Example
//!
//! ```rust
//! use funky_config::{parse_param_value, validate_param};
//!
//! let q = parse_param_value("FilterQuality", "2.5").unwrap();
//! validate_param("FilterQuality", q).expect("2.5 is a valid Q");
//!
//! assert!(validate_param("FilterQuality", 40.0).is_err());
//! assert_eq!(parse_param_value("NoteDuration", "1/8 Note").unwrap(), 3.0);
//! ```

use funky_core::DIVISION_LABELS;
use funky_engine::WahParam;
use thiserror::Error;

use crate::Preset;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown parameter id.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// String id of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Invalid parameter format.
    #[error("invalid format for parameter '{param}': {reason}")]
    InvalidFormat {
        /// String id of the parameter.
        param: String,
        /// Description of the format error.
        reason: String,
    },

    /// The minimum sweep frequency is not below the maximum.
    ///
    /// The engine still runs with such a range (the sweep is inverted or
    /// flat), so this is reported as a warning by [`check_sweep_range`].
    #[error("sweep range invalid: minimum {minimum} Hz is not below maximum {maximum} Hz")]
    SweepRangeInvalid {
        /// Lower sweep bound in Hz.
        minimum: f32,
        /// Upper sweep bound in Hz.
        maximum: f32,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn lookup(id: &str) -> ValidationResult<WahParam> {
    WahParam::from_string_id(id).ok_or_else(|| ValidationError::UnknownParameter(id.to_string()))
}

/// Check a single parameter value against its descriptor range.
///
/// Returns the resolved parameter on success.
pub fn validate_param(id: &str, value: f32) -> ValidationResult<WahParam> {
    let param = lookup(id)?;
    let desc = param.descriptor();
    if value.is_finite() && value >= desc.min && value <= desc.max {
        Ok(param)
    } else {
        Err(ValidationError::OutOfRange {
            param: id.to_string(),
            value,
            min: desc.min,
            max: desc.max,
        })
    }
}

/// Check every parameter in a preset.
///
/// All problems are collected; a single problem is returned as-is and
/// several are wrapped in [`ValidationError::Multiple`].
pub fn validate_preset(preset: &Preset) -> ValidationResult<()> {
    let mut errors: Vec<ValidationError> = preset
        .params
        .iter()
        .filter_map(|(id, &value)| validate_param(id, value).err())
        .collect();

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

/// Warn when the preset's effective sweep range is not ascending.
///
/// Bounds missing from the preset fall back to the parameter defaults.
pub fn check_sweep_range(preset: &Preset) -> ValidationResult<()> {
    let bound = |param: WahParam| {
        preset
            .params
            .get(param.string_id())
            .copied()
            .unwrap_or_else(|| param.descriptor().default)
    };
    let minimum = bound(WahParam::MinimumFrequency);
    let maximum = bound(WahParam::MaximumFrequency);

    if minimum < maximum {
        Ok(())
    } else {
        Err(ValidationError::SweepRangeInvalid { minimum, maximum })
    }
}

/// Parse a parameter value from a string.
///
/// Accepts plain numbers plus a few display forms:
/// - `"500Hz"`, `"120 BPM"` (unit suffix stripped)
/// - `"on"` / `"off"` (also `true` / `false`) for the sync toggle
/// - note labels such as `"1/8 Note"` or `"1/8"` for the note duration
///   (a bare number is still read as the table index)
pub fn parse_param_value(id: &str, value_str: &str) -> ValidationResult<f32> {
    let param = lookup(id)?;
    let s = value_str.trim();

    match param {
        WahParam::UseNoteDuration => match s.to_lowercase().as_str() {
            "on" | "true" | "yes" => return Ok(1.0),
            "off" | "false" | "no" => return Ok(0.0),
            _ => {}
        },
        WahParam::NoteDuration if s.parse::<f32>().is_err() => {
            let wanted = s.to_lowercase();
            let found = DIVISION_LABELS.iter().position(|label| {
                let label = label.to_lowercase();
                label == wanted || label.trim_end_matches(" note") == wanted
            });
            if let Some(index) = found {
                return Ok(index as f32);
            }
        }
        _ => {}
    }

    let number = ["Hz", "hz", "BPM", "bpm"]
        .iter()
        .find_map(|suffix| s.strip_suffix(suffix))
        .unwrap_or(s)
        .trim();

    number.parse::<f32>().map_err(|_| ValidationError::InvalidFormat {
        param: id.to_string(),
        reason: format!("cannot parse '{}' as number", value_str.trim()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_param_accepts_in_range() {
        assert_eq!(validate_param("BPM", 120.0), Ok(WahParam::Bpm));
        assert_eq!(validate_param("MinimumFrequency", 30.0), Ok(WahParam::MinimumFrequency));
        assert_eq!(validate_param("MaximumFrequency", 16000.0), Ok(WahParam::MaximumFrequency));
    }

    #[test]
    fn validate_param_rejects_unknown_and_out_of_range() {
        assert_eq!(
            validate_param("Drive", 1.0),
            Err(ValidationError::UnknownParameter("Drive".to_string()))
        );

        let err = validate_param("FilterFrequency", 25.0).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange { ref param, min, max, .. }
                if param == "FilterFrequency" && min == 0.1 && max == 20.0
        ));

        assert!(validate_param("BPM", f32::NAN).is_err());
    }

    #[test]
    fn validate_preset_collects_errors() {
        let preset = Preset::new("Broken")
            .with_param("FilterQuality", 50.0)
            .with_param("Resonance", 1.0);

        match validate_preset(&preset) {
            Err(ValidationError::Multiple(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected multiple errors, got {other:?}"),
        }

        let single = Preset::new("One").with_param("BPM", 400.0);
        assert!(matches!(
            validate_preset(&single),
            Err(ValidationError::OutOfRange { .. })
        ));

        assert!(validate_preset(&Preset::new("Empty")).is_ok());
    }

    #[test]
    fn sweep_range_uses_defaults_for_missing_bounds() {
        assert!(check_sweep_range(&Preset::new("Defaults")).is_ok());

        // 6000 Hz minimum against the 5000 Hz default maximum
        let inverted = Preset::new("Inverted").with_param("MinimumFrequency", 6000.0);
        assert_eq!(
            check_sweep_range(&inverted),
            Err(ValidationError::SweepRangeInvalid {
                minimum: 6000.0,
                maximum: 5000.0
            })
        );

        let flat = Preset::new("Flat")
            .with_param("MinimumFrequency", 800.0)
            .with_param("MaximumFrequency", 800.0);
        assert!(check_sweep_range(&flat).is_err());
    }

    #[test]
    fn parse_plain_and_suffixed_numbers() {
        assert_eq!(parse_param_value("FilterQuality", " 2.5 ").unwrap(), 2.5);
        assert_eq!(parse_param_value("MinimumFrequency", "500Hz").unwrap(), 500.0);
        assert_eq!(parse_param_value("MaximumFrequency", "4000 hz").unwrap(), 4000.0);
        assert_eq!(parse_param_value("BPM", "96 BPM").unwrap(), 96.0);
    }

    #[test]
    fn parse_toggle_words() {
        assert_eq!(parse_param_value("UseNoteDuration", "on").unwrap(), 1.0);
        assert_eq!(parse_param_value("UseNoteDuration", "OFF").unwrap(), 0.0);
        assert_eq!(parse_param_value("UseNoteDuration", "true").unwrap(), 1.0);
        assert_eq!(parse_param_value("UseNoteDuration", "1").unwrap(), 1.0);
    }

    #[test]
    fn parse_note_labels() {
        assert_eq!(parse_param_value("NoteDuration", "1 Note").unwrap(), 0.0);
        assert_eq!(parse_param_value("NoteDuration", "1/2").unwrap(), 1.0);
        assert_eq!(parse_param_value("NoteDuration", "1/16 note").unwrap(), 4.0);
        assert_eq!(parse_param_value("NoteDuration", "2").unwrap(), 2.0);
        assert_eq!(parse_param_value("NoteDuration", "1").unwrap(), 1.0);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            parse_param_value("BPM", "fast"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_param_value("Mix", "0.5"),
            Err(ValidationError::UnknownParameter(_))
        ));
    }

    #[test]
    fn multiple_display_joins_messages() {
        let err = ValidationError::Multiple(vec![
            ValidationError::UnknownParameter("a".into()),
            ValidationError::UnknownParameter("b".into()),
        ]);
        assert_eq!(
            err.to_string(),
            "multiple validation errors: unknown parameter 'a'; unknown parameter 'b'"
        );
    }
}
