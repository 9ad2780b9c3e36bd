//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use funky_engine::{WahParam, WahParams};

use crate::error::ConfigError;
use crate::validation::validate_preset;

/// A named set of wah parameter values.
///
/// Values are keyed by the parameter's stable string id. Parameters missing
/// from a preset keep whatever value the store already holds when the
/// preset is applied.
///
/// # TOML Format
///
/// ```toml
/// name = "Classic Funk"
/// description = "Quarter-note sweep at 100 BPM"
///
/// [params]
/// UseNoteDuration = 1.0
/// BPM = 100.0
/// NoteDuration = 2.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter values keyed by string id.
    #[serde(default)]
    pub params: BTreeMap<String, f32>,
}

impl Preset {
    /// Create a new empty preset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: BTreeMap::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set a parameter value by string id.
    pub fn with_param(mut self, id: impl Into<String>, value: f32) -> Self {
        self.params.insert(id.into(), value);
        self
    }

    /// Capture every parameter currently held by `params`.
    pub fn from_params(name: impl Into<String>, params: &WahParams) -> Self {
        let values = WahParam::ALL
            .into_iter()
            .map(|p| (p.string_id().to_string(), params.get(p)))
            .collect();
        Self {
            name: name.into(),
            description: None,
            params: values,
        }
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset: Preset = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), name = %preset.name, "loaded preset");
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating the parent directory.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), name = %self.name, "saved preset");
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Value stored for a string id, if present.
    pub fn get_param(&self, id: &str) -> Option<f32> {
        self.params.get(id).copied()
    }

    /// Number of parameter values in the preset.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the preset sets no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Validate the preset, then write its values into the store.
    ///
    /// Nothing is written when validation fails. Returns the number of
    /// parameters applied.
    pub fn apply(&self, params: &WahParams) -> Result<usize, ConfigError> {
        validate_preset(self)?;
        for (id, &value) in &self.params {
            // Ids were checked by validation
            if let Some(param) = WahParam::from_string_id(id) {
                params.set(param, value);
            }
        }
        tracing::debug!(name = %self.name, count = self.params.len(), "applied preset");
        Ok(self.params.len())
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
