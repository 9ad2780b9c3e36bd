//! Parameter state as an opaque byte blob.
//!
//! The blob is a JSON object keyed by stable [`ParamId`] (decimal string):
//!
//! ```json
//! {"2000": 1.0, "2001": 1.0, "2002": 200.0, "2003": 5000.0, "2004": 0.0, "2005": 120.0, "2006": 2.0}
//! ```
//!
//! Keying by id rather than index keeps old blobs loadable if parameters are
//! reordered or added.

use funky_core::ParamId;

use crate::error::StateError;
use crate::params::{WahParam, WahParams};

impl WahParams {
    /// Serializes every parameter value.
    pub fn save_state(&self) -> Result<Vec<u8>, StateError> {
        let mut state = serde_json::Map::new();
        for param in WahParam::ALL {
            state.insert(
                param.param_id().0.to_string(),
                serde_json::Value::from(f64::from(self.get(param))),
            );
        }
        serde_json::to_vec(&serde_json::Value::Object(state)).map_err(StateError::Serialize)
    }

    /// Restores values from a blob produced by [`save_state`](Self::save_state).
    ///
    /// The whole blob is parsed before anything is written, so a malformed
    /// blob leaves the store untouched. Unknown ids and non-numeric values
    /// are skipped; known values are clamped like any other write. Returns
    /// the number of parameters applied.
    pub fn load_state(&self, blob: &[u8]) -> Result<usize, StateError> {
        let value: serde_json::Value =
            serde_json::from_slice(blob).map_err(StateError::Deserialize)?;
        let serde_json::Value::Object(entries) = value else {
            return Err(StateError::NotAnObject);
        };

        let mut applied = 0;
        for (key, val) in &entries {
            let Some(param) = key
                .parse::<u32>()
                .ok()
                .and_then(|id| WahParam::from_param_id(ParamId(id)))
            else {
                tracing::debug!(key = %key, "ignoring unknown parameter id in state");
                continue;
            };
            let Some(v) = val.as_f64() else {
                tracing::debug!(key = %key, "ignoring non-numeric state value");
                continue;
            };
            if self.set(param, v as f32) {
                applied += 1;
            }
        }
        Ok(applied)
    }
}
