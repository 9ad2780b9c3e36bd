//! Error types for parameter addressing and state persistence.

use thiserror::Error;

/// Errors from control-surface parameter lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// No parameter has this string id
    #[error("unknown parameter id '{0}'")]
    UnknownId(String),

    /// No parameter has this stable numeric id
    #[error("unknown parameter id {0}")]
    UnknownParamId(u32),

    /// Index past the end of the parameter list
    #[error("parameter index {0} out of range")]
    IndexOutOfRange(usize),
}

impl ParamError {
    /// Create an unknown string id error.
    pub fn unknown_id(id: impl Into<String>) -> Self {
        ParamError::UnknownId(id.into())
    }
}

/// Errors from saving or restoring a parameter state blob.
#[derive(Debug, Error)]
pub enum StateError {
    /// The store could not be encoded
    #[error("failed to serialize state: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The blob is not valid JSON
    #[error("failed to parse state: {0}")]
    Deserialize(#[source] serde_json::Error),

    /// The blob is JSON but not an object of id/value pairs
    #[error("state must be a JSON object mapping parameter ids to values")]
    NotAnObject,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn unknown_id_display() {
        let err = ParamError::unknown_id("Cutoff");
        assert_eq!(err.to_string(), "unknown parameter id 'Cutoff'");
        assert_eq!(err, ParamError::UnknownId("Cutoff".into()));
    }

    #[test]
    fn unknown_param_id_display() {
        let err = ParamError::UnknownParamId(9999);
        assert_eq!(err.to_string(), "unknown parameter id 9999");
    }

    #[test]
    fn index_out_of_range_display() {
        let msg = ParamError::IndexOutOfRange(12).to_string();
        assert!(msg.contains("12"), "got: {msg}");
    }

    #[test]
    fn deserialize_has_source() {
        let json_err = serde_json::from_slice::<serde_json::Value>(b"{nope").unwrap_err();
        let err = StateError::Deserialize(json_err);
        assert!(err.to_string().starts_with("failed to parse state"));
        assert!(err.source().is_some());
    }

    #[test]
    fn not_an_object_has_no_source() {
        let err = StateError::NotAnObject;
        assert!(err.source().is_none());
        assert!(err.to_string().contains("JSON object"));
    }
}
