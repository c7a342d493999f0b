//! Common error types for fieldmap values.

use thiserror::Error;

/// Errors raised by callables.
///
/// `InvalidValue` is the signal a validator uses to reject a value. Any other
/// failure is reported as `Failed` and is never treated as a validation
/// failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    /// The argument was of an acceptable type but its value was rejected.
    #[error("{0}")]
    InvalidValue(String),

    /// The call could not be carried out.
    #[error("{0}")]
    Failed(String),
}

impl CallError {
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue(message.into())
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Returns true if this is the "invalid value" signal.
    pub fn is_invalid_value(&self) -> bool {
        matches!(self, CallError::InvalidValue(_))
    }
}

/// Errors raised by member, element and range lookups on values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccessError {
    /// Integer index outside the sequence.
    #[error("{type_name} index {index} out of range")]
    OutOfRange { type_name: String, index: i64 },

    /// Mapping key not present.
    #[error("key {key} not found")]
    MissingKey { key: String },

    /// Index or bound of the wrong type.
    #[error("{type_name} indices must be {expected}, not {found}")]
    InvalidKey {
        type_name: String,
        expected: String,
        found: String,
    },

    /// The value does not support element access.
    #[error("'{type_name}' object is not subscriptable")]
    NotSubscriptable { type_name: String },

    /// The value does not support range access.
    #[error("'{type_name}' object cannot be sliced")]
    NotSliceable { type_name: String },

    /// Named member not found.
    #[error("'{type_name}' object has no attribute '{attr}'")]
    NoAttribute { type_name: String, attr: String },
}

impl AccessError {
    pub fn out_of_range(type_name: impl Into<String>, index: i64) -> Self {
        Self::OutOfRange {
            type_name: type_name.into(),
            index,
        }
    }

    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    pub fn invalid_key(
        type_name: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::InvalidKey {
            type_name: type_name.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn not_subscriptable(type_name: impl Into<String>) -> Self {
        Self::NotSubscriptable {
            type_name: type_name.into(),
        }
    }

    pub fn not_sliceable(type_name: impl Into<String>) -> Self {
        Self::NotSliceable {
            type_name: type_name.into(),
        }
    }

    pub fn no_attribute(type_name: impl Into<String>, attr: impl Into<String>) -> Self {
        Self::NoAttribute {
            type_name: type_name.into(),
            attr: attr.into(),
        }
    }
}

/// Result type for callables.
pub type CallResult<T> = Result<T, CallError>;

/// Result type for value access.
pub type AccessResult<T> = Result<T, AccessError>;
