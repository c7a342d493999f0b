//! Evaluation error types.

use thiserror::Error;

/// Errors that can occur while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Identifier not bound in the environment.
    #[error("name '{name}' is not defined")]
    UnresolvedName { name: String },

    /// Applied something that cannot be invoked.
    #[error("'{type_name}' object is not callable: {callee}")]
    NotCallable { callee: String, type_name: String },

    /// The invoked function raised.
    #[error("{callee} failed: {message}")]
    CallFailed { callee: String, message: String },

    /// Attribute lookup failed.
    #[error("{expr}: {message}")]
    MissingAttribute { expr: String, message: String },

    /// Element lookup failed; `object` is the object's representation.
    #[error("cannot index {object}: {message}")]
    BadIndex { object: String, message: String },

    /// Range lookup failed; `object` is the object's representation.
    #[error("cannot take a range of {object}: {message}")]
    BadRange { object: String, message: String },

    /// A field reference was evaluated without the field in the input.
    #[error("field '{field}' is missing from the input")]
    MissingInput { field: String },

    /// Several destination fields, but the value is not a tuple or list.
    #[error("cannot assign {found} to {}: value is not a sequence", join(.fields))]
    NotSequence { fields: Vec<String>, found: String },

    /// Several destination fields, but the sequence has the wrong length.
    #[error("cannot assign {found} values to {expected} fields {}", join(.fields))]
    ArityMismatch {
        fields: Vec<String>,
        expected: usize,
        found: usize,
    },

    /// A validator rejected a field's value.
    #[error("invalid value for field '{field}': {message}")]
    Validation { field: String, message: String },
}

fn join(fields: &[String]) -> String {
    fields.join(", ")
}

impl EvalError {
    pub fn unresolved_name(name: impl Into<String>) -> Self {
        Self::UnresolvedName { name: name.into() }
    }

    pub fn not_callable(callee: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::NotCallable {
            callee: callee.into(),
            type_name: type_name.into(),
        }
    }

    pub fn call_failed(callee: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CallFailed {
            callee: callee.into(),
            message: message.into(),
        }
    }

    pub fn missing_attribute(expr: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MissingAttribute {
            expr: expr.into(),
            message: message.into(),
        }
    }

    pub fn bad_index(object: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadIndex {
            object: object.into(),
            message: message.into(),
        }
    }

    pub fn bad_range(object: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRange {
            object: object.into(),
            message: message.into(),
        }
    }

    pub fn missing_input(field: impl Into<String>) -> Self {
        Self::MissingInput {
            field: field.into(),
        }
    }

    pub fn not_sequence(fields: Vec<String>, found: impl Into<String>) -> Self {
        Self::NotSequence {
            fields,
            found: found.into(),
        }
    }

    pub fn arity_mismatch(fields: Vec<String>, found: usize) -> Self {
        Self::ArityMismatch {
            expected: fields.len(),
            fields,
            found,
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if a validator rejected a value.
    pub fn is_validation(&self) -> bool {
        matches!(self, EvalError::Validation { .. })
    }

    /// Field names this error is about.
    pub fn fields(&self) -> Vec<String> {
        match self {
            EvalError::MissingInput { field } | EvalError::Validation { field, .. } => {
                vec![field.clone()]
            }
            EvalError::NotSequence { fields, .. } | EvalError::ArityMismatch { fields, .. } => {
                fields.clone()
            }
            _ => Vec::new(),
        }
    }
}

/// Result type for evaluation.
pub type EvalResult<T> = Result<T, EvalError>;
