//! Processor error types.

use fieldmap_eval::EvalError;
use fieldmap_parser::{Side, SyntaxError};
use thiserror::Error;

/// Error categories, for callers that only need to branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    MissingField,
    Eval,
    Validation,
}

/// Errors raised while compiling rules or transforming fields.
///
/// Every runtime error carries the source text of the rule that raised it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Rule source could not be compiled.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A mandatory field spec referenced fields absent from the input.
    #[error("{message} (rule: {rule})")]
    MissingField {
        message: String,
        fields: Vec<String>,
        rule: String,
    },

    /// Evaluation failed for a reason other than validation.
    #[error("{error} (rule: {rule})")]
    Eval {
        #[source]
        error: EvalError,
        rule: String,
    },

    /// A validator rejected a field value.
    #[error("{message} (rule: {rule})")]
    Validation {
        message: String,
        fields: Vec<String>,
        rule: String,
    },
}

impl Error {
    pub fn missing_field(side: Side, fields: Vec<String>, rule: impl Into<String>) -> Self {
        Self::MissingField {
            message: format!("Required {} fields missing: {}", side, fields.join(", ")),
            fields,
            rule: rule.into(),
        }
    }

    /// Attach rule context to an evaluation failure, splitting out
    /// validation failures.
    pub fn eval(error: EvalError, rule: impl Into<String>) -> Self {
        if error.is_validation() {
            Self::Validation {
                message: error.to_string(),
                fields: error.fields(),
                rule: rule.into(),
            }
        } else {
            Self::Eval {
                error,
                rule: rule.into(),
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Syntax(_) => ErrorKind::Syntax,
            Error::MissingField { .. } => ErrorKind::MissingField,
            Error::Eval { .. } => ErrorKind::Eval,
            Error::Validation { .. } => ErrorKind::Validation,
        }
    }

    /// Field names involved in the failure.
    pub fn fields(&self) -> Vec<String> {
        match self {
            Error::Syntax(_) => Vec::new(),
            Error::MissingField { fields, .. } | Error::Validation { fields, .. } => {
                fields.clone()
            }
            Error::Eval { error, .. } => error.fields(),
        }
    }

    /// Source text of the failing rule; `None` for syntax errors.
    pub fn rule(&self) -> Option<&str> {
        match self {
            Error::Syntax(_) => None,
            Error::MissingField { rule, .. }
            | Error::Eval { rule, .. }
            | Error::Validation { rule, .. } => Some(rule),
        }
    }
}

/// Result type for processor operations.
pub type ProcessResult<T> = Result<T, Error>;
