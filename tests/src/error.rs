//! Error types for the scenario framework.

use thiserror::Error;

/// Result type for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors that can occur when running scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Rules given to the scenario up front did not compile.
    #[error("failed to compile rules for scenario '{scenario}': {message}")]
    RuleCompile { scenario: String, message: String },

    /// Assertion failed.
    #[error("assertion failed for step '{step}': {message}")]
    AssertionFailed { step: String, message: String },

    /// Invalid assertion, e.g. a malformed error pattern.
    #[error("invalid assertion for step '{step}': {message}")]
    InvalidAssertion { step: String, message: String },
}

impl ScenarioError {
    pub fn rule_compile(scenario: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RuleCompile {
            scenario: scenario.into(),
            message: message.into(),
        }
    }

    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn invalid_assertion(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAssertion {
            step: step.into(),
            message: message.into(),
        }
    }
}
