//! Parser error types.

use thiserror::Error;

use crate::Span;

/// A lex or parse failure with location information.
///
/// Compilation is all-or-nothing: one `SyntaxError` rejects the whole batch
/// of rules it was raised for.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("syntax error {}: {message}", location(.file, .span))]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
    /// Name of the rule source, when the caller supplied one.
    pub file: Option<String>,
    pub expected: Option<Vec<String>>,
    pub found: Option<String>,
}

fn location(file: &Option<String>, span: &Span) -> String {
    match file {
        Some(file) => format!("in {} at line {}, column {}", file, span.line, span.column),
        None => format!("at line {}, column {}", span.line, span.column),
    }
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            file: None,
            expected: None,
            found: None,
        }
    }

    pub fn with_expected(mut self, expected: Vec<String>) -> Self {
        self.expected = Some(expected);
        self
    }

    pub fn with_found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn unexpected_eof(span: Span, expected: &str) -> Self {
        Self::new(format!("unexpected end of input, expected {}", expected), span)
            .with_expected(vec![expected.to_string()])
            .with_found("end of input")
    }

    pub fn unexpected_token(span: Span, expected: &str, found: &str) -> Self {
        Self::new(format!("expected {}, found {}", expected, found), span)
            .with_expected(vec![expected.to_string()])
            .with_found(found)
    }

    pub fn line(&self) -> usize {
        self.span.line
    }

    pub fn column(&self) -> usize {
        self.span.column
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, SyntaxError>;
