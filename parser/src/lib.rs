//! fieldmap Parser
//!
//! This crate compiles rule source text into rules:
//! - Lexing with line/column tracking and `#` comments
//! - Rule parsing (field specs, arrows, mandatory markers, tag lists)
//! - Expression parsing (literals, composites, calls, access, validation)
//! - Error handling with location information

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::*;
pub use error::*;
pub use parser::{parse_expr, parse_rule, parse_rules, RuleParser};
