//! fieldmap Evaluator
//!
//! This crate computes the value of rule expressions:
//! - `Scope`: caller-local bindings layered over the bound environment
//! - `Evaluator`: one exhaustive walk over the expression tree
//! - Validators: callable, membership and equality checks

mod error;
mod evaluator;
mod scope;

pub use error::*;
pub use evaluator::*;
pub use scope::*;
