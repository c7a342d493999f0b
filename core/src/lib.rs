//! fieldmap Core Types
//!
//! This crate provides the runtime types shared by every fieldmap layer:
//! - The `Value` enum (scalars, composites, callables and host objects)
//! - Callables (`Function`) and the `Object` trait for application types
//! - The `Environment` symbol table that resolves names in rules
//! - The builtin functions most rule sets rely on
//! - Common error types

mod builtins;
mod env;
mod error;
mod function;
mod methods;
mod value;

pub use env::*;
pub use error::*;
pub use function::*;
pub use value::*;
