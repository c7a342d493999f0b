//! fieldmap Processor
//!
//! This crate applies compiled rules to field mappings:
//! - `Processor`: owns the rule list and the bound environment
//! - Forward and reverse transformations with all-or-nothing results
//! - Tag filtering with `TagSet`
//! - `ProcessorOptions` for default tags and skip behavior
//!
//! The commonly used types of the lower layers are re-exported so that
//! embedding applications only need this crate.

mod error;
mod options;
mod processor;
mod tags;

pub use error::*;
pub use options::*;
pub use processor::*;
pub use tags::*;

pub use fieldmap_core::{fields, CallError, Environment, Fields, Function, Object, Value};
pub use fieldmap_parser::{Rule, RuleParser, Side, SyntaxError};
