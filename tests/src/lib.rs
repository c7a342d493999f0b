//! fieldmap Integration Test Framework
//!
//! Provides a fluent API for writing integration tests against fieldmap.
//!
//! A scenario compiles one or more rule sources into a processor, then runs
//! named steps against it. Each step is a forward or reverse transformation
//! (or a further compilation) checked by an assertion.
//!
//! # Example
//!
//! ```ignore
//! use fieldmap_tests::prelude::*;
//!
//! pub fn scenario() -> Scenario {
//!     Scenario::new("simple")
//!         .rules("$left <=> $right")
//!         .forward("to_right", fields! { "left" => 10i64 }, |a| {
//!             a.outputs(fields! { "right" => 10i64 })
//!         })
//!         .reverse("to_left", fields! { "right" => 10i64 }, |a| {
//!             a.outputs(fields! { "left" => 10i64 })
//!         })
//! }
//!
//! #[test]
//! fn test() {
//!     scenario().run().unwrap();
//! }
//! ```

mod error;
mod scenario;

pub use assertion::{Assertion, AssertionBuilder, Outcome};
pub use error::{ScenarioError, ScenarioResult};
pub use scenario::{Scenario, Step, StepAction};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::assertion::{Assertion, AssertionBuilder, Outcome};
    pub use crate::error::{ScenarioError, ScenarioResult};
    pub use crate::scenario::Scenario;
    pub use fieldmap_core::{fields, CallError, Environment, Fields, Function, Value};
    pub use fieldmap_processor::{ErrorKind, Processor, ProcessorOptions, TagSet};
}
