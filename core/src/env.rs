//! Environment: the names rules can resolve.

use std::collections::HashMap;

use crate::{builtins, CallResult, Function, Value};

/// A table of named values and callables supplied by the embedding
/// application.
///
/// Rules never define names; every identifier that is not a literal or a
/// `$field` is looked up here.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an environment holding the builtin functions
    /// (`int`, `str`, `set`, `split`, `concat`, ...).
    pub fn builtins() -> Self {
        builtins::install(Self::new())
    }

    /// Bind a value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Bind a native function under its own name.
    pub fn with_fn<F>(self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value]) -> CallResult<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        self.with(name.clone(), Function::new(name, func))
    }

    /// Add every binding from `other`, replacing existing names.
    pub fn merge(mut self, other: Environment) -> Self {
        self.bindings.extend(other.bindings);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.bindings.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bound names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(|s| s.as_str())
    }
}
