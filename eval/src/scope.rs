//! Name resolution scope.

use fieldmap_core::{Environment, Value};

/// The names visible to one transformation call.
///
/// Caller-local bindings shadow the environment the processor was built
/// with. A scope borrows both and lives only as long as the call.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    globals: &'a Environment,
    locals: Option<&'a Environment>,
}

impl<'a> Scope<'a> {
    pub fn new(globals: &'a Environment) -> Self {
        Self {
            globals,
            locals: None,
        }
    }

    /// Layer caller-local bindings over the globals.
    pub fn with_locals(mut self, locals: &'a Environment) -> Self {
        self.locals = Some(locals);
        self
    }

    /// Look up a name, locals first.
    pub fn resolve(&self, name: &str) -> Option<&'a Value> {
        self.locals
            .and_then(|locals| locals.get(name))
            .or_else(|| self.globals.get(name))
    }
}
