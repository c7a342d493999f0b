//! Callable values and host objects.

use std::fmt;
use std::sync::Arc;

use crate::{AccessError, AccessResult, CallError, CallResult, Value};

/// Signature of a native callable.
pub type NativeFn = dyn Fn(&[Value]) -> CallResult<Value> + Send + Sync;

/// A named callable that rules can invoke or use as a validator.
///
/// Functions are reference counted; cloning a `Function` shares the closure.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    func: Arc<NativeFn>,
}

impl Function {
    /// Wrap a closure as a callable.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value]) -> CallResult<Value> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            func: Arc::new(func),
        }
    }

    /// Wrap a one-argument predicate.
    ///
    /// The resulting function returns `True` when the predicate holds and
    /// raises `CallError::InvalidValue` otherwise, so it can be used directly
    /// as a validator.
    pub fn predicate<F>(name: impl Into<String>, pred: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        let label = name.clone();
        Self::new(name, move |args| {
            let value = expect_one(&label, args)?;
            if pred(value) {
                Ok(Value::Bool(true))
            } else {
                Err(CallError::invalid_value(format!(
                    "{} rejected {}",
                    label, value
                )))
            }
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the callable.
    pub fn call(&self, args: &[Value]) -> CallResult<Value> {
        (self.func)(args)
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

/// An application-defined value exposed to rules.
///
/// Only `type_name` and `attr` are required; element access and membership
/// are opt-in.
pub trait Object: fmt::Debug + Send + Sync {
    /// Name used in diagnostics.
    fn type_name(&self) -> &str;

    /// Named member lookup for `obj.name`.
    fn attr(&self, name: &str) -> Option<Value>;

    /// Element lookup for `obj[key]`.
    fn get_item(&self, _key: &Value) -> AccessResult<Value> {
        Err(AccessError::not_subscriptable(self.type_name()))
    }

    /// Membership test; `None` means the object is not a container.
    fn contains(&self, _item: &Value) -> Option<bool> {
        None
    }
}

/// Check that exactly one argument was passed.
pub fn expect_one<'a>(name: &str, args: &'a [Value]) -> CallResult<&'a Value> {
    match args {
        [value] => Ok(value),
        _ => Err(CallError::failed(format!(
            "{}() takes exactly one argument ({} given)",
            name,
            args.len()
        ))),
    }
}

/// Check the argument count against an inclusive range.
pub fn expect_args(name: &str, args: &[Value], min: usize, max: usize) -> CallResult<()> {
    if args.len() < min || args.len() > max {
        let expected = if min == max {
            format!("{}", min)
        } else {
            format!("{} to {}", min, max)
        };
        return Err(CallError::failed(format!(
            "{}() takes {} arguments ({} given)",
            name,
            expected,
            args.len()
        )));
    }
    Ok(())
}
