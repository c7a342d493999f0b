//! Value types for fieldmap.
//!
//! Values enter a transformation through the input mapping and the
//! environment, flow through rule expressions, and leave through the output
//! mapping. The set of variants is closed; application types plug in through
//! the `Object` trait.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::methods::bound_method;
use crate::{AccessError, AccessResult, CallResult, Function, Object};

/// A runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absent value (`None` in rule source).
    None,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    Str(String),
    /// Fixed-arity grouping.
    Tuple(Vec<Value>),
    /// Ordered sequence.
    List(Vec<Value>),
    /// Insertion-ordered collection without duplicates.
    Set(Vec<Value>),
    /// Insertion-ordered key/value pairs with unique keys.
    Map(Vec<(Value, Value)>),
    /// Callable.
    Function(Function),
    /// Application-defined object.
    Object(Arc<dyn Object>),
}

impl Value {
    /// Build a set, dropping duplicates while keeping first-seen order.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Value {
        let mut out: Vec<Value> = Vec::new();
        for item in items {
            if !out.contains(&item) {
                out.push(item);
            }
        }
        Value::Set(out)
    }

    /// Build a mapping. A repeated key keeps its first position and takes
    /// the last value.
    pub fn map(pairs: impl IntoIterator<Item = (Value, Value)>) -> Value {
        let mut out: Vec<(Value, Value)> = Vec::new();
        for (key, value) in pairs {
            match out.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = value,
                None => out.push((key, value)),
            }
        }
        Value::Map(out)
    }

    /// Wrap an application object.
    pub fn object(obj: impl Object + 'static) -> Value {
        Value::Object(Arc::new(obj))
    }

    /// Wrap a closure as a callable value.
    pub fn function<F>(name: impl Into<String>, func: F) -> Value
    where
        F: Fn(&[Value]) -> CallResult<Value> + Send + Sync + 'static,
    {
        Value::Function(Function::new(name, func))
    }

    /// Returns true if this is `None`.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns true if this value can be invoked.
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Returns true for string values, which are never membership validators.
    pub fn is_string_like(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the elements of a tuple or list.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) | Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(func) => Some(func),
            _ => None,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Tuple(_) => "tuple",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Map(_) => "dict",
            Value::Function(_) => "function",
            Value::Object(obj) => obj.type_name(),
        }
    }

    /// Truth value: empty containers, zero and `None` are false.
    pub fn truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Tuple(items) | Value::List(items) | Value::Set(items) => !items.is_empty(),
            Value::Map(pairs) => !pairs.is_empty(),
            Value::Function(_) | Value::Object(_) => true,
        }
    }

    /// The elements produced by iterating this value, if it is iterable.
    /// Strings yield one-character strings and mappings yield their keys.
    pub fn items(&self) -> Option<Vec<Value>> {
        match self {
            Value::Str(s) => Some(s.chars().map(|c| Value::Str(c.to_string())).collect()),
            Value::Tuple(items) | Value::List(items) | Value::Set(items) => Some(items.clone()),
            Value::Map(pairs) => Some(pairs.iter().map(|(k, _)| k.clone()).collect()),
            _ => None,
        }
    }

    /// Membership test. Returns `None` if this value is not a container.
    pub fn contains(&self, item: &Value) -> Option<bool> {
        match self {
            Value::Str(s) => Some(item.as_str().is_some_and(|needle| s.contains(needle))),
            Value::Tuple(items) | Value::List(items) | Value::Set(items) => {
                Some(items.contains(item))
            }
            Value::Map(pairs) => Some(pairs.iter().any(|(k, _)| k == item)),
            Value::Object(obj) => obj.contains(item),
            _ => None,
        }
    }

    /// Element lookup: `value[key]`.
    pub fn get_item(&self, key: &Value) -> AccessResult<Value> {
        match self {
            Value::Str(s) => {
                let index = self.int_index(key)?;
                let chars: Vec<char> = s.chars().collect();
                normalize_index(chars.len(), index)
                    .map(|i| Value::Str(chars[i].to_string()))
                    .ok_or_else(|| AccessError::out_of_range(self.type_name(), index))
            }
            Value::Tuple(items) | Value::List(items) => {
                let index = self.int_index(key)?;
                normalize_index(items.len(), index)
                    .map(|i| items[i].clone())
                    .ok_or_else(|| AccessError::out_of_range(self.type_name(), index))
            }
            Value::Map(pairs) => pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .ok_or_else(|| AccessError::missing_key(key.to_string())),
            Value::Object(obj) => obj.get_item(key),
            _ => Err(AccessError::not_subscriptable(self.type_name())),
        }
    }

    /// Half-open range lookup: `value[low:high]`.
    ///
    /// `None` bounds are open ends, negative bounds count from the end and
    /// out-of-range bounds are clamped.
    pub fn slice(&self, low: &Value, high: &Value) -> AccessResult<Value> {
        let low = slice_bound(low)?;
        let high = slice_bound(high)?;
        match self {
            Value::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                let (start, end) = slice_range(chars.len(), low, high);
                Ok(Value::Str(chars[start..end].iter().collect()))
            }
            Value::Tuple(items) => {
                let (start, end) = slice_range(items.len(), low, high);
                Ok(Value::Tuple(items[start..end].to_vec()))
            }
            Value::List(items) => {
                let (start, end) = slice_range(items.len(), low, high);
                Ok(Value::List(items[start..end].to_vec()))
            }
            _ => Err(AccessError::not_sliceable(self.type_name())),
        }
    }

    /// Named member lookup: `value.name`.
    ///
    /// Objects resolve their own attributes; builtin types expose bound
    /// methods.
    pub fn attr(&self, name: &str) -> AccessResult<Value> {
        let found = match self {
            Value::Object(obj) => obj.attr(name),
            _ => bound_method(self, name).map(Value::Function),
        };
        found.ok_or_else(|| AccessError::no_attribute(self.type_name(), name))
    }

    /// Ordering between comparable scalars.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Plain text form: strings without quotes, everything else as displayed.
    pub fn to_text(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }

    fn int_index(&self, key: &Value) -> AccessResult<i64> {
        match key {
            Value::Int(i) => Ok(*i),
            other => Err(AccessError::invalid_key(
                self.type_name(),
                "integers",
                other.type_name(),
            )),
        }
    }
}

fn normalize_index(len: usize, index: i64) -> Option<usize> {
    let len = len as i64;
    let index = if index < 0 { index + len } else { index };
    if (0..len).contains(&index) {
        Some(index as usize)
    } else {
        None
    }
}

fn slice_bound(bound: &Value) -> AccessResult<Option<i64>> {
    match bound {
        Value::None => Ok(None),
        Value::Int(i) => Ok(Some(*i)),
        other => Err(AccessError::invalid_key(
            "slice",
            "integers or None",
            other.type_name(),
        )),
    }
}

fn slice_range(len: usize, low: Option<i64>, high: Option<i64>) -> (usize, usize) {
    let len = len as i64;
    let clamp = |i: i64| {
        let i = if i < 0 { i + len } else { i };
        i.clamp(0, len)
    };
    let start = low.map(clamp).unwrap_or(0);
    let end = high.map(clamp).unwrap_or(len).max(start);
    (start as usize, end as usize)
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                (*a as f64) == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) | (Value::List(a), Value::List(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => {
                a.len() == b.len() && a.iter().all(|item| b.contains(item))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .all(|(k, v)| b.iter().any(|(bk, bv)| bk == k && bv == v))
            }
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{:?}", fl),
            Value::Str(s) => write!(f, "'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            Value::Tuple(items) => {
                write!(f, "(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::List(items) => {
                write!(f, "[")?;
                write_items(f, items)?;
                write!(f, "]")
            }
            Value::Set(items) if items.is_empty() => write!(f, "set()"),
            Value::Set(items) => {
                write!(f, "{{")?;
                write_items(f, items)?;
                write!(f, "}}")
            }
            Value::Map(pairs) => {
                write!(f, "{{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
            Value::Function(func) => write!(f, "<function {}>", func.name()),
            Value::Object(obj) => write!(f, "{:?}", obj),
        }
    }
}

// Convenient From implementations
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Function> for Value {
    fn from(func: Function) -> Self {
        Value::Function(func)
    }
}

/// A named-value mapping: the input and output of a transformation.
pub type Fields = BTreeMap<String, Value>;

/// Helper macro to create field maps.
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut map = $crate::Fields::new();
            $(
                map.insert($key.to_string(), $crate::Value::from($value));
            )+
            map
        }
    };
}
