//! Bound methods on builtin value types.
//!
//! `$name.lower` evaluates to a callable that captures the receiver, so
//! `$name.lower()` works through ordinary function application.

use crate::{expect_args, expect_one, CallError, CallResult, Function, Value};

pub(crate) fn bound_method(receiver: &Value, name: &str) -> Option<Function> {
    match receiver {
        Value::Str(s) => str_method(s, name),
        Value::Tuple(items) | Value::List(items) => sequence_method(items, name),
        Value::Map(pairs) => map_method(pairs, name),
        _ => None,
    }
}

fn str_arg<'a>(method: &str, value: &'a Value) -> CallResult<&'a str> {
    value.as_str().ok_or_else(|| {
        CallError::failed(format!(
            "{}() argument must be str, not {}",
            method,
            value.type_name()
        ))
    })
}

pub(crate) fn split_text(s: &str, sep: Option<&str>) -> CallResult<Value> {
    let parts: Vec<Value> = match sep {
        Some("") => return Err(CallError::invalid_value("empty separator")),
        Some(sep) => s.split(sep).map(Value::from).collect(),
        None => s.split_whitespace().map(Value::from).collect(),
    };
    Ok(Value::List(parts))
}

pub(crate) fn join_text(sep: &str, items: &Value) -> CallResult<Value> {
    let items = items.items().ok_or_else(|| {
        CallError::failed(format!("can only join an iterable, not {}", items.type_name()))
    })?;
    let mut parts = Vec::with_capacity(items.len());
    for item in &items {
        parts.push(str_arg("join", item)?.to_string());
    }
    Ok(Value::Str(parts.join(sep)))
}

fn str_method(s: &str, name: &str) -> Option<Function> {
    let s = s.to_string();
    let func = match name {
        "lower" => Function::new("lower", move |args| {
            expect_args("lower", args, 0, 0)?;
            Ok(Value::Str(s.to_lowercase()))
        }),
        "upper" => Function::new("upper", move |args| {
            expect_args("upper", args, 0, 0)?;
            Ok(Value::Str(s.to_uppercase()))
        }),
        "strip" => Function::new("strip", move |args| {
            expect_args("strip", args, 0, 0)?;
            Ok(Value::Str(s.trim().to_string()))
        }),
        "split" => Function::new("split", move |args| {
            expect_args("split", args, 0, 1)?;
            let sep = match args.first() {
                Some(Value::None) | None => None,
                Some(sep) => Some(str_arg("split", sep)?),
            };
            split_text(&s, sep)
        }),
        "join" => Function::new("join", move |args| join_text(&s, expect_one("join", args)?)),
        "replace" => Function::new("replace", move |args| {
            expect_args("replace", args, 2, 2)?;
            let old = str_arg("replace", &args[0])?;
            let new = str_arg("replace", &args[1])?;
            Ok(Value::Str(s.replace(old, new)))
        }),
        "startswith" => Function::new("startswith", move |args| {
            let prefix = str_arg("startswith", expect_one("startswith", args)?)?;
            Ok(Value::Bool(s.starts_with(prefix)))
        }),
        "endswith" => Function::new("endswith", move |args| {
            let suffix = str_arg("endswith", expect_one("endswith", args)?)?;
            Ok(Value::Bool(s.ends_with(suffix)))
        }),
        _ => return None,
    };
    Some(func)
}

fn sequence_method(items: &[Value], name: &str) -> Option<Function> {
    let items = items.to_vec();
    let func = match name {
        "count" => Function::new("count", move |args| {
            let needle = expect_one("count", args)?;
            Ok(Value::Int(items.iter().filter(|item| *item == needle).count() as i64))
        }),
        "index" => Function::new("index", move |args| {
            let needle = expect_one("index", args)?;
            items
                .iter()
                .position(|item| item == needle)
                .map(|i| Value::Int(i as i64))
                .ok_or_else(|| CallError::invalid_value(format!("{} is not in sequence", needle)))
        }),
        _ => return None,
    };
    Some(func)
}

fn map_method(pairs: &[(Value, Value)], name: &str) -> Option<Function> {
    let pairs = pairs.to_vec();
    let func = match name {
        "get" => Function::new("get", move |args| {
            expect_args("get", args, 1, 2)?;
            let found = pairs.iter().find(|(k, _)| *k == args[0]).map(|(_, v)| v.clone());
            Ok(found.unwrap_or_else(|| args.get(1).cloned().unwrap_or(Value::None)))
        }),
        "keys" => Function::new("keys", move |args| {
            expect_args("keys", args, 0, 0)?;
            Ok(Value::List(pairs.iter().map(|(k, _)| k.clone()).collect()))
        }),
        "values" => Function::new("values", move |args| {
            expect_args("values", args, 0, 0)?;
            Ok(Value::List(pairs.iter().map(|(_, v)| v.clone()).collect()))
        }),
        _ => return None,
    };
    Some(func)
}
