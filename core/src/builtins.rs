//! Builtin functions.
//!
//! Conversion builtins raise `CallError::InvalidValue` for input of the
//! right type but the wrong content (`int('10a')`), so they double as
//! validators: `$id:int`.

use std::cmp::Ordering;

use crate::methods::{join_text, split_text};
use crate::{expect_args, expect_one, CallError, CallResult, Environment, Function, Value};

pub(crate) fn install(mut env: Environment) -> Environment {
    let functions = [
        Function::new("int", to_int),
        Function::new("float", to_float),
        Function::new("str", to_str),
        Function::new("bool", to_bool),
        Function::new("len", len),
        Function::new("set", |args| collect("set", args).map(Value::set)),
        Function::new("list", |args| collect("list", args).map(Value::List)),
        Function::new("tuple", |args| collect("tuple", args).map(Value::Tuple)),
        Function::new("max", |args| extreme("max", args, Ordering::Greater)),
        Function::new("min", |args| extreme("min", args, Ordering::Less)),
        Function::new("abs", abs),
        Function::new("concat", concat),
        Function::new("split", split),
        Function::new("join", join),
        Function::new("lower", |args| map_str("lower", args, str::to_lowercase)),
        Function::new("upper", |args| map_str("upper", args, str::to_uppercase)),
        Function::new("strip", |args| map_str("strip", args, |s| s.trim().to_string())),
    ];
    for func in functions {
        env.insert(func.name().to_string(), func);
    }
    env
}

fn to_int(args: &[Value]) -> CallResult<Value> {
    match expect_one("int", args)? {
        Value::Int(i) => Ok(Value::Int(*i)),
        Value::Bool(b) => Ok(Value::Int(*b as i64)),
        Value::Float(f) if f.is_finite() => Ok(Value::Int(f.trunc() as i64)),
        Value::Float(f) => Err(CallError::invalid_value(format!(
            "cannot convert float {} to integer",
            f
        ))),
        Value::Str(s) => s.trim().parse::<i64>().map(Value::Int).map_err(|_| {
            CallError::invalid_value(format!("invalid literal for int() with base 10: '{}'", s))
        }),
        other => Err(CallError::failed(format!(
            "int() argument must be a string or a number, not '{}'",
            other.type_name()
        ))),
    }
}

fn to_float(args: &[Value]) -> CallResult<Value> {
    match expect_one("float", args)? {
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::Float(f) => Ok(Value::Float(*f)),
        Value::Str(s) => s.trim().parse::<f64>().map(Value::Float).map_err(|_| {
            CallError::invalid_value(format!("could not convert string to float: '{}'", s))
        }),
        other => Err(CallError::failed(format!(
            "float() argument must be a string or a number, not '{}'",
            other.type_name()
        ))),
    }
}

fn to_str(args: &[Value]) -> CallResult<Value> {
    expect_args("str", args, 0, 1)?;
    Ok(Value::Str(args.first().map(Value::to_text).unwrap_or_default()))
}

fn to_bool(args: &[Value]) -> CallResult<Value> {
    expect_args("bool", args, 0, 1)?;
    Ok(Value::Bool(args.first().is_some_and(Value::truthy)))
}

fn len(args: &[Value]) -> CallResult<Value> {
    let n = match expect_one("len", args)? {
        Value::Str(s) => s.chars().count(),
        Value::Tuple(items) | Value::List(items) | Value::Set(items) => items.len(),
        Value::Map(pairs) => pairs.len(),
        other => {
            return Err(CallError::failed(format!(
                "object of type '{}' has no len()",
                other.type_name()
            )))
        }
    };
    Ok(Value::Int(n as i64))
}

fn collect(name: &str, args: &[Value]) -> CallResult<Vec<Value>> {
    expect_args(name, args, 0, 1)?;
    match args.first() {
        None => Ok(Vec::new()),
        Some(value) => value.items().ok_or_else(|| {
            CallError::failed(format!("'{}' object is not iterable", value.type_name()))
        }),
    }
}

fn extreme(name: &str, args: &[Value], wanted: Ordering) -> CallResult<Value> {
    let candidates = match args {
        [] => return Err(CallError::failed(format!("{}() expected at least 1 argument", name))),
        [single] => single.items().ok_or_else(|| {
            CallError::failed(format!("'{}' object is not iterable", single.type_name()))
        })?,
        many => many.to_vec(),
    };
    let mut iter = candidates.into_iter();
    let mut best = iter
        .next()
        .ok_or_else(|| CallError::invalid_value(format!("{}() arg is an empty sequence", name)))?;
    for candidate in iter {
        match candidate.compare(&best) {
            Some(ordering) if ordering == wanted => best = candidate,
            Some(_) => {}
            None => {
                return Err(CallError::failed(format!(
                    "cannot compare '{}' and '{}'",
                    candidate.type_name(),
                    best.type_name()
                )))
            }
        }
    }
    Ok(best)
}

fn abs(args: &[Value]) -> CallResult<Value> {
    match expect_one("abs", args)? {
        Value::Int(i) => i
            .checked_abs()
            .map(Value::Int)
            .ok_or_else(|| CallError::invalid_value("integer overflow in abs()")),
        Value::Float(f) => Ok(Value::Float(f.abs())),
        other => Err(CallError::failed(format!(
            "bad operand type for abs(): '{}'",
            other.type_name()
        ))),
    }
}

fn concat(args: &[Value]) -> CallResult<Value> {
    Ok(Value::Str(args.iter().map(Value::to_text).collect()))
}

fn text_arg<'a>(name: &str, value: &'a Value) -> CallResult<&'a str> {
    value.as_str().ok_or_else(|| {
        CallError::failed(format!(
            "{}() argument must be str, not '{}'",
            name,
            value.type_name()
        ))
    })
}

fn split(args: &[Value]) -> CallResult<Value> {
    expect_args("split", args, 1, 2)?;
    let text = text_arg("split", &args[0])?;
    let sep = match args.get(1) {
        Some(Value::None) | None => None,
        Some(sep) => Some(text_arg("split", sep)?),
    };
    split_text(text, sep)
}

fn join(args: &[Value]) -> CallResult<Value> {
    expect_args("join", args, 2, 2)?;
    join_text(text_arg("join", &args[0])?, &args[1])
}

fn map_str(name: &str, args: &[Value], f: impl Fn(&str) -> String) -> CallResult<Value> {
    let text = text_arg(name, expect_one(name, args)?)?;
    Ok(Value::Str(f(text)))
}
