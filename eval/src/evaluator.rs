//! Expression evaluation.

use fieldmap_core::{CallError, Fields, Value};
use fieldmap_parser::{Expr, Literal, LiteralKind};

use crate::{EvalError, EvalResult, Scope};

/// Expression evaluator.
///
/// Borrows the input fields and the name scope of a single transformation
/// call; evaluation never mutates either.
pub struct Evaluator<'a> {
    scope: Scope<'a>,
    input: &'a Fields,
}

impl<'a> Evaluator<'a> {
    /// Create a new evaluator.
    pub fn new(scope: Scope<'a>, input: &'a Fields) -> Self {
        Self { scope, input }
    }

    /// Evaluate an expression.
    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal(lit) => Ok(literal_value(lit)),
            Expr::Field(name, _) => self.eval_field(name),
            Expr::Name(name, _) => self.eval_name(name),
            Expr::Grouping(items, _) => Ok(Value::Tuple(self.eval_all(items)?)),
            Expr::Sequence(items, _) => Ok(Value::List(self.eval_all(items)?)),
            Expr::Mapping(pairs, _) => self.eval_mapping(pairs),
            Expr::Call(callee, args, _) => self.eval_call(callee, args),
            Expr::Attr(object, attr, _) => self.eval_attr(expr, object, attr),
            Expr::Index(object, index, _) => self.eval_index(object, index),
            Expr::Range(object, low, high, _) => self.eval_range(object, low, high),
            Expr::Validation(target, validators, _) => self.eval_validation(target, validators),
        }
    }

    fn eval_field(&self, name: &str) -> EvalResult<Value> {
        self.input
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::missing_input(name))
    }

    fn eval_name(&self, name: &str) -> EvalResult<Value> {
        self.scope
            .resolve(name)
            .cloned()
            .ok_or_else(|| EvalError::unresolved_name(name))
    }

    /// Evaluate children left to right.
    fn eval_all(&self, items: &[Expr]) -> EvalResult<Vec<Value>> {
        items.iter().map(|item| self.eval(item)).collect()
    }

    fn eval_mapping(&self, pairs: &[(Literal, Expr)]) -> EvalResult<Value> {
        let mut entries = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            entries.push((literal_value(key), self.eval(value)?));
        }
        Ok(Value::map(entries))
    }

    fn eval_call(&self, callee: &Expr, args: &[Expr]) -> EvalResult<Value> {
        let func = self.eval(callee)?;
        let args = self.eval_all(args)?;

        let Some(func) = func.as_function() else {
            return Err(EvalError::not_callable(callee.to_string(), func.type_name()));
        };
        func.call(&args)
            .map_err(|err| EvalError::call_failed(callee.to_string(), err.to_string()))
    }

    fn eval_attr(&self, expr: &Expr, object: &Expr, attr: &str) -> EvalResult<Value> {
        let object = self.eval(object)?;
        object
            .attr(attr)
            .map_err(|err| EvalError::missing_attribute(expr.to_string(), err.to_string()))
    }

    fn eval_index(&self, object: &Expr, index: &Expr) -> EvalResult<Value> {
        let object = self.eval(object)?;
        let index = self.eval(index)?;
        object
            .get_item(&index)
            .map_err(|err| EvalError::bad_index(object.to_string(), err.to_string()))
    }

    fn eval_range(&self, object: &Expr, low: &Expr, high: &Expr) -> EvalResult<Value> {
        let object = self.eval(object)?;
        let low = self.eval(low)?;
        let high = self.eval(high)?;
        object
            .slice(&low, &high)
            .map_err(|err| EvalError::bad_range(object.to_string(), err.to_string()))
    }

    /// Evaluate the target once, then run each validator against it until
    /// one fails. The target's value is returned unchanged.
    fn eval_validation(&self, target: &Expr, validators: &[Expr]) -> EvalResult<Value> {
        let value = self.eval(target)?;
        let field = match target {
            Expr::Field(name, _) => name.clone(),
            other => other.to_string(),
        };

        for validator in validators {
            self.check_validator(&field, &value, validator)?;
        }

        Ok(value)
    }

    fn check_validator(&self, field: &str, value: &Value, expr: &Expr) -> EvalResult<()> {
        let validator = self.eval(expr)?;

        if let Some(func) = validator.as_function() {
            return match func.call(std::slice::from_ref(value)) {
                Ok(_) => Ok(()),
                Err(CallError::InvalidValue(message)) => Err(EvalError::validation(field, message)),
                Err(err) => Err(EvalError::call_failed(expr.to_string(), err.to_string())),
            };
        }

        if !validator.is_string_like() {
            if let Some(found) = validator.contains(value) {
                if found {
                    return Ok(());
                }
                return Err(EvalError::validation(
                    field,
                    format!("{} is not one of {}", value, validator),
                ));
            }
        }

        if validator == *value {
            Ok(())
        } else {
            Err(EvalError::validation(
                field,
                format!("{} does not equal {}", value, validator),
            ))
        }
    }
}

/// The runtime value of a literal.
pub fn literal_value(lit: &Literal) -> Value {
    match &lit.kind {
        LiteralKind::None => Value::None,
        LiteralKind::Bool(b) => Value::Bool(*b),
        LiteralKind::Int(i) => Value::Int(*i),
        LiteralKind::Float(f) => Value::Float(*f),
        LiteralKind::String(s) => Value::Str(s.clone()),
    }
}
