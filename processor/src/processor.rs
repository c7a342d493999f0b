//! Bidirectional rule processor.

use fieldmap_core::{Environment, Fields, Value};
use fieldmap_eval::{EvalError, EvalResult, Evaluator, Scope};
use fieldmap_parser::{Rule, RuleParser};
use tracing::{debug, trace};

use crate::{tags_match, Error, ProcessResult, ProcessorOptions, TagSet};

/// Applies compiled rules to field mappings, forward or in reverse.
///
/// Rules are appended with [`Processor::add_rules`] and never change after
/// that. Transformations take `&self`, so a processor whose rule list is
/// complete can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct Processor {
    env: Environment,
    options: ProcessorOptions,
    parser: RuleParser,
    rules: Vec<Rule>,
}

impl Processor {
    /// Create a processor that resolves names in `env`.
    pub fn new(env: Environment) -> Self {
        Self::with_options(env, ProcessorOptions::default())
    }

    pub fn with_options(env: Environment, options: ProcessorOptions) -> Self {
        Self {
            env,
            options,
            parser: RuleParser::new(),
            rules: Vec::new(),
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn options(&self) -> &ProcessorOptions {
        &self.options
    }

    /// Compile `source` and append its rules. Returns the number of rules
    /// added; on error the rule list is left untouched.
    pub fn add_rules(&mut self, source: &str) -> ProcessResult<usize> {
        let rules = self.parser.parse(source)?;
        Ok(self.install(rules))
    }

    /// Like [`Processor::add_rules`], naming `file` in syntax errors.
    pub fn add_rules_named(&mut self, source: &str, file: &str) -> ProcessResult<usize> {
        let rules = self.parser.parse_named(source, file)?;
        Ok(self.install(rules))
    }

    fn install(&mut self, rules: Vec<Rule>) -> usize {
        let added = rules.len();
        self.rules.extend(rules);
        debug!(added, total = self.rules.len(), "installed rules");
        added
    }

    /// Compiled rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Transform left-hand fields into right-hand fields.
    ///
    /// `tags` overrides the default tag filter for this call.
    pub fn process(&self, input: &Fields, tags: Option<&TagSet>) -> ProcessResult<Fields> {
        self.run(input, tags, None, false)
    }

    /// Transform right-hand fields back into left-hand fields.
    pub fn process_reverse(&self, input: &Fields, tags: Option<&TagSet>) -> ProcessResult<Fields> {
        self.run(input, tags, None, true)
    }

    /// Alias of [`Processor::process_reverse`].
    pub fn reverse(&self, input: &Fields, tags: Option<&TagSet>) -> ProcessResult<Fields> {
        self.process_reverse(input, tags)
    }

    /// Forward transformation with caller-local bindings that shadow the
    /// processor's environment.
    pub fn process_with(
        &self,
        input: &Fields,
        tags: Option<&TagSet>,
        locals: &Environment,
    ) -> ProcessResult<Fields> {
        self.run(input, tags, Some(locals), false)
    }

    /// Reverse transformation with caller-local bindings.
    pub fn process_reverse_with(
        &self,
        input: &Fields,
        tags: Option<&TagSet>,
        locals: &Environment,
    ) -> ProcessResult<Fields> {
        self.run(input, tags, Some(locals), true)
    }

    fn run(
        &self,
        input: &Fields,
        tags: Option<&TagSet>,
        locals: Option<&Environment>,
        reverse: bool,
    ) -> ProcessResult<Fields> {
        let direction = if reverse { "reverse" } else { "forward" };
        let active = tags.or(self.options.tags.as_ref());
        debug!(direction, rules = self.rules.len(), fields = input.len(), "transform started");

        let mut scope = Scope::new(&self.env);
        if let Some(locals) = locals {
            scope = scope.with_locals(locals);
        }
        let evaluator = Evaluator::new(scope, input);

        // Built locally and only returned on success, so a failing rule
        // discards everything earlier rules produced.
        let mut output = Fields::new();
        for rule in &self.rules {
            self.apply(rule, &evaluator, input, active, reverse, &mut output)?;
        }

        debug!(direction, fields = output.len(), "transform finished");
        Ok(output)
    }

    fn apply(
        &self,
        rule: &Rule,
        evaluator: &Evaluator<'_>,
        input: &Fields,
        active: Option<&TagSet>,
        reverse: bool,
        output: &mut Fields,
    ) -> ProcessResult<()> {
        let applies = if reverse {
            rule.direction.applies_reverse()
        } else {
            rule.direction.applies_forward()
        };
        if !applies {
            trace!(rule = %rule.source, "skipped: direction");
            return Ok(());
        }
        if !tags_match(&rule.tags, active) {
            trace!(rule = %rule.source, "skipped: tags");
            return Ok(());
        }

        let source = rule.source_spec(reverse);
        let missing = missing_fields(source.referenced_fields(), input);
        if !missing.is_empty() {
            if source.mandatory && !self.options.ignore_missing {
                return Err(Error::missing_field(source.side, missing, &rule.source));
            }
            trace!(rule = %rule.source, missing = ?missing, "skipped: missing fields");
            return Ok(());
        }

        let value = evaluator
            .eval(&source.expr)
            .map_err(|err| Error::eval(err, &rule.source))?;
        if self.options.ignore_none && value.is_none() {
            trace!(rule = %rule.source, "skipped: None value");
            return Ok(());
        }

        let target = rule.target_spec(reverse);
        assign(output, &target.assigned_fields(), value)
            .map_err(|err| Error::eval(err, &rule.source))?;
        trace!(rule = %rule.source, "applied");
        Ok(())
    }
}

/// Referenced fields absent from `input`, without repeats.
fn missing_fields(referenced: Vec<&str>, input: &Fields) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for field in referenced {
        if !input.contains_key(field) && !missing.iter().any(|m| m == field) {
            missing.push(field.to_string());
        }
    }
    missing
}

/// Store `value` under the destination fields.
///
/// A single field takes the value as is. Any other count requires a tuple or
/// list of exactly that length, assigned positionally.
fn assign(output: &mut Fields, names: &[&str], value: Value) -> EvalResult<()> {
    if let [name] = names {
        output.insert(name.to_string(), value);
        return Ok(());
    }

    let fields: Vec<String> = names.iter().map(|name| name.to_string()).collect();
    let items = match value {
        Value::Tuple(items) | Value::List(items) => items,
        other => return Err(EvalError::not_sequence(fields, other.type_name())),
    };
    if items.len() != fields.len() {
        return Err(EvalError::arity_mismatch(fields, items.len()));
    }
    output.extend(fields.into_iter().zip(items));
    Ok(())
}
