//! Abstract Syntax Tree types for fieldmap rules.

use std::fmt;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

// ==================== RULES ====================

/// A compiled rule: one field mapping between the left and right hand side.
///
/// Rules are produced by the parser and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub left: FieldSpec,
    pub direction: Direction,
    pub right: FieldSpec,
    pub tags: Vec<Tag>,
    /// The exact source text this rule was parsed from.
    pub source: String,
    pub span: Span,
}

impl Rule {
    /// Returns true for a single-field-spec rule, which maps a field onto
    /// itself in both directions.
    pub fn is_mirror(&self) -> bool {
        self.direction == Direction::Both
            && self.left.expr == self.right.expr
            && self.left.mandatory == self.right.mandatory
    }

    /// The field spec read by a transformation in the given direction.
    pub fn source_spec(&self, reverse: bool) -> &FieldSpec {
        if reverse {
            &self.right
        } else {
            &self.left
        }
    }

    /// The field spec written by a transformation in the given direction.
    pub fn target_spec(&self, reverse: bool) -> &FieldSpec {
        if reverse {
            &self.left
        } else {
            &self.right
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_mirror() {
            write!(f, "{}", self.left)?;
        } else {
            write!(f, "{} {} {}", self.left, self.direction, self.right)?;
        }
        if !self.tags.is_empty() {
            write!(f, " [")?;
            for (i, tag) in self.tags.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", tag)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// Which transformations a rule takes part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `=>`: forward only.
    Forward,
    /// `<=`: reverse only.
    Reverse,
    /// `<=>`: both directions.
    Both,
}

impl Direction {
    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Forward => "=>",
            Direction::Reverse => "<=",
            Direction::Both => "<=>",
        }
    }

    pub fn applies_forward(&self) -> bool {
        !matches!(self, Direction::Reverse)
    }

    pub fn applies_reverse(&self) -> bool {
        !matches!(self, Direction::Forward)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.arrow())
    }
}

/// Side of a rule a field spec sits on. Used in diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// One side of a rule.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub expr: Expr,
    /// Set by a trailing `*`: every referenced field must be present.
    pub mandatory: bool,
    pub side: Side,
}

impl FieldSpec {
    pub fn new(expr: Expr, mandatory: bool, side: Side) -> Self {
        Self {
            expr,
            mandatory,
            side,
        }
    }

    /// Fields this spec writes when it is the destination of a rule.
    pub fn assigned_fields(&self) -> Vec<&str> {
        self.expr.assigned_fields()
    }

    /// Fields this spec reads when it is the source of a rule.
    pub fn referenced_fields(&self) -> Vec<&str> {
        self.expr.referenced_fields()
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if self.mandatory {
            write!(f, " *")?;
        }
        Ok(())
    }
}

/// A rule tag: `name` or `!name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub negated: bool,
}

impl Tag {
    pub fn new(name: impl Into<String>, negated: bool) -> Self {
        Self {
            name: name.into(),
            negated,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!")?;
        }
        f.write_str(&self.name)
    }
}

// ==================== EXPRESSIONS ====================

/// A literal constant.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralKind {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralKind::None => write!(f, "None"),
            LiteralKind::Bool(true) => write!(f, "True"),
            LiteralKind::Bool(false) => write!(f, "False"),
            LiteralKind::Int(i) => write!(f, "{}", i),
            LiteralKind::Float(fl) => write!(f, "{:?}", fl),
            LiteralKind::String(s) => {
                write!(f, "'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
            }
        }
    }
}

/// An expression: one side of a rule, or a part of one.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Constant: `10`, `'a'`, `None`.
    Literal(Literal),
    /// Input field lookup: `$name`.
    Field(String, Span),
    /// Environment lookup: `int`.
    Name(String, Span),
    /// Fixed-arity grouping: `(a, b)`, `(a,)`.
    Grouping(Vec<Expr>, Span),
    /// Ordered sequence: `[a, b]`.
    Sequence(Vec<Expr>, Span),
    /// Key/value mapping with literal keys: `{'a': $x}`.
    Mapping(Vec<(Literal, Expr)>, Span),
    /// Function application: `callee(args)`.
    Call(Box<Expr>, Vec<Expr>, Span),
    /// Attribute access: `object.name`.
    Attr(Box<Expr>, String, Span),
    /// Indexed access: `object[index]`.
    Index(Box<Expr>, Box<Expr>, Span),
    /// Half-open range access: `object[low:high]`.
    Range(Box<Expr>, Box<Expr>, Box<Expr>, Span),
    /// Validated field: `$field:validator:validator`.
    Validation(Box<Expr>, Vec<Expr>, Span),
}

impl Expr {
    /// Get the span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(lit) => lit.span,
            Expr::Field(_, s) => *s,
            Expr::Name(_, s) => *s,
            Expr::Grouping(_, s) => *s,
            Expr::Sequence(_, s) => *s,
            Expr::Mapping(_, s) => *s,
            Expr::Call(_, _, s) => *s,
            Expr::Attr(_, _, s) => *s,
            Expr::Index(_, _, s) => *s,
            Expr::Range(_, _, _, s) => *s,
            Expr::Validation(_, _, s) => *s,
        }
    }

    /// Child expressions in declaration order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Literal(_) | Expr::Field(..) | Expr::Name(..) => Vec::new(),
            Expr::Grouping(items, _) | Expr::Sequence(items, _) => items.iter().collect(),
            Expr::Mapping(pairs, _) => pairs.iter().map(|(_, value)| value).collect(),
            Expr::Call(callee, args, _) => {
                let mut children = vec![callee.as_ref()];
                children.extend(args.iter());
                children
            }
            Expr::Attr(object, _, _) => vec![object.as_ref()],
            Expr::Index(object, index, _) => vec![object.as_ref(), index.as_ref()],
            Expr::Range(object, low, high, _) => {
                vec![object.as_ref(), low.as_ref(), high.as_ref()]
            }
            Expr::Validation(target, validators, _) => {
                let mut children = vec![target.as_ref()];
                children.extend(validators.iter());
                children
            }
        }
    }

    /// Fields this expression writes when it is a rule's destination.
    ///
    /// Field references assign themselves, validations assign their target
    /// only, and every other node concatenates its children.
    pub fn assigned_fields(&self) -> Vec<&str> {
        match self {
            Expr::Field(name, _) => vec![name.as_str()],
            Expr::Validation(target, _, _) => target.assigned_fields(),
            other => other
                .children()
                .into_iter()
                .flat_map(Expr::assigned_fields)
                .collect(),
        }
    }

    /// Fields this expression reads when it is a rule's source, validator
    /// operands included.
    pub fn referenced_fields(&self) -> Vec<&str> {
        match self {
            Expr::Field(name, _) => vec![name.as_str()],
            other => other
                .children()
                .into_iter()
                .flat_map(Expr::referenced_fields)
                .collect(),
        }
    }

    /// Render the node structure, e.g. `Call(Name(max), Field(a))`.
    pub fn show_tree(&self) -> String {
        match self {
            Expr::Literal(lit) => lit.kind.to_string(),
            Expr::Field(name, _) => format!("Field({})", name),
            Expr::Name(name, _) => format!("Name({})", name),
            Expr::Attr(object, attr, _) => format!("Attr({}, {})", object.show_tree(), attr),
            other => {
                let label = match other {
                    Expr::Grouping(..) => "Grouping",
                    Expr::Sequence(..) => "Sequence",
                    Expr::Mapping(..) => "Mapping",
                    Expr::Call(..) => "Call",
                    Expr::Index(..) => "Index",
                    Expr::Range(..) => "Range",
                    _ => "Validation",
                };
                let children: Vec<String> =
                    other.children().iter().map(|c| c.show_tree()).collect();
                format!("{}({})", label, children.join(", "))
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(lit) => write!(f, "{}", lit.kind),
            Expr::Field(name, _) => write!(f, "${}", name),
            Expr::Name(name, _) => f.write_str(name),
            Expr::Grouping(items, _) => {
                write!(f, "(")?;
                write_list(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Expr::Sequence(items, _) => {
                write!(f, "[")?;
                write_list(f, items)?;
                write!(f, "]")
            }
            Expr::Mapping(pairs, _) => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key.kind, value)?;
                }
                write!(f, "}}")
            }
            Expr::Call(callee, args, _) => {
                write!(f, "{}(", callee)?;
                write_list(f, args)?;
                write!(f, ")")
            }
            Expr::Attr(object, attr, _) => write!(f, "{}.{}", object, attr),
            Expr::Index(object, index, _) => write!(f, "{}[{}]", object, index),
            Expr::Range(object, low, high, _) => write!(f, "{}[{}:{}]", object, low, high),
            Expr::Validation(target, validators, _) => {
                write!(f, "{}", target)?;
                for validator in validators {
                    write!(f, ":{}", validator)?;
                }
                Ok(())
            }
        }
    }
}
