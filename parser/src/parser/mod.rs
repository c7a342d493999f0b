//! Parser for rule source text.
//!
//! This module is organized into submodules by parsing category:
//! - `expr`: Expression parsing (literals, composites, calls, access, validation)
//! - `rule`: Rule parsing (field specs, arrows, tag lists)

mod expr;
mod rule;

use tracing::debug;

use crate::ast::*;
use crate::error::{ParseResult, SyntaxError};
use crate::lexer::{Lexer, Token, TokenKind};

// ==================== PARSER STATE ====================

/// Parser state for one source text.
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser from source text.
    pub fn new(source: &'a str) -> ParseResult<Self> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self {
            source,
            tokens,
            pos: 0,
        })
    }
}

// ==================== TOKEN HELPERS ====================

impl Parser<'_> {
    pub(crate) fn peek(&self) -> &Token {
        // The lexer always terminates the stream with Eof.
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    /// Look at the token `offset` positions ahead of the current one.
    pub(crate) fn peek_kind_at(&self, offset: usize) -> &TokenKind {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)].kind
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    /// Consume the current token if it matches `kind`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.name()))
        }
    }

    pub(crate) fn expect_name(&mut self) -> ParseResult<String> {
        match self.peek().kind.clone() {
            TokenKind::Name(name) => {
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("name")),
        }
    }

    /// Build an error for the current token.
    pub(crate) fn unexpected(&self, expected: &str) -> SyntaxError {
        let token = self.peek();
        match token.kind {
            TokenKind::Eof => SyntaxError::unexpected_eof(token.span, expected),
            _ => SyntaxError::unexpected_token(token.span, expected, token.kind.name()),
        }
    }

    pub(crate) fn span_from(&self, start: Span) -> Span {
        let end_token = if self.pos > 0 {
            &self.tokens[self.pos - 1]
        } else {
            self.peek()
        };
        Span::new(start.start, end_token.span.end, start.line, start.column)
    }

    /// The source text covered by a span.
    pub(crate) fn slice(&self, span: Span) -> &str {
        self.source.get(span.start..span.end).unwrap_or_default()
    }
}

// ==================== PUBLIC API ====================

/// Compiles rule source text into rules.
///
/// The parser holds no state between calls; one instance can be shared and
/// reused for any number of sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleParser;

impl RuleParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse every rule in `source`. Fails as a whole on the first error.
    pub fn parse(&self, source: &str) -> ParseResult<Vec<Rule>> {
        let rules = Parser::new(source)?.parse_rules()?;
        debug!(rules = rules.len(), "parsed rule source");
        Ok(rules)
    }

    /// Parse every rule in `source`, naming `file` in any error.
    pub fn parse_named(&self, source: &str, file: &str) -> ParseResult<Vec<Rule>> {
        self.parse(source).map_err(|err| err.with_file(file))
    }
}

/// Parse rules from source text.
pub fn parse_rules(source: &str) -> ParseResult<Vec<Rule>> {
    RuleParser::new().parse(source)
}

/// Parse source text holding exactly one rule.
pub fn parse_rule(source: &str) -> ParseResult<Rule> {
    let mut rules = parse_rules(source)?;
    if rules.len() != 1 {
        return Err(SyntaxError::new(
            format!("expected exactly one rule, found {}", rules.len()),
            rules.get(1).map(|r| r.span).unwrap_or_default(),
        ));
    }
    Ok(rules.remove(0))
}

/// Parse a single expression, as it would appear nested inside a rule.
pub fn parse_expr(source: &str) -> ParseResult<Expr> {
    let mut parser = Parser::new(source)?;
    let expr = parser.parse_expr(expr::Context::Nested)?;
    parser.expect(&TokenKind::Eof)?;
    Ok(expr)
}

// ==================== TESTS ====================
