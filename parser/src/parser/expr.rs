//! Expression parsing.
//!
//! Handles the expression forms of a field spec:
//! - Validation: `$field:validator:validator` (binds loosest)
//! - Postfix: call `f(..)`, attribute `.name`, index `[i]`, range `[lo:hi]`
//! - Primary: literals, fields, names, groupings, sequences, mappings

use super::Parser;
use crate::ast::*;
use crate::error::{ParseResult, SyntaxError};
use crate::lexer::TokenKind;

/// Where an expression sits; decides what `,`, `:` and `[` mean after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Context {
    /// Directly on one side of a rule. Validators may be comma separated and
    /// a trailing tag-shaped `[...]` is left for the rule's tag list.
    TopLevel,
    /// Inside parentheses, brackets or braces, where `,` separates elements.
    Nested,
    /// Directly inside `[ ]`, where `:` separates range bounds.
    Subscript,
}

impl Parser<'_> {
    /// Parse an expression.
    pub(crate) fn parse_expr(&mut self, ctx: Context) -> ParseResult<Expr> {
        let expr = self.parse_postfix(ctx)?;

        if ctx != Context::Subscript
            && matches!(expr, Expr::Field(..))
            && self.check(&TokenKind::Colon)
        {
            return self.parse_validation(expr, ctx);
        }

        Ok(expr)
    }

    fn parse_validation(&mut self, target: Expr, ctx: Context) -> ParseResult<Expr> {
        let start = target.span();
        let mut validators = Vec::new();

        while self.check(&TokenKind::Colon)
            || (ctx == Context::TopLevel && self.check(&TokenKind::Comma))
        {
            self.advance();
            validators.push(self.parse_postfix(ctx)?);
        }

        let span = self.span_from(start);
        Ok(Expr::Validation(Box::new(target), validators, span))
    }

    fn parse_postfix(&mut self, ctx: Context) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;

        loop {
            let start = expr.span();
            match self.peek().kind {
                TokenKind::LParen => {
                    self.advance();
                    let args = self.parse_args()?;
                    let span = self.span_from(start);
                    expr = Expr::Call(Box::new(expr), args, span);
                }
                TokenKind::Dot => {
                    self.advance();
                    let attr = self.expect_name()?;
                    let span = self.span_from(start);
                    expr = Expr::Attr(Box::new(expr), attr, span);
                }
                TokenKind::LBracket => {
                    if ctx == Context::TopLevel && self.at_tag_list() {
                        break;
                    }
                    self.advance();
                    let index = self.parse_expr(Context::Subscript)?;
                    if self.eat(&TokenKind::Colon) {
                        let high = self.parse_expr(Context::Subscript)?;
                        self.expect(&TokenKind::RBracket)?;
                        let span = self.span_from(start);
                        expr = Expr::Range(Box::new(expr), Box::new(index), Box::new(high), span);
                    } else {
                        self.expect(&TokenKind::RBracket)?;
                        let span = self.span_from(start);
                        expr = Expr::Index(Box::new(expr), Box::new(index), span);
                    }
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// Decide whether the `[` at the cursor opens a rule's tag list.
    ///
    /// It does when the bracket holds only `!`? NAME items separated by
    /// commas and nothing after the closing `]` could continue the field spec.
    fn at_tag_list(&self) -> bool {
        let mut offset = 1;
        loop {
            if matches!(self.peek_kind_at(offset), TokenKind::Bang) {
                offset += 1;
            }
            if !matches!(self.peek_kind_at(offset), TokenKind::Name(_)) {
                return false;
            }
            offset += 1;
            match self.peek_kind_at(offset) {
                TokenKind::Comma => offset += 1,
                TokenKind::RBracket => break,
                _ => return false,
            }
        }

        let after = self.peek_kind_at(offset + 1);
        !(after.is_arrow()
            || matches!(
                after,
                TokenKind::Star | TokenKind::Dot | TokenKind::LParen | TokenKind::LBracket
            ))
    }

    /// Parse call arguments after `(`; the list may be empty.
    fn parse_args(&mut self) -> ParseResult<Vec<Expr>> {
        let mut args = Vec::new();
        if self.eat(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr(Context::Nested)?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();

        match &token.kind {
            TokenKind::None
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Int(_)
            | TokenKind::Float(_)
            | TokenKind::String(_) => Ok(Expr::Literal(self.parse_literal()?)),

            TokenKind::Field(name) => {
                self.advance();
                Ok(Expr::Field(name.clone(), token.span))
            }

            TokenKind::Name(name) => {
                self.advance();
                Ok(Expr::Name(name.clone(), token.span))
            }

            TokenKind::LParen => self.parse_grouping(),
            TokenKind::LBracket => self.parse_sequence(),
            TokenKind::LBrace => self.parse_mapping(),

            _ => Err(self.unexpected("expression")),
        }
    }

    pub(crate) fn parse_literal(&mut self) -> ParseResult<Literal> {
        let token = self.peek().clone();
        let kind = match token.kind {
            TokenKind::None => LiteralKind::None,
            TokenKind::True => LiteralKind::Bool(true),
            TokenKind::False => LiteralKind::Bool(false),
            TokenKind::Int(n) => LiteralKind::Int(n),
            TokenKind::Float(f) => LiteralKind::Float(f),
            TokenKind::String(s) => LiteralKind::String(s),
            _ => return Err(self.unexpected("literal")),
        };
        self.advance();
        Ok(Literal {
            kind,
            span: token.span,
        })
    }

    /// `( expr, ... [,] )`. A trailing comma is accepted after any number of
    /// elements, so `(x)`, `(x,)` and `(x, y,)` are all groupings.
    fn parse_grouping(&mut self) -> ParseResult<Expr> {
        let start = self.expect(&TokenKind::LParen)?.span;
        let mut items = vec![self.parse_expr(Context::Nested)?];

        while self.eat(&TokenKind::Comma) {
            if self.check(&TokenKind::RParen) {
                break;
            }
            items.push(self.parse_expr(Context::Nested)?);
        }

        self.expect(&TokenKind::RParen)?;
        let span = self.span_from(start);
        Ok(Expr::Grouping(items, span))
    }

    /// `[ expr, ... ]`, at least one element.
    fn parse_sequence(&mut self) -> ParseResult<Expr> {
        let start = self.expect(&TokenKind::LBracket)?.span;
        let mut items = vec![self.parse_expr(Context::Nested)?];

        while self.eat(&TokenKind::Comma) {
            items.push(self.parse_expr(Context::Nested)?);
        }

        self.expect(&TokenKind::RBracket)?;
        let span = self.span_from(start);
        Ok(Expr::Sequence(items, span))
    }

    /// `{ literal: expr, ... }`, possibly empty.
    fn parse_mapping(&mut self) -> ParseResult<Expr> {
        let start = self.expect(&TokenKind::LBrace)?.span;
        let mut pairs = Vec::new();

        if !self.check(&TokenKind::RBrace) {
            loop {
                let key = self.parse_literal().map_err(|_| self.mapping_key_error())?;
                self.expect(&TokenKind::Colon)?;
                let value = self.parse_expr(Context::Nested)?;
                pairs.push((key, value));
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(&TokenKind::RBrace)?;
        let span = self.span_from(start);
        Ok(Expr::Mapping(pairs, span))
    }

    fn mapping_key_error(&self) -> SyntaxError {
        let token = self.peek();
        SyntaxError::unexpected_token(token.span, "literal mapping key", token.kind.name())
    }
}
