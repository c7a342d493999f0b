//! Rule parsing.
//!
//! `rule := fieldspec tags | fieldspec arrow fieldspec tags`, where
//! `fieldspec := expr ['*']` and `tags := '[' ['!'] NAME (',' ['!'] NAME)* ']'`.
//! Rules follow each other without a separator.

use super::expr::Context;
use super::Parser;
use crate::ast::*;
use crate::error::{ParseResult, SyntaxError};
use crate::lexer::TokenKind;

impl Parser<'_> {
    /// Parse one or more rules up to the end of input.
    pub(crate) fn parse_rules(&mut self) -> ParseResult<Vec<Rule>> {
        let mut rules = vec![self.parse_rule()?];
        while !self.check(&TokenKind::Eof) {
            rules.push(self.parse_rule()?);
        }
        Ok(rules)
    }

    fn parse_rule(&mut self) -> ParseResult<Rule> {
        let start = self.peek().span;
        let left = self.parse_expr(Context::TopLevel)?;
        let left_mandatory = self.eat(&TokenKind::Star);

        let (direction, right, right_mandatory) = match self.parse_direction() {
            Some(direction) => {
                let right = self.parse_expr(Context::TopLevel)?;
                let mandatory = self.eat(&TokenKind::Star);
                (direction, right, mandatory)
            }
            None => (Direction::Both, left.clone(), left_mandatory),
        };

        let tags = self.parse_tags()?;
        let span = self.span_from(start);

        Ok(Rule {
            left: FieldSpec::new(left, left_mandatory, Side::Left),
            direction,
            right: FieldSpec::new(right, right_mandatory, Side::Right),
            tags,
            source: self.slice(span).to_string(),
            span,
        })
    }

    fn parse_direction(&mut self) -> Option<Direction> {
        let direction = match self.peek().kind {
            TokenKind::BothArrow => Direction::Both,
            TokenKind::LeftArrow => Direction::Reverse,
            TokenKind::RightArrow => Direction::Forward,
            _ => return None,
        };
        self.advance();
        Some(direction)
    }

    fn parse_tags(&mut self) -> ParseResult<Vec<Tag>> {
        if self.check(&TokenKind::At) {
            return Err(SyntaxError::new(
                "'@tag' syntax is not supported, write tags as [tag]",
                self.peek().span,
            )
            .with_found("@"));
        }
        if !self.eat(&TokenKind::LBracket) {
            return Ok(Vec::new());
        }

        let mut tags = vec![self.parse_tag()?];
        while self.eat(&TokenKind::Comma) {
            tags.push(self.parse_tag()?);
        }
        self.expect(&TokenKind::RBracket)?;
        Ok(tags)
    }

    fn parse_tag(&mut self) -> ParseResult<Tag> {
        let negated = self.eat(&TokenKind::Bang);
        let name = self.expect_name()?;
        Ok(Tag::new(name, negated))
    }
}
