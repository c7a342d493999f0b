//! Lexer (tokenizer) for rule source text.

use crate::{ParseResult, Span, SyntaxError};

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keyword literals (case-sensitive)
    True,
    False,
    None,

    // Names and literals
    Name(String),
    /// `$name`; the payload excludes the `$`.
    Field(String),
    Int(i64),
    Float(f64),
    String(String),

    // Arrows
    BothArrow,  // <=>
    LeftArrow,  // <=
    RightArrow, // =>

    // Symbols
    LParen,   // (
    RParen,   // )
    LBrace,   // {
    RBrace,   // }
    LBracket, // [
    RBracket, // ]
    Comma,    // ,
    Colon,    // :
    Dot,      // .
    Star,     // *
    Bang,     // !
    At,       // @

    // End of file
    Eof,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::True => "True",
            TokenKind::False => "False",
            TokenKind::None => "None",
            TokenKind::Name(_) => "name",
            TokenKind::Field(_) => "field",
            TokenKind::Int(_) => "integer",
            TokenKind::Float(_) => "float",
            TokenKind::String(_) => "string",
            TokenKind::BothArrow => "<=>",
            TokenKind::LeftArrow => "<=",
            TokenKind::RightArrow => "=>",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::Star => "*",
            TokenKind::Bang => "!",
            TokenKind::At => "@",
            TokenKind::Eof => "end of input",
        }
    }

    /// Returns true if this token is one of the three rule arrows.
    pub fn is_arrow(&self) -> bool {
        matches!(
            self,
            TokenKind::BothArrow | TokenKind::LeftArrow | TokenKind::RightArrow
        )
    }
}

/// A token with its span.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn eof(pos: usize, line: usize, column: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            span: Span::new(pos, pos, line, column),
        }
    }
}

fn is_name_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_name_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Lexer state.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize all input into a vector of tokens.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn current_span(&self) -> Span {
        Span::new(self.pos, self.pos, self.line, self.column)
    }

    fn span_from(&self, start: usize, start_line: usize, start_col: usize) -> Span {
        Span::new(start, self.pos, start_line, start_col)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn next_char(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.pos = pos + c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(c)
        } else {
            None
        }
    }

    /// Skip whitespace and `#` comments.
    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
            } else if c == '#' {
                while let Some(c) = self.peek_char() {
                    if c == '\n' {
                        break;
                    }
                    self.next_char();
                }
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> ParseResult<Token> {
        self.skip_trivia();

        let start = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let Some(c) = self.next_char() else {
            return Ok(Token::eof(self.pos, self.line, self.column));
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '.' => TokenKind::Dot,
            '*' => TokenKind::Star,
            '!' => TokenKind::Bang,
            '@' => TokenKind::At,
            '=' => {
                if self.peek_char() == Some('>') {
                    self.next_char();
                    TokenKind::RightArrow
                } else {
                    return Err(SyntaxError::new(
                        "unexpected character '=', expected '=>'",
                        self.span_from(start, start_line, start_col),
                    ));
                }
            }
            '<' => {
                if self.peek_char() != Some('=') {
                    return Err(SyntaxError::new(
                        "unexpected character '<', expected '<=' or '<=>'",
                        self.span_from(start, start_line, start_col),
                    ));
                }
                self.next_char();
                if self.peek_char() == Some('>') {
                    self.next_char();
                    TokenKind::BothArrow
                } else {
                    TokenKind::LeftArrow
                }
            }
            '$' => self.scan_field(start, start_line, start_col)?,
            '"' | '\'' => self.scan_string(c, start, start_line, start_col)?,
            '-' if self.peek_char().is_some_and(|c| c.is_ascii_digit()) => {
                self.scan_number(c, start, start_line, start_col)?
            }
            '0'..='9' => self.scan_number(c, start, start_line, start_col)?,
            c if is_name_start(c) => self.scan_name_or_keyword(c),
            _ => {
                return Err(SyntaxError::new(
                    format!("unexpected character '{}'", c),
                    self.span_from(start, start_line, start_col),
                ));
            }
        };

        Ok(Token::new(
            kind,
            self.span_from(start, start_line, start_col),
        ))
    }

    fn scan_name(&mut self, first: char) -> String {
        let mut name = String::new();
        name.push(first);
        while let Some(c) = self.peek_char() {
            if is_name_char(c) {
                name.push(c);
                self.next_char();
            } else {
                break;
            }
        }
        name
    }

    fn scan_field(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        match self.peek_char() {
            Some(c) if is_name_start(c) => {
                self.next_char();
                Ok(TokenKind::Field(self.scan_name(c)))
            }
            _ => Err(SyntaxError::new(
                "expected field name after '$'",
                self.span_from(start, start_line, start_col),
            )),
        }
    }

    fn scan_string(
        &mut self,
        quote: char,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let mut value = String::new();

        loop {
            match self.next_char() {
                None => {
                    return Err(SyntaxError::new(
                        "unterminated string literal",
                        self.span_from(start, start_line, start_col),
                    ));
                }
                Some(c) if c == quote => break,
                Some('\\') => {
                    let escaped = match self.next_char() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('\\') => '\\',
                        Some('\'') => '\'',
                        Some('"') => '"',
                        Some(c) => {
                            return Err(SyntaxError::new(
                                format!("invalid escape sequence '\\{}'", c),
                                self.current_span(),
                            ));
                        }
                        None => {
                            return Err(SyntaxError::new(
                                "unterminated escape sequence",
                                self.current_span(),
                            ));
                        }
                    };
                    value.push(escaped);
                }
                Some(c) => value.push(c),
            }
        }

        Ok(TokenKind::String(value))
    }

    fn scan_name_or_keyword(&mut self, first: char) -> TokenKind {
        let name = self.scan_name(first);
        match name.as_str() {
            "True" => TokenKind::True,
            "False" => TokenKind::False,
            "None" => TokenKind::None,
            _ => TokenKind::Name(name),
        }
    }

    fn scan_number(
        &mut self,
        first: char,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let mut number = String::new();
        number.push(first);
        self.scan_digits(&mut number);

        // A '.' only belongs to the number when a digit follows it; `1.real`
        // lexes as an integer followed by attribute access.
        let has_decimal = if self.peek_char() == Some('.') {
            let mut lookahead = self.chars.clone();
            lookahead.next();
            match lookahead.peek() {
                Some((_, c)) if c.is_ascii_digit() => {
                    number.push('.');
                    self.next_char();
                    self.scan_digits(&mut number);
                    true
                }
                _ => false,
            }
        } else {
            false
        };

        if has_decimal {
            let value: f64 = number.parse().map_err(|_| {
                SyntaxError::new(
                    format!("invalid float literal '{}'", number),
                    self.span_from(start, start_line, start_col),
                )
            })?;
            Ok(TokenKind::Float(value))
        } else {
            let value: i64 = number.parse().map_err(|_| {
                SyntaxError::new(
                    format!("invalid integer literal '{}'", number),
                    self.span_from(start, start_line, start_col),
                )
            })?;
            Ok(TokenKind::Int(value))
        }
    }

    fn scan_digits(&mut self, number: &mut String) {
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                number.push(c);
                self.next_char();
            } else {
                break;
            }
        }
    }
}
