//! Lexer module
//!
//! Turns Flecha source text into [`Token`]s one at a time. Whitespace is
//! skipped, string and character literals are decoded, and two-character
//! operators always win over their one-character prefixes.

pub mod tokens;

use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::util::span::{Position, Span};
pub use tokens::{Token, TokenKind};

/// Lexer error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("UnterminatedLiteral: Unterminated {literal} literal at line {line}, column {column}")]
    UnterminatedLiteral {
        literal: &'static str,
        lexeme: String,
        line: usize,
        column: usize,
    },
    #[error("InvalidEscape: Invalid escape sequence '\\{escape}' in character literal at line {line}, column {column}")]
    InvalidEscape {
        escape: char,
        lexeme: String,
        line: usize,
        column: usize,
    },
    #[error("InvalidCharacterLiteral: Character literal must hold exactly one character Found: {lexeme} at line {line}, column {column}")]
    InvalidCharacterLiteral {
        lexeme: String,
        line: usize,
        column: usize,
    },
}

impl LexError {
    /// Line where the offending token starts
    pub fn line(&self) -> usize {
        match self {
            LexError::UnterminatedLiteral { line, .. }
            | LexError::InvalidEscape { line, .. }
            | LexError::InvalidCharacterLiteral { line, .. } => *line,
        }
    }

    /// Column where the offending token starts
    pub fn column(&self) -> usize {
        match self {
            LexError::UnterminatedLiteral { column, .. }
            | LexError::InvalidEscape { column, .. }
            | LexError::InvalidCharacterLiteral { column, .. } => *column,
        }
    }

    /// Raw source text consumed before the error was detected
    pub fn lexeme(&self) -> &str {
        match self {
            LexError::UnterminatedLiteral { lexeme, .. }
            | LexError::InvalidEscape { lexeme, .. }
            | LexError::InvalidCharacterLiteral { lexeme, .. } => lexeme,
        }
    }
}

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    HashMap::from([
        ("int", TokenKind::Int),
        ("char", TokenKind::Char),
        ("bool", TokenKind::Bool),
        ("float", TokenKind::Float),
        ("string", TokenKind::String),
        ("void", TokenKind::Void),
        ("strict", TokenKind::Strict),
        ("method", TokenKind::Method),
        ("class", TokenKind::Class),
        ("construct", TokenKind::Construct),
        ("destruct", TokenKind::Destruct),
        ("return", TokenKind::Return),
        ("allot", TokenKind::Allot),
        ("dellot", TokenKind::Dellot),
    ])
});

/// Tokenize a whole source text
///
/// The result always ends with exactly one [`TokenKind::Eof`] token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(source).collect::<Result<Vec<_>, _>>()?;
    debug!("Tokenized {} bytes into {} tokens", source.len(), tokens.len());
    Ok(tokens)
}

/// Streaming lexer over a source text
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<Chars<'a>>,
    offset: usize,
    line: usize,
    column: usize,
    start_offset: usize,
    start_line: usize,
    start_column: usize,
    /// Set once the iterator has yielded EOF or an error
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            offset: 0,
            line: 1,
            column: 1,
            start_offset: 0,
            start_line: 1,
            start_column: 1,
            finished: false,
        }
    }

    /// Produce the next token
    ///
    /// Once the input is exhausted every call returns an EOF token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.start_offset = self.offset;
        self.start_line = self.line;
        self.start_column = self.column;

        let c = match self.advance() {
            Some(c) => c,
            None => return Ok(self.make_token(TokenKind::Eof, "")),
        };

        let token = match c {
            '"' => self.scan_string()?,
            '\'' => self.scan_char()?,
            c if is_digit(c) => self.scan_number(),
            c if is_identifier_start(c) => self.scan_identifier(),
            c => self.scan_operator(c),
        };

        trace!(
            kind = ?token.kind,
            line = token.line(),
            column = token.column(),
            "lexed {:?}",
            token.lexeme
        );
        Ok(token)
    }

    fn position(&self) -> Position {
        Position::with_offset(self.line, self.column, self.offset)
    }

    fn start_position(&self) -> Position {
        Position::with_offset(self.start_line, self.start_column, self.start_offset)
    }

    fn span(&self) -> Span {
        Span::new(self.start_position(), self.position())
    }

    /// Source text of the token scanned so far
    fn raw_text(&self) -> &'a str {
        &self.source[self.start_offset..self.offset]
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Consume the next character if it is `expected`
    fn eat(
        &mut self,
        expected: char,
    ) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn make_token(
        &self,
        kind: TokenKind,
        lexeme: impl Into<String>,
    ) -> Token {
        Token::new(kind, lexeme, self.span())
    }

    fn scan_operator(
        &mut self,
        c: char,
    ) -> Token {
        let kind = match c {
            ';' => TokenKind::SemiColon,
            ':' => TokenKind::Colon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LCurly,
            '}' => TokenKind::RCurly,
            '+' => TokenKind::Add,
            '/' => TokenKind::Div,
            '^' => TokenKind::Xor,
            '%' => TokenKind::Mod,
            '!' => TokenKind::Bang,
            '?' => TokenKind::AddressRef,
            '-' => {
                if self.eat('>') {
                    TokenKind::AssignVal
                } else {
                    TokenKind::Sub
                }
            }
            '*' => {
                if self.eat('*') {
                    TokenKind::Pow
                } else {
                    TokenKind::Mul
                }
            }
            '=' => {
                if self.eat('=') {
                    TokenKind::Compare
                } else {
                    TokenKind::Equal
                }
            }
            '<' => {
                if self.eat('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                if self.eat('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            '&' => {
                if self.eat('&') {
                    TokenKind::And
                } else {
                    TokenKind::Ampersand
                }
            }
            '|' => {
                if self.eat('=') {
                    TokenKind::NotEqual
                } else if self.eat('|') {
                    TokenKind::Or
                } else {
                    TokenKind::Not
                }
            }
            _ => TokenKind::Unknown,
        };
        self.make_token(kind, self.raw_text())
    }

    fn scan_number(&mut self) -> Token {
        let mut has_point = false;
        while let Some(c) = self.peek() {
            if is_digit(c) {
                self.advance();
            } else if c == '.' && !has_point {
                has_point = true;
                self.advance();
            } else {
                break;
            }
        }

        let kind = if has_point {
            TokenKind::FloatLiteral
        } else {
            TokenKind::NumberLiteral
        };
        self.make_token(kind, self.raw_text())
    }

    fn scan_identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if !is_identifier_char(c) {
                break;
            }
            self.advance();
        }

        let text = self.raw_text();
        let kind = KEYWORDS.get(text).copied().unwrap_or(TokenKind::Identifier);
        self.make_token(kind, text)
    }

    fn scan_string(&mut self) -> Result<Token, LexError> {
        let mut value = String::new();
        loop {
            match self.advance() {
                None => return Err(self.unterminated("string")),
                Some('"') => break,
                Some('\\') => match self.advance() {
                    None => return Err(self.unterminated("string")),
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    // `\\`, `\"` and unknown escapes all keep the escaped character
                    Some(other) => value.push(other),
                },
                Some(c) => value.push(c),
            }
        }
        Ok(self.make_token(TokenKind::StringLiteral, value))
    }

    fn scan_char(&mut self) -> Result<Token, LexError> {
        let value = match self.advance() {
            None | Some('\n') => return Err(self.unterminated("character")),
            Some('\'') => return Err(self.invalid_char_literal()),
            Some('\\') => match self.advance() {
                None => return Err(self.unterminated("character")),
                Some('n') => '\n',
                Some('t') => '\t',
                Some('\\') => '\\',
                Some('\'') => '\'',
                Some(escape) => {
                    return Err(LexError::InvalidEscape {
                        escape,
                        lexeme: self.raw_text().to_string(),
                        line: self.start_line,
                        column: self.start_column,
                    })
                }
            },
            Some(c) => c,
        };

        if self.eat('\'') {
            return Ok(self.make_token(TokenKind::CharLiteral, value));
        }

        // More than one character: find the closing quote on this line
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
            if c == '\'' {
                return Err(self.invalid_char_literal());
            }
        }
        Err(self.unterminated("character"))
    }

    fn unterminated(
        &self,
        literal: &'static str,
    ) -> LexError {
        LexError::UnterminatedLiteral {
            literal,
            lexeme: self.raw_text().to_string(),
            line: self.start_line,
            column: self.start_column,
        }
    }

    fn invalid_char_literal(&self) -> LexError {
        LexError::InvalidCharacterLiteral {
            lexeme: self.raw_text().to_string(),
            line: self.start_line,
            column: self.start_column,
        }
    }
}

/// Yields tokens up to and including the first EOF, or the first error
impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        self.finished = match &result {
            Ok(token) => token.is_eof(),
            Err(_) => true,
        };
        Some(result)
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

#[cfg(test)]
mod tests;
