//! Token types

use std::fmt;

use crate::util::span::Span;

/// Token kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Type keywords
    Int,
    Char,
    Bool,
    Float,
    String,
    Void,

    // Keywords
    Strict,
    Method,
    Class,
    Return,
    Construct,
    Destruct,

    // Memory keywords
    Allot,
    Dellot,

    // Operators
    Equal,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Xor,
    Mod,
    Bang,
    Compare,
    NotEqual,
    And,
    Or,
    Not,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    // Pointer operators
    AddressRef,
    AssignVal,
    Ampersand,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    LCurly,
    RCurly,
    Colon,
    SemiColon,

    // Names and literals
    Identifier,
    NumberLiteral,
    FloatLiteral,
    StringLiteral,
    CharLiteral,

    // Any character the lexer has no category for
    Unknown,

    // Special
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Token
///
/// For string and character literals `lexeme` holds the decoded value, for
/// everything else the raw source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Line of the first character (1-indexed)
    #[inline]
    pub fn line(&self) -> usize {
        self.span.start.line
    }

    /// Column of the first character (1-indexed)
    #[inline]
    pub fn column(&self) -> usize {
        self.span.start.column
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}
