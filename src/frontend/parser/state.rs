//! Parser state and token stream management

use super::ast::LocationNode;
use super::ParseError;
use crate::frontend::lexer::tokens::*;
use crate::util::span::{Position, Span};

/// Single-lookahead cursor over a token slice
///
/// The cursor never moves past the final token. A slice that does not end in
/// EOF behaves as if one followed its last token.
#[derive(Debug)]
pub struct ParserState<'a> {
    /// Token stream
    tokens: &'a [Token],
    /// Current position in token stream
    pos: usize,
    /// Stand-in EOF returned once `pos` runs off the slice
    end: Token,
    /// End of the most recently consumed token
    last_end: Position,
}

impl<'a> ParserState<'a> {
    /// Create a new parser state
    pub fn new(tokens: &'a [Token]) -> Self {
        let origin = Position::with_offset(1, 1, 0);
        let end_pos = tokens.last().map(|t| t.span.end).unwrap_or(origin);
        let last_end = tokens.first().map(|t| t.span.start).unwrap_or(origin);

        Self {
            tokens,
            pos: 0,
            end: Token::new(TokenKind::Eof, "", Span::new(end_pos, end_pos)),
            last_end,
        }
    }

    /// Current (lookahead) token
    #[inline]
    pub fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.end)
    }

    /// Check if at end of token stream
    #[inline]
    pub fn at_end(&self) -> bool {
        self.current().is_eof()
    }

    /// Consume and return the current token; stays put on EOF
    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is_eof() {
            self.pos += 1;
            self.last_end = token.span.end;
        }
        token
    }

    /// Peek: is the current token of `kind`
    #[inline]
    pub fn check(
        &self,
        kind: TokenKind,
    ) -> bool {
        self.current().kind == kind
    }

    /// Advance only if the current token is of `kind`
    #[inline]
    pub fn match_token(
        &mut self,
        kind: TokenKind,
    ) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Require a token of `kind`, failing with `message` otherwise
    pub fn consume(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(message))
        }
    }

    /// `UnexpectedToken` error pointing at the current token
    pub fn unexpected(
        &self,
        message: impl Into<String>,
    ) -> ParseError {
        let token = self.current();
        ParseError::UnexpectedToken {
            message: message.into(),
            found: token.kind,
            lexeme: token.lexeme.clone(),
            line: token.line(),
            column: token.column(),
        }
    }

    /// `ExpectedExpression` error pointing at the current token
    pub fn expected_expression(&self) -> ParseError {
        let token = self.current();
        ParseError::ExpectedExpression {
            found: token.kind,
            lexeme: token.lexeme.clone(),
            line: token.line(),
            column: token.column(),
        }
    }

    /// Start of the current token
    #[inline]
    pub fn start(&self) -> Position {
        self.current().span.start
    }

    /// End of the last consumed token
    #[inline]
    pub fn last_end(&self) -> Position {
        self.last_end
    }

    /// Location from `start` to the end of the last consumed token
    #[inline]
    pub fn location_from(
        &self,
        start: Position,
    ) -> LocationNode {
        LocationNode::from_positions(start, self.last_end.max(start))
    }
}
