//! Expression parsing

use super::ast::*;
use super::state::ParserState;
use super::ParseError;
use crate::frontend::lexer::tokens::TokenKind;

impl<'a> ParserState<'a> {
    /// Parse an expression: a literal or a variable reference
    pub fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        if let Some(kind) = LiteralKind::from_token_kind(self.current().kind) {
            let token = self.advance();
            return Ok(Expression::Literal(LiteralNode {
                kind,
                value: token.lexeme,
                location: LocationNode::from_span(token.span),
            }));
        }

        if self.check(TokenKind::Identifier) {
            let token = self.advance();
            return Ok(Expression::VariableRef(VariableRefNode {
                name: token.lexeme,
                location: LocationNode::from_span(token.span),
            }));
        }

        Err(self.expected_expression())
    }
}
