//! Type parsing

use super::ast::*;
use super::state::ParserState;
use super::ParseError;
use crate::frontend::lexer::tokens::TokenKind;

impl<'a> ParserState<'a> {
    /// Parse a type: `int | char | bool | float | string | identifier`
    pub fn parse_type(
        &mut self,
        message: &str,
    ) -> Result<TypeNode, ParseError> {
        if let Some(primitive) = PrimitiveType::from_token_kind(self.current().kind) {
            let token = self.advance();
            return Ok(TypeNode::Primitive(PrimitiveTypeNode {
                primitive,
                location: LocationNode::from_span(token.span),
            }));
        }

        let token = self.consume(TokenKind::Identifier, message)?;
        Ok(TypeNode::UserDefined(UserDefinedTypeNode {
            name: token.lexeme,
            location: LocationNode::from_span(token.span),
        }))
    }
}
