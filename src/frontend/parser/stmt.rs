//! Program and statement parsing

use std::rc::Rc;

use tracing::trace;

use super::ast::*;
use super::state::ParserState;
use super::visit::Node;
use super::ParseError;
use crate::frontend::lexer::tokens::*;
use crate::util::span::Position;

impl<'a> ParserState<'a> {
    /// Parse a program: `':' identifier statement* EOF`
    pub fn parse_program(&mut self) -> Result<ProgramNode, ParseError> {
        let start = self.start();
        self.consume(TokenKind::Colon, "Expected ':' before program name")?;
        let name = self.consume(TokenKind::Identifier, "Expected program name after ':'")?;
        let program_init = ProgramInitNode {
            package_name: name.lexeme,
            location: self.location_from(start),
        };

        let mut statements = Vec::new();
        while !self.at_end() {
            let statement = self.parse_statement()?;
            trace!(
                "Parsed {:?} '{}' at {}",
                statement.kind(),
                statement.declared_name(),
                statement.location()
            );
            statements.push(statement);
        }

        let location = self.location_from(start);
        let range = RangeNode::new(start.offset, self.last_end().offset.max(start.offset));

        Ok(ProgramNode {
            body: BodyNode {
                program_init,
                statements,
            },
            location,
            range,
        })
    }

    /// Parse a statement
    ///
    /// Both statement forms open with `type '!' identifier '='`; the token
    /// after `=` selects the production.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let start = self.start();
        let ty = self.parse_type("Expected a type at start of statement")?;
        self.consume(TokenKind::Bang, "Expected '!' after type")?;
        let name = self.consume(TokenKind::Identifier, "Expected variable name after '!'")?;
        self.consume(TokenKind::Equal, "Expected '=' after variable name")?;

        if self.check(TokenKind::Allot) {
            self.parse_allocation_stmt(start, ty, name)
                .map(Statement::Allocation)
        } else {
            self.parse_variable_decl(start, ty, name)
                .map(Statement::VariableDeclaration)
        }
    }

    /// Rest of `type '!' identifier '=' expression ';'`
    fn parse_variable_decl(
        &mut self,
        start: Position,
        ty: TypeNode,
        name: Token,
    ) -> Result<VariableDeclarationNode, ParseError> {
        let expression = self.parse_expression()?;
        let value = ValueNode {
            location: *expression.location(),
            ty: Rc::new(ty),
            expression: Some(expression),
        };
        let variable = VariableNode {
            name: name.lexeme,
            location: self.location_from(name.span.start),
            value,
        };
        self.consume(TokenKind::SemiColon, "Expected ';' after declaration")?;

        Ok(VariableDeclarationNode {
            location: self.location_from(start),
            variable,
        })
    }

    /// Rest of `type '!' identifier '=' 'allot' '(' type ')' ['->' expression] ';'`
    fn parse_allocation_stmt(
        &mut self,
        start: Position,
        ty: TypeNode,
        name: Token,
    ) -> Result<AllocationStatementNode, ParseError> {
        let allot_start = self.start();
        self.consume(TokenKind::Allot, "Expected 'allot'")?;
        self.consume(TokenKind::LParen, "Expected '(' after 'allot'")?;
        let allotted = self.parse_type("Expected a type inside 'allot(...)'")?;
        self.consume(TokenKind::RParen, "Expected ')' after allotted type")?;
        let allot_location = self.location_from(allot_start);

        let memory = MemoryNode {
            location: allot_location,
            allotted,
        };
        let variable = VariableNode {
            name: name.lexeme,
            location: self.location_from(name.span.start),
            value: ValueNode {
                location: allot_location,
                ty: Rc::new(ty),
                expression: None,
            },
        };
        let pointer = PointerNode::new(self.location_from(start), memory, variable);
        let allocation = AllocationNode {
            location: allot_location,
            pointer,
        };

        let arrow_start = self.start();
        let initialization = if self.match_token(TokenKind::AssignVal) {
            let value = self.parse_expression()?;
            Some(InitializationStatementNode {
                location: self.location_from(arrow_start),
                value,
            })
        } else {
            None
        };

        self.consume(TokenKind::SemiColon, "Expected ';' after allocation")?;

        Ok(AllocationStatementNode {
            location: self.location_from(start),
            allocation,
            initialization,
        })
    }
}
