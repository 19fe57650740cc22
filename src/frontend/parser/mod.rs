//! Parser module
//!
//! Single-lookahead recursive descent parser for Flecha. One method per
//! grammar rule, built on the `advance`/`check`/`match_token`/`consume`
//! primitives of [`ParserState`]:
//!
//! ```text
//! program         ::= ':' identifier statement*
//! statement       ::= variable_decl | allocation_stmt
//! allocation_stmt ::= type '!' identifier '=' 'allot' '(' type ')' ['->' expression] ';'
//! variable_decl   ::= type '!' identifier '=' expression ';'
//! type            ::= 'int' | 'char' | 'bool' | 'float' | 'string' | identifier
//! expression      ::= NumberLiteral | FloatLiteral | StringLiteral | CharLiteral | identifier
//! ```
//!
//! There is no error recovery: the first mismatch aborts the parse and no
//! partial tree is returned.

pub mod ast;
mod expr;
mod state;
mod stmt;
mod type_parser;
pub mod visit;

pub use state::ParserState;

use tracing::debug;

use crate::frontend::lexer::tokens::*;
use ast::*;

/// Parse tokens into a program tree
///
/// # Arguments
/// * `tokens` - Token stream from the lexer
///
/// # Returns
/// The program root or the first parse error
///
/// # Example
/// ```text
/// :main
/// int! answer = 42;
/// int! ptr = allot(int) -> answer;
/// ```
pub fn parse(tokens: &[Token]) -> Result<ProgramNode, ParseError> {
    debug!("Parsing {} tokens", tokens.len());
    let mut state = ParserState::new(tokens);
    let program = state.parse_program()?;
    debug!(
        "Parsed program '{}' with {} statements",
        program.package_name(),
        program.statements().len()
    );
    Ok(program)
}

/// Parse a single expression
///
/// # Arguments
/// * `tokens` - Token stream
///
/// # Returns
/// Parsed expression or error
pub fn parse_expression(tokens: &[Token]) -> Result<Expression, ParseError> {
    ParserState::new(tokens).parse_expression()
}

/// Parse error types
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("UnexpectedToken: {message} Found: {lexeme} at line {line}, column {column}")]
    UnexpectedToken {
        message: String,
        found: TokenKind,
        lexeme: String,
        line: usize,
        column: usize,
    },

    #[error("ExpectedExpression: Expected expression Found: {lexeme} at line {line}, column {column}")]
    ExpectedExpression {
        found: TokenKind,
        lexeme: String,
        line: usize,
        column: usize,
    },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { line, .. } | ParseError::ExpectedExpression { line, .. } => {
                *line
            }
        }
    }

    pub fn column(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { column, .. }
            | ParseError::ExpectedExpression { column, .. } => *column,
        }
    }

    /// Lexeme of the offending token
    pub fn lexeme(&self) -> &str {
        match self {
            ParseError::UnexpectedToken { lexeme, .. }
            | ParseError::ExpectedExpression { lexeme, .. } => lexeme,
        }
    }

    /// Kind of the offending token
    pub fn found(&self) -> TokenKind {
        match self {
            ParseError::UnexpectedToken { found, .. } | ParseError::ExpectedExpression { found, .. } => {
                *found
            }
        }
    }
}

#[cfg(test)]
mod tests;
