//! Parser tests module


use crate::frontend::lexer::tokenize;
use crate::frontend::parser::ast::*;
use crate::frontend::parser::{parse, ParseError};

/// Lex and parse a whole program, panicking on lexer errors
pub(super) fn parse_source(source: &str) -> Result<ProgramNode, ParseError> {
    let tokens = tokenize(source).expect("source should lex");
    parse(&tokens)
}
