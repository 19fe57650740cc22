//! Frontend compilation pipeline
//!
//! This module contains the lexer, parser, and tree printer.
//! The frontend transforms source code into a syntax tree.

use thiserror::Error;
use tracing::debug;

pub mod lexer;
pub mod parser;
pub mod printer;

use lexer::LexError;
use parser::ast::ProgramNode;
use parser::ParseError;

/// Compiler front end: source text to syntax tree
#[derive(Debug, Default)]
pub struct Compiler;

impl Compiler {
    /// Create a new compiler
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Compile source code to a syntax tree
    pub fn compile(
        &self,
        source: &str,
    ) -> Result<ProgramNode, CompileError> {
        debug!("Compiling source code ({} bytes)", source.len());
        let tokens = lexer::tokenize(source)?;
        debug!("Tokenized into {} tokens", tokens.len());

        let program = parser::parse(&tokens)?;
        debug!(
            "Parsing successful, got {} statements",
            program.statements().len()
        );
        Ok(program)
    }
}

/// Compilation errors
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl CompileError {
    /// Line of the offending token
    pub fn line(&self) -> usize {
        match self {
            CompileError::Lex(err) => err.line(),
            CompileError::Parse(err) => err.line(),
        }
    }

    /// Column of the offending token
    pub fn column(&self) -> usize {
        match self {
            CompileError::Lex(err) => err.column(),
            CompileError::Parse(err) => err.column(),
        }
    }
}
