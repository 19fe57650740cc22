//! Flecha Programming Language
//!
//! Front end for Flecha: lexer, syntax tree with a visitor, and a
//! recursive-descent parser, plus a storage pass that binds `allot(...)`
//! requests to heap blocks.
//!
//! # Example
//!
//! ```flecha
//! :main
//! int! answer = 42;
//! int! slot = allot(int) -> answer;
//! ```

#![doc(html_root_url = "https://docs.rs/flecha")]
#![warn(rust_2018_idioms)]

// Public modules
pub mod frontend;
pub mod runtime;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use thiserror::Error;

use ::std::fs;
use ::std::path::Path;
use tracing::debug;

use crate::frontend::lexer::Token;
use crate::frontend::parser::ast::ProgramNode;
use crate::runtime::{Binding, Heap, Layout, StorageBinder};
use crate::util::config::FlechaConfig;
use crate::util::span::SourceFile;

/// Language version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Language name
pub const NAME: &str = "Flecha";

/// Parse source code into a syntax tree
///
/// # Example
///
/// ```
/// let program = flecha::parse_source(":main int! x = 1;").unwrap();
/// assert_eq!(program.package_name(), "main");
/// ```
pub fn parse_source(source: &str) -> Result<ProgramNode> {
    let program = frontend::Compiler::new().compile(source)?;
    Ok(program)
}

/// Tokenize a file
pub fn tokenize_file(path: &Path) -> Result<Vec<Token>> {
    let file = read_source(path)?;
    frontend::lexer::tokenize(&file.content).map_err(|err| {
        let context = located(&file, "tokenize", err.line(), err.column());
        anyhow::Error::new(err).context(context)
    })
}

/// Parse a file into a syntax tree
pub fn parse_file(path: &Path) -> Result<ProgramNode> {
    let file = read_source(path)?;
    frontend::Compiler::new()
        .compile(&file.content)
        .map_err(|err| {
            let context = located(&file, "parse", err.line(), err.column());
            anyhow::Error::new(err).context(context)
        })
}

/// Parse a file and bind storage for every allocation
///
/// Storage is released again before returning; the bindings describe what
/// a run of the program would reserve.
pub fn check_file(
    path: &Path,
    config: &FlechaConfig,
) -> Result<Vec<Binding>> {
    let program = parse_file(path)?;
    let heap = Heap::new(config.memory.heap_limit);
    let layout = Layout::from_sizes(&config.memory.sizes);
    let mut binder = StorageBinder::new(heap, layout);

    let bound = binder.bind(&program).map(<[Binding]>::to_vec);
    binder
        .release_all()
        .context("Failed to release storage")?;
    let bindings =
        bound.with_context(|| format!("Failed to bind storage: {}", path.display()))?;
    debug!("Checked {}: {} allocation(s)", path.display(), bindings.len());
    Ok(bindings)
}

fn read_source(path: &Path) -> Result<SourceFile> {
    debug!("Reading {}", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(SourceFile::new(path.display().to_string(), content))
}

/// Error context naming the file, with the offending line underneath
fn located(
    file: &SourceFile,
    action: &str,
    line: usize,
    column: usize,
) -> String {
    match file.excerpt(line, column) {
        Some(excerpt) => format!("Failed to {}: {}:{}:{}\n{}", action, file, line, column, excerpt),
        None => format!("Failed to {}: {}", action, file),
    }
}
