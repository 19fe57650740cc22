//! Error reporting through the public API

use flecha::frontend::lexer::LexError;
use flecha::frontend::parser::ParseError;
use flecha::frontend::{CompileError, Compiler};

fn compile_err(source: &str) -> CompileError {
    Compiler::new().compile(source).unwrap_err()
}

#[test]
fn test_missing_semicolon_message() {
    let err = compile_err(":main\nint! x = 5\n");
    assert_eq!(
        err.to_string(),
        "UnexpectedToken: Expected ';' after declaration Found:  at line 3, column 1"
    );
}

#[test]
fn test_unterminated_string_message() {
    let err = compile_err(":main\nstring! s = \"abc");
    assert_eq!(
        err.to_string(),
        "UnterminatedLiteral: Unterminated string literal at line 2, column 13"
    );
}

#[test]
fn test_invalid_char_literal() {
    let err = compile_err(":main char! c = 'ab';");
    assert!(matches!(
        err,
        CompileError::Lex(LexError::InvalidCharacterLiteral { .. })
    ));
    assert_eq!(err.column(), 17);
}

#[test]
fn test_expected_expression() {
    let err = compile_err(":main bool! b = allot;");
    // `allot` selects the allocation production, which then wants '('
    assert!(matches!(
        err,
        CompileError::Parse(ParseError::UnexpectedToken { .. })
    ));

    let err = compile_err(":main bool! b = );");
    assert!(matches!(
        err,
        CompileError::Parse(ParseError::ExpectedExpression { .. })
    ));
}

#[test]
fn test_parse_source_error_downcasts() {
    let err = flecha::parse_source(":main int! = 1;").unwrap_err();
    let parse_err = err
        .downcast_ref::<CompileError>()
        .expect("compile error");
    assert_eq!(parse_err.line(), 1);
}
