//! Lexer 单元测试
//!
//! 测试词法分析器的分词功能
#![allow(unused_imports)]
use crate::frontend::lexer::{tokenize, LexError, Lexer, Token, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn pairs(source: &str) -> Vec<(TokenKind, String)> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|t| (t.kind, t.lexeme))
        .collect()
}

#[cfg(test)]
mod lexer_basic_tests {
    use super::*;

    #[test]
    fn test_empty_source() {
        let tokens = tokenize("").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(tokens[0].lexeme, "");
    }

    #[test]
    fn test_whitespace_only() {
        let tokens = tokenize("   \t\n\r   \n").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn test_eof_is_repeatable() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
        for _ in 0..3 {
            let token = lexer.next_token().unwrap();
            assert_eq!(token.kind, TokenKind::Eof);
            assert_eq!(token.line(), 1);
            assert_eq!(token.column(), 2);
        }
    }

    #[test]
    fn test_iterator_stops_after_eof() {
        let tokens: Vec<_> = Lexer::new("a b").collect();
        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().all(|t| t.is_ok()));
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(
            pairs("variable1 _v_ar2"),
            vec![
                (TokenKind::Identifier, "variable1".to_string()),
                (TokenKind::Identifier, "_v_ar2".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_identifier_stops_at_operator() {
        assert_eq!(
            kinds("my_var=x"),
            vec![
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }
}

#[cfg(test)]
mod lexer_keywords_tests {
    use super::*;

    #[test]
    fn test_type_keywords() {
        assert_eq!(
            pairs("int char bool"),
            vec![
                (TokenKind::Int, "int".to_string()),
                (TokenKind::Char, "char".to_string()),
                (TokenKind::Bool, "bool".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_all_keywords() {
        assert_eq!(
            kinds("float string void strict method class construct destruct return allot dellot"),
            vec![
                TokenKind::Float,
                TokenKind::String,
                TokenKind::Void,
                TokenKind::Strict,
                TokenKind::Method,
                TokenKind::Class,
                TokenKind::Construct,
                TokenKind::Destruct,
                TokenKind::Return,
                TokenKind::Allot,
                TokenKind::Dellot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(
            pairs("integer allotted"),
            vec![
                (TokenKind::Identifier, "integer".to_string()),
                (TokenKind::Identifier, "allotted".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }
}

#[cfg(test)]
mod lexer_operator_tests {
    use super::*;

    #[test]
    fn test_multi_char_operators() {
        assert_eq!(
            pairs("-> ** == <="),
            vec![
                (TokenKind::AssignVal, "->".to_string()),
                (TokenKind::Pow, "**".to_string()),
                (TokenKind::Compare, "==".to_string()),
                (TokenKind::LessEqual, "<=".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_remaining_multi_char_operators() {
        assert_eq!(
            kinds(">= && || |="),
            vec![
                TokenKind::GreaterEqual,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::NotEqual,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_single_char_prefixes() {
        assert_eq!(
            kinds("- * = < > & |"),
            vec![
                TokenKind::Sub,
                TokenKind::Mul,
                TokenKind::Equal,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Ampersand,
                TokenKind::Not,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators_without_spaces() {
        // `***` is Pow followed by Mul, `-->` is Sub followed by AssignVal
        assert_eq!(
            kinds("***-->"),
            vec![
                TokenKind::Pow,
                TokenKind::Mul,
                TokenKind::Sub,
                TokenKind::AssignVal,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(
            pairs("! ? ( ) [ ] { }"),
            vec![
                (TokenKind::Bang, "!".to_string()),
                (TokenKind::AddressRef, "?".to_string()),
                (TokenKind::LParen, "(".to_string()),
                (TokenKind::RParen, ")".to_string()),
                (TokenKind::LBracket, "[".to_string()),
                (TokenKind::RBracket, "]".to_string()),
                (TokenKind::LCurly, "{".to_string()),
                (TokenKind::RCurly, "}".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_arithmetic_operators() {
        assert_eq!(
            kinds("+ / ^ % ; :"),
            vec![
                TokenKind::Add,
                TokenKind::Div,
                TokenKind::Xor,
                TokenKind::Mod,
                TokenKind::SemiColon,
                TokenKind::Colon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_bare_ampersand_has_explicit_kind() {
        let tokens = tokenize("&x").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Ampersand);
        assert_eq!(tokens[0].lexeme, "&");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_unknown_characters_are_kept() {
        assert_eq!(
            pairs("@ # é"),
            vec![
                (TokenKind::Unknown, "@".to_string()),
                (TokenKind::Unknown, "#".to_string()),
                (TokenKind::Unknown, "é".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }
}

#[cfg(test)]
mod lexer_number_tests {
    use super::*;

    #[test]
    fn test_numbers() {
        assert_eq!(
            pairs("123 0 3.14"),
            vec![
                (TokenKind::NumberLiteral, "123".to_string()),
                (TokenKind::NumberLiteral, "0".to_string()),
                (TokenKind::FloatLiteral, "3.14".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_second_point_ends_number() {
        assert_eq!(
            pairs("1.2.3"),
            vec![
                (TokenKind::FloatLiteral, "1.2".to_string()),
                (TokenKind::Unknown, ".".to_string()),
                (TokenKind::NumberLiteral, "3".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_trailing_point_is_float() {
        assert_eq!(
            pairs("7."),
            vec![
                (TokenKind::FloatLiteral, "7.".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_number_followed_by_identifier() {
        assert_eq!(
            pairs("42abc"),
            vec![
                (TokenKind::NumberLiteral, "42".to_string()),
                (TokenKind::Identifier, "abc".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }
}

#[cfg(test)]
mod lexer_string_tests {
    use super::*;

    #[test]
    fn test_string_escapes_are_decoded() {
        let tokens = tokenize("\"a\\nb\"").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].lexeme, "a\nb");
        assert_eq!(tokens[0].lexeme.chars().count(), 3);
    }

    #[test]
    fn test_all_string_escapes() {
        let tokens = tokenize(r#""\t\\\"\q""#).unwrap();
        assert_eq!(tokens[0].lexeme, "\t\\\"q");
    }

    #[test]
    fn test_empty_string() {
        let tokens = tokenize("\"\"").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].lexeme, "");
    }

    #[test]
    fn test_string_may_span_lines() {
        let tokens = tokenize("\"one\ntwo\" x").unwrap();
        assert_eq!(tokens[0].lexeme, "one\ntwo");
        assert_eq!(tokens[1].line(), 2);
        assert_eq!(tokens[1].column(), 6);
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("\"abc").unwrap_err();
        assert!(matches!(
            err,
            LexError::UnterminatedLiteral {
                literal: "string",
                ..
            }
        ));
        assert_eq!(err.line(), 1);
        assert_eq!(err.lexeme(), "\"abc");
    }

    #[test]
    fn test_unterminated_string_after_backslash() {
        let err = tokenize("\"abc\\").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedLiteral { .. }));
    }
}

#[cfg(test)]
mod lexer_char_tests {
    use super::*;

    #[test]
    fn test_char_literal() {
        let tokens = tokenize("'a'").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::CharLiteral);
        assert_eq!(tokens[0].lexeme, "a");
    }

    #[test]
    fn test_char_escapes() {
        assert_eq!(tokenize(r"'\n'").unwrap()[0].lexeme, "\n");
        assert_eq!(tokenize(r"'\t'").unwrap()[0].lexeme, "\t");
        assert_eq!(tokenize(r"'\\'").unwrap()[0].lexeme, "\\");
        assert_eq!(tokenize(r"'\''").unwrap()[0].lexeme, "'");
    }

    #[test]
    fn test_unterminated_char() {
        let err = tokenize("'a").unwrap_err();
        assert!(matches!(
            err,
            LexError::UnterminatedLiteral {
                literal: "character",
                ..
            }
        ));
    }

    #[test]
    fn test_lone_quote_is_unterminated() {
        assert!(matches!(
            tokenize("'").unwrap_err(),
            LexError::UnterminatedLiteral { .. }
        ));
    }

    #[test]
    fn test_multi_char_literal_is_invalid() {
        let err = tokenize("'ab'").unwrap_err();
        assert!(matches!(err, LexError::InvalidCharacterLiteral { .. }));
        assert_eq!(err.lexeme(), "'ab'");
    }

    #[test]
    fn test_empty_char_literal_is_invalid() {
        assert!(matches!(
            tokenize("''").unwrap_err(),
            LexError::InvalidCharacterLiteral { .. }
        ));
    }

    #[test]
    fn test_unclosed_multi_char_on_line_is_unterminated() {
        assert!(matches!(
            tokenize("'ab\n'").unwrap_err(),
            LexError::UnterminatedLiteral { .. }
        ));
    }

    #[test]
    fn test_invalid_escape() {
        let err = tokenize(r"'\q'").unwrap_err();
        assert!(matches!(err, LexError::InvalidEscape { escape: 'q', .. }));
    }

    #[test]
    fn test_error_message_format() {
        let err = tokenize("x\n  'ab'").unwrap_err();
        assert_eq!(
            err.to_string(),
            "InvalidCharacterLiteral: Character literal must hold exactly one character Found: 'ab' at line 2, column 3"
        );

        let err = tokenize("\"abc").unwrap_err();
        assert_eq!(
            err.to_string(),
            "UnterminatedLiteral: Unterminated string literal at line 1, column 1"
        );
    }
}

#[cfg(test)]
mod lexer_position_tests {
    use super::*;

    #[test]
    fn test_positions_across_lines() {
        let tokens = tokenize(":main\n\nint! var = allot(int);").unwrap();
        let positions: Vec<_> = tokens.iter().map(|t| (t.line(), t.column())).collect();
        assert_eq!(
            positions,
            vec![
                (1, 1),  // :
                (1, 2),  // main
                (3, 1),  // int
                (3, 4),  // !
                (3, 6),  // var
                (3, 10), // =
                (3, 12), // allot
                (3, 17), // (
                (3, 18), // int
                (3, 21), // )
                (3, 22), // ;
                (3, 23), // EOF
            ]
        );
    }

    #[test]
    fn test_span_covers_token_text() {
        let source = "  allot";
        let tokens = tokenize(source).unwrap();
        let span = tokens[0].span;
        assert_eq!(&source[span.start.offset..span.end.offset], "allot");
        assert_eq!(span.end.column, 8);
    }

    #[test]
    fn test_complex_statement() {
        let tokens = tokenize("int! my_var = allot(int)->42;").unwrap();
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Int,
                TokenKind::Bang,
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::Allot,
                TokenKind::LParen,
                TokenKind::Int,
                TokenKind::RParen,
                TokenKind::AssignVal,
                TokenKind::NumberLiteral,
                TokenKind::SemiColon,
                TokenKind::Eof,
            ]
        );
    }
}

#[cfg(test)]
mod lexer_fuzz_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn identifiers_lex_to_one_token(name in "[a-zA-Z_][a-zA-Z0-9_]{0,12}") {
            let tokens = tokenize(&name).unwrap();
            prop_assert_eq!(tokens.len(), 2);
            prop_assert_eq!(&tokens[0].lexeme, &name);
        }

        #[test]
        fn numbers_keep_exact_text(number in "[0-9]{1,8}(\\.[0-9]{1,6})?") {
            let tokens = tokenize(&number).unwrap();
            prop_assert_eq!(tokens.len(), 2);
            prop_assert_eq!(&tokens[0].lexeme, &number);
            let expected = if number.contains('.') {
                TokenKind::FloatLiteral
            } else {
                TokenKind::NumberLiteral
            };
            prop_assert_eq!(tokens[0].kind, expected);
        }

        #[test]
        fn arbitrary_input_never_panics(source in "\\PC{0,64}") {
            let _ = tokenize(&source);
        }
    }
}
