#[cfg(test)]
mod scanner_tests {
    use jlox as lox;

    use lox::scanner::*;
    use lox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_one_or_two_char_operators() {
        assert_token_sequence(
            "! != = == < <= > >= %",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::PERCENT, "%"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_compound_operators() {
        assert_token_sequence(
            "++ -- += -= *= /= %=",
            &[
                (TokenType::PLUS_PLUS, "++"),
                (TokenType::MINUS_MINUS, "--"),
                (TokenType::PLUS_EQUAL, "+="),
                (TokenType::MINUS_EQUAL, "-="),
                (TokenType::STAR_EQUAL, "*="),
                (TokenType::SLASH_EQUAL, "/="),
                (TokenType::PERCENT_EQUAL, "%="),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_04_compound_operators_disambiguate() {
        // A '-' followed by anything else stays a plain MINUS; same for '+'.
        assert_token_sequence(
            "a - b + c -=d",
            &[
                (TokenType::IDENTIFIER, "a"),
                (TokenType::MINUS, "-"),
                (TokenType::IDENTIFIER, "b"),
                (TokenType::PLUS, "+"),
                (TokenType::IDENTIFIER, "c"),
                (TokenType::MINUS_EQUAL, "-="),
                (TokenType::IDENTIFIER, "d"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_05_comments_and_whitespace() {
        assert_token_sequence(
            "var x; // this is a comment\nvar y; / not-a-comment",
            &[
                (TokenType::VAR, "var"),
                (TokenType::IDENTIFIER, "x"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::VAR, "var"),
                (TokenType::IDENTIFIER, "y"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::SLASH, "/"),
                (TokenType::IDENTIFIER, "not"),
                (TokenType::MINUS, "-"),
                (TokenType::IDENTIFIER, "a"),
                (TokenType::MINUS, "-"),
                (TokenType::IDENTIFIER, "comment"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_06_keywords() {
        assert_token_sequence(
            "and break class else false fun for if nil or print return super this true var while breaker",
            &[
                (TokenType::AND, "and"),
                (TokenType::BREAK, "break"),
                (TokenType::CLASS, "class"),
                (TokenType::ELSE, "else"),
                (TokenType::FALSE, "false"),
                (TokenType::FUN, "fun"),
                (TokenType::FOR, "for"),
                (TokenType::IF, "if"),
                (TokenType::NIL, "nil"),
                (TokenType::OR, "or"),
                (TokenType::PRINT, "print"),
                (TokenType::RETURN, "return"),
                (TokenType::SUPER, "super"),
                (TokenType::THIS, "this"),
                (TokenType::TRUE, "true"),
                (TokenType::VAR, "var"),
                (TokenType::WHILE, "while"),
                // A keyword prefix followed by more alphanumerics is an identifier.
                (TokenType::IDENTIFIER, "breaker"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_07_number_literals() {
        let scanner = Scanner::new("1 23.5 123.");
        let tokens: Vec<Token> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), 5);

        match tokens[0].token_type {
            TokenType::NUMBER(n) => assert_eq!(n, 1.0),
            ref other => panic!("expected NUMBER, got {:?}", other),
        }

        match tokens[1].token_type {
            TokenType::NUMBER(n) => assert_eq!(n, 23.5),
            ref other => panic!("expected NUMBER, got {:?}", other),
        }

        // A trailing dot is not part of the number.
        match tokens[2].token_type {
            TokenType::NUMBER(n) => assert_eq!(n, 123.0),
            ref other => panic!("expected NUMBER, got {:?}", other),
        }
        assert_eq!(tokens[3].token_type, TokenType::DOT);
        assert_eq!(tokens[4].token_type, TokenType::EOF);
    }

    #[test]
    fn test_scanner_08_string_literal() {
        let scanner = Scanner::new("\"hello world\"");
        let tokens: Vec<Token> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), 2);

        match &tokens[0].token_type {
            TokenType::STRING(s) => assert_eq!(s, "hello world"),
            other => panic!("expected STRING, got {:?}", other),
        }

        assert_eq!(tokens[0].lexeme, "\"hello world\"");
    }

    #[test]
    fn test_scanner_09_multiline_string_counts_lines() {
        let scanner = Scanner::new("\"a\nb\"\nvar");
        let tokens: Vec<Token> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].line, 2);
        assert_eq!(tokens[1].line, 3);
        assert_eq!(tokens[1].token_type, TokenType::VAR);
    }

    #[test]
    fn test_scanner_10_unterminated_string() {
        let scanner = Scanner::new("\"oops");
        let results: Vec<_> = scanner.collect();

        // One error, then the EOF token.
        assert_eq!(results.len(), 2);

        let err = results[0].as_ref().expect_err("expected a lexical error");
        assert_eq!(format!("{}", err), "[line 1] Error: Unterminated string.");

        let eof = results[1].as_ref().expect("expected EOF after the error");
        assert_eq!(eof.token_type, TokenType::EOF);
    }

    #[test]
    fn test_scanner_11_unexpected_chars_keep_scanning() {
        let scanner = Scanner::new(",.$(#");
        let results: Vec<_> = scanner.collect();

        // COMMA, DOT, error, LEFT_PAREN, error, EOF
        assert_eq!(results.len(), 6);

        let error_count = results.iter().filter(|r| r.is_err()).count();
        assert_eq!(error_count, 2);

        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(
                format!("{}", err).contains("Unexpected character."),
                "unexpected message: {}",
                err
            );
        }

        let tokens: Vec<&Token> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(tokens[0].token_type, TokenType::COMMA);
        assert_eq!(tokens[1].token_type, TokenType::DOT);
        assert_eq!(tokens[2].token_type, TokenType::LEFT_PAREN);
        assert_eq!(tokens[3].token_type, TokenType::EOF);
    }

    #[test]
    fn test_scanner_12_line_numbers() {
        let scanner = Scanner::new("var a;\nvar b;\n\nvar c;");
        let tokens: Vec<Token> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[3].line, 2);
        assert_eq!(tokens[6].line, 4);

        // EOF carries the final line.
        assert_eq!(tokens.last().unwrap().line, 4);
    }

    #[test]
    fn test_scanner_13_empty_source() {
        let scanner = Scanner::new("");
        let tokens: Vec<Token> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token_type, TokenType::EOF);
        assert_eq!(tokens[0].lexeme, "");
        assert_eq!(tokens[0].line, 1);
    }
}
