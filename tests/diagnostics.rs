#[cfg(test)]
mod diagnostics_tests {
    use jlox as lox;

    use lox::error::LoxError;
    use lox::token::{Token, TokenType};

    #[test]
    fn scanner_diagnostics_carry_only_a_line() {
        let err = LoxError::lex(3, "Unexpected character.");

        assert_eq!(format!("{}", err), "[line 3] Error: Unexpected character.");
    }

    #[test]
    fn parser_diagnostics_point_at_the_offending_lexeme() {
        let token = Token::new(TokenType::EQUAL, "=".to_string(), 2);
        let err = LoxError::parse(&token, "Invalid assignment target.");

        assert_eq!(
            format!("{}", err),
            "[line 2] Error at '=': Invalid assignment target."
        );
    }

    #[test]
    fn parser_diagnostics_at_eof_say_at_end() {
        let token = Token::new(TokenType::EOF, "".to_string(), 7);
        let err = LoxError::parse(&token, "Expect expression.");

        assert_eq!(format!("{}", err), "[line 7] Error at end: Expect expression.");
    }

    #[test]
    fn resolver_diagnostics_use_the_parser_format() {
        let token = Token::new(TokenType::IDENTIFIER, "a".to_string(), 1);
        let err = LoxError::resolve(&token, "Can't read local variable in its own initializer.");

        assert_eq!(
            format!("{}", err),
            "[line 1] Error at 'a': Can't read local variable in its own initializer."
        );
    }

    #[test]
    fn runtime_diagnostics_lead_with_the_kind() {
        let err = LoxError::runtime(1, "Cannot divide by zero.");

        assert_eq!(
            format!("{}", err),
            "RuntimeError [line 1]: Cannot divide by zero."
        );
    }
}
