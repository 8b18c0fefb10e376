use std::iter::FusedIterator;

use log::{debug, info};
use phf::phf_map;

use crate::error::LoxError;
use crate::token::{Token, TokenType};

static KEYWORDS: phf::Map<&'static [u8], TokenType> = phf_map! {
    b"and" => TokenType::AND,
    b"break" => TokenType::BREAK,
    b"class" => TokenType::CLASS,
    b"else" => TokenType::ELSE,
    b"false" => TokenType::FALSE,
    b"fun" => TokenType::FUN,
    b"for" => TokenType::FOR,
    b"if" => TokenType::IF,
    b"nil" => TokenType::NIL,
    b"or" => TokenType::OR,
    b"print" => TokenType::PRINT,
    b"return" => TokenType::RETURN,
    b"super" => TokenType::SUPER,
    b"this" => TokenType::THIS,
    b"true" => TokenType::TRUE,
    b"var" => TokenType::VAR,
    b"while" => TokenType::WHILE,
};

#[derive(Debug, Clone)]
pub struct Scanner {
    source: Vec<u8>,
    start: usize,
    curr_ptr: usize,
    line: usize,
    pending_token: Option<TokenType>,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        info!("Initializing Scanner with {} bytes of source", source.len());
        Self {
            source: source.as_bytes().to_vec(),
            start: 0,
            curr_ptr: 0,
            line: 1,
            pending_token: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.source.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    fn scan_token(&mut self) -> Result<(), LoxError> {
        let byte: u8 = self.advance();
        debug!(
            "Scanning token at position {}, line {}: '{}'",
            self.curr_ptr, self.line, byte as char
        );

        match byte {
            b'(' => self.add_token(TokenType::LEFT_PAREN),

            b')' => self.add_token(TokenType::RIGHT_PAREN),

            b'{' => self.add_token(TokenType::LEFT_BRACE),

            b'}' => self.add_token(TokenType::RIGHT_BRACE),

            b',' => self.add_token(TokenType::COMMA),

            b'.' => self.add_token(TokenType::DOT),

            b';' => self.add_token(TokenType::SEMICOLON),

            b'-' => {
                let token_type: TokenType = if self.match_byte(b'-') {
                    TokenType::MINUS_MINUS
                } else if self.match_byte(b'=') {
                    TokenType::MINUS_EQUAL
                } else {
                    TokenType::MINUS
                };
                self.add_token(token_type);
            }

            b'+' => {
                let token_type: TokenType = if self.match_byte(b'+') {
                    TokenType::PLUS_PLUS
                } else if self.match_byte(b'=') {
                    TokenType::PLUS_EQUAL
                } else {
                    TokenType::PLUS
                };
                self.add_token(token_type);
            }

            b'*' => {
                let token_type: TokenType = if self.match_byte(b'=') {
                    TokenType::STAR_EQUAL
                } else {
                    TokenType::STAR
                };
                self.add_token(token_type);
            }

            b'%' => {
                let token_type: TokenType = if self.match_byte(b'=') {
                    TokenType::PERCENT_EQUAL
                } else {
                    TokenType::PERCENT
                };
                self.add_token(token_type);
            }

            b'!' => {
                let token_type: TokenType = if self.match_byte(b'=') {
                    TokenType::BANG_EQUAL
                } else {
                    TokenType::BANG
                };
                self.add_token(token_type);
            }

            b'=' => {
                let token_type: TokenType = if self.match_byte(b'=') {
                    TokenType::EQUAL_EQUAL
                } else {
                    TokenType::EQUAL
                };
                self.add_token(token_type);
            }

            b'<' => {
                let token_type: TokenType = if self.match_byte(b'=') {
                    TokenType::LESS_EQUAL
                } else {
                    TokenType::LESS
                };
                self.add_token(token_type);
            }

            b'>' => {
                let token_type: TokenType = if self.match_byte(b'=') {
                    TokenType::GREATER_EQUAL
                } else {
                    TokenType::GREATER
                };
                self.add_token(token_type);
            }

            b' ' | b'\r' | b'\t' => {
                debug!("Skipping whitespace");
            }

            b'\n' => {
                debug!("Incrementing line count to {}", self.line + 1);
                self.line += 1;
            }

            b'/' => {
                if self.match_byte(b'/') {
                    debug!("Found comment, skipping until newline");
                    while self.peek() != b'\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else if self.match_byte(b'=') {
                    self.add_token(TokenType::SLASH_EQUAL);
                } else {
                    self.add_token(TokenType::SLASH);
                }
            }

            b'"' => {
                debug!("Starting string parsing");
                self.parse_string()?;
            }

            b'0'..=b'9' => {
                debug!("Starting number parsing");
                self.parse_number();
            }

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                debug!("Starting identifier parsing");
                self.parse_identifier();
            }

            _ => {
                debug!(
                    "Unexpected character '{}' at line {}",
                    byte as char, self.line
                );

                return Err(LoxError::lex(self.line, "Unexpected character."));
            }
        }

        Ok(())
    }

    fn parse_string(&mut self) -> Result<(), LoxError> {
        while !self.is_at_end() && self.peek() != b'"' {
            if self.peek() == b'\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            debug!("Unterminated string at line {}", self.line);

            return Err(LoxError::lex(self.line, "Unterminated string."));
        }

        self.advance();

        let parsed_string: String = unsafe {
            String::from_utf8_unchecked(self.source[self.start + 1..self.curr_ptr - 1].to_vec())
        };

        info!("Parsed string literal: {}", parsed_string);

        self.add_token(TokenType::STRING(parsed_string));

        Ok(())
    }

    fn parse_number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            self.advance();

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let parsed_number: String =
            unsafe { String::from_utf8_unchecked(self.source[self.start..self.curr_ptr].to_vec()) };

        let number: f64 = parsed_number.parse().unwrap_or(0.0);

        info!("Parsed number: {}", number);

        self.add_token(TokenType::NUMBER(number));
    }

    fn parse_identifier(&mut self) {
        while self.peek().is_ascii_alphanumeric() || self.peek() == b'_' {
            self.advance();
        }

        let text: &str =
            unsafe { std::str::from_utf8_unchecked(&self.source[self.start..self.curr_ptr]) };

        match KEYWORDS.get(text.as_bytes()) {
            Some(token_type) => {
                info!("Parsed keyword: {}", text);

                self.add_token(token_type.clone());
            }

            None => {
                info!("Parsed identifier: {}", text);

                self.add_token(TokenType::IDENTIFIER);
            }
        }
    }

    #[inline]
    fn add_token(&mut self, token_type: TokenType) {
        self.pending_token = Some(token_type);
    }

    #[inline]
    fn advance(&mut self) -> u8 {
        let byte = self.source[self.curr_ptr];

        self.curr_ptr += 1;

        byte
    }

    #[inline]
    fn match_byte(&mut self, expected: u8) -> bool {
        if self.is_at_end() || self.source[self.curr_ptr] != expected {
            false
        } else {
            self.curr_ptr += 1;

            true
        }
    }

    #[inline]
    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.source[self.curr_ptr]
        }
    }

    #[inline]
    fn peek_next(&self) -> u8 {
        if self.curr_ptr + 1 >= self.len() {
            0
        } else {
            self.source[self.curr_ptr + 1]
        }
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.curr_ptr >= self.len()
    }
}

impl Iterator for Scanner {
    type Item = Result<Token, LoxError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.is_at_end() {
                if self.curr_ptr == self.len() {
                    self.curr_ptr += 1;

                    info!("Reached EOF at line {}", self.line);

                    return Some(Ok(Token::new(TokenType::EOF, "".to_string(), self.line)));
                }

                debug!("Iterator fully consumed");

                return None;
            }

            self.pending_token = None;

            self.start = self.curr_ptr;

            let result: Result<(), LoxError> = self.scan_token();

            if let Err(e) = result {
                debug!("Scan error: {}", e);
                return Some(Err(e));
            }

            if let Some(token_type) = self.pending_token.take() {
                let lexeme: &str = unsafe {
                    std::str::from_utf8_unchecked(&self.source[self.start..self.curr_ptr])
                };

                info!(
                    "Emitting token: type={:?}, lexeme={}, line={}",
                    token_type, lexeme, self.line
                );

                return Some(Ok(Token::new(token_type, lexeme.to_string(), self.line)));
            }

            // Whitespace or a comment was consumed; keep scanning.
        }
    }
}

impl FusedIterator for Scanner {}
