//! Centralised error hierarchy for the **Lox interpreter**.
//!
//! All subsystems (scanner, parser, resolver, runtime, CLI) must convert their
//! internal failure modes into one of the variants defined here.  This enables a
//! uniform `Result<T>` alias throughout the crate and ergonomic inter‑operation
//! with `anyhow`, while still preserving rich diagnostic detail.
//!
//! Printing is the job of the [`Reporter`] sink at the bottom of this module;
//! the pipeline phases hand their diagnostics to it and the driver reads the
//! accumulated flags at phase boundaries to pick an exit code.

use std::io;
use thiserror::Error;

use log::info;

use crate::token::{Token, TokenType};

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error, anchored at a token.
    #[error("[line {line}] Error{location}: {message}")]
    Parse {
        message: String,
        line: usize,

        /// `" at 'LEXEME'"`, or `" at end"` when anchored at EOF.
        location: String,
    },

    /// Static‑analysis or resolution failure (e.g. early‑binding errors).
    #[error("[line {line}] Error{location}: {message}")]
    Resolve {
        message: String,
        line: usize,
        location: String,
    },

    /// Runtime evaluation error.
    #[error("RuntimeError [line {line}]: {message}")]
    Runtime { message: String, line: usize },

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// UTF‑8 decoding failure when ingesting external text.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl LoxError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        LoxError::Lex { message, line }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!(
            "Creating Parse error: line={}, at={}, msg={}",
            token.line, token.lexeme, message
        );

        LoxError::Parse {
            message,
            line: token.line,
            location: location_of(token),
        }
    }

    /// Helper constructor for the **resolver**.
    pub fn resolve<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!(
            "Creating Resolve error: line={}, at={}, msg={}",
            token.line, token.lexeme, message
        );

        LoxError::Resolve {
            message,
            line: token.line,
            location: location_of(token),
        }
    }

    /// Helper constructor for the **interpreter**.
    pub fn runtime<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Runtime error: line={}, msg={}", line, message);

        LoxError::Runtime { message, line }
    }
}

fn location_of(token: &Token) -> String {
    if token.token_type == TokenType::EOF {
        " at end".to_string()
    } else {
        format!(" at '{}'", token.lexeme)
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;

/// Diagnostics sink shared by every phase of the pipeline.
///
/// Compile‑time diagnostics (scan, parse, resolve) set [`Reporter::had_error`];
/// runtime diagnostics set [`Reporter::had_runtime_error`].  The driver reads
/// both flags after a run: 65 for a compile error, 70 for a runtime error.
#[derive(Debug, Default)]
pub struct Reporter {
    had_error: bool,
    had_runtime_error: bool,
}

impl Reporter {
    pub fn new() -> Self {
        Reporter {
            had_error: false,
            had_runtime_error: false,
        }
    }

    /// Report a compile‑time diagnostic to stderr.
    pub fn error(&mut self, err: &LoxError) {
        eprintln!("{}", err);
        self.had_error = true;
    }

    /// Report a runtime diagnostic to stderr.
    pub fn runtime_error(&mut self, err: &LoxError) {
        eprintln!("{}", err);
        self.had_runtime_error = true;
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// The REPL clears the compile‑error flag between lines so the session
    /// keeps accepting input.
    pub fn reset_error(&mut self) {
        self.had_error = false;
    }
}
