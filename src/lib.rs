pub mod environment;
pub mod error;
pub mod expr;
pub mod interpreter;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;
pub mod value;

use error::Reporter;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;
use token::Token;

/// Run one program (or REPL line) through the whole pipeline against the
/// given interpreter.  Diagnostics land in the reporter; evaluation is skipped
/// entirely if scanning, parsing, or resolution reported anything.
pub fn run(source: &str, interpreter: &mut Interpreter, reporter: &mut Reporter) {
    let scanner: Scanner = Scanner::new(source);

    let mut tokens: Vec<Token> = Vec::new();

    for result in scanner {
        match result {
            Ok(token) => tokens.push(token),

            Err(e) => reporter.error(&e),
        }
    }

    let statements = Parser::new(tokens, reporter).parse();

    if reporter.had_error() {
        return;
    }

    Resolver::new(interpreter, reporter).resolve(&statements);

    if reporter.had_error() {
        return;
    }

    if let Err(e) = interpreter.interpret(&statements) {
        reporter.runtime_error(&e);
    }
}
