use std::rc::Rc;

use log::{debug, info};

use crate::error::{LoxError, Reporter, Result};
use crate::expr::{Expr, ExprId};
use crate::stmt::{FunctionDecl, Stmt};
use crate::token::{Token, TokenType};

/// Recursive-descent parser with one-token lookahead.
///
/// Fatal errors unwind to the declaration boundary via `Result`, where
/// [`Parser::synchronize`] discards tokens up to a plausible statement start.
/// Non-fatal diagnostics (invalid assignment target, `break` outside a loop,
/// too many parameters) are reported to the [`Reporter`] and parsing
/// continues in place.
pub struct Parser<'r> {
    tokens: Vec<Token>,
    current: usize,
    loop_depth: usize,
    reporter: &'r mut Reporter,
}

impl<'r> Parser<'r> {
    pub fn new(tokens: Vec<Token>, reporter: &'r mut Reporter) -> Self {
        Parser {
            tokens,
            current: 0,
            loop_depth: 0,
            reporter,
        }
    }

    pub fn parse(&mut self) -> Vec<Stmt> {
        info!("Beginning parse over {} token(s)", self.tokens.len());

        let mut statements: Vec<Stmt> = Vec::new();

        while !self.is_at_end() {
            match self.declaration() {
                Ok(stmt) => statements.push(stmt),

                Err(e) => {
                    self.reporter.error(&e);
                    self.synchronize();
                }
            }
        }

        statements
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Declarations
    // ─────────────────────────────────────────────────────────────────────────

    fn declaration(&mut self) -> Result<Stmt> {
        if self.match_tokens(&[TokenType::CLASS]) {
            return self.class_declaration();
        }

        if self.match_tokens(&[TokenType::FUN]) {
            let decl = self.function("function")?;
            return Ok(Stmt::Function(decl));
        }

        if self.match_tokens(&[TokenType::VAR]) {
            return self.var_declaration();
        }

        self.statement()
    }

    fn class_declaration(&mut self) -> Result<Stmt> {
        let name: Token = self.consume(TokenType::IDENTIFIER, "Expect class name.")?;

        self.consume(TokenType::LEFT_BRACE, "Expect '{' before class body.")?;

        let mut methods: Vec<Rc<FunctionDecl>> = Vec::new();

        while !self.check(&TokenType::RIGHT_BRACE) && !self.is_at_end() {
            methods.push(self.function("method")?);
        }

        self.consume(TokenType::RIGHT_BRACE, "Expect '}' after class body.")?;

        Ok(Stmt::Class { name, methods })
    }

    fn function(&mut self, kind: &str) -> Result<Rc<FunctionDecl>> {
        let name: Token =
            self.consume(TokenType::IDENTIFIER, format!("Expect {} name.", kind))?;

        self.consume(
            TokenType::LEFT_PAREN,
            format!("Expect '(' after {} name.", kind),
        )?;

        let mut params: Vec<Token> = Vec::new();

        if !self.check(&TokenType::RIGHT_PAREN) {
            loop {
                if params.len() >= 255 {
                    let err = LoxError::parse(self.peek(), "Can't have more than 255 parameters.");
                    self.reporter.error(&err);
                }

                params.push(self.consume(TokenType::IDENTIFIER, "Expect parameter name.")?);

                if !self.match_tokens(&[TokenType::COMMA]) {
                    break;
                }
            }
        }

        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after parameters.")?;

        self.consume(
            TokenType::LEFT_BRACE,
            format!("Expect '{{' before {} body.", kind),
        )?;

        // A function body is a fresh loop context: a 'break' inside it cannot
        // target a loop surrounding the declaration.
        let enclosing_loops: usize = std::mem::replace(&mut self.loop_depth, 0);
        let body_result: Result<Vec<Stmt>> = self.block();
        self.loop_depth = enclosing_loops;

        let body: Vec<Stmt> = body_result?;

        Ok(Rc::new(FunctionDecl { name, params, body }))
    }

    fn var_declaration(&mut self) -> Result<Stmt> {
        let name: Token = self.consume(TokenType::IDENTIFIER, "Expect variable name.")?;

        let initializer: Option<Expr> = if self.match_tokens(&[TokenType::EQUAL]) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(
            TokenType::SEMICOLON,
            "Expect ';' after variable declaration.",
        )?;

        Ok(Stmt::Var { name, initializer })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Statements
    // ─────────────────────────────────────────────────────────────────────────

    fn statement(&mut self) -> Result<Stmt> {
        if self.match_tokens(&[TokenType::FOR]) {
            return self.for_statement();
        }

        if self.match_tokens(&[TokenType::IF]) {
            return self.if_statement();
        }

        if self.match_tokens(&[TokenType::PRINT]) {
            return self.print_statement();
        }

        if self.match_tokens(&[TokenType::RETURN]) {
            return self.return_statement();
        }

        if self.match_tokens(&[TokenType::WHILE]) {
            return self.while_statement();
        }

        if self.match_tokens(&[TokenType::BREAK]) {
            return self.break_statement();
        }

        if self.match_tokens(&[TokenType::LEFT_BRACE]) {
            return Ok(Stmt::Block(self.block()?));
        }

        self.expression_statement()
    }

    /// `for` is pure sugar: it is rewritten at parse time into the equivalent
    /// `Block`/`While` tree and never reaches the resolver or interpreter.
    fn for_statement(&mut self) -> Result<Stmt> {
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'for'.")?;

        let initializer: Option<Stmt> = if self.match_tokens(&[TokenType::SEMICOLON]) {
            None
        } else if self.match_tokens(&[TokenType::VAR]) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition: Option<Expr> = if !self.check(&TokenType::SEMICOLON) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenType::SEMICOLON, "Expect ';' after loop condition.")?;

        let increment: Option<Expr> = if !self.check(&TokenType::RIGHT_PAREN) {
            Some(self.expression()?)
        } else {
            None
        };

        let paren: Token = self.consume(TokenType::RIGHT_PAREN, "Expect ')' after for clauses.")?;

        self.loop_depth += 1;
        let body_result: Result<Stmt> = self.statement();
        self.loop_depth -= 1;

        let mut body: Stmt = body_result?;

        // Append the increment expression to the end of the body if one is given.
        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(increment)]);
        }

        // An omitted condition loops forever.
        let condition: Expr = condition.unwrap_or_else(|| {
            Expr::Literal(Token::new(TokenType::TRUE, "true".to_string(), paren.line))
        });

        body = Stmt::While {
            condition,
            body: Box::new(body),
        };

        // Prepend the initializer if one is given.
        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }

        Ok(body)
    }

    fn if_statement(&mut self) -> Result<Stmt> {
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'if'.")?;

        let condition: Expr = self.expression()?;

        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after condition.")?;

        let then_branch = Box::new(self.statement()?);

        let else_branch = if self.match_tokens(&[TokenType::ELSE]) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn print_statement(&mut self) -> Result<Stmt> {
        let value: Expr = self.expression()?;

        self.consume(TokenType::SEMICOLON, "Expect ';' after value.")?;

        Ok(Stmt::Print(value))
    }

    fn return_statement(&mut self) -> Result<Stmt> {
        let keyword: Token = self.previous().clone();

        let value: Option<Expr> = if !self.check(&TokenType::SEMICOLON) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenType::SEMICOLON, "Expect ';' after return value.")?;

        Ok(Stmt::Return { keyword, value })
    }

    fn while_statement(&mut self) -> Result<Stmt> {
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'while'.")?;

        let condition: Expr = self.expression()?;

        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after condition.")?;

        self.loop_depth += 1;
        let body_result: Result<Stmt> = self.statement();
        self.loop_depth -= 1;

        Ok(Stmt::While {
            condition,
            body: Box::new(body_result?),
        })
    }

    fn break_statement(&mut self) -> Result<Stmt> {
        let keyword: Token = self.previous().clone();

        if self.loop_depth == 0 {
            let err = LoxError::parse(&keyword, "Must be inside a loop to use 'break'.");
            self.reporter.error(&err);
        }

        self.consume(TokenType::SEMICOLON, "Expect ';' after 'break'.")?;

        Ok(Stmt::Break(keyword))
    }

    fn block(&mut self) -> Result<Vec<Stmt>> {
        let mut statements: Vec<Stmt> = Vec::new();

        while !self.check(&TokenType::RIGHT_BRACE) && !self.is_at_end() {
            statements.push(self.declaration()?);
        }

        self.consume(TokenType::RIGHT_BRACE, "Expect '}' after block.")?;

        Ok(statements)
    }

    fn expression_statement(&mut self) -> Result<Stmt> {
        let expr: Expr = self.expression()?;

        self.consume(TokenType::SEMICOLON, "Expect ';' after expression.")?;

        Ok(Stmt::Expression(expr))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Expressions
    // ─────────────────────────────────────────────────────────────────────────

    fn expression(&mut self) -> Result<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<Expr> {
        let expr: Expr = self.or()?;

        if self.match_tokens(&[TokenType::EQUAL]) {
            let equals: Token = self.previous().clone();
            let value: Expr = self.assignment()?;

            match expr {
                Expr::Variable { name, .. } => {
                    return Ok(Expr::Assign {
                        id: ExprId::next(),
                        name,
                        value: Box::new(value),
                    });
                }

                Expr::Get { object, name } => {
                    return Ok(Expr::Set {
                        object,
                        name,
                        value: Box::new(value),
                    });
                }

                other => {
                    let err = LoxError::parse(&equals, "Invalid assignment target.");
                    self.reporter.error(&err);

                    return Ok(other);
                }
            }
        }

        Ok(expr)
    }

    fn or(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.and()?;

        while self.match_tokens(&[TokenType::OR]) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.and()?;

            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn and(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.equality()?;

        while self.match_tokens(&[TokenType::AND]) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.equality()?;

            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.comparison()?;

        while self.match_tokens(&[TokenType::BANG_EQUAL, TokenType::EQUAL_EQUAL]) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.comparison()?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.term()?;

        while self.match_tokens(&[
            TokenType::GREATER,
            TokenType::GREATER_EQUAL,
            TokenType::LESS,
            TokenType::LESS_EQUAL,
        ]) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.term()?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.factor()?;

        while self.match_tokens(&[TokenType::MINUS, TokenType::PLUS]) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.factor()?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.unary()?;

        while self.match_tokens(&[TokenType::SLASH, TokenType::STAR, TokenType::PERCENT]) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.unary()?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr> {
        if self.match_tokens(&[TokenType::BANG, TokenType::MINUS]) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.unary()?;

            return Ok(Expr::Unary {
                operator,
                right: Box::new(right),
            });
        }

        self.call()
    }

    fn call(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.primary()?;

        loop {
            if self.match_tokens(&[TokenType::LEFT_PAREN]) {
                expr = self.finish_call(expr)?;
            } else if self.match_tokens(&[TokenType::DOT]) {
                let name: Token =
                    self.consume(TokenType::IDENTIFIER, "Expect property name after '.'.")?;

                expr = Expr::Get {
                    object: Box::new(expr),
                    name,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> Result<Expr> {
        let mut arguments: Vec<Expr> = Vec::new();

        if !self.check(&TokenType::RIGHT_PAREN) {
            loop {
                if arguments.len() >= 255 {
                    let err = LoxError::parse(self.peek(), "Can't have more than 255 arguments.");
                    self.reporter.error(&err);
                }

                arguments.push(self.expression()?);

                if !self.match_tokens(&[TokenType::COMMA]) {
                    break;
                }
            }
        }

        let paren: Token = self.consume(TokenType::RIGHT_PAREN, "Expect ')' after arguments.")?;

        Ok(Expr::Call {
            callee: Box::new(callee),
            paren,
            arguments,
        })
    }

    fn primary(&mut self) -> Result<Expr> {
        if self.match_tokens(&[
            TokenType::NUMBER(0.0),
            TokenType::STRING(String::new()),
            TokenType::TRUE,
            TokenType::FALSE,
            TokenType::NIL,
        ]) {
            return Ok(Expr::Literal(self.previous().clone()));
        }

        if self.match_tokens(&[TokenType::THIS]) {
            return Ok(Expr::This {
                id: ExprId::next(),
                keyword: self.previous().clone(),
            });
        }

        if self.match_tokens(&[TokenType::IDENTIFIER]) {
            return Ok(Expr::Variable {
                id: ExprId::next(),
                name: self.previous().clone(),
            });
        }

        if self.match_tokens(&[TokenType::LEFT_PAREN]) {
            let expr: Expr = self.expression()?;

            self.consume(TokenType::RIGHT_PAREN, "Expect ')' after expression.")?;

            return Ok(Expr::Grouping(Box::new(expr)));
        }

        Err(LoxError::parse(self.peek(), "Expect expression."))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Error recovery
    // ─────────────────────────────────────────────────────────────────────────

    /// Discard tokens until a statement boundary: just past a `;`, or right
    /// before a keyword that starts a declaration or statement.
    fn synchronize(&mut self) {
        debug!("Synchronizing parser at token {}", self.current);

        self.advance();

        while !self.is_at_end() {
            if self.previous().token_type == TokenType::SEMICOLON {
                return;
            }

            match self.peek().token_type {
                TokenType::CLASS
                | TokenType::FUN
                | TokenType::VAR
                | TokenType::FOR
                | TokenType::IF
                | TokenType::WHILE
                | TokenType::PRINT
                | TokenType::RETURN => return,

                _ => {}
            }

            self.advance();
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Token cursor helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn match_tokens(&mut self, types: &[TokenType]) -> bool {
        for token_type in types {
            if self.check(token_type) {
                self.advance();
                return true;
            }
        }

        false
    }

    fn consume<S: Into<String>>(&mut self, token_type: TokenType, message: S) -> Result<Token> {
        if self.check(&token_type) {
            return Ok(self.advance().clone());
        }

        Err(LoxError::parse(self.peek(), message))
    }

    fn check(&self, token_type: &TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }

        &self.peek().token_type == token_type
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::EOF
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }
}
