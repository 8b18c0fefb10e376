use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;
use std::result;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info};

use crate::environment::Environment;
use crate::error::{LoxError, Result};
use crate::expr::{Expr, ExprId};
use crate::stmt::Stmt;
use crate::token::{Token, TokenType};
use crate::value::{LoxClass, LoxFunction, LoxInstance, Value};

/// Non-error condition that unwinds statement execution: `break` is caught at
/// the nearest loop, `return` at the nearest call.  Runtime errors travel the
/// same channel so a single `?` propagates all three.
enum Interrupt {
    Break,
    Return(Value),
    Error(LoxError),
}

impl From<LoxError> for Interrupt {
    fn from(error: LoxError) -> Self {
        Interrupt::Error(error)
    }
}

type StatementResult = result::Result<(), Interrupt>;

pub struct Interpreter<'a> {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<ExprId, usize>,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new()));

        globals.borrow_mut().define(
            "clock",
            Value::NativeFunction {
                name: "clock".to_string(),
                arity: 0,
                func: clock_native,
            },
        );

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            output,
        }
    }

    /// Record a variable occurrence as a local at the given depth.  Called by
    /// the resolver; absence from the table means the occurrence is global.
    pub fn note_local(&mut self, id: ExprId, depth: usize) {
        debug!("Recording local {:?} at depth {}", id, depth);

        self.locals.insert(id, depth);
    }

    pub fn note_global(&mut self, name: &str) {
        debug!("'{}' resolved as global", name);
    }

    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        info!("Interpreting {} top-level statement(s)", statements.len());

        for statement in statements {
            if let Err(interrupt) = self.execute(statement) {
                return match interrupt {
                    Interrupt::Error(e) => Err(e),

                    // The parser rejects 'break' outside loops and the
                    // resolver rejects top-level 'return'.
                    Interrupt::Break | Interrupt::Return(_) => {
                        unreachable!("control-flow signal escaped to top level")
                    }
                };
            }
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Statement execution
    // ─────────────────────────────────────────────────────────────────────────

    fn execute(&mut self, stmt: &Stmt) -> StatementResult {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;

                Ok(())
            }

            Stmt::Print(expr) => {
                let value: Value = self.evaluate(expr)?;

                writeln!(self.output, "{}", value).map_err(LoxError::from)?;

                Ok(())
            }

            Stmt::Var { name, initializer } => {
                let value: Value = if let Some(expr) = initializer {
                    self.evaluate(expr)?
                } else {
                    Value::Nil
                };

                self.environment.borrow_mut().define(&name.lexeme, value);

                Ok(())
            }

            Stmt::Block(statements) => {
                let child = Environment::with_enclosing(Rc::clone(&self.environment));

                self.execute_block(statements, Rc::new(RefCell::new(child)))
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if is_truthy(&self.evaluate(condition)?) {
                    self.execute(then_branch)?;
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)?;
                }

                Ok(())
            }

            Stmt::While { condition, body } => {
                // The condition is re-evaluated on every iteration.
                while is_truthy(&self.evaluate(condition)?) {
                    match self.execute(body) {
                        Err(Interrupt::Break) => break,

                        other => other?,
                    }
                }

                Ok(())
            }

            Stmt::Break(_) => Err(Interrupt::Break),

            Stmt::Function(declaration) => {
                let function = LoxFunction {
                    declaration: Rc::clone(declaration),
                    closure: Rc::clone(&self.environment),
                    is_initializer: false,
                };

                self.environment
                    .borrow_mut()
                    .define(&declaration.name.lexeme, Value::Function(Rc::new(function)));

                Ok(())
            }

            Stmt::Return { keyword: _, value } => {
                let value: Value = if let Some(expr) = value {
                    self.evaluate(expr)?
                } else {
                    Value::Nil
                };

                Err(Interrupt::Return(value))
            }

            Stmt::Class { name, methods } => {
                // Two-step binding so methods can refer to the class by name.
                self.environment
                    .borrow_mut()
                    .define(&name.lexeme, Value::Nil);

                let mut method_table: HashMap<String, Rc<LoxFunction>> = HashMap::new();

                for declaration in methods {
                    let function = LoxFunction {
                        declaration: Rc::clone(declaration),
                        closure: Rc::clone(&self.environment),
                        is_initializer: declaration.name.lexeme == "init",
                    };

                    method_table.insert(declaration.name.lexeme.clone(), Rc::new(function));
                }

                let class = Value::Class(Rc::new(LoxClass::new(name.lexeme.clone(), method_table)));

                self.environment
                    .borrow_mut()
                    .assign(&name.lexeme, class, name.line)?;

                Ok(())
            }
        }
    }

    /// Run `statements` inside `environment`, restoring the previous scope on
    /// every exit path: normal completion, break, return, or runtime error.
    fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> StatementResult {
        let previous: Rc<RefCell<Environment>> =
            std::mem::replace(&mut self.environment, environment);

        for stmt in statements {
            if let Err(interrupt) = self.execute(stmt) {
                self.environment = previous;
                return Err(interrupt);
            }
        }

        self.environment = previous;

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Expression evaluation
    // ─────────────────────────────────────────────────────────────────────────

    fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(token) => self.evaluate_literal(token),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => self.evaluate_unary(operator, right),

            Expr::Binary {
                left,
                operator,
                right,
            } => self.evaluate_binary(left, operator, right),

            Expr::Logical {
                left,
                operator,
                right,
            } => self.evaluate_logical(left, operator, right),

            Expr::Variable { id, name } => self.look_up_variable(*id, name),

            Expr::This { id, keyword } => self.look_up_variable(*id, keyword),

            Expr::Assign { id, name, value } => {
                let value: Value = self.evaluate(value)?;

                if let Some(&distance) = self.locals.get(id) {
                    Environment::assign_at(
                        &self.environment,
                        distance,
                        &name.lexeme,
                        value.clone(),
                        name.line,
                    )?;
                } else {
                    self.globals
                        .borrow_mut()
                        .assign(&name.lexeme, value.clone(), name.line)?;
                }

                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => self.evaluate_call(callee, paren, arguments),

            Expr::Get { object, name } => {
                let object: Value = self.evaluate(object)?;

                match object {
                    Value::Instance(instance) => {
                        if let Some(field) = instance.borrow().get_field(&name.lexeme) {
                            return Ok(field);
                        }

                        if let Some(method) = instance.borrow().class().find_method(&name.lexeme) {
                            return Ok(Value::Function(method.bind(Rc::clone(&instance))));
                        }

                        Err(LoxError::runtime(
                            name.line,
                            format!("Undefined property '{}'.", name.lexeme),
                        ))
                    }

                    _ => Err(LoxError::runtime(
                        name.line,
                        "Only instances have properties.",
                    )),
                }
            }

            Expr::Set {
                object,
                name,
                value,
            } => {
                let object: Value = self.evaluate(object)?;

                match object {
                    Value::Instance(instance) => {
                        let value: Value = self.evaluate(value)?;

                        instance.borrow_mut().set_field(&name.lexeme, value.clone());

                        Ok(value)
                    }

                    _ => Err(LoxError::runtime(name.line, "Only instances have fields.")),
                }
            }
        }
    }

    fn evaluate_literal(&self, token: &Token) -> Result<Value> {
        match &token.token_type {
            TokenType::NUMBER(n) => Ok(Value::Number(*n)),

            TokenType::STRING(s) => Ok(Value::String(s.clone())),

            TokenType::TRUE => Ok(Value::Bool(true)),

            TokenType::FALSE => Ok(Value::Bool(false)),

            TokenType::NIL => Ok(Value::Nil),

            _ => Err(LoxError::runtime(token.line, "Invalid literal.")),
        }
    }

    fn evaluate_unary(&mut self, op: &Token, expr: &Expr) -> Result<Value> {
        let value: Value = self.evaluate(expr)?;

        match op.token_type {
            TokenType::MINUS => match value {
                Value::Number(n) => Ok(Value::Number(-n)),

                _ => Err(LoxError::runtime(op.line, "Operand must be a number.")),
            },

            TokenType::BANG => Ok(Value::Bool(!is_truthy(&value))),

            _ => Err(LoxError::runtime(op.line, "Invalid unary operator.")),
        }
    }

    fn evaluate_binary(&mut self, left: &Expr, op: &Token, right: &Expr) -> Result<Value> {
        let left_val: Value = self.evaluate(left)?;
        let right_val: Value = self.evaluate(right)?;

        match op.token_type {
            TokenType::PLUS => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),

                // Either side being a string coerces the other through its
                // printed form.
                (a, b) if matches!(a, Value::String(_)) || matches!(b, Value::String(_)) => {
                    Ok(Value::String(format!("{}{}", a, b)))
                }

                _ => Err(LoxError::runtime(
                    op.line,
                    "Operands must be two numbers or include a string.",
                )),
            },

            TokenType::MINUS => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),

                _ => Err(LoxError::runtime(op.line, "Operands must be numbers.")),
            },

            TokenType::STAR => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a * b)),

                _ => Err(LoxError::runtime(op.line, "Operands must be numbers.")),
            },

            TokenType::SLASH => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => {
                    if b == 0.0 {
                        Err(LoxError::runtime(op.line, "Cannot divide by zero."))
                    } else {
                        Ok(Value::Number(a / b))
                    }
                }

                _ => Err(LoxError::runtime(op.line, "Operands must be numbers.")),
            },

            TokenType::PERCENT => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => {
                    if b == 0.0 {
                        Err(LoxError::runtime(op.line, "Cannot divide by zero."))
                    } else {
                        Ok(Value::Number(a % b))
                    }
                }

                _ => Err(LoxError::runtime(op.line, "Operands must be numbers.")),
            },

            TokenType::EQUAL_EQUAL => Ok(Value::Bool(is_equal(&left_val, &right_val))),

            TokenType::BANG_EQUAL => Ok(Value::Bool(!is_equal(&left_val, &right_val))),

            TokenType::LESS => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a < b)),

                _ => Err(LoxError::runtime(op.line, "Operands must be numbers.")),
            },

            TokenType::LESS_EQUAL => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a <= b)),

                _ => Err(LoxError::runtime(op.line, "Operands must be numbers.")),
            },

            TokenType::GREATER => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a > b)),

                _ => Err(LoxError::runtime(op.line, "Operands must be numbers.")),
            },

            TokenType::GREATER_EQUAL => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a >= b)),

                _ => Err(LoxError::runtime(op.line, "Operands must be numbers.")),
            },

            _ => Err(LoxError::runtime(op.line, "Invalid binary operator.")),
        }
    }

    fn evaluate_logical(&mut self, left: &Expr, op: &Token, right: &Expr) -> Result<Value> {
        let left_val: Value = self.evaluate(left)?;

        // Short-circuit returns the raw operand, not its truthiness.
        match op.token_type {
            TokenType::OR => {
                if is_truthy(&left_val) {
                    Ok(left_val)
                } else {
                    self.evaluate(right)
                }
            }

            TokenType::AND => {
                if !is_truthy(&left_val) {
                    Ok(left_val)
                } else {
                    self.evaluate(right)
                }
            }

            _ => Err(LoxError::runtime(op.line, "Invalid logical operator.")),
        }
    }

    fn evaluate_call(&mut self, callee: &Expr, paren: &Token, arguments: &[Expr]) -> Result<Value> {
        let callee_val: Value = self.evaluate(callee)?;

        let mut arg_values: Vec<Value> = Vec::new();

        for arg in arguments {
            arg_values.push(self.evaluate(arg)?);
        }

        let arity: usize = match &callee_val {
            Value::NativeFunction { arity, .. } => *arity,

            Value::Function(function) => function.arity(),

            Value::Class(class) => class.arity(),

            _ => {
                return Err(LoxError::runtime(
                    paren.line,
                    "Can only call functions and classes.",
                ));
            }
        };

        if arg_values.len() != arity {
            return Err(LoxError::runtime(
                paren.line,
                format!("Expected {} arguments but got {}.", arity, arg_values.len()),
            ));
        }

        match callee_val {
            Value::NativeFunction { func, .. } => {
                func(&arg_values).map_err(|msg| LoxError::runtime(paren.line, msg))
            }

            Value::Function(function) => self.call_function(&function, arg_values),

            Value::Class(class) => self.instantiate(&class, arg_values),

            _ => unreachable!("arity was computed for a non-callable"),
        }
    }

    /// Invoke a user function: parameters bound in a fresh scope under the
    /// closure, body run as a block, the return signal caught here.
    fn call_function(&mut self, function: &Rc<LoxFunction>, arguments: Vec<Value>) -> Result<Value> {
        debug!("Calling <fn {}>", function.declaration.name.lexeme);

        let mut environment: Environment =
            Environment::with_enclosing(Rc::clone(&function.closure));

        for (param, argument) in function.declaration.params.iter().zip(arguments) {
            environment.define(&param.lexeme, argument);
        }

        let result: StatementResult = self.execute_block(
            &function.declaration.body,
            Rc::new(RefCell::new(environment)),
        );

        let line: usize = function.declaration.name.line;

        match result {
            Ok(()) => {
                if function.is_initializer {
                    Environment::get_at(&function.closure, 0, "this", line)
                } else {
                    Ok(Value::Nil)
                }
            }

            Err(Interrupt::Return(value)) => {
                // An initializer always hands back its instance, even on a
                // bare 'return;'.
                if function.is_initializer {
                    Environment::get_at(&function.closure, 0, "this", line)
                } else {
                    Ok(value)
                }
            }

            Err(Interrupt::Error(e)) => Err(e),

            Err(Interrupt::Break) => unreachable!("break signal escaped a function body"),
        }
    }

    fn instantiate(&mut self, class: &Rc<LoxClass>, arguments: Vec<Value>) -> Result<Value> {
        debug!("Instantiating class {}", class.name);

        let instance = Rc::new(RefCell::new(LoxInstance::new(Rc::clone(class))));

        if let Some(init) = class.find_method("init") {
            let bound: Rc<LoxFunction> = init.bind(Rc::clone(&instance));

            self.call_function(&bound, arguments)?;
        }

        Ok(Value::Instance(instance))
    }

    fn look_up_variable(&self, id: ExprId, name: &Token) -> Result<Value> {
        if let Some(&distance) = self.locals.get(&id) {
            Environment::get_at(&self.environment, distance, &name.lexeme, name.line)
        } else {
            self.globals.borrow().get(&name.lexeme, name.line)
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Nil => false,

        Value::Bool(b) => *b,

        _ => true,
    }
}

fn is_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Nil, Value::Nil) => true,

        (Value::Bool(a), Value::Bool(b)) => a == b,

        (Value::Number(a), Value::Number(b)) => a == b,

        (Value::String(a), Value::String(b)) => a == b,

        (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),

        (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),

        (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),

        (Value::NativeFunction { func: a, .. }, Value::NativeFunction { func: b, .. }) => a == b,

        _ => false,
    }
}

fn clock_native(_args: &[Value]) -> result::Result<Value, String> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| format!("Clock error: {}", e))?
        .as_secs_f64();

    Ok(Value::Number(timestamp))
}
