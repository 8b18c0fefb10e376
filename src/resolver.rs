//! Static resolution pass for the Lox interpreter.
//!
//! This module performs a single AST walk to:
//! 1. **Build lexical scopes**: maintains a stack of `HashMap<String, bool>`
//!    tracking declared (false) and fully defined (true) names in each nested
//!    block or function.
//! 2. **Enforce static rules**: reports errors such as redeclaration in the
//!    same scope, reading a variable in its own initializer, `return` outside
//!    a function, returning a value from an initializer, and `this` outside a
//!    class.
//! 3. **Record binding distances**: for every variable occurrence
//!    (`Expr::Variable`, `Expr::Assign`, `Expr::This`), calls back into the
//!    interpreter to note whether it is a local (and at what depth) or a
//!    global. This lets the runtime climb exactly the right number of
//!    environment frames instead of searching the chain.
//!
//! Unlike the parser there is no synchronization to perform: every diagnostic
//! is reported to the [`Reporter`] and the walk simply continues, so one pass
//! surfaces every static error in the program.

use std::collections::HashMap;

use log::{debug, info};

use crate::error::{LoxError, Reporter};
use crate::expr::{Expr, ExprId};
use crate::interpreter::Interpreter;
use crate::stmt::{FunctionDecl, Stmt};
use crate::token::Token;

/// What kind of function body are we inside?  Used to validate `return`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FunctionType {
    None,
    Function,
    Method,
    Initializer,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ClassType {
    /// Not inside any class
    None,

    /// Inside a class declaration
    Class,
}

/// Resolver: tracks scopes, enforces static rules, and *records* binding
/// distances (locals vs. globals) by calling back into the interpreter.
pub struct Resolver<'a, 'out> {
    interpreter: &'a mut Interpreter<'out>,
    reporter: &'a mut Reporter,
    scopes: Vec<HashMap<String, bool>>, // false=declared, true=defined
    current_function: FunctionType,
    current_class: ClassType,
}

impl<'a, 'out> Resolver<'a, 'out> {
    /// Create a new resolver bound to the given interpreter and sink.
    pub fn new(interpreter: &'a mut Interpreter<'out>, reporter: &'a mut Reporter) -> Self {
        info!("Resolver instantiated");
        Resolver {
            interpreter,
            reporter,
            scopes: Vec::new(),
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    /// Walk all top‑level statements.
    pub fn resolve(&mut self, statements: &[Stmt]) {
        info!(
            "Beginning resolve pass over {} statement(s)",
            statements.len()
        );
        for stmt in statements {
            self.resolve_stmt(stmt);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Statement resolution
    // ─────────────────────────────────────────────────────────────────────────

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        debug!("Resolving stmt: {:?}", stmt);

        match stmt {
            Stmt::Class { name, methods } => {
                // 1. Declare & define the class name so methods can refer to it
                self.declare(name);
                self.define(name);

                // 2. Save and enter the class context
                let enclosing_class: ClassType = self.current_class;
                self.current_class = ClassType::Class;

                // 3. Open the implicit `this` scope for methods
                self.begin_scope();
                self.scopes
                    .last_mut()
                    .unwrap()
                    .insert("this".to_string(), true);

                // 4. Resolve each method in its own function context
                for method in methods {
                    let kind = if method.name.lexeme == "init" {
                        FunctionType::Initializer
                    } else {
                        FunctionType::Method
                    };

                    self.resolve_function(kind, method);
                }

                // 5. Close the `this` scope and restore the outer context
                self.end_scope();
                self.current_class = enclosing_class;
            }

            Stmt::Block(statements) => {
                // 1. Push a new anonymous scope for `{ … }`
                self.begin_scope();

                for s in statements {
                    self.resolve_stmt(s);
                }

                // 2. Pop the block scope
                self.end_scope();
            }

            Stmt::Var { name, initializer } => {
                // 1. Declare the variable name (marked but not yet defined)
                self.declare(name);

                // 2. Resolve the initializer expression, if any
                if let Some(expr) = initializer {
                    self.resolve_expr(expr);
                }

                // 3. Define the variable so it's available in this scope
                self.define(name);
            }

            Stmt::Function(declaration) => {
                // 1. Declare & define the function name up front (allow recursion)
                self.declare(&declaration.name);
                self.define(&declaration.name);

                // 2. Resolve the function's parameters and body
                self.resolve_function(FunctionType::Function, declaration);
            }

            Stmt::Expression(expr) | Stmt::Print(expr) => {
                self.resolve_expr(expr);
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                // 1. Resolve the condition expression
                self.resolve_expr(condition);

                // 2. Resolve the 'then' branch
                self.resolve_stmt(then_branch);

                // 3. Resolve the 'else' branch, if present
                if let Some(eb) = else_branch.as_deref() {
                    self.resolve_stmt(eb);
                }
            }

            Stmt::While { condition, body } => {
                self.resolve_expr(condition);
                self.resolve_stmt(body);
            }

            // Validity is enforced by the parser's loop-depth counter.
            Stmt::Break(_) => {}

            Stmt::Return { keyword, value } => {
                // 1. Ensure we're inside a function or initializer
                if self.current_function == FunctionType::None {
                    let err = LoxError::resolve(keyword, "Can't return from top-level code.");
                    self.reporter.error(&err);
                }

                // 2. In an initializer, only a bare `return;` is allowed
                if let Some(expr) = value {
                    if self.current_function == FunctionType::Initializer {
                        let err =
                            LoxError::resolve(keyword, "Can't return a value from an initializer.");
                        self.reporter.error(&err);
                    }

                    // 3. Resolve the value regardless so its own errors surface
                    self.resolve_expr(expr);
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Expression resolution
    // ─────────────────────────────────────────────────────────────────────────

    fn resolve_expr(&mut self, expr: &Expr) {
        debug!("Resolving expr: {:?}", expr);

        match expr {
            Expr::Literal(_) => {
                // Literals have no sub‑expressions
            }

            Expr::Grouping(inner) => {
                self.resolve_expr(inner);
            }

            Expr::Unary { right, .. } => {
                self.resolve_expr(right);
            }

            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }

            Expr::Variable { id, name } => {
                // 1. Prevent reading a variable in its own initializer
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&name.lexeme) == Some(&false) {
                        let err = LoxError::resolve(
                            name,
                            "Can't read local variable in its own initializer.",
                        );
                        self.reporter.error(&err);
                    }
                }

                // 2. Bind this variable occurrence at its lexical depth
                self.resolve_local(*id, name);
            }

            Expr::Assign { id, name, value } => {
                // 1. Resolve the right‑hand side first, then bind the assignment
                self.resolve_expr(value);
                self.resolve_local(*id, name);
            }

            Expr::Call {
                callee, arguments, ..
            } => {
                self.resolve_expr(callee);

                for arg in arguments {
                    self.resolve_expr(arg);
                }
            }

            Expr::This { id, keyword } => {
                // 1. 'this' is only valid inside class methods
                if self.current_class == ClassType::None {
                    let err = LoxError::resolve(keyword, "Can't use 'this' outside of a class.");
                    self.reporter.error(&err);
                    return;
                }

                // 2. Bind 'this' like a local variable
                self.resolve_local(*id, keyword);
            }

            Expr::Get { object, .. } => {
                // Properties are looked up dynamically; only the object resolves.
                self.resolve_expr(object);
            }

            Expr::Set { object, value, .. } => {
                self.resolve_expr(object);
                self.resolve_expr(value);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Function helper
    // ─────────────────────────────────────────────────────────────────────────

    /// Enter a fresh scope for a function's parameters + body.
    ///
    /// `kind` distinguishes plain functions, methods, and initializers.
    fn resolve_function(&mut self, kind: FunctionType, declaration: &FunctionDecl) {
        // 1. Save the enclosing function context so we can restore it later.
        let enclosing = self.current_function;
        self.current_function = kind;

        // 2. Begin a new lexical scope for the function parameters & body.
        self.begin_scope();

        // 3. Declare and immediately define each parameter in this new scope.
        for param in &declaration.params {
            self.declare(param);
            self.define(param);
        }

        // 4. Resolve each statement in the function body under the current context.
        for stmt in &declaration.body {
            self.resolve_stmt(stmt);
        }

        // 5. End the function's scope and restore the previous context.
        self.end_scope();
        self.current_function = enclosing;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scope management
    // ─────────────────────────────────────────────────────────────────────────

    #[inline]
    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    #[inline]
    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) {
        // Globals are not tracked; redeclaring a global is allowed.
        if let Some(scope) = self.scopes.last_mut() {
            if scope.contains_key(&name.lexeme) {
                let err =
                    LoxError::resolve(name, "Already a variable with this name in this scope.");
                self.reporter.error(&err);
            }

            scope.insert(name.lexeme.clone(), false);
        }
    }

    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), true);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Binding‑distance helper
    // ─────────────────────────────────────────────────────────────────────────

    /// Record this variable occurrence as either:
    ///  - a local at depth `d`, or
    ///  - a global if not found in any scope.
    fn resolve_local(&mut self, id: ExprId, name: &Token) {
        // 1. Search each scope from innermost outward
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                debug!("Resolved '{}' at depth {}", name.lexeme, depth);
                // 2. Tell the interpreter about the local binding
                self.interpreter.note_local(id, depth);
                return;
            }
        }

        // 3. Not found in any scope → it's a global
        self.interpreter.note_global(&name.lexeme);
    }
}
