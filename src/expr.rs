use std::sync::atomic::{AtomicUsize, Ordering};

use crate::token::Token;

static NEXT_EXPR_ID: AtomicUsize = AtomicUsize::new(0);

/// Stable identity for the expressions that participate in resolution
/// (`Variable`, `Assign`, `This`).  Ids are process-wide so REPL lines never
/// reuse one; the interpreter's local-resolution table outlives a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(usize);

impl ExprId {
    pub fn next() -> Self {
        ExprId(NEXT_EXPR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug)]
pub enum Expr {
    Literal(Token),

    Grouping(Box<Expr>),

    Unary {
        operator: Token,
        right: Box<Expr>,
    },

    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    Variable {
        id: ExprId,
        name: Token,
    },

    Assign {
        id: ExprId,
        name: Token,
        value: Box<Expr>,
    },

    Call {
        callee: Box<Expr>,
        paren: Token,
        arguments: Vec<Expr>,
    },

    Get {
        object: Box<Expr>,
        name: Token,
    },

    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },

    This {
        id: ExprId,
        keyword: Token,
    },
}
