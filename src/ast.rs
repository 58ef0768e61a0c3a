// File: src/ast.rs
//
// Abstract Syntax Tree (AST) definitions for the Wisp scripting language.
// Defines the structure of parsed Wisp programs.
//
// Every node is built exactly once by the parser and never mutated
// afterward. Expressions (Expr) represent values and computations,
// statements (Stmt) represent actions and control flow. A block's
// statement order is its evaluation order.

use std::sync::Arc;

/// Root node. Evaluates to the value of its last statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// A braced statement sequence. Evaluates to the value of its last
/// statement; an empty block yields null.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

/// A named function. Once evaluated, the definition itself is the value
/// bound under its name, so functions are first-class and retrievable
/// like any other binding.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: Block,
}

/// Represents a statement in Wisp - an action or declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `var name = expr;` - introduces or overwrites a binding
    Var { name: String, value: Expr },
    /// `mut name = expr;` - same binding semantics as `Var`; the
    /// distinction exists only at parse time
    Mut { name: String, value: Expr },
    /// `name = expr;` - overwrites an existing or new binding
    Assign { name: String, value: Expr },
    FuncDef(Arc<FunctionDef>),
    If {
        condition: Expr,
        then_branch: Block,
        else_branch: Option<Block>,
    },
    For {
        var: String,
        iterable: Expr,
        body: Block,
    },
    While {
        condition: Expr,
        body: Block,
    },
    Return(Expr),
    /// Statement-level wrapper for a bare expression
    Expr(Expr),
}

/// Represents an expression in Wisp - something that evaluates to a value
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(String),
    Number(f64),
    String(String),
    Bool(bool),
    /// `[a, b, c]`
    List(Vec<Expr>),
    /// `start..end`, ascending and end-exclusive
    Range { start: Box<Expr>, end: Box<Expr> },
    /// Operator kinds stay strings straight from the token stream; an
    /// operator the evaluator does not recognize surfaces as
    /// `InvalidOperator` rather than being unrepresentable.
    Unary {
        op: String,
        operand: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
    Call {
        function: String,
        args: Vec<Expr>,
    },
}
