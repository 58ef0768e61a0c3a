// File: src/interpreter/mod.rs
//
// Tree-walking interpreter for the Wisp scripting language.
// Walks the AST directly, dispatching on node variant, reading and
// mutating a single Environment and producing a final value.
//
// Evaluation is single-threaded, synchronous and purely in-memory.
// Recursion depth is bounded only by the host call stack. Any
// RuntimeError aborts the whole evaluation; there is no recovery.

pub mod environment;
pub mod value;

mod control_flow;

pub use environment::Environment;
pub use value::Value;

use crate::ast::{Block, Expr, Program, Stmt};
use crate::errors::{find_closest_match, RuntimeError};
use control_flow::Flow;
use std::sync::Arc;

pub struct Interpreter {
    pub env: Environment,
}

impl Interpreter {
    /// Create an interpreter with a fresh, empty environment
    pub fn new() -> Self {
        Interpreter { env: Environment::new() }
    }

    /// Create an interpreter over a pre-populated environment
    pub fn with_env(env: Environment) -> Self {
        Interpreter { env }
    }

    /// Evaluate a parsed program.
    ///
    /// The result is the value of the last statement (null for an empty
    /// program). A top-level `return` ends the program early with its
    /// value. Whatever remains bound in the environment persists across
    /// separate `evaluate` calls on the same interpreter.
    pub fn evaluate(&mut self, program: &Program) -> Result<Value, RuntimeError> {
        let mut result = Value::Null;
        for stmt in &program.statements {
            match self.eval_stmt(stmt)? {
                Flow::Normal(value) => result = value,
                Flow::Return(value) => return Ok(value),
            }
        }
        Ok(result)
    }

    /// Evaluate the statements of a block in order. The block's value
    /// is the value of its last statement; a `Return` flow stops the
    /// block immediately and propagates outward.
    fn eval_block(&mut self, block: &Block) -> Result<Flow, RuntimeError> {
        let mut result = Value::Null;
        for stmt in &block.statements {
            match self.eval_stmt(stmt)? {
                Flow::Normal(value) => result = value,
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }
        Ok(Flow::Normal(result))
    }

    fn eval_stmt(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        match stmt {
            // var, mut and plain assignment share one binding rule:
            // evaluate, overwrite, yield the value. mut is a parse-time
            // distinction only.
            Stmt::Var { name, value }
            | Stmt::Mut { name, value }
            | Stmt::Assign { name, value } => {
                let value = self.eval_expr(value)?;
                self.env.define(name.clone(), value.clone());
                Ok(Flow::Normal(value))
            }
            Stmt::FuncDef(def) => {
                // The declaration node itself is the bound value. The
                // body does not run here.
                let value = Value::Function(def.clone());
                self.env.define(def.name.clone(), value.clone());
                Ok(Flow::Normal(value))
            }
            Stmt::If { condition, then_branch, else_branch } => {
                if self.eval_expr(condition)?.is_truthy() {
                    self.eval_block(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.eval_block(else_branch)
                } else {
                    Ok(Flow::Normal(Value::Null))
                }
            }
            Stmt::For { var, iterable, body } => {
                let items = match self.eval_expr(iterable)? {
                    Value::List(items) => items,
                    other => {
                        return Err(RuntimeError::NotIterable { type_name: other.type_name() })
                    }
                };
                let mut result = Value::Null;
                for item in items.iter() {
                    // The loop variable lives in the current
                    // environment and persists after the loop ends.
                    self.env.define(var.clone(), item.clone());
                    match self.eval_block(body)? {
                        Flow::Normal(value) => result = value,
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }
                Ok(Flow::Normal(result))
            }
            Stmt::While { condition, body } => {
                let mut result = Value::Null;
                while self.eval_expr(condition)?.is_truthy() {
                    match self.eval_block(body)? {
                        Flow::Normal(value) => result = value,
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }
                Ok(Flow::Normal(result))
            }
            Stmt::Return(expr) => {
                let value = self.eval_expr(expr)?;
                Ok(Flow::Return(value))
            }
            Stmt::Expr(expr) => Ok(Flow::Normal(self.eval_expr(expr)?)),
        }
    }

    fn eval_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::String(s) => Ok(Value::Str(Arc::new(s.clone()))),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Identifier(name) => self.lookup(name),
            Expr::List(elements) => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.eval_expr(element)?);
                }
                Ok(Value::List(Arc::new(items)))
            }
            Expr::Range { start, end } => {
                let start = self.eval_expr(start)?;
                let end = self.eval_expr(end)?;
                match (start, end) {
                    (Value::Number(start), Value::Number(end)) => {
                        let mut items = Vec::new();
                        let mut i = start;
                        while i < end {
                            items.push(Value::Number(i));
                            i += 1.0;
                        }
                        Ok(Value::List(Arc::new(items)))
                    }
                    (l, r) => Err(RuntimeError::InvalidOperands {
                        operator: "..".into(),
                        left: l.type_name(),
                        right: r.type_name(),
                    }),
                }
            }
            Expr::Unary { op, operand } => {
                let operand = self.eval_expr(operand)?;
                match op.as_str() {
                    "-" => match operand {
                        Value::Number(n) => Ok(Value::Number(-n)),
                        other => Err(RuntimeError::InvalidOperand {
                            operator: op.clone(),
                            operand: other.type_name(),
                        }),
                    },
                    "not" => Ok(Value::Bool(!operand.is_truthy())),
                    _ => Err(RuntimeError::InvalidOperator {
                        operator: op.clone(),
                        node: "unary",
                    }),
                }
            }
            Expr::Binary { left, op, right } => {
                // Left then right, both always evaluated. and/or do not
                // short-circuit.
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                self.eval_binary(op, left, right)
            }
            Expr::Call { function, args } => self.call_function(function, args),
        }
    }

    fn eval_binary(&self, op: &str, left: Value, right: Value) -> Result<Value, RuntimeError> {
        let invalid = |l: &Value, r: &Value| RuntimeError::InvalidOperands {
            operator: op.to_string(),
            left: l.type_name(),
            right: r.type_name(),
        };

        match op {
            "+" => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::Str(a), Value::Str(b)) => {
                    Ok(Value::Str(Arc::new(format!("{}{}", a, b))))
                }
                (Value::List(a), Value::List(b)) => {
                    let mut items = a.as_ref().clone();
                    items.extend(b.iter().cloned());
                    Ok(Value::List(Arc::new(items)))
                }
                _ => Err(invalid(&left, &right)),
            },
            "-" | "*" | "/" | "%" => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => match op {
                    "-" => Ok(Value::Number(a - b)),
                    "*" => Ok(Value::Number(a * b)),
                    "/" if *b == 0.0 => Err(RuntimeError::DivisionByZero),
                    "/" => Ok(Value::Number(a / b)),
                    "%" if *b == 0.0 => Err(RuntimeError::DivisionByZero),
                    _ => Ok(Value::Number(a % b)),
                },
                _ => Err(invalid(&left, &right)),
            },
            "==" => Ok(Value::Bool(left == right)),
            "!=" => Ok(Value::Bool(left != right)),
            "<" | "<=" | ">" | ">=" => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(match op {
                    "<" => a < b,
                    "<=" => a <= b,
                    ">" => a > b,
                    _ => a >= b,
                })),
                (Value::Str(a), Value::Str(b)) => Ok(Value::Bool(match op {
                    "<" => a < b,
                    "<=" => a <= b,
                    ">" => a > b,
                    _ => a >= b,
                })),
                _ => Err(invalid(&left, &right)),
            },
            "and" => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
            "or" => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
            _ => Err(RuntimeError::InvalidOperator {
                operator: op.to_string(),
                node: "binary",
            }),
        }
    }

    /// Resolve a callee name, check arity, evaluate arguments in the
    /// caller's environment, then run the body against a brand-new
    /// environment holding only the parameter bindings. The caller's
    /// environment is restored whether the body succeeds or fails.
    fn call_function(&mut self, name: &str, args: &[Expr]) -> Result<Value, RuntimeError> {
        let def = match self.lookup(name)? {
            Value::Function(def) => def,
            _ => return Err(RuntimeError::InvalidCallTarget { name: name.to_string() }),
        };

        if def.params.len() != args.len() {
            return Err(RuntimeError::ArityMismatch {
                function: name.to_string(),
                expected: def.params.len(),
                actual: args.len(),
            });
        }

        let mut locals = Environment::new();
        for (param, arg) in def.params.iter().zip(args) {
            let value = self.eval_expr(arg)?;
            locals.define(param.clone(), value);
        }

        let saved = std::mem::replace(&mut self.env, locals);
        let outcome = self.eval_block(&def.body);
        self.env = saved;

        // A Return flow and falling off the end of the body both mean
        // "the call's result".
        Ok(outcome?.into_value())
    }

    fn lookup(&self, name: &str) -> Result<Value, RuntimeError> {
        self.env.get(name).ok_or_else(|| RuntimeError::UndefinedVariable {
            name: name.to_string(),
            suggestion: find_closest_match(name, self.env.names()),
        })
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
