// File: src/interpreter/value.rs
//
// Runtime value types for the Wisp scripting language.
// Values are dynamically typed; nothing is checked before evaluation.

use crate::ast::FunctionDef;
use std::fmt;
use std::sync::Arc;

/// A value produced by evaluating a Wisp expression or statement.
///
/// `Function` holds the function definition node itself: evaluating a
/// declaration binds the node as a value, which is what makes functions
/// first-class.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Number(f64),
    Str(Arc<String>),
    Bool(bool),
    List(Arc<Vec<Value>>),
    Function(Arc<FunctionDef>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::List(_) => "list",
            Value::Function(_) => "function",
        }
    }

    /// Truthiness used by conditions and the logical operators
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Number(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::List(items) => !items.is_empty(),
            Value::Function(_) => true,
        }
    }
}

/// Equality is structural within a type; values of different types
/// compare unequal. Functions compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Function(def) => {
                write!(f, "<func {}({})>", def.name, def.params.join(", "))
            }
        }
    }
}
