// File: src/interpreter/control_flow.rs
//
// Control flow signal for early returns.
//
// Block and loop evaluation returns a Flow rather than a bare value so
// that a `return` statement can exit the enclosing function instead of
// only producing a value for its own evaluation step. The interpreter
// propagates `Return` upward through blocks and loops and unwraps it at
// the function-call boundary (or at the top level, where it ends the
// program).

use super::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Flow {
    /// Normal execution, carrying the statement's value
    Normal(Value),
    /// A `return` was evaluated; unwind to the nearest call boundary
    Return(Value),
}

impl Flow {
    /// The carried value, regardless of how it was produced. Used at
    /// call boundaries where both outcomes mean "the call's result".
    pub(crate) fn into_value(self) -> Value {
        match self {
            Flow::Normal(value) | Flow::Return(value) => value,
        }
    }
}
