// File: src/interpreter/environment.rs
//
// Variable storage for the Wisp interpreter.
//
// A single flat mapping from identifier to value. There are no nested
// scopes and no shadowing: binding a name again replaces the prior
// value. A function call does not layer a frame on top of this map, it
// replaces the whole map with a fresh one holding only the call's
// parameter bindings, and the interpreter restores the caller's map
// when the call finishes. Callees therefore never see caller bindings.

use super::value::Value;
use ahash::AHashMap;

#[derive(Clone, Debug, Default)]
pub struct Environment {
    bindings: AHashMap<String, Value>,
}

impl Environment {
    /// Create an empty environment
    pub fn new() -> Self {
        Environment { bindings: AHashMap::new() }
    }

    /// Look up a binding, returning a cloned value if present
    pub fn get(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).cloned()
    }

    /// Bind a name to a value, overwriting any existing binding
    pub fn define(&mut self, name: String, value: Value) {
        self.bindings.insert(name, value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate the bound names, used for near-miss suggestions
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.bindings.keys()
    }
}
