// File: src/lib.rs
//
// Library interface for the Wisp language front end.
// Exposes the lexer, parser, AST and interpreter for integration
// testing and embedding.

pub mod ast;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod parser;
