// File: src/parser.rs
//
// Recursive descent parser for the Wisp scripting language.
// Transforms a sequence of tokens into an Abstract Syntax Tree (AST).
//
// The parser implements a traditional recursive descent strategy with
// explicit operator-precedence levels for expressions. It supports:
// - Variable declarations (var, mut) and assignment
// - Function definitions and calls
// - Control flow (if/else, for..in, while)
// - Expression parsing with left-associative precedence climbing
//
// The parser uses a single-token lookahead and advances through the
// token stream as it builds the AST. The first grammar violation aborts
// the parse with a ParseError; no recovery is attempted and no partial
// AST is produced.

use crate::ast::{Block, Expr, FunctionDef, Program, Stmt};
use crate::errors::{ParseError, SourceLocation};
use crate::lexer::{Token, TokenKind};
use std::sync::Arc;

/// Parser maintains position in the token stream and provides methods
/// to parse statements and expressions
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a new parser from a vector of tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    /// Peek at the current token without consuming it
    fn peek(&self) -> &TokenKind {
        self.tokens.get(self.pos).map(|t| &t.kind).unwrap_or(&TokenKind::Eof)
    }

    /// Peek one token past the current one
    fn peek_next(&self) -> &TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    /// Location of the current token
    fn location(&self) -> SourceLocation {
        self.tokens
            .get(self.pos.min(self.tokens.len().saturating_sub(1)))
            .map(|t| SourceLocation::new(t.line, t.column))
            .unwrap_or(SourceLocation::new(0, 0))
    }

    /// Consume and return the current token kind, then advance
    fn advance(&mut self) -> TokenKind {
        let tok = self.peek().clone();
        self.pos += 1;
        tok
    }

    /// Consume the current token if it matches `expected`, otherwise
    /// fail with a ParseError naming both kinds
    fn eat(&mut self, expected: TokenKind) -> Result<(), ParseError> {
        if *self.peek() == expected {
            self.pos += 1;
            Ok(())
        } else {
            Err(ParseError::Expected {
                expected,
                found: self.peek().clone(),
                location: self.location(),
            })
        }
    }

    /// Consume an identifier token and return its name
    fn eat_identifier(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(ParseError::Expected {
                expected: TokenKind::Identifier(String::new()),
                found: self.peek().clone(),
                location: self.location(),
            }),
        }
    }

    /// Parse the entire token stream into a Program, consuming every
    /// token up to and including the end-of-stream marker
    pub fn parse(&mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();
        while !matches!(self.peek(), TokenKind::Eof) {
            statements.push(self.parse_stmt()?);
        }
        self.eat(TokenKind::Eof)?;
        Ok(Program { statements })
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.peek() {
            TokenKind::Keyword(k) if k == "var" => self.parse_var(),
            TokenKind::Keyword(k) if k == "mut" => self.parse_mut(),
            TokenKind::Keyword(k) if k == "if" => self.parse_if(),
            TokenKind::Keyword(k) if k == "for" => self.parse_for(),
            TokenKind::Keyword(k) if k == "while" => self.parse_while(),
            TokenKind::Keyword(k) if k == "func" => self.parse_func(),
            TokenKind::Keyword(k) if k == "return" => {
                self.advance();
                let expr = self.parse_expr()?;
                self.eat(TokenKind::Punctuation(';'))?;
                Ok(Stmt::Return(expr))
            }
            // `name = expr;` is an assignment; a lone identifier is an
            // expression statement. One extra token of lookahead tells
            // them apart.
            TokenKind::Identifier(_)
                if *self.peek_next() == TokenKind::Operator("=".into()) =>
            {
                let name = self.eat_identifier()?;
                self.eat(TokenKind::Operator("=".into()))?;
                let value = self.parse_expr()?;
                self.eat(TokenKind::Punctuation(';'))?;
                Ok(Stmt::Assign { name, value })
            }
            _ => {
                let expr = self.parse_expr()?;
                self.eat(TokenKind::Punctuation(';'))?;
                Ok(Stmt::Expr(expr))
            }
        }
    }

    fn parse_var(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // var
        let name = self.eat_identifier()?;
        self.eat(TokenKind::Operator("=".into()))?;
        let value = self.parse_expr()?;
        self.eat(TokenKind::Punctuation(';'))?;
        Ok(Stmt::Var { name, value })
    }

    fn parse_mut(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // mut
        let name = self.eat_identifier()?;
        self.eat(TokenKind::Operator("=".into()))?;
        let value = self.parse_expr()?;
        self.eat(TokenKind::Punctuation(';'))?;
        Ok(Stmt::Mut { name, value })
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // if
        let condition = self.parse_expr()?;
        let then_branch = self.parse_block()?;
        let else_branch = if matches!(self.peek(), TokenKind::Keyword(k) if k == "else") {
            self.advance();
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(Stmt::If { condition, then_branch, else_branch })
    }

    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // for
        let var = self.eat_identifier()?;
        self.eat(TokenKind::Keyword("in".into()))?;
        let iterable = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(Stmt::For { var, iterable, body })
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // while
        let condition = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(Stmt::While { condition, body })
    }

    fn parse_func(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // func
        let name = self.eat_identifier()?;
        self.eat(TokenKind::Punctuation('('))?;
        let mut params = Vec::new();
        if !matches!(self.peek(), TokenKind::Punctuation(')')) {
            params.push(self.eat_identifier()?);
            while matches!(self.peek(), TokenKind::Punctuation(',')) {
                self.advance();
                params.push(self.eat_identifier()?);
            }
        }
        self.eat(TokenKind::Punctuation(')'))?;
        let body = self.parse_block()?;
        Ok(Stmt::FuncDef(Arc::new(FunctionDef { name, params, body })))
    }

    fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.eat(TokenKind::Punctuation('{'))?;
        let mut statements = Vec::new();
        while !matches!(self.peek(), TokenKind::Punctuation('}') | TokenKind::Eof) {
            statements.push(self.parse_stmt()?);
        }
        self.eat(TokenKind::Punctuation('}'))?;
        Ok(Block { statements })
    }

    // --- Expressions ---
    //
    // Each level calls the next-tighter level first, then loops while
    // the current token matches an operator at its level, building a
    // left-associative Binary chain.

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let node = self.parse_logical()?;
        if matches!(self.peek(), TokenKind::Operator(op) if op == "..") {
            self.advance();
            let end = self.parse_logical()?;
            return Ok(Expr::Range { start: Box::new(node), end: Box::new(end) });
        }
        Ok(node)
    }

    fn parse_logical(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.parse_equality()?;
        while matches!(self.peek(), TokenKind::Operator(op) if op == "and" || op == "or") {
            let op = match self.advance() {
                TokenKind::Operator(o) => o,
                _ => unreachable!(),
            };
            let right = self.parse_equality()?;
            node = Expr::Binary { left: Box::new(node), op, right: Box::new(right) };
        }
        Ok(node)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.parse_comparison()?;
        while matches!(self.peek(), TokenKind::Operator(op) if op == "==" || op == "!=") {
            let op = match self.advance() {
                TokenKind::Operator(o) => o,
                _ => unreachable!(),
            };
            let right = self.parse_comparison()?;
            node = Expr::Binary { left: Box::new(node), op, right: Box::new(right) };
        }
        Ok(node)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.parse_term()?;
        while matches!(
            self.peek(),
            TokenKind::Operator(op) if matches!(op.as_str(), "<" | "<=" | ">" | ">=")
        ) {
            let op = match self.advance() {
                TokenKind::Operator(o) => o,
                _ => unreachable!(),
            };
            let right = self.parse_term()?;
            node = Expr::Binary { left: Box::new(node), op, right: Box::new(right) };
        }
        Ok(node)
    }

    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.parse_product()?;
        while matches!(self.peek(), TokenKind::Operator(op) if op == "+" || op == "-") {
            let op = match self.advance() {
                TokenKind::Operator(o) => o,
                _ => unreachable!(),
            };
            let right = self.parse_product()?;
            node = Expr::Binary { left: Box::new(node), op, right: Box::new(right) };
        }
        Ok(node)
    }

    fn parse_product(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.parse_factor()?;
        while matches!(
            self.peek(),
            TokenKind::Operator(op) if matches!(op.as_str(), "*" | "/" | "%")
        ) {
            let op = match self.advance() {
                TokenKind::Operator(o) => o,
                _ => unreachable!(),
            };
            let right = self.parse_factor()?;
            node = Expr::Binary { left: Box::new(node), op, right: Box::new(right) };
        }
        Ok(node)
    }

    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        let location = self.location();
        match self.peek().clone() {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr::Number(n))
            }
            TokenKind::String(s) => {
                self.advance();
                Ok(Expr::String(s))
            }
            TokenKind::Bool(b) => {
                self.advance();
                Ok(Expr::Bool(b))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                if matches!(self.peek(), TokenKind::Punctuation('(')) {
                    self.parse_call(name)
                } else {
                    Ok(Expr::Identifier(name))
                }
            }
            TokenKind::Punctuation('(') => {
                self.advance();
                let node = self.parse_expr()?;
                self.eat(TokenKind::Punctuation(')'))?;
                Ok(node)
            }
            TokenKind::Punctuation('[') => {
                self.advance();
                let mut elements = Vec::new();
                if !matches!(self.peek(), TokenKind::Punctuation(']')) {
                    elements.push(self.parse_expr()?);
                    while matches!(self.peek(), TokenKind::Punctuation(',')) {
                        self.advance();
                        elements.push(self.parse_expr()?);
                    }
                }
                self.eat(TokenKind::Punctuation(']'))?;
                Ok(Expr::List(elements))
            }
            TokenKind::Operator(op) if op == "not" || op == "-" => {
                self.advance();
                let operand = self.parse_factor()?;
                Ok(Expr::Unary { op, operand: Box::new(operand) })
            }
            found => Err(ParseError::UnexpectedToken { found, location }),
        }
    }

    /// An identifier followed immediately by '(' is a call
    fn parse_call(&mut self, function: String) -> Result<Expr, ParseError> {
        self.eat(TokenKind::Punctuation('('))?;
        let mut args = Vec::new();
        if !matches!(self.peek(), TokenKind::Punctuation(')')) {
            args.push(self.parse_expr()?);
            while matches!(self.peek(), TokenKind::Punctuation(',')) {
                self.advance();
                args.push(self.parse_expr()?);
            }
        }
        self.eat(TokenKind::Punctuation(')'))?;
        Ok(Expr::Call { function, args })
    }
}
