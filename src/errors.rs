// File: src/errors.rs
//
// Error handling and reporting for the Wisp scripting language.
// Provides structured error types with source location information
// and pretty-printed error messages.
//
// Every error aborts the whole parse or the whole evaluation. There is
// no recovery, no partial result and no retry; callers report and
// terminate.

use crate::lexer::TokenKind;
use colored::Colorize;
use std::fmt;

/// Source location information for tracking where a token appears
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A grammar violation. Parsing aborts on the first one; no error
/// recovery or partial AST is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The parser required a specific token kind and saw another
    Expected {
        expected: TokenKind,
        found: TokenKind,
        location: SourceLocation,
    },
    /// No expression production matches the current token
    UnexpectedToken {
        found: TokenKind,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Expected { location, .. } => *location,
            ParseError::UnexpectedToken { location, .. } => *location,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let header = "Parse Error".red().bold();
        match self {
            ParseError::Expected { expected, found, location } => {
                writeln!(f, "{}: expected {}, found {}", header, expected, found)?;
                write!(f, "{}", format!("  --> {}", location).bright_blue())
            }
            ParseError::UnexpectedToken { found, location } => {
                writeln!(f, "{}: unexpected {}", header, found)?;
                write!(f, "{}", format!("  --> {}", location).bright_blue())
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Types of errors that can occur while evaluating a Wisp program
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Identifier lookup failure, with an optional near-miss candidate
    UndefinedVariable {
        name: String,
        suggestion: Option<String>,
    },
    /// Right operand of `/` or `%` is zero
    DivisionByZero,
    /// Call argument count disagrees with the declared parameter count
    ArityMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },
    /// Callee name resolves to something that is not a function
    InvalidCallTarget { name: String },
    /// Operator kind not recognized for the node evaluated. Indicates a
    /// parser/evaluator grammar mismatch.
    InvalidOperator {
        operator: String,
        node: &'static str,
    },
    /// Binary operator applied to value types it does not support
    InvalidOperands {
        operator: String,
        left: &'static str,
        right: &'static str,
    },
    /// Unary operator applied to a value type it does not support
    InvalidOperand {
        operator: String,
        operand: &'static str,
    },
    /// A for-loop iterable that is not a sequence
    NotIterable { type_name: &'static str },
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let header = "Runtime Error".red().bold();
        match self {
            RuntimeError::UndefinedVariable { name, suggestion } => {
                write!(f, "{}: variable '{}' is not defined", header, name)?;
                if let Some(candidate) = suggestion {
                    write!(
                        f,
                        "\n   {} {}",
                        "=".bright_green(),
                        format!("Did you mean '{}'?", candidate).bright_green()
                    )?;
                }
                Ok(())
            }
            RuntimeError::DivisionByZero => {
                write!(f, "{}: division by zero", header)
            }
            RuntimeError::ArityMismatch { function, expected, actual } => {
                write!(
                    f,
                    "{}: function '{}' takes {} argument(s) but {} were supplied",
                    header, function, expected, actual
                )
            }
            RuntimeError::InvalidCallTarget { name } => {
                write!(f, "{}: '{}' is not a function", header, name)
            }
            RuntimeError::InvalidOperator { operator, node } => {
                write!(
                    f,
                    "{}: operator '{}' is not valid for a {} expression",
                    header, operator, node
                )
            }
            RuntimeError::InvalidOperands { operator, left, right } => {
                write!(
                    f,
                    "{}: operator '{}' cannot be applied to {} and {}",
                    header, operator, left, right
                )
            }
            RuntimeError::InvalidOperand { operator, operand } => {
                write!(
                    f,
                    "{}: operator '{}' cannot be applied to {}",
                    header, operator, operand
                )
            }
            RuntimeError::NotIterable { type_name } => {
                write!(f, "{}: {} is not iterable", header, type_name)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}

/// Computes the Levenshtein distance between two strings, used for
/// "Did you mean?" suggestions. Two-row dynamic programming.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Find the closest match from a list of candidates.
/// Returns None when nothing is reasonably close (distance > 3).
pub fn find_closest_match<'a, I>(target: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut best: Option<(usize, &str)> = None;
    for candidate in candidates {
        let distance = levenshtein_distance(target, candidate);
        if distance <= 3 && best.map(|(d, _)| distance < d).unwrap_or(true) {
            best = Some((distance, candidate));
        }
    }
    best.map(|(_, name)| name.to_string())
}
