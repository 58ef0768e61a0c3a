// File: src/lexer.rs
//
// Lexical analyzer (tokenizer) for the Wisp scripting language.
// Converts source text into the flat token stream consumed by the parser.
//
// Supports:
// - Grammar keywords: var, mut, if, else, for, in, while, func, return
// - Reserved keywords outside the implemented grammar: class, init,
//   override, module, import, throw, try, catch
// - Identifiers, number literals, string literals with escape sequences,
//   true/false
// - Operators: + - * / % = == != < <= > >= .. and the word operators
//   and, or, not
// - Punctuation: ( ) { } [ ] , ;
// - Comments: // to end of line, and /* ... */ blocks

use ahash::AHashSet;
use once_cell::sync::Lazy;
use std::fmt;

/// Keywords the lexer recognizes but the grammar never consumes.
/// They surface as `Keyword` tokens and the parser rejects them.
static RESERVED: Lazy<AHashSet<&'static str>> = Lazy::new(|| {
    ["class", "init", "override", "module", "import", "throw", "try", "catch"]
        .into_iter()
        .collect()
});

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Identifier(String),
    Number(f64),
    String(String),
    Bool(bool),
    Operator(String),
    Punctuation(char),
    Keyword(String),
    /// Identifier of the form `SomethingError`. Part of the token
    /// vocabulary but outside the grammar.
    ErrorType(String),
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Identifier(name) if name.is_empty() => write!(f, "identifier"),
            TokenKind::Identifier(name) => write!(f, "identifier '{}'", name),
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::String(_) => write!(f, "string literal"),
            TokenKind::Bool(b) => write!(f, "'{}'", b),
            TokenKind::Operator(op) => write!(f, "'{}'", op),
            TokenKind::Punctuation(c) => write!(f, "'{}'", c),
            TokenKind::Keyword(k) => write!(f, "keyword '{}'", k),
            TokenKind::ErrorType(name) => write!(f, "error type '{}'", name),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

/// Tokenizes Wisp source code into a vector of tokens.
///
/// Processes the input character by character. Whitespace and comments
/// are stripped; the returned stream always ends with an `Eof` token.
/// Characters outside the vocabulary are skipped: the lexer is the
/// trusted collaborator of the parser and has no error channel.
pub fn tokenize(source: &str) -> Vec<Token> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    let mut line = 1;
    let mut col = 1;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' | '\r' => {
                i += 1;
                col += 1;
            }
            '\n' => {
                i += 1;
                line += 1;
                col = 1;
            }
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                col += 2;
                while i < chars.len() {
                    if chars[i] == '*' && chars.get(i + 1) == Some(&'/') {
                        i += 2;
                        col += 2;
                        break;
                    }
                    if chars[i] == '\n' {
                        line += 1;
                        col = 1;
                    } else {
                        col += 1;
                    }
                    i += 1;
                }
            }
            '"' => {
                let start_line = line;
                let start_col = col;
                i += 1;
                col += 1;
                let mut s = String::new();
                while i < chars.len() {
                    let ch = chars[i];
                    i += 1;
                    col += 1;
                    if ch == '"' {
                        break;
                    }
                    if ch == '\\' {
                        if let Some(&esc) = chars.get(i) {
                            i += 1;
                            col += 1;
                            match esc {
                                'n' => s.push('\n'),
                                't' => s.push('\t'),
                                '\\' => s.push('\\'),
                                '"' => s.push('"'),
                                _ => s.push(esc),
                            }
                        }
                    } else {
                        if ch == '\n' {
                            line += 1;
                            col = 1;
                        }
                        s.push(ch);
                    }
                }
                tokens.push(Token { kind: TokenKind::String(s), line: start_line, column: start_col });
            }
            '0'..='9' => {
                let start_col = col;
                let mut num = String::new();
                while let Some(&ch) = chars.get(i) {
                    if ch.is_ascii_digit() {
                        num.push(ch);
                        i += 1;
                        col += 1;
                    } else if ch == '.'
                        && chars.get(i + 1).map(|d| d.is_ascii_digit()).unwrap_or(false)
                        && !num.contains('.')
                    {
                        // A lone '.' after digits is the start of a '..'
                        // range operator, not a fraction.
                        num.push(ch);
                        i += 1;
                        col += 1;
                    } else {
                        break;
                    }
                }
                let parsed = num.parse().unwrap_or(0.0);
                tokens.push(Token { kind: TokenKind::Number(parsed), line, column: start_col });
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                let start_col = col;
                let mut ident = String::new();
                while let Some(&ch) = chars.get(i) {
                    if ch.is_alphanumeric() || ch == '_' {
                        ident.push(ch);
                        i += 1;
                        col += 1;
                    } else {
                        break;
                    }
                }

                let kind = match ident.as_str() {
                    "var" | "mut" | "if" | "else" | "for" | "in" | "while" | "func"
                    | "return" => TokenKind::Keyword(ident),
                    word if RESERVED.contains(word) => TokenKind::Keyword(ident),
                    "and" | "or" | "not" => TokenKind::Operator(ident),
                    "true" => TokenKind::Bool(true),
                    "false" => TokenKind::Bool(false),
                    _ if ident.len() > "Error".len() && ident.ends_with("Error") => {
                        TokenKind::ErrorType(ident)
                    }
                    _ => TokenKind::Identifier(ident),
                };

                tokens.push(Token { kind, line, column: start_col });
            }
            '.' if chars.get(i + 1) == Some(&'.') => {
                tokens.push(Token {
                    kind: TokenKind::Operator("..".into()),
                    line,
                    column: col,
                });
                i += 2;
                col += 2;
            }
            '=' | '+' | '-' | '*' | '/' | '%' | '<' | '>' | '!' => {
                let start_col = col;
                i += 1;
                col += 1;
                let two = matches!(c, '=' | '<' | '>' | '!') && chars.get(i) == Some(&'=');
                let op = if two {
                    i += 1;
                    col += 1;
                    format!("{}=", c)
                } else if c == '!' {
                    // Lone '!' is not in the vocabulary; 'not' is the word
                    // operator. Skip it.
                    continue;
                } else {
                    c.to_string()
                };
                tokens.push(Token { kind: TokenKind::Operator(op), line, column: start_col });
            }
            '(' | ')' | '{' | '}' | '[' | ']' | ',' | ';' => {
                tokens.push(Token { kind: TokenKind::Punctuation(c), line, column: col });
                i += 1;
                col += 1;
            }
            _ => {
                i += 1;
                col += 1;
            }
        }
    }

    tokens.push(Token { kind: TokenKind::Eof, line, column: col });
    tokens
}
