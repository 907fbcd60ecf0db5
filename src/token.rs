//! Shared types that flow between the tokenizer and the parser (C12).
//!
//! A [Token] is the only thing the lexer and the parser agree on: the lexer produces a
//! `Vec<Token>`, and the parser consumes it without knowing anything about the regex or
//! DFA machinery that produced it.

use std::rc::Rc;

/// The kind reserved for a rule that failed to match at a given position; the lexer
/// emits a single-character `UNKNOWN` token rather than failing outright (see
/// [crate::lexer::Tokenizer::tokenize]).
pub const UNKNOWN_KIND: &str = "UNKNOWN";

/// The kind of the synthetic token always appended to a token stream.
pub const EOF_KIND: &str = "EOF";

/// One lexeme recognized (or, for `UNKNOWN`, rejected) by the tokenizer.
///
/// Positions are 0-based and absolute over the input string; `line` and `column` are
/// 1-based, with `column` measured in `char`s since the start of the line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: Rc<str>,
    pub lexeme: Rc<str>,
    pub position: usize,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: impl Into<Rc<str>>, lexeme: impl Into<Rc<str>>, position: usize, line: usize, column: usize) -> Self {
        Token {
            kind: kind.into(),
            lexeme: lexeme.into(),
            position,
            line,
            column,
        }
    }

    /// Whether this token is the synthetic `EOF` token always appended to a token stream.
    pub fn is_eof(&self) -> bool {
        &*self.kind == EOF_KIND
    }

    /// Whether this token stands for a character that matched no lexical rule.
    pub fn is_unknown(&self) -> bool {
        &*self.kind == UNKNOWN_KIND
    }
}
