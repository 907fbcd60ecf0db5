//! Stack-based shift/reduce LR driver (C11): a straightforward table interpreter
//! over an [LalrTable], with no error recovery — the first unexpected token ends the
//! parse with a [SyntaxError].

use std::rc::Rc;

use thiserror::Error;

use crate::grammar::END_OF_INPUT;
use crate::token::Token;

use super::lalr::{Action, LalrTable};

/// The parser reached an empty `ACTION`/`GOTO` cell ([UnexpectedToken](SyntaxError::UnexpectedToken)),
/// or was handed a token stream with no tokens at all — not even the `EOF` the
/// tokenizer always appends ([EmptyInput](SyntaxError::EmptyInput)). `tokens: &[Token]`
/// carries no type-level guarantee that it ends in `EOF`, so [parse] reports the
/// latter as a typed error rather than panicking on the first lookahead lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("syntax error at '{}' (kind {}) at position {}", token.lexeme, token.kind, token.position)]
    UnexpectedToken { token: Token },
    #[error("syntax error: empty token stream (expected at least a trailing EOF token)")]
    EmptyInput,
}

pub(crate) fn parse(table: &LalrTable, tokens: &[Token]) -> Result<(), SyntaxError> {
    if tokens.is_empty() {
        return Err(SyntaxError::EmptyInput);
    }

    let mut stack = vec![table.start_state];
    let mut pos = 0usize;

    loop {
        let state = *stack.last().unwrap();
        let token = tokens.get(pos).unwrap_or_else(|| tokens.last().unwrap());
        // the tokenizer's synthetic EOF token (kind "EOF") stands for the grammar's
        // end-of-input terminal "$"; every other token's kind is looked up verbatim.
        let lookahead: Rc<str> = if token.is_eof() { Rc::from(END_OF_INPUT) } else { token.kind.clone() };

        match table.action.get(&(state, lookahead)) {
            Some(Action::Shift(next)) => {
                stack.push(*next);
                pos += 1;
            }
            Some(Action::Reduce(prod_idx)) => {
                let prod = &table.augmented_productions[*prod_idx];
                let pop_count = if prod.is_epsilon() { 0 } else { prod.rhs.len() };
                for _ in 0..pop_count {
                    stack.pop();
                }
                let new_top = *stack.last().unwrap();
                match table.goto.get(&(new_top, prod.lhs.clone())) {
                    Some(&next) => stack.push(next),
                    None => return Err(SyntaxError::UnexpectedToken { token: token.clone() }),
                }
            }
            Some(Action::Accept) => return Ok(()),
            None => return Err(SyntaxError::UnexpectedToken { token: token.clone() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Grammar, Production, Symbol};
    use crate::token::Token;

    fn arithmetic_grammar() -> Grammar {
        Grammar::new(
            vec![
                Production::new("E", vec![Symbol::non_terminal("E"), Symbol::terminal("+"), Symbol::non_terminal("T")]),
                Production::new("E", vec![Symbol::non_terminal("T")]),
                Production::new("T", vec![Symbol::non_terminal("T"), Symbol::terminal("*"), Symbol::non_terminal("F")]),
                Production::new("T", vec![Symbol::non_terminal("F")]),
                Production::new(
                    "F",
                    vec![Symbol::terminal("("), Symbol::non_terminal("E"), Symbol::terminal(")")],
                ),
                Production::new("F", vec![Symbol::terminal("id")]),
            ],
            "E",
        )
        .unwrap()
    }

    fn token(kind: &str) -> Token {
        Token::new(kind, kind, 0, 1, 1)
    }

    #[test]
    fn accepts_id_plus_id_times_id() {
        let grammar = arithmetic_grammar();
        let table = grammar.build_table();
        let tokens = vec![
            token("id"),
            token("+"),
            token("id"),
            token("*"),
            token("id"),
            token("$"),
        ];
        assert!(table.parse(&tokens).is_ok());
    }

    #[test]
    fn accepts_parenthesized_expression() {
        let grammar = arithmetic_grammar();
        let table = grammar.build_table();
        let tokens = vec![
            token("("),
            token("id"),
            token("+"),
            token("id"),
            token(")"),
            token("$"),
        ];
        assert!(table.parse(&tokens).is_ok());
    }

    #[test]
    fn rejects_a_dangling_operator() {
        let grammar = arithmetic_grammar();
        let table = grammar.build_table();
        let tokens = vec![token("id"), token("+"), token("$")];
        let err = table.parse(&tokens).unwrap_err();
        match err {
            SyntaxError::UnexpectedToken { token } => assert_eq!(token.kind.as_ref(), "$"),
            SyntaxError::EmptyInput => panic!("expected UnexpectedToken"),
        }
    }

    #[test]
    fn rejects_mismatched_parens() {
        let grammar = arithmetic_grammar();
        let table = grammar.build_table();
        let tokens = vec![token("("), token("id"), token("$")];
        assert!(table.parse(&tokens).is_err());
    }

    #[test]
    fn an_empty_token_stream_is_a_typed_error_not_a_panic() {
        let grammar = arithmetic_grammar();
        let table = grammar.build_table();
        let err = table.parse(&[]).unwrap_err();
        assert_eq!(err, SyntaxError::EmptyInput);
    }
}
