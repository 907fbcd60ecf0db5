//! # Context-free grammar (C8)
//!
//! A [Grammar] is a flat list of [Production]s over [Symbol]s plus a start
//! non-terminal. [first_follow] computes the FIRST and FOLLOW sets by fixed-point
//! iteration; [Grammar::build_table] threads the grammar through
//! [crate::lr::items::canonical_collection] and [crate::lr::lalr::build] to produce
//! an [crate::lr::LalrTable].

use std::collections::HashSet;
use std::rc::Rc;

use thiserror::Error;

pub(crate) mod first_follow;

/// The symbol denoting the empty production `A -> ε`, when it is the sole element
/// of a production's right-hand side.
pub const EPSILON: &str = "ε";

/// The lookahead symbol marking the end of the token stream.
pub const END_OF_INPUT: &str = "$";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(Rc<str>),
    NonTerminal(Rc<str>),
}

impl Symbol {
    pub fn terminal(name: impl Into<Rc<str>>) -> Self {
        Symbol::Terminal(name.into())
    }

    pub fn non_terminal(name: impl Into<Rc<str>>) -> Self {
        Symbol::NonTerminal(name.into())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(s) | Symbol::NonTerminal(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    pub lhs: Rc<str>,
    pub rhs: Vec<Symbol>,
}

impl Production {
    pub fn new(lhs: impl Into<Rc<str>>, rhs: Vec<Symbol>) -> Self {
        Production { lhs: lhs.into(), rhs }
    }

    /// Whether this production's rhs is the single-element `[ε]` denoting the empty
    /// production.
    pub fn is_epsilon(&self) -> bool {
        matches!(self.rhs.as_slice(), [Symbol::Terminal(t)] if &**t == EPSILON)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("start symbol '{0}' has no production")]
    NoProductionForStart(Rc<str>),
    #[error("non-terminal '{0}', used in the production for '{1}', is never defined")]
    UndefinedNonTerminal(Rc<str>, Rc<str>),
}

#[derive(Debug, Clone)]
pub struct Grammar {
    pub productions: Vec<Production>,
    pub start: Rc<str>,
    pub terminals: HashSet<Rc<str>>,
    pub non_terminals: HashSet<Rc<str>>,
}

impl Grammar {
    pub fn new(productions: Vec<Production>, start: impl Into<Rc<str>>) -> Result<Self, GrammarError> {
        let start = start.into();
        let non_terminals: HashSet<Rc<str>> = productions.iter().map(|p| p.lhs.clone()).collect();
        if !non_terminals.contains(&start) {
            return Err(GrammarError::NoProductionForStart(start));
        }

        let mut terminals: HashSet<Rc<str>> = HashSet::new();
        for p in &productions {
            for sym in &p.rhs {
                match sym {
                    Symbol::Terminal(t) => {
                        terminals.insert(t.clone());
                    }
                    Symbol::NonTerminal(nt) => {
                        if !non_terminals.contains(nt) {
                            return Err(GrammarError::UndefinedNonTerminal(nt.clone(), p.lhs.clone()));
                        }
                    }
                }
            }
        }
        terminals.insert(Rc::from(EPSILON));
        terminals.insert(Rc::from(END_OF_INPUT));

        Ok(Grammar {
            productions,
            start,
            terminals,
            non_terminals,
        })
    }

    pub fn productions_for<'a>(&'a self, lhs: &'a str) -> impl Iterator<Item = &'a Production> {
        self.productions.iter().filter(move |p| &*p.lhs == lhs)
    }

    /// Compiles this grammar's canonical LR(1) collection into an LALR(1) table by
    /// merging states with identical kernels.
    pub fn build_table(&self) -> crate::lr::LalrTable {
        let collection = crate::lr::items::canonical_collection(self);
        crate::lr::lalr::build(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arithmetic_grammar() -> Grammar {
        // E -> E + T | T
        // T -> T * F | F
        // F -> ( E ) | id
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

    #[test]
    fn rejects_a_start_symbol_with_no_production() {
        let err = Grammar::new(vec![Production::new("A", vec![Symbol::terminal("a")])], "S").unwrap_err();
        assert!(matches!(err, GrammarError::NoProductionForStart(_)));
    }

    #[test]
    fn rejects_an_undefined_non_terminal() {
        let err = Grammar::new(
            vec![Production::new("S", vec![Symbol::non_terminal("Missing")])],
            "S",
        )
        .unwrap_err();
        assert!(matches!(err, GrammarError::UndefinedNonTerminal(_, _)));
    }

    #[test]
    fn accepts_the_arithmetic_grammar() {
        let grammar = arithmetic_grammar();
        assert_eq!(grammar.non_terminals.len(), 3);
        assert!(grammar.terminals.iter().any(|t| &**t == "+"));
    }
}
