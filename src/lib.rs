//! # lexparse
//!
//! `lexparse` is a Rust library implementing the runtime half of a small compiler
//! front-end generator: given an ordered list of lexical rules (regex → token kind)
//! and a context-free grammar, it compiles a maximal-munch [Tokenizer](lexer::Tokenizer)
//! and an [LALR(1) parsing table](lr::LalrTable), and drives both over an input string.
//!
//! ## Pipeline
//!
//! ```text
//! rules: &[LexicalRule]  --regex::parse + nfa::thompson-->  one NFA per rule
//!                         --fused, annotated with (kind, priority)-->  multi-accept NFA
//!                         --dfa::subset::build-->  DFA
//!                         --dfa::minimize::minimize-->  minimized DFA
//!                         --lexer::Tokenizer::tokenize-->  Vec<Token>
//!
//! grammar: Grammar        --grammar::first_follow-->  FIRST/FOLLOW sets
//!                         --lr::items::canonical_collection-->  LR(1) automaton
//!                         --lr::lalr::build_table-->  LalrTable (+ conflicts)
//!                         --lr::driver::parse-->  accept | SyntaxError
//! ```
//!
//! ## Example
//!
//! ```
//! use lexparse::lexer::{LexicalRule, Tokenizer};
//!
//! let rules = vec![
//!     LexicalRule::new("if", "KW_IF", 0, false),
//!     LexicalRule::new("[a-z]+", "IDENT", 1, false),
//!     LexicalRule::new(" +", "WS", 2, true),
//! ];
//! let tokenizer = Tokenizer::build(&rules).unwrap();
//! let tokens = tokenizer.tokenize("if myif");
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind.as_ref()).collect();
//! assert_eq!(kinds, ["KW_IF", "IDENT", "EOF"]);
//! ```
//!
//! ## Scope
//!
//! This crate consumes a pre-populated [Grammar](grammar::Grammar) and a pre-populated
//! rule list; it does not parse grammar description files, does not provide a CLI, and
//! does not attempt parser error recovery or semantic actions on reduction. Regexes
//! target 8-bit printable ASCII plus whitespace — there is no Unicode class support,
//! no backreferences, and no lazy quantifiers.

pub mod dfa;
pub mod grammar;
pub mod lexer;
pub mod lr;
pub mod nfa;
pub mod regex;
pub mod token;

pub(crate) mod util;
