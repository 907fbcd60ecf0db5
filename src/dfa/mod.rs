//! # Deterministic finite automaton (C4)
//!
//! A [Dfa] is, like [crate::nfa::Nfa], an arena of [DfaState]s addressed by `usize`.
//! Each state's transitions are keyed directly by `char` rather than by a shared
//! alphabet index, since Σ is small and fixed (see [crate::regex::fixed_alphabet]);
//! that keeps [subset] and [minimize] from having to thread an alphabet-index table
//! alongside every state.
//!
//! [subset] builds a `Dfa` from a fused multi-accept [Nfa](crate::nfa::Nfa);
//! [minimize] then collapses it to its minimal form via table-filling.

use std::collections::HashMap;

pub(crate) mod minimize;
pub(crate) mod subset;

pub use crate::nfa::Accept;

#[derive(Debug, Clone, Default)]
pub(crate) struct DfaState {
    pub transitions: HashMap<char, usize>,
    pub accept: Option<Accept>,
}

impl DfaState {
    pub fn is_final(&self) -> bool {
        self.accept.is_some()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Dfa {
    pub states: Vec<DfaState>,
    pub start: usize,
}
