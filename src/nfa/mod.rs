//! # Nondeterministic finite automaton (C1)
//!
//! An [Nfa] is an arena of [NfaState]s addressed by plain `usize` indices rather than
//! by `Rc<RefCell<_>>` pointers: states never need to reference each other cyclically
//! through shared ownership, only through the index, so the arena form avoids
//! reference cycles entirely and makes the whole automaton trivially `Clone`.
//!
//! States carry ordinary character transitions and ε-transitions side by side (see
//! [Label]), plus an optional [Accept] annotation recording which lexical rule (by
//! token kind and priority) a state accepts for, if any.
//!
//! [thompson] builds one [Fragment] per rule from a postfix regex token stream;
//! [Builder] then fuses every rule's fragment into a single multi-accept NFA behind a
//! fresh start state, per the priority order the caller built each fragment in.

use std::rc::Rc;

pub(crate) mod thompson;

/// What a transition is labeled with: either a concrete input character, or the
/// empty move ε used to glue Thompson fragments together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Label {
    Char(char),
    Epsilon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Transition {
    pub label: Label,
    pub target: usize,
}

/// Which lexical rule a state accepts for, and at what priority (lower wins ties).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accept {
    pub kind: Rc<str>,
    pub priority: usize,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct NfaState {
    pub transitions: Vec<Transition>,
    pub accept: Option<Accept>,
}

#[derive(Debug, Clone)]
pub(crate) struct Nfa {
    pub states: Vec<NfaState>,
    pub start: usize,
}

/// A Thompson fragment: a sub-automaton with exactly one entry state and one exit
/// state, with no transitions pointing into `start` from outside the fragment and no
/// transitions leaving `end` within the fragment (the invariant [thompson] maintains
/// at every step of the postfix evaluation).
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fragment {
    pub start: usize,
    pub end: usize,
}

/// Allocates NFA states with a counter local to the builder instance, never a
/// global/static counter, so that building two tokenizers in the same process (or
/// rebuilding one) never lets state ids leak between them.
pub(crate) struct Builder {
    states: Vec<NfaState>,
}

impl Builder {
    pub fn new() -> Self {
        Builder { states: Vec::new() }
    }

    pub fn fresh_state(&mut self) -> usize {
        self.states.push(NfaState::default());
        self.states.len() - 1
    }

    pub fn add_transition(&mut self, from: usize, label: Label, to: usize) {
        self.states[from].transitions.push(Transition { label, target: to });
    }

    pub fn set_accept(&mut self, state: usize, accept: Accept) {
        self.states[state].accept = Some(accept);
    }

    /// Fuses every rule fragment (built in ascending priority order) behind a single
    /// fresh start state connected to each fragment's start by an ε-transition.
    pub fn fuse(mut self, fragment_starts: Vec<usize>) -> Nfa {
        let start = self.fresh_state();
        for fragment_start in fragment_starts {
            self.add_transition(start, Label::Epsilon, fragment_start);
        }
        Nfa {
            states: self.states,
            start,
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
