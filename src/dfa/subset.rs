//! Subset construction (C5): turns the fused multi-accept NFA into a DFA by tracking
//! sets of NFA states ("origin sets") as single DFA states, deduplicated by their
//! canonical sorted key (see [crate::util::canonical_sorted]).

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::nfa::{Accept, Label, Nfa};
use crate::util::canonical_sorted;

use super::{Dfa, DfaState};

/// The set of characters subset construction needs to try out of every state: the
/// fixed alphabet plus anything the source NFA actually transitions on (a pattern
/// like `\d` only ever needs digit transitions, but Σ must still be tried for
/// completeness with other rules sharing the same fused NFA).
pub(crate) fn alphabet(nfa: &Nfa, fixed: &BTreeSet<char>) -> BTreeSet<char> {
    let mut set = fixed.clone();
    for state in &nfa.states {
        for t in &state.transitions {
            if let Label::Char(c) = t.label {
                set.insert(c);
            }
        }
    }
    set
}

pub(crate) fn epsilon_closure(nfa: &Nfa, states: &HashSet<usize>) -> HashSet<usize> {
    let mut closure = states.clone();
    let mut frontier: Vec<usize> = states.iter().copied().collect();
    while let Some(s) = frontier.pop() {
        for t in &nfa.states[s].transitions {
            if t.label == Label::Epsilon && closure.insert(t.target) {
                frontier.push(t.target);
            }
        }
    }
    closure
}

fn move_set(nfa: &Nfa, states: &HashSet<usize>, c: char) -> HashSet<usize> {
    let mut moved = HashSet::new();
    for &s in states {
        for t in &nfa.states[s].transitions {
            if t.label == Label::Char(c) {
                moved.insert(t.target);
            }
        }
    }
    moved
}

/// Among the NFA states in a DFA state's origin set, the accept with the lowest
/// priority wins (lower priority value means higher precedence, per the rule list's
/// ordering).
fn best_accept(nfa: &Nfa, states: &HashSet<usize>) -> Option<Accept> {
    states
        .iter()
        .filter_map(|&s| nfa.states[s].accept.as_ref())
        .min_by_key(|a| a.priority)
        .cloned()
}

pub(crate) fn build(nfa: &Nfa, sigma: &BTreeSet<char>) -> Dfa {
    let mut origin_of: HashMap<Vec<usize>, usize> = HashMap::new();
    let mut origin_sets: Vec<HashSet<usize>> = Vec::new();
    let mut states: Vec<DfaState> = Vec::new();

    let start_set = epsilon_closure(nfa, &HashSet::from([nfa.start]));
    origin_of.insert(canonical_sorted(&start_set), 0);
    states.push(DfaState {
        transitions: HashMap::new(),
        accept: best_accept(nfa, &start_set),
    });
    origin_sets.push(start_set);

    let mut frontier = vec![0usize];
    while let Some(id) = frontier.pop() {
        let set = origin_sets[id].clone();
        for &c in sigma {
            let moved = move_set(nfa, &set, c);
            if moved.is_empty() {
                continue;
            }
            let closure = epsilon_closure(nfa, &moved);
            let key = canonical_sorted(&closure);
            let target = if let Some(&existing) = origin_of.get(&key) {
                existing
            } else {
                let new_id = states.len();
                origin_of.insert(key, new_id);
                states.push(DfaState {
                    transitions: HashMap::new(),
                    accept: best_accept(nfa, &closure),
                });
                origin_sets.push(closure);
                frontier.push(new_id);
                new_id
            };
            states[id].transitions.insert(c, target);
        }
    }

    Dfa { states, start: 0 }
}
