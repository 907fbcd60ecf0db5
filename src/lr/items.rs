//! LR(1) item closure, GOTO, and the canonical collection (C9).
//!
//! Items are addressed by the index of their production in an *augmented* grammar:
//! a synthetic start production `S' -> S` is prepended so the parser driver has an
//! unambiguous accepting item `[S' -> S ., $]` to stop on. Production indices into
//! `augmented_productions` are therefore offset by one from the caller's
//! [Grammar](crate::grammar::Grammar)`.productions`.
//!
//! A production whose rhs is the `[ε]` placeholder (see
//! [Production::is_epsilon](crate::grammar::Production::is_epsilon)) has nothing to
//! shift over, so its items are created already "complete" (`dot == rhs.len() == 1`)
//! rather than starting at `dot == 0`.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::grammar::first_follow::{self, SymbolSets};
use crate::grammar::{Grammar, Production, Symbol, END_OF_INPUT, EPSILON};
use crate::util::canonical_sorted;

pub(crate) const AUGMENTED_START: &str = "S'";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct Item {
    pub production: usize,
    pub dot: usize,
    pub lookahead: Rc<str>,
}

pub(crate) type ItemSet = HashSet<Item>;

#[derive(Debug, Clone)]
pub(crate) struct Lr1State {
    pub items: ItemSet,
}

#[derive(Debug, Clone)]
pub(crate) struct CanonicalCollection {
    pub augmented_productions: Vec<Production>,
    pub states: Vec<Lr1State>,
    pub transitions: HashMap<(usize, Symbol), usize>,
}

fn initial_dot(prod: &Production) -> usize {
    if prod.is_epsilon() {
        prod.rhs.len()
    } else {
        0
    }
}

pub(crate) fn closure(augmented: &[Production], first: &SymbolSets, items: ItemSet) -> ItemSet {
    let mut set = items;
    let mut changed = true;

    while changed {
        changed = false;
        let snapshot: Vec<Item> = set.iter().cloned().collect();

        for item in &snapshot {
            let prod = &augmented[item.production];
            if item.dot >= prod.rhs.len() {
                continue;
            }
            let Symbol::NonTerminal(b) = &prod.rhs[item.dot] else {
                continue;
            };

            let mut seq: Vec<Symbol> = prod.rhs[item.dot + 1..].to_vec();
            seq.push(Symbol::Terminal(item.lookahead.clone()));
            let lookaheads = first_follow::first_of_sequence(first, &seq);

            for (idx, candidate) in augmented.iter().enumerate() {
                if &candidate.lhs != b {
                    continue;
                }
                let dot = initial_dot(candidate);
                for t in lookaheads.iter().filter(|s| &***s != EPSILON) {
                    let new_item = Item {
                        production: idx,
                        dot,
                        lookahead: t.clone(),
                    };
                    if set.insert(new_item) {
                        changed = true;
                    }
                }
            }
        }
    }

    set
}

pub(crate) fn goto(augmented: &[Production], first: &SymbolSets, items: &ItemSet, symbol: &Symbol) -> ItemSet {
    let mut moved = HashSet::new();
    for item in items {
        let prod = &augmented[item.production];
        if item.dot < prod.rhs.len() && &prod.rhs[item.dot] == symbol {
            moved.insert(Item {
                production: item.production,
                dot: item.dot + 1,
                lookahead: item.lookahead.clone(),
            });
        }
    }
    closure(augmented, first, moved)
}

fn symbols_after_dot(augmented: &[Production], items: &ItemSet) -> HashSet<Symbol> {
    items
        .iter()
        .filter_map(|item| {
            let prod = &augmented[item.production];
            (item.dot < prod.rhs.len()).then(|| prod.rhs[item.dot].clone())
        })
        .filter(|s| !(s.is_terminal() && s.name() == EPSILON))
        .collect()
}

pub(crate) fn canonical_collection(grammar: &Grammar) -> CanonicalCollection {
    let mut augmented = Vec::with_capacity(grammar.productions.len() + 1);
    augmented.push(Production::new(
        AUGMENTED_START,
        vec![Symbol::non_terminal(grammar.start.clone())],
    ));
    augmented.extend(grammar.productions.iter().cloned());

    let first = first_follow::first_sets(grammar);

    let start_item = Item {
        production: 0,
        dot: 0,
        lookahead: Rc::from(END_OF_INPUT),
    };
    let start_set = closure(&augmented, &first, HashSet::from([start_item]));

    let mut key_to_id: HashMap<Vec<Item>, usize> = HashMap::new();
    key_to_id.insert(canonical_sorted(&start_set), 0);
    let mut states = vec![Lr1State { items: start_set }];
    let mut transitions = HashMap::new();

    let mut frontier = vec![0usize];
    while let Some(id) = frontier.pop() {
        let items = states[id].items.clone();
        for symbol in symbols_after_dot(&augmented, &items) {
            let moved = goto(&augmented, &first, &items, &symbol);
            if moved.is_empty() {
                continue;
            }
            let key = canonical_sorted(&moved);
            let target = if let Some(&existing) = key_to_id.get(&key) {
                existing
            } else {
                let new_id = states.len();
                states.push(Lr1State { items: moved });
                key_to_id.insert(key, new_id);
                frontier.push(new_id);
                new_id
            };
            transitions.insert((id, symbol), target);
        }
    }

    CanonicalCollection {
        augmented_productions: augmented,
        states,
        transitions,
    }
}
