//! LALR(1) table construction (C10): merges canonical LR(1) states that share a
//! kernel (the set of `(production, dot)` pairs, ignoring lookaheads) into a single
//! state, unions their lookaheads, then fills ACTION/GOTO from the merged item sets.
//! Conflicts are recorded as [TableConflict] diagnostics — the first action written
//! for a `(state, symbol)` cell wins, later ones are reported but do not replace it.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::grammar::{Production, Symbol, EPSILON};

use super::items::{AUGMENTED_START, CanonicalCollection, Item};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce(usize),
    Accept,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    ShiftReduce,
    ReduceReduce,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConflict {
    pub state: usize,
    pub symbol: Rc<str>,
    pub kind: ConflictKind,
}

impl fmt::Display for TableConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ConflictKind::ShiftReduce => "shift/reduce",
            ConflictKind::ReduceReduce => "reduce/reduce",
        };
        write!(f, "{kind} conflict in state {} on '{}'", self.state, self.symbol)
    }
}

#[derive(Debug, Clone)]
pub struct LalrTable {
    pub(crate) augmented_productions: Vec<Production>,
    pub(crate) action: HashMap<(usize, Rc<str>), Action>,
    pub(crate) goto: HashMap<(usize, Rc<str>), usize>,
    pub(crate) start_state: usize,
    conflicts: Vec<TableConflict>,
}

impl LalrTable {
    pub fn conflicts(&self) -> &[TableConflict] {
        &self.conflicts
    }

    pub fn parse(&self, tokens: &[crate::token::Token]) -> Result<(), super::driver::SyntaxError> {
        super::driver::parse(self, tokens)
    }
}

fn kernel_of(items: &std::collections::HashSet<Item>) -> Vec<(usize, usize)> {
    let mut kernel: Vec<(usize, usize)> = items
        .iter()
        .map(|i| (i.production, i.dot))
        .collect::<std::collections::HashSet<_>>()
        .into_iter()
        .collect();
    kernel.sort_unstable();
    kernel
}

pub(crate) fn build(collection: CanonicalCollection) -> LalrTable {
    let CanonicalCollection {
        augmented_productions,
        states,
        transitions,
    } = collection;

    let mut kernel_to_group: HashMap<Vec<(usize, usize)>, usize> = HashMap::new();
    let mut group_of_state = vec![0usize; states.len()];
    for (id, state) in states.iter().enumerate() {
        let key = kernel_of(&state.items);
        let next_id = kernel_to_group.len();
        let group = *kernel_to_group.entry(key).or_insert(next_id);
        group_of_state[id] = group;
    }
    let num_groups = kernel_to_group.len();

    let mut merged_items: Vec<std::collections::HashSet<Item>> = vec![Default::default(); num_groups];
    for (id, state) in states.iter().enumerate() {
        merged_items[group_of_state[id]].extend(state.items.iter().cloned());
    }

    let mut merged_transitions: HashMap<(usize, Symbol), usize> = HashMap::new();
    for ((from_state, symbol), to_state) in &transitions {
        merged_transitions.insert((group_of_state[*from_state], symbol.clone()), group_of_state[*to_state]);
    }

    let start_state = group_of_state[0];
    let mut action: HashMap<(usize, Rc<str>), Action> = HashMap::new();
    let mut goto: HashMap<(usize, Rc<str>), usize> = HashMap::new();
    let mut conflicts = Vec::new();

    for g in 0..num_groups {
        for item in &merged_items[g] {
            let prod = &augmented_productions[item.production];
            let complete = item.dot >= prod.rhs.len();

            if complete {
                let new_action = if &*prod.lhs == AUGMENTED_START {
                    Action::Accept
                } else {
                    Action::Reduce(item.production)
                };
                set_action(&mut action, &mut conflicts, g, item.lookahead.clone(), new_action);
            } else if let Symbol::Terminal(t) = &prod.rhs[item.dot] {
                if &**t != EPSILON {
                    if let Some(&target) = merged_transitions.get(&(g, prod.rhs[item.dot].clone())) {
                        set_action(&mut action, &mut conflicts, g, t.clone(), Action::Shift(target));
                    }
                }
            }
        }

        for ((from_g, symbol), to_g) in &merged_transitions {
            if *from_g == g {
                if let Symbol::NonTerminal(nt) = symbol {
                    goto.insert((g, nt.clone()), *to_g);
                }
            }
        }
    }

    LalrTable {
        augmented_productions,
        action,
        goto,
        start_state,
        conflicts,
    }
}

/// Writes `new` into `action[(state, symbol)]` if that cell is empty; if it already
/// holds a different action, records a conflict and keeps the action that was
/// written first (deterministic: LR(1) states, and therefore their items, are always
/// iterated in the same order for the same grammar).
fn set_action(
    action: &mut HashMap<(usize, Rc<str>), Action>,
    conflicts: &mut Vec<TableConflict>,
    state: usize,
    symbol: Rc<str>,
    new: Action,
) {
    match action.get(&(state, symbol.clone())) {
        None => {
            action.insert((state, symbol), new);
        }
        Some(existing) => {
            if *existing != new {
                let kind = match (existing, &new) {
                    (Action::Reduce(_), Action::Reduce(_)) => ConflictKind::ReduceReduce,
                    _ => ConflictKind::ShiftReduce,
                };
                conflicts.push(TableConflict { state, symbol, kind });
            }
        }
    }
}
