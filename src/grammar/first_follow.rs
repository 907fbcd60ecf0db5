//! FIRST and FOLLOW set computation by fixed-point iteration over a [Grammar]'s
//! productions, per the textbook rules:
//!
//! * FIRST(terminal) = `{terminal}`.
//! * FIRST(A) gains FIRST(X1)\{ε} for an A-production X1..Xk; if X1 is nullable, also
//!   FIRST(X2)\{ε}, and so on, adding ε itself if every Xi is nullable (including the
//!   empty production `A -> ε`).
//! * FOLLOW(start) always contains `$`.
//! * For a production `A -> αBβ`, FOLLOW(B) gains FIRST(β)\{ε}, and all of FOLLOW(A)
//!   when β is nullable (including when β is empty).

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::{Grammar, Symbol, END_OF_INPUT, EPSILON};

pub(crate) type SymbolSets = HashMap<Rc<str>, HashSet<Rc<str>>>;

fn is_nullable(set: &HashSet<Rc<str>>) -> bool {
    set.iter().any(|s| &**s == EPSILON)
}

/// FIRST(X1 X2 ... Xn) for an arbitrary symbol sequence, given each individual
/// symbol's FIRST set; used both to finish FIRST(A) for a production and, in
/// [crate::lr::items], to compute FIRST(βa) for LR(1) lookaheads.
pub(crate) fn first_of_sequence(first: &SymbolSets, seq: &[Symbol]) -> HashSet<Rc<str>> {
    let mut result = HashSet::new();
    let mut nullable_so_far = true;

    for sym in seq {
        if !nullable_so_far {
            break;
        }
        let name: Rc<str> = Rc::from(sym.name());
        let sym_first = first.get(&name).cloned().unwrap_or_default();
        result.extend(sym_first.iter().filter(|s| &***s != EPSILON).cloned());
        if !is_nullable(&sym_first) {
            nullable_so_far = false;
        }
    }

    if nullable_so_far {
        result.insert(Rc::from(EPSILON));
    }
    result
}

pub(crate) fn first_sets(grammar: &Grammar) -> SymbolSets {
    let mut first: SymbolSets = HashMap::new();
    for t in &grammar.terminals {
        if &**t != EPSILON {
            first.entry(t.clone()).or_default().insert(t.clone());
        }
    }
    for nt in &grammar.non_terminals {
        first.entry(nt.clone()).or_default();
    }

    let mut changed = true;
    while changed {
        changed = false;
        for p in &grammar.productions {
            if p.is_epsilon() {
                if first.get_mut(&p.lhs).unwrap().insert(Rc::from(EPSILON)) {
                    changed = true;
                }
                continue;
            }

            let mut additions: Vec<Rc<str>> = Vec::new();
            let mut lhs_nullable = true;
            for sym in &p.rhs {
                let name: Rc<str> = Rc::from(sym.name());
                let sym_first = first.get(&name).cloned().unwrap_or_default();
                additions.extend(sym_first.iter().filter(|s| &***s != EPSILON).cloned());
                if !is_nullable(&sym_first) {
                    lhs_nullable = false;
                    break;
                }
            }

            let entry = first.get_mut(&p.lhs).unwrap();
            for item in additions {
                if entry.insert(item) {
                    changed = true;
                }
            }
            if lhs_nullable && entry.insert(Rc::from(EPSILON)) {
                changed = true;
            }
        }
    }

    first
}

pub(crate) fn follow_sets(grammar: &Grammar, first: &SymbolSets) -> SymbolSets {
    let mut follow: SymbolSets = grammar.non_terminals.iter().map(|nt| (nt.clone(), HashSet::new())).collect();
    follow.get_mut(&grammar.start).unwrap().insert(Rc::from(END_OF_INPUT));

    let mut changed = true;
    while changed {
        changed = false;
        for p in &grammar.productions {
            if p.is_epsilon() {
                continue;
            }
            for (i, sym) in p.rhs.iter().enumerate() {
                let Symbol::NonTerminal(b) = sym else { continue };
                let beta = &p.rhs[i + 1..];
                let beta_first = first_of_sequence(first, beta);
                let beta_nullable = is_nullable(&beta_first);

                let entry = follow.get_mut(b).unwrap();
                for t in beta_first.iter().filter(|s| &***s != EPSILON) {
                    if entry.insert(t.clone()) {
                        changed = true;
                    }
                }

                if beta_nullable {
                    let lhs_follow: Vec<Rc<str>> = follow.get(&p.lhs).unwrap().iter().cloned().collect();
                    let entry = follow.get_mut(b).unwrap();
                    for t in lhs_follow {
                        if entry.insert(t) {
                            changed = true;
                        }
                    }
                }
            }
        }
    }

    follow
}
