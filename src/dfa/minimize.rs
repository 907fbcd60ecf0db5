//! DFA minimization (C6) by the table-filling (Moore) algorithm: mark pairs of
//! states distinguishable by final-ness first, then propagate distinguishability
//! through transitions to a fixed point, and finally merge every un-marked pair into
//! one state via union-find over the "not distinguishable" relation.

use std::collections::{BTreeSet, HashMap};

use super::{Dfa, DfaState};

pub(crate) fn minimize(dfa: &Dfa, sigma: &BTreeSet<char>) -> Dfa {
    let n = dfa.states.len();
    let mut distinguishable = vec![vec![false; n]; n];

    for i in 0..n {
        for j in (i + 1)..n {
            if accept_kind_differs(&dfa.states[i], &dfa.states[j]) {
                distinguishable[i][j] = true;
                distinguishable[j][i] = true;
            }
        }
    }

    let mut changed = true;
    while changed {
        changed = false;
        for i in 0..n {
            for j in (i + 1)..n {
                if distinguishable[i][j] {
                    continue;
                }
                if sigma
                    .iter()
                    .any(|&c| transitions_diverge(&distinguishable, &dfa.states[i], &dfa.states[j], c))
                {
                    distinguishable[i][j] = true;
                    distinguishable[j][i] = true;
                    changed = true;
                }
            }
        }
    }

    let class_of = merge_classes(n, &distinguishable);
    rebuild(dfa, &class_of)
}

fn accept_kind_differs(a: &DfaState, b: &DfaState) -> bool {
    match (&a.accept, &b.accept) {
        (Some(x), Some(y)) => x.kind != y.kind,
        (None, None) => false,
        _ => true,
    }
}

fn transitions_diverge(distinguishable: &[Vec<bool>], a: &DfaState, b: &DfaState, c: char) -> bool {
    match (a.transitions.get(&c), b.transitions.get(&c)) {
        (Some(&ta), Some(&tb)) => ta != tb && distinguishable[ta.min(tb)][ta.max(tb)],
        (None, None) => false,
        _ => true,
    }
}

/// Collapses the "not distinguishable" relation (reflexive, symmetric and — since it
/// was derived by a fixed point over pairwise marks — transitive) into equivalence
/// class ids via union-find.
fn merge_classes(n: usize, distinguishable: &[Vec<bool>]) -> Vec<usize> {
    let mut parent: Vec<usize> = (0..n).collect();

    fn find(parent: &mut [usize], x: usize) -> usize {
        if parent[x] != x {
            parent[x] = find(parent, parent[x]);
        }
        parent[x]
    }

    for i in 0..n {
        for j in (i + 1)..n {
            if !distinguishable[i][j] {
                let ri = find(&mut parent, i);
                let rj = find(&mut parent, j);
                if ri != rj {
                    parent[ri.max(rj)] = ri.min(rj);
                }
            }
        }
    }

    let mut class_ids: HashMap<usize, usize> = HashMap::new();
    let mut class_of = vec![0usize; n];
    for i in 0..n {
        let root = find(&mut parent, i);
        let next_id = class_ids.len();
        let id = *class_ids.entry(root).or_insert(next_id);
        class_of[i] = id;
    }
    class_of
}

fn rebuild(dfa: &Dfa, class_of: &[usize]) -> Dfa {
    let num_classes = class_of.iter().copied().max().map_or(0, |m| m + 1);
    let mut states = vec![DfaState::default(); num_classes];

    for (i, old) in dfa.states.iter().enumerate() {
        let cid = class_of[i];
        if let Some(acc) = &old.accept {
            let replace = match &states[cid].accept {
                None => true,
                Some(existing) => acc.priority < existing.priority,
            };
            if replace {
                states[cid].accept = Some(acc.clone());
            }
        }
        for (&c, &target) in &old.transitions {
            states[cid].transitions.insert(c, class_of[target]);
        }
    }

    Dfa {
        states,
        start: class_of[dfa.start],
    }
}
