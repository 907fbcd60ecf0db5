use std::collections::HashSet;
use std::hash::Hash;

/// Turns a [HashSet] (which isn't hashable and whose iteration order isn't stable) into a
/// sorted `Vec`, suitable for use as a canonical key when a set itself needs to be looked up
/// in a map (DFA states keyed by origin set, LR states keyed by item set).
pub(crate) fn canonical_sorted<T: Ord + Clone + Hash>(set: &HashSet<T>) -> Vec<T> {
    let mut vec = set.iter().cloned().collect::<Vec<_>>();
    vec.sort();
    vec
}
