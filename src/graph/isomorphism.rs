//! Graph equality up to blank node relabelling
//!
//! Ground triples (no blank nodes) must coincide exactly. Blank nodes are
//! then grouped by a signature of the triples they occur in, and a
//! backtracking search looks for a bijection between same-signature blank
//! nodes that maps every blank triple of one graph onto the other. The
//! search is exponential in the worst case but the signatures prune most
//! candidates in practice.

use crate::node::Node;
use crate::triple::Triple;
use rustc_hash::{FxHashMap, FxHashSet};

/// Whether two triple collections are isomorphic
pub fn is_isomorphic(left: &[Triple], right: &[Triple]) -> bool {
    let left: FxHashSet<&Triple> = left.iter().collect();
    let right: FxHashSet<&Triple> = right.iter().collect();
    if left.len() != right.len() {
        return false;
    }

    let (left_ground, left_blank) = partition(&left);
    let (right_ground, right_blank) = partition(&right);
    if left_ground != right_ground || left_blank.len() != right_blank.len() {
        return false;
    }
    if left_blank.is_empty() {
        return true;
    }

    let left_sigs = signatures(&left_blank);
    let right_sigs = signatures(&right_blank);
    if left_sigs.len() != right_sigs.len() || histogram(&left_sigs) != histogram(&right_sigs) {
        return false;
    }

    let mut by_signature: FxHashMap<&Signature, Vec<&Node>> = FxHashMap::default();
    for (&node, sig) in &right_sigs {
        by_signature.entry(sig).or_default().push(node);
    }

    // most constrained blank nodes first
    let mut order: Vec<&Node> = left_sigs.keys().copied().collect();
    order.sort_by_key(|node| {
        let sig = &left_sigs[node];
        (by_signature.get(sig).map_or(0, Vec::len), sig.clone())
    });

    let mut triples_of: FxHashMap<&Node, Vec<&Triple>> = FxHashMap::default();
    for &triple in &left_blank {
        for node in blanks_in(triple) {
            triples_of.entry(node).or_default().push(triple);
        }
    }

    let mut search = Search {
        order,
        left_sigs: &left_sigs,
        candidates: &by_signature,
        triples_of: &triples_of,
        right: &right_blank,
        mapping: FxHashMap::default(),
        used: FxHashSet::default(),
    };
    search.extend(0)
}

type Signature = Vec<String>;

fn partition<'a>(triples: &FxHashSet<&'a Triple>) -> (FxHashSet<&'a Triple>, FxHashSet<&'a Triple>) {
    triples.iter().copied().partition(|t| blanks_in(t).next().is_none())
}

fn blanks_in(triple: &Triple) -> impl Iterator<Item = &Node> {
    [triple.subject(), triple.predicate(), triple.object()]
        .into_iter()
        .filter(|n| n.is_blank())
}

/// Per blank node: the sorted renderings of its triples with itself shown
/// as `@` and other blank nodes as `_`
fn signatures<'a>(blank_triples: &FxHashSet<&'a Triple>) -> FxHashMap<&'a Node, Signature> {
    let mut sigs: FxHashMap<&'a Node, Signature> = FxHashMap::default();
    for &triple in blank_triples {
        let mut seen: Vec<&Node> = Vec::with_capacity(3);
        for node in blanks_in(triple) {
            if seen.contains(&node) {
                continue;
            }
            seen.push(node);
            let render = |n: &Node| -> String {
                if n == node {
                    "@".to_string()
                } else if n.is_blank() {
                    "_".to_string()
                } else {
                    n.to_string()
                }
            };
            let entry = format!(
                "{} {} {}",
                render(triple.subject()),
                render(triple.predicate()),
                render(triple.object())
            );
            sigs.entry(node).or_default().push(entry);
        }
    }
    for sig in sigs.values_mut() {
        sig.sort();
    }
    sigs
}

fn histogram<'a>(sigs: &'a FxHashMap<&Node, Signature>) -> FxHashMap<&'a Signature, usize> {
    let mut counts: FxHashMap<&Signature, usize> = FxHashMap::default();
    for sig in sigs.values() {
        *counts.entry(sig).or_insert(0) += 1;
    }
    counts
}

struct Search<'a> {
    order: Vec<&'a Node>,
    left_sigs: &'a FxHashMap<&'a Node, Signature>,
    candidates: &'a FxHashMap<&'a Signature, Vec<&'a Node>>,
    triples_of: &'a FxHashMap<&'a Node, Vec<&'a Triple>>,
    right: &'a FxHashSet<&'a Triple>,
    mapping: FxHashMap<&'a Node, &'a Node>,
    used: FxHashSet<&'a Node>,
}

impl<'a> Search<'a> {
    fn extend(&mut self, depth: usize) -> bool {
        let Some(&node) = self.order.get(depth) else {
            return true;
        };
        let (left_sigs, all) = (self.left_sigs, self.candidates);
        let Some(candidates) = all.get(&left_sigs[node]) else {
            return false;
        };
        for &candidate in candidates {
            if self.used.contains(candidate) {
                continue;
            }
            self.mapping.insert(node, candidate);
            self.used.insert(candidate);
            if self.consistent(node) && self.extend(depth + 1) {
                return true;
            }
            self.mapping.remove(node);
            self.used.remove(candidate);
        }
        false
    }

    /// Every triple of `node` whose blank nodes are all mapped lands in the
    /// other graph
    fn consistent(&self, node: &Node) -> bool {
        let Some(triples) = self.triples_of.get(node) else {
            return true;
        };
        triples.iter().all(|triple| match self.translate(triple) {
            Some(mapped) => self.right.contains(&mapped),
            None => true,
        })
    }

    fn translate(&self, triple: &Triple) -> Option<Triple> {
        let map = |n: &Node| -> Option<Node> {
            if n.is_blank() {
                self.mapping.get(n).map(|m| (*m).clone())
            } else {
                Some(n.clone())
            }
        };
        Some(Triple::new(
            map(triple.subject())?,
            map(triple.predicate())?,
            map(triple.object())?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::triples;

    fn iso(a: &str, b: &str) -> bool {
        is_isomorphic(&triples(a).unwrap(), &triples(b).unwrap())
    }

    #[test]
    fn test_ground_graphs() {
        assert!(iso("a B c", "a B c"));
        assert!(!iso("a B c", "x B y"));
        assert!(!iso("a B c", "a B c; d E f"));
        assert!(iso("", ""));
    }

    #[test]
    fn test_blank_relabelling() {
        assert!(iso("_a B _c", "_x B _y"));
        assert!(!iso("_a B _a", "_x B _y"));
        assert!(iso("_a B _a", "_z B _z"));
        assert!(iso("_a P b; _a Q c", "_k P b; _k Q c"));
        assert!(!iso("_a P b; _a Q c", "_k P b; _m Q c"));
    }

    #[test]
    fn test_symmetric_cycles() {
        // two 3-cycles vs one 6-cycle: equal signatures, no bijection
        let two_triangles = "_a P _b; _b P _c; _c P _a; _d P _e; _e P _f; _f P _d";
        let hexagon = "_1 P _2; _2 P _3; _3 P _4; _4 P _5; _5 P _6; _6 P _1";
        assert!(!iso(two_triangles, hexagon));
        assert!(iso(two_triangles, "_x P _y; _y P _z; _z P _x; _u P _v; _v P _w; _w P _u"));
    }

    #[test]
    fn test_duplicates_ignored() {
        let mut left = triples("_a B c").unwrap();
        left.extend(triples("_a B c").unwrap());
        assert!(is_isomorphic(&left, &triples("_b B c").unwrap()));
    }
}
