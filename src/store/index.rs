//! Node-to-triples index
//!
//! Files every triple under the indexing value of one field, then under the
//! indexing value of the next field (S→P, P→O, O→S). Leaves are sets of
//! triples. Empty leaves and buckets are dropped as soon as they empty out,
//! so `domain()` and `size()` never see stale entries.
//!
//! Keys are compared with `Eq`; the hasher only picks the slot. The map is
//! generic over its `BuildHasher` so tests can force every key into the
//! same slot.

use super::TripleIterator;
use crate::node::Node;
use crate::triple::{Field, Triple};
use rustc_hash::FxBuildHasher;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::BuildHasher;

/// Triples sharing the indexing value of the indexed field
#[derive(Clone)]
struct Bucket<S> {
    /// Exact field values filed under this key, with their triple counts
    nodes: HashMap<Node, usize, S>,
    /// Secondary level keyed by the next field's indexing value
    pairs: HashMap<Node, HashSet<Triple, S>, S>,
}

impl<S: BuildHasher + Default> Bucket<S> {
    fn new() -> Self {
        Self {
            nodes: HashMap::default(),
            pairs: HashMap::default(),
        }
    }

    fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Index of triples by one field
#[derive(Clone)]
pub struct NodeToTriplesMap<S = FxBuildHasher> {
    field: Field,
    map: HashMap<Node, Bucket<S>, S>,
    size: usize,
}

impl<S: BuildHasher + Default> NodeToTriplesMap<S> {
    /// Create an empty index on `field`
    pub fn new(field: Field) -> Self {
        Self {
            field,
            map: HashMap::default(),
            size: 0,
        }
    }

    /// The indexed field
    pub fn field(&self) -> Field {
        self.field
    }

    /// Insert `triple`; true iff it was not already present
    pub fn add(&mut self, triple: Triple) -> bool {
        let key = self.field.get(&triple).indexing_value().into_owned();
        let secondary = self.field.next().get(&triple).indexing_value().into_owned();
        let node = self.field.get(&triple).clone();

        let bucket = self.map.entry(key).or_insert_with(Bucket::new);
        if !bucket.pairs.entry(secondary).or_default().insert(triple) {
            return false;
        }
        *bucket.nodes.entry(node).or_insert(0) += 1;
        self.size += 1;
        true
    }

    /// Remove `triple`; true iff it was present
    pub fn remove(&mut self, triple: &Triple) -> bool {
        let node = self.field.get(triple);
        let key = node.indexing_value();
        let secondary = self.field.next().get(triple).indexing_value();

        let Some(bucket) = self.map.get_mut(key.as_ref()) else {
            return false;
        };
        let Some(leaf) = bucket.pairs.get_mut(secondary.as_ref()) else {
            return false;
        };
        if !leaf.remove(triple) {
            return false;
        }
        if leaf.is_empty() {
            bucket.pairs.remove(secondary.as_ref());
        }
        if let Some(count) = bucket.nodes.get_mut(node) {
            *count -= 1;
            if *count == 0 {
                bucket.nodes.remove(node);
            }
        }
        if bucket.is_empty() {
            self.map.remove(key.as_ref());
        }
        self.size -= 1;
        true
    }

    /// Whether exactly `triple` is present
    pub fn contains(&self, triple: &Triple) -> bool {
        let key = self.field.get(triple).indexing_value();
        let secondary = self.field.next().get(triple).indexing_value();
        self.map
            .get(key.as_ref())
            .and_then(|bucket| bucket.pairs.get(secondary.as_ref()))
            .is_some_and(|leaf| leaf.contains(triple))
    }

    /// Whether any triple matches `pattern`
    pub fn contains_match(&self, pattern: &Triple) -> bool {
        self.matching(pattern).next().is_some()
    }

    /// Distinct nodes occupying the indexed field
    pub fn domain(&self) -> impl Iterator<Item = &Node> + '_ {
        self.map.values().flat_map(|bucket| bucket.nodes.keys())
    }

    /// Snapshot of every triple
    pub fn iterate_all(&self) -> TripleIterator {
        TripleIterator::new(
            self.map
                .values()
                .flat_map(|bucket| bucket.pairs.values().flatten())
                .cloned()
                .collect(),
        )
    }

    /// Snapshot of the triples matching `pattern`
    pub fn iterate(&self, pattern: &Triple) -> TripleIterator {
        TripleIterator::new(self.matching(pattern).cloned().collect())
    }

    /// Matches without copying. A concrete indexed field narrows the search
    /// to one bucket, a concrete next field to one leaf of that bucket.
    fn matching<'a>(&'a self, pattern: &'a Triple) -> Box<dyn Iterator<Item = &'a Triple> + 'a> {
        let indexed = self.field.get(pattern);
        if indexed.is_fluid() {
            return Box::new(
                self.map
                    .values()
                    .flat_map(|bucket| bucket.pairs.values().flatten())
                    .filter(move |t| pattern.matches(t)),
            );
        }
        let Some(bucket) = self.map.get(indexed.indexing_value().as_ref()) else {
            return Box::new(std::iter::empty());
        };
        let secondary = self.field.next().get(pattern);
        if secondary.is_fluid() {
            Box::new(
                bucket
                    .pairs
                    .values()
                    .flatten()
                    .filter(move |t| pattern.matches(t)),
            )
        } else {
            Box::new(
                bucket
                    .pairs
                    .get(secondary.indexing_value().as_ref())
                    .into_iter()
                    .flatten()
                    .filter(move |t| pattern.matches(t)),
            )
        }
    }

    /// Number of triples
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Remove every triple
    pub fn clear(&mut self) {
        self.map.clear();
        self.size = 0;
    }
}

impl<S> fmt::Debug for NodeToTriplesMap<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeToTriplesMap")
            .field("field", &self.field)
            .field("keys", &self.map.len())
            .field("size", &self.size)
            .finish()
    }
}
