//! In-memory triple store
//!
//! Three [`NodeToTriplesMap`] indices (by subject, predicate and object)
//! hold every triple. A lookup goes through the index of the first concrete
//! pattern position in the order subject, object, predicate, then filters.

pub mod index;

pub use index::NodeToTriplesMap;

use crate::node::Node;
use crate::triple::{Field, Triple};
use rustc_hash::FxBuildHasher;
use std::fmt;
use std::hash::BuildHasher;

/// Owned snapshot of triples produced by a lookup
#[derive(Debug, Clone, Default)]
pub struct TripleIterator {
    triples: std::vec::IntoIter<Triple>,
}

impl TripleIterator {
    pub(crate) fn new(triples: Vec<Triple>) -> Self {
        Self {
            triples: triples.into_iter(),
        }
    }

    /// Concatenate two snapshots
    pub(crate) fn chain(self, other: TripleIterator) -> Self {
        let mut triples: Vec<Triple> = self.triples.collect();
        triples.extend(other.triples);
        Self::new(triples)
    }
}

impl Iterator for TripleIterator {
    type Item = Triple;

    fn next(&mut self) -> Option<Self::Item> {
        self.triples.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.triples.size_hint()
    }
}

impl ExactSizeIterator for TripleIterator {}

/// Triple store with subject, predicate and object indices
#[derive(Clone)]
pub struct TripleStore<S = FxBuildHasher> {
    subjects: NodeToTriplesMap<S>,
    predicates: NodeToTriplesMap<S>,
    objects: NodeToTriplesMap<S>,
}

impl TripleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_hasher()
    }
}

impl Default for TripleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BuildHasher + Default> TripleStore<S> {
    /// Create an empty store whose indices use the hasher `S`
    pub fn with_hasher() -> Self {
        Self {
            subjects: NodeToTriplesMap::new(Field::Subject),
            predicates: NodeToTriplesMap::new(Field::Predicate),
            objects: NodeToTriplesMap::new(Field::Object),
        }
    }

    /// Add a triple; true iff it was not already present
    pub fn add(&mut self, triple: Triple) -> bool {
        if !self.subjects.add(triple.clone()) {
            return false;
        }
        self.predicates.add(triple.clone());
        self.objects.add(triple);
        true
    }

    /// Delete a triple; true iff it was present
    pub fn delete(&mut self, triple: &Triple) -> bool {
        if !self.subjects.remove(triple) {
            return false;
        }
        self.predicates.remove(triple);
        self.objects.remove(triple);
        true
    }

    /// Exact membership for concrete triples, matching for patterns and
    /// for literal positions
    pub fn contains(&self, pattern: &Triple) -> bool {
        if pattern.is_concrete() {
            if self.subjects.contains(pattern) {
                return true;
            }
            if !pattern.object().is_literal() && !pattern.subject().is_literal() {
                return false;
            }
        }
        self.index_for(pattern).contains_match(pattern)
    }

    /// Snapshot of the triples matching `pattern`
    pub fn find(&self, pattern: &Triple) -> TripleIterator {
        self.index_for(pattern).iterate(pattern)
    }

    /// Cursor over the matches of `pattern` that can delete what it yields
    pub fn find_mut(&mut self, pattern: &Triple) -> StoreCursor<'_, S> {
        let pending = self.find(pattern);
        StoreCursor {
            store: self,
            pending,
            current: None,
        }
    }

    fn index_for(&self, pattern: &Triple) -> &NodeToTriplesMap<S> {
        if pattern.subject().is_concrete() {
            &self.subjects
        } else if pattern.object().is_concrete() {
            &self.objects
        } else if pattern.predicate().is_concrete() {
            &self.predicates
        } else {
            &self.subjects
        }
    }

    /// Number of distinct triples
    pub fn size(&self) -> usize {
        self.subjects.size()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Distinct subjects
    pub fn list_subjects(&self) -> Vec<Node> {
        self.subjects.domain().cloned().collect()
    }

    /// Distinct predicates
    pub fn list_predicates(&self) -> Vec<Node> {
        self.predicates.domain().cloned().collect()
    }

    /// Distinct objects
    pub fn list_objects(&self) -> Vec<Node> {
        self.objects.domain().cloned().collect()
    }

    /// Remove every triple
    pub fn clear(&mut self) {
        self.subjects.clear();
        self.predicates.clear();
        self.objects.clear();
    }
}

impl<S> fmt::Debug for TripleStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TripleStore")
            .field("subjects", &self.subjects)
            .field("predicates", &self.predicates)
            .field("objects", &self.objects)
            .finish()
    }
}

/// Cursor over a store lookup supporting removal of the current triple
pub struct StoreCursor<'a, S = FxBuildHasher> {
    store: &'a mut TripleStore<S>,
    pending: TripleIterator,
    current: Option<Triple>,
}

impl<S: BuildHasher + Default> StoreCursor<'_, S> {
    /// Advance to the next match
    pub fn next_triple(&mut self) -> Option<&Triple> {
        self.current = self.pending.next();
        self.current.as_ref()
    }

    /// Delete the triple last yielded; false if there is none or it is
    /// already gone
    pub fn remove(&mut self) -> bool {
        match self.current.take() {
            Some(triple) => self.store.delete(&triple),
            None => false,
        }
    }
}
