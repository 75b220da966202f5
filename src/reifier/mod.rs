//! Reifier
//!
//! Gives triples node identity. A tag node reifies a triple once the four
//! quadlets `tag rdf:type rdf:Statement`, `tag rdf:subject S`,
//! `tag rdf:predicate P` and `tag rdf:object O` are all known and agree.
//!
//! Each tag is in one of three states:
//! - unbound: nothing recorded
//! - partial: some quadlet values recorded ([`Fragments`]); a slot may hold
//!   several values when the tag was over-specified
//! - reified: exactly one triple
//!
//! Quadlets reach the reifier either through [`Reifier::reify_as`] or,
//! when the style intercepts, through [`Reifier::handled_add`] on the graph's
//! add path. Whether the recorded quadlets are visible to ordinary finds is
//! decided by the style's `conceals` flag.

pub mod fragments;
pub mod style;

pub use fragments::{Fragments, Slot};
pub use style::ReificationStyle;

use crate::graph::GraphView;
use crate::node::Node;
use crate::store::TripleIterator;
use crate::triple::Triple;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, trace};

/// Reifier errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReifierError {
    /// The tag already reifies a different triple
    #[error("{0} already reifies a different triple")]
    AlreadyReified(Node),

    /// The tag has quadlet fragments that disagree with the triple
    #[error("{0} has quadlets inconsistent with the triple")]
    CannotReify(Node),
}

pub type ReifierResult<T> = Result<T, ReifierError>;

/// Tag → triple associations plus partial quadlet state
#[derive(Debug, Clone, Default)]
pub struct Reifier {
    style: ReificationStyle,
    triples: FxHashMap<Node, Triple>,
    tags: FxHashMap<Triple, Vec<Node>>,
    fragments: FxHashMap<Node, Fragments>,
}

impl Reifier {
    /// Create an empty reifier
    pub fn new(style: ReificationStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn style(&self) -> ReificationStyle {
        self.style
    }

    /// Take `triple` if it is a quadlet and the style intercepts. A taken
    /// triple must not also go to the store.
    pub fn handled_add(&mut self, triple: &Triple) -> bool {
        if !self.style.intercepts() {
            return false;
        }
        let Some(slot) = Slot::of(triple) else {
            return false;
        };
        trace!("reifier took {}", triple);
        self.add_fragment(triple.subject(), slot, triple.object().clone());
        true
    }

    /// Counterpart of [`Reifier::handled_add`] for deletion
    pub fn handled_remove(&mut self, triple: &Triple) -> bool {
        if !self.style.intercepts() {
            return false;
        }
        let Some(slot) = Slot::of(triple) else {
            return false;
        };
        trace!("reifier dropped {}", triple);
        self.remove_fragment(triple.subject(), slot, triple.object());
        true
    }

    fn add_fragment(&mut self, tag: &Node, slot: Slot, value: Node) {
        if let Some(existing) = self.triples.get(tag) {
            if slot.component(existing) == value {
                return;
            }
            let existing = existing.clone();
            debug!("{} over-specified; no longer reifies {}", tag, existing);
            self.unbind(tag, &existing);
            let mut fragments = Fragments::exploded(&existing);
            fragments.insert(slot, value);
            self.fragments.insert(tag.clone(), fragments);
            return;
        }

        let fragments = self.fragments.entry(tag.clone()).or_default();
        fragments.insert(slot, value);
        if let Some(triple) = fragments.complete() {
            self.fragments.remove(tag);
            self.bind(tag.clone(), triple);
        }
    }

    fn remove_fragment(&mut self, tag: &Node, slot: Slot, value: &Node) -> bool {
        if let Some(existing) = self.triples.get(tag) {
            if &slot.component(existing) != value {
                return false;
            }
            let existing = existing.clone();
            self.unbind(tag, &existing);
            let mut fragments = Fragments::exploded(&existing);
            fragments.remove(slot, value);
            self.fragments.insert(tag.clone(), fragments);
            return true;
        }

        let Some(fragments) = self.fragments.get_mut(tag) else {
            return false;
        };
        let removed = fragments.remove(slot, value);
        let complete = fragments.complete();
        if fragments.is_empty() {
            self.fragments.remove(tag);
        } else if let Some(triple) = complete {
            self.fragments.remove(tag);
            self.bind(tag.clone(), triple);
        }
        removed
    }

    fn bind(&mut self, tag: Node, triple: Triple) {
        self.tags.entry(triple.clone()).or_default().push(tag.clone());
        self.triples.insert(tag, triple);
    }

    fn unbind(&mut self, tag: &Node, triple: &Triple) {
        self.triples.remove(tag);
        if let Some(tags) = self.tags.get_mut(triple) {
            tags.retain(|t| t != tag);
            if tags.is_empty() {
                self.tags.remove(triple);
            }
        }
    }

    /// Make `tag` reify `triple`. Repeating an existing reification is a
    /// no-op. On error nothing changes.
    pub fn reify_as(&mut self, tag: Node, triple: Triple) -> ReifierResult<Node> {
        if let Some(existing) = self.triples.get(&tag) {
            if existing == &triple {
                return Ok(tag);
            }
            return Err(ReifierError::AlreadyReified(tag));
        }
        if let Some(fragments) = self.fragments.get(&tag) {
            if fragments.conflicts_with(&triple) {
                return Err(ReifierError::CannotReify(tag));
            }
            self.fragments.remove(&tag);
        }
        debug!("{} reifies {}", tag, triple);
        self.bind(tag.clone(), triple);
        Ok(tag)
    }

    /// The triple `tag` reifies
    pub fn get_triple(&self, tag: &Node) -> Option<&Triple> {
        self.triples.get(tag)
    }

    /// Whether `tag` reifies some triple
    pub fn has_tag(&self, tag: &Node) -> bool {
        self.triples.contains_key(tag)
    }

    /// Whether some tag reifies `triple`
    pub fn has_triple(&self, triple: &Triple) -> bool {
        self.tags.contains_key(triple)
    }

    /// Every tag that reifies a triple
    pub fn all_nodes(&self) -> Vec<Node> {
        self.triples.keys().cloned().collect()
    }

    /// Every tag that reifies `triple`
    pub fn all_nodes_for(&self, triple: &Triple) -> Vec<Node> {
        self.tags.get(triple).cloned().unwrap_or_default()
    }

    /// Undo `tag`'s reification of `triple`; false if it did not hold
    pub fn remove(&mut self, tag: &Node, triple: &Triple) -> bool {
        if self.triples.get(tag) != Some(triple) {
            return false;
        }
        self.unbind(tag, triple);
        true
    }

    /// Forget everything recorded for `tag`, returning the triple it reified
    pub fn remove_tag(&mut self, tag: &Node) -> Option<Triple> {
        self.fragments.remove(tag);
        let triple = self.triples.get(tag).cloned()?;
        self.unbind(tag, &triple);
        Some(triple)
    }

    /// Undo every reification of `triple`, returning how many there were
    pub fn remove_triple(&mut self, triple: &Triple) -> usize {
        let tags = self.tags.remove(triple).unwrap_or_default();
        for tag in &tags {
            self.triples.remove(tag);
        }
        tags.len()
    }

    /// Number of quadlets visible through ordinary finds
    pub fn size(&self) -> usize {
        if self.style.conceals() {
            0
        } else {
            self.quadlet_count()
        }
    }

    /// Number of quadlets implied by the reifier's state
    pub fn quadlet_count(&self) -> usize {
        4 * self.triples.len() + self.fragments.values().map(Fragments::len).sum::<usize>()
    }

    /// Whether the reifier records nothing
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty() && self.fragments.is_empty()
    }

    /// Quadlets for `tag`, full reification first
    fn quadlets_for(&self, tag: &Node) -> Vec<Triple> {
        let mut quadlets = self
            .triples
            .get(tag)
            .map(|triple| fragments::quadlets_of(tag, triple))
            .unwrap_or_default();
        if let Some(fragments) = self.fragments.get(tag) {
            quadlets.extend(fragments.quadlets(tag));
        }
        quadlets
    }

    /// Every quadlet matching `pattern`, regardless of style
    pub fn find_all(&self, pattern: &Triple) -> TripleIterator {
        let candidates: Vec<Triple> = if pattern.subject().is_concrete() {
            self.quadlets_for(pattern.subject())
        } else {
            self.triples
                .iter()
                .flat_map(|(tag, triple)| fragments::quadlets_of(tag, triple))
                .chain(
                    self.fragments
                        .iter()
                        .flat_map(|(tag, fragments)| fragments.quadlets(tag)),
                )
                .collect()
        };
        TripleIterator::new(candidates.into_iter().filter(|t| pattern.matches(t)).collect())
    }

    /// Quadlets matching `pattern` that ordinary finds should see
    pub fn find_exposed(&self, pattern: &Triple) -> TripleIterator {
        self.find_either(pattern, false)
    }

    /// Quadlets matching `pattern` that are hidden (`show_hidden`) or
    /// exposed (`!show_hidden`) under this style
    pub fn find_either(&self, pattern: &Triple, show_hidden: bool) -> TripleIterator {
        if show_hidden == self.style.conceals() {
            self.find_all(pattern)
        } else {
            TripleIterator::default()
        }
    }

    /// Read-only view of the quadlets this style hides
    pub fn hidden_triples(&self) -> ReifiedView<'_> {
        ReifiedView {
            reifier: self,
            hidden_only: true,
        }
    }

    /// Read-only view of every quadlet
    pub fn reification_triples(&self) -> ReifiedView<'_> {
        ReifiedView {
            reifier: self,
            hidden_only: false,
        }
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.triples.clear();
        self.tags.clear();
        self.fragments.clear();
    }
}

/// Quadlets of a reifier presented as a graph
#[derive(Debug, Clone, Copy)]
pub struct ReifiedView<'a> {
    reifier: &'a Reifier,
    hidden_only: bool,
}

impl GraphView for ReifiedView<'_> {
    fn find(&self, pattern: &Triple) -> TripleIterator {
        if self.hidden_only {
            self.reifier.find_either(pattern, true)
        } else {
            self.reifier.find_all(pattern)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::{node, triple, triples};

    fn reifier(style: ReificationStyle, spec: &str) -> Reifier {
        let mut reifier = Reifier::new(style);
        for t in triples(spec).unwrap() {
            assert!(reifier.handled_add(&t));
        }
        reifier
    }

    const QUADLETS: &str = "x rdf:type rdf:Statement; x rdf:subject S; x rdf:predicate P; x rdf:object O";

    #[test]
    fn test_minimal_does_not_intercept() {
        let mut reifier = Reifier::new(ReificationStyle::Minimal);
        assert!(!reifier.handled_add(&triple("x rdf:subject S").unwrap()));
        assert!(!reifier.handled_remove(&triple("x rdf:subject S").unwrap()));
        assert!(reifier.is_empty());
    }

    #[test]
    fn test_non_quadlets_pass_through() {
        let mut reifier = Reifier::new(ReificationStyle::Standard);
        assert!(!reifier.handled_add(&triple("x rdf:type T").unwrap()));
        assert!(!reifier.handled_add(&triple("S S rdf:subject").unwrap()));
        assert!(!reifier.handled_add(&triple("a P b").unwrap()));
    }

    #[test]
    fn test_quadlets_complete_reification() {
        let reifier = reifier(ReificationStyle::Standard, QUADLETS);
        let x = node("x").unwrap();
        assert_eq!(reifier.get_triple(&x), Some(&triple("S P O").unwrap()));
        assert!(reifier.has_tag(&x));
        assert!(reifier.has_triple(&triple("S P O").unwrap()));
        assert_eq!(reifier.all_nodes(), vec![x]);
        assert_eq!(reifier.size(), 4);
    }

    #[test]
    fn test_partial_state() {
        let reifier = reifier(ReificationStyle::Standard, "x rdf:subject S; x rdf:object O");
        assert_eq!(reifier.get_triple(&node("x").unwrap()), None);
        assert_eq!(reifier.size(), 2);
        assert_eq!(reifier.find_all(&triple("x ?? ??").unwrap()).count(), 2);
    }

    #[test]
    fn test_over_specification_suppresses() {
        let mut reifier = reifier(ReificationStyle::Standard, QUADLETS);
        reifier.handled_add(&triple("x rdf:subject BOOM").unwrap());
        let x = node("x").unwrap();
        assert_eq!(reifier.get_triple(&x), None);
        assert!(!reifier.has_triple(&triple("S P O").unwrap()));
        assert_eq!(reifier.size(), 5);

        reifier.handled_remove(&triple("x rdf:subject BOOM").unwrap());
        assert_eq!(reifier.get_triple(&x), Some(&triple("S P O").unwrap()));
    }

    #[test]
    fn test_consistent_quadlet_is_no_op() {
        let mut reifier = reifier(ReificationStyle::Standard, QUADLETS);
        reifier.handled_add(&triple("x rdf:subject S").unwrap());
        assert_eq!(reifier.size(), 4);
        assert!(reifier.has_tag(&node("x").unwrap()));
    }

    #[test]
    fn test_removing_quadlet_explodes() {
        let mut reifier = reifier(ReificationStyle::Standard, QUADLETS);
        assert!(reifier.handled_remove(&triple("x rdf:predicate P").unwrap()));
        assert!(!reifier.has_tag(&node("x").unwrap()));
        assert_eq!(reifier.size(), 3);
        for t in triples("x rdf:type rdf:Statement; x rdf:subject S; x rdf:object O").unwrap() {
            reifier.handled_remove(&t);
        }
        assert!(reifier.is_empty());
    }

    #[test]
    fn test_reify_as() {
        let mut reifier = Reifier::new(ReificationStyle::Minimal);
        let x = node("x").unwrap();
        let t = triple("S P O").unwrap();
        assert_eq!(reifier.reify_as(x.clone(), t.clone()), Ok(x.clone()));
        assert_eq!(reifier.reify_as(x.clone(), t.clone()), Ok(x.clone()));
        assert_eq!(
            reifier.reify_as(x.clone(), triple("S P other").unwrap()),
            Err(ReifierError::AlreadyReified(x.clone()))
        );
        assert_eq!(reifier.get_triple(&x), Some(&t));
    }

    #[test]
    fn test_reify_as_over_fragments() {
        let mut reifier = reifier(ReificationStyle::Convenient, "x rdf:subject S");
        let x = node("x").unwrap();
        assert_eq!(
            reifier.reify_as(x.clone(), triple("T P O").unwrap()),
            Err(ReifierError::CannotReify(x.clone()))
        );
        assert_eq!(reifier.quadlet_count(), 1);
        assert_eq!(reifier.reify_as(x.clone(), triple("S P O").unwrap()), Ok(x.clone()));
        assert_eq!(reifier.quadlet_count(), 4);
    }

    #[test]
    fn test_many_tags_one_triple() {
        let mut reifier = Reifier::new(ReificationStyle::Standard);
        let t = triple("S P O").unwrap();
        reifier.reify_as(node("x").unwrap(), t.clone()).unwrap();
        reifier.reify_as(node("y").unwrap(), t.clone()).unwrap();
        let mut tags = reifier.all_nodes_for(&t);
        tags.sort_by_key(|n| n.to_string());
        assert_eq!(tags, vec![node("x").unwrap(), node("y").unwrap()]);

        assert!(reifier.remove(&node("x").unwrap(), &t));
        assert!(!reifier.remove(&node("x").unwrap(), &t));
        assert!(reifier.has_triple(&t));
        assert_eq!(reifier.remove_triple(&t), 1);
        assert!(reifier.is_empty());
    }

    #[test]
    fn test_remove_tag() {
        let mut reifier = reifier(ReificationStyle::Standard, QUADLETS);
        reifier.handled_add(&triple("y rdf:object O").unwrap());
        assert_eq!(reifier.remove_tag(&node("x").unwrap()), Some(triple("S P O").unwrap()));
        assert_eq!(reifier.remove_tag(&node("y").unwrap()), None);
        assert!(reifier.is_empty());
    }

    #[test]
    fn test_visibility_by_style() {
        for style in ReificationStyle::ALL {
            let mut reifier = Reifier::new(style);
            reifier
                .reify_as(node("x").unwrap(), triple("S P O").unwrap())
                .unwrap();
            let exposed = reifier.find_exposed(&Triple::ANY).count();
            let hidden = reifier.hidden_triples().size();
            if style.conceals() {
                assert_eq!((exposed, hidden, reifier.size()), (0, 4, 0), "{}", style);
            } else {
                assert_eq!((exposed, hidden, reifier.size()), (4, 0, 4), "{}", style);
            }
            assert_eq!(reifier.reification_triples().size(), 4);
        }
    }

    #[test]
    fn test_find_by_pattern() {
        let mut reifier = Reifier::new(ReificationStyle::Standard);
        reifier.reify_as(node("x").unwrap(), triple("S P O").unwrap()).unwrap();
        reifier.reify_as(node("y").unwrap(), triple("S Q O").unwrap()).unwrap();
        assert_eq!(reifier.find_all(&triple("?? rdf:subject S").unwrap()).count(), 2);
        assert_eq!(reifier.find_all(&triple("y rdf:predicate ??").unwrap()).count(), 1);
        assert_eq!(reifier.find_all(&triple("z ?? ??").unwrap()).count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut reifier = reifier(ReificationStyle::Standard, QUADLETS);
        reifier.clear();
        assert!(reifier.is_empty());
        assert_eq!(reifier.size(), 0);
    }
}
