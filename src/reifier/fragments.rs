//! Partial reifications
//!
//! A tag that has received some quadlets but not a consistent full set keeps
//! the values it was given per slot. A slot may hold several values when the
//! tag has been over-specified.

use crate::node::Node;
use crate::triple::Triple;
use crate::vocab::{self, rdf};

/// The four quadlet kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Subject,
    Predicate,
    Object,
    /// `rdf:type rdf:Statement`
    Type,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Type, Slot::Subject, Slot::Predicate, Slot::Object];

    /// The quadlet kind of `triple`, if it has one
    pub fn of(triple: &Triple) -> Option<Slot> {
        match triple.predicate().as_uri()? {
            rdf::SUBJECT => Some(Slot::Subject),
            rdf::PREDICATE => Some(Slot::Predicate),
            rdf::OBJECT => Some(Slot::Object),
            rdf::TYPE if triple.object().as_uri() == Some(rdf::STATEMENT) => Some(Slot::Type),
            _ => None,
        }
    }

    fn position(self) -> usize {
        match self {
            Slot::Type => 0,
            Slot::Subject => 1,
            Slot::Predicate => 2,
            Slot::Object => 3,
        }
    }

    /// The value this slot takes for a reification of `triple`
    pub fn component(self, triple: &Triple) -> Node {
        match self {
            Slot::Subject => triple.subject().clone(),
            Slot::Predicate => triple.predicate().clone(),
            Slot::Object => triple.object().clone(),
            Slot::Type => vocab::rdf_statement(),
        }
    }

    /// The quadlet stating `value` for `tag` in this slot
    pub fn quadlet(self, tag: &Node, value: &Node) -> Triple {
        let predicate = match self {
            Slot::Subject => vocab::rdf_subject(),
            Slot::Predicate => vocab::rdf_predicate(),
            Slot::Object => vocab::rdf_object(),
            Slot::Type => vocab::rdf_type(),
        };
        Triple::new(tag.clone(), predicate, value.clone())
    }
}

/// The four quadlets reifying `triple` under `tag`
pub fn quadlets_of(tag: &Node, triple: &Triple) -> Vec<Triple> {
    Slot::ALL
        .iter()
        .map(|slot| slot.quadlet(tag, &slot.component(triple)))
        .collect()
}

/// Per-slot values given to one tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments {
    slots: [Vec<Node>; 4],
}

impl Fragments {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fragments of a full reification of `triple`
    pub fn exploded(triple: &Triple) -> Self {
        let mut fragments = Self::new();
        for slot in Slot::ALL {
            fragments.insert(slot, slot.component(triple));
        }
        fragments
    }

    /// Record `value` in `slot`; false if it was already there
    pub fn insert(&mut self, slot: Slot, value: Node) -> bool {
        let values = &mut self.slots[slot.position()];
        if values.contains(&value) {
            return false;
        }
        values.push(value);
        true
    }

    /// Forget `value` from `slot`; false if it was not there
    pub fn remove(&mut self, slot: Slot, value: &Node) -> bool {
        let values = &mut self.slots[slot.position()];
        match values.iter().position(|v| v == value) {
            Some(i) => {
                values.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, slot: Slot, value: &Node) -> bool {
        self.slots[slot.position()].contains(value)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }

    /// Total number of recorded values
    pub fn len(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    /// The reified triple once every slot holds exactly one value
    pub fn complete(&self) -> Option<Triple> {
        if self.slots.iter().any(|values| values.len() != 1) {
            return None;
        }
        let [_, s, p, o] = &self.slots;
        Some(Triple::new(s[0].clone(), p[0].clone(), o[0].clone()))
    }

    /// Whether some recorded value disagrees with `triple`
    pub fn conflicts_with(&self, triple: &Triple) -> bool {
        Slot::ALL.iter().any(|slot| {
            let expected = slot.component(triple);
            self.slots[slot.position()].iter().any(|v| v != &expected)
        })
    }

    /// One quadlet per recorded value
    pub fn quadlets(&self, tag: &Node) -> Vec<Triple> {
        Slot::ALL
            .iter()
            .flat_map(|slot| {
                self.slots[slot.position()]
                    .iter()
                    .map(move |value| slot.quadlet(tag, value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::{node, triple};

    #[test]
    fn test_slot_of() {
        assert_eq!(Slot::of(&triple("x rdf:subject S").unwrap()), Some(Slot::Subject));
        assert_eq!(Slot::of(&triple("x rdf:object 'lit'").unwrap()), Some(Slot::Object));
        assert_eq!(
            Slot::of(&triple("x rdf:type rdf:Statement").unwrap()),
            Some(Slot::Type)
        );
        assert_eq!(Slot::of(&triple("x rdf:type T").unwrap()), None);
        assert_eq!(Slot::of(&triple("S S rdf:subject").unwrap()), None);
        assert_eq!(Slot::of(&triple("x P y").unwrap()), None);
    }

    #[test]
    fn test_completion() {
        let t = triple("S P O").unwrap();
        let mut fragments = Fragments::new();
        fragments.insert(Slot::Subject, node("S").unwrap());
        fragments.insert(Slot::Predicate, node("P").unwrap());
        fragments.insert(Slot::Object, node("O").unwrap());
        assert_eq!(fragments.complete(), None);
        fragments.insert(Slot::Type, vocab::rdf_statement());
        assert_eq!(fragments.complete(), Some(t.clone()));
        assert_eq!(fragments, Fragments::exploded(&t));
    }

    #[test]
    fn test_over_specification() {
        let mut fragments = Fragments::exploded(&triple("A P O").unwrap());
        assert!(fragments.insert(Slot::Subject, node("BOOM").unwrap()));
        assert!(!fragments.insert(Slot::Subject, node("BOOM").unwrap()));
        assert_eq!(fragments.complete(), None);
        assert_eq!(fragments.len(), 5);
        assert!(fragments.conflicts_with(&triple("A P O").unwrap()));

        assert!(fragments.remove(Slot::Subject, &node("BOOM").unwrap()));
        assert_eq!(fragments.complete(), Some(triple("A P O").unwrap()));
    }

    #[test]
    fn test_quadlets() {
        let tag = node("x").unwrap();
        let quads = quadlets_of(&tag, &triple("S P O").unwrap());
        assert_eq!(quads.len(), 4);
        assert!(quads.contains(&triple("x rdf:predicate P").unwrap()));
        assert!(quads.contains(&triple("x rdf:type rdf:Statement").unwrap()));

        let mut fragments = Fragments::new();
        fragments.insert(Slot::Object, node("O").unwrap());
        assert_eq!(fragments.quadlets(&tag), vec![triple("x rdf:object O").unwrap()]);
    }
}
