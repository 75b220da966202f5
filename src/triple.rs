//! Triples and triple patterns
//!
//! A single type serves both roles: a triple whose positions are all
//! concrete can be stored, any triple can be used as a pattern.

use crate::node::Node;
use crate::prefix::PrefixMapping;
use std::fmt;

/// One of the three positions of a triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Subject,
    Predicate,
    Object,
}

impl Field {
    /// The node in this position of `triple`
    pub fn get(self, triple: &Triple) -> &Node {
        match self {
            Field::Subject => &triple.subject,
            Field::Predicate => &triple.predicate,
            Field::Object => &triple.object,
        }
    }

    /// The position after this one, wrapping around: S→P, P→O, O→S
    pub fn next(self) -> Field {
        match self {
            Field::Subject => Field::Predicate,
            Field::Predicate => Field::Object,
            Field::Object => Field::Subject,
        }
    }
}

/// Immutable (subject, predicate, object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    subject: Node,
    predicate: Node,
    object: Node,
}

impl Triple {
    /// The all-wildcard pattern
    pub const ANY: Triple = Triple {
        subject: Node::Any,
        predicate: Node::Any,
        object: Node::Any,
    };

    /// Create a new triple
    pub fn new(subject: Node, predicate: Node, object: Node) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Pattern matching everything
    pub fn any() -> Self {
        Self::ANY
    }

    pub fn subject(&self) -> &Node {
        &self.subject
    }

    pub fn predicate(&self) -> &Node {
        &self.predicate
    }

    pub fn object(&self) -> &Node {
        &self.object
    }

    /// Split into components
    pub fn into_parts(self) -> (Node, Node, Node) {
        (self.subject, self.predicate, self.object)
    }

    /// True iff no component is `ANY` or a variable
    pub fn is_concrete(&self) -> bool {
        self.subject.is_concrete() && self.predicate.is_concrete() && self.object.is_concrete()
    }

    /// Whether `triple` matches `self` used as a pattern
    pub fn matches(&self, triple: &Triple) -> bool {
        self.matches_spo(&triple.subject, &triple.predicate, &triple.object)
    }

    /// Whether the given components match `self` used as a pattern
    pub fn matches_spo(&self, subject: &Node, predicate: &Node, object: &Node) -> bool {
        position_matches(&self.subject, subject)
            && position_matches(&self.predicate, predicate)
            && position_matches(&self.object, object)
    }

    /// Whether `node` occurs in any position
    pub fn mentions(&self, node: &Node) -> bool {
        &self.subject == node || &self.predicate == node || &self.object == node
    }

    /// Render with URIs abbreviated through `prefixes`
    pub fn to_string_with(&self, prefixes: &PrefixMapping) -> String {
        format!(
            "{} {} {}",
            self.subject.to_string_with(prefixes),
            self.predicate.to_string_with(prefixes),
            self.object.to_string_with(prefixes)
        )
    }
}

fn position_matches(pattern: &Node, node: &Node) -> bool {
    pattern.is_fluid() || pattern.matches(node)
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(local: &str) -> Node {
        Node::uri(format!("http://example.org/{}", local)).unwrap()
    }

    #[test]
    fn test_any_matches_everything() {
        let t = Triple::new(uri("s"), uri("p"), Node::plain_literal("o"));
        assert!(Triple::ANY.matches(&t));
        assert!(Triple::any().matches(&Triple::ANY));
        assert!(!Triple::ANY.is_concrete());
        assert!(t.is_concrete());
    }

    #[test]
    fn test_positional_match() {
        let t = Triple::new(uri("a"), uri("P"), uri("b"));
        assert!(Triple::new(uri("a"), Node::ANY, Node::ANY).matches(&t));
        assert!(Triple::new(Node::ANY, uri("P"), uri("b")).matches(&t));
        assert!(!Triple::new(uri("b"), Node::ANY, Node::ANY).matches(&t));
        assert!(!Triple::new(Node::ANY, Node::ANY, uri("a")).matches(&t));
    }

    #[test]
    fn test_variables_are_fluid() {
        let t = Triple::new(uri("a"), uri("P"), uri("b"));
        let pattern = Triple::new(Node::variable("x").unwrap(), uri("P"), Node::variable("y").unwrap());
        assert!(pattern.matches(&t));
        assert!(!pattern.is_concrete());
    }

    #[test]
    fn test_field_rotation() {
        let t = Triple::new(uri("s"), uri("p"), uri("o"));
        assert_eq!(Field::Subject.get(&t), &uri("s"));
        assert_eq!(Field::Subject.next(), Field::Predicate);
        assert_eq!(Field::Object.next(), Field::Subject);
        assert_eq!(Field::Object.next().next().get(&t), &uri("p"));
    }

    #[test]
    fn test_equality_and_hash() {
        use std::collections::HashSet;
        let a = Triple::new(uri("s"), uri("p"), uri("o"));
        let b = Triple::new(uri("s"), uri("p"), uri("o"));
        let mut set = HashSet::new();
        set.insert(a.clone());
        assert!(set.contains(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_display() {
        let t = Triple::new(uri("s"), uri("p"), Node::plain_literal("o"));
        assert_eq!(
            t.to_string(),
            "<http://example.org/s> <http://example.org/p> \"o\" ."
        );
    }
}
