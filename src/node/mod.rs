//! Node model
//!
//! Nodes are the values that occupy triple positions: URIs, blank nodes,
//! literals, query variables and the `ANY` wildcard. The concrete variants
//! wrap the corresponding oxrdf primitives.
//!
//! Two relations are kept apart:
//! - `==` is structural: same variant and same payload. `Any` is only equal
//!   to `Any`.
//! - [`Node::matches`] is what patterns use: `Any` matches every node and
//!   literals match by value (`"10"^^xsd:int` matches `"10"^^xsd:short`).

pub mod literal;

pub use literal::{Literal, LiteralValue};

use crate::config::LiteralConfig;
use crate::prefix::PrefixMapping;
use oxrdf::{BlankNode as OxBlankNode, NamedNode as OxNamedNode, Variable as OxVariable};
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Node errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// Accessor called on a node of the wrong variant
    #[error("{operation} is not supported on {node}")]
    Unsupported {
        operation: &'static str,
        node: String,
    },

    /// Empty node specification
    #[error("Empty node specification")]
    EmptySpec,

    /// Malformed node or triple specification
    #[error("Malformed specification: {0}")]
    Malformed(String),

    /// Invalid IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// Invalid blank node
    #[error("Invalid blank node: {0}")]
    InvalidBlankNode(String),

    /// Invalid literal
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),

    /// Invalid variable
    #[error("Invalid variable: {0}")]
    InvalidVariable(String),

    /// Lexical form not in the lexical space of its datatype
    #[error("Lexical form {lexical:?} is not valid for datatype <{datatype}>")]
    DatatypeFormat { lexical: String, datatype: String },
}

pub type NodeResult<T> = Result<T, NodeError>;

/// Named node (IRI)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedNode(OxNamedNode);

impl NamedNode {
    /// Create a new named node from an IRI string
    pub fn new(iri: impl Into<String>) -> NodeResult<Self> {
        OxNamedNode::new(iri)
            .map(Self)
            .map_err(|e| NodeError::InvalidIri(e.to_string()))
    }

    /// Create a named node without validating the IRI
    pub fn new_unchecked(iri: impl Into<String>) -> Self {
        Self(OxNamedNode::new_unchecked(iri))
    }

    /// Get the IRI string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Get the inner oxrdf NamedNode
    pub fn inner(&self) -> &OxNamedNode {
        &self.0
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.as_str())
    }
}

impl From<OxNamedNode> for NamedNode {
    fn from(node: OxNamedNode) -> Self {
        Self(node)
    }
}

/// Blank node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlankNode(OxBlankNode);

impl BlankNode {
    /// Create a new blank node with a fresh identifier
    pub fn new() -> Self {
        Self(OxBlankNode::default())
    }

    /// Create a blank node with a given label
    pub fn with_label(label: impl Into<String>) -> NodeResult<Self> {
        OxBlankNode::new(label)
            .map(Self)
            .map_err(|e| NodeError::InvalidBlankNode(e.to_string()))
    }

    /// Get the blank node label
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for BlankNode {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.as_str())
    }
}

/// Query variable
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable(OxVariable);

impl Variable {
    /// Create a variable; the name excludes the leading `?`
    pub fn new(name: impl Into<String>) -> NodeResult<Self> {
        OxVariable::new(name)
            .map(Self)
            .map_err(|e| NodeError::InvalidVariable(e.to_string()))
    }

    /// Get the variable name
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.as_str())
    }
}

/// A value in a triple position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Uri(NamedNode),
    Blank(BlankNode),
    Literal(Literal),
    Variable(Variable),
    /// Wildcard; matches every node
    Any,
}

impl Node {
    /// The wildcard node
    pub const ANY: Node = Node::Any;

    /// URI node from an IRI string
    pub fn uri(iri: impl Into<String>) -> NodeResult<Self> {
        NamedNode::new(iri).map(Node::Uri)
    }

    /// Blank node with a fresh identifier
    pub fn blank() -> Self {
        Node::Blank(BlankNode::new())
    }

    /// Blank node with the given label
    pub fn blank_with_label(label: impl Into<String>) -> NodeResult<Self> {
        BlankNode::with_label(label).map(Node::Blank)
    }

    /// Plain (untagged, untyped) literal
    pub fn plain_literal(value: impl Into<String>) -> Self {
        Node::Literal(Literal::new_simple_literal(value))
    }

    /// Language-tagged literal
    pub fn lang_literal(value: impl Into<String>, language: impl Into<String>) -> NodeResult<Self> {
        Literal::new_language_tagged_literal(value, language).map(Node::Literal)
    }

    /// Typed literal, validated according to `config`
    pub fn typed_literal(
        value: impl Into<String>,
        datatype: &str,
        config: &LiteralConfig,
    ) -> NodeResult<Self> {
        Literal::new_typed_literal(value, datatype, config).map(Node::Literal)
    }

    /// `xsd:integer` literal
    pub fn integer(value: i64) -> Self {
        Node::Literal(Literal::integer(value))
    }

    /// Query variable
    pub fn variable(name: impl Into<String>) -> NodeResult<Self> {
        Variable::new(name).map(Node::Variable)
    }

    pub fn is_uri(&self) -> bool {
        matches!(self, Node::Uri(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Node::Blank(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Node::Literal(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Node::Variable(_))
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Node::Any)
    }

    /// True for URIs, blank nodes and literals
    pub fn is_concrete(&self) -> bool {
        !self.is_fluid()
    }

    /// True for variables and `ANY`, which match any node in a pattern
    pub fn is_fluid(&self) -> bool {
        matches!(self, Node::Any | Node::Variable(_))
    }

    pub fn as_uri(&self) -> Option<&str> {
        match self {
            Node::Uri(n) => Some(n.as_str()),
            _ => None,
        }
    }

    pub fn as_blank_label(&self) -> Option<&str> {
        match self {
            Node::Blank(b) => Some(b.as_str()),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Node::Literal(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_variable_name(&self) -> Option<&str> {
        match self {
            Node::Variable(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// The IRI of a URI node
    pub fn uri_str(&self) -> NodeResult<&str> {
        self.as_uri().ok_or_else(|| self.unsupported("uri"))
    }

    /// The label of a blank node
    pub fn blank_label(&self) -> NodeResult<&str> {
        self.as_blank_label()
            .ok_or_else(|| self.unsupported("blank_label"))
    }

    /// The label of a literal node
    pub fn literal(&self) -> NodeResult<&Literal> {
        self.as_literal().ok_or_else(|| self.unsupported("literal"))
    }

    /// The name of a variable node
    pub fn variable_name(&self) -> NodeResult<&str> {
        self.as_variable_name()
            .ok_or_else(|| self.unsupported("variable_name"))
    }

    fn unsupported(&self, operation: &'static str) -> NodeError {
        NodeError::Unsupported {
            operation,
            node: self.to_string(),
        }
    }

    /// Pattern matching: `self` is the pattern position, `other` the candidate
    pub fn matches(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Any, _) => true,
            (Node::Literal(a), Node::Literal(b)) => a.same_value_as(b),
            _ => self == other,
        }
    }

    /// Value equality: literals compare in value space, other nodes structurally
    pub fn same_value_as(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Literal(a), Node::Literal(b)) => a.same_value_as(b),
            _ => self == other,
        }
    }

    /// Key under which the node is filed in an index. Nodes with the same
    /// value share a key, so value-matching lookups stay bucket lookups.
    pub fn indexing_value(&self) -> Cow<'_, Node> {
        match self {
            Node::Literal(l) => match l.indexing_key() {
                Some(key) => Cow::Owned(Node::Literal(key)),
                None => Cow::Borrowed(self),
            },
            _ => Cow::Borrowed(self),
        }
    }

    /// Render with URIs abbreviated through `prefixes` where possible
    pub fn to_string_with(&self, prefixes: &PrefixMapping) -> String {
        match self {
            Node::Uri(n) => prefixes
                .shorten(n.as_str())
                .unwrap_or_else(|| n.to_string()),
            Node::Literal(l) => l.to_string_with(prefixes),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Uri(n) => n.fmt(f),
            Node::Blank(b) => b.fmt(f),
            Node::Literal(l) => l.fmt(f),
            Node::Variable(v) => v.fmt(f),
            Node::Any => write!(f, "ANY"),
        }
    }
}

impl From<NamedNode> for Node {
    fn from(node: NamedNode) -> Self {
        Node::Uri(node)
    }
}

impl From<BlankNode> for Node {
    fn from(node: BlankNode) -> Self {
        Node::Blank(node)
    }
}

impl From<Literal> for Node {
    fn from(literal: Literal) -> Self {
        Node::Literal(literal)
    }
}

impl From<Variable> for Node {
    fn from(variable: Variable) -> Self {
        Node::Variable(variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::xsd;

    fn typed(value: &str, datatype: &str) -> Node {
        Node::typed_literal(value, datatype, &LiteralConfig::default()).unwrap()
    }

    #[test]
    fn test_variant_predicates() {
        let uri = Node::uri("http://example.org/a").unwrap();
        assert!(uri.is_uri() && uri.is_concrete());
        assert!(Node::blank().is_blank());
        assert!(Node::plain_literal("x").is_literal());
        assert!(Node::variable("x").unwrap().is_fluid());
        assert!(Node::ANY.is_any() && Node::ANY.is_fluid());
    }

    #[test]
    fn test_fresh_blanks_differ() {
        assert_ne!(Node::blank(), Node::blank());
        assert_eq!(
            Node::blank_with_label("b0").unwrap(),
            Node::blank_with_label("b0").unwrap()
        );
    }

    #[test]
    fn test_any_equals_only_any() {
        let uri = Node::uri("http://example.org/a").unwrap();
        assert_eq!(Node::ANY, Node::Any);
        assert_ne!(Node::ANY, uri);
        assert!(Node::ANY.matches(&uri));
        assert!(!uri.matches(&Node::ANY));
    }

    #[test]
    fn test_wrong_accessor_is_unsupported() {
        let uri = Node::uri("http://example.org/a").unwrap();
        assert_eq!(uri.uri_str().unwrap(), "http://example.org/a");
        assert!(matches!(
            uri.literal(),
            Err(NodeError::Unsupported { operation: "literal", .. })
        ));
        assert!(Node::plain_literal("x").blank_label().is_err());
        assert!(Node::ANY.variable_name().is_err());
        assert_eq!(Node::variable("v").unwrap().variable_name().unwrap(), "v");
    }

    #[test]
    fn test_literal_matching_by_value() {
        let int = typed("10", xsd::INT);
        let short = typed("10", xsd::SHORT);
        assert_ne!(int, short);
        assert!(int.matches(&short));
        assert!(int.same_value_as(&short));
        assert!(!int.matches(&typed("11", xsd::INT)));
        assert_eq!(int.indexing_value(), short.indexing_value());
    }

    #[test]
    fn test_invalid_iri() {
        assert!(matches!(Node::uri("not an iri"), Err(NodeError::InvalidIri(_))));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Node::uri("http://example.org/a").unwrap().to_string(),
            "<http://example.org/a>"
        );
        assert_eq!(Node::variable("x").unwrap().to_string(), "?x");
        assert_eq!(Node::ANY.to_string(), "ANY");
        assert_eq!(Node::plain_literal("hi").to_string(), "\"hi\"");
    }

    #[test]
    fn test_to_string_with_prefixes() {
        let prefixes = PrefixMapping::standard();
        let node = Node::uri(crate::vocab::rdf::TYPE).unwrap();
        assert_eq!(node.to_string_with(&prefixes), "rdf:type");
    }
}
