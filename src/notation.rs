//! Compact node and triple notation
//!
//! Used to write graphs by hand in tests and demos:
//!
//! | spec | node |
//! |---|---|
//! | `'text'` or `"text"` | plain literal (`\\`, `\'`, `\"`, `\n`, `\t`, `\s` escapes) |
//! | `'text'lang` | language-tagged literal |
//! | `'text'prefix:local` | typed literal, datatype expanded through the prefixes |
//! | `42` | `xsd:integer` literal (any spec starting with a digit) |
//! | `_label` | blank node labelled `_label` |
//! | `?name` | variable |
//! | `??` | `ANY` |
//! | `&local` | URI `q:local` |
//! | `prefix:local` | URI, expanded through the prefixes |
//! | `name` | URI in the default namespace (`""` prefix, else `eh:/`) |
//!
//! A triple is three whitespace-separated node specs; triples in a list are
//! separated by `;`.

use crate::config::LiteralConfig;
use crate::node::{Literal, Node, NodeError, NodeResult};
use crate::prefix::PrefixMapping;
use crate::triple::Triple;
use crate::vocab::xsd;

/// Namespace of bare names when no default prefix is bound
pub const DEFAULT_NAMESPACE: &str = "eh:/";

/// Parser for the compact notation
#[derive(Debug, Clone)]
pub struct Notation {
    prefixes: PrefixMapping,
    literals: LiteralConfig,
}

impl Default for Notation {
    fn default() -> Self {
        Self::new()
    }
}

impl Notation {
    /// Notation over the extended prefix mapping with lazy literal validation
    pub fn new() -> Self {
        Self {
            prefixes: PrefixMapping::extended(),
            literals: LiteralConfig::default(),
        }
    }

    /// Use `prefixes` for expansion
    pub fn with_prefixes(mut self, prefixes: PrefixMapping) -> Self {
        self.prefixes = prefixes;
        self
    }

    /// Use `literals` when building typed literals
    pub fn with_literal_config(mut self, literals: LiteralConfig) -> Self {
        self.literals = literals;
        self
    }

    pub fn prefixes(&self) -> &PrefixMapping {
        &self.prefixes
    }

    /// Parse one node
    pub fn node(&self, spec: &str) -> NodeResult<Node> {
        let mut chars = spec.chars();
        let Some(first) = chars.next() else {
            return Err(NodeError::EmptySpec);
        };
        match first {
            '\'' | '"' => self.literal(spec, first),
            '0'..='9' => Node::typed_literal(spec, xsd::INTEGER, &self.literals),
            '_' => Node::blank_with_label(spec),
            '?' if spec == "??" => Ok(Node::Any),
            '?' => Node::variable(chars.as_str()),
            '&' => Node::uri(format!("q:{}", chars.as_str())),
            _ if spec.contains(':') => Node::uri(self.prefixes.expand_prefix(spec)),
            _ => {
                let namespace = self.prefixes.namespace("").unwrap_or(DEFAULT_NAMESPACE);
                Node::uri(format!("{}{}", namespace, spec))
            }
        }
    }

    fn literal(&self, spec: &str, quote: char) -> NodeResult<Node> {
        let mut value = String::new();
        let mut chars = spec.char_indices().skip(1);
        let mut suffix = None;
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => {
                    let Some((_, escaped)) = chars.next() else {
                        return Err(NodeError::Malformed(spec.to_string()));
                    };
                    value.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        's' => ' ',
                        other => other,
                    });
                }
                c if c == quote => {
                    suffix = Some(&spec[i + c.len_utf8()..]);
                    break;
                }
                c => value.push(c),
            }
        }
        let Some(suffix) = suffix else {
            return Err(NodeError::Malformed(spec.to_string()));
        };

        if suffix.is_empty() {
            Ok(Node::plain_literal(value))
        } else if suffix.contains(':') {
            let datatype = self.prefixes.expand_prefix(suffix);
            Literal::new_typed_literal(value, &datatype, &self.literals).map(Node::Literal)
        } else {
            Node::lang_literal(value, suffix)
        }
    }

    /// Parse whitespace-separated nodes
    pub fn nodes(&self, spec: &str) -> NodeResult<Vec<Node>> {
        spec.split_whitespace().map(|s| self.node(s)).collect()
    }

    /// Parse one triple
    pub fn triple(&self, spec: &str) -> NodeResult<Triple> {
        let mut parts = spec.split_whitespace();
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(s), Some(p), Some(o), None) => {
                Ok(Triple::new(self.node(s)?, self.node(p)?, self.node(o)?))
            }
            (None, ..) => Err(NodeError::EmptySpec),
            _ => Err(NodeError::Malformed(spec.to_string())),
        }
    }

    /// Parse `;`-separated triples; blank entries are skipped
    pub fn triples(&self, spec: &str) -> NodeResult<Vec<Triple>> {
        spec.split(';')
            .filter(|part| !part.trim().is_empty())
            .map(|part| self.triple(part))
            .collect()
    }
}

/// Parse a node with the default notation
pub fn node(spec: &str) -> NodeResult<Node> {
    Notation::new().node(spec)
}

/// Parse a triple with the default notation
pub fn triple(spec: &str) -> NodeResult<Triple> {
    Notation::new().triple(spec)
}

/// Parse `;`-separated triples with the default notation
pub fn triples(spec: &str) -> NodeResult<Vec<Triple>> {
    Notation::new().triples(spec)
}
