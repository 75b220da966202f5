//! Prefix mapping
//!
//! Abbreviates IRIs as `prefix:local` and expands them back. Used by the
//! node notation and for rendering nodes.

use crate::vocab::{ns, owl, rdf, rdfs, xsd};
use indexmap::IndexMap;
use thiserror::Error;

/// Prefix errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrefixError {
    /// Prefix is not a legal name
    #[error("Illegal prefix: {0:?}")]
    IllegalPrefix(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Ordered prefix to namespace IRI mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixMapping {
    prefixes: IndexMap<String, String>,
}

impl PrefixMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapping with the common RDF prefixes
    pub fn standard() -> Self {
        let mut mapping = Self::new();
        for (prefix, iri) in [
            ("rdfs", rdfs::NAMESPACE),
            ("rdf", rdf::NAMESPACE),
            ("dc", ns::DC),
            ("owl", owl::NAMESPACE),
            ("xsd", xsd::NAMESPACE),
        ] {
            mapping.prefixes.insert(prefix.to_string(), iri.to_string());
        }
        mapping
    }

    /// Standard prefixes plus `rss`, `vcard` and `eg`
    pub fn extended() -> Self {
        let mut mapping = Self::standard();
        for (prefix, iri) in [("rss", ns::RSS), ("vcard", ns::VCARD), ("eg", ns::EG)] {
            mapping.prefixes.insert(prefix.to_string(), iri.to_string());
        }
        mapping
    }

    /// Bind `prefix` to `iri`, replacing an existing binding. The empty
    /// prefix is the default namespace.
    pub fn set_prefix(
        &mut self,
        prefix: impl Into<String>,
        iri: impl Into<String>,
    ) -> PrefixResult<&mut Self> {
        let prefix = prefix.into();
        if !is_legal_prefix(&prefix) {
            return Err(PrefixError::IllegalPrefix(prefix));
        }
        self.prefixes.insert(prefix, iri.into());
        Ok(self)
    }

    /// Remove a binding
    pub fn remove_prefix(&mut self, prefix: &str) -> &mut Self {
        self.prefixes.shift_remove(prefix);
        self
    }

    /// Namespace IRI bound to `prefix`
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Expand `prefix:local`; strings with no colon or an unknown prefix
    /// come back unchanged
    pub fn expand_prefix(&self, compact: &str) -> String {
        if let Some((prefix, local)) = compact.split_once(':') {
            if let Some(iri) = self.prefixes.get(prefix) {
                return format!("{}{}", iri, local);
            }
        }
        compact.to_string()
    }

    /// Abbreviate `iri` using the longest matching namespace
    pub fn shorten(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, namespace)| !namespace.is_empty() && iri.starts_with(namespace.as_str()))
            .max_by_key(|(_, namespace)| namespace.len())
            .map(|(prefix, namespace)| format!("{}:{}", prefix, &iri[namespace.len()..]))
    }

    /// Iterate over `(prefix, namespace)` pairs in insertion order
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, i)| (p.as_str(), i.as_str()))
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

fn is_legal_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        None => true,
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        }
        Some(_) => false,
    }
}
