//! Fixed vocabulary used by the reifier, the literal value space and the
//! node notation.

use crate::node::{NamedNode, Node};

/// RDF syntax namespace
pub mod rdf {
    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const STATEMENT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Statement";
    pub const SUBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#subject";
    pub const PREDICATE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate";
    pub const OBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#object";
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

/// RDF Schema namespace
pub mod rdfs {
    pub const NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";
}

/// OWL namespace
pub mod owl {
    pub const NAMESPACE: &str = "http://www.w3.org/2002/07/owl#";
}

/// XML Schema datatypes recognised by the literal value space
pub mod xsd {
    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";
    pub const BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";
    pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
    pub const POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";
    pub const NON_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonPositiveInteger";
    pub const NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#negativeInteger";
    pub const UNSIGNED_LONG: &str = "http://www.w3.org/2001/XMLSchema#unsignedLong";
    pub const UNSIGNED_INT: &str = "http://www.w3.org/2001/XMLSchema#unsignedInt";
    pub const UNSIGNED_SHORT: &str = "http://www.w3.org/2001/XMLSchema#unsignedShort";
    pub const UNSIGNED_BYTE: &str = "http://www.w3.org/2001/XMLSchema#unsignedByte";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
}

/// Other namespaces registered by the extended prefix mapping
pub mod ns {
    pub const DC: &str = "http://purl.org/dc/elements/1.1/";
    pub const RSS: &str = "http://purl.org/rss/1.0/";
    pub const VCARD: &str = "http://www.w3.org/2001/vcard-rdf/3.0#";
    pub const EG: &str = "http://www.example.org/";
}

fn uri(iri: oxrdf::NamedNodeRef<'static>) -> Node {
    Node::Uri(NamedNode::from(iri.into_owned()))
}

/// `rdf:type`
pub fn rdf_type() -> Node {
    uri(oxrdf::vocab::rdf::TYPE)
}

/// `rdf:Statement`
pub fn rdf_statement() -> Node {
    uri(oxrdf::vocab::rdf::STATEMENT)
}

/// `rdf:subject`
pub fn rdf_subject() -> Node {
    uri(oxrdf::vocab::rdf::SUBJECT)
}

/// `rdf:predicate`
pub fn rdf_predicate() -> Node {
    uri(oxrdf::vocab::rdf::PREDICATE)
}

/// `rdf:object`
pub fn rdf_object() -> Node {
    uri(oxrdf::vocab::rdf::OBJECT)
}
