//! # Quadlet
//!
//! An in-memory RDF triple store with statement reification.
//!
//! ## Features
//!
//! - Triples held in three node-to-triples indices (subject, predicate,
//!   object) with pattern lookup over `ANY` and variables
//! - Literal matching by value (`"10"^^xsd:int` finds `"10"^^xsd:short`)
//! - Reification in three styles: `Standard`, `Convenient` and `Minimal`
//! - Graph façade with bulk updates, change events, snapshot transactions
//!   and blank-node isomorphism
//! - Prefix mappings and a compact notation for writing triples by hand
//! - A graph maker for named graphs sharing one configuration
//!
//! ## Example
//!
//! ```rust
//! use quadlet::{notation, Graph, ReificationStyle};
//!
//! let mut graph = Graph::with_style(ReificationStyle::Convenient);
//! graph.add(notation::triple("alice knows bob").unwrap()).unwrap();
//!
//! let tag = graph.reify(notation::triple("alice knows bob").unwrap()).unwrap();
//! assert!(graph.reifier().has_tag(&tag));
//!
//! let found: Vec<_> = graph.find(&notation::triple("alice ?? ??").unwrap()).collect();
//! assert_eq!(found.len(), 1);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod graph;
pub mod maker;
pub mod node;
pub mod notation;
pub mod prefix;
pub mod reifier;
pub mod store;
pub mod triple;
pub mod vocab;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigResult, GraphConfig, LiteralConfig};

pub use graph::{
    Capabilities, Graph, GraphCursor, GraphError, GraphEvent, GraphEventManager, GraphListener,
    GraphResult, GraphView, TransactionHandler,
};

pub use maker::{GraphInfo, GraphMaker};

pub use node::{BlankNode, Literal, LiteralValue, NamedNode, Node, NodeError, NodeResult, Variable};

pub use notation::Notation;

pub use prefix::{PrefixError, PrefixMapping, PrefixResult};

pub use reifier::{ReificationStyle, Reifier, ReifierError, ReifierResult};

pub use store::{NodeToTriplesMap, StoreCursor, TripleIterator, TripleStore};

pub use triple::{Field, Triple};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
