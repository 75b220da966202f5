//! Graph façade
//!
//! [`Graph`] combines a [`TripleStore`] with a [`Reifier`]. Every addition
//! and deletion is offered to the reifier first; only triples it does not
//! take reach the store. Finds return the store's matches plus whatever
//! quadlets the reifier exposes under the graph's style.
//!
//! Mutations notify the graph's listeners after the change has been made.

pub mod capabilities;
pub mod events;
pub mod isomorphism;
pub mod transaction;

pub use capabilities::Capabilities;
pub use events::{GraphEvent, GraphEventManager, GraphListener};
pub use transaction::TransactionHandler;

use crate::config::GraphConfig;
use crate::node::{Node, NodeError};
use crate::notation::Notation;
use crate::prefix::PrefixMapping;
use crate::reifier::{ReificationStyle, Reifier, ReifierError};
use crate::store::{TripleIterator, TripleStore};
use crate::triple::{Field, Triple};
use indexmap::IndexSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use transaction::Snapshot;

/// Graph errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// The graph has been closed
    #[error("Graph is closed")]
    Closed,

    /// Only triples without ANY or variables can be stored
    #[error("Cannot store non-concrete triple: {0}")]
    NotConcrete(Triple),

    /// Operation not supported by this graph
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    /// `begin` inside an open transaction
    #[error("A transaction is already active")]
    TransactionActive,

    /// `commit` or `abort` without an open transaction
    #[error("No active transaction")]
    NoTransaction,

    /// Named graph already exists
    #[error("Graph already exists: {0}")]
    AlreadyExists(String),

    /// Named graph does not exist
    #[error("Graph does not exist: {0}")]
    DoesNotExist(String),

    #[error(transparent)]
    Reifier(#[from] ReifierError),

    #[error(transparent)]
    Node(#[from] NodeError),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Read-only access to a set of triples
pub trait GraphView {
    /// Snapshot of the triples matching `pattern`
    fn find(&self, pattern: &Triple) -> TripleIterator;

    fn contains(&self, pattern: &Triple) -> bool {
        self.find(pattern).next().is_some()
    }

    fn size(&self) -> usize {
        self.find(&Triple::ANY).len()
    }

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Every triple
    fn triples(&self) -> Vec<Triple> {
        self.find(&Triple::ANY).collect()
    }

    /// Equality up to blank node relabelling
    fn is_isomorphic_with(&self, other: &dyn GraphView) -> bool {
        isomorphism::is_isomorphic(&self.triples(), &other.triples())
    }
}

/// In-memory RDF graph
#[derive(Debug)]
pub struct Graph {
    config: GraphConfig,
    store: TripleStore,
    reifier: Reifier,
    events: Arc<GraphEventManager>,
    prefixes: PrefixMapping,
    transactions: TransactionHandler,
    capabilities: Capabilities,
    closed: bool,
}

impl Graph {
    /// Create an empty graph with the default configuration
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create an empty graph with the given reification style
    pub fn with_style(style: ReificationStyle) -> Self {
        Self::with_config(GraphConfig::with_style(style))
    }

    /// Create an empty graph
    pub fn with_config(config: GraphConfig) -> Self {
        debug!("new graph, style {}", config.style);
        Self {
            store: TripleStore::new(),
            reifier: Reifier::new(config.style),
            events: Arc::new(GraphEventManager::new()),
            prefixes: PrefixMapping::new(),
            transactions: TransactionHandler::new(config.transactions),
            capabilities: Capabilities::in_memory(),
            closed: false,
            config,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn style(&self) -> ReificationStyle {
        self.config.style
    }

    fn check_open(&self) -> GraphResult<()> {
        if self.closed {
            Err(GraphError::Closed)
        } else {
            Ok(())
        }
    }

    fn check_concrete(triple: &Triple) -> GraphResult<()> {
        if triple.is_concrete() {
            Ok(())
        } else {
            Err(GraphError::NotConcrete(triple.clone()))
        }
    }

    fn check_all_concrete(triples: &[Triple]) -> GraphResult<()> {
        triples.iter().try_for_each(Self::check_concrete)
    }

    fn perform_add(&mut self, triple: Triple) {
        if !self.reifier.handled_add(&triple) {
            self.store.add(triple);
        }
    }

    fn perform_delete(&mut self, triple: &Triple) {
        if !self.reifier.handled_remove(triple) {
            self.store.delete(triple);
        }
    }

    /// Add a concrete triple
    pub fn add(&mut self, triple: Triple) -> GraphResult<()> {
        self.check_open()?;
        Self::check_concrete(&triple)?;
        self.perform_add(triple.clone());
        self.events.notify(&GraphEvent::Add(triple));
        Ok(())
    }

    /// Delete a triple; deleting an absent triple is not an error
    pub fn delete(&mut self, triple: &Triple) -> GraphResult<()> {
        self.check_open()?;
        self.perform_delete(triple);
        self.events.notify(&GraphEvent::Delete(triple.clone()));
        Ok(())
    }

    /// Snapshot of the triples matching `pattern`
    pub fn find(&self, pattern: &Triple) -> TripleIterator {
        self.store
            .find(pattern)
            .chain(self.reifier.find_exposed(pattern))
    }

    /// Snapshot of the triples matching (s, p, o)
    pub fn find_spo(&self, subject: &Node, predicate: &Node, object: &Node) -> TripleIterator {
        self.find(&Triple::new(subject.clone(), predicate.clone(), object.clone()))
    }

    /// Cursor over the matches of `pattern` whose `remove` deletes through
    /// the graph
    pub fn find_mut(&mut self, pattern: &Triple) -> GraphCursor<'_> {
        let pending = self.find(pattern);
        GraphCursor {
            graph: self,
            pending,
            current: None,
        }
    }

    /// Whether some triple matches `pattern`
    pub fn contains(&self, pattern: &Triple) -> bool {
        self.store.contains(pattern) || self.reifier.find_exposed(pattern).next().is_some()
    }

    pub fn contains_spo(&self, subject: &Node, predicate: &Node, object: &Node) -> bool {
        self.contains(&Triple::new(subject.clone(), predicate.clone(), object.clone()))
    }

    /// Number of visible triples
    pub fn size(&self) -> usize {
        self.store.size() + self.reifier.size()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Release the graph's contents. Later mutations fail with
    /// [`GraphError::Closed`].
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.store.clear();
        self.reifier.clear();
        self.transactions.reset();
        self.closed = true;
        info!("graph closed");
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    // Bulk updates. Each checks every triple before changing anything and
    // sends a single event for the whole batch.

    pub fn add_slice(&mut self, triples: &[Triple]) -> GraphResult<()> {
        self.check_open()?;
        Self::check_all_concrete(triples)?;
        for triple in triples {
            self.perform_add(triple.clone());
        }
        self.events.notify(&GraphEvent::AddSlice(triples.to_vec()));
        Ok(())
    }

    pub fn add_list(&mut self, triples: Vec<Triple>) -> GraphResult<()> {
        self.check_open()?;
        Self::check_all_concrete(&triples)?;
        for triple in &triples {
            self.perform_add(triple.clone());
        }
        self.events.notify(&GraphEvent::AddList(triples));
        Ok(())
    }

    pub fn add_iter(&mut self, triples: impl IntoIterator<Item = Triple>) -> GraphResult<()> {
        self.check_open()?;
        let triples: Vec<Triple> = triples.into_iter().collect();
        Self::check_all_concrete(&triples)?;
        for triple in &triples {
            self.perform_add(triple.clone());
        }
        self.events.notify(&GraphEvent::AddIter(triples));
        Ok(())
    }

    /// Add every triple of `other`, and its reifications when asked
    pub fn add_graph(&mut self, other: &Graph, with_reifications: bool) -> GraphResult<()> {
        self.check_open()?;
        let triples = other.triples();
        if with_reifications {
            // Reifications can clash with ours; stage them so a failure
            // leaves this graph untouched.
            let mut staged = self.reifier.clone();
            let unhandled: Vec<&Triple> =
                triples.iter().filter(|t| !staged.handled_add(t)).collect();
            for tag in other.reifier.all_nodes() {
                if let Some(triple) = other.reifier.get_triple(&tag) {
                    staged.reify_as(tag, triple.clone())?;
                }
            }
            self.reifier = staged;
            for triple in unhandled {
                self.store.add(triple.clone());
            }
        } else {
            for triple in &triples {
                self.perform_add(triple.clone());
            }
        }
        self.events.notify(&GraphEvent::AddGraph(triples));
        Ok(())
    }

    pub fn delete_slice(&mut self, triples: &[Triple]) -> GraphResult<()> {
        self.check_open()?;
        for triple in triples {
            self.perform_delete(triple);
        }
        self.events.notify(&GraphEvent::DeleteSlice(triples.to_vec()));
        Ok(())
    }

    pub fn delete_list(&mut self, triples: Vec<Triple>) -> GraphResult<()> {
        self.check_open()?;
        for triple in &triples {
            self.perform_delete(triple);
        }
        self.events.notify(&GraphEvent::DeleteList(triples));
        Ok(())
    }

    pub fn delete_iter(&mut self, triples: impl IntoIterator<Item = Triple>) -> GraphResult<()> {
        self.check_open()?;
        let triples: Vec<Triple> = triples.into_iter().collect();
        for triple in &triples {
            self.perform_delete(triple);
        }
        self.events.notify(&GraphEvent::DeleteIter(triples));
        Ok(())
    }

    /// Delete every triple of `other`, and its reifications when asked
    pub fn delete_graph(&mut self, other: &Graph, with_reifications: bool) -> GraphResult<()> {
        self.check_open()?;
        let triples = other.triples();
        for triple in &triples {
            self.perform_delete(triple);
        }
        if with_reifications {
            for tag in other.reifier.all_nodes() {
                if let Some(triple) = other.reifier.get_triple(&tag) {
                    self.reifier.remove(&tag, triple);
                }
            }
        }
        self.events.notify(&GraphEvent::DeleteGraph(triples));
        Ok(())
    }

    /// Remove every triple and reification
    pub fn remove_all(&mut self) -> GraphResult<()> {
        self.check_open()?;
        self.store.clear();
        self.reifier.clear();
        debug!("removed all triples");
        self.events.notify(&GraphEvent::RemoveAll);
        Ok(())
    }

    /// Remove every triple matching (s, p, o)
    pub fn remove(&mut self, subject: &Node, predicate: &Node, object: &Node) -> GraphResult<()> {
        self.check_open()?;
        let pattern = Triple::new(subject.clone(), predicate.clone(), object.clone());
        for triple in self.find(&pattern) {
            self.perform_delete(&triple);
        }
        self.events.notify(&GraphEvent::Remove(pattern));
        Ok(())
    }

    // Listing

    fn distinct(&self, pattern: &Triple, field: Field) -> Vec<Node> {
        let nodes: IndexSet<Node> = self
            .find(pattern)
            .map(|triple| field.get(&triple).clone())
            .collect();
        nodes.into_iter().collect()
    }

    fn with_exposed(&self, stored: Vec<Node>, field: Field) -> Vec<Node> {
        if self.reifier.size() == 0 {
            return stored;
        }
        let mut nodes: IndexSet<Node> = stored.into_iter().collect();
        nodes.extend(
            self.reifier
                .find_exposed(&Triple::ANY)
                .map(|triple| field.get(&triple).clone()),
        );
        nodes.into_iter().collect()
    }

    /// Distinct subjects of visible triples
    pub fn list_subjects(&self) -> Vec<Node> {
        self.with_exposed(self.store.list_subjects(), Field::Subject)
    }

    /// Distinct predicates of visible triples
    pub fn list_predicates(&self) -> Vec<Node> {
        self.with_exposed(self.store.list_predicates(), Field::Predicate)
    }

    /// Distinct objects of visible triples
    pub fn list_objects(&self) -> Vec<Node> {
        self.with_exposed(self.store.list_objects(), Field::Object)
    }

    /// Distinct subjects of triples with the given predicate and object
    pub fn subjects_for(&self, predicate: &Node, object: &Node) -> Vec<Node> {
        let pattern = Triple::new(Node::Any, predicate.clone(), object.clone());
        self.distinct(&pattern, Field::Subject)
    }

    /// Distinct predicates of triples with the given subject and object
    pub fn predicates_for(&self, subject: &Node, object: &Node) -> Vec<Node> {
        let pattern = Triple::new(subject.clone(), Node::Any, object.clone());
        self.distinct(&pattern, Field::Predicate)
    }

    /// Distinct objects of triples with the given subject and predicate
    pub fn objects_for(&self, subject: &Node, predicate: &Node) -> Vec<Node> {
        let pattern = Triple::new(subject.clone(), predicate.clone(), Node::Any);
        self.distinct(&pattern, Field::Object)
    }

    /// Whether `node` occurs in any position of a visible triple
    pub fn contains_node(&self, node: &Node) -> bool {
        self.contains(&Triple::new(node.clone(), Node::Any, Node::Any))
            || self.contains(&Triple::new(Node::Any, node.clone(), Node::Any))
            || self.contains(&Triple::new(Node::Any, Node::Any, node.clone()))
    }

    // Reification

    pub fn reifier(&self) -> &Reifier {
        &self.reifier
    }

    /// Direct access to the reifier; changes made here are not notified
    pub fn reifier_mut(&mut self) -> &mut Reifier {
        &mut self.reifier
    }

    /// Make `tag` reify `triple`
    pub fn reify_as(&mut self, tag: Node, triple: Triple) -> GraphResult<Node> {
        self.check_open()?;
        Self::check_concrete(&triple)?;
        Ok(self.reifier.reify_as(tag, triple)?)
    }

    /// Reify `triple` under a fresh blank node
    pub fn reify(&mut self, triple: Triple) -> GraphResult<Node> {
        self.reify_as(Node::blank(), triple)
    }

    // Transactions

    pub fn transactions_supported(&self) -> bool {
        self.transactions.transactions_supported()
    }

    pub fn transaction_handler(&self) -> &TransactionHandler {
        &self.transactions
    }

    pub fn begin(&mut self) -> GraphResult<()> {
        self.check_open()?;
        let (store, reifier) = (&self.store, &self.reifier);
        self.transactions.begin(|| Snapshot {
            store: store.clone(),
            reifier: reifier.clone(),
        })
    }

    pub fn commit(&mut self) -> GraphResult<()> {
        self.check_open()?;
        self.transactions.commit()
    }

    /// Roll back to the state at `begin`
    pub fn abort(&mut self) -> GraphResult<()> {
        self.check_open()?;
        let snapshot = self.transactions.abort()?;
        self.store = snapshot.store;
        self.reifier = snapshot.reifier;
        Ok(())
    }

    /// Run `f` in a transaction, committing on `Ok` and aborting on `Err`
    pub fn execute_in_transaction<T, E>(
        &mut self,
        f: impl FnOnce(&mut Graph) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<GraphError>,
    {
        self.begin()?;
        match f(self) {
            Ok(value) => {
                self.commit()?;
                Ok(value)
            }
            Err(e) => {
                self.abort()?;
                Err(e)
            }
        }
    }

    // Accessors

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn event_manager(&self) -> &Arc<GraphEventManager> {
        &self.events
    }

    pub fn prefixes(&self) -> &PrefixMapping {
        &self.prefixes
    }

    pub fn prefixes_mut(&mut self) -> &mut PrefixMapping {
        &mut self.prefixes
    }

    /// Notation parser that builds literals with this graph's settings
    pub fn notation(&self) -> Notation {
        Notation::new().with_literal_config(self.config.literals)
    }

    /// Every visible triple
    pub fn triples(&self) -> Vec<Triple> {
        self.find(&Triple::ANY).collect()
    }

    /// Equality up to blank node relabelling
    pub fn is_isomorphic_with(&self, other: &dyn GraphView) -> bool {
        GraphView::is_isomorphic_with(self, other)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphView for Graph {
    fn find(&self, pattern: &Triple) -> TripleIterator {
        Graph::find(self, pattern)
    }

    fn contains(&self, pattern: &Triple) -> bool {
        Graph::contains(self, pattern)
    }

    fn size(&self) -> usize {
        Graph::size(self)
    }
}

/// Cursor over a graph lookup supporting removal of the current triple
pub struct GraphCursor<'a> {
    graph: &'a mut Graph,
    pending: TripleIterator,
    current: Option<Triple>,
}

impl GraphCursor<'_> {
    /// Advance to the next match
    pub fn next_triple(&mut self) -> Option<&Triple> {
        self.current = self.pending.next();
        self.current.as_ref()
    }

    /// Delete the triple last yielded through the graph, notifying its
    /// listeners. Returns false when there is nothing to remove.
    pub fn remove(&mut self) -> GraphResult<bool> {
        match self.current.take() {
            Some(triple) => {
                self.graph.delete(&triple)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::{node, triple, triples};
    use std::collections::HashSet;
    use std::sync::Mutex;

    fn graph_with(style: ReificationStyle, spec: &str) -> Graph {
        let mut graph = Graph::with_style(style);
        graph.add_list(triples(spec).unwrap()).unwrap();
        graph
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<GraphEvent>>);

    impl GraphListener for Recorder {
        fn on_event(&self, event: &GraphEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn test_add_find_delete() {
        let mut graph = Graph::new();
        graph.add(triple("a P b").unwrap()).unwrap();
        graph.add(triple("a P b").unwrap()).unwrap();
        assert_eq!(graph.size(), 1);
        assert!(graph.contains(&triple("a ?? ??").unwrap()));
        assert!(graph.contains_spo(&node("a").unwrap(), &Node::ANY, &node("b").unwrap()));
        graph.delete(&triple("a P b").unwrap()).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_only_concrete_triples() {
        let mut graph = Graph::new();
        let pattern = triple("a ?? b").unwrap();
        assert_eq!(graph.add(pattern.clone()), Err(GraphError::NotConcrete(pattern)));
        let batch = triples("a P b; ?x P c").unwrap();
        assert!(graph.add_slice(&batch).is_err());
        assert!(graph.is_empty());
    }

    #[test]
    fn test_closed_graph() {
        let mut graph = graph_with(ReificationStyle::Minimal, "a P b");
        graph.close();
        assert!(graph.is_closed());
        assert!(graph.is_empty());
        assert_eq!(graph.add(triple("c P d").unwrap()), Err(GraphError::Closed));
        assert_eq!(graph.begin(), Err(GraphError::Closed));
        graph.close();
    }

    #[test]
    fn test_standard_quadlets_visible() {
        let mut graph = Graph::with_style(ReificationStyle::Standard);
        let quadlets = triples(
            "x rdf:type rdf:Statement; x rdf:subject S; x rdf:predicate P; x rdf:object O",
        )
        .unwrap();
        for (i, quadlet) in quadlets.into_iter().enumerate() {
            graph.add(quadlet).unwrap();
            assert_eq!(graph.size(), i + 1);
        }
        let x = node("x").unwrap();
        assert_eq!(graph.reifier().get_triple(&x), Some(&triple("S P O").unwrap()));
        assert_eq!(graph.find(&triple("x ?? ??").unwrap()).count(), 4);
        assert!(graph.list_subjects().contains(&x));
    }

    #[test]
    fn test_convenient_quadlets_hidden() {
        let mut graph = graph_with(
            ReificationStyle::Convenient,
            "x rdf:type rdf:Statement; x rdf:subject S; x rdf:predicate P; x rdf:object O",
        );
        assert_eq!(graph.size(), 0);
        assert_eq!(graph.reifier().hidden_triples().size(), 4);
        graph.add(triple("a P b").unwrap()).unwrap();
        assert_eq!(graph.size(), 1);
    }

    #[test]
    fn test_minimal_quadlets_are_plain() {
        let graph = graph_with(ReificationStyle::Minimal, "x rdf:subject S; x rdf:predicate P");
        assert_eq!(graph.size(), 2);
        assert!(graph.reifier().is_empty());
    }

    #[test]
    fn test_remove_pattern() {
        let mut graph = graph_with(ReificationStyle::Minimal, "a P b; a Q c; d P b");
        graph
            .remove(&node("a").unwrap(), &Node::ANY, &Node::ANY)
            .unwrap();
        assert_eq!(graph.triples(), vec![triple("d P b").unwrap()]);
    }

    #[test]
    fn test_remove_all_clears_reifier() {
        let mut graph = graph_with(ReificationStyle::Standard, "a P b");
        graph.reify_as(node("x").unwrap(), triple("a P b").unwrap()).unwrap();
        assert_eq!(graph.size(), 5);
        graph.remove_all().unwrap();
        assert!(graph.is_empty());
        assert!(graph.reifier().is_empty());
    }

    #[test]
    fn test_cursor_remove_notifies() {
        let mut graph = graph_with(ReificationStyle::Minimal, "a P b; a P c; x P y");
        let recorder = Arc::new(Recorder::default());
        graph.event_manager().register(recorder.clone());

        let mut cursor = graph.find_mut(&triple("a ?? ??").unwrap());
        let mut removed = 0;
        while cursor.next_triple().is_some() {
            assert!(cursor.remove().unwrap());
            removed += 1;
        }
        assert_eq!(removed, 2);
        assert_eq!(graph.size(), 1);
        assert_eq!(recorder.0.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_listing_helpers() {
        let graph = graph_with(ReificationStyle::Minimal, "a P b; a Q b; c P b; a P d");
        let subjects: HashSet<Node> = graph
            .subjects_for(&node("P").unwrap(), &node("b").unwrap())
            .into_iter()
            .collect();
        assert_eq!(subjects, [node("a").unwrap(), node("c").unwrap()].into());
        assert_eq!(graph.predicates_for(&node("a").unwrap(), &node("b").unwrap()).len(), 2);
        assert_eq!(graph.objects_for(&node("a").unwrap(), &node("P").unwrap()).len(), 2);
        assert!(graph.contains_node(&node("Q").unwrap()));
        assert!(!graph.contains_node(&node("zz").unwrap()));
        assert_eq!(graph.list_objects().len(), 2);
    }

    #[test]
    fn test_transactions() {
        let mut graph = graph_with(ReificationStyle::Minimal, "a P b");
        graph.begin().unwrap();
        graph.add(triple("c P d").unwrap()).unwrap();
        graph.abort().unwrap();
        assert_eq!(graph.triples(), vec![triple("a P b").unwrap()]);

        graph.begin().unwrap();
        graph.add(triple("c P d").unwrap()).unwrap();
        graph.commit().unwrap();
        assert_eq!(graph.size(), 2);
    }

    #[test]
    fn test_execute_in_transaction() {
        let mut graph = graph_with(ReificationStyle::Minimal, "a P b");
        let result: GraphResult<()> = graph.execute_in_transaction(|g| {
            g.add(triple("c P d").unwrap())?;
            Err(GraphError::Unsupported("rollback"))
        });
        assert!(result.is_err());
        assert_eq!(graph.size(), 1);

        let added = graph
            .execute_in_transaction(|g| g.add(triple("c P d").unwrap()).map(|_| 1))
            .unwrap();
        assert_eq!(added, 1);
        assert_eq!(graph.size(), 2);
    }

    #[test]
    fn test_non_transactional() {
        let mut graph = Graph::with_config(GraphConfig::default().transactions(false));
        assert!(!graph.transactions_supported());
        assert_eq!(graph.begin(), Err(GraphError::Unsupported("begin")));
        assert_eq!(graph.abort(), Err(GraphError::Unsupported("abort")));
    }

    #[test]
    fn test_add_graph_with_reifications() {
        let mut source = graph_with(ReificationStyle::Minimal, "a P b");
        source.reify_as(node("x").unwrap(), triple("a P b").unwrap()).unwrap();

        let mut plain = Graph::new();
        plain.add_graph(&source, false).unwrap();
        assert_eq!(plain.size(), 1);
        assert!(plain.reifier().is_empty());

        let mut full = Graph::new();
        full.add_graph(&source, true).unwrap();
        assert!(full.reifier().has_tag(&node("x").unwrap()));

        full.delete_graph(&source, true).unwrap();
        assert!(full.is_empty());
        assert!(full.reifier().is_empty());
    }

    #[test]
    fn test_add_graph_clash_leaves_target_untouched() {
        let x = node("x").unwrap();
        let mut target = Graph::new();
        target.reify_as(x.clone(), triple("c P d").unwrap()).unwrap();
        let recorder = Arc::new(Recorder::default());
        target.event_manager().register(recorder.clone());

        let mut source = graph_with(ReificationStyle::Minimal, "a P b");
        source.reify_as(x.clone(), triple("a P b").unwrap()).unwrap();

        assert_eq!(
            target.add_graph(&source, true),
            Err(GraphError::Reifier(ReifierError::AlreadyReified(x.clone())))
        );
        assert_eq!(target.size(), 0);
        assert!(!target.contains(&triple("a P b").unwrap()));
        assert_eq!(target.reifier().get_triple(&x), Some(&triple("c P d").unwrap()));
        assert_eq!(target.reifier().all_nodes(), vec![x]);
        assert!(recorder.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_isomorphism() {
        let a = graph_with(ReificationStyle::Minimal, "_a B _c");
        let b = graph_with(ReificationStyle::Minimal, "_x B _y");
        let c = graph_with(ReificationStyle::Minimal, "a B c; d E f");
        assert!(a.is_isomorphic_with(&b));
        assert!(!a.is_isomorphic_with(&c));
    }

    #[test]
    fn test_capabilities() {
        let graph = Graph::new();
        let caps = graph.capabilities();
        assert!(caps.size_accurate() && caps.add_allowed() && caps.iterator_remove_allowed());
    }
}
