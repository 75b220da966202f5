//! Named graph lifecycle
//!
//! A [`GraphMaker`] owns a set of named graphs that share one
//! configuration.

use crate::config::GraphConfig;
use crate::graph::{Graph, GraphError, GraphResult};
use crate::reifier::ReificationStyle;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info};

/// Summary of one named graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphInfo {
    pub name: String,
    pub style: ReificationStyle,
    /// Creation timestamp
    pub created_at: i64,
    /// Visible triple count
    pub size: usize,
}

struct Entry {
    graph: Graph,
    created_at: i64,
}

/// Creates, opens and removes named graphs
pub struct GraphMaker {
    config: GraphConfig,
    graphs: IndexMap<String, Entry>,
}

impl GraphMaker {
    /// Create a maker whose graphs use `config`
    pub fn new(config: GraphConfig) -> Self {
        Self {
            config,
            graphs: IndexMap::new(),
        }
    }

    /// Maker with the default configuration and the given style
    pub fn with_style(style: ReificationStyle) -> Self {
        Self::new(GraphConfig::with_style(style))
    }

    /// Reification style of every graph this maker creates
    pub fn style(&self) -> ReificationStyle {
        self.config.style
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    fn insert(&mut self, name: &str) -> &mut Graph {
        info!("creating graph {:?}", name);
        let entry = Entry {
            graph: Graph::with_config(self.config.clone()),
            created_at: chrono::Utc::now().timestamp(),
        };
        &mut self.graphs.entry(name.to_string()).or_insert(entry).graph
    }

    /// Create a graph named `name`. When it already exists, `strict` makes
    /// that an error; otherwise the existing graph is returned.
    pub fn create_graph(&mut self, name: &str, strict: bool) -> GraphResult<&mut Graph> {
        if self.graphs.contains_key(name) {
            if strict {
                return Err(GraphError::AlreadyExists(name.to_string()));
            }
            return self.get_graph(name);
        }
        Ok(self.insert(name))
    }

    /// Open the graph named `name`. When it does not exist, `strict` makes
    /// that an error; otherwise it is created.
    pub fn open_graph(&mut self, name: &str, strict: bool) -> GraphResult<&mut Graph> {
        if !self.graphs.contains_key(name) {
            if strict {
                return Err(GraphError::DoesNotExist(name.to_string()));
            }
            return Ok(self.insert(name));
        }
        self.get_graph(name)
    }

    /// The existing graph named `name`
    pub fn get_graph(&mut self, name: &str) -> GraphResult<&mut Graph> {
        self.graphs
            .get_mut(name)
            .map(|entry| &mut entry.graph)
            .ok_or_else(|| GraphError::DoesNotExist(name.to_string()))
    }

    pub fn has_graph(&self, name: &str) -> bool {
        self.graphs.contains_key(name)
    }

    /// Close and forget the graph named `name`
    pub fn remove_graph(&mut self, name: &str) -> GraphResult<()> {
        let mut entry = self
            .graphs
            .shift_remove(name)
            .ok_or_else(|| GraphError::DoesNotExist(name.to_string()))?;
        entry.graph.close();
        info!("removed graph {:?}", name);
        Ok(())
    }

    /// Names of the graphs, in creation order
    pub fn list_graphs(&self) -> impl Iterator<Item = &str> {
        self.graphs.keys().map(String::as_str)
    }

    /// Summary of the graph named `name`
    pub fn graph_info(&self, name: &str) -> GraphResult<GraphInfo> {
        let entry = self
            .graphs
            .get(name)
            .ok_or_else(|| GraphError::DoesNotExist(name.to_string()))?;
        Ok(GraphInfo {
            name: name.to_string(),
            style: entry.graph.style(),
            created_at: entry.created_at,
            size: entry.graph.size(),
        })
    }

    /// Close every graph and forget them all
    pub fn close(&mut self) {
        debug!("closing {} graphs", self.graphs.len());
        for (_, mut entry) in self.graphs.drain(..) {
            entry.graph.close();
        }
    }
}

impl Default for GraphMaker {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::triple;

    #[test]
    fn test_create_strict() {
        let mut maker = GraphMaker::default();
        maker.create_graph("a", true).unwrap();
        assert_eq!(
            maker.create_graph("a", true).err(),
            Some(GraphError::AlreadyExists("a".into()))
        );
    }

    #[test]
    fn test_create_lenient_returns_existing() {
        let mut maker = GraphMaker::default();
        maker
            .create_graph("a", false)
            .unwrap()
            .add(triple("x P y").unwrap())
            .unwrap();
        assert_eq!(maker.create_graph("a", false).unwrap().size(), 1);
    }

    #[test]
    fn test_open() {
        let mut maker = GraphMaker::default();
        assert_eq!(
            maker.open_graph("nope", true).err(),
            Some(GraphError::DoesNotExist("nope".into()))
        );
        maker.open_graph("nope", false).unwrap();
        assert!(maker.has_graph("nope"));
        assert!(maker.open_graph("nope", true).is_ok());
    }

    #[test]
    fn test_remove_and_list() {
        let mut maker = GraphMaker::with_style(ReificationStyle::Convenient);
        for name in ["b", "a", "c"] {
            maker.create_graph(name, true).unwrap();
        }
        assert_eq!(maker.list_graphs().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        maker.remove_graph("a").unwrap();
        assert_eq!(maker.remove_graph("a"), Err(GraphError::DoesNotExist("a".into())));
        assert_eq!(maker.list_graphs().count(), 2);
        assert!(matches!(maker.get_graph("a"), Err(GraphError::DoesNotExist(_))));
    }

    #[test]
    fn test_style_propagates() {
        let mut maker = GraphMaker::with_style(ReificationStyle::Standard);
        assert_eq!(maker.style(), ReificationStyle::Standard);
        let graph = maker.create_graph("g", true).unwrap();
        assert_eq!(graph.style(), ReificationStyle::Standard);
        let info = maker.graph_info("g").unwrap();
        assert_eq!(info.style, ReificationStyle::Standard);
        assert_eq!(info.size, 0);
    }

    #[test]
    fn test_close() {
        let mut maker = GraphMaker::default();
        maker.create_graph("a", true).unwrap();
        maker.close();
        assert_eq!(maker.list_graphs().count(), 0);
    }
}
