//! Shared fixtures for the integration suites

#![allow(dead_code)]

use quadlet::graph::{GraphEvent, GraphListener};
use quadlet::{notation, Graph, GraphConfig, ReificationStyle};
use std::sync::Mutex;

fn minimal() -> Graph {
    Graph::with_style(ReificationStyle::Minimal)
}

fn standard() -> Graph {
    Graph::with_style(ReificationStyle::Standard)
}

fn convenient() -> Graph {
    Graph::with_style(ReificationStyle::Convenient)
}

fn no_transactions() -> Graph {
    Graph::with_config(GraphConfig::new().transactions(false))
}

/// Every graph flavour the suites run against
pub fn graph_constructors() -> Vec<(&'static str, fn() -> Graph)> {
    vec![
        ("minimal", minimal as fn() -> Graph),
        ("standard", standard),
        ("convenient", convenient),
        ("no_transactions", no_transactions),
    ]
}

/// A graph built by `make` holding the triples of `spec`
pub fn graph_with(make: fn() -> Graph, spec: &str) -> Graph {
    let mut graph = make();
    graph.add_list(notation::triples(spec).unwrap()).unwrap();
    graph
}

/// Records every event it hears
#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<Vec<GraphEvent>>,
}

impl RecordingListener {
    pub fn events(&self) -> Vec<GraphEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<GraphEvent> {
        self.events.lock().unwrap().last().cloned()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

impl GraphListener for RecordingListener {
    fn on_event(&self, event: &GraphEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
