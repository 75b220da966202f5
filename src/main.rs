use quadlet::graph::{GraphEvent, GraphListener};
use quadlet::{notation, Graph, GraphConfig, GraphMaker, GraphView, Node, ReificationStyle, Triple};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Quadlet Triple Store v{}", quadlet::version());
    println!("==========================================");
    println!();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            println!("Loading configuration from {}", path);
            GraphConfig::from_file(&path)?
        }
        None => GraphConfig::default(),
    };
    println!("Configuration: {}", config.to_json()?);
    println!();

    // Demo 1: Pattern lookup
    demo_find(&config)?;

    // Demo 2: Reification styles
    demo_reification()?;

    // Demo 3: Events and transactions
    demo_events(&config)?;

    // Demo 4: Named graphs
    demo_maker(config)?;

    Ok(())
}

fn demo_find(config: &GraphConfig) -> anyhow::Result<()> {
    println!("=== Demo 1: Pattern Lookup ===");
    let mut graph = Graph::with_config(config.clone());
    graph.add_list(notation::triples(
        "alice knows bob; bob knows charlie; alice age 30; charlie age '30'xsd:short",
    )?)?;
    println!("✓ Loaded {} triples", graph.size());

    for pattern in ["alice ?? ??", "?? knows ??", "?? age 30"] {
        println!("\nfind {}", pattern);
        for triple in graph.find(&notation::triple(pattern)?) {
            println!("  {}", triple.to_string_with(graph.prefixes()));
        }
    }

    let subjects: Vec<String> = graph.list_subjects().iter().map(Node::to_string).collect();
    println!("\nSubjects: {}", subjects.join(", "));
    println!();
    Ok(())
}

fn demo_reification() -> anyhow::Result<()> {
    println!("=== Demo 2: Reification Styles ===");
    let statement = notation::triple("alice knows bob")?;

    for style in ReificationStyle::ALL {
        let mut graph = Graph::with_style(style);
        graph.add(statement.clone())?;
        let tag = graph.reify(statement.clone())?;
        println!(
            "{:<10} size {} (reifier holds {} quadlets, tag {})",
            style.name(),
            graph.size(),
            graph.reifier().quadlet_count(),
            tag
        );
        println!(
            "           hidden {}, visible quadlets {}",
            graph.reifier().hidden_triples().size(),
            graph
                .find(&Triple::new(tag.clone(), Node::Any, Node::Any))
                .count()
        );
    }
    println!();
    Ok(())
}

/// Counts the events it receives
#[derive(Default)]
struct Counter {
    adds: AtomicUsize,
    deletes: AtomicUsize,
}

impl GraphListener for Counter {
    fn on_event(&self, event: &GraphEvent) {
        if event.is_add() {
            self.adds.fetch_add(1, Ordering::SeqCst);
        } else if event.is_delete() {
            self.deletes.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn demo_events(config: &GraphConfig) -> anyhow::Result<()> {
    println!("=== Demo 3: Events and Transactions ===");
    let mut graph = Graph::with_config(config.clone());
    let counter = Arc::new(Counter::default());
    graph.event_manager().register(counter.clone());

    graph.add(notation::triple("a P b")?)?;
    graph.add_slice(&notation::triples("c P d; e P f")?)?;
    graph.delete(&notation::triple("a P b")?)?;
    println!(
        "✓ {} add events, {} delete events",
        counter.adds.load(Ordering::SeqCst),
        counter.deletes.load(Ordering::SeqCst)
    );

    if graph.transactions_supported() {
        graph.begin()?;
        graph.remove_all()?;
        println!("  inside transaction: size {}", graph.size());
        graph.abort()?;
        println!("  after abort: size {}", graph.size());
    }

    let mut copy = Graph::new();
    copy.add_graph(&graph, false)?;
    println!("  copy is isomorphic: {}", copy.is_isomorphic_with(&graph));
    println!();
    Ok(())
}

fn demo_maker(config: GraphConfig) -> anyhow::Result<()> {
    println!("=== Demo 4: Named Graphs ===");
    let mut maker = GraphMaker::new(config);
    maker
        .create_graph("people", true)?
        .add(notation::triple("alice knows bob")?)?;
    maker.create_graph("places", true)?;

    for name in maker.list_graphs() {
        let info = maker.graph_info(name)?;
        println!("  {}: {}", name, serde_json::to_string(&info)?);
    }
    maker.close();
    println!("✓ Maker closed");
    Ok(())
}
