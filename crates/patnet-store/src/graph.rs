//! In-memory collaboration multigraph

use patnet_domain::collaboration::cycle_pairs;
use patnet_domain::{Category, Entity};
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::{BTreeMap, HashMap};

/// Default graph name
pub const DEFAULT_GRAPH_NAME: &str = "EPO Collaboration Graph";

/// Undirected multigraph of companies linked by joint filings
///
/// Nodes are canonical company names, edges carry a classification label.
/// Parallel edges between the same pair are kept, one per publication.
/// Node and edge order is insertion order; the only removal is
/// [`Self::truncate`], which drops the newest entries.
#[derive(Debug, Clone)]
pub struct CollaborationGraph {
    name: String,
    graph: UnGraph<String, String>,
    index: HashMap<String, NodeIndex>,
}

impl CollaborationGraph {
    /// Create an empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: UnGraph::default(),
            index: HashMap::new(),
        }
    }

    /// Graph name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the graph
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Add a node if absent; returns its index either way
    pub fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Whether a node with this exact name exists
    pub fn contains_node(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Add one labeled edge, creating missing endpoints
    pub fn add_edge(&mut self, a: &str, b: &str, label: impl Into<String>) {
        let a = self.ensure_node(a);
        let b = self.ensure_node(b);
        self.graph.add_edge(a, b, label.into());
    }

    /// Record a joint filing between `entities`, labeled with `category`
    ///
    /// Every entity becomes a node. Two entities get one edge, more than two
    /// get a cycle of N edges in the given order, fewer than two get none.
    /// Returns the number of edges added.
    pub fn apply_collaboration(&mut self, entities: &[Entity], category: Category) -> usize {
        let nodes: Vec<NodeIndex> = entities.iter().map(|e| self.ensure_node(e.as_str())).collect();

        // All endpoints exist before the first edge goes in
        let pairs = cycle_pairs(nodes.len());
        let label = category.label();
        for &(a, b) in &pairs {
            self.graph.add_edge(nodes[a], nodes[b], label.clone());
        }
        pairs.len()
    }

    /// Drop the newest edges and nodes until at most `nodes` nodes and
    /// `edges` edges remain
    ///
    /// Removal always takes the last index, so the surviving entries keep
    /// their insertion order.
    pub fn truncate(&mut self, nodes: usize, edges: usize) {
        while self.graph.edge_count() > edges {
            let last = EdgeIndex::new(self.graph.edge_count() - 1);
            self.graph.remove_edge(last);
        }
        while self.graph.node_count() > nodes {
            let last = NodeIndex::new(self.graph.node_count() - 1);
            if let Some(name) = self.graph.remove_node(last) {
                self.index.remove(&name);
            }
        }
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges (parallel edges counted separately)
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Node names in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(move |idx| self.graph[idx].as_str())
    }

    /// Edges as `(a, b, label)` in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.graph.edge_references().map(move |edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
                edge.weight().as_str(),
            )
        })
    }

    /// Edges as position pairs into [`Self::nodes`], with labels
    pub(crate) fn indexed_edges(&self) -> impl Iterator<Item = (usize, usize, &str)> {
        self.graph
            .edge_references()
            .map(|edge| (edge.source().index(), edge.target().index(), edge.weight().as_str()))
    }

    /// Order-independent view of the edges: unordered pair plus label, with multiplicity
    pub fn edge_multiset(&self) -> BTreeMap<(String, String, String), usize> {
        let mut multiset = BTreeMap::new();
        for (a, b, label) in self.edges() {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            *multiset
                .entry((lo.to_string(), hi.to_string(), label.to_string()))
                .or_insert(0) += 1;
        }
        multiset
    }

    /// Number of edges between two nodes, any label
    pub fn edges_between(&self, a: &str, b: &str) -> usize {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&a), Some(&b)) => self.graph.edges_connecting(a, b).count(),
            _ => 0,
        }
    }

    /// Number of incident edges of a node
    pub fn degree(&self, name: &str) -> usize {
        self.index
            .get(name)
            .map(|&idx| self.graph.edges(idx).count())
            .unwrap_or(0)
    }

    /// Edge counts per label
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for edge in self.graph.edge_references() {
            *counts.entry(edge.weight().clone()).or_insert(0) += 1;
        }
        counts
    }
}

impl Default for CollaborationGraph {
    fn default() -> Self {
        Self::new(DEFAULT_GRAPH_NAME)
    }
}
