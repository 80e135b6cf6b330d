//! model.rs
//! The immutable signal-flow-graph model: node partition, gain edges,
//! and the derived loop structure.
//!
//! Construction validates every edge, then eagerly enumerates the
//! elementary circuits, derives each loop gain, and caches the graph
//! determinant. Nothing mutates afterwards; a changed topology means
//! building a new graph.

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};

use crate::algebra::Expr;
use crate::analysis::{elementary_circuits, Cycle, NodeSeq, SimplePaths};
use crate::solver::cofactor::cofactor;

use super::error::GraphError;

#[derive(Debug, Clone)]
pub struct SignalFlowGraph {
    graph: DiGraph<String, Expr>,
    index: HashMap<String, NodeIndex>,
    sources: BTreeSet<String>,
    sinks: BTreeSet<String>,
    internal: BTreeSet<String>,
    cycles: Vec<Cycle>,
    determinant: Expr,
}

impl SignalFlowGraph {
    /// Builds a graph from its node partition and gain edges.
    ///
    /// The node universe is the union of the three partitions; a node
    /// may be declared both source and sink. Edge endpoints must be in
    /// the universe, self-loops are invalid, and at most one edge may
    /// connect an ordered node pair.
    pub fn new(
        sources: impl IntoIterator<Item = String>,
        sinks: impl IntoIterator<Item = String>,
        internal: impl IntoIterator<Item = String>,
        edges: impl IntoIterator<Item = (String, String, Expr)>,
    ) -> Result<Self, GraphError> {
        let sources: BTreeSet<String> = sources.into_iter().collect();
        let sinks: BTreeSet<String> = sinks.into_iter().collect();
        let internal: BTreeSet<String> = internal.into_iter().collect();

        // Node indices are assigned in partition order (sources, sinks,
        // internal; each set already sorted), so indices — and every
        // enumeration derived from them — are reproducible.
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();
        for name in sources.iter().chain(sinks.iter()).chain(internal.iter()) {
            if !index.contains_key(name) {
                index.insert(name.clone(), graph.add_node(name.clone()));
            }
        }

        for (from, to, gain) in edges {
            let from_ix = *index
                .get(&from)
                .ok_or_else(|| GraphError::UnknownNode(from.clone()))?;
            let to_ix = *index
                .get(&to)
                .ok_or_else(|| GraphError::UnknownNode(to.clone()))?;
            if from_ix == to_ix {
                return Err(GraphError::SelfLoop(from));
            }
            if graph.find_edge(from_ix, to_ix).is_some() {
                return Err(GraphError::DuplicateEdge { from, to });
            }
            graph.add_edge(from_ix, to_ix, gain);
        }

        let cycles: Vec<Cycle> = elementary_circuits(&graph)
            .into_iter()
            .map(|nodes| {
                let gain = gain_around(&graph, &nodes);
                Cycle::new(nodes, gain)
            })
            .collect();

        let all: Vec<&Cycle> = cycles.iter().collect();
        let determinant = cofactor(&all);

        Ok(Self { graph, index, sources, sinks, internal, cycles, determinant })
    }

    // --- Node partition ---

    pub fn sources(&self) -> &BTreeSet<String> {
        &self.sources
    }

    pub fn sinks(&self) -> &BTreeSet<String> {
        &self.sinks
    }

    pub fn internal_nodes(&self) -> &BTreeSet<String> {
        &self.internal
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    // --- Lookups ---

    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    pub fn node_name(&self, ix: NodeIndex) -> &str {
        &self.graph[ix]
    }

    /// Gain of the edge `from -> to`, if that edge exists.
    pub fn edge_gain(&self, from: &str, to: &str) -> Option<&Expr> {
        let from_ix = self.node_index(from)?;
        let to_ix = self.node_index(to)?;
        let edge = self.graph.find_edge(from_ix, to_ix)?;
        Some(&self.graph[edge])
    }

    // --- Derived structure ---

    /// Every elementary circuit, in canonical form and stable order.
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    /// Loop gain of the circuit through `nodes`, looked up by canonical
    /// cycle identity — any rotation of the same directed circuit finds
    /// the same entry.
    pub fn cycle_gain(&self, nodes: &[&str]) -> Option<&Expr> {
        let mut seq: NodeSeq = nodes
            .iter()
            .map(|name| self.node_index(name))
            .collect::<Option<_>>()?;
        let min_pos = seq
            .iter()
            .enumerate()
            .min_by_key(|(_, ix)| **ix)
            .map(|(pos, _)| pos)?;
        seq.rotate_left(min_pos);
        self.cycles
            .iter()
            .find(|cycle| cycle.nodes() == &seq[..])
            .map(|cycle| cycle.gain())
    }

    /// The graph determinant Δ, computed once at construction.
    pub fn determinant(&self) -> &Expr {
        &self.determinant
    }

    /// Lazy enumeration of simple paths between two nodes.
    pub fn simple_paths(&self, from: NodeIndex, to: NodeIndex) -> SimplePaths<'_, String, Expr> {
        SimplePaths::new(&self.graph, from, to)
    }

    /// Product of the edge gains along a path of adjacent nodes.
    pub(crate) fn path_gain(&self, nodes: &[NodeIndex]) -> Expr {
        nodes.windows(2).fold(Expr::one(), |acc, pair| {
            acc * edge_expr(&self.graph, pair[0], pair[1]).clone()
        })
    }
}

/// Product of the edge gains around a circuit, including the closing edge.
fn gain_around(graph: &DiGraph<String, Expr>, nodes: &[NodeIndex]) -> Expr {
    let mut gain = Expr::one();
    for i in 0..nodes.len() {
        let from = nodes[i];
        let to = nodes[(i + 1) % nodes.len()];
        gain = gain * edge_expr(graph, from, to).clone();
    }
    gain
}

fn edge_expr(graph: &DiGraph<String, Expr>, from: NodeIndex, to: NodeIndex) -> &Expr {
    // Cycle and path traversals only ever walk edges of this graph.
    let edge = graph
        .find_edge(from, to)
        .expect("traversal follows existing edges");
    &graph[edge]
}
