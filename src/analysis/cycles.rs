//! cycles.rs
//! Elementary-circuit enumeration over the directed gain graph.

use petgraph::graph::{DiGraph, NodeIndex};
use smallvec::SmallVec;

use crate::algebra::Expr;

/// Node sequence of a cycle or path. Practical signal-flow graphs keep
/// these short, so they live inline.
pub type NodeSeq = SmallVec<[NodeIndex; 8]>;

/// An elementary circuit together with its derived loop gain.
///
/// The node sequence is canonical: it starts at the circuit's smallest
/// node index, which identifies the circuit by its edge set — two
/// traversals of the same directed circuit always canonicalize to the
/// same sequence.
#[derive(Debug, Clone)]
pub struct Cycle {
    nodes: NodeSeq,
    gain: Expr,
}

impl Cycle {
    pub(crate) fn new(nodes: NodeSeq, gain: Expr) -> Self {
        Self { nodes, gain }
    }

    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    pub fn gain(&self) -> &Expr {
        &self.gain
    }

    /// True when this cycle shares at least one node with `nodes`.
    pub fn touches(&self, nodes: &[NodeIndex]) -> bool {
        self.nodes.iter().any(|n| nodes.contains(n))
    }
}

/// Enumerates every elementary circuit of `graph` exactly once.
///
/// Anchored DFS: for each anchor node in index order, search only over
/// nodes with a strictly larger index, never revisiting a node on the
/// current path; an edge back to the anchor closes a circuit. Every
/// elementary circuit has a unique smallest node, so each circuit is
/// reported once, already rotated to its canonical form. Successors are
/// visited in sorted order, making the output order stable across runs.
pub fn elementary_circuits<N, E>(graph: &DiGraph<N, E>) -> Vec<NodeSeq> {
    let mut circuits = Vec::new();
    let mut path: NodeSeq = SmallVec::new();
    let mut on_path = vec![false; graph.node_count()];

    for anchor in graph.node_indices() {
        path.push(anchor);
        on_path[anchor.index()] = true;
        search(graph, anchor, anchor, &mut path, &mut on_path, &mut circuits);
        on_path[anchor.index()] = false;
        path.pop();
    }
    circuits
}

fn search<N, E>(
    graph: &DiGraph<N, E>,
    anchor: NodeIndex,
    current: NodeIndex,
    path: &mut NodeSeq,
    on_path: &mut [bool],
    out: &mut Vec<NodeSeq>,
) {
    let mut targets: Vec<NodeIndex> = graph.neighbors(current).collect();
    targets.sort_unstable();

    for next in targets {
        if next == anchor {
            // Closing edge; self-loops cannot occur (rejected at
            // construction), so the path has at least two nodes here.
            out.push(path.clone());
        } else if next.index() > anchor.index() && !on_path[next.index()] {
            path.push(next);
            on_path[next.index()] = true;
            search(graph, anchor, next, path, on_path, out);
            on_path[next.index()] = false;
            path.pop();
        }
    }
}
