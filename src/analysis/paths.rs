//! paths.rs
//! Lazy enumeration of simple paths between two nodes.

use petgraph::graph::{DiGraph, NodeIndex};
use smallvec::SmallVec;

use super::cycles::NodeSeq;

/// Iterator over every simple path (no repeated node) from `from` to
/// `to`, yielded as node sequences.
///
/// The walk is an explicit-stack DFS holding only an immutable borrow of
/// the graph; constructing a new iterator restarts it from scratch.
/// Successors are visited in sorted order, so the yield order is stable.
/// When `from == to` nothing is yielded — a simple path cannot revisit
/// its start.
pub struct SimplePaths<'a, N, E> {
    graph: &'a DiGraph<N, E>,
    to: NodeIndex,
    // One frame per node on the current path: (node, successors not yet tried).
    stack: Vec<(NodeIndex, Vec<NodeIndex>)>,
    path: NodeSeq,
    on_path: Vec<bool>,
}

impl<'a, N, E> SimplePaths<'a, N, E> {
    pub fn new(graph: &'a DiGraph<N, E>, from: NodeIndex, to: NodeIndex) -> Self {
        let mut paths = Self {
            graph,
            to,
            stack: Vec::new(),
            path: SmallVec::new(),
            on_path: vec![false; graph.node_count()],
        };
        if from != to && from.index() < graph.node_count() {
            paths.path.push(from);
            paths.on_path[from.index()] = true;
            let successors = paths.successors(from);
            paths.stack.push((from, successors));
        }
        paths
    }

    fn successors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut next: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        // Descending, because frames pop from the back.
        next.sort_unstable_by(|a, b| b.cmp(a));
        next
    }
}

impl<'a, N, E> Iterator for SimplePaths<'a, N, E> {
    type Item = NodeSeq;

    fn next(&mut self) -> Option<NodeSeq> {
        loop {
            let frame = self.stack.last_mut()?;
            match frame.1.pop() {
                Some(next) if next == self.to => {
                    // The target never joins the path, so it can only
                    // ever appear as the terminal node.
                    let mut found = self.path.clone();
                    found.push(next);
                    return Some(found);
                }
                Some(next) => {
                    if !self.on_path[next.index()] {
                        self.path.push(next);
                        self.on_path[next.index()] = true;
                        let successors = self.successors(next);
                        self.stack.push((next, successors));
                    }
                }
                None => {
                    if let Some((node, _)) = self.stack.pop() {
                        self.path.pop();
                        self.on_path[node.index()] = false;
                    }
                }
            }
        }
    }
}
