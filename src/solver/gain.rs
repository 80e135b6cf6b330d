//! gain.rs
//! Mason's gain formula over the immutable graph model.

use thiserror::Error;

use crate::algebra::{AlgebraError, Expr};
use crate::analysis::Cycle;
use crate::graph::{GraphError, SignalFlowGraph};

use super::cofactor::cofactor;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Algebra(#[from] AlgebraError),
}

/// Evaluates transfer gains against a borrowed graph.
///
/// The graph is immutable, so a solver is free to be shared or rebuilt
/// at will; every query is pure and reads only cached construction-time
/// data plus the lazy path enumeration.
pub struct GainSolver<'a> {
    graph: &'a SignalFlowGraph,
}

impl<'a> GainSolver<'a> {
    pub fn new(graph: &'a SignalFlowGraph) -> Self {
        Self { graph }
    }

    /// Transfer gain from `from` to `to`:
    ///
    /// ```text
    /// gain = Σ_paths (path gain · Δ_path) / Δ
    /// ```
    ///
    /// where `Δ_path` is the determinant of the cycles node-disjoint
    /// from the path. No paths means the zero expression.
    pub fn find_graph_gain(&self, from: &str, to: &str) -> Result<Expr, SolverError> {
        let from_ix = self
            .graph
            .node_index(from)
            .ok_or_else(|| GraphError::NodeNotFound(from.to_string()))?;
        let to_ix = self
            .graph
            .node_index(to)
            .ok_or_else(|| GraphError::NodeNotFound(to.to_string()))?;

        let mut numerator = Expr::zero();
        for path in self.graph.simple_paths(from_ix, to_ix) {
            let nontouching: Vec<&Cycle> = self
                .graph
                .cycles()
                .iter()
                .filter(|cycle| !cycle.touches(&path))
                .collect();
            numerator = numerator + self.graph.path_gain(&path) * cofactor(&nontouching);
        }

        Ok(numerator.try_div(self.graph.determinant())?)
    }

    /// Aggregate gain into `to` from every declared source, each weighted
    /// by a variable named after the source:
    ///
    /// ```text
    /// Σ_s gain(s -> to) · s
    /// ```
    ///
    /// An empty source set yields the zero expression.
    pub fn find_graph_gain_to(&self, to: &str) -> Result<Expr, SolverError> {
        let mut total = Expr::zero();
        for source in self.graph.sources() {
            total = total + self.find_graph_gain(source, to)? * Expr::var(source);
        }
        Ok(total)
    }
}
