//! Textual graph specifications.
//!
//! The core never reads files or parses markup itself; this module is
//! the inbound boundary that turns a JSON document into a validated
//! [`SignalFlowGraph`]. The document shape mirrors the node partition
//! directly:
//!
//! ```json
//! {
//!   "sources": ["φ_ref"],
//!   "sinks":   ["φ_out"],
//!   "nodes":   ["φ_err", "v_ctl"],
//!   "edges":   [ { "from": "φ_ref", "to": "φ_err", "gain": "K_d" } ],
//!   "on_duplicate": "reject"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algebra::{parse_expr, Expr, ParseError};
use crate::graph::{GraphError, SignalFlowGraph};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read graph specification: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed graph specification: {0}")]
    Json(#[from] serde_json::Error),
    #[error("edge `{from}` -> `{to}`: {source}")]
    Gain {
        from: String,
        to: String,
        source: ParseError,
    },
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// What to do when the same ordered (from, to) pair appears twice.
///
/// The underlying graph supports one edge per ordered pair, so repeated
/// pairs must be resolved before construction. `Reject` surfaces the
/// repetition as an error; `Overwrite` keeps the last occurrence; `Sum`
/// adds the gains, the way parallel branches combine in a signal-flow
/// graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateEdgePolicy {
    #[default]
    Reject,
    Overwrite,
    Sum,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub gain: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSpec {
    pub sources: Vec<String>,
    pub sinks: Vec<String>,
    /// Internal nodes. Optional: a graph may consist of sources and
    /// sinks only.
    #[serde(default)]
    pub nodes: Vec<String>,
    pub edges: Vec<EdgeSpec>,
    #[serde(default)]
    pub on_duplicate: DuplicateEdgePolicy,
}

impl GraphSpec {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parses every gain expression, applies the duplicate-edge policy,
    /// and constructs the graph.
    pub fn build(&self) -> Result<SignalFlowGraph, ConfigError> {
        let mut merged: Vec<(String, String, Expr)> = Vec::new();
        for edge in &self.edges {
            let gain = parse_expr(&edge.gain).map_err(|source| ConfigError::Gain {
                from: edge.from.clone(),
                to: edge.to.clone(),
                source,
            })?;
            let existing = merged
                .iter_mut()
                .find(|(from, to, _)| from == &edge.from && to == &edge.to);
            match (existing, self.on_duplicate) {
                // First occurrence, or Reject: pass through and let the
                // graph constructor report the duplicate.
                (None, _) | (Some(_), DuplicateEdgePolicy::Reject) => {
                    merged.push((edge.from.clone(), edge.to.clone(), gain));
                }
                (Some(slot), DuplicateEdgePolicy::Overwrite) => {
                    slot.2 = gain;
                }
                (Some(slot), DuplicateEdgePolicy::Sum) => {
                    slot.2 = slot.2.clone() + gain;
                }
            }
        }
        Ok(SignalFlowGraph::new(
            self.sources.iter().cloned(),
            self.sinks.iter().cloned(),
            self.nodes.iter().cloned(),
            merged,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::parse_expr;
    use crate::solver::GainSolver;
    use std::io::Write;

    const PLL: &str = r#"{
        "sources": ["φ_ref"],
        "sinks":   ["φ_out"],
        "nodes":   ["φ_err", "v_ctl"],
        "edges": [
            { "from": "φ_ref", "to": "φ_err", "gain": "K_d" },
            { "from": "φ_out", "to": "φ_err", "gain": "-K_d" },
            { "from": "φ_err", "to": "v_ctl", "gain": "F" },
            { "from": "v_ctl", "to": "φ_out", "gain": "K_o/s" }
        ]
    }"#;

    #[test]
    fn test_pll_loop_end_to_end() {
        let graph = GraphSpec::from_json_str(PLL).unwrap().build().unwrap();
        let solver = GainSolver::new(&graph);

        let gain = solver.find_graph_gain("φ_ref", "φ_out").unwrap();
        let expected =
            parse_expr("(K_d*F*K_o/s) / (1 + K_d*F*K_o/s)").unwrap();
        assert_eq!(gain, expected);

        // Single source: the aggregate is the pairwise gain weighted by
        // the source variable.
        let aggregate = solver.find_graph_gain_to("φ_out").unwrap();
        assert_eq!(aggregate, gain * Expr::var("φ_ref"));
    }

    #[test]
    fn test_round_trip_through_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PLL.as_bytes()).unwrap();

        let from_file = GraphSpec::from_path(file.path()).unwrap();
        let from_str = GraphSpec::from_json_str(PLL).unwrap();
        assert_eq!(from_file, from_str);
        assert!(from_file.build().is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GraphSpec::from_path("/nonexistent/graph.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_malformed_gain_names_the_edge() {
        let spec = GraphSpec {
            sources: vec!["a".into()],
            sinks: vec!["b".into()],
            nodes: vec![],
            edges: vec![EdgeSpec {
                from: "a".into(),
                to: "b".into(),
                gain: "2x +".into(),
            }],
            on_duplicate: DuplicateEdgePolicy::default(),
        };
        let err = spec.build().unwrap_err();
        match err {
            ConfigError::Gain { from, to, .. } => {
                assert_eq!(from, "a");
                assert_eq!(to, "b");
            }
            other => panic!("expected gain error, got {other:?}"),
        }
    }

    fn parallel_edges(policy: DuplicateEdgePolicy) -> GraphSpec {
        GraphSpec {
            sources: vec!["in".into()],
            sinks: vec!["out".into()],
            nodes: vec![],
            edges: vec![
                EdgeSpec { from: "in".into(), to: "out".into(), gain: "a".into() },
                EdgeSpec { from: "in".into(), to: "out".into(), gain: "b".into() },
            ],
            on_duplicate: policy,
        }
    }

    #[test]
    fn test_duplicate_policy_reject() {
        let err = parallel_edges(DuplicateEdgePolicy::Reject)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Graph(GraphError::DuplicateEdge { .. })
        ));
    }

    #[test]
    fn test_duplicate_policy_overwrite_keeps_last() {
        let graph = parallel_edges(DuplicateEdgePolicy::Overwrite)
            .build()
            .unwrap();
        let gain = GainSolver::new(&graph).find_graph_gain("in", "out").unwrap();
        assert_eq!(gain, Expr::var("b"));
    }

    #[test]
    fn test_duplicate_policy_sum_combines_branches() {
        let graph = parallel_edges(DuplicateEdgePolicy::Sum).build().unwrap();
        let gain = GainSolver::new(&graph).find_graph_gain("in", "out").unwrap();
        assert_eq!(gain, Expr::var("a") + Expr::var("b"));
    }

    #[test]
    fn test_default_policy_is_reject() {
        let spec: GraphSpec = serde_json::from_str(
            r#"{ "sources": ["a"], "sinks": ["b"], "edges": [] }"#,
        )
        .unwrap();
        assert_eq!(spec.on_duplicate, DuplicateEdgePolicy::Reject);
    }
}
