//! Symbolic transfer-function solver for signal-flow graphs.
//!
//! Builds an immutable directed gain graph whose edges carry exact
//! rational expressions in named variables, eagerly derives its loop
//! structure, and evaluates Mason's gain formula in closed form:
//!
//! ```text
//! gain(source -> sink) = Σ_paths (path gain · Δ_path) / Δ
//! ```
//!
//! # Example
//!
//! ```
//! use sfg_core::{GainSolver, GraphSpec};
//!
//! let spec = GraphSpec::from_json_str(r#"{
//!     "sources": ["in"],
//!     "sinks":   ["out"],
//!     "nodes":   ["m"],
//!     "edges": [
//!         { "from": "in",  "to": "m",   "gain": "a" },
//!         { "from": "m",   "to": "out", "gain": "b" },
//!         { "from": "m",   "to": "in",  "gain": "c" }
//!     ]
//! }"#).unwrap();
//!
//! let graph = spec.build().unwrap();
//! let gain = GainSolver::new(&graph).find_graph_gain("in", "out").unwrap();
//! assert_eq!(gain, sfg_core::parse_expr("a*b / (1 - a*c)").unwrap());
//! ```

pub mod algebra;
pub mod analysis;
pub mod config;
pub mod graph;
pub mod solver;

// Re-export the public surface at the crate root
pub use crate::algebra::{parse_expr, AlgebraError, Expr, ParseError};
pub use crate::analysis::{Cycle, SimplePaths};
pub use crate::config::{ConfigError, DuplicateEdgePolicy, EdgeSpec, GraphSpec};
pub use crate::graph::{GraphError, SignalFlowGraph};
pub use crate::solver::{GainSolver, SolverError};
