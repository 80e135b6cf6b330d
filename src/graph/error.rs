//! Error taxonomy for graph construction and node queries.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge references a node outside the declared node universe.
    #[error("edge endpoint `{0}` is not a declared node")]
    UnknownNode(String),
    /// An edge starts and ends at the same node.
    #[error("self-loop at node `{0}`")]
    SelfLoop(String),
    /// The same ordered (from, to) pair appears more than once.
    #[error("duplicate edge `{from}` -> `{to}`")]
    DuplicateEdge { from: String, to: String },
    /// A gain query referenced a node the graph does not contain.
    #[error("node `{0}` does not exist in the graph")]
    NodeNotFound(String),
}
