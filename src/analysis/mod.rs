//! Derived graph structure: elementary circuits and simple paths.
pub mod cycles;
pub mod paths;

// Re-export key types for convenient access
pub use cycles::{elementary_circuits, Cycle, NodeSeq};
pub use paths::SimplePaths;
