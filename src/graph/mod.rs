//! Include graph module for HeaderScope.
//!
//! Models the full include relation of a translation unit as a directed
//! multigraph: one node per file, one edge per include directive, in
//! discovery order. Supports cycle detection for include chains that loop
//! through guarded headers.

pub mod include_graph;

// Re-export commonly used types for convenience
pub use include_graph::{CycleInfo, IncludeDirective, IncludeGraph, IncludeNode};
