//! Header identity registry for HeaderScope.
//!
//! Every physical header file observed during an analysis run gets exactly
//! one node in the registry, addressed through a cheap copyable handle.
//! The registry also owns the internal-header resolution: an include edge
//! can classify the included header as a private implementation detail of
//! its includer, and chains of such links are collapsed with path
//! compression so that resolving any header to its public root stays cheap.

pub mod headers;

// Re-export commonly used types for convenience
pub use headers::{Header, HeaderId, HeaderRegistry, ResolveError, ResolveResult};
