//! Event front end for HeaderScope.
//!
//! This module drives the analysis: it parses the translation unit and
//! every reachable header with tree-sitter, resolves include directives
//! against the header search path, and feeds include events and symbol-use
//! events into the analysis session in discovery order. The session never
//! touches the filesystem or the parser; everything path- and
//! syntax-related ends here.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use headerscope::analysis::AnalysisSession;
//! use headerscope::frontend::{Collector, HeaderSearchPath};
//!
//! let main = Path::new("src/main.cpp").canonicalize()?;
//! let search = HeaderSearchPath::new(vec!["include".into()]);
//!
//! let mut session = AnalysisSession::new(&main);
//! Collector::new(search)?.run(&mut session)?;
//!
//! let report = session.finish();
//! print!("{report}");
//! ```

pub mod collector;
pub mod search;

// Re-export main types for convenience
pub use collector::{Collector, CollectError, CollectResult};
pub use search::HeaderSearchPath;
