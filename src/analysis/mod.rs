//! Analysis session module for HeaderScope.
//!
//! The session is the single owner of all per-run state: the header
//! registry, the include graph, the main file's direct-include set, and the
//! usage map. The front end feeds it two event streams — include directives
//! and symbol uses — in discovery order; once the streams are exhausted the
//! session is consumed to produce the final report.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use headerscope::analysis::AnalysisSession;
//!
//! let main = Path::new("/proj/src/main.cpp");
//! let widget = Path::new("/proj/lib/widget.h");
//!
//! let mut session = AnalysisSession::new(main);
//! session.on_include(main, widget, Some(Path::new("widget.h"))).unwrap();
//! session.on_symbol_use(main, widget, "draw").unwrap();
//!
//! let report = session.finish();
//! assert!(report.missing.is_empty());
//! assert!(report.redundant.is_empty());
//! ```

pub mod session;
pub mod usage;

// Re-export main types for convenience
pub use session::{AnalysisSession, SessionError, SessionResult};
pub use usage::UsageMap;
