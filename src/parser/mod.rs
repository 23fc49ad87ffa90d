//! Parser module for HeaderScope.
//!
//! This module reads compilation databases (`compile_commands.json`, the
//! format emitted by CMake, Bear, and most other build tooling) to recover
//! the include search path for the translation unit under analysis.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use headerscope::parser::{compile_commands, find_for_file};
//!
//! let commands = compile_commands::parse_file(Path::new("compile_commands.json")).unwrap();
//! if let Some(entry) = find_for_file(&commands, Path::new("/proj/src/main.cpp")) {
//!     for dir in entry.include_dirs() {
//!         println!("-I {}", dir.display());
//!     }
//! }
//! ```

pub mod compile_commands;
pub mod types;

// Re-export commonly used types for convenience
pub use compile_commands::{find_for_file, parse_file, parse_str, validate, ParseError, ParseResult};
pub use types::CompileCommand;
