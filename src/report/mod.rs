//! Final analysis report for one translation unit.
//!
//! The report is the session's only product: the headers to add, with the
//! symbols that justify each one, and the headers to remove. It renders
//! itself for the console via `Display` and is consumed as plain data by
//! the exporters in [`crate::export`].

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// A header the main file should include, with the evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingInclude {
    /// The header to add, in its include-directive spelling when known.
    pub header: PathBuf,
    /// Sorted, distinct names of the symbols used from this header.
    pub symbols: Vec<String>,
}

/// The result of analyzing one translation unit.
///
/// Both lists are in lexicographic path order; see the session's
/// finalization for the exact rules.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// The file that was analyzed.
    pub main_file: PathBuf,
    /// Number of distinct headers observed during the traversal.
    pub headers_seen: usize,
    /// Number of headers the main file includes directly.
    pub direct_include_count: usize,
    /// Headers that are used but not directly included.
    pub missing: Vec<MissingInclude>,
    /// Headers that are directly included but never used.
    pub redundant: Vec<PathBuf>,
}

impl AnalysisReport {
    /// Returns true if the translation unit needs no include changes.
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.redundant.is_empty()
    }

    /// Number of headers to add.
    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }

    /// Number of headers to remove.
    pub fn redundant_count(&self) -> usize {
        self.redundant.len()
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return writeln!(
                f,
                "{}: includes are consistent with usage",
                self.main_file.display()
            );
        }

        if !self.missing.is_empty() {
            writeln!(f, "Please add the following headers:")?;
            for entry in &self.missing {
                writeln!(f, "  {}", entry.header.display())?;
                writeln!(f, "      {}", entry.symbols.join(", "))?;
            }
        }

        if !self.redundant.is_empty() {
            if !self.missing.is_empty() {
                writeln!(f)?;
            }
            writeln!(f, "Please remove the following headers:")?;
            for header in &self.redundant {
                writeln!(f, "  {}", header.display())?;
            }
        }

        Ok(())
    }
}
