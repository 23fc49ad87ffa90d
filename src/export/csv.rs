//! CSV export implementation.
//!
//! Exports include analysis results in CSV format for spreadsheet use.

use super::Exporter;
use crate::report::AnalysisReport;
use std::io::{self, Write};

/// CSV exporter implementation.
pub struct CsvExporter;

impl CsvExporter {
    /// Escape a field value for CSV format.
    ///
    /// Wraps the value in quotes if it contains commas, quotes, or newlines.
    fn escape_field(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl Exporter for CsvExporter {
    fn export<W: Write>(&self, report: &AnalysisReport, writer: &mut W) -> io::Result<()> {
        // Write header
        writeln!(writer, "kind,header,symbols")?;

        // One row per finding; symbols are semicolon-joined inside one field.
        for entry in &report.missing {
            writeln!(
                writer,
                "missing,{},{}",
                Self::escape_field(&entry.header.display().to_string()),
                Self::escape_field(&entry.symbols.join("; "))
            )?;
        }

        for header in &report.redundant {
            writeln!(
                writer,
                "redundant,{},",
                Self::escape_field(&header.display().to_string())
            )?;
        }

        Ok(())
    }
}
