//! Markdown export implementation.
//!
//! Exports include analysis results in Markdown format for documentation
//! and reporting.

use super::Exporter;
use crate::report::AnalysisReport;
use std::io::{self, Write};

/// Markdown exporter implementation.
pub struct MarkdownExporter;

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, report: &AnalysisReport, writer: &mut W) -> io::Result<()> {
        // Title
        writeln!(writer, "# Include Analysis Report")?;
        writeln!(writer)?;
        writeln!(
            writer,
            "**Translation unit:** `{}`",
            report.main_file.display()
        )?;
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Headers Seen | {} |", report.headers_seen)?;
        writeln!(
            writer,
            "| Direct Includes | {} |",
            report.direct_include_count
        )?;
        writeln!(writer, "| Missing Includes | {} |", report.missing_count())?;
        writeln!(
            writer,
            "| Redundant Includes | {} |",
            report.redundant_count()
        )?;
        writeln!(writer)?;

        if report.is_clean() {
            writeln!(writer, "Includes are consistent with usage.")?;
            return Ok(());
        }

        // Missing includes
        if !report.missing.is_empty() {
            writeln!(writer, "## Missing Includes ({})", report.missing_count())?;
            writeln!(writer)?;
            writeln!(writer, "| Header | Symbols Used |")?;
            writeln!(writer, "|--------|--------------|")?;
            for entry in &report.missing {
                writeln!(
                    writer,
                    "| `{}` | {} |",
                    entry.header.display(),
                    entry.symbols.join(", ")
                )?;
            }
            writeln!(writer)?;
        }

        // Redundant includes
        if !report.redundant.is_empty() {
            writeln!(
                writer,
                "## Redundant Includes ({})",
                report.redundant_count()
            )?;
            writeln!(writer)?;
            for header in &report.redundant {
                writeln!(writer, "- `{}`", header.display())?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::{clean_report, sample_report};

    #[test]
    fn test_markdown_export_sections() {
        let report = sample_report();
        let mut output = Vec::new();

        MarkdownExporter.export(&report, &mut output).unwrap();

        let markdown = String::from_utf8(output).unwrap();

        assert!(markdown.starts_with("# Include Analysis Report"));
        assert!(markdown.contains("**Translation unit:** `/proj/src/main.cpp`"));
        assert!(markdown.contains("## Summary"));
        assert!(markdown.contains("| Headers Seen | 5 |"));
        assert!(markdown.contains("## Missing Includes (2)"));
        assert!(markdown.contains("| `api.h` | api_init, api_shutdown |"));
        assert!(markdown.contains("## Redundant Includes (1)"));
        assert!(markdown.contains("- `unused.h`"));
    }

    #[test]
    fn test_markdown_export_clean() {
        let report = clean_report();
        let mut output = Vec::new();

        MarkdownExporter.export(&report, &mut output).unwrap();

        let markdown = String::from_utf8(output).unwrap();

        assert!(markdown.contains("Includes are consistent with usage."));
        assert!(!markdown.contains("## Missing Includes"));
        assert!(!markdown.contains("## Redundant Includes"));
    }
}
