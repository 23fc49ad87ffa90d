//! Export functionality for include analysis results.
//!
//! This module provides exporters for outputting the final report in
//! various formats: JSON, CSV, and Markdown.

pub mod csv;
pub mod json;
pub mod markdown;

use crate::report::AnalysisReport;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON format - machine-readable, full data
    Json,
    /// CSV format - spreadsheet-friendly
    Csv,
    /// Markdown format - documentation/reporting
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, csv, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the report to the given writer.
    fn export<W: Write>(&self, report: &AnalysisReport, writer: &mut W) -> io::Result<()>;
}

/// Export the report in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    report: &AnalysisReport,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(report, writer),
        ExportFormat::Csv => csv::CsvExporter.export(report, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export(report, writer),
    }
}

/// Export the report to a string.
pub fn export_to_string(format: ExportFormat, report: &AnalysisReport) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, report, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::report::{AnalysisReport, MissingInclude};
    use std::path::PathBuf;

    pub fn sample_report() -> AnalysisReport {
        AnalysisReport {
            main_file: PathBuf::from("/proj/src/main.cpp"),
            headers_seen: 5,
            direct_include_count: 2,
            missing: vec![
                MissingInclude {
                    header: PathBuf::from("api.h"),
                    symbols: vec!["api_init".to_string(), "api_shutdown".to_string()],
                },
                MissingInclude {
                    header: PathBuf::from("widget.h"),
                    symbols: vec!["draw".to_string()],
                },
            ],
            redundant: vec![PathBuf::from("unused.h")],
        }
    }

    pub fn clean_report() -> AnalysisReport {
        AnalysisReport {
            main_file: PathBuf::from("/proj/src/main.cpp"),
            headers_seen: 1,
            direct_include_count: 1,
            missing: vec![],
            redundant: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!(
            "markdown".parse::<ExportFormat>().unwrap(),
            ExportFormat::Markdown
        );
        assert_eq!(
            "md".parse::<ExportFormat>().unwrap(),
            ExportFormat::Markdown
        );
        assert!("invalid".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_format_display() {
        assert_eq!(format!("{}", ExportFormat::Json), "json");
        assert_eq!(format!("{}", ExportFormat::Csv), "csv");
        assert_eq!(format!("{}", ExportFormat::Markdown), "markdown");
    }

    #[test]
    fn test_export_to_string_dispatches() {
        let report = test_support::sample_report();

        let json = export_to_string(ExportFormat::Json, &report).unwrap();
        assert!(json.trim_start().starts_with('{'));

        let csv = export_to_string(ExportFormat::Csv, &report).unwrap();
        assert!(csv.starts_with("kind,header,symbols"));

        let markdown = export_to_string(ExportFormat::Markdown, &report).unwrap();
        assert!(markdown.starts_with("# Include Analysis Report"));
    }
}
