//! JSON export implementation.
//!
//! Exports include analysis results in JSON format for machine-readable output.

use super::Exporter;
use crate::report::AnalysisReport;
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable missing-include entry for JSON output.
#[derive(Serialize)]
struct JsonMissing {
    header: String,
    symbols: Vec<String>,
}

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    headers_seen: usize,
    direct_includes: usize,
    missing_includes: usize,
    redundant_includes: usize,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport {
    main_file: String,
    summary: JsonSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    missing_includes: Vec<JsonMissing>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    redundant_includes: Vec<String>,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, report: &AnalysisReport, writer: &mut W) -> io::Result<()> {
        let missing_includes: Vec<JsonMissing> = report
            .missing
            .iter()
            .map(|entry| JsonMissing {
                header: entry.header.display().to_string(),
                symbols: entry.symbols.clone(),
            })
            .collect();

        let redundant_includes: Vec<String> = report
            .redundant
            .iter()
            .map(|header| header.display().to_string())
            .collect();

        let export = JsonExport {
            main_file: report.main_file.display().to_string(),
            summary: JsonSummary {
                headers_seen: report.headers_seen,
                direct_includes: report.direct_include_count,
                missing_includes: report.missing_count(),
                redundant_includes: report.redundant_count(),
            },
            missing_includes,
            redundant_includes,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::{clean_report, sample_report};

    #[test]
    fn test_json_export_basic() {
        let report = sample_report();
        let mut output = Vec::new();

        JsonExporter.export(&report, &mut output).unwrap();

        let json_str = String::from_utf8(output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json_str).unwrap();

        assert_eq!(parsed["main_file"], "/proj/src/main.cpp");
        assert_eq!(parsed["summary"]["headers_seen"], 5);
        assert_eq!(parsed["summary"]["direct_includes"], 2);
        assert_eq!(parsed["summary"]["missing_includes"], 2);
        assert_eq!(parsed["summary"]["redundant_includes"], 1);
    }

    #[test]
    fn test_json_export_missing_entries() {
        let report = sample_report();
        let mut output = Vec::new();

        JsonExporter.export(&report, &mut output).unwrap();

        let json_str = String::from_utf8(output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json_str).unwrap();

        let missing = parsed["missing_includes"].as_array().unwrap();
        assert_eq!(missing.len(), 2);
        assert_eq!(missing[0]["header"], "api.h");
        assert_eq!(missing[0]["symbols"][0], "api_init");
        assert_eq!(missing[1]["header"], "widget.h");

        let redundant = parsed["redundant_includes"].as_array().unwrap();
        assert_eq!(redundant.len(), 1);
        assert_eq!(redundant[0], "unused.h");
    }

    #[test]
    fn test_json_export_clean_omits_lists() {
        let report = clean_report();
        let mut output = Vec::new();

        JsonExporter.export(&report, &mut output).unwrap();

        let json_str = String::from_utf8(output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json_str).unwrap();

        assert!(parsed.get("missing_includes").is_none());
        assert!(parsed.get("redundant_includes").is_none());
        assert_eq!(parsed["summary"]["missing_includes"], 0);
    }

    #[test]
    fn test_json_is_valid() {
        let report = sample_report();
        let mut output = Vec::new();

        JsonExporter.export(&report, &mut output).unwrap();

        let json_str = String::from_utf8(output).unwrap();
        let result: Result<serde_json::Value, _> = serde_json::from_str(&json_str);
        assert!(result.is_ok());
    }
}
