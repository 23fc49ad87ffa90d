//! Parser for JSON compilation databases.
//!
//! This module provides functionality to parse `compile_commands.json`
//! files and locate the entry for the translation unit under analysis.

use std::fs;
use std::path::Path;

use super::types::CompileCommand;

/// Errors that can occur during compilation database parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The database structure is invalid or unusable.
    #[error("Invalid compilation database: {0}")]
    InvalidDatabase(String),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a compilation database from a file path.
///
/// # Arguments
///
/// * `path` - Path to the `compile_commands.json` file
///
/// # Returns
///
/// A `ParseResult` containing the parsed entries or an error.
pub fn parse_file(path: &Path) -> ParseResult<Vec<CompileCommand>> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a compilation database from a string.
///
/// # Arguments
///
/// * `content` - JSON string content of the database
///
/// # Returns
///
/// A `ParseResult` containing the parsed entries or an error.
///
/// # Example
///
/// ```
/// use headerscope::parser::compile_commands::parse_str;
///
/// let json = r#"[{
///     "directory": "/proj",
///     "file": "src/main.cpp",
///     "command": "clang++ -Iinclude -c src/main.cpp"
/// }]"#;
/// let commands = parse_str(json).unwrap();
/// assert_eq!(commands.len(), 1);
/// ```
pub fn parse_str(content: &str) -> ParseResult<Vec<CompileCommand>> {
    let commands: Vec<CompileCommand> = serde_json::from_str(content)?;
    Ok(commands)
}

/// Validates a parsed compilation database.
///
/// An empty database is never usable, and every entry must carry the
/// invocation in at least one of its two forms.
pub fn validate(commands: &[CompileCommand]) -> ParseResult<()> {
    if commands.is_empty() {
        return Err(ParseError::InvalidDatabase(
            "compilation database has no entries".to_string(),
        ));
    }
    for entry in commands {
        if entry.command.is_none() && entry.arguments.is_none() {
            return Err(ParseError::InvalidDatabase(format!(
                "entry for {} has neither `command` nor `arguments`",
                entry.file.display()
            )));
        }
    }
    Ok(())
}

/// Finds the database entry for a translation unit.
///
/// Matches the entry whose `file` — as written or resolved against the
/// entry's working directory — equals `source`, falling back to a
/// canonicalized comparison when both sides exist on disk.
pub fn find_for_file<'a>(
    commands: &'a [CompileCommand],
    source: &Path,
) -> Option<&'a CompileCommand> {
    if let Some(entry) = commands
        .iter()
        .find(|entry| entry.file == source || entry.absolute_file() == source)
    {
        return Some(entry);
    }

    let canonical = source.canonicalize().ok()?;
    commands.iter().find(|entry| {
        entry
            .absolute_file()
            .canonicalize()
            .map(|path| path == canonical)
            .unwrap_or(false)
    })
}
