//! Shared types for compilation database parsing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One entry of a compilation database.
///
/// Mirrors the JSON Compilation Database Format Specification: every entry
/// names the working directory, the source file, and the compile invocation
/// either as a single shell string (`command`) or as an argv vector
/// (`arguments`).
///
/// # Example
///
/// ```
/// use headerscope::parser::CompileCommand;
///
/// let json = r#"{
///     "directory": "/proj/build",
///     "file": "../src/main.cpp",
///     "arguments": ["clang++", "-I", "../include", "-c", "../src/main.cpp"]
/// }"#;
/// let entry: CompileCommand = serde_json::from_str(json).unwrap();
/// assert_eq!(entry.include_dirs(), vec![std::path::PathBuf::from("/proj/build/../include")]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileCommand {
    /// The working directory of the compilation.
    pub directory: PathBuf,

    /// The main source file, absolute or relative to `directory`.
    pub file: PathBuf,

    /// The compile command as one shell-escaped string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// The compile command as an argument vector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<String>>,

    /// The output file, if the generator recorded it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl CompileCommand {
    /// The compile invocation as an argument vector.
    ///
    /// Prefers `arguments` when present; otherwise splits `command` on
    /// whitespace. Shell quoting inside `command` is not interpreted —
    /// paths with spaces need the `arguments` form.
    pub fn argv(&self) -> Vec<String> {
        if let Some(ref arguments) = self.arguments {
            return arguments.clone();
        }
        self.command
            .as_deref()
            .map(|command| command.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// The source file as an absolute path.
    pub fn absolute_file(&self) -> PathBuf {
        self.resolve(&self.file)
    }

    /// The include directories of this invocation, in command-line order.
    ///
    /// Recognizes `-Idir`, `-I dir`, `-isystem dir`, `-isystemdir`,
    /// `--include-directory dir` and `--include-directory=dir`. Relative
    /// directories are resolved against the entry's working directory.
    pub fn include_dirs(&self) -> Vec<PathBuf> {
        let argv = self.argv();
        let mut dirs = Vec::new();
        let mut iter = argv.iter().peekable();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-I" | "-isystem" | "--include-directory" => {
                    if let Some(dir) = iter.next() {
                        dirs.push(self.resolve(Path::new(dir)));
                    }
                }
                _ => {
                    if let Some(dir) = arg.strip_prefix("--include-directory=") {
                        dirs.push(self.resolve(Path::new(dir)));
                    } else if let Some(dir) = arg.strip_prefix("-isystem") {
                        dirs.push(self.resolve(Path::new(dir)));
                    } else if let Some(dir) = arg.strip_prefix("-I") {
                        dirs.push(self.resolve(Path::new(dir)));
                    }
                }
            }
        }

        dirs
    }

    /// Resolves a path against the entry's working directory.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.directory.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_with_args(args: &[&str]) -> CompileCommand {
        CompileCommand {
            directory: PathBuf::from("/proj/build"),
            file: PathBuf::from("../src/main.cpp"),
            command: None,
            arguments: Some(args.iter().map(|s| s.to_string()).collect()),
            output: None,
        }
    }

    #[test]
    fn test_argv_prefers_arguments() {
        let mut entry = entry_with_args(&["clang++", "-c", "main.cpp"]);
        entry.command = Some("g++ ignored".to_string());

        assert_eq!(entry.argv(), vec!["clang++", "-c", "main.cpp"]);
    }

    #[test]
    fn test_argv_splits_command() {
        let entry = CompileCommand {
            directory: PathBuf::from("/proj"),
            file: PathBuf::from("main.cpp"),
            command: Some("clang++ -I include -c main.cpp".to_string()),
            arguments: None,
            output: None,
        };

        assert_eq!(
            entry.argv(),
            vec!["clang++", "-I", "include", "-c", "main.cpp"]
        );
    }

    #[test]
    fn test_include_dirs_joined_form() {
        let entry = entry_with_args(&["clang++", "-I../include", "-Isrc", "-c", "main.cpp"]);

        assert_eq!(
            entry.include_dirs(),
            vec![
                PathBuf::from("/proj/build/../include"),
                PathBuf::from("/proj/build/src"),
            ]
        );
    }

    #[test]
    fn test_include_dirs_separate_form() {
        let entry = entry_with_args(&["clang++", "-I", "/opt/include", "-c", "main.cpp"]);

        assert_eq!(entry.include_dirs(), vec![PathBuf::from("/opt/include")]);
    }

    #[test]
    fn test_include_dirs_isystem() {
        let entry = entry_with_args(&[
            "clang++",
            "-isystem",
            "/usr/local/include",
            "-isystem/usr/include",
        ]);

        assert_eq!(
            entry.include_dirs(),
            vec![
                PathBuf::from("/usr/local/include"),
                PathBuf::from("/usr/include"),
            ]
        );
    }

    #[test]
    fn test_include_dirs_long_form() {
        let entry = entry_with_args(&[
            "clang++",
            "--include-directory",
            "a",
            "--include-directory=b",
        ]);

        assert_eq!(
            entry.include_dirs(),
            vec![
                PathBuf::from("/proj/build/a"),
                PathBuf::from("/proj/build/b"),
            ]
        );
    }

    #[test]
    fn test_include_dirs_order_preserved() {
        let entry = entry_with_args(&["cc", "-Ib", "-Ia", "-Ic"]);
        let dirs: Vec<_> = entry
            .include_dirs()
            .into_iter()
            .map(|d| d.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(dirs, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_absolute_file() {
        let entry = entry_with_args(&["cc"]);
        assert_eq!(
            entry.absolute_file(),
            PathBuf::from("/proj/build/../src/main.cpp")
        );

        let absolute = CompileCommand {
            directory: PathBuf::from("/proj"),
            file: PathBuf::from("/proj/src/main.cpp"),
            command: None,
            arguments: None,
            output: None,
        };
        assert_eq!(absolute.absolute_file(), PathBuf::from("/proj/src/main.cpp"));
    }

    #[test]
    fn test_no_flags_no_dirs() {
        let entry = entry_with_args(&["cc", "-c", "main.cpp", "-o", "main.o"]);
        assert!(entry.include_dirs().is_empty());
    }
}
