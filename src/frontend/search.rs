//! Header search path resolution.
//!
//! Maps the spelling of an include directive to the physical file it names,
//! following the usual C/C++ lookup rules: quoted includes try the
//! includer's own directory first, then the `-I` search path; angled
//! includes use the search path only. As a last resort for quoted includes
//! a project-tree scan can find headers that the build flags never
//! mention. All resolved paths are canonicalized so the rest of the
//! pipeline compares paths by plain equality.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

/// The ordered set of places an include directive may refer into.
#[derive(Debug, Clone, Default)]
pub struct HeaderSearchPath {
    include_dirs: Vec<PathBuf>,
    project_root: Option<PathBuf>,
}

impl HeaderSearchPath {
    /// Creates a search path from `-I`-style include directories, in
    /// command-line order.
    pub fn new(include_dirs: Vec<PathBuf>) -> Self {
        Self {
            include_dirs,
            project_root: None,
        }
    }

    /// Enables the last-resort project scan rooted at `root`.
    pub fn with_project_root(mut self, root: PathBuf) -> Self {
        self.project_root = Some(root);
        self
    }

    /// The configured include directories.
    pub fn include_dirs(&self) -> &[PathBuf] {
        &self.include_dirs
    }

    /// Resolves a `"quoted"` include spelled from a file in
    /// `includer_dir`.
    ///
    /// Tries the includer's directory, then the search path, then the
    /// project scan. Returns the canonicalized path, or `None` when the
    /// header cannot be found.
    pub fn resolve_quoted(&self, includer_dir: &Path, spelling: &Path) -> Option<PathBuf> {
        if let Some(path) = canonical_if_file(&includer_dir.join(spelling)) {
            return Some(path);
        }
        if let Some(path) = self.search_dirs(spelling) {
            return Some(path);
        }
        self.scan_project(spelling)
    }

    /// Resolves an `<angled>` include against the search path only.
    pub fn resolve_angled(&self, spelling: &Path) -> Option<PathBuf> {
        self.search_dirs(spelling)
    }

    fn search_dirs(&self, spelling: &Path) -> Option<PathBuf> {
        self.include_dirs
            .iter()
            .find_map(|dir| canonical_if_file(&dir.join(spelling)))
    }

    /// Walks the project tree for a file whose path ends with the
    /// directive spelling. Entries are visited in file-name order so the
    /// match is deterministic.
    fn scan_project(&self, spelling: &Path) -> Option<PathBuf> {
        let root = self.project_root.as_ref()?;

        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_ignored_dir(e))
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && path.ends_with(spelling) {
                debug!(
                    spelling = %spelling.display(),
                    found = %path.display(),
                    "header resolved by project scan"
                );
                return canonical_if_file(path);
            }
        }

        None
    }
}

/// Canonicalizes `path` when it names an existing regular file.
fn canonical_if_file(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        path.canonicalize().ok()
    } else {
        None
    }
}

/// Check if a directory should be ignored during the project scan.
fn is_ignored_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    matches!(
        name.as_ref(),
        ".git" | "build" | "cmake-build-debug" | "cmake-build-release" | ".cache" | "target"
    )
}
