//! Header nodes, their registry, and parent-chain resolution.
//!
//! The registry owns all `Header` values in an arena (`Vec`) and hands out
//! `HeaderId` indices instead of references. A node's parent link is an
//! index into the same arena, so the containment relation can never form
//! an ownership cycle, and the chain walk in [`HeaderRegistry::resolve`]
//! rewrites links as it goes (union-find style path compression).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur during parent resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The same header was claimed as an implementation detail of two
    /// unrelated public headers. The one-parent containment model cannot
    /// express this, so the analysis stops rather than guessing.
    #[error(
        "header {} already resolves to {}, cannot re-parent to {}",
        header.display(),
        existing.display(),
        attempted.display()
    )]
    ConflictingParents {
        /// The header that was about to receive a second parent.
        header: PathBuf,
        /// The public root it already resolves to.
        existing: PathBuf,
        /// The public root the rejected link would have introduced.
        attempted: PathBuf,
    },
}

/// Result type alias for registry operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Handle to a [`Header`] stored in a [`HeaderRegistry`].
///
/// A plain index into the registry's arena. Handles are only minted by the
/// registry and stay valid for its entire lifetime; nothing is ever removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeaderId(usize);

/// A single physical header file.
#[derive(Debug, Clone)]
pub struct Header {
    /// Absolute path; the registry key.
    path: PathBuf,
    /// The spelling from the include directive, kept for human-facing output.
    relative_path: Option<PathBuf>,
    /// Link to the header this one is an implementation detail of.
    /// Set at most once; `None` means the header is public.
    parent: Option<HeaderId>,
}

impl Header {
    /// The absolute path of this header.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The include-directive spelling, if one was recorded.
    pub fn relative_path(&self) -> Option<&Path> {
        self.relative_path.as_deref()
    }

    /// The path to show in reports: the directive spelling when known,
    /// the absolute path otherwise.
    pub fn display_path(&self) -> &Path {
        self.relative_path.as_deref().unwrap_or(&self.path)
    }

    /// Returns true if this header has been classified as an internal
    /// implementation detail of another header.
    pub fn is_internal(&self) -> bool {
        self.parent.is_some()
    }

    /// The current parent link, if any.
    pub fn parent(&self) -> Option<HeaderId> {
        self.parent
    }
}

/// Canonical store of header identities.
///
/// Guarantees at most one node per physical path: repeated
/// [`get_or_create`](HeaderRegistry::get_or_create) calls with the same path
/// return the same [`HeaderId`]. Single-writer, populated during one
/// traversal of one translation unit.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use headerscope::registry::HeaderRegistry;
///
/// let mut registry = HeaderRegistry::new();
/// let a = registry.get_or_create(Path::new("/src/pub/widget.h"));
/// let b = registry.get_or_create(Path::new("/src/pub/widget.h"));
/// assert_eq!(a, b);
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct HeaderRegistry {
    headers: Vec<Header>,
    by_path: HashMap<PathBuf, HeaderId>,
}

impl HeaderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node for `path`, creating it on first sight.
    pub fn get_or_create(&mut self, path: &Path) -> HeaderId {
        if let Some(&id) = self.by_path.get(path) {
            return id;
        }

        let id = HeaderId(self.headers.len());
        self.headers.push(Header {
            path: path.to_path_buf(),
            relative_path: None,
            parent: None,
        });
        self.by_path.insert(path.to_path_buf(), id);
        id
    }

    /// Looks up the node for `path` without creating one.
    pub fn get(&self, path: &Path) -> Option<HeaderId> {
        self.by_path.get(path).copied()
    }

    /// Borrows the header behind a handle.
    pub fn header(&self, id: HeaderId) -> &Header {
        &self.headers[id.0]
    }

    /// Number of registered headers.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Returns true if no header has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Iterates over all registered headers.
    pub fn iter(&self) -> impl Iterator<Item = (HeaderId, &Header)> {
        self.headers
            .iter()
            .enumerate()
            .map(|(index, header)| (HeaderId(index), header))
    }

    /// Records the include-directive spelling for a header.
    ///
    /// The first recorded spelling wins; later directives that reach the
    /// same file under another name do not overwrite it.
    pub fn set_relative_path(&mut self, id: HeaderId, relative: &Path) {
        let header = &mut self.headers[id.0];
        if header.relative_path.is_none() {
            header.relative_path = Some(relative.to_path_buf());
        }
    }

    /// Returns true if the header has a resolved parent.
    pub fn is_internal(&self, id: HeaderId) -> bool {
        self.headers[id.0].is_internal()
    }

    /// Resolves a header to the root of its parent chain.
    ///
    /// Walks the chain to the terminal node, then rewrites every visited
    /// link to point directly at that root, so repeated resolutions of the
    /// same chain are near O(1). A header with no parent resolves to
    /// itself.
    pub fn resolve(&mut self, id: HeaderId) -> HeaderId {
        let mut root = id;
        while let Some(parent) = self.headers[root.0].parent {
            root = parent;
        }

        let mut current = id;
        while let Some(next) = self.headers[current.0].parent {
            self.headers[current.0].parent = Some(root);
            current = next;
        }

        root
    }

    /// The path of the public header a node resolves to.
    ///
    /// For a public header this is its own path.
    pub fn real_path(&mut self, id: HeaderId) -> &Path {
        let root = self.resolve(id);
        &self.headers[root.0].path
    }

    /// Classifies `included` as internal to `includer` when the directory
    /// layout says so, linking it into the parent chain.
    ///
    /// The containment test compares the included header's directory two
    /// levels up (skipping the `internal/`-style folder it sits in) against
    /// the includer's own directory. The stored parent is the includer's
    /// resolved root, so chains stay flat as they grow.
    ///
    /// Returns `Ok(true)` when a new link was created, `Ok(false)` when the
    /// edge does not classify or repeats an existing resolution, and an
    /// error when the edge would give the header a second, different
    /// parent.
    pub fn link_if_internal(
        &mut self,
        included: HeaderId,
        includer: HeaderId,
    ) -> ResolveResult<bool> {
        if included == includer {
            return Ok(false);
        }

        let contained = {
            let includer_dir = self.headers[includer.0].path.parent();
            let child_dir = self.headers[included.0]
                .path
                .parent()
                .and_then(Path::parent);
            match (child_dir, includer_dir) {
                (Some(child), Some(root)) => is_subdirectory(child, root),
                _ => false,
            }
        };
        if !contained {
            return Ok(false);
        }

        let root = self.resolve(includer);
        if root == included {
            // Linking would make the header its own ancestor.
            return Ok(false);
        }

        match self.headers[included.0].parent {
            None => {
                self.headers[included.0].parent = Some(root);
                Ok(true)
            }
            Some(existing) => {
                let existing_root = self.resolve(existing);
                if existing_root == root {
                    Ok(false)
                } else {
                    Err(ResolveError::ConflictingParents {
                        header: self.headers[included.0].path.clone(),
                        existing: self.headers[existing_root.0].path.clone(),
                        attempted: self.headers[root.0].path.clone(),
                    })
                }
            }
        }
    }
}

/// Walks `child` upward through its parent directories; containment holds
/// when any ancestor (including `child` itself) equals `root`.
fn is_subdirectory(child: &Path, root: &Path) -> bool {
    child.ancestors().any(|ancestor| ancestor == root)
}
