//! The analysis session: event handlers and report finalization.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::trace;

use crate::graph::IncludeGraph;
use crate::registry::{Header, HeaderRegistry, ResolveError};
use crate::report::{AnalysisReport, MissingInclude};

use super::usage::UsageMap;

/// Errors that abort an analysis run.
///
/// Both variants are consistency violations: they indicate a bug in event
/// delivery or a header relationship the containment heuristic cannot
/// express, and must not be papered over with a partial report.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A header was claimed as internal by two unrelated public headers.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A use event named a declaring header that no include event ever
    /// registered.
    #[error(
        "symbol `{symbol}` attributed to unregistered header {}",
        header.display()
    )]
    UnknownHeader {
        /// The declaring header the event named.
        header: PathBuf,
        /// The symbol whose use could not be attributed.
        symbol: String,
    },
}

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// All mutable state of one analysis run.
///
/// Owns the header registry, the include graph, the main file's
/// direct-include set and the usage map. The front end calls
/// [`on_include`](AnalysisSession::on_include) and
/// [`on_symbol_use`](AnalysisSession::on_symbol_use) synchronously, in
/// discovery order; [`finish`](AnalysisSession::finish) consumes the
/// session once the event stream is exhausted.
#[derive(Debug)]
pub struct AnalysisSession {
    main_file: PathBuf,
    registry: HeaderRegistry,
    includes: IncludeGraph,
    main_includes: BTreeSet<PathBuf>,
    usages: UsageMap,
}

impl AnalysisSession {
    /// Creates a session for the designated main file.
    ///
    /// The path must already be normalized; every later comparison against
    /// it is plain path equality.
    pub fn new(main_file: &Path) -> Self {
        Self {
            main_file: main_file.to_path_buf(),
            registry: HeaderRegistry::new(),
            includes: IncludeGraph::new(),
            main_includes: BTreeSet::new(),
            usages: UsageMap::new(),
        }
    }

    /// The file under analysis.
    pub fn main_file(&self) -> &Path {
        &self.main_file
    }

    /// Read access to the header registry, for diagnostics.
    pub fn registry(&self) -> &HeaderRegistry {
        &self.registry
    }

    /// Read access to the include graph, for diagnostics.
    pub fn include_graph(&self) -> &IncludeGraph {
        &self.includes
    }

    /// The headers the main file includes directly.
    pub fn main_includes(&self) -> &BTreeSet<PathBuf> {
        &self.main_includes
    }

    /// Read access to the usage map.
    pub fn usages(&self) -> &UsageMap {
        &self.usages
    }

    /// Handles one include directive: `includer` includes `included`,
    /// spelled as `display` in the directive when known.
    ///
    /// Registers both endpoints, runs internal-header classification,
    /// records the edge, and tracks the main file's direct includes.
    /// Fails only on a parent-resolution conflict.
    pub fn on_include(
        &mut self,
        includer: &Path,
        included: &Path,
        display: Option<&Path>,
    ) -> SessionResult<()> {
        let includer_id = self.registry.get_or_create(includer);
        let included_id = self.registry.get_or_create(included);

        if let Some(relative) = display {
            self.registry.set_relative_path(included_id, relative);
        }

        self.registry.link_if_internal(included_id, includer_id)?;
        self.includes.record(includer, included);

        if includer == self.main_file {
            self.main_includes.insert(included.to_path_buf());
        }

        trace!(
            includer = %includer.display(),
            included = %included.display(),
            "include directive"
        );
        Ok(())
    }

    /// Handles one symbol use: a construct in `referencing` referred to
    /// `symbol`, declared in `declaring`.
    ///
    /// Uses without an attributable header (no declaring path, or declared
    /// in the main file itself) and uses made outside the main file are
    /// skipped. Otherwise the declaring header is resolved through the
    /// internal-header chain and the symbol is recorded against the public
    /// header.
    pub fn on_symbol_use(
        &mut self,
        referencing: &Path,
        declaring: &Path,
        symbol: &str,
    ) -> SessionResult<()> {
        // Compiler-builtin constructs carry no declaring file; uses of the
        // main file's own declarations are not actionable either way.
        if declaring.as_os_str().is_empty() || declaring == self.main_file {
            return Ok(());
        }
        if referencing != self.main_file {
            return Ok(());
        }

        let id = self
            .registry
            .get(declaring)
            .ok_or_else(|| SessionError::UnknownHeader {
                header: declaring.to_path_buf(),
                symbol: symbol.to_string(),
            })?;

        let attributed = self.registry.real_path(id).to_path_buf();
        self.usages.record(&attributed, symbol);

        trace!(
            symbol,
            declared_in = %declaring.display(),
            attributed_to = %attributed.display(),
            "symbol use"
        );
        Ok(())
    }

    /// Consumes the session and produces the final report.
    ///
    /// Missing: usage-map keys that the main file does not include directly
    /// and that are still public at this point. Redundant: direct includes
    /// with no recorded use, internal headers excluded. Both lists are in
    /// lexicographic path order; symbols are sorted and distinct.
    pub fn finish(self) -> AnalysisReport {
        let AnalysisSession {
            main_file,
            registry,
            includes: _,
            main_includes,
            usages,
        } = self;

        let mut missing = Vec::new();
        for (path, symbols) in usages.iter() {
            if main_includes.contains(path) {
                continue;
            }
            // The containment heuristic can fold a header onto the main
            // file itself; there is no directive to suggest for that.
            if path == main_file {
                continue;
            }
            // A key can have acquired a parent after uses were attributed
            // to it; such headers are no longer citable.
            let entry = registry.get(path).map(|id| registry.header(id));
            if entry.map(Header::is_internal).unwrap_or(false) {
                continue;
            }
            let header = entry
                .map(|h| h.display_path().to_path_buf())
                .unwrap_or_else(|| path.to_path_buf());
            missing.push(MissingInclude {
                header,
                symbols: symbols.iter().cloned().collect(),
            });
        }

        let mut redundant = Vec::new();
        for path in &main_includes {
            if usages.contains(path) {
                continue;
            }
            let Some(id) = registry.get(path) else {
                continue;
            };
            if registry.is_internal(id) {
                continue;
            }
            redundant.push(registry.header(id).display_path().to_path_buf());
        }

        let headers_seen = registry
            .iter()
            .filter(|(_, header)| header.path() != main_file)
            .count();

        AnalysisReport {
            main_file,
            headers_seen,
            direct_include_count: main_includes.len(),
            missing,
            redundant,
        }
    }
}
