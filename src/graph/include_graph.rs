//! Include graph implementation using petgraph.
//!
//! Provides a directed multigraph over the files of one translation unit,
//! with one edge per include directive. Duplicate directives are kept as
//! parallel edges, and every edge carries a sequence number so the
//! discovery order can always be reconstructed.

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Represents a node in the include graph: one physical file.
#[derive(Debug, Clone)]
pub struct IncludeNode {
    /// Absolute path of the file.
    pub path: PathBuf,
}

/// Represents one include directive in the include graph.
///
/// The sequence number is assigned in discovery order across the whole
/// traversal, so sorting edges by it reproduces the order in which the
/// directives were observed.
#[derive(Debug, Clone, Copy)]
pub struct IncludeDirective {
    /// Discovery-order sequence number, unique per directive.
    pub seq: u64,
}

/// A directed multigraph of include directives.
///
/// Edges point from the includer to the included file. Repeated directives
/// for the same pair are kept; order of observation is preserved through
/// the edge sequence numbers.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use headerscope::graph::IncludeGraph;
///
/// let mut graph = IncludeGraph::new();
/// graph.record(Path::new("/src/main.cpp"), Path::new("/include/a.h"));
/// graph.record(Path::new("/src/main.cpp"), Path::new("/include/b.h"));
/// graph.record(Path::new("/include/a.h"), Path::new("/include/b.h"));
///
/// assert_eq!(graph.file_count(), 3);
/// assert_eq!(graph.directive_count(), 3);
///
/// let direct = graph.direct_includes_of(Path::new("/src/main.cpp"));
/// assert_eq!(direct, vec![Path::new("/include/a.h"), Path::new("/include/b.h")]);
/// ```
#[derive(Debug, Default)]
pub struct IncludeGraph {
    /// The underlying directed graph.
    graph: DiGraph<IncludeNode, IncludeDirective>,
    /// Maps file paths to their node indices for O(1) lookup.
    node_indices: HashMap<PathBuf, NodeIndex>,
    /// Next discovery-order sequence number.
    next_seq: u64,
}

impl IncludeGraph {
    /// Creates a new empty include graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file node if it is not present yet and returns its index.
    fn ensure_node(&mut self, path: &Path) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(path) {
            return idx;
        }

        let idx = self.graph.add_node(IncludeNode {
            path: path.to_path_buf(),
        });
        self.node_indices.insert(path.to_path_buf(), idx);
        idx
    }

    /// Records one include directive, in discovery order.
    ///
    /// Both endpoints are created on first sight. Repeats and
    /// self-referential directives are recorded as observed.
    pub fn record(&mut self, includer: &Path, included: &Path) {
        let from = self.ensure_node(includer);
        let to = self.ensure_node(included);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.graph.add_edge(from, to, IncludeDirective { seq });
    }

    /// Returns true if the file has been observed, either side of an edge.
    pub fn contains(&self, path: &Path) -> bool {
        self.node_indices.contains_key(path)
    }

    /// Number of distinct files in the graph.
    pub fn file_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of recorded include directives, repeats included.
    pub fn directive_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The files a given file includes, in discovery order.
    ///
    /// Repeated directives yield repeated entries.
    pub fn direct_includes_of(&self, path: &Path) -> Vec<&Path> {
        let Some(&idx) = self.node_indices.get(path) else {
            return Vec::new();
        };

        let mut edges: Vec<(u64, NodeIndex)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge| (edge.weight().seq, edge.target()))
            .collect();
        edges.sort_by_key(|&(seq, _)| seq);

        edges
            .into_iter()
            .map(|(_, target)| self.graph[target].path.as_path())
            .collect()
    }

    /// The files that include a given file, in discovery order.
    pub fn includers_of(&self, path: &Path) -> Vec<&Path> {
        let Some(&idx) = self.node_indices.get(path) else {
            return Vec::new();
        };

        let mut edges: Vec<(u64, NodeIndex)> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|edge| (edge.weight().seq, edge.source()))
            .collect();
        edges.sort_by_key(|&(seq, _)| seq);

        edges
            .into_iter()
            .map(|(_, source)| self.graph[source].path.as_path())
            .collect()
    }

    /// Iterates over all files in the graph.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.graph
            .node_weights()
            .map(|node| node.path.as_path())
    }

    /// Checks if the include graph contains cycles.
    ///
    /// Guarded headers can legally include each other, so a cycle is a
    /// diagnostic finding, not an error.
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Detects and returns all include cycles in the graph.
    ///
    /// Uses strongly connected components; each returned cycle lists the
    /// participating file paths.
    pub fn detect_cycles(&self) -> Vec<CycleInfo> {
        use petgraph::algo::tarjan_scc;

        let sccs = tarjan_scc(&self.graph);
        let mut cycles = Vec::new();

        for scc in sccs {
            if scc.len() > 1 {
                let files: Vec<PathBuf> = scc
                    .iter()
                    .map(|&idx| self.graph[idx].path.clone())
                    .collect();
                cycles.push(CycleInfo { files });
            } else if scc.len() == 1 {
                // A single node is a cycle only with a self-loop.
                let idx = scc[0];
                if self.graph.contains_edge(idx, idx) {
                    cycles.push(CycleInfo {
                        files: vec![self.graph[idx].path.clone()],
                    });
                }
            }
        }

        cycles
    }
}

/// Information about a detected include cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleInfo {
    /// The files in the cycle (the last includes the first again).
    pub files: Vec<PathBuf>,
}

impl CycleInfo {
    /// Returns a formatted representation of the cycle path.
    ///
    /// For example: `a.h -> b.h -> a.h`
    pub fn cycle_path(&self) -> String {
        if self.files.is_empty() {
            return String::new();
        }
        let mut path = self
            .files
            .iter()
            .map(|f| f.display().to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        path.push_str(" -> ");
        path.push_str(&self.files[0].display().to_string());
        path
    }

    /// Number of files in the cycle.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if the cycle is empty (should not happen in practice).
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        let graph = IncludeGraph::new();
        assert_eq!(graph.file_count(), 0);
        assert_eq!(graph.directive_count(), 0);
        assert!(!graph.has_cycles());
    }

    #[test]
    fn test_record_creates_nodes() {
        let mut graph = IncludeGraph::new();
        graph.record(Path::new("/src/main.cpp"), Path::new("/include/a.h"));

        assert_eq!(graph.file_count(), 2);
        assert_eq!(graph.directive_count(), 1);
        assert!(graph.contains(Path::new("/src/main.cpp")));
        assert!(graph.contains(Path::new("/include/a.h")));
    }

    #[test]
    fn test_direct_includes_preserve_order() {
        let mut graph = IncludeGraph::new();
        graph.record(Path::new("/m.cpp"), Path::new("/c.h"));
        graph.record(Path::new("/m.cpp"), Path::new("/a.h"));
        graph.record(Path::new("/m.cpp"), Path::new("/b.h"));

        let direct = graph.direct_includes_of(Path::new("/m.cpp"));
        assert_eq!(
            direct,
            vec![Path::new("/c.h"), Path::new("/a.h"), Path::new("/b.h")]
        );
    }

    #[test]
    fn test_duplicate_directives_are_kept() {
        let mut graph = IncludeGraph::new();
        graph.record(Path::new("/m.cpp"), Path::new("/a.h"));
        graph.record(Path::new("/m.cpp"), Path::new("/a.h"));

        assert_eq!(graph.file_count(), 2);
        assert_eq!(graph.directive_count(), 2);
        assert_eq!(
            graph.direct_includes_of(Path::new("/m.cpp")),
            vec![Path::new("/a.h"), Path::new("/a.h")]
        );
    }

    #[test]
    fn test_self_referential_directive_recorded() {
        let mut graph = IncludeGraph::new();
        graph.record(Path::new("/a.h"), Path::new("/a.h"));

        assert_eq!(graph.file_count(), 1);
        assert_eq!(graph.directive_count(), 1);
        assert!(graph.has_cycles());
    }

    #[test]
    fn test_includers_of() {
        let mut graph = IncludeGraph::new();
        graph.record(Path::new("/m.cpp"), Path::new("/a.h"));
        graph.record(Path::new("/b.h"), Path::new("/a.h"));

        let includers = graph.includers_of(Path::new("/a.h"));
        assert_eq!(includers, vec![Path::new("/m.cpp"), Path::new("/b.h")]);

        assert!(graph.includers_of(Path::new("/m.cpp")).is_empty());
    }

    #[test]
    fn test_unknown_file_has_no_includes() {
        let graph = IncludeGraph::new();
        assert!(graph
            .direct_includes_of(Path::new("/nope.cpp"))
            .is_empty());
    }

    #[test]
    fn test_no_cycles_in_tree() {
        let mut graph = IncludeGraph::new();
        graph.record(Path::new("/m.cpp"), Path::new("/a.h"));
        graph.record(Path::new("/a.h"), Path::new("/b.h"));

        assert!(!graph.has_cycles());
        assert!(graph.detect_cycles().is_empty());
    }

    #[test]
    fn test_detect_cycles() {
        let mut graph = IncludeGraph::new();
        graph.record(Path::new("/a.h"), Path::new("/b.h"));
        graph.record(Path::new("/b.h"), Path::new("/c.h"));
        graph.record(Path::new("/c.h"), Path::new("/a.h"));

        assert!(graph.has_cycles());
        let cycles = graph.detect_cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 3);
    }

    #[test]
    fn test_cycle_path_formatting() {
        let cycle = CycleInfo {
            files: vec![PathBuf::from("a.h"), PathBuf::from("b.h")],
        };
        assert_eq!(cycle.cycle_path(), "a.h -> b.h -> a.h");

        let empty = CycleInfo { files: vec![] };
        assert!(empty.is_empty());
        assert_eq!(empty.cycle_path(), "");
    }
}
