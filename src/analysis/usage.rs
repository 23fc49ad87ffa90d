//! Usage map: attributed header path to the symbols used from it.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Accumulates which symbols the main file uses from which header.
///
/// Keys are attributed header paths (already resolved through the
/// internal-header chain); values are the distinct symbol names used.
/// Both layers are B-tree backed, so iteration order is lexicographic —
/// the report order.
#[derive(Debug, Default)]
pub struct UsageMap {
    usages: BTreeMap<PathBuf, BTreeSet<String>>,
}

impl UsageMap {
    /// Creates an empty usage map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one symbol use against an attributed header.
    ///
    /// Returns true if the symbol was not already recorded for that header.
    pub fn record(&mut self, header: &Path, symbol: &str) -> bool {
        self.usages
            .entry(header.to_path_buf())
            .or_default()
            .insert(symbol.to_string())
    }

    /// Returns true if any symbol has been recorded for `header`.
    pub fn contains(&self, header: &Path) -> bool {
        self.usages.contains_key(header)
    }

    /// The symbols recorded for `header`, if any.
    pub fn symbols_for(&self, header: &Path) -> Option<&BTreeSet<String>> {
        self.usages.get(header)
    }

    /// Iterates over all (header, symbols) entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &BTreeSet<String>)> {
        self.usages
            .iter()
            .map(|(path, symbols)| (path.as_path(), symbols))
    }

    /// Number of headers with at least one recorded use.
    pub fn len(&self) -> usize {
        self.usages.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.usages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_lookup() {
        let mut map = UsageMap::new();
        assert!(map.record(Path::new("/a.h"), "draw"));
        assert!(map.contains(Path::new("/a.h")));
        assert!(!map.contains(Path::new("/b.h")));

        let symbols = map.symbols_for(Path::new("/a.h")).unwrap();
        assert_eq!(symbols.len(), 1);
        assert!(symbols.contains("draw"));
    }

    #[test]
    fn test_duplicate_symbol_recorded_once() {
        let mut map = UsageMap::new();
        assert!(map.record(Path::new("/a.h"), "draw"));
        assert!(!map.record(Path::new("/a.h"), "draw"));

        assert_eq!(map.symbols_for(Path::new("/a.h")).unwrap().len(), 1);
    }

    #[test]
    fn test_iteration_is_path_ordered() {
        let mut map = UsageMap::new();
        map.record(Path::new("/z.h"), "zeta");
        map.record(Path::new("/a.h"), "alpha");
        map.record(Path::new("/m.h"), "mu");

        let keys: Vec<&Path> = map.iter().map(|(path, _)| path).collect();
        assert_eq!(
            keys,
            vec![Path::new("/a.h"), Path::new("/m.h"), Path::new("/z.h")]
        );
    }

    #[test]
    fn test_symbols_are_sorted_and_distinct() {
        let mut map = UsageMap::new();
        map.record(Path::new("/a.h"), "resize");
        map.record(Path::new("/a.h"), "draw");
        map.record(Path::new("/a.h"), "resize");

        let symbols: Vec<&str> = map
            .symbols_for(Path::new("/a.h"))
            .unwrap()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(symbols, vec!["draw", "resize"]);
    }
}
