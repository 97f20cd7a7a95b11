//! Registry of asset files staged into a package.

use std::collections::BTreeSet;

/// Set of asset paths referenced by the package being built.
///
/// Paths are normalized on registration, so one asset spelled two ways is
/// stored once. Iteration is sorted.
#[derive(Debug, Clone, Default)]
pub struct ResourceFileCollector {
    paths: BTreeSet<String>,
}

impl ResourceFileCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a path. Returns false if it was already registered.
    pub fn register(&mut self, path: &str) -> bool {
        self.paths.insert(normalize_path(path))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(&normalize_path(path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Forward slashes, no `.` segments, no empty segments.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(r".\chara\HUM\\HUM_000.emd"), "chara/HUM/HUM_000.emd");
        assert_eq!(normalize_path("./a//b/./c"), "a/b/c");
        assert_eq!(normalize_path("a/b"), "a/b");
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut files = ResourceFileCollector::new();
        assert!(files.register("chara/HUM/HUM_000_Bust.emd"));
        assert!(!files.register("chara/HUM/HUM_000_Bust.emd"));
        assert!(!files.register(r"chara\HUM\HUM_000_Bust.emd"));
        assert!(!files.register("./chara//HUM/HUM_000_Bust.emd"));
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_sorted_iteration() {
        let mut files = ResourceFileCollector::new();
        files.register("b.emb");
        files.register("a.emd");
        assert_eq!(files.iter().collect::<Vec<_>>(), vec!["a.emd", "b.emb"]);
        assert!(files.contains(r".\b.emb"));
    }
}
