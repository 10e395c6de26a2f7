//! Source file discovery.
//!
//! Walks the configured source root and returns every regular file with the
//! recognized source extension as a [`SourceUnit`], sorted by relative path.
//! The order is part of the contract: batch reports list failures in
//! discovery order, so the walk must be reproducible across runs and
//! platforms.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{BatchError, BatchResult};
use crate::paths::SOURCE_EXTENSION;

/// One discovered source file, identified by its path relative to the
/// source root.
///
/// The relative path locates the file under the source root and derives
/// every output artifact path, so each unit maps 1:1 to its generated
/// artifacts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceUnit {
    rel: PathBuf,
}

impl SourceUnit {
    /// Create a unit from a path relative to the source root.
    pub fn new(rel: impl Into<PathBuf>) -> Self {
        Self { rel: rel.into() }
    }

    /// The path relative to the source root.
    pub fn rel(&self) -> &Path {
        &self.rel
    }

    /// The relative path as a forward-slash name.
    ///
    /// Used in engine calls, log lines, and the batch report, so that the
    /// same tree reports identically on every platform.
    pub fn name(&self) -> String {
        let parts: Vec<_> = self
            .rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();
        parts.join("/")
    }

    /// The absolute location of this unit under `source_root`.
    pub fn source_path(&self, source_root: &Path) -> PathBuf {
        source_root.join(&self.rel)
    }
}

/// Recursively discover source files under `source_root`.
///
/// Returns units sorted lexically by relative path. Fails with
/// [`BatchError::SourceRootNotFound`] if the root does not exist; this is
/// fatal for the whole run since no files can be discovered.
pub fn discover_sources(source_root: &Path) -> BatchResult<Vec<SourceUnit>> {
    if !source_root.is_dir() {
        return Err(BatchError::SourceRootNotFound {
            path: source_root.to_path_buf(),
        });
    }

    let mut units = Vec::new();
    for entry in WalkDir::new(source_root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(source_root) {
            units.push(SourceUnit::new(rel));
        }
    }

    units.sort();
    Ok(units)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "x = 1\n").unwrap();
    }

    #[test]
    fn finds_nested_sources_in_lexical_order() {
        let dir = TempDir::new().unwrap();
        // Created out of order on purpose.
        touch(&dir.path().join("widgets/z.src"));
        touch(&dir.path().join("a.src"));
        touch(&dir.path().join("widgets/a.src"));

        let units = discover_sources(dir.path()).unwrap();
        let names: Vec<_> = units.iter().map(SourceUnit::name).collect();
        assert_eq!(names, vec!["a.src", "widgets/a.src", "widgets/z.src"]);
    }

    #[test]
    fn ignores_other_extensions_and_directories() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("keep.src"));
        fs::write(dir.path().join("notes.txt"), "skip").unwrap();
        fs::write(dir.path().join("generated.gen"), "skip").unwrap();
        // A directory whose name looks like a source file.
        fs::create_dir_all(dir.path().join("odd.src/inner")).unwrap();

        let units = discover_sources(dir.path()).unwrap();
        let names: Vec<_> = units.iter().map(SourceUnit::name).collect();
        assert_eq!(names, vec!["keep.src"]);
    }

    #[test]
    fn missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no-such-dir");
        let err = discover_sources(&missing).unwrap_err();
        assert!(matches!(err, BatchError::SourceRootNotFound { path } if path == missing));
    }

    #[test]
    fn empty_tree_discovers_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(discover_sources(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn discovery_is_deterministic() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("b.src"));
        touch(&dir.path().join("a/c.src"));

        let first = discover_sources(dir.path()).unwrap();
        let second = discover_sources(dir.path()).unwrap();
        assert_eq!(first, second);
    }
}
