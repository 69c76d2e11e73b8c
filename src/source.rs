//! File-system access used by discovery and validation.
//!
//! All paths handed to a [`FileSource`] are relative to its root. Absolute
//! paths are accepted and used as-is.

use crate::error::DiscoveryError;
use glob::{MatchOptions, Pattern};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Glob options shared by every source so `*` never crosses a directory.
pub(crate) const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Read-only view of a directory tree.
pub trait FileSource {
    /// Returns true when `path` names an existing regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Expands a glob pattern into the regular files it matches.
    ///
    /// Order is unspecified; callers sort.
    fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError>;

    /// Reads the raw bytes of a file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// A [`FileSource`] backed by the operating system, rooted at a directory.
#[derive(Clone, Debug)]
pub struct OsFiles {
    root: PathBuf,
}

impl OsFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// Strips the root prefix so reported paths stay relative.
    fn relativize(&self, path: PathBuf) -> PathBuf {
        match path.strip_prefix(&self.root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => path,
        }
    }
}

impl FileSource for OsFiles {
    fn is_file(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
        let full = if Path::new(pattern).is_absolute() {
            pattern.to_string()
        } else {
            let root = Pattern::escape(&self.root.to_string_lossy());
            format!("{}/{}", root.trim_end_matches('/'), pattern)
        };

        let paths = glob::glob_with(&full, MATCH_OPTIONS).map_err(|e| DiscoveryError::Pattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        let mut files = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| DiscoveryError::Io {
                path: e.path().to_path_buf(),
                source: e.into(),
            })?;
            if path.is_file() {
                files.push(self.relativize(path));
            }
        }
        Ok(files)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(self.resolve(path))
    }
}

/// An in-memory [`FileSource`], for embedding callers that already hold
/// file contents and for tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryFiles {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemoryFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a file.
    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Builder-style variant of [`MemoryFiles::insert`].
    pub fn with(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }
}

impl FileSource for MemoryFiles {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
        let compiled = Pattern::new(pattern).map_err(|e| DiscoveryError::Pattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(self
            .files
            .keys()
            .filter(|p| compiled.matches_path_with(p, MATCH_OPTIONS))
            .cloned()
            .collect())
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }
}
