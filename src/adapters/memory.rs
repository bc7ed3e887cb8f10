//! In-memory filesystem adapter.
//!
//! Lets fixture trees be described inline, for tests and for callers that
//! generate fixtures on the fly.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::ports::filesystem::FileSystem;

/// Filesystem held entirely in memory.
///
/// Every ancestor of an added file is implicitly a directory. Listings are
/// sorted by name.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: Mutex<BTreeMap<PathBuf, String>>,
    dirs: Mutex<BTreeSet<PathBuf>>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a file.
    pub fn add_file(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        let mut files = self.files.lock().expect("memory filesystem lock poisoned");
        files.insert(path.into(), contents.into());
    }

    /// Adds an empty directory.
    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        let mut dirs = self.dirs.lock().expect("memory filesystem lock poisoned");
        dirs.insert(path.into());
    }

    fn has_dir(&self, path: &Path) -> bool {
        let dirs = self.dirs.lock().expect("memory filesystem lock poisoned");
        if dirs.iter().any(|d| d.starts_with(path)) {
            return true;
        }
        drop(dirs);
        let files = self.files.lock().expect("memory filesystem lock poisoned");
        files.keys().any(|k| k.starts_with(path) && k != path)
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let files = self.files.lock().expect("memory filesystem lock poisoned");
        files.get(path).cloned().ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn exists(&self, path: &Path) -> bool {
        let is_file = {
            let files = self.files.lock().expect("memory filesystem lock poisoned");
            files.contains_key(path)
        };
        is_file || self.has_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.has_dir(path)
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        if !self.has_dir(path) {
            return Err(format!("Not a directory: {}", path.display()).into());
        }
        let files = self.files.lock().expect("memory filesystem lock poisoned");
        let dirs = self.dirs.lock().expect("memory filesystem lock poisoned");
        let mut names = BTreeSet::new();
        for entry in files.keys().chain(dirs.iter()) {
            for ancestor in entry.ancestors() {
                if ancestor.parent() == Some(path) {
                    if let Some(name) = ancestor.file_name() {
                        names.insert(name.to_string_lossy().into_owned());
                    }
                    break;
                }
            }
        }
        Ok(names.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ancestors_of_files_are_directories() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/root/group/suite/task/actual.js", "x");

        assert!(fs.is_dir(Path::new("/root/group/suite")));
        assert!(fs.exists(Path::new("/root/group/suite/task")));
        assert!(!fs.is_dir(Path::new("/root/group/suite/task/actual.js")));
        assert!(fs.exists(Path::new("/root/group/suite/task/actual.js")));
        assert!(!fs.exists(Path::new("/root/group/suite/task/expected.js")));
    }

    #[test]
    fn list_dir_returns_direct_children_sorted() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/root/b/x.js", "");
        fs.add_file("/root/a.md", "");
        fs.add_file("/root/b/y/z.js", "");
        fs.add_dir("/root/c");

        assert_eq!(fs.list_dir(Path::new("/root")).unwrap(), vec!["a.md", "b", "c"]);
        assert_eq!(fs.list_dir(Path::new("/root/b")).unwrap(), vec!["x.js", "y"]);
        assert!(fs.list_dir(Path::new("/root/c")).unwrap().is_empty());
    }

    #[test]
    fn list_dir_of_missing_path_fails() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/root/a.js", "");
        assert!(fs.list_dir(Path::new("/elsewhere")).is_err());
        assert!(fs.list_dir(Path::new("/root/a.js")).is_err());
    }

    #[test]
    fn read_missing_file_fails() {
        let fs = MemoryFileSystem::new();
        assert!(fs.read_to_string(Path::new("/nope")).is_err());
    }
}
