//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use layerforge_core::{
    application::{ApplicationError, ports::Filesystem},
    error::ForgeResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can hand one clone to the generator and
/// inspect the other. Writes follow the same rules as the real adapter:
/// directories are idempotent, files are exclusive, and a file in the way of
/// a directory is a `PathConflict`.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing directories (e.g. the target of a test run).
    pub fn with_dirs<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let fs = Self::new();
        {
            let mut inner = fs.write();
            for dir in dirs {
                insert_with_ancestors(&mut inner.directories, dir.as_ref());
            }
        }
        fs
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.read().files.get(path).cloned()
    }

    /// Put a file in place, bypassing exclusivity (testing helper).
    pub fn seed_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        let mut inner = self.write();
        if let Some(parent) = path.parent() {
            insert_with_ancestors(&mut inner.directories, parent);
        }
        inner.files.insert(path, content.into());
    }

    /// All files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read().files.keys().cloned().collect()
    }

    /// All directories, sorted.
    pub fn list_dirs(&self) -> Vec<PathBuf> {
        self.read().directories.iter().cloned().collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner.write().unwrap_or_else(|p| p.into_inner())
    }
}

fn insert_with_ancestors(directories: &mut BTreeSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
        let mut inner = self.write();

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if inner.files.contains_key(&current) {
                return Err(ApplicationError::PathConflict { path: current }.into());
            }
        }

        insert_with_ancestors(&mut inner.directories, path);
        Ok(())
    }

    fn write_new(&self, path: &Path, content: &str) -> ForgeResult<()> {
        let mut inner = self.write();

        if inner.files.contains_key(path) || inner.directories.contains(path) {
            return Err(ApplicationError::AlreadyExists {
                path: path.to_path_buf(),
            }
            .into());
        }

        let parent_missing = path
            .parent()
            .is_some_and(|p| !p.as_os_str().is_empty() && !inner.directories.contains(p));
        if parent_missing {
            return Err(ApplicationError::WriteFailed {
                path: path.to_path_buf(),
                reason: "Parent directory does not exist".into(),
            }
            .into());
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.read();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read().directories.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerforge_core::error::ForgeError;

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let view = fs.clone();
        fs.create_dir_all(Path::new("/a/b")).unwrap();
        assert!(view.is_dir(Path::new("/a")));
        assert!(view.is_dir(Path::new("/a/b")));
        assert_eq!(
            view.list_dirs(),
            vec![PathBuf::from("/"), PathBuf::from("/a"), PathBuf::from("/a/b")]
        );
    }

    #[test]
    fn write_new_is_exclusive() {
        let fs = MemoryFilesystem::with_dirs(["/a"]);
        fs.write_new(Path::new("/a/f.dart"), "one").unwrap();

        let err = fs.write_new(Path::new("/a/f.dart"), "two").unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::AlreadyExists { .. })
        ));
        assert_eq!(fs.read_file(Path::new("/a/f.dart")).unwrap(), "one");
    }

    #[test]
    fn write_needs_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_new(Path::new("/missing/f.dart"), "x").is_err());
    }

    #[test]
    fn file_blocks_directory() {
        let fs = MemoryFilesystem::new();
        fs.seed_file("/a/ui", "oops");
        let err = fs.create_dir_all(Path::new("/a/ui/screens")).unwrap_err();
        assert_eq!(
            err,
            ForgeError::Application(ApplicationError::PathConflict {
                path: "/a/ui".into()
            })
        );
    }
}
