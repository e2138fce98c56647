//! Idempotent directory creation.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::application::ports::Filesystem;
use crate::domain::DirectoryGroup;
use crate::error::{ForgeError, ForgeResult};

/// Ensures directories exist; an existing directory is a no-op, never an
/// error.
pub struct DirectoryBuilder<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> DirectoryBuilder<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Create `path` and every missing ancestor.
    pub fn ensure(&self, path: &Path) -> ForgeResult<()> {
        if self.fs.is_dir(path) {
            debug!(path = %path.display(), "directory exists");
            return Ok(());
        }
        self.fs.create_dir_all(path)?;
        debug!(path = %path.display(), "directory created");
        Ok(())
    }

    /// Ensure `group.root`, then every child.
    ///
    /// Children are independent of each other; all of them are attempted
    /// and every failure is returned.
    pub fn ensure_many(&self, group: &DirectoryGroup) -> Result<(), Vec<(PathBuf, ForgeError)>> {
        if let Err(e) = self.ensure(&group.root) {
            return Err(vec![(group.root.clone(), e)]);
        }

        let failures: Vec<_> = group
            .children
            .iter()
            .filter_map(|child| self.ensure(child).err().map(|e| (child.clone(), e)))
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures)
        }
    }
}
