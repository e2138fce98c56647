//! Local filesystem adapter using std::fs.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use layerforge_core::{
    application::{ApplicationError, ports::Filesystem},
    error::ForgeResult,
};
use tempfile::NamedTempFile;
use tracing::trace;

/// Production filesystem implementation using `std::fs`.
///
/// New files are staged in a temporary file next to their destination and
/// moved into place with a no-clobber rename, so a file is either complete
/// or absent and an existing file is never replaced.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
        if let Some(blocker) = first_non_directory(path) {
            return Err(ApplicationError::PathConflict { path: blocker }.into());
        }

        std::fs::create_dir_all(path).map_err(|e| {
            // Lost a race against something creating a file on the way.
            let err = match first_non_directory(path) {
                Some(blocker) => ApplicationError::PathConflict { path: blocker },
                None => ApplicationError::DirectoryCreateFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                },
            };
            err.into()
        })
    }

    fn write_new(&self, path: &Path, content: &str) -> ForgeResult<()> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| write_failed(path, "path has no parent directory"))?;

        let mut staged = NamedTempFile::new_in(parent).map_err(|e| write_failed(path, e))?;
        staged
            .write_all(content.as_bytes())
            .and_then(|()| staged.flush())
            .map_err(|e| write_failed(path, e))?;

        trace!(staged = %staged.path().display(), path = %path.display(), "persisting");

        // The staged file is deleted when the error is dropped.
        staged.persist_noclobber(path).map_err(|e| {
            if e.error.kind() == io::ErrorKind::AlreadyExists {
                ApplicationError::AlreadyExists {
                    path: path.to_path_buf(),
                }
                .into()
            } else {
                write_failed(path, e.error)
            }
        })?;

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        // Dangling symlinks occupy the name too.
        path.symlink_metadata().is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// The shallowest ancestor of `path` (itself included) that exists but is
/// not a directory.
fn first_non_directory(path: &Path) -> Option<PathBuf> {
    let mut ancestors: Vec<&Path> = path.ancestors().collect();
    ancestors.reverse();
    ancestors
        .into_iter()
        .find(|a| !a.as_os_str().is_empty() && a.exists() && !a.is_dir())
        .map(Path::to_path_buf)
}

fn write_failed(path: &Path, reason: impl ToString) -> layerforge_core::error::ForgeError {
    ApplicationError::WriteFailed {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
    .into()
}
