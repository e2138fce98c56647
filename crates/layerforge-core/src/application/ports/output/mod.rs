//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the generator needs from external systems.
//! The `layerforge-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{FeatureName, RenderOptions, TemplateKind};
use crate::error::ForgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `layerforge_adapters::filesystem::LocalFilesystem` (production)
/// - `layerforge_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Implementations are shared by every worker of a fan-out, so all methods
/// take `&self` and must tolerate concurrent calls on disjoint paths.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all missing parents.
    ///
    /// Succeeds when the directory already exists. Fails with
    /// `ApplicationError::PathConflict` when something other than a directory
    /// occupies `path` or one of its ancestors.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Create `path` with `content`, failing if it already exists.
    ///
    /// The file must never be observable half-written: it either appears
    /// with its full content or not at all. An occupied path yields
    /// `ApplicationError::AlreadyExists` and leaves the existing entry
    /// untouched.
    fn write_new(&self, path: &Path, content: &str) -> ForgeResult<()>;

    /// Check if anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Check if `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `layerforge_adapters::renderer::BuiltinRenderer` (bundled bodies)
/// - `layerforge_adapters::renderer::DirectoryRenderer` (user overrides)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Produce the full text of one generated file.
    fn render(
        &self,
        kind: TemplateKind,
        name: &FeatureName,
        options: &RenderOptions,
    ) -> ForgeResult<String>;
}
