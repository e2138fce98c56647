//! One template kind, one file.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::{
    ApplicationError,
    ports::{Filesystem, TemplateRenderer},
};
use crate::domain::{FeatureName, RenderOptions, TemplateSpec};
use crate::error::ForgeResult;

/// Writes a single rendered template.
///
/// The materializer never creates directories; the directory phase of the
/// generator has already ensured them.
pub struct FileMaterializer<'a> {
    fs: &'a dyn Filesystem,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> FileMaterializer<'a> {
    pub fn new(fs: &'a dyn Filesystem, renderer: &'a dyn TemplateRenderer) -> Self {
        Self { fs, renderer }
    }

    /// Create `layer_dir/<subdirectory>/<snake>_<suffix>.<ext>`.
    ///
    /// An occupied target fails with `AlreadyExists` before the template is
    /// rendered. The existence check is a single point in time; the port's
    /// exclusive write is what keeps an existing file intact if something
    /// else creates it in between.
    pub fn materialize(
        &self,
        spec: &TemplateSpec,
        name: &FeatureName,
        layer_dir: &Path,
        options: &RenderOptions,
    ) -> ForgeResult<PathBuf> {
        let path = spec.file_path(layer_dir, name);

        if self.fs.exists(&path) {
            warn!(path = %path.display(), kind = %spec.kind, "file already exists");
            return Err(ApplicationError::AlreadyExists { path }.into());
        }

        let body = self.renderer.render(spec.kind, name, options)?;
        self.fs.write_new(&path, &body)?;

        debug!(path = %path.display(), bytes = body.len(), "file written");
        Ok(path)
    }
}
