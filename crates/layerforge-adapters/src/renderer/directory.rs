//! User template overrides.
//!
//! An override directory holds one `<kind-id>.tmpl` file per replaced kind:
//!
//! ```text
//! ~/.config/layerforge/templates/
//! ├── cubit.tmpl
//! └── presenter-factory.tmpl
//! ```
//!
//! Bodies use the same `{{VARIABLE}}` placeholders as the bundled ones.
//! Kinds without a file fall through to the wrapped renderer.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use layerforge_core::{
    application::ports::TemplateRenderer,
    domain::{DomainError, FeatureName, RenderContext, RenderOptions, TemplateKind},
    error::{ForgeError, ForgeResult},
};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

/// File extension marking an override body.
pub const OVERRIDE_EXTENSION: &str = "tmpl";

/// Why one override file was skipped.
#[derive(Debug, Error)]
pub enum OverrideError {
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} does not name a template kind")]
    UnknownKind {
        path: PathBuf,
        #[source]
        source: DomainError,
    },
}

/// Renders overridden kinds from files, everything else via `fallback`.
pub struct DirectoryRenderer {
    root: PathBuf,
    overrides: HashMap<TemplateKind, String>,
    fallback: Box<dyn TemplateRenderer>,
}

impl DirectoryRenderer {
    /// Scan `root` (non-recursively) for override bodies.
    ///
    /// # Errors
    ///
    /// Returns `ForgeError::Configuration` if `root` is not a directory.
    /// Individual files that cannot be read or do not name a kind are
    /// **skipped with a `WARN` log** rather than failing the whole scan.
    #[instrument(skip_all, fields(dir = %root.as_ref().display()))]
    pub fn load(root: impl AsRef<Path>, fallback: Box<dyn TemplateRenderer>) -> ForgeResult<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(ForgeError::Configuration {
                message: format!("template directory not found: {}", root.display()),
            });
        }

        let mut overrides = HashMap::new();
        for entry in WalkDir::new(root).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(OVERRIDE_EXTENSION)
            {
                continue;
            }

            match read_override(path) {
                Ok((kind, body)) => {
                    debug!(kind = %kind, path = %path.display(), "loaded override");
                    overrides.insert(kind, body);
                }
                Err(e) => warn!(error = %e, "skipping template override"),
            }
        }

        debug!(count = overrides.len(), "finished loading overrides");
        Ok(Self {
            root: root.to_path_buf(),
            overrides,
            fallback,
        })
    }

    /// The scanned directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Kinds replaced by a file, in catalog order.
    pub fn overridden(&self) -> Vec<TemplateKind> {
        TemplateKind::ALL
            .into_iter()
            .filter(|kind| self.overrides.contains_key(kind))
            .collect()
    }
}

fn read_override(path: &Path) -> Result<(TemplateKind, String), OverrideError> {
    let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let kind = stem
        .parse::<TemplateKind>()
        .map_err(|source| OverrideError::UnknownKind {
            path: path.to_path_buf(),
            source,
        })?;

    let body = fs::read_to_string(path).map_err(|source| OverrideError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    Ok((kind, body))
}

impl TemplateRenderer for DirectoryRenderer {
    fn render(
        &self,
        kind: TemplateKind,
        name: &FeatureName,
        options: &RenderOptions,
    ) -> ForgeResult<String> {
        match self.overrides.get(&kind) {
            Some(body) => Ok(RenderContext::new(name, options).render(body)),
            None => self.fallback.render(kind, name, options),
        }
    }
}
