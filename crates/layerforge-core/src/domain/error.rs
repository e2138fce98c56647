// ============================================================================
// domain/error.rs - INPUT AND CATALOG ERRORS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// Everything here is detected before the filesystem is touched, so a
/// `DomainError` always means "nothing was created".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid feature name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Invalid target directory {path}: {reason}")]
    InvalidTargetDirectory { path: PathBuf, reason: String },

    #[error("Invalid container name '{name}': {reason}")]
    InvalidContainer { name: String, reason: String },

    // ========================================================================
    // Not Found Errors (404-level equivalent)
    // ========================================================================
    #[error("Unknown template kind: {0}")]
    UnknownTemplateKind(String),

    #[error("Unknown layer: {0}")]
    UnknownLayer(String),
}

impl DomainError {
    pub(crate) fn invalid_name(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_target(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidTargetDirectory {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { reason, .. } => vec![
                format!("Details: {reason}"),
                "Use a single word without spaces, e.g. login or get_products".into(),
                "Separate words with '_' or camelCase instead of spaces".into(),
            ],
            Self::InvalidTargetDirectory { path, .. } => vec![
                format!("Check that '{}' exists and is a directory", path.display()),
                "Pass an existing folder with --target".into(),
            ],
            Self::InvalidContainer { .. } => vec![
                "The container must be a single directory name, e.g. modules".into(),
                "Check generation.container in your configuration".into(),
            ],
            Self::UnknownTemplateKind(_) => vec!["Try: layerforge list".into()],
            Self::UnknownLayer(_) => vec!["Try: layerforge list".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. }
            | Self::InvalidTargetDirectory { .. }
            | Self::InvalidContainer { .. } => ErrorCategory::Validation,
            Self::UnknownTemplateKind(_) | Self::UnknownLayer(_) => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
