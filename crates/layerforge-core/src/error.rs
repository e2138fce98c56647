//! Unified error handling for Layerforge Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Layerforge Core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForgeError {
    /// Invalid input, detected before anything was created.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Filesystem or rendering failures during generation.
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl ForgeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Run `layerforge config path` to locate the active config file".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Layerforge".into(),
                "Please report this issue at: https://github.com/cosecruz/layerforge/issues"
                    .into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Collapse into an application error, attributing foreign failures to
    /// `path`. Used when a port error joins a batch aggregate.
    pub fn into_application(self, path: impl Into<PathBuf>) -> ApplicationError {
        match self {
            Self::Application(e) => e,
            other => ApplicationError::WriteFailed {
                path: path.into(),
                reason: other.to_string(),
            },
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type ForgeResult<T> = Result<T, ForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_are_validation() {
        let err: ForgeError = DomainError::InvalidName {
            name: "a b".into(),
            reason: "spaces are not allowed".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("a b"));
    }

    #[test]
    fn foreign_errors_become_write_failures() {
        let err = ForgeError::Internal {
            message: "boom".into(),
        };
        match err.into_application("/x") {
            ApplicationError::WriteFailed { path, reason } => {
                assert_eq!(path, PathBuf::from("/x"));
                assert!(reason.contains("boom"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
