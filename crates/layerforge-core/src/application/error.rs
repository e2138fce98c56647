//! Application layer errors.
//!
//! These errors represent failures while touching the filesystem or the
//! template collaborator, not invalid input. Input errors are `DomainError`
//! from `crate::domain`.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::TemplateKind;
use crate::error::ErrorCategory;

/// Orchestration phase a batch failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedPhase {
    Directories,
    Files,
}

impl fmt::Display for FailedPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directories => f.write_str("directory creation"),
            Self::Files => f.write_str("file generation"),
        }
    }
}

/// Errors that occur during generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// A planned file path is already occupied.
    #[error("File already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// A planned directory path is occupied by something else.
    #[error("Path exists and is not a directory: {path}")]
    PathConflict { path: PathBuf },

    /// Creating a directory failed.
    #[error("Failed to create directory {path}: {reason}")]
    DirectoryCreateFailed { path: PathBuf, reason: String },

    /// Writing a file failed.
    #[error("Failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    /// The template collaborator could not produce a body.
    #[error("Template '{kind}' could not be rendered: {reason}")]
    RenderingFailed { kind: TemplateKind, reason: String },

    /// One or more independent operations of a batch failed.
    #[error("{} during {phase}:{}", count_label(.failures.len()), render_list(.failures))]
    GenerationFailed {
        phase: FailedPhase,
        failures: Vec<ApplicationError>,
        /// Files written before the batch was joined.
        created: Vec<PathBuf>,
    },
}

fn count_label(n: usize) -> String {
    if n == 1 {
        "1 error".to_string()
    } else {
        format!("{n} errors")
    }
}

fn render_list(failures: &[ApplicationError]) -> String {
    failures.iter().map(|f| format!("\n  - {f}")).collect()
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AlreadyExists { path } => vec![
                format!("'{}' is already there", path.display()),
                "Choose a different feature name".into(),
                "Or remove the existing file first; layerforge never overwrites".into(),
            ],
            Self::PathConflict { path } => vec![
                format!("A file is blocking the directory '{}'", path.display()),
                "Rename or remove that file and try again".into(),
            ],
            Self::DirectoryCreateFailed { path, .. } | Self::WriteFailed { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::RenderingFailed { .. } => vec![
                "Check the template override directory (templates.local_path)".into(),
            ],
            Self::GenerationFailed { created, .. } => {
                let leaves = self.leaves();
                let mut out = Vec::new();
                if !created.is_empty() {
                    out.push(format!(
                        "{} file(s) were created before the failure and were left in place",
                        created.len()
                    ));
                }
                if leaves
                    .iter()
                    .any(|f| matches!(f, Self::AlreadyExists { .. }))
                {
                    out.push("The feature seems to exist already; pick another name".into());
                }
                if let Some(first) = leaves.first() {
                    out.extend(first.suggestions().into_iter().skip(1));
                }
                out.dedup();
                out
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AlreadyExists { .. } | Self::PathConflict { .. } => ErrorCategory::Conflict,
            Self::DirectoryCreateFailed { .. } | Self::WriteFailed { .. } => {
                ErrorCategory::Internal
            }
            Self::RenderingFailed { .. } => ErrorCategory::Configuration,
            Self::GenerationFailed { .. } => self
                .leaves()
                .into_iter()
                .map(Self::category)
                .find(|c| *c != ErrorCategory::Conflict)
                .unwrap_or(ErrorCategory::Conflict),
        }
    }

    /// The path a single failure is about.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::AlreadyExists { path }
            | Self::PathConflict { path }
            | Self::DirectoryCreateFailed { path, .. }
            | Self::WriteFailed { path, .. } => Some(path),
            Self::RenderingFailed { .. } | Self::GenerationFailed { .. } => None,
        }
    }

    /// Every leaf failure, flattening aggregates.
    pub fn leaves(&self) -> Vec<&ApplicationError> {
        match self {
            Self::GenerationFailed { failures, .. } => {
                failures.iter().flat_map(Self::leaves).collect()
            }
            other => vec![other],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exists(p: &str) -> ApplicationError {
        ApplicationError::AlreadyExists { path: p.into() }
    }

    #[test]
    fn aggregate_message_lists_every_failure() {
        let err = ApplicationError::GenerationFailed {
            phase: FailedPhase::Files,
            failures: vec![exists("/a/x.dart"), exists("/a/y.dart")],
            created: vec![],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("2 errors during file generation"));
        assert!(msg.contains("/a/x.dart"));
        assert!(msg.contains("/a/y.dart"));
    }

    #[test]
    fn aggregate_of_conflicts_is_a_conflict() {
        let err = ApplicationError::GenerationFailed {
            phase: FailedPhase::Files,
            failures: vec![exists("/a")],
            created: vec![],
        };
        assert_eq!(err.category(), ErrorCategory::Conflict);
    }

    #[test]
    fn aggregate_with_io_failure_is_internal() {
        let err = ApplicationError::GenerationFailed {
            phase: FailedPhase::Files,
            failures: vec![
                exists("/a"),
                ApplicationError::WriteFailed {
                    path: "/b".into(),
                    reason: "disk full".into(),
                },
            ],
            created: vec![],
        };
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn partial_scaffold_is_mentioned() {
        let err = ApplicationError::GenerationFailed {
            phase: FailedPhase::Files,
            failures: vec![exists("/a")],
            created: vec!["/b".into()],
        };
        assert!(err.suggestions()[0].contains("1 file(s) were created"));
    }

    #[test]
    fn leaves_flatten_nested_aggregates() {
        let inner = ApplicationError::GenerationFailed {
            phase: FailedPhase::Files,
            failures: vec![exists("/a"), exists("/b")],
            created: vec![],
        };
        let outer = ApplicationError::GenerationFailed {
            phase: FailedPhase::Files,
            failures: vec![inner, exists("/c")],
            created: vec![],
        };
        assert_eq!(outer.leaves().len(), 3);
    }

    #[test]
    fn nested_io_failure_decides_category_and_hints() {
        let inner = ApplicationError::GenerationFailed {
            phase: FailedPhase::Files,
            failures: vec![ApplicationError::WriteFailed {
                path: "/b".into(),
                reason: "disk full".into(),
            }],
            created: vec![],
        };
        let outer = ApplicationError::GenerationFailed {
            phase: FailedPhase::Files,
            failures: vec![inner, exists("/c")],
            created: vec![],
        };
        assert_eq!(outer.category(), ErrorCategory::Internal);

        let hints = outer.suggestions();
        assert!(hints.iter().any(|h| h.contains("pick another name")));
        assert!(hints.iter().any(|h| h.contains("write permissions")));
    }
}
