use std::path::Path;

use crate::domain::{error::DomainError, naming::FeatureName};

/// Centralized domain validation.
///
/// Checks that need the filesystem (does the target exist?) live in the
/// generator, behind the `Filesystem` port.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_name(raw: &str) -> Result<FeatureName, DomainError> {
        FeatureName::parse(raw)
    }

    pub fn validate_target_path(target: &Path) -> Result<(), DomainError> {
        if target.as_os_str().is_empty() {
            return Err(DomainError::invalid_target(target, "no directory selected"));
        }
        if !target.is_absolute() {
            return Err(DomainError::invalid_target(
                target,
                "target directory must be an absolute path",
            ));
        }
        Ok(())
    }
}
