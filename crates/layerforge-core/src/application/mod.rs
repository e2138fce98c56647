//! Application layer for Layerforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (`ArchitectureGenerator`)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! layout rules itself. Paths and names come from `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ArchitectureGenerator, ConflictPolicy, GenerationPhase, GenerationReport, GenerationRequest,
    DEFAULT_WORKERS,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TemplateRenderer};

pub use error::{ApplicationError, FailedPhase};
