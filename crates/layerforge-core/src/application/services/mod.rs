//! Application services - orchestrate use cases.
//!
//! `ArchitectureGenerator` is the single use case ("scaffold a feature");
//! the other services are its building blocks.

mod directory_builder;
mod fan_out;
mod generator;
mod materializer;

pub use directory_builder::DirectoryBuilder;
pub use generator::{
    ArchitectureGenerator, ConflictPolicy, DEFAULT_WORKERS, GenerationPhase, GenerationReport,
    GenerationRequest,
};
pub use materializer::FileMaterializer;
