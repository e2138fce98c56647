//! Layerforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Layerforge
//! feature generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         layerforge-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ArchitectureGenerator, FileMaterial-  │
//! │   izer, DirectoryBuilder)               │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Driven: Filesystem, TemplateRenderer)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    layerforge-adapters (Infrastructure) │
//! │  (LocalFilesystem, BuiltinRenderer, ..) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (FeatureName, PathPlanner, TemplateSpec)│
//! │        No I/O, no tracing               │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use layerforge_core::prelude::*;
//! # fn adapters() -> (Box<dyn Filesystem>, Box<dyn TemplateRenderer>) { unimplemented!() }
//!
//! let (filesystem, renderer) = adapters();
//! let generator = ArchitectureGenerator::new(filesystem, renderer);
//!
//! let request = GenerationRequest::new("getProducts", "/proj/lib")
//!     .with_options(RenderOptions { equatable: true })
//!     .with_policy(ConflictPolicy::CollectAll);
//!
//! let report = generator.generate(&request)?;
//! assert_eq!(report.files.len(), 12);
//! # Ok::<(), ForgeError>(())
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ArchitectureGenerator, ConflictPolicy, GenerationReport, GenerationRequest,
        ports::{Filesystem, TemplateRenderer},
    };
    pub use crate::domain::{
        ExtraLayout, FeatureName, Layer, PathPlanner, RenderContext, RenderOptions,
        TEMPLATE_SPECS, TemplateKind,
    };
    pub use crate::error::{ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
