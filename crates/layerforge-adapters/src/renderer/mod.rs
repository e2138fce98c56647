//! Template renderers.
//!
//! - [`BuiltinRenderer`]: the bodies bundled in [`crate::builtin_templates`]
//! - [`DirectoryRenderer`]: per-kind overrides from a user directory, falling
//!   back to another renderer

mod builtin;
mod directory;

pub use builtin::BuiltinRenderer;
pub use directory::{DirectoryRenderer, OVERRIDE_EXTENSION, OverrideError};
