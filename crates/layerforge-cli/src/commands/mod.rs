//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into core requests and render the
//! result.  No layout or naming rules live here.

pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod new;
