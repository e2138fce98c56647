//! Interactive prompts for values left off the command line.
//!
//! Built only with the `interactive` feature; without it every prompt
//! reports [`CliError::FeatureNotAvailable`].

use std::io::{self, IsTerminal as _};
use std::path::PathBuf;

use crate::error::{CliError, CliResult};

/// `true` when prompting could reach a person.
pub fn available() -> bool {
    cfg!(feature = "interactive") && io::stdin().is_terminal() && io::stderr().is_terminal()
}

#[cfg(feature = "interactive")]
mod imp {
    use std::io;
    use std::path::{Path, PathBuf};

    use dialoguer::{Confirm, Input, theme::ColorfulTheme};
    use layerforge_core::domain::FeatureName;

    use crate::error::{CliError, CliResult};

    fn prompt_failed(e: dialoguer::Error) -> CliError {
        CliError::IoError {
            message: "failed to read from the terminal".into(),
            source: io::Error::other(e),
        }
    }

    pub fn feature_name() -> CliResult<String> {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Feature name")
            .validate_with(|input: &String| -> Result<(), String> {
                FeatureName::parse(input).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()
            .map_err(prompt_failed)
    }

    pub fn target_directory() -> CliResult<PathBuf> {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Target directory")
            .default(".".into())
            .validate_with(|input: &String| -> Result<(), String> {
                if Path::new(input).is_dir() {
                    Ok(())
                } else {
                    Err(format!("'{input}' is not a directory"))
                }
            })
            .interact_text()
            .map(PathBuf::from)
            .map_err(prompt_failed)
    }

    pub fn confirm(question: &str) -> CliResult<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .default(true)
            .interact()
            .map_err(prompt_failed)
    }
}

#[cfg(not(feature = "interactive"))]
mod imp {
    use std::path::PathBuf;

    use crate::error::{CliError, CliResult};

    fn unavailable() -> CliError {
        CliError::FeatureNotAvailable {
            feature: "interactive",
        }
    }

    pub fn feature_name() -> CliResult<String> {
        Err(unavailable())
    }

    pub fn target_directory() -> CliResult<PathBuf> {
        Err(unavailable())
    }

    pub fn confirm(_question: &str) -> CliResult<bool> {
        Err(unavailable())
    }
}

/// Ask for a feature name, re-prompting until it is valid.
pub fn feature_name() -> CliResult<String> {
    imp::feature_name()
}

/// Ask for the target directory (default `.`), re-prompting until it exists.
pub fn target_directory() -> CliResult<PathBuf> {
    imp::target_directory()
}

/// Yes/no question defaulting to yes.
pub fn confirm(question: &str) -> CliResult<bool> {
    imp::confirm(question)
}

/// The value was needed but nobody can be asked.
pub fn missing(what: &str, flag: &str) -> CliError {
    CliError::InvalidInput {
        message: format!("missing {what}; pass {flag}"),
        source: None,
    }
}
