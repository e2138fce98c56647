//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the values it produces
//! (`ConflictPolicy`, `RenderOptions`, `ExtraLayout`, `PathPlanner`).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `LAYERFORGE__SECTION__KEY` (`.env` is loaded first)
//! 3. Config file: `--config FILE`, else the platform config dir
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use layerforge_core::{
    application::{ConflictPolicy, DEFAULT_WORKERS},
    domain::{DEFAULT_CONTAINER, ExtraLayout, PathPlanner, RenderOptions},
};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "LAYERFORGE";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generation: GenerationConfig,
    pub layers: LayersConfig,
    pub templates: TemplateConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub conflict_policy: ConflictPolicy,
    pub workers: usize,
    pub equatable: bool,
    pub container: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            conflict_policy: ConflictPolicy::default(),
            workers: DEFAULT_WORKERS,
            equatable: false,
            container: DEFAULT_CONTAINER.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayersConfig {
    /// Mirror `lib/` directories into `test/`.
    pub test: bool,
    /// Extra directory templates.
    pub extra: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory of `<kind-id>.tmpl` overrides.
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append log events to this file as well as stderr.
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// `config_file` is the path passed via `--config`; it must exist.  When
    /// `None`, the platform config file is used if present.
    pub fn load(config_file: Option<&Path>) -> CliResult<Self> {
        Self::load_with(
            config_file,
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
    }

    fn load_with(config_file: Option<&Path>, env: Environment) -> CliResult<Self> {
        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;
        let mut builder = Config::builder().add_source(defaults);

        builder = match config_file {
            Some(path) => {
                debug!(path = %path.display(), "using explicit config file");
                builder.add_source(File::from(path).format(FileFormat::Toml).required(true))
            }
            None => {
                let path = Self::config_path();
                debug!(path = %path.display(), "using default config file if present");
                builder.add_source(File::from(path).format(FileFormat::Toml).required(false))
            }
        };

        let config: Self = builder
            .add_source(env)
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .map_err(config_error)?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the generator cannot run with.
    pub fn validate(&self) -> CliResult<()> {
        if self.generation.workers == 0 {
            return Err(CliError::ConfigError {
                message: "generation.workers must be at least 1".into(),
                source: None,
            });
        }
        self.planner()?;
        Ok(())
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.layerforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "layerforge", "layerforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".layerforge.toml"))
    }

    // ── Values handed to the core ─────────────────────────────────────────

    pub fn planner(&self) -> CliResult<PathPlanner> {
        PathPlanner::new(self.generation.container.as_str()).map_err(|e| CliError::ConfigError {
            message: format!("generation.container: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// `--fail-fast` wins over the configured policy.
    pub fn policy(&self, fail_fast: bool) -> ConflictPolicy {
        if fail_fast {
            ConflictPolicy::FailFast
        } else {
            self.generation.conflict_policy
        }
    }

    pub fn render_options(&self, equatable: bool) -> RenderOptions {
        RenderOptions {
            equatable: equatable || self.generation.equatable,
        }
    }

    pub fn extras(&self) -> ExtraLayout {
        ExtraLayout {
            templates: self.layers.extra.clone(),
            mirror_tests: self.layers.test,
        }
    }

    /// Look up a dotted key such as `generation.workers`.
    pub fn get(&self, key: &str) -> CliResult<serde_json::Value> {
        let root = serde_json::to_value(self).map_err(|e| CliError::ConfigError {
            message: format!("failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })?;

        key.split('.')
            .try_fold(&root, |value, segment| value.get(segment))
            .cloned()
            .ok_or_else(|| CliError::ConfigError {
                message: format!("unknown config key: '{key}'"),
                source: None,
            })
    }
}

fn config_error(e: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}
