//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "layerforge",
    bin_name = "layerforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Layered feature scaffolding for Flutter projects",
    long_about = "layerforge inserts a new feature into an existing project tree: \
                  eight layer directories and twelve starter Dart files, wired \
                  together and never overwriting anything already there.",
    after_help = "EXAMPLES:\n\
        \x20 layerforge new login --target ./lib\n\
        \x20 layerforge new user_profile --target ./lib --equatable\n\
        \x20 layerforge new login --target ./lib --dry-run\n\
        \x20 layerforge completions bash > /usr/share/bash-completion/completions/layerforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold a new feature.
    #[command(
        visible_alias = "n",
        about = "Scaffold a new feature",
        after_help = "EXAMPLES:\n\
            \x20 layerforge new login --target ./lib\n\
            \x20 layerforge new login --target ./lib --fail-fast\n\
            \x20 layerforge new          # prompts for name and target"
    )]
    New(NewArgs),

    /// Show the layer topology and the files generated per feature.
    #[command(
        visible_alias = "ls",
        about = "List layers and generated files",
        after_help = "EXAMPLES:\n\
            \x20 layerforge list\n\
            \x20 layerforge list --format json"
    )]
    List(ListArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 layerforge init\n\
            \x20 layerforge init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 layerforge completions bash > ~/.local/share/bash-completion/completions/layerforge\n\
            \x20 layerforge completions zsh  > ~/.zfunc/_layerforge\n\
            \x20 layerforge completions fish > ~/.config/fish/completions/layerforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the active configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 layerforge config get generation.workers\n\
            \x20 layerforge config list\n\
            \x20 layerforge config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `layerforge new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Feature identifier, e.g. `login` or `user_profile`.
    #[arg(value_name = "NAME", help = "Feature name (prompted if omitted)")]
    pub name: Option<String>,

    /// Existing directory the feature is inserted under.
    #[arg(
        short = 't',
        long = "target",
        value_name = "DIR",
        help = "Target directory (default: current directory)"
    )]
    pub target: Option<PathBuf>,

    /// Generate states that extend `Equatable`.
    #[arg(
        short = 'e',
        long = "equatable",
        help = "Use Equatable for the generated state classes"
    )]
    pub equatable: bool,

    /// Stop at the first failed file instead of collecting every failure.
    #[arg(long = "fail-fast", help = "Stop after the first failed file")]
    pub fail_fast: bool,

    /// Number of concurrent workers per phase.
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "N",
        value_parser = clap::value_parser!(u16).range(1..),
        help = "Concurrent workers per phase"
    )]
    pub workers: Option<u16>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `layerforge list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,

    /// Only show one layer.
    #[arg(
        short = 'l',
        long = "layer",
        value_name = "LAYER",
        help = "Only show this layer (infra, domain, usecases, ...)"
    )]
    pub layer: Option<String>,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One relative file path per line.
    List,
    /// JSON object.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `layerforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `layerforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `layerforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generation.workers`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_new_command() {
        let cli = Cli::parse_from([
            "layerforge",
            "new",
            "login",
            "--target",
            "lib",
            "--equatable",
            "--fail-fast",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.name.as_deref(), Some("login"));
        assert_eq!(args.target, Some(PathBuf::from("lib")));
        assert!(args.equatable);
        assert!(args.fail_fast);
        assert!(!args.dry_run);
    }

    #[test]
    fn name_and_target_are_optional() {
        let cli = Cli::parse_from(["layerforge", "new"]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert!(args.name.is_none());
        assert!(args.target.is_none());
    }

    #[test]
    fn zero_workers_is_rejected() {
        let result = Cli::try_parse_from(["layerforge", "new", "login", "-j", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn list_format_defaults_to_table() {
        let cli = Cli::parse_from(["layerforge", "ls"]);
        let Commands::List(args) = cli.command else {
            panic!("expected List command");
        };
        assert_eq!(args.format, ListFormat::Table);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["layerforge", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
