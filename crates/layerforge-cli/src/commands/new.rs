//! Implementation of the `layerforge new` command.
//!
//! Responsibility: resolve the feature name and target, build a
//! `GenerationRequest`, wire the adapters into the generator, and display
//! the result.  No layout rules live here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use layerforge_adapters::{BuiltinRenderer, DirectoryRenderer, LocalFilesystem};
use layerforge_core::{
    application::{ArchitectureGenerator, GenerationReport, GenerationRequest, TemplateRenderer},
    domain::{DomainError, FeatureName},
    error::ForgeError,
};

use crate::{
    cli::{GlobalArgs, NewArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt,
};

/// Execute the `layerforge new` command.
///
/// Dispatch sequence:
/// 1. Resolve the feature name and target (flags, then prompts)
/// 2. Build the request from flags and config
/// 3. Dry run: plan and print, nothing written
/// 4. Confirm unless `--yes`, quiet, or nobody is at the terminal
/// 5. Generate and report
#[instrument(skip_all, fields(feature = args.name.as_deref().unwrap_or("<prompt>")))]
pub fn execute(
    args: NewArgs,
    global: &GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let interactive = prompt::available() && !output.is_json();

    // 1. Name and target
    let name = match args.name.clone() {
        Some(name) => name,
        None if interactive => prompt::feature_name()?,
        None => return Err(prompt::missing("feature name", "NAME")),
    };
    // A bad name is reported before the target is even looked at.
    FeatureName::parse(&name).map_err(ForgeError::from)?;

    let target = match args.target.clone() {
        Some(target) => target,
        None if interactive && args.name.is_none() => prompt::target_directory()?,
        None => PathBuf::from("."),
    };
    let target = resolve_target(&target)?;

    // 2. Request + generator
    let request = build_request(&args, &config, name, target);
    debug!(
        target = %request.target.display(),
        policy = %request.policy,
        workers = request.workers,
        equatable = request.options.equatable,
        "request resolved"
    );
    let generator = build_generator(&config)?;

    // 3. Dry run
    if args.dry_run {
        let report = generator.plan(&request)?;
        return show_plan(&report, &request.target, &output);
    }

    // 4. Confirm
    if interactive && !args.yes && !global.quiet {
        let question = format!(
            "Create feature '{}' under {}?",
            request.name,
            request.target.display()
        );
        if !prompt::confirm(&question)? {
            return Err(CliError::Cancelled);
        }
    }

    // 5. Generate
    let spinner = output.spinner(&format!("Scaffolding '{}'...", request.name));
    let result = generator.generate(&request);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let report = result?;

    info!(
        feature = %report.feature.raw(),
        run_id = %report.run_id,
        files = report.files.len(),
        "feature scaffolded"
    );
    show_report(&report, &request.target, &output)
}

// ── Request construction ──────────────────────────────────────────────────────

/// The target must exist and be a directory; the result is absolute.
///
/// Symlinks are kept as typed: the container check looks at the last
/// segment the operator gave, not at where a link points.
fn resolve_target(target: &Path) -> CliResult<PathBuf> {
    let path = std::path::absolute(target).map_err(|e| invalid_target(target, e.to_string()))?;
    if !path.exists() {
        return Err(invalid_target(target, "directory does not exist".into()));
    }
    if !path.is_dir() {
        return Err(invalid_target(target, "not a directory".into()));
    }
    Ok(path)
}

fn invalid_target(path: &Path, reason: String) -> CliError {
    CliError::Core(ForgeError::Domain(DomainError::InvalidTargetDirectory {
        path: path.to_path_buf(),
        reason,
    }))
}

fn build_request(
    args: &NewArgs,
    config: &AppConfig,
    name: String,
    target: PathBuf,
) -> GenerationRequest {
    let workers = args
        .workers
        .map_or(config.generation.workers, usize::from);

    GenerationRequest::new(name, target)
        .with_options(config.render_options(args.equatable))
        .with_policy(config.policy(args.fail_fast))
        .with_workers(workers)
        .with_extras(config.extras())
}

fn build_generator(config: &AppConfig) -> CliResult<ArchitectureGenerator> {
    let renderer: Box<dyn TemplateRenderer> = match &config.templates.local_path {
        Some(dir) => {
            let renderer = DirectoryRenderer::load(dir, Box::new(BuiltinRenderer::new()))?;
            debug!(
                dir = %renderer.root().display(),
                overridden = renderer.overridden().len(),
                "using template overrides"
            );
            Box::new(renderer)
        }
        None => Box::new(BuiltinRenderer::new()),
    };

    Ok(
        ArchitectureGenerator::new(Box::new(LocalFilesystem::new()), renderer)
            .with_planner(config.planner()?),
    )
}

// ── UI helpers ────────────────────────────────────────────────────────────────

/// `path` relative to `base` when possible, for shorter listings.
fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn show_plan(report: &GenerationReport, target: &Path, out: &OutputManager) -> CliResult<()> {
    if out.is_json() {
        out.json(report)?;
        return Ok(());
    }

    out.info(&format!(
        "Dry run: would create feature '{}' at {}",
        report.title(),
        report.root.display()
    ))?;

    out.header(&format!("Directories ({})", report.directories.len()))?;
    for dir in &report.directories {
        out.detail(&display_relative(dir, target))?;
    }

    out.header(&format!("Files ({})", report.files.len()))?;
    for file in &report.files {
        out.detail(&display_relative(file, target))?;
    }
    Ok(())
}

fn show_report(report: &GenerationReport, target: &Path, out: &OutputManager) -> CliResult<()> {
    if out.is_json() {
        out.json(report)?;
        return Ok(());
    }

    out.success(&format!("Feature '{}' created", report.title()))?;
    out.detail(&format!(
        "{} directories, {} files under {}",
        report.directories.len(),
        report.files.len(),
        display_relative(&report.root, target)
    ))?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::fs;

    use layerforge_core::{application::ConflictPolicy, domain::PathPlanner};
    use tempfile::TempDir;

    use super::*;

    fn args(name: &str) -> NewArgs {
        NewArgs {
            name: Some(name.into()),
            target: None,
            equatable: false,
            fail_fast: false,
            workers: None,
            yes: true,
            dry_run: false,
        }
    }

    #[test]
    fn target_is_made_absolute() {
        let resolved = resolve_target(Path::new(".")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.is_dir());

        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("lib");
        fs::create_dir(&nested).unwrap();
        assert_eq!(resolve_target(&nested).unwrap(), nested);
    }

    #[test]
    #[cfg(unix)]
    fn symlinked_container_keeps_its_last_segment() {
        let tmp = TempDir::new().unwrap();
        let lib = tmp.path().join("proj/lib");
        let shared = tmp.path().join("shared_features");
        fs::create_dir_all(&lib).unwrap();
        fs::create_dir(&shared).unwrap();
        let modules = lib.join("modules");
        std::os::unix::fs::symlink(&shared, &modules).unwrap();

        let resolved = resolve_target(&modules).unwrap();
        assert_eq!(resolved, modules);
        assert_eq!(PathPlanner::default().container_for(&resolved), modules);
    }

    #[test]
    fn missing_target_is_invalid_target_directory() {
        let err = resolve_target(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(
            err,
            CliError::Core(ForgeError::Domain(DomainError::InvalidTargetDirectory { .. }))
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn file_target_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("main.dart");
        fs::write(&file, "void main() {}").unwrap();

        assert!(resolve_target(&file).is_err());
    }

    #[test]
    fn flags_override_config_in_request() {
        let mut config = AppConfig::default();
        config.generation.workers = 2;

        let mut new_args = args("login");
        new_args.fail_fast = true;
        new_args.equatable = true;
        new_args.workers = Some(7);

        let request = build_request(&new_args, &config, "login".into(), "/p/lib".into());
        assert_eq!(request.workers, 7);
        assert_eq!(request.policy, ConflictPolicy::FailFast);
        assert!(request.options.equatable);
    }

    #[test]
    fn config_fills_unset_flags() {
        let mut config = AppConfig::default();
        config.generation.workers = 2;
        config.layers.test = true;

        let request = build_request(&args("login"), &config, "login".into(), "/p/lib".into());
        assert_eq!(request.workers, 2);
        assert_eq!(request.policy, ConflictPolicy::CollectAll);
        assert!(request.extras.mirror_tests);
    }

    #[test]
    fn missing_override_directory_is_a_config_error() {
        let mut config = AppConfig::default();
        config.templates.local_path = Some("/no/such/templates".into());

        let err = build_generator(&config).err().unwrap();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn relative_display_strips_target() {
        assert_eq!(
            display_relative(Path::new("/p/lib/modules/login"), Path::new("/p/lib")),
            "modules/login"
        );
        assert_eq!(display_relative(Path::new("/elsewhere"), Path::new("/p")), "/elsewhere");
    }
}
