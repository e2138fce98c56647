//! Architecture Generator - main application orchestrator.
//!
//! This service drives one feature scaffold through its phases:
//!
//! ```text
//! ValidatingInput → PlanningPaths → CreatingLayerDirectories → EmittingFiles → Done
//!        └────────────────┴──────────────────┴────────────────────┴──→ Failed
//! ```
//!
//! 1. Validate the feature name and target directory (no side effects)
//! 2. Plan every path once with `PathPlanner`
//! 3. Ensure every directory, fanned out over a fixed worker pool
//! 4. Materialize one file per `TemplateSpec`, fanned out the same way
//!
//! The join after step 3 is a hard barrier: no file is written until every
//! directory exists. Nothing is rolled back on failure.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError, FailedPhase,
        ports::{Filesystem, TemplateRenderer},
        services::{DirectoryBuilder, FileMaterializer, fan_out},
    },
    domain::{
        DomainError, DomainValidator as validator, ExtraLayout, FeatureName, FeaturePlan,
        PathPlanner, RenderOptions, TEMPLATE_SPECS,
    },
    error::ForgeResult,
};

/// Worker count used when a request does not set one.
pub const DEFAULT_WORKERS: usize = 4;

// ── Policy ───────────────────────────────────────────────────────────────────

/// What the file phase does after its first failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// Attempt every file and report all failures together.
    #[default]
    CollectAll,
    /// Stop handing out files once any write has failed.
    FailFast,
}

impl ConflictPolicy {
    fn stops_early(self) -> bool {
        matches!(self, Self::FailFast)
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CollectAll => f.write_str("collect-all"),
            Self::FailFast => f.write_str("fail-fast"),
        }
    }
}

// ── Phases ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    ValidatingInput,
    PlanningPaths,
    CreatingLayerDirectories,
    EmittingFiles,
    Done,
    Failed,
}

impl fmt::Display for GenerationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ValidatingInput => "validating-input",
            Self::PlanningPaths => "planning-paths",
            Self::CreatingLayerDirectories => "creating-layer-directories",
            Self::EmittingFiles => "emitting-files",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

// ── Request / Report ─────────────────────────────────────────────────────────

/// Everything one invocation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Raw feature name as typed; validated in `ValidatingInput`.
    pub name: String,
    /// Absolute, existing directory the feature is inserted under.
    pub target: PathBuf,
    pub options: RenderOptions,
    pub policy: ConflictPolicy,
    pub workers: usize,
    pub extras: ExtraLayout,
}

impl GenerationRequest {
    pub fn new(name: impl Into<String>, target: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            options: RenderOptions::default(),
            policy: ConflictPolicy::default(),
            workers: DEFAULT_WORKERS,
            extras: ExtraLayout::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_extras(mut self, extras: ExtraLayout) -> Self {
        self.extras = extras;
        self
    }
}

/// What a run created (or, for a dry run, would create).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub feature: FeatureName,
    pub root: PathBuf,
    pub dry_run: bool,
    /// Every ensured directory, sorted.
    pub directories: Vec<PathBuf>,
    /// Every written file, sorted.
    pub files: Vec<PathBuf>,
}

impl GenerationReport {
    /// Human-friendly feature name for notifications.
    pub fn title(&self) -> String {
        self.feature.title()
    }
}

// ── Generator ────────────────────────────────────────────────────────────────

/// Main scaffolding service.
pub struct ArchitectureGenerator {
    filesystem: Box<dyn Filesystem>,
    renderer: Box<dyn TemplateRenderer>,
    planner: PathPlanner,
}

impl ArchitectureGenerator {
    /// Create a generator using the default `modules` container.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use layerforge_core::application::{ArchitectureGenerator, GenerationRequest};
    /// # fn adapters() -> (Box<dyn layerforge_core::application::Filesystem>, Box<dyn layerforge_core::application::TemplateRenderer>) { unimplemented!() }
    ///
    /// let (filesystem, renderer) = adapters();
    /// let generator = ArchitectureGenerator::new(filesystem, renderer);
    /// let report = generator.generate(&GenerationRequest::new("login", "/proj/lib"))?;
    /// println!("Feature '{}' created", report.title());
    /// # Ok::<(), layerforge_core::error::ForgeError>(())
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>, renderer: Box<dyn TemplateRenderer>) -> Self {
        Self {
            filesystem,
            renderer,
            planner: PathPlanner::default(),
        }
    }

    /// Use a custom container directory name.
    pub fn with_planner(mut self, planner: PathPlanner) -> Self {
        self.planner = planner;
        self
    }

    /// Validate and plan without touching the filesystem.
    #[instrument(
        skip_all,
        fields(feature = %request.name, target = %request.target.display())
    )]
    pub fn plan(&self, request: &GenerationRequest) -> ForgeResult<GenerationReport> {
        let run = Run::start();
        let name = self.validate(&run, request)?;
        let plan = self.plan_paths(&run, request, &name);

        let files = TEMPLATE_SPECS
            .iter()
            .map(|spec| plan.file_path(spec, &name))
            .collect();

        Ok(run.report(name, &plan, files, true))
    }

    /// Scaffold one feature.
    #[instrument(
        skip_all,
        fields(
            feature = %request.name,
            target = %request.target.display(),
            policy = %request.policy,
            run_id = tracing::field::Empty
        )
    )]
    pub fn generate(&self, request: &GenerationRequest) -> ForgeResult<GenerationReport> {
        let run = Run::start();
        tracing::Span::current().record("run_id", tracing::field::display(run.id));

        let name = self.validate(&run, request)?;
        let plan = self.plan_paths(&run, request, &name);

        if let Err(e) = self.create_directories(&run, request, &plan) {
            run.transition(GenerationPhase::Failed);
            return Err(e.into());
        }

        match self.emit_files(&run, request, &name, &plan) {
            Ok(files) => {
                run.transition(GenerationPhase::Done);
                info!(files = files.len(), root = %plan.root().display(), "Feature generated");
                Ok(run.report(name, &plan, files, false))
            }
            Err(e) => {
                run.transition(GenerationPhase::Failed);
                Err(e.into())
            }
        }
    }

    // -------------------------------------------------------------------------
    // Phases
    // -------------------------------------------------------------------------

    fn validate(&self, run: &Run, request: &GenerationRequest) -> ForgeResult<FeatureName> {
        run.transition(GenerationPhase::ValidatingInput);

        let checked = validator::validate_name(&request.name).and_then(|name| {
            validator::validate_target_path(&request.target)?;
            if !self.filesystem.is_dir(&request.target) {
                return Err(DomainError::InvalidTargetDirectory {
                    path: request.target.clone(),
                    reason: "directory does not exist".into(),
                });
            }
            Ok(name)
        });

        checked.map_err(|e| {
            run.transition(GenerationPhase::Failed);
            e.into()
        })
    }

    fn plan_paths(&self, run: &Run, request: &GenerationRequest, name: &FeatureName) -> FeaturePlan {
        run.transition(GenerationPhase::PlanningPaths);
        self.planner.plan(&request.target, name, &request.extras)
    }

    fn create_directories(
        &self,
        run: &Run,
        request: &GenerationRequest,
        plan: &FeaturePlan,
    ) -> Result<(), ApplicationError> {
        run.transition(GenerationPhase::CreatingLayerDirectories);

        let builder = DirectoryBuilder::new(self.filesystem.as_ref());
        let groups = plan.directory_groups();
        let outcome = fan_out::run(
            "dirs",
            &groups,
            request.workers,
            request.policy.stops_early(),
            |group| builder.ensure_many(group),
        );

        if outcome.failed.is_empty() {
            return Ok(());
        }

        let failures = sorted(
            outcome
                .failed
                .into_iter()
                .flatten()
                .map(|(path, e)| e.into_application(path))
                .collect(),
        );
        warn!(failures = failures.len(), "Directory phase failed; no files written");

        Err(ApplicationError::GenerationFailed {
            phase: FailedPhase::Directories,
            failures,
            created: Vec::new(),
        })
    }

    fn emit_files(
        &self,
        run: &Run,
        request: &GenerationRequest,
        name: &FeatureName,
        plan: &FeaturePlan,
    ) -> Result<Vec<PathBuf>, ApplicationError> {
        run.transition(GenerationPhase::EmittingFiles);

        let materializer = FileMaterializer::new(self.filesystem.as_ref(), self.renderer.as_ref());
        let outcome = fan_out::run(
            "files",
            &TEMPLATE_SPECS,
            request.workers,
            request.policy.stops_early(),
            |spec| {
                materializer
                    .materialize(spec, name, plan.layer(spec.layer), &request.options)
                    .map_err(|e| e.into_application(plan.file_path(spec, name)))
            },
        );

        let mut created = outcome.succeeded;
        created.sort();

        if outcome.failed.is_empty() {
            return Ok(created);
        }

        if outcome.skipped > 0 {
            warn!(skipped = outcome.skipped, "Stopped after first failure");
        }
        Err(ApplicationError::GenerationFailed {
            phase: FailedPhase::Files,
            failures: sorted(outcome.failed),
            created,
        })
    }
}

fn sorted(mut failures: Vec<ApplicationError>) -> Vec<ApplicationError> {
    failures.sort_by(|a, b| a.path().cmp(&b.path()));
    failures
}

/// Identity of one invocation.
struct Run {
    id: Uuid,
    started_at: DateTime<Utc>,
}

impl Run {
    fn start() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }

    fn transition(&self, phase: GenerationPhase) {
        match phase {
            GenerationPhase::Failed => warn!(run_id = %self.id, %phase, "phase"),
            _ => info!(run_id = %self.id, %phase, "phase"),
        }
    }

    fn report(
        self,
        feature: FeatureName,
        plan: &FeaturePlan,
        files: Vec<PathBuf>,
        dry_run: bool,
    ) -> GenerationReport {
        let mut directories = plan.directories();
        directories.sort();
        directories.dedup();
        let mut files = files;
        files.sort();

        GenerationReport {
            run_id: self.id,
            started_at: self.started_at,
            feature,
            root: plan.root().to_path_buf(),
            dry_run,
            directories,
            files,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::ports::{MockFilesystem, MockTemplateRenderer};
    use crate::error::ForgeError;

    const TARGET: &str = "/proj/lib";

    fn renderer() -> Box<dyn TemplateRenderer> {
        let mut renderer = MockTemplateRenderer::new();
        renderer
            .expect_render()
            .returning(|kind, name, _| Ok(format!("// {kind} for {}", name.pascal())));
        Box::new(renderer)
    }

    /// Target exists; every other directory is created on demand.
    fn accepting_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|p| p == Path::new(TARGET));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs
    }

    fn failures_of(err: ForgeError) -> (FailedPhase, Vec<ApplicationError>, Vec<PathBuf>) {
        match err {
            ForgeError::Application(ApplicationError::GenerationFailed {
                phase,
                failures,
                created,
            }) => (phase, failures, created),
            other => panic!("expected aggregate, got {other:?}"),
        }
    }

    #[test]
    fn invalid_name_touches_nothing() {
        let fs = MockFilesystem::new();
        let generator = ArchitectureGenerator::new(Box::new(fs), renderer());

        let err = generator
            .generate(&GenerationRequest::new("get products", TARGET))
            .unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Domain(DomainError::InvalidName { .. })
        ));
    }

    #[test]
    fn missing_target_is_rejected_before_mutation() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(false);
        fs.expect_create_dir_all().never();
        fs.expect_write_new().never();
        let generator = ArchitectureGenerator::new(Box::new(fs), renderer());

        let err = generator
            .generate(&GenerationRequest::new("login", "/nope"))
            .unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Domain(DomainError::InvalidTargetDirectory { .. })
        ));
    }

    #[test]
    fn writes_every_template_after_directories() {
        let order = Arc::new(Mutex::new(Vec::new()));

        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|p| p == Path::new(TARGET));
        let log = Arc::clone(&order);
        fs.expect_create_dir_all().returning(move |_| {
            log.lock().unwrap().push("dir");
            Ok(())
        });
        fs.expect_exists().return_const(false);
        let log = Arc::clone(&order);
        fs.expect_write_new().times(12).returning(move |_, _| {
            log.lock().unwrap().push("file");
            Ok(())
        });

        let generator = ArchitectureGenerator::new(Box::new(fs), renderer());
        let report = generator
            .generate(&GenerationRequest::new("login", TARGET).with_workers(8))
            .unwrap();

        assert_eq!(report.files.len(), 12);
        assert_eq!(report.directories.len(), 21);
        assert_eq!(report.root, PathBuf::from("/proj/lib/modules/login"));
        assert_eq!(report.title(), "Login");
        assert!(!report.dry_run);

        let order = order.lock().unwrap();
        let first_file = order.iter().position(|e| *e == "file").unwrap();
        assert!(order[first_file..].iter().all(|e| *e == "file"));
    }

    #[test]
    fn directory_failure_stops_before_files() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|p| p == Path::new(TARGET));
        fs.expect_create_dir_all().returning(|p| {
            if p.ends_with("ui") {
                Err(ApplicationError::PathConflict {
                    path: p.to_path_buf(),
                }
                .into())
            } else {
                Ok(())
            }
        });
        fs.expect_exists().never();
        fs.expect_write_new().never();

        let generator = ArchitectureGenerator::new(Box::new(fs), renderer());
        let err = generator
            .generate(&GenerationRequest::new("login", TARGET))
            .unwrap_err();

        let (phase, failures, created) = failures_of(err);
        assert_eq!(phase, FailedPhase::Directories);
        assert_eq!(
            failures,
            vec![ApplicationError::PathConflict {
                path: "/proj/lib/modules/login/ui".into()
            }]
        );
        assert!(created.is_empty());
    }

    #[test]
    fn collect_all_reports_every_conflict_sorted() {
        let mut fs = accepting_fs();
        fs.expect_exists().returning(|p| {
            p.ends_with("login_screen.dart") || p.ends_with("login_repository.dart")
        });
        fs.expect_write_new().returning(|_, _| Ok(()));

        let generator = ArchitectureGenerator::new(Box::new(fs), renderer());
        let err = generator
            .generate(&GenerationRequest::new("login", TARGET))
            .unwrap_err();

        let (phase, failures, created) = failures_of(err);
        assert_eq!(phase, FailedPhase::Files);
        assert_eq!(
            failures,
            vec![
                ApplicationError::AlreadyExists {
                    path: "/proj/lib/modules/login/infra/repositories/login_repository.dart"
                        .into()
                },
                ApplicationError::AlreadyExists {
                    path: "/proj/lib/modules/login/ui/screens/login_screen.dart".into()
                },
            ]
        );
        assert_eq!(created.len(), 10);
    }

    #[test]
    fn fail_fast_stops_handing_out_files() {
        let mut fs = accepting_fs();
        fs.expect_exists()
            .returning(|p| p.ends_with("login_repository.dart"));
        fs.expect_write_new().never();

        let generator = ArchitectureGenerator::new(Box::new(fs), renderer());
        let request = GenerationRequest::new("login", TARGET)
            .with_policy(ConflictPolicy::FailFast)
            .with_workers(1);
        let (_, failures, created) = failures_of(generator.generate(&request).unwrap_err());

        assert_eq!(failures.len(), 1);
        assert!(created.is_empty());
    }

    #[test]
    fn renderer_failure_is_reported_per_file() {
        let mut fs = accepting_fs();
        fs.expect_exists().return_const(false);
        fs.expect_write_new().returning(|_, _| Ok(()));

        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|kind, name, _| {
            if kind == crate::domain::TemplateKind::Cubit {
                Err(ApplicationError::RenderingFailed {
                    kind,
                    reason: "bad override".into(),
                }
                .into())
            } else {
                Ok(name.pascal().to_string())
            }
        });

        let generator = ArchitectureGenerator::new(Box::new(fs), Box::new(renderer));
        let (_, failures, created) = failures_of(
            generator
                .generate(&GenerationRequest::new("login", TARGET))
                .unwrap_err(),
        );
        assert_eq!(created.len(), 11);
        assert!(matches!(
            failures.as_slice(),
            [ApplicationError::RenderingFailed { .. }]
        ));
    }

    #[test]
    fn plan_is_a_dry_run() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|p| p == Path::new(TARGET));
        fs.expect_create_dir_all().never();
        fs.expect_write_new().never();
        fs.expect_exists().never();

        let generator = ArchitectureGenerator::new(Box::new(fs), renderer());
        let report = generator
            .plan(&GenerationRequest::new("login", TARGET))
            .unwrap();

        assert!(report.dry_run);
        assert_eq!(report.files.len(), 12);
        assert_eq!(report.directories.len(), 21);
        assert!(report.files.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn custom_container_is_used() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|p| p == Path::new(TARGET));

        let generator = ArchitectureGenerator::new(Box::new(fs), renderer())
            .with_planner(PathPlanner::new("features").unwrap());
        let report = generator
            .plan(&GenerationRequest::new("login", TARGET))
            .unwrap();
        assert_eq!(report.root, PathBuf::from("/proj/lib/features/login"));
    }

    #[test]
    fn policy_serializes_kebab_case() {
        assert_eq!(ConflictPolicy::FailFast.to_string(), "fail-fast");
        assert_eq!(ConflictPolicy::default(), ConflictPolicy::CollectAll);
    }
}
