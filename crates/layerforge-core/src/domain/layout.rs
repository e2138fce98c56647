//! Layer topology and feature path planning.
//!
//! # Design
//!
//! The directory topology of a feature is one declarative table,
//! [`LAYER_SPECS`]. Planning is pure path arithmetic: nothing in this module
//! touches the filesystem, so a [`FeaturePlan`] can be computed for a dry run
//! exactly as it is for a real one.
//!
//! ```text
//! <target>/modules/<feature>/
//! ├── infra/         datasources/ entities/ repositories/
//! ├── domain/        models/
//! ├── usecases/
//! ├── locator/
//! ├── ports/         input_ports/ output_ports/
//! ├── navigation/    directions/ routes/
//! ├── presentation/  factories/ states/
//! └── ui/            screens/ widgets/ presenters/
//! ```

use std::ffi::OsStr;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::domain::{catalog::TemplateSpec, error::DomainError, naming::FeatureName};

/// Default name of the directory that holds every feature root.
pub const DEFAULT_CONTAINER: &str = "modules";

/// Segment used to find the project source root and its test mirror.
const SOURCE_SEGMENT: &str = "lib";
const TEST_SEGMENT: &str = "test";

// ── Layer ────────────────────────────────────────────────────────────────────

/// One of the fixed architectural groupings of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Infra,
    Domain,
    Usecases,
    Locator,
    Ports,
    Navigation,
    Presentation,
    Ui,
}

impl Layer {
    pub const ALL: [Layer; 8] = [
        Self::Infra,
        Self::Domain,
        Self::Usecases,
        Self::Locator,
        Self::Ports,
        Self::Navigation,
        Self::Presentation,
        Self::Ui,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Infra => "infra",
            Self::Domain => "domain",
            Self::Usecases => "usecases",
            Self::Locator => "locator",
            Self::Ports => "ports",
            Self::Navigation => "navigation",
            Self::Presentation => "presentation",
            Self::Ui => "ui",
        }
    }

    /// The table entry describing this layer.
    pub fn spec(self) -> &'static LayerSpec {
        // Table order matches `Layer::ALL`; enforced by a unit test.
        &LAYER_SPECS[self as usize]
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layer {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|layer| layer.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::UnknownLayer(s.to_string()))
    }
}

// ── LayerSpec table ──────────────────────────────────────────────────────────

/// A layer and the sub-directories created beneath its root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerSpec {
    pub layer: Layer,
    pub children: &'static [&'static str],
}

/// Process-wide layer topology, in creation and display order.
pub static LAYER_SPECS: [LayerSpec; 8] = [
    LayerSpec {
        layer: Layer::Infra,
        children: &["datasources", "entities", "repositories"],
    },
    LayerSpec {
        layer: Layer::Domain,
        children: &["models"],
    },
    LayerSpec {
        layer: Layer::Usecases,
        children: &[],
    },
    LayerSpec {
        layer: Layer::Locator,
        children: &[],
    },
    LayerSpec {
        layer: Layer::Ports,
        children: &["input_ports", "output_ports"],
    },
    LayerSpec {
        layer: Layer::Navigation,
        children: &["directions", "routes"],
    },
    LayerSpec {
        layer: Layer::Presentation,
        children: &["factories", "states"],
    },
    LayerSpec {
        layer: Layer::Ui,
        children: &["screens", "widgets", "presenters"],
    },
];

// ── Extra layout ─────────────────────────────────────────────────────────────

/// Directories requested on top of the fixed topology.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraLayout {
    /// Path templates using `{root_folder}`, `{custom_folder}` and
    /// `{feature_name}` placeholders.
    pub templates: Vec<String>,
    /// Mirror every planned directory under `lib/` into `test/`.
    pub mirror_tests: bool,
}

impl ExtraLayout {
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty() && !self.mirror_tests
    }
}

// ── Directory groups ─────────────────────────────────────────────────────────

/// A root plus the children ensured beneath it.
///
/// The unit of work for the directory phase: the root is ensured first,
/// then every child independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryGroup {
    pub root: PathBuf,
    pub children: Vec<PathBuf>,
}

impl DirectoryGroup {
    fn leaf(root: PathBuf) -> Self {
        Self {
            root,
            children: Vec::new(),
        }
    }

    /// Root followed by children.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.root.as_path()).chain(self.children.iter().map(PathBuf::as_path))
    }
}

// ── FeaturePlan ──────────────────────────────────────────────────────────────

/// Absolute paths for one feature, computed once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturePlan {
    container: PathBuf,
    root: PathBuf,
    layers: Vec<PathBuf>,
    extras: Vec<PathBuf>,
    mirror_tests: bool,
}

impl FeaturePlan {
    /// The `modules` directory the feature root lives in.
    pub fn container(&self) -> &Path {
        &self.container
    }

    /// `<container>/<feature>`
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root directory of one layer.
    pub fn layer(&self, layer: Layer) -> &Path {
        &self.layers[layer.index()]
    }

    /// Target path of one generated file.
    pub fn file_path(&self, spec: &TemplateSpec, name: &FeatureName) -> PathBuf {
        spec.file_path(self.layer(spec.layer), name)
    }

    /// Every directory the directory phase must ensure, grouped by root.
    ///
    /// Layer groups come first in table order, then one group per extra
    /// directory, then the test mirrors of everything above.
    pub fn directory_groups(&self) -> Vec<DirectoryGroup> {
        let mut groups: Vec<DirectoryGroup> = LAYER_SPECS
            .iter()
            .map(|spec| {
                let root = self.layer(spec.layer).to_path_buf();
                let children = spec.children.iter().map(|c| root.join(c)).collect();
                DirectoryGroup { root, children }
            })
            .collect();

        groups.extend(self.extras.iter().cloned().map(DirectoryGroup::leaf));

        if self.mirror_tests {
            let mirrors: Vec<DirectoryGroup> = groups
                .iter()
                .filter_map(|group| {
                    let root = mirror_into_tests(&group.root)?;
                    let children = group
                        .children
                        .iter()
                        .filter_map(|c| mirror_into_tests(c))
                        .collect();
                    Some(DirectoryGroup { root, children })
                })
                .collect();
            groups.extend(mirrors);
        }

        groups
    }

    /// Flattened [`Self::directory_groups`].
    pub fn directories(&self) -> Vec<PathBuf> {
        self.directory_groups()
            .iter()
            .flat_map(|g| g.paths().map(Path::to_path_buf).collect::<Vec<_>>())
            .collect()
    }
}

// ── PathPlanner ──────────────────────────────────────────────────────────────

/// Computes the feature layout for a target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPlanner {
    container: String,
}

impl PathPlanner {
    /// Planner using a custom container directory name.
    pub fn new(container: impl Into<String>) -> Result<Self, DomainError> {
        let container = container.into();
        let reason = if container.is_empty() {
            Some("container name cannot be empty")
        } else if container.contains('/') || container.contains('\\') {
            Some("container name cannot contain path separators")
        } else if container == "." || container == ".." {
            Some("container name must be a real directory name")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidContainer {
                name: container,
                reason: reason.into(),
            }),
            None => Ok(Self { container }),
        }
    }

    pub fn container_name(&self) -> &str {
        &self.container
    }

    /// Resolve the container directory for `target`.
    ///
    /// Only the last path segment is inspected: `/proj/lib/modules` is used
    /// as-is, anything else gets the container appended. Trailing separators
    /// are not segments.
    pub fn container_for(&self, target: &Path) -> PathBuf {
        let rebuilt: PathBuf = target.components().collect();
        let ends_in_container = matches!(
            rebuilt.components().next_back(),
            Some(Component::Normal(seg)) if seg == OsStr::new(&self.container)
        );

        if ends_in_container {
            rebuilt
        } else {
            rebuilt.join(&self.container)
        }
    }

    /// Plan every directory of `feature` under `target`.
    pub fn plan(&self, target: &Path, feature: &FeatureName, extras: &ExtraLayout) -> FeaturePlan {
        let container = self.container_for(target);
        let root = container.join(feature.raw());
        let layers = Layer::ALL.iter().map(|l| root.join(l.as_str())).collect();

        let extra_dirs = extras
            .templates
            .iter()
            .map(|template| expand_extra(template, target, feature))
            .collect();

        FeaturePlan {
            container,
            root,
            layers,
            extras: dedup_keep_order(extra_dirs),
            mirror_tests: extras.mirror_tests,
        }
    }
}

impl Default for PathPlanner {
    fn default() -> Self {
        Self {
            container: DEFAULT_CONTAINER.to_string(),
        }
    }
}

fn dedup_keep_order(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = std::collections::HashSet::new();
    paths.into_iter().filter(|p| seen.insert(p.clone())).collect()
}

// ── Path helpers ─────────────────────────────────────────────────────────────

/// The target truncated after its first `lib` segment, or the target itself.
pub fn source_root(target: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in target.components() {
        out.push(component);
        if component == Component::Normal(OsStr::new(SOURCE_SEGMENT)) {
            return out;
        }
    }
    target.components().collect()
}

/// Replace the first `lib` segment with `test`; `None` without one.
pub fn mirror_into_tests(path: &Path) -> Option<PathBuf> {
    let lib = Component::Normal(OsStr::new(SOURCE_SEGMENT));
    let mut replaced = false;
    let mirrored: PathBuf = path
        .components()
        .map(|component| {
            if !replaced && component == lib {
                replaced = true;
                Component::Normal(OsStr::new(TEST_SEGMENT))
            } else {
                component
            }
        })
        .collect();

    replaced.then_some(mirrored)
}

/// Expand an extra-directory template. Unknown placeholders stay verbatim;
/// a relative result is resolved against `target`.
pub fn expand_extra(template: &str, target: &Path, feature: &FeatureName) -> PathBuf {
    let root = source_root(target);
    let custom: PathBuf = target.components().collect();

    let expanded = PathBuf::from(
        template
            .replace("{root_folder}", &root.to_string_lossy())
            .replace("{custom_folder}", &custom.to_string_lossy())
            .replace("{feature_name}", feature.raw()),
    );

    if expanded.is_absolute() {
        expanded.components().collect()
    } else {
        custom.join(expanded).components().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login() -> FeatureName {
        FeatureName::parse("login").unwrap()
    }

    #[test]
    fn table_order_matches_layer_enum() {
        for (i, layer) in Layer::ALL.iter().enumerate() {
            assert_eq!(LAYER_SPECS[i].layer, *layer);
            assert_eq!(layer.spec().layer, *layer);
        }
    }

    #[test]
    fn layer_parses_case_insensitively() {
        assert_eq!("UI".parse::<Layer>().unwrap(), Layer::Ui);
        assert!(matches!(
            "controllers".parse::<Layer>(),
            Err(DomainError::UnknownLayer(_))
        ));
    }

    // ── container detection ───────────────────────────────────────────────

    #[test]
    fn appends_container_to_plain_target() {
        let planner = PathPlanner::default();
        assert_eq!(
            planner.container_for(Path::new("/proj/lib")),
            PathBuf::from("/proj/lib/modules")
        );
    }

    #[test]
    fn reuses_target_already_named_container() {
        let planner = PathPlanner::default();
        assert_eq!(
            planner.container_for(Path::new("/proj/lib/modules")),
            PathBuf::from("/proj/lib/modules")
        );
    }

    #[test]
    fn trailing_separator_is_not_a_segment() {
        let planner = PathPlanner::default();
        assert_eq!(
            planner.container_for(Path::new("/proj/lib/modules/")),
            PathBuf::from("/proj/lib/modules")
        );
        assert_eq!(
            planner.container_for(Path::new("/proj/lib/")),
            PathBuf::from("/proj/lib/modules")
        );
    }

    #[test]
    fn only_the_last_segment_counts() {
        let planner = PathPlanner::default();
        assert_eq!(
            planner.container_for(Path::new("/proj/modules/auth")),
            PathBuf::from("/proj/modules/auth/modules")
        );
        assert_eq!(
            planner.container_for(Path::new("/proj/my_modules")),
            PathBuf::from("/proj/my_modules/modules")
        );
    }

    #[test]
    fn custom_container_name() {
        let planner = PathPlanner::new("features").unwrap();
        assert_eq!(
            planner.container_for(Path::new("/proj/lib/features")),
            PathBuf::from("/proj/lib/features")
        );
        assert_eq!(
            planner.container_for(Path::new("/proj/lib")),
            PathBuf::from("/proj/lib/features")
        );
    }

    #[test]
    fn rejects_bad_container_names() {
        assert!(PathPlanner::new("").is_err());
        assert!(PathPlanner::new("a/b").is_err());
        assert!(PathPlanner::new("..").is_err());
    }

    // ── plan ──────────────────────────────────────────────────────────────

    #[test]
    fn plan_places_layers_under_feature_root() {
        let plan = PathPlanner::default().plan(
            Path::new("/proj/lib"),
            &login(),
            &ExtraLayout::default(),
        );
        assert_eq!(plan.root(), Path::new("/proj/lib/modules/login"));
        assert_eq!(
            plan.layer(Layer::Presentation),
            Path::new("/proj/lib/modules/login/presentation")
        );
        assert_eq!(plan.directory_groups().len(), 8);
        // 8 roots + 13 children
        assert_eq!(plan.directories().len(), 21);
    }

    #[test]
    fn plan_is_idempotent() {
        let planner = PathPlanner::default();
        let a = planner.plan(Path::new("/proj/lib"), &login(), &ExtraLayout::default());
        let b = planner.plan(Path::new("/proj/lib"), &login(), &ExtraLayout::default());
        assert_eq!(a, b);
    }

    #[test]
    fn feature_root_keeps_raw_casing() {
        let name = FeatureName::parse("GetProducts").unwrap();
        let plan = PathPlanner::default().plan(Path::new("/p"), &name, &ExtraLayout::default());
        assert_eq!(plan.root(), Path::new("/p/modules/GetProducts"));
    }

    // ── extras ────────────────────────────────────────────────────────────

    #[test]
    fn source_root_stops_at_first_lib() {
        assert_eq!(
            source_root(Path::new("/proj/lib/src/lib/x")),
            PathBuf::from("/proj/lib")
        );
        assert_eq!(source_root(Path::new("/proj/app")), PathBuf::from("/proj/app"));
    }

    #[test]
    fn mirror_replaces_whole_segment_only() {
        assert_eq!(
            mirror_into_tests(Path::new("/proj/lib/modules/login")),
            Some(PathBuf::from("/proj/test/modules/login"))
        );
        assert_eq!(mirror_into_tests(Path::new("/proj/library/x")), None);
    }

    #[test]
    fn expands_extra_placeholders() {
        let path = expand_extra(
            "{root_folder}/shared/{feature_name}/{unknown}",
            Path::new("/proj/lib/modules"),
            &login(),
        );
        assert_eq!(path, PathBuf::from("/proj/lib/shared/login/{unknown}"));

        let custom = expand_extra(
            "{custom_folder}/docs",
            Path::new("/proj/lib/modules/"),
            &login(),
        );
        assert_eq!(custom, PathBuf::from("/proj/lib/modules/docs"));

        let relative = expand_extra("assets/{feature_name}", Path::new("/proj/lib"), &login());
        assert_eq!(relative, PathBuf::from("/proj/lib/assets/login"));
    }

    #[test]
    fn plan_with_extras_and_mirror() {
        let extras = ExtraLayout {
            templates: vec![
                "{root_folder}/l10n/{feature_name}".into(),
                "{root_folder}/l10n/{feature_name}".into(),
            ],
            mirror_tests: true,
        };
        let plan = PathPlanner::default().plan(Path::new("/proj/lib"), &login(), &extras);
        let dirs = plan.directories();

        // duplicates collapse
        assert_eq!(
            dirs.iter()
                .filter(|d| d.as_path() == Path::new("/proj/lib/l10n/login"))
                .count(),
            1
        );
        assert!(dirs.contains(&PathBuf::from("/proj/test/modules/login/ui/screens")));
        assert!(dirs.contains(&PathBuf::from("/proj/test/l10n/login")));
        // 21 layer dirs + 1 extra, then all mirrored
        assert_eq!(dirs.len(), 44);
    }
}
