//! The closed catalog of generated file kinds.
//!
//! # Adding a template kind
//!
//! 1. Add the [`TemplateKind`] variant and its `id`
//! 2. Add a [`TemplateSpec`] row to [`TEMPLATE_SPECS`]
//! 3. Give the renderer adapter a body for it
//!
//! The generator iterates the table; nothing else needs to change.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, layout::Layer, naming::FeatureName};

/// File extension shared by every generated file.
pub const SOURCE_EXTENSION: &str = "dart";

// ── TemplateKind ─────────────────────────────────────────────────────────────

/// One generated file type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    Repository,
    UseCase,
    InputPort,
    OutputPort,
    Module,
    Route,
    Direction,
    PresenterFactory,
    State,
    Cubit,
    Presenter,
    Screen,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 12] = [
        Self::Repository,
        Self::UseCase,
        Self::InputPort,
        Self::OutputPort,
        Self::Module,
        Self::Route,
        Self::Direction,
        Self::PresenterFactory,
        Self::State,
        Self::Cubit,
        Self::Presenter,
        Self::Screen,
    ];

    /// Stable identifier, also the override file stem (`<id>.tmpl`).
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Repository => "repository",
            Self::UseCase => "usecase",
            Self::InputPort => "input-port",
            Self::OutputPort => "output-port",
            Self::Module => "module",
            Self::Route => "route",
            Self::Direction => "direction",
            Self::PresenterFactory => "presenter-factory",
            Self::State => "state",
            Self::Cubit => "cubit",
            Self::Presenter => "presenter",
            Self::Screen => "screen",
        }
    }

    /// Whether [`RenderOptions::equatable`] changes this kind's body.
    pub const fn uses_equatable(&self) -> bool {
        matches!(self, Self::State | Self::Cubit)
    }

    /// The table entry describing this kind.
    pub fn spec(self) -> &'static TemplateSpec {
        TEMPLATE_SPECS
            .iter()
            .find(|spec| spec.kind == self)
            .unwrap_or_else(|| unreachable!("every kind has a row in TEMPLATE_SPECS"))
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TemplateKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == normalized)
            .ok_or_else(|| DomainError::UnknownTemplateKind(s.to_string()))
    }
}

// ── TemplateSpec table ───────────────────────────────────────────────────────

/// Where and under which name one kind is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateSpec {
    pub kind: TemplateKind,
    pub layer: Layer,
    /// Sub-directory under the layer root; `None` writes into the root.
    pub subdirectory: Option<&'static str>,
    pub suffix: &'static str,
    pub extension: &'static str,
}

impl TemplateSpec {
    /// `{snake}_{suffix}.{ext}`
    pub fn file_name(&self, name: &FeatureName) -> String {
        format!("{}_{}.{}", name.snake(), self.suffix, self.extension)
    }

    /// Directory the file lands in, given its layer root.
    pub fn directory(&self, layer_dir: &Path) -> PathBuf {
        match self.subdirectory {
            Some(sub) => layer_dir.join(sub),
            None => layer_dir.to_path_buf(),
        }
    }

    /// Full target path, given its layer root.
    pub fn file_path(&self, layer_dir: &Path, name: &FeatureName) -> PathBuf {
        self.directory(layer_dir).join(self.file_name(name))
    }
}

/// One row per generated file, in emission order.
pub static TEMPLATE_SPECS: [TemplateSpec; 12] = [
    TemplateSpec {
        kind: TemplateKind::Repository,
        layer: Layer::Infra,
        subdirectory: Some("repositories"),
        suffix: "repository",
        extension: SOURCE_EXTENSION,
    },
    TemplateSpec {
        kind: TemplateKind::UseCase,
        layer: Layer::Usecases,
        subdirectory: None,
        suffix: "usecase",
        extension: SOURCE_EXTENSION,
    },
    TemplateSpec {
        kind: TemplateKind::InputPort,
        layer: Layer::Ports,
        subdirectory: Some("input_ports"),
        suffix: "input_port",
        extension: SOURCE_EXTENSION,
    },
    TemplateSpec {
        kind: TemplateKind::OutputPort,
        layer: Layer::Ports,
        subdirectory: Some("output_ports"),
        suffix: "output_port",
        extension: SOURCE_EXTENSION,
    },
    TemplateSpec {
        kind: TemplateKind::Module,
        layer: Layer::Locator,
        subdirectory: None,
        suffix: "module",
        extension: SOURCE_EXTENSION,
    },
    TemplateSpec {
        kind: TemplateKind::Route,
        layer: Layer::Navigation,
        subdirectory: Some("routes"),
        suffix: "route",
        extension: SOURCE_EXTENSION,
    },
    TemplateSpec {
        kind: TemplateKind::Direction,
        layer: Layer::Navigation,
        subdirectory: Some("directions"),
        suffix: "direction",
        extension: SOURCE_EXTENSION,
    },
    TemplateSpec {
        kind: TemplateKind::PresenterFactory,
        layer: Layer::Presentation,
        subdirectory: Some("factories"),
        suffix: "presenter_factory",
        extension: SOURCE_EXTENSION,
    },
    TemplateSpec {
        kind: TemplateKind::State,
        layer: Layer::Presentation,
        subdirectory: Some("states"),
        suffix: "state",
        extension: SOURCE_EXTENSION,
    },
    TemplateSpec {
        kind: TemplateKind::Cubit,
        layer: Layer::Presentation,
        subdirectory: Some("states"),
        suffix: "cubit",
        extension: SOURCE_EXTENSION,
    },
    TemplateSpec {
        kind: TemplateKind::Presenter,
        layer: Layer::Ui,
        subdirectory: Some("presenters"),
        suffix: "presenter",
        extension: SOURCE_EXTENSION,
    },
    TemplateSpec {
        kind: TemplateKind::Screen,
        layer: Layer::Ui,
        subdirectory: Some("screens"),
        suffix: "screen",
        extension: SOURCE_EXTENSION,
    },
];

// ── Render options ───────────────────────────────────────────────────────────

/// Options passed to every template body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Generate states with a structural-equality base class.
    pub equatable: bool,
}

// ── RenderContext ────────────────────────────────────────────────────────────

/// Variable substitution for template bodies.
///
/// ## Built-in Variables
///
/// | Variable      | Example        |
/// |---------------|----------------|
/// | `NAME`        | `getProducts`  |
/// | `NAME_SNAKE`  | `get_products` |
/// | `NAME_PASCAL` | `GetProducts`  |
/// | `NAME_LOWER`  | `getproducts`  |
/// | `NAME_TITLE`  | `Get Products` |
/// | `EQUATABLE`   | `true`         |
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: HashMap<&'static str, String>,
}

impl RenderContext {
    pub fn new(name: &FeatureName, options: &RenderOptions) -> Self {
        let mut variables = HashMap::new();
        variables.insert("NAME", name.raw().to_string());
        variables.insert("NAME_SNAKE", name.snake().to_string());
        variables.insert("NAME_PASCAL", name.pascal().to_string());
        variables.insert("NAME_LOWER", name.lower().to_string());
        variables.insert("NAME_TITLE", name.title());
        variables.insert("EQUATABLE", options.equatable.to_string());
        Self { variables }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{VARIABLE}}`; unknown placeholders stay as-is.
    ///
    /// Single left-to-right pass: substituted values are never scanned
    /// again, so a name containing `{{...}}` renders literally.
    pub fn render(&self, template: &str) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            result.push_str(&rest[..open]);
            let after = &rest[open + 2..];

            let value = after
                .find("}}")
                .and_then(|close| self.get(&after[..close]).map(|v| (v, close)));
            match value {
                Some((value, close)) => {
                    result.push_str(value);
                    rest = &after[close + 2..];
                }
                None => {
                    result.push_str("{{");
                    rest = after;
                }
            }
        }

        result.push_str(rest);
        result
    }
}
