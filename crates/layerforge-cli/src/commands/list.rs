//! Implementation of the `layerforge list` command.

use std::path::PathBuf;

use serde::Serialize;

use layerforge_core::{
    domain::{DEFAULT_CONTAINER, LAYER_SPECS, Layer, LayerSpec, TEMPLATE_SPECS, TemplateSpec},
    error::ForgeError,
};

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

/// Placeholder shown in place of the feature's snake-case name.
const NAME_PLACEHOLDER: &str = "<name>";

#[derive(Serialize)]
struct Catalog {
    layers: Vec<&'static LayerSpec>,
    templates: Vec<&'static TemplateSpec>,
}

impl Catalog {
    /// Both tables, optionally narrowed to one layer.
    fn select(layer: Option<Layer>) -> Self {
        let wanted = |l: Layer| layer.is_none_or(|only| only == l);
        Self {
            layers: LAYER_SPECS.iter().filter(|s| wanted(s.layer)).collect(),
            templates: TEMPLATE_SPECS.iter().filter(|s| wanted(s.layer)).collect(),
        }
    }
}

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    let layer = args
        .layer
        .as_deref()
        .map(str::parse::<Layer>)
        .transpose()
        .map_err(ForgeError::from)?;
    let catalog = Catalog::select(layer);

    match format {
        ListFormat::Table => {
            output.header("Layers:")?;
            for spec in &catalog.layers {
                let children = if spec.children.is_empty() {
                    "-".to_string()
                } else {
                    spec.children.join(", ")
                };
                output.print(&format!("  {:<14} {children}", spec.layer.as_str()))?;
            }

            output.print("")?;
            output.header("Files:")?;
            for spec in &catalog.templates {
                output.print(&format!(
                    "  {:<18} {}",
                    spec.kind.id(),
                    relative_file(spec).display()
                ))?;
            }
        }

        ListFormat::List => {
            for spec in &catalog.templates {
                output.print(&relative_file(spec).display().to_string())?;
            }
        }

        // JSON must stay parseable in pipes, so it ignores --quiet.
        ListFormat::Json => output.json(&catalog)?,
    }

    Ok(())
}

/// Path of one generated file relative to the target directory.
fn relative_file(spec: &TemplateSpec) -> PathBuf {
    let layer_dir = PathBuf::from(DEFAULT_CONTAINER)
        .join(NAME_PLACEHOLDER)
        .join(spec.layer.as_str());
    spec.directory(&layer_dir)
        .join(format!("{NAME_PLACEHOLDER}_{}.{}", spec.suffix, spec.extension))
}

#[cfg(test)]
mod tests {
    use layerforge_core::domain::TemplateKind;

    use super::*;

    #[test]
    fn relative_paths_follow_the_layer_table() {
        let cubit = TemplateKind::Cubit.spec();
        assert_eq!(
            relative_file(cubit),
            PathBuf::from("modules/<name>/presentation/states/<name>_cubit.dart")
        );

        let usecase = TemplateKind::UseCase.spec();
        assert_eq!(
            relative_file(usecase),
            PathBuf::from("modules/<name>/usecases/<name>_usecase.dart")
        );
    }

    #[test]
    fn catalog_serialises_both_tables() {
        let value = serde_json::to_value(Catalog::select(None)).unwrap();
        assert_eq!(value["layers"].as_array().unwrap().len(), 8);
        assert_eq!(value["templates"].as_array().unwrap().len(), 12);
        assert_eq!(value["layers"][0]["layer"], "infra");
    }

    #[test]
    fn layer_filter_narrows_both_tables() {
        let catalog = Catalog::select(Some(Layer::Presentation));
        assert_eq!(catalog.layers.len(), 1);
        assert!(catalog.templates.iter().all(|s| s.layer == Layer::Presentation));
        assert_eq!(catalog.templates.len(), 3);
    }
}
