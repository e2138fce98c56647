// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Layerforge.
//!
//! This module contains pure scaffolding logic: feature naming, the layer
//! topology, path planning, and the template catalog. All filesystem and
//! template-text concerns are handled via ports defined in the application
//! layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: Planning is path arithmetic only
//! - **No tracing**: Observability belongs to the application and CLI layers
//! - **Static tables**: `LAYER_SPECS` and `TEMPLATE_SPECS` are never mutated
//!
// Public API - what the world sees
pub mod catalog;
pub mod error;
pub mod layout;
pub mod naming;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use catalog::{
    RenderContext, RenderOptions, SOURCE_EXTENSION, TEMPLATE_SPECS, TemplateKind, TemplateSpec,
};
pub use error::{DomainError, ErrorCategory};
pub use layout::{
    DEFAULT_CONTAINER, DirectoryGroup, ExtraLayout, FeaturePlan, LAYER_SPECS, Layer, LayerSpec,
    PathPlanner,
};
pub use naming::FeatureName;
pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;

    // ========================================================================
    // Cross-table Tests
    // ========================================================================

    #[test]
    fn every_file_lands_in_a_planned_directory() {
        let name = FeatureName::parse("login").unwrap();
        let plan = PathPlanner::default().plan(Path::new("/proj/lib"), &name, &ExtraLayout::default());
        let dirs = plan.directories();

        for spec in &TEMPLATE_SPECS {
            let dir = spec.directory(plan.layer(spec.layer));
            assert!(dirs.contains(&dir), "{} has no planned directory", spec.kind);
        }
    }

    #[test]
    fn generated_directory_names_are_stable() {
        let expected: Vec<&str> = vec![
            "datasources",
            "entities",
            "repositories",
            "models",
            "input_ports",
            "output_ports",
            "directions",
            "routes",
            "factories",
            "states",
            "screens",
            "widgets",
            "presenters",
        ];
        let actual: Vec<&str> = LAYER_SPECS
            .iter()
            .flat_map(|spec| spec.children.iter().copied())
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn generated_file_names_for_login() {
        let name = FeatureName::parse("login").unwrap();
        let plan = PathPlanner::default().plan(Path::new("/proj/lib"), &name, &ExtraLayout::default());

        let files: Vec<PathBuf> = TEMPLATE_SPECS
            .iter()
            .map(|spec| spec.file_path(plan.layer(spec.layer), &name))
            .collect();

        let root = Path::new("/proj/lib/modules/login");
        assert_eq!(files.len(), 12);
        assert!(files.contains(&root.join("infra/repositories/login_repository.dart")));
        assert!(files.contains(&root.join("usecases/login_usecase.dart")));
        assert!(files.contains(&root.join("ports/input_ports/login_input_port.dart")));
        assert!(files.contains(&root.join("ports/output_ports/login_output_port.dart")));
        assert!(files.contains(&root.join("locator/login_module.dart")));
        assert!(files.contains(&root.join("navigation/routes/login_route.dart")));
        assert!(files.contains(&root.join("navigation/directions/login_direction.dart")));
        assert!(files.contains(&root.join("presentation/factories/login_presenter_factory.dart")));
        assert!(files.contains(&root.join("presentation/states/login_state.dart")));
        assert!(files.contains(&root.join("presentation/states/login_cubit.dart")));
        assert!(files.contains(&root.join("ui/presenters/login_presenter.dart")));
        assert!(files.contains(&root.join("ui/screens/login_screen.dart")));
        for file in &files {
            let file_name = file.file_name().unwrap().to_string_lossy();
            assert!(file_name.starts_with("login_"), "{file_name}");
        }
    }
}
