//! Renderer for the bundled bodies.

use layerforge_core::{
    application::ports::TemplateRenderer,
    domain::{FeatureName, RenderContext, RenderOptions, TemplateKind},
    error::ForgeResult,
};
use tracing::instrument;

use crate::builtin_templates;

/// Fills the bundled body of each kind with the feature's names.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinRenderer;

impl BuiltinRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for BuiltinRenderer {
    #[instrument(skip_all, fields(kind = %kind, feature = %name))]
    fn render(
        &self,
        kind: TemplateKind,
        name: &FeatureName,
        options: &RenderOptions,
    ) -> ForgeResult<String> {
        let body = builtin_templates::body(kind, options.equatable);
        Ok(RenderContext::new(name, options).render(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(kind: TemplateKind, raw: &str, equatable: bool) -> String {
        BuiltinRenderer::new()
            .render(kind, &FeatureName::parse(raw).unwrap(), &RenderOptions { equatable })
            .unwrap()
    }

    #[test]
    fn no_placeholder_survives() {
        for kind in TemplateKind::ALL {
            for equatable in [false, true] {
                let text = render(kind, "getProducts", equatable);
                assert!(!text.contains("{{"), "{kind}: {text}");
            }
        }
    }

    #[test]
    fn repository_uses_pascal_and_snake() {
        let text = render(TemplateKind::Repository, "get_products", false);
        assert!(text.contains("class GetProductsRepository implements GetProductsOutputPort"));
        assert!(text.contains("get_products_output_port.dart"));
    }

    #[test]
    fn screen_title_is_human_friendly() {
        let text = render(TemplateKind::Screen, "getProducts", false);
        assert!(text.contains("Text('Get Products')"));
    }

    #[test]
    fn equatable_state() {
        assert!(render(TemplateKind::State, "login", true).contains("class LoginState extends Equatable"));
        assert!(render(TemplateKind::Cubit, "login", true).contains("package:equatable"));
        assert!(!render(TemplateKind::Cubit, "login", false).contains("equatable"));
    }
}
