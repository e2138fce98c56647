use std::path::PathBuf;

use layerforge_core::domain::{
    DEFAULT_CONTAINER, ExtraLayout, FeatureName, PathPlanner, RenderContext, RenderOptions,
};
use proptest::prelude::*;

/// Identifiers mixing case changes, separators, digits and non-ASCII letters.
fn feature_names() -> impl Strategy<Value = FeatureName> {
    "[a-zA-Z0-9_.\\-éÉß{}]{1,12}"
        .prop_filter_map("valid feature name", |raw| FeatureName::parse(raw).ok())
}

fn absolute_targets() -> impl Strategy<Value = PathBuf> {
    proptest::collection::vec("[a-z_]{1,8}", 0..5).prop_map(|segments| {
        let mut target = PathBuf::from("/");
        target.extend(segments);
        target
    })
}

proptest! {
    #[test]
    fn snake_has_no_uppercase_or_whitespace(name in feature_names()) {
        prop_assert!(
            !name.snake().chars().any(|c| c.is_uppercase() || c.is_whitespace()),
            "bad snake for {}: {}",
            name.raw(),
            name.snake()
        );
    }

    #[test]
    fn snake_is_stable_under_rederivation_from_pascal(name in feature_names()) {
        let again = FeatureName::parse(name.pascal()).unwrap();
        prop_assert_eq!(again.snake().to_lowercase(), name.snake());
    }

    #[test]
    fn planning_twice_gives_the_same_paths(target in absolute_targets(), name in feature_names()) {
        let planner = PathPlanner::default();
        let first = planner.plan(&target, &name, &ExtraLayout::default());
        let second = planner.plan(&target, &name, &ExtraLayout::default());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn container_is_appended_unless_target_ends_in_it(
        target in absolute_targets(),
        in_container in any::<bool>(),
    ) {
        let target = if in_container { target.join(DEFAULT_CONTAINER) } else { target };
        let container = PathPlanner::default().container_for(&target);

        if target.ends_with(DEFAULT_CONTAINER) {
            prop_assert_eq!(container, target);
        } else {
            prop_assert_eq!(container, target.join(DEFAULT_CONTAINER));
        }
    }

    #[test]
    fn rendering_substitutes_each_placeholder_once(name in feature_names()) {
        let ctx = RenderContext::new(&name, &RenderOptions::default());
        let template = "class {{NAME_PASCAL}} {{NAME}} {{NAME_SNAKE}}";

        let rendered = ctx.render(template);
        prop_assert_eq!(&ctx.render(template), &rendered);
        prop_assert_eq!(
            rendered,
            format!("class {} {} {}", name.pascal(), name.raw(), name.snake())
        );
    }
}
