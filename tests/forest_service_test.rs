//! Tests for ForestService: validation policy, selections and rendering

use std::sync::Arc;

use rstest::{fixture, rstest};

use flatforest::application::services::ForestService;
use flatforest::application::{ApplicationError, Rule, Selection};
use flatforest::config::{RenderStyle, Settings, ValidationMode};
use flatforest::util::testing::init_test_setup;
use flatforest::{DomainError, Hierarchy};

#[fixture]
fn service() -> ForestService {
    init_test_setup();
    ForestService::new(Arc::new(Settings::default()))
}

fn sample_ids() -> Vec<i64> {
    vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]
}

fn sample_depths() -> Vec<usize> {
    vec![0, 1, 2, 3, 1, 0, 1, 0, 1, 1, 2]
}

#[rstest]
fn given_multiple_of_three_rule_when_filtering_then_matches_reference(service: ForestService) {
    let hierarchy = service.load(sample_ids(), sample_depths()).unwrap();
    let selection = Selection::new().with(Rule::ExcludeMultipleOf(3)).unwrap();

    let outcome = service.filter(&hierarchy, &selection).unwrap();

    assert_eq!(
        outcome.hierarchy.format_string(),
        "[1:0, 2:1, 5:1, 8:0, 10:1, 11:2]"
    );
    assert_eq!(outcome.removed, 5);
    // 4 under 3 and 7 under 6 are skipped
    assert_eq!(outcome.evaluated, 9);
}

#[rstest]
fn given_empty_selection_when_filtering_then_keeps_everything(service: ForestService) {
    let hierarchy = service.load(sample_ids(), sample_depths()).unwrap();
    let outcome = service.filter(&hierarchy, &Selection::new()).unwrap();
    assert_eq!(outcome.hierarchy, hierarchy);
    assert_eq!(outcome.removed, 0);
    assert_eq!(outcome.evaluated, hierarchy.size());
}

#[rstest]
fn given_only_rule_when_filtering_then_requires_ancestors_listed(service: ForestService) {
    let hierarchy = service.load(sample_ids(), sample_depths()).unwrap();
    let selection = Selection::new()
        .with(Rule::Only([8, 10, 11, 3].into_iter().collect()))
        .unwrap();
    let outcome = service.filter(&hierarchy, &selection).unwrap();
    assert_eq!(outcome.hierarchy.format_string(), "[8:0, 10:1, 11:2]");
}

#[rstest]
fn given_root_depth_violation_when_checking_then_malformed(service: ForestService) {
    let err = service.check(vec![1], vec![1]).unwrap_err();
    assert!(matches!(err, ApplicationError::Domain(DomainError::Malformed(_))));
}

#[test]
fn given_trust_mode_when_checking_then_still_validates() {
    let settings = Settings {
        validation: ValidationMode::Trust,
        ..Settings::default()
    };
    let service = ForestService::new(Arc::new(settings));
    assert!(service.load(vec![1], vec![1]).is_ok());
    assert!(service.check(vec![1], vec![1]).is_err());
}

#[test]
fn given_outline_settings_when_rendering_without_style_then_uses_configured_marker() {
    let settings = Settings {
        style: RenderStyle::Outline,
        outline_marker: "*".into(),
        ..Settings::default()
    };
    let service = ForestService::new(Arc::new(settings));
    let hierarchy = service.load(vec![1, 2, 3], vec![0, 1, 0]).unwrap();
    assert_eq!(service.render(&hierarchy, None).unwrap(), "1\n* 2\n3");
}

#[rstest]
fn given_forest_when_rendering_tree_then_draws_each_root(service: ForestService) {
    let hierarchy = service.load(vec![1, 2, 6], vec![0, 1, 0]).unwrap();
    assert_eq!(service.render(&hierarchy, Some(RenderStyle::Tree)).unwrap(), "1\n└── 2\n6");
}

#[test]
fn given_tree_style_configured_when_rendering_deep_chain_then_refuses_instead_of_crashing() {
    let settings = Settings {
        style: RenderStyle::Tree,
        ..Settings::default()
    };
    let service = ForestService::new(Arc::new(settings));
    let size = 100_000;
    let hierarchy = service.load((0..size as i64).collect(), (0..size).collect()).unwrap();

    let err = service.render(&hierarchy, None).unwrap_err();

    assert!(matches!(err, ApplicationError::Domain(DomainError::TooDeep { .. })));
    assert!(err.to_string().contains("flat or outline"));
}
