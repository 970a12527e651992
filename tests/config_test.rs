//! Tests for layered settings loading
//!
//! Every load reads `FLATFOREST_*` from the process environment, so all tests
//! here run serially with the one that sets it.

use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use flatforest::application::ApplicationError;
use flatforest::config::{RenderStyle, Settings, ValidationMode};

#[test]
#[serial]
fn given_global_config_when_loading_then_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    let global = temp.path().join("flatforest.toml");
    fs::write(&global, "validation = \"trust\"\n").unwrap();

    let settings = Settings::load_from(Some(global.as_path()), None).unwrap();

    assert_eq!(settings.validation, ValidationMode::Trust);
    assert_eq!(settings.style, RenderStyle::Flat);
}

#[test]
#[serial]
fn given_explicit_config_when_loading_then_wins_over_global() {
    let temp = TempDir::new().unwrap();
    let global = temp.path().join("global.toml");
    let explicit = temp.path().join("explicit.toml");
    fs::write(&global, "validation = \"trust\"\nstyle = \"tree\"\n").unwrap();
    fs::write(&explicit, "style = \"outline\"\n").unwrap();

    let settings = Settings::load_from(Some(global.as_path()), Some(explicit.as_path())).unwrap();

    assert_eq!(settings.validation, ValidationMode::Trust);
    assert_eq!(settings.style, RenderStyle::Outline);
}

#[test]
#[serial]
fn given_missing_global_config_when_loading_then_ignored() {
    let temp = TempDir::new().unwrap();
    let settings = Settings::load_from(Some(temp.path().join("absent.toml").as_path()), None).unwrap();
    assert_eq!(settings.validation, ValidationMode::Strict);
}

#[test]
#[serial]
fn given_missing_explicit_config_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();
    let err = Settings::load_from(None, Some(temp.path().join("absent.toml").as_path())).unwrap_err();
    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
#[serial]
fn given_unknown_style_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();
    let explicit = temp.path().join("bad.toml");
    fs::write(&explicit, "style = \"sideways\"\n").unwrap();

    let err = Settings::load_from(None, Some(explicit.as_path())).unwrap_err();
    assert!(err.to_string().starts_with("config error:"));
}

#[test]
#[serial]
fn given_env_var_when_loading_then_overrides_files() {
    let temp = TempDir::new().unwrap();
    let explicit = temp.path().join("explicit.toml");
    fs::write(&explicit, "outline_marker = \"*\"\n").unwrap();

    std::env::set_var("FLATFOREST_OUTLINE_MARKER", "+");
    let settings = Settings::load_from(None, Some(explicit.as_path()));
    std::env::remove_var("FLATFOREST_OUTLINE_MARKER");

    assert_eq!(settings.unwrap().outline_marker, "+");
    let after = Settings::load_from(None, Some(explicit.as_path())).unwrap();
    assert_eq!(after.outline_marker, "*");
}

#[test]
#[serial]
fn given_effective_settings_when_serialized_then_round_trips_through_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("effective.toml");
    let settings = Settings {
        validation: ValidationMode::Trust,
        style: RenderStyle::Tree,
        outline_marker: "-".into(),
    };
    fs::write(&path, settings.to_toml().unwrap()).unwrap();

    let loaded = Settings::load_from(None, Some(path.as_path())).unwrap();
    assert_eq!(loaded.validation, ValidationMode::Trust);
    assert_eq!(loaded.style, RenderStyle::Tree);
}
