//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use hypercube::config::AppConfig;
use hypercube_core::{Action, Setting};
use serial_test::serial;

#[test]
#[serial]
fn test_default_file_loads() {
    std::env::remove_var("HYPERCUBE_SETTINGS__DIMS");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.settings.viewer_size, "1000x1000");
    assert!(config
        .demo
        .script
        .contains(&Action::SetVisible(Setting::ShowFaces(true))));
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("HYPERCUBE_SETTINGS__DIMS", "7");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.settings.dims, 7);
    std::env::remove_var("HYPERCUBE_SETTINGS__DIMS");
}

#[test]
#[serial]
fn test_invalid_env_value_is_rejected() {
    std::env::set_var("HYPERCUBE_SETTINGS__DIMS", "12");
    let result = AppConfig::load();
    std::env::remove_var("HYPERCUBE_SETTINGS__DIMS");
    let err = result.unwrap_err();
    assert!(err.to_string().contains("12"));
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    std::env::remove_var("HYPERCUBE_SETTINGS__DIMS");
    let config = AppConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config.settings.dims, 4);
    assert!(config.demo.script.is_empty());
}
