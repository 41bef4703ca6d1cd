//! Configuration Loader Tests

use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;
use wirekit_domain::error::Error;
use wirekit_infrastructure::config::{
    ConfigLocator, KernelSettings, ModuleKind, SettingsLoader, read_json_document,
};

use crate::test_utils::write_config;

#[test]
fn test_settings_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("wirekit.toml"),
        r#"
environment = "staging"
eager_singletons = true
modules = ["app"]

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let settings = SettingsLoader::new()
        .with_project_dir(dir.path())
        .with_env_prefix("WIREKIT_TEST_UNUSED")
        .load()
        .unwrap();

    assert_eq!(settings.environment, "staging");
    assert!(settings.eager_singletons);
    assert_eq!(settings.modules, vec![ModuleKind::App]);
    assert_eq!(settings.logging.level, "debug");
    assert_eq!(settings.project_dir.as_deref(), Some(dir.path()));
    assert_eq!(settings.config_dir(), dir.path().join("config"));
}

#[test]
fn test_settings_default_without_file() {
    let dir = TempDir::new().unwrap();
    let settings = SettingsLoader::new()
        .with_project_dir(dir.path())
        .with_env_prefix("WIREKIT_TEST_UNUSED")
        .load()
        .unwrap();

    assert_eq!(
        settings,
        KernelSettings {
            project_dir: Some(dir.path().to_path_buf()),
            ..KernelSettings::default()
        }
    );
}

#[test]
fn test_unknown_module_is_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("wirekit.toml"), "modules = [\"billing\"]\n").unwrap();

    let result = SettingsLoader::new()
        .with_project_dir(dir.path())
        .with_env_prefix("WIREKIT_TEST_UNUSED")
        .load();
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_root_dir_defaults_to_project_dir() {
    let settings = KernelSettings::for_project("/srv/app");
    assert_eq!(settings.root_dir(), PathBuf::from("/srv/app"));
    assert_eq!(settings.config_dir(), PathBuf::from("/srv/app/config"));
}

#[test]
fn test_missing_document_reads_as_none() {
    let dir = TempDir::new().unwrap();
    assert!(
        read_json_document(&dir.path().join("config/services.json"))
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_document_keeps_declaration_order() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.json"), r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();

    let document = read_json_document(&config_dir.join("config.json"))
        .unwrap()
        .unwrap();
    let keys: Vec<&String> = document.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_malformed_document_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "config.json", &json!({}));
    let path = dir.path().join("config/config.json");
    std::fs::write(&path, "{ broken").unwrap();

    match read_json_document(&path) {
        Err(Error::Configuration { message, .. }) => assert!(message.contains("config.json")),
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_locator_without_environment_has_base_only() {
    let locator = ConfigLocator::new("/p/config", "");
    assert_eq!(
        locator.config_tree_files(),
        vec![PathBuf::from("/p/config/config.json")]
    );
}
