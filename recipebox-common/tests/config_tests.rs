//! Unit tests for configuration resolution and graceful degradation
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate RECIPEBOX_CONFIG are marked with #[serial].

use std::env;
use std::path::{Path, PathBuf};

use recipebox_common::config::{load_config, resolve_config_path, ServerConfig, CONFIG_ENV_VAR};
use recipebox_common::Error;
use serial_test::serial;
use tempfile::TempDir;

#[test]
#[serial]
fn test_cli_argument_has_highest_priority() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/recipebox-env.toml");

    let resolved = resolve_config_path(Some(Path::new("/tmp/recipebox-cli.toml")));
    assert_eq!(resolved, Some(PathBuf::from("/tmp/recipebox-cli.toml")));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_env_var_used_without_cli_argument() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/recipebox-env.toml");

    let resolved = resolve_config_path(None);
    assert_eq!(resolved, Some(PathBuf::from("/tmp/recipebox-env.toml")));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
fn test_no_path_uses_defaults() {
    let config = load_config(None).unwrap();
    assert_eq!(config, ServerConfig::default());
}

#[test]
fn test_missing_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = load_config(Some(&temp_dir.path().join("absent.toml"))).unwrap();
    assert_eq!(config, ServerConfig::default());
}

#[test]
fn test_file_values_override_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
port = 6000
uploads_dir = "/var/lib/recipebox/uploads"
categories = ["Soup", "Salad"]
"#,
    )
    .unwrap();

    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.port, 6000);
    assert_eq!(config.uploads_dir, PathBuf::from("/var/lib/recipebox/uploads"));
    assert_eq!(config.categories, vec!["Soup", "Salad"]);
    assert_eq!(config.bind_addr, ServerConfig::default().bind_addr);
}

#[test]
fn test_malformed_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "port = [").unwrap();

    assert!(matches!(load_config(Some(&path)), Err(Error::Config(_))));
}
