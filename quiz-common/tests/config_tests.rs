//! Configuration file loading and graceful degradation
//!
//! Tests that touch XDG_CONFIG_HOME are marked #[serial] so they do not race
//! with each other on the process environment.

use quiz_common::config::{default_config_path, load_toml_config, ConfigLayer, ServiceConfig};
use quiz_common::Error;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_file_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let layer = load_toml_config(&path).expect("missing config should not fail");
    assert!(layer.is_none());

    // Startup continues on compiled defaults
    let config = ServiceConfig::from_layers(&[]);
    assert!(config.validate().is_ok());
}

#[test]
fn test_file_values_are_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
port = 6100
redis_url = "redis://quiz-cache:6379/2"
key_namespace = "quiz"
leaderboard_limit = 25
"#,
    )
    .unwrap();

    let layer = load_toml_config(&path).unwrap().unwrap();
    assert_eq!(layer.port, Some(6100));
    assert_eq!(layer.key_namespace.as_deref(), Some("quiz"));

    let config = ServiceConfig::from_layers(&[&layer]);
    assert_eq!(config.port, 6100);
    assert_eq!(config.redis_url, "redis://quiz-cache:6379/2");
    assert_eq!(config.leaderboard_limit, 25);
    // Untouched fields keep their defaults
    assert_eq!(config.default_user_id, 203090);
    assert_eq!(config.query_window, 100);
}

#[test]
fn test_cli_layer_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "port = 6100\nlog_level = \"debug\"\n").unwrap();

    let file = load_toml_config(&path).unwrap().unwrap();
    let cli = ConfigLayer {
        port: Some(7000),
        ..Default::default()
    };

    let config = ServiceConfig::from_layers(&[&cli, &file]);
    assert_eq!(config.port, 7000);
    assert_eq!(config.log_level, "debug");
}

#[test]
fn test_malformed_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "port = \"not a number\"\n").unwrap();

    assert!(matches!(load_toml_config(&path), Err(Error::Config(_))));
}

#[test]
fn test_unknown_key_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "prot = 6100\n").unwrap();

    assert!(matches!(load_toml_config(&path), Err(Error::Config(_))));
}

#[test]
#[serial]
#[cfg(target_os = "linux")]
fn test_default_path_follows_xdg_config_home() {
    let previous = env::var("XDG_CONFIG_HOME").ok();
    env::set_var("XDG_CONFIG_HOME", "/tmp/quiz-xdg-test");

    let path = default_config_path().unwrap();
    assert_eq!(
        path,
        std::path::PathBuf::from("/tmp/quiz-xdg-test/web3-quiz/config.toml")
    );

    match previous {
        Some(v) => env::set_var("XDG_CONFIG_HOME", v),
        None => env::remove_var("XDG_CONFIG_HOME"),
    }
}

#[test]
#[serial]
fn test_default_path_ends_with_app_dir() {
    if let Some(path) = default_config_path() {
        assert!(path.ends_with("web3-quiz/config.toml"));
    }
}
