//! Tests for the config module

use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use super::loader::{load_or_default, load_with_warnings};
use super::types::*;
use crate::error::StrataError;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.app.name, "strata-app");
    assert_eq!(config.layer.name, "client");
    assert_eq!(config.layer.namespace, "nodejs");
    assert_eq!(config.layer.binary_suffix, "so.node");
    assert_eq!(config.layer.platform_marker, "rhel");
    assert_eq!(config.layer.sources.len(), 3);
    assert_eq!(config.database.user, "postgres");
    assert_eq!(config.database.engine_version, "13.4");
    assert_eq!(config.database.allocated_storage_gb, 10);
    assert!(config.database.publicly_accessible);
    assert_eq!(config.api.route, "GET /");
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
[app]
name = "orders-api"

[layer]
name = "db-client"
sources = ["vendor/generated", "vendor/runtime", "vendor/tools"]
platform_marker = "amzn"

[database]
name = "ordersdb"
instance_class = "t3.small"

[api]
route = "GET /orders"
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.app.name, "orders-api");
    assert_eq!(config.layer.name, "db-client");
    assert_eq!(config.layer.platform_marker, "amzn");
    assert_eq!(config.layer.sources, vec![
        PathBuf::from("vendor/generated"),
        PathBuf::from("vendor/runtime"),
        PathBuf::from("vendor/tools"),
    ]);
    // Untouched sections keep their defaults
    assert_eq!(config.layer.binary_suffix, "so.node");
    assert_eq!(config.database.name, "ordersdb");
    assert_eq!(config.database.instance_class, "t3.small");
    assert_eq!(config.database.user, "postgres");
    assert_eq!(config.api.route, "GET /orders");
    assert_eq!(config.api.handler, "src/lambda.handler");
}

#[test]
fn test_config_empty_file_is_all_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.app.name, Config::default().app.name);
    assert_eq!(config.layer.sources, Config::default().layer.sources);
}

#[test]
fn test_load_with_warnings_reports_unknown_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("strata.toml");
    fs::write(
        &path,
        r#"
[layer]
name = "client"
platform_markr = "rhel"
"#,
    )
    .unwrap();

    let (config, warnings) = load_with_warnings(&path).unwrap();

    assert_eq!(config.layer.name, "client");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "layer.platform_markr");
}

#[test]
fn test_load_with_warnings_rejects_invalid_toml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("strata.toml");
    fs::write(&path, "[layer\nname = ").unwrap();

    let err = load_with_warnings(&path).unwrap_err();
    assert!(matches!(err, StrataError::InvalidConfig { .. }));
}

#[test]
fn test_load_or_default_without_file() {
    let dir = tempdir().unwrap();

    let (config, warnings) = load_or_default(None, dir.path()).unwrap();

    assert_eq!(config.app.name, Config::default().app.name);
    assert!(warnings.is_empty());
}

#[test]
fn test_load_or_default_picks_up_project_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("strata.toml"), "[app]\nname = \"from-file\"").unwrap();

    let (config, _) = load_or_default(None, dir.path()).unwrap();

    assert_eq!(config.app.name, "from-file");
}

#[test]
fn test_load_or_default_explicit_path_must_exist() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = load_or_default(Some(&missing), dir.path()).unwrap_err();
    assert!(matches!(err, StrataError::Io(_)));
}

#[test]
fn test_execution_mode_deployed() {
    let mode = ExecutionMode::resolve(false).unwrap();
    assert_eq!(mode, ExecutionMode::Deployed);
    assert!(!mode.is_local());
    assert_eq!(mode.label(), "deployed");
}

#[test]
fn test_execution_mode_local_labels() {
    let mode = ExecutionMode::Local {
        database_url: "postgres://localhost/dev".to_string(),
    };
    assert!(mode.is_local());
    assert_eq!(mode.label(), "local");
}
