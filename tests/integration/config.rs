use apimlint_cli::test_utils::{project_schema, shared_config, write_json};
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

use super::apimlint;

#[test]
fn test_config_valid_with_explicit_schema() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), "bicep.config.json", &shared_config("orders"));
    write_json(dir.path(), "schema.json", &project_schema());

    apimlint(dir.path())
        .args(["config", "bicep.config.json", "-s", "schema.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_config_lists_violations() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), "bicep.config.json", &json!({ "metadata": { "projectName": 42 } }));
    write_json(dir.path(), "schema.json", &project_schema());

    apimlint(dir.path())
        .args(["config", "bicep.config.json", "-s", "schema.json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Configuration validation failed:"))
        .stdout(predicate::str::contains("Error 1: /metadata/projectName"));
}

#[test]
fn test_config_yaml_with_sibling_yaml_schema() {
    let dir = TempDir::new().unwrap();
    let env_dir = dir.path().join("environments");
    let bicep_dir = dir.path().join("bicep");
    std::fs::create_dir_all(&env_dir).unwrap();
    std::fs::create_dir_all(&bicep_dir).unwrap();

    std::fs::write(env_dir.join("bicep.config.yaml"), "metadata:\n  projectName: orders\n").unwrap();
    std::fs::write(
        bicep_dir.join("bicep.config.schema.yaml"),
        "metadata:\n  type: object\n  required: [projectName]\n",
    )
    .unwrap();

    apimlint(dir.path())
        .args(["config", "environments/bicep.config.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));

    std::fs::write(env_dir.join("bicep.config.yaml"), "environment: dev\n").unwrap();
    apimlint(dir.path())
        .args(["config", "environments/bicep.config.yaml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("metadata"));
}

#[test]
fn test_config_json_format() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), "bicep.config.json", &json!({}));
    write_json(dir.path(), "schema.json", &project_schema());

    let output = apimlint(dir.path())
        .args(["config", "bicep.config.json", "-s", "schema.json", "--format", "json"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let report: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["violations"][0]["instancePath"], "");
}

#[test]
fn test_config_missing_schema() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), "bicep.config.json", &json!({}));

    apimlint(dir.path())
        .args(["config", "bicep.config.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Schema file not found"));
}

#[test]
fn test_config_unparseable_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("bicep.config.json"), "{ not json").unwrap();
    write_json(dir.path(), "schema.json", &project_schema());

    apimlint(dir.path())
        .args(["config", "bicep.config.json", "-s", "schema.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error parsing configuration file"));
}
