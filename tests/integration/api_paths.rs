use apimlint_cli::test_utils::{dedicated_config, shared_config, write_json};
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

use super::apimlint;

const CONFIG: &str = "infrastructure/bicep/bicep.config.json";
const REPORT: &str = "infrastructure/bicep/validation-report.json";

#[test]
fn test_api_paths_dedicated_mode_skips() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), CONFIG, &dedicated_config());

    apimlint(dir.path())
        .args(["api-paths", "--mode", "dedicated"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dedicated mode. No path conflict validation needed."));

    assert!(!dir.path().join(REPORT).exists());
}

#[test]
fn test_api_paths_clean_shared_config() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), CONFIG, &shared_config("orders"));

    apimlint(dir.path())
        .arg("api-paths")
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation passed! API paths are valid."));

    assert!(dir.path().join(REPORT).exists());
}

#[test]
fn test_api_paths_reports_conflicts() {
    let dir = TempDir::new().unwrap();
    let mut config = shared_config("orders");
    config["moduleConfigurations"]["apiManagement"]["apis"] = json!([
        { "name": "orders-api", "path": "orders/v1" },
        { "name": "orders-api", "path": "/orders/v2" },
        { "name": "legacy", "path": "legacy/v1" },
        { "name": "nopath" }
    ]);
    write_json(dir.path(), CONFIG, &config);

    apimlint(dir.path())
        .arg("api-paths")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Duplicate API names found within the project: orders-api"))
        .stdout(predicate::str::contains("starts with a slash"))
        .stdout(predicate::str::contains("API 'nopath' is missing a path"));

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join(REPORT)).unwrap()).unwrap();
    let kinds: Vec<&str> =
        report["issues"].as_array().unwrap().iter().filter_map(|i| i["type"].as_str()).collect();
    assert_eq!(
        kinds,
        vec![
            "duplicate_api_names",
            "invalid_path_format",
            "path_namespace_warning",
            "path_namespace_warning",
            "missing_path",
        ]
    );
}

#[test]
fn test_api_paths_mode_flag() {
    let dir = TempDir::new().unwrap();
    let mut config = shared_config("orders");
    config["moduleConfigurations"]["apiManagement"]["operationalMode"] = json!("dedicated");
    config["moduleConfigurations"]["apiManagement"]["apis"][0]["path"] = json!("/orders");
    write_json(dir.path(), CONFIG, &config);

    apimlint(dir.path()).args(["api-paths", "--mode", "dedicated"]).assert().success();
    apimlint(dir.path()).arg("api-paths").assert().failure();
    apimlint(dir.path()).args(["api-paths", "--mode", "shared"]).assert().failure();
}

#[test]
fn test_api_paths_default_to_shared_rules() {
    let dir = TempDir::new().unwrap();
    let mut config = shared_config("orders");
    let apim = &mut config["moduleConfigurations"]["apiManagement"];
    apim.as_object_mut().unwrap().remove("operationalMode");
    apim["apis"][0]["path"] = json!("/orders");
    write_json(dir.path(), CONFIG, &config);

    apimlint(dir.path())
        .arg("api-paths")
        .assert()
        .failure()
        .stdout(predicate::str::contains("starts with a slash"));

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join(REPORT)).unwrap()).unwrap();
    assert_eq!(report["mode"], "shared");
}

#[test]
fn test_api_paths_no_apis() {
    let dir = TempDir::new().unwrap();
    let mut config = shared_config("orders");
    config["moduleConfigurations"]["apiManagement"]["apis"] = json!([]);
    write_json(dir.path(), CONFIG, &config);

    apimlint(dir.path())
        .arg("api-paths")
        .assert()
        .success()
        .stdout(predicate::str::contains("No APIs defined in configuration"));
}
