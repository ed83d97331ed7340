use apimlint_cli::test_utils::{dedicated_config, project_schema, shared_config, write_json};
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

use super::apimlint;

const CONFIG: &str = "infra/bicep/bicep.config.json";

#[test]
fn test_check_help() {
    let dir = TempDir::new().unwrap();
    apimlint(dir.path())
        .args(["check", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-schema"))
        .stdout(predicate::str::contains("--strict"));
}

#[test]
fn test_check_clean_shared_config() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), CONFIG, &shared_config("orders"));

    apimlint(dir.path())
        .args(["check", "-c", CONFIG])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Validation passed! API Management configurations are valid.",
        ));
}

#[test]
fn test_check_uses_sibling_schema() {
    let dir = TempDir::new().unwrap();
    let mut config = shared_config("orders");
    config["metadata"] = json!({});
    write_json(dir.path(), CONFIG, &config);
    write_json(dir.path(), "infra/bicep/bicep.config.schema.json", &project_schema());

    apimlint(dir.path())
        .args(["check", "-c", CONFIG])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Schema validation failed"));

    // Without the schema the shared-mode checks need the project name
    apimlint(dir.path())
        .args(["check", "-c", CONFIG, "--no-schema"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("projectName"));
}

#[test]
fn test_check_reports_policy_problems() {
    let dir = TempDir::new().unwrap();
    let mut config = shared_config("orders");
    config["moduleConfigurations"]["apiManagement"]["globalPolicy"]["value"] =
        json!("<policies><inbound>{{undeclared}}</policies>");
    write_json(dir.path(), CONFIG, &config);

    apimlint(dir.path())
        .args(["check", "-c", CONFIG])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Validation failed!"))
        .stdout(predicate::str::contains("Invalid XML syntax in global policy"))
        .stdout(predicate::str::contains("undeclared"));
}

#[test]
fn test_check_writes_json_report() {
    let dir = TempDir::new().unwrap();
    let mut config = shared_config("orders");
    config["moduleConfigurations"]["apiManagement"]["apis"][0]["path"] = json!("/billing/v1");
    write_json(dir.path(), CONFIG, &config);

    apimlint(dir.path())
        .args(["check", "-c", CONFIG, "-o", "out/report.json", "--format", "json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"validationPassed\": false"));

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("out/report.json")).unwrap())
            .unwrap();
    assert_eq!(report["projectName"], "orders");
    assert_eq!(report["mode"], "shared");
    assert_eq!(report["issues"][0]["type"], "invalid_path_format");
    assert_eq!(report["issues"][0]["apiName"], "orders-api");
}

#[test]
fn test_check_strict_mode_fails_on_warnings() {
    let dir = TempDir::new().unwrap();
    let mut config = dedicated_config();
    config["moduleConfigurations"]["apiManagement"]["products"][0]["description"] = json!("");
    write_json(dir.path(), CONFIG, &config);

    apimlint(dir.path())
        .args(["check", "-c", CONFIG])
        .assert()
        .success()
        .stdout(predicate::str::contains("Warning:"));

    apimlint(dir.path())
        .args(["check", "-c", CONFIG, "--strict"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Strict mode"));
}

#[test]
fn test_check_mode_flag_forces_shared() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), CONFIG, &dedicated_config());

    apimlint(dir.path()).args(["check", "-c", CONFIG]).assert().success();
    apimlint(dir.path())
        .args(["check", "-c", CONFIG, "--mode", "shared"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("projectName"));
}

#[test]
fn test_check_skips_when_apim_disabled() {
    let dir = TempDir::new().unwrap();
    let mut config = shared_config("orders");
    config["featureToggles"]["enableApiManagement"] = json!(false);
    write_json(dir.path(), CONFIG, &config);

    apimlint(dir.path())
        .args(["check", "-c", CONFIG])
        .assert()
        .success()
        .stdout(predicate::str::contains("API Management is not enabled"));
}

#[test]
fn test_check_missing_config() {
    let dir = TempDir::new().unwrap();
    apimlint(dir.path())
        .args(["check", "-c", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn test_check_yaml_config() {
    let dir = TempDir::new().unwrap();
    let yaml = serde_yaml::to_string(&shared_config("orders")).unwrap();
    std::fs::write(dir.path().join("bicep.config.yaml"), yaml).unwrap();

    apimlint(dir.path())
        .args(["check", "-c", "bicep.config.yaml", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
