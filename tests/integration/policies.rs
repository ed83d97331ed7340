use apimlint_cli::test_utils::{project_schema, shared_config, write_json};
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

use super::apimlint;

fn setup(config: &Value) -> TempDir {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), "bicep.config.json", config);
    write_json(dir.path(), "bicep.config.schema.json", &project_schema());
    dir
}

#[test]
fn test_policies_default_paths() {
    let dir = setup(&shared_config("orders"));

    apimlint(dir.path())
        .arg("policies")
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation passed! Policy configurations are valid."));
}

#[test]
fn test_policies_undefined_references() {
    let mut config = shared_config("orders");
    config["moduleConfigurations"]["apiManagement"]["apis"][0]["policy"]["value"] = json!(
        "<policies><inbound>{{orders-secret}}<include-fragment fragment-id=\"orders-auth\" /></inbound></policies>"
    );
    let dir = setup(&config);

    apimlint(dir.path())
        .arg("policies")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "API policy \"orders-api\": References undefined named value \"orders-secret\"",
        ))
        .stdout(predicate::str::contains(
            "API policy \"orders-api\": References undefined policy fragment \"orders-auth\"",
        ));
}

#[test]
fn test_policies_namespacing_only_in_shared_mode() {
    let mut config = shared_config("orders");
    config["moduleConfigurations"]["apiManagement"]["namedValues"]
        .as_array_mut()
        .unwrap()
        .push(json!({ "name": "global-key" }));
    let dir = setup(&config);

    apimlint(dir.path())
        .arg("policies")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Named value \"global-key\" is not properly namespaced"));

    config["moduleConfigurations"]["apiManagement"]["operationalMode"] = json!("dedicated");
    write_json(dir.path(), "bicep.config.json", &config);
    apimlint(dir.path()).arg("policies").assert().success();
}

#[test]
fn test_policies_invalid_operation_policy() {
    let mut config = shared_config("orders");
    config["moduleConfigurations"]["apiManagement"]["apis"][0]["policy"]["operations"] =
        json!([{ "name": "get-order", "value": "<policies><inbound></policies>" }]);
    let dir = setup(&config);

    let output = apimlint(dir.path())
        .args(["policies", "--format", "json"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let report: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["issues"][0]["type"], "invalid_policy_xml");
    assert_eq!(report["issues"][0]["index"], "0.0");
}

#[test]
fn test_policies_schema_violation_is_fatal() {
    let mut config = shared_config("orders");
    config["metadata"] = json!({});
    let dir = setup(&config);

    apimlint(dir.path())
        .arg("policies")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Schema validation failed"));
}
