use apimlint_cli::test_utils::{dedicated_config, shared_config, write_json};
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

use super::apimlint;

const CONFIG: &str = "infrastructure/bicep/bicep.config.json";
const REPORT: &str = "infrastructure/bicep/product-validation-report.json";

fn read_report(dir: &TempDir, name: &str) -> Value {
    serde_json::from_str(&std::fs::read_to_string(dir.path().join(name)).unwrap()).unwrap()
}

#[test]
fn test_products_default_report_location() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), CONFIG, &shared_config("orders"));

    apimlint(dir.path())
        .arg("products")
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation passed! Product configurations are valid."));

    let report = read_report(&dir, REPORT);
    assert_eq!(report["validationPassed"], true);
    assert_eq!(report["mode"], "shared");
}

#[test]
fn test_products_shared_naming() {
    let dir = TempDir::new().unwrap();
    let mut config = shared_config("orders");
    config["moduleConfigurations"]["apiManagement"]["products"] = json!([
        { "name": "orders-public", "displayName": "Public", "description": "Public" },
        { "name": "billing-internal", "displayName": "Billing", "description": "Billing" },
        { "name": "orders-vip", "displayName": "VIP", "description": "VIP" }
    ]);
    write_json(dir.path(), CONFIG, &config);

    apimlint(dir.path())
        .args(["products", "-o", "report.json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("billing-internal"))
        .stdout(predicate::str::contains("Warning:"));

    let report = read_report(&dir, "report.json");
    let kinds: Vec<&str> =
        report["issues"].as_array().unwrap().iter().filter_map(|i| i["type"].as_str()).collect();
    assert!(kinds.contains(&"invalid_naming_convention"));
    assert!(kinds.contains(&"non_standard_product_type"));
}

#[test]
fn test_products_missing_reference() {
    let dir = TempDir::new().unwrap();
    let mut config = dedicated_config();
    config["moduleConfigurations"]["apiManagement"]["apis"][0]["productName"] = json!("premium");
    write_json(dir.path(), CONFIG, &config);

    apimlint(dir.path()).args(["products", "--mode", "dedicated"]).assert().failure();

    let report = read_report(&dir, REPORT);
    let issue = &report["issues"][0];
    assert_eq!(issue["type"], "missing_referenced_products");
    assert_eq!(issue["missingProducts"], json!(["premium"]));
}

#[test]
fn test_products_contradictory_subscription_settings() {
    let dir = TempDir::new().unwrap();
    let mut config = dedicated_config();
    config["moduleConfigurations"]["apiManagement"]["products"][0]["subscriptionSettings"] =
        json!({ "subscriptionRequired": false, "approvalRequired": true });
    write_json(dir.path(), CONFIG, &config);

    apimlint(dir.path())
        .args(["products", "--mode", "dedicated"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("starter"));

    let report = read_report(&dir, REPORT);
    assert_eq!(report["issues"][0]["type"], "invalid_subscription_settings");
}

#[test]
fn test_products_none_defined() {
    let dir = TempDir::new().unwrap();
    let mut config = dedicated_config();
    config["moduleConfigurations"]["apiManagement"]["products"] = json!([]);
    write_json(dir.path(), CONFIG, &config);

    apimlint(dir.path())
        .args(["products", "--mode", "dedicated"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No products defined in configuration"));
}

#[test]
fn test_products_shared_requires_project_name() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), CONFIG, &dedicated_config());

    apimlint(dir.path())
        .args(["products", "--mode", "shared"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project name is required"));

    apimlint(dir.path())
        .arg("products")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project name is required"));
}

#[test]
fn test_products_default_to_shared_rules() {
    let dir = TempDir::new().unwrap();
    let mut config = shared_config("orders");
    let apim = &mut config["moduleConfigurations"]["apiManagement"];
    apim.as_object_mut().unwrap().remove("operationalMode");
    apim["products"] = json!([
        { "name": "orders-public", "displayName": "Public", "description": "Public" },
        { "name": "billing-internal", "displayName": "Billing", "description": "Billing" }
    ]);
    write_json(dir.path(), CONFIG, &config);

    apimlint(dir.path())
        .arg("products")
        .assert()
        .failure()
        .stdout(predicate::str::contains("billing-internal"));

    let report = read_report(&dir, REPORT);
    assert_eq!(report["mode"], "shared");
    assert_eq!(report["issues"][0]["type"], "invalid_naming_convention");

    apimlint(dir.path()).args(["products", "--mode", "dedicated"]).assert().success();
}
