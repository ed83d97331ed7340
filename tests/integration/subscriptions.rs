use apimlint_cli::test_utils::{subscription_document, write_json};
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

use super::apimlint;

const DOCUMENT: &str = "infrastructure/bicep/templates/subscription-management-sample.json";
const SCHEMA: &str = "infrastructure/bicep/subscription-config.schema.json";

#[test]
fn test_subscriptions_creates_default_schema() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), DOCUMENT, &subscription_document("orders"));

    apimlint(dir.path())
        .arg("subscriptions")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created default schema at"))
        .stdout(predicate::str::contains(
            "Validation passed! Subscription configurations are valid.",
        ));

    let schema: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join(SCHEMA)).unwrap()).unwrap();
    assert_eq!(schema["$schema"], "http://json-schema.org/draft-07/schema#");

    // Second run reuses the schema
    apimlint(dir.path())
        .arg("subscriptions")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created default schema").not());
}

#[test]
fn test_subscriptions_collects_issues() {
    let dir = TempDir::new().unwrap();
    let mut document = subscription_document("orders");
    let params = &mut document["parameters"];
    params["subscriptions"]["value"] = json!([
        { "name": "orders-a", "policy": { "format": "xml", "value": "<policies><inbound></policies>" } },
        { "name": "orders-a" }
    ]);
    params["quotas"]["value"][0]["renewalPeriod"] = json!("000");
    params["usageTracking"]["value"]["applicationInsightsId"] = json!("");
    write_json(dir.path(), DOCUMENT, &document);

    apimlint(dir.path())
        .args(["subscriptions", "-o", "subscriptions-report.json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Duplicate subscription name found: orders-a"))
        .stdout(predicate::str::contains("Invalid XML policy for subscription: orders-a"))
        .stdout(predicate::str::contains("Invalid renewal period for quota: orders-standard"))
        .stdout(predicate::str::contains("Application Insights ID is required"));

    let report: Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("subscriptions-report.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(report["projectName"], "orders");
    assert!(report.get("mode").is_none());
    assert_eq!(report["issues"].as_array().unwrap().len(), 4);
}

#[test]
fn test_subscriptions_require_project_name() {
    let dir = TempDir::new().unwrap();
    let mut document = subscription_document("orders");
    document["parameters"]["projectName"] = json!({ "value": "" });
    write_json(dir.path(), DOCUMENT, &document);
    write_json(dir.path(), SCHEMA, &json!({ "type": "object" }));

    apimlint(dir.path())
        .arg("subscriptions")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project name is required for subscription validation"));
}

#[test]
fn test_subscriptions_custom_paths() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), "params.json", &subscription_document("orders"));
    write_json(dir.path(), "schema.json", &json!({ "type": "object", "required": ["parameters"] }));

    apimlint(dir.path())
        .args(["subscriptions", "-c", "params.json", "-s", "schema.json", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"validationPassed\": true"));
}
