//! Test utilities for apimlint
//!
//! Logging setup plus configuration fixtures shared by unit and integration
//! tests. Fixtures return `serde_json::Value` so tests can tweak a field
//! before writing or parsing them.
//!
//! # Example
//!
//! ```rust,no_run
//! use apimlint_cli::test_utils::{shared_config, write_json};
//!
//! let dir = std::env::temp_dir();
//! let path = write_json(&dir, "bicep.config.json", &shared_config("orders"));
//! assert!(path.exists());
//! ```

use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`. With neither, logging stays
/// off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_ansi(true)
            .try_init();
    });
}

/// A clean shared-mode configuration for `project`.
///
/// Every check passes on it: products and the API carry the project prefix,
/// the policies are well formed and only reference declared names.
#[must_use]
pub fn shared_config(project: &str) -> Value {
    json!({
        "metadata": { "projectName": project },
        "featureToggles": { "enableApiManagement": true },
        "moduleConfigurations": {
            "apiManagement": {
                "operationalMode": "shared",
                "namedValues": [
                    { "name": format!("{project}-backend-url"), "value": "https://backend" }
                ],
                "policyFragments": [
                    {
                        "name": format!("{project}-cors"),
                        "value": "<policies><inbound><cors /></inbound></policies>"
                    }
                ],
                "globalPolicy": {
                    "value": "<policies><inbound><base /></inbound><outbound><base /></outbound></policies>"
                },
                "products": [
                    {
                        "name": format!("{project}-public"),
                        "displayName": "Public",
                        "description": "Public APIs",
                        "subscriptionSettings": {
                            "subscriptionRequired": true,
                            "approvalRequired": false
                        }
                    }
                ],
                "apis": [
                    {
                        "name": format!("{project}-api"),
                        "path": format!("{project}/v1"),
                        "productName": format!("{project}-public"),
                        "policy": {
                            "value": format!(
                                "<policies><inbound><base /><set-backend-service base-url=\"{{{{{project}-backend-url}}}}\" />\
                                 <include-fragment fragment-id=\"{project}-cors\" /></inbound></policies>"
                            )
                        }
                    }
                ]
            }
        }
    })
}

/// A dedicated-mode configuration without a project name.
#[must_use]
pub fn dedicated_config() -> Value {
    json!({
        "featureToggles": { "enableApiManagement": true },
        "moduleConfigurations": {
            "apiManagement": {
                "operationalMode": "dedicated",
                "products": [
                    { "name": "starter", "displayName": "Starter", "description": "Starter tier" }
                ],
                "apis": [
                    { "name": "echo", "path": "/echo", "productName": "starter" }
                ]
            }
        }
    })
}

/// A subscription-management parameters document that passes every check.
#[must_use]
pub fn subscription_document(project: &str) -> Value {
    json!({
        "parameters": {
            "projectName": { "value": project },
            "subscriptions": {
                "value": [
                    {
                        "name": format!("{project}-partner"),
                        "displayName": "Partner",
                        "productName": format!("{project}-public"),
                        "policy": {
                            "format": "xml",
                            "value": "<policies><inbound><base /></inbound></policies>"
                        }
                    }
                ]
            },
            "quotas": {
                "value": [
                    {
                        "name": format!("{project}-standard"),
                        "calls": 1000,
                        "renewalPeriod": "3600",
                        "rateLimit": { "calls": 10, "renewalPeriod": "60" }
                    }
                ]
            },
            "usageTracking": {
                "value": {
                    "applicationInsightsId": "/subscriptions/abc/providers/microsoft.insights/components/ai",
                    "apis": [{ "name": format!("{project}-api"), "samplingPercentage": 50 }]
                }
            }
        }
    })
}

/// A permissive draft-07 schema requiring `metadata.projectName`.
#[must_use]
pub fn project_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["metadata"],
        "properties": {
            "metadata": {
                "type": "object",
                "required": ["projectName"],
                "properties": { "projectName": { "type": "string" } }
            }
        }
    })
}

/// Write `value` as pretty JSON to `dir/name`, creating parent directories.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create fixture directory");
    }
    let content = serde_json::to_string_pretty(value).expect("serialize fixture");
    std::fs::write(&path, content).expect("write fixture");
    path
}
