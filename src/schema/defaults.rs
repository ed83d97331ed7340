//! Built-in schema for subscription-management parameter files.

use serde_json::{Value, json};

use super::convert::DRAFT_07_URI;

fn parameter(value: Value) -> Value {
    json!({
        "type": "object",
        "properties": { "value": value }
    })
}

fn required_parameter(value: Value) -> Value {
    json!({
        "type": "object",
        "properties": { "value": value },
        "required": ["value"]
    })
}

fn email_list() -> Value {
    json!({ "type": "array", "items": { "type": "string", "format": "email" } })
}

fn limit(extra_required: &[&str]) -> Value {
    let mut required = vec!["calls", "renewalPeriod"];
    required.extend_from_slice(extra_required);
    let mut schema = json!({
        "type": "object",
        "properties": {
            "calls": { "type": "integer", "minimum": 1 },
            "renewalPeriod": { "type": "string" }
        },
        "required": required
    });
    if extra_required.contains(&"headerName") {
        schema["properties"]["headerName"] = json!({ "type": "string" });
    }
    schema
}

/// The schema written when no subscription schema file exists yet.
///
/// It describes an ARM parameters document: each parameter is an object
/// wrapping a `value`.
#[must_use]
pub fn default_subscription_schema() -> Value {
    json!({
        "$schema": DRAFT_07_URI,
        "type": "object",
        "properties": {
            "$schema": { "type": "string" },
            "contentVersion": { "type": "string" },
            "parameters": {
                "type": "object",
                "properties": {
                    "projectName": required_parameter(json!({ "type": "string" })),
                    "environment": required_parameter(json!({
                        "type": "string",
                        "enum": ["dev", "test", "staging", "prod"]
                    })),
                    "subscriptions": parameter(json!({
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": { "type": "string" },
                                "displayName": { "type": "string" },
                                "productName": { "type": "string" },
                                "state": {
                                    "type": "string",
                                    "enum": ["active", "suspended", "submitted", "rejected", "cancelled", "expired"]
                                },
                                "allowTracing": { "type": "boolean" },
                                "policy": {
                                    "type": "object",
                                    "properties": {
                                        "format": { "type": "string", "enum": ["xml", "rawxml"] },
                                        "value": { "type": "string" }
                                    },
                                    "required": ["format", "value"]
                                }
                            },
                            "required": ["name"]
                        }
                    })),
                    "approvalWorkflow": parameter(json!({
                        "type": "object",
                        "properties": {
                            "notificationEmails": email_list(),
                            "expirationEmails": email_list(),
                            "webhookUrl": { "type": "string", "format": "uri" },
                            "webhookCredential": { "type": "string" }
                        }
                    })),
                    "quotas": parameter(json!({
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": { "type": "string" },
                                "description": { "type": "string" },
                                "calls": { "type": "integer", "minimum": 1 },
                                "renewalPeriod": { "type": "string" },
                                "rateLimit": limit(&[]),
                                "spikeArrest": limit(&[]),
                                "quotaByKey": limit(&["headerName"])
                            },
                            "required": ["name", "calls", "renewalPeriod"]
                        }
                    })),
                    "usageTracking": parameter(json!({
                        "type": "object",
                        "properties": {
                            "applicationInsightsId": { "type": "string" },
                            "applicationInsightsKey": { "type": "string" },
                            "apis": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "name": { "type": "string" },
                                        "alwaysLog": { "type": "string" },
                                        "logClientIp": { "type": "boolean" },
                                        "samplingPercentage": { "type": "integer", "minimum": 0, "maximum": 100 },
                                        "verbosity": { "type": "string", "enum": ["error", "information", "verbose"] },
                                        "requestHeaders": { "type": "array", "items": { "type": "string" } },
                                        "responseHeaders": { "type": "array", "items": { "type": "string" } }
                                    },
                                    "required": ["name"]
                                }
                            }
                        }
                    })),
                    "lifecycleConfig": parameter(json!({
                        "type": "object",
                        "properties": {
                            "expirationHandling": { "type": "boolean" },
                            "renewalNotification": {
                                "type": "object",
                                "properties": { "daysBeforeExpiration": { "type": "integer", "minimum": 1 } },
                                "required": ["daysBeforeExpiration"]
                            },
                            "gracePeriod": {
                                "type": "object",
                                "properties": { "days": { "type": "integer", "minimum": 1 } },
                                "required": ["days"]
                            },
                            "revocationHandling": { "type": "boolean" }
                        }
                    })),
                    "notificationConfig": parameter(json!({
                        "type": "object",
                        "properties": {
                            "creationEmails": email_list(),
                            "cancellationEmails": email_list(),
                            "quotaEmails": email_list(),
                            "webhookUrl": { "type": "string", "format": "uri" },
                            "webhookCredential": { "type": "string" }
                        }
                    }))
                }
            }
        }
    })
}
