//! Configuration model for API Management infrastructure-as-code.
//!
//! The deployment configuration (`bicep.config.json` / `bicep.config.yaml`) is
//! a large document of which apimlint only reads a small slice:
//!
//! ```json
//! {
//!   "metadata": { "projectName": "orders" },
//!   "featureToggles": { "enableApiManagement": true },
//!   "moduleConfigurations": {
//!     "apiManagement": {
//!       "operationalMode": "shared",
//!       "apis": [{ "name": "orders-api", "path": "orders/v1", "productName": "orders-internal" }],
//!       "products": [{ "name": "orders-internal", "displayName": "Orders (internal)" }],
//!       "namedValues": [{ "name": "orders-backend-url" }],
//!       "policyFragments": [{ "name": "orders-cors", "value": "<fragment>...</fragment>" }],
//!       "globalPolicy": { "value": "<policies>...</policies>" }
//!     }
//!   }
//! }
//! ```
//!
//! Unknown fields are ignored; the JSON Schema check is responsible for the
//! gross shape. Every type here is a read-only view consumed by the checkers.
//!
//! # Modules
//!
//! - [`loader`] - reads JSON or YAML documents from disk
//! - [`subscription`] - the separate subscription-management parameters document

pub mod loader;
pub mod subscription;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::core::ApimError;

pub use loader::{DocumentFormat, load_document, parse_document};
pub use subscription::SubscriptionDocument;

/// Root of the deployment configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Project metadata
    #[serde(default)]
    pub metadata: Metadata,
    /// Feature switches for the deployment modules
    #[serde(default)]
    pub feature_toggles: FeatureToggles,
    /// Per-module configuration subtrees
    #[serde(default)]
    pub module_configurations: ModuleConfigurations,
}

impl Configuration {
    /// Convert an already-parsed document into the typed model.
    ///
    /// # Errors
    ///
    /// Returns [`ApimError::ConfigStructureError`] when a field the checkers read
    /// has the wrong type (for example a string where a list is expected).
    pub fn from_value(value: Value) -> Result<Self, ApimError> {
        serde_json::from_value(value).map_err(|e| ApimError::ConfigStructureError {
            reason: e.to_string(),
        })
    }

    /// The project name, if present and non-empty.
    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        self.metadata.project_name.as_deref().filter(|name| !name.is_empty())
    }

    /// The APIM subtree, but only when API Management is enabled.
    #[must_use]
    pub fn api_management(&self) -> Option<&ApiManagementConfig> {
        if !self.feature_toggles.enable_api_management {
            return None;
        }
        self.module_configurations.api_management.as_ref()
    }
}

/// Project metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Project name used as the namespace prefix in shared mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}

/// Deployment feature switches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureToggles {
    /// Whether the API Management module is deployed
    #[serde(default)]
    pub enable_api_management: bool,
}

/// Container for module subtrees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleConfigurations {
    /// The API Management subtree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_management: Option<ApiManagementConfig>,
}

/// Whether the APIM instance is shared between projects or owned by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OperationalMode {
    /// Several projects deploy into one APIM instance; names must be namespaced
    Shared,
    /// The project owns its APIM instance
    Dedicated,
}

impl OperationalMode {
    /// Lowercase wire name, as written in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Dedicated => "dedicated",
        }
    }

    /// Combine a command-line override with the configured mode.
    ///
    /// The instance is treated as shared when either source says so. With
    /// neither present the mode is dedicated.
    #[must_use]
    pub fn resolve(flag: Option<Self>, configured: Option<Self>) -> Self {
        if flag == Some(Self::Shared) || configured == Some(Self::Shared) {
            Self::Shared
        } else {
            Self::Dedicated
        }
    }
}

impl fmt::Display for OperationalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `moduleConfigurations.apiManagement` subtree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiManagementConfig {
    /// Shared or dedicated deployment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operational_mode: Option<OperationalMode>,
    /// APIs in declaration order
    #[serde(default)]
    pub apis: Vec<Api>,
    /// Products in declaration order
    #[serde(default)]
    pub products: Vec<Product>,
    /// Named values (policy variables)
    #[serde(default)]
    pub named_values: Vec<NamedValue>,
    /// Reusable policy fragments
    #[serde(default)]
    pub policy_fragments: Vec<PolicyFragment>,
    /// Policy applied to every API in the instance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_policy: Option<PolicyDocument>,
}

impl ApiManagementConfig {
    /// Global policy text, if one is declared and non-empty.
    #[must_use]
    pub fn global_policy_text(&self) -> Option<&str> {
        self.global_policy.as_ref().and_then(PolicyDocument::text)
    }
}

/// An API published through the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Api {
    /// Unique name within the project
    #[serde(default)]
    pub name: String,
    /// URL suffix, `{projectName}/...` in shared mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Product this API is published under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// API-level policy with optional per-operation policies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<ApiPolicy>,
}

impl Api {
    /// API-level policy text, if present and non-empty.
    #[must_use]
    pub fn policy_text(&self) -> Option<&str> {
        self.policy.as_ref().and_then(|p| non_empty(p.value.as_deref()))
    }
}

/// Policy attached to an API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPolicy {
    /// Policy XML
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Operation-level policies in declaration order
    #[serde(default)]
    pub operations: Vec<OperationPolicy>,
}

/// Policy attached to a single API operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationPolicy {
    /// Operation identifier
    #[serde(default)]
    pub name: String,
    /// Policy XML
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A product grouping APIs for subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique name, `{projectName}-{productType}` in shared mode
    #[serde(default)]
    pub name: String,
    /// Human-readable name shown in the developer portal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Portal description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Subscription requirements for consumers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_settings: Option<SubscriptionSettings>,
    /// Product-level policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<PolicyDocument>,
}

impl Product {
    /// Product-level policy text, if present and non-empty.
    #[must_use]
    pub fn policy_text(&self) -> Option<&str> {
        self.policy.as_ref().and_then(PolicyDocument::text)
    }
}

/// Subscription requirements of a product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSettings {
    /// Consumers need a subscription key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_required: Option<bool>,
    /// Subscriptions need administrator approval
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_required: Option<bool>,
}

/// A named value that policies reference as `{{name}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedValue {
    /// Identifier used in placeholders
    #[serde(default)]
    pub name: String,
}

/// A reusable policy fragment included with `<include-fragment fragment-id="..."/>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyFragment {
    /// Fragment identifier
    #[serde(default)]
    pub name: String,
    /// Fragment XML
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A standalone policy attached to the global or product scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDocument {
    /// Policy XML
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl PolicyDocument {
    /// Policy text, if non-empty.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        non_empty(self.value.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_minimal_configuration() {
        let config = Configuration::from_value(json!({})).unwrap();
        assert_eq!(config.project_name(), None);
        assert!(config.api_management().is_none());
    }

    #[test]
    fn test_deserialize_apim_subtree() {
        let config = Configuration::from_value(json!({
            "metadata": { "projectName": "orders", "owner": "team-a" },
            "featureToggles": { "enableApiManagement": true, "enableFunctions": false },
            "moduleConfigurations": {
                "apiManagement": {
                    "operationalMode": "shared",
                    "sku": "Developer",
                    "apis": [{
                        "name": "orders-api",
                        "path": "orders/v1",
                        "productName": "orders-internal",
                        "policy": {
                            "value": "<policies/>",
                            "operations": [{ "name": "get-order", "value": "<policies/>" }]
                        }
                    }],
                    "products": [{
                        "name": "orders-internal",
                        "subscriptionSettings": { "subscriptionRequired": true }
                    }],
                    "namedValues": [{ "name": "orders-url", "value": "https://example" }],
                    "policyFragments": [{ "name": "orders-cors", "value": "<fragment/>" }],
                    "globalPolicy": { "value": "<policies/>" }
                }
            }
        }))
        .unwrap();

        assert_eq!(config.project_name(), Some("orders"));
        let apim = config.api_management().unwrap();
        assert_eq!(apim.operational_mode, Some(OperationalMode::Shared));
        assert_eq!(apim.apis[0].path.as_deref(), Some("orders/v1"));
        assert_eq!(apim.apis[0].policy.as_ref().unwrap().operations[0].name, "get-order");
        assert_eq!(
            apim.products[0].subscription_settings.unwrap().subscription_required,
            Some(true)
        );
        assert_eq!(apim.products[0].subscription_settings.unwrap().approval_required, None);
        assert_eq!(apim.named_values[0].name, "orders-url");
        assert_eq!(apim.global_policy_text(), Some("<policies/>"));
    }

    #[test]
    fn test_disabled_apim_hides_subtree() {
        let config = Configuration::from_value(json!({
            "featureToggles": { "enableApiManagement": false },
            "moduleConfigurations": { "apiManagement": { "apis": [] } }
        }))
        .unwrap();
        assert!(config.api_management().is_none());
    }

    #[test]
    fn test_empty_project_name_is_absent() {
        let config = Configuration::from_value(json!({ "metadata": { "projectName": "" } })).unwrap();
        assert_eq!(config.project_name(), None);
    }

    #[test]
    fn test_wrong_shape_is_structure_error() {
        let err = Configuration::from_value(json!({
            "featureToggles": { "enableApiManagement": true },
            "moduleConfigurations": { "apiManagement": { "apis": "not-a-list" } }
        }))
        .unwrap_err();
        assert!(matches!(err, ApimError::ConfigStructureError { .. }));
    }

    #[test]
    fn test_empty_policy_values_are_absent() {
        let product = Product {
            name: "p".to_string(),
            policy: Some(PolicyDocument {
                value: Some(String::new()),
            }),
            ..Default::default()
        };
        assert_eq!(product.policy_text(), None);
    }

    #[test]
    fn test_resolve_operational_mode() {
        use OperationalMode::{Dedicated, Shared};
        assert_eq!(OperationalMode::resolve(None, None), Dedicated);
        assert_eq!(OperationalMode::resolve(None, Some(Shared)), Shared);
        assert_eq!(OperationalMode::resolve(Some(Shared), Some(Dedicated)), Shared);
        assert_eq!(OperationalMode::resolve(Some(Dedicated), Some(Shared)), Shared);
        assert_eq!(OperationalMode::resolve(Some(Dedicated), None), Dedicated);
    }
}
