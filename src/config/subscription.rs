//! Subscription-management parameters document.
//!
//! Subscriptions, quotas and usage tracking are deployed from an ARM
//! parameters file, so every top-level setting is wrapped in `{ "value": ... }`:
//!
//! ```json
//! {
//!   "parameters": {
//!     "projectName": { "value": "orders" },
//!     "subscriptions": { "value": [{ "name": "orders-partner-a", "productName": "orders-partner" }] },
//!     "quotas": { "value": [{ "name": "standard", "calls": 1000, "renewalPeriod": "3600" }] },
//!     "usageTracking": { "value": { "applicationInsightsId": "...", "apis": [{ "name": "orders-api" }] } }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::ApimError;

/// Root of the subscription-management document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDocument {
    /// ARM template parameters
    #[serde(default)]
    pub parameters: SubscriptionParameters,
}

impl SubscriptionDocument {
    /// Convert an already-parsed document into the typed model.
    ///
    /// # Errors
    ///
    /// Returns [`ApimError::ConfigStructureError`] when a field has the wrong type.
    pub fn from_value(value: Value) -> Result<Self, ApimError> {
        serde_json::from_value(value).map_err(|e| ApimError::ConfigStructureError {
            reason: e.to_string(),
        })
    }

    /// The project name, if present and non-empty.
    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        self.parameters
            .project_name
            .as_ref()
            .and_then(|p| p.value.as_deref())
            .filter(|name| !name.is_empty())
    }

    /// Declared subscriptions, empty when the parameter is absent.
    #[must_use]
    pub fn subscriptions(&self) -> &[Subscription] {
        self.parameters.subscriptions.as_ref().map_or(&[], |p| p.value.as_slice())
    }

    /// Declared quotas, empty when the parameter is absent.
    #[must_use]
    pub fn quotas(&self) -> &[Quota] {
        self.parameters.quotas.as_ref().map_or(&[], |p| p.value.as_slice())
    }

    /// Usage tracking settings, if declared.
    #[must_use]
    pub fn usage_tracking(&self) -> Option<&UsageTracking> {
        self.parameters.usage_tracking.as_ref().map(|p| &p.value)
    }
}

/// An ARM parameter wrapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter<T> {
    /// Parameter value
    #[serde(default)]
    pub value: T,
}

/// The parameters block of the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionParameters {
    /// Project namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<Parameter<Option<String>>>,
    /// Target environment (`dev`, `test`, `staging`, `prod`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Parameter<Option<String>>>,
    /// Subscriptions to create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriptions: Option<Parameter<Vec<Subscription>>>,
    /// Quota and rate-limit definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotas: Option<Parameter<Vec<Quota>>>,
    /// Application Insights usage tracking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_tracking: Option<Parameter<UsageTracking>>,
    /// Approval workflow settings, passed through unchecked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_workflow: Option<Parameter<Value>>,
    /// Subscription lifecycle settings, passed through unchecked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_config: Option<Parameter<Value>>,
    /// Notification settings, passed through unchecked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_config: Option<Parameter<Value>>,
}

/// A product subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Unique subscription name
    #[serde(default)]
    pub name: String,
    /// Portal display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Product the subscription grants access to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Initial state (`active`, `suspended`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Whether request tracing is allowed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_tracing: Option<bool>,
    /// Subscription-scoped policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<SubscriptionPolicy>,
}

/// Subscription-scoped policy with an explicit format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPolicy {
    /// `xml` (checked for balanced tags) or `rawxml` (passed through)
    #[serde(default)]
    pub format: String,
    /// Policy text
    #[serde(default)]
    pub value: String,
}

/// A call quota with optional rate limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quota {
    /// Unique quota name
    #[serde(default)]
    pub name: String,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Allowed calls per renewal period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calls: Option<u64>,
    /// Renewal period in seconds, as a digit string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewal_period: Option<String>,
    /// Short-window rate limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimit>,
    /// Burst protection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spike_arrest: Option<RateLimit>,
    /// Quota keyed by a request header, passed through unchecked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_by_key: Option<Value>,
}

/// Calls allowed per renewal period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    /// Allowed calls per renewal period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calls: Option<u64>,
    /// Renewal period in seconds, as a digit string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewal_period: Option<String>,
}

/// Application Insights usage tracking settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageTracking {
    /// Application Insights resource id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_insights_id: Option<String>,
    /// Instrumentation key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_insights_key: Option<String>,
    /// APIs whose traffic is logged
    #[serde(default)]
    pub apis: Vec<TrackedApi>,
}

impl UsageTracking {
    /// Application Insights id, if present and non-empty.
    #[must_use]
    pub fn application_insights_id(&self) -> Option<&str> {
        self.application_insights_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Logging settings for one API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedApi {
    /// API name
    #[serde(default)]
    pub name: String,
    /// Sampling percentage (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_percentage: Option<u8>,
    /// `error`, `information` or `verbose`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<String>,
}
