//! Validation issues and their taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious an issue is.
///
/// Only [`Severity::Error`] fails a validation run; warnings are informational
/// unless the CLI runs in strict mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, does not block deployment
    Warning,
    /// Blocks deployment
    Error,
}

impl Severity {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Taxonomy key identifying which rule produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    // API paths
    /// Two APIs share a name
    DuplicateApiNames,
    /// An API has no path
    MissingPath,
    /// An API path starts with `/`
    InvalidPathFormat,
    /// An API path is not under the project segment
    PathNamespaceWarning,

    // Products
    /// Two products share a name
    DuplicateProductNames,
    /// A product has no name
    MissingRequiredProperty,
    /// A product name lacks the `{projectName}-` prefix
    InvalidNamingConvention,
    /// A product type is outside the standard set
    NonStandardProductType,
    /// A product has no display name
    MissingDisplayName,
    /// A product has no description
    MissingDescription,
    /// Approval is required for a product that needs no subscription
    InvalidSubscriptionSettings,
    /// APIs reference products that are not declared
    MissingReferencedProducts,

    // Policies
    /// A policy fails the structural tag check
    InvalidPolicyXml,
    /// A policy references an undeclared named value
    UndefinedNamedValue,
    /// A policy includes an undeclared fragment
    UndefinedPolicyFragment,
    /// A named value lacks the project prefix
    InvalidNamedValueNamespace,
    /// A policy fragment lacks the project prefix
    InvalidPolicyFragmentNamespace,

    // Subscription management
    /// Two subscriptions share a name
    DuplicateSubscriptionNames,
    /// A subscription's XML policy has unbalanced tags
    InvalidSubscriptionPolicy,
    /// Two quotas share a name
    DuplicateQuotaNames,
    /// A quota renewal period is not a positive number of seconds
    InvalidRenewalPeriod,
    /// A rate-limit renewal period is not a positive number of seconds
    InvalidRateLimitRenewalPeriod,
    /// Usage tracking lists APIs without an Application Insights id
    MissingApplicationInsights,
    /// Usage tracking lists an API twice
    DuplicateTrackedApiNames,
}

impl IssueType {
    /// The snake_case key used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateApiNames => "duplicate_api_names",
            Self::MissingPath => "missing_path",
            Self::InvalidPathFormat => "invalid_path_format",
            Self::PathNamespaceWarning => "path_namespace_warning",
            Self::DuplicateProductNames => "duplicate_product_names",
            Self::MissingRequiredProperty => "missing_required_property",
            Self::InvalidNamingConvention => "invalid_naming_convention",
            Self::NonStandardProductType => "non_standard_product_type",
            Self::MissingDisplayName => "missing_display_name",
            Self::MissingDescription => "missing_description",
            Self::InvalidSubscriptionSettings => "invalid_subscription_settings",
            Self::MissingReferencedProducts => "missing_referenced_products",
            Self::InvalidPolicyXml => "invalid_policy_xml",
            Self::UndefinedNamedValue => "undefined_named_value",
            Self::UndefinedPolicyFragment => "undefined_policy_fragment",
            Self::InvalidNamedValueNamespace => "invalid_named_value_namespace",
            Self::InvalidPolicyFragmentNamespace => "invalid_policy_fragment_namespace",
            Self::DuplicateSubscriptionNames => "duplicate_subscription_names",
            Self::InvalidSubscriptionPolicy => "invalid_subscription_policy",
            Self::DuplicateQuotaNames => "duplicate_quota_names",
            Self::InvalidRenewalPeriod => "invalid_renewal_period",
            Self::InvalidRateLimitRenewalPeriod => "invalid_rate_limit_renewal_period",
            Self::MissingApplicationInsights => "missing_application_insights",
            Self::DuplicateTrackedApiNames => "duplicate_tracked_api_names",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule violation found by a checker.
///
/// Context fields are optional and omitted from JSON when unset, so each
/// issue only carries the entity coordinates that make sense for its rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Taxonomy key
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Human-readable description
    pub message: String,
    /// Error or warning
    pub severity: Severity,
    /// API the issue concerns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_name: Option<String>,
    /// API path the issue concerns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Product the issue concerns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Product type derived from the product name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    /// Product names referenced but not declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_products: Option<Vec<String>>,
    /// Policy scope label (`Global policy`, `API policy "x"`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Position of the entity in its list (`3` or `3.1` for operations)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
}

impl ValidationIssue {
    /// Create an issue with no context fields.
    pub fn new(issue_type: IssueType, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            issue_type,
            message: message.into(),
            severity,
            api_name: None,
            path: None,
            product_name: None,
            product_type: None,
            missing_products: None,
            context: None,
            index: None,
        }
    }

    /// Create an error-severity issue.
    pub fn error(issue_type: IssueType, message: impl Into<String>) -> Self {
        Self::new(issue_type, Severity::Error, message)
    }

    /// Create a warning-severity issue.
    pub fn warning(issue_type: IssueType, message: impl Into<String>) -> Self {
        Self::new(issue_type, Severity::Warning, message)
    }

    /// Attach the API name.
    #[must_use]
    pub fn with_api_name(mut self, name: impl Into<String>) -> Self {
        self.api_name = Some(name.into());
        self
    }

    /// Attach the API path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach the product name.
    #[must_use]
    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    /// Attach the derived product type.
    #[must_use]
    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    /// Attach the list of undeclared products.
    #[must_use]
    pub fn with_missing_products(mut self, missing: Vec<String>) -> Self {
        self.missing_products = Some(missing);
        self
    }

    /// Attach the policy scope label.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attach the list position.
    #[must_use]
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Whether this issue fails validation.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity.as_str().to_uppercase(), self.message)
    }
}
