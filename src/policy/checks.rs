//! Policy checks over an APIM configuration subtree.
//!
//! Three passes run over the same tree:
//!
//! 1. [`check_policy_syntax`] runs [`is_valid_policy_xml`] on every policy scope
//!    and fragment.
//! 2. [`check_policy_references`] reports placeholders and fragment includes that
//!    point at undeclared entities.
//! 3. [`check_policy_namespacing`] enforces the project prefix on named values
//!    and fragments of a shared instance.
//!
//! Each pass returns its issues in traversal order and never stops early.

use std::collections::HashSet;
use std::fmt;

use super::references::{extract_named_value_references, extract_policy_fragment_references};
use super::xml::is_valid_policy_xml;
use crate::config::ApiManagementConfig;
use crate::core::ApimError;
use crate::validation::{IssueType, ValidationIssue};

/// Where a policy text is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyScope<'a> {
    /// The instance-wide policy
    Global,
    /// A product policy
    Product(&'a str),
    /// An API-level policy
    Api(&'a str),
    /// An operation policy within an API
    Operation {
        /// Owning API name
        api: &'a str,
        /// Operation name
        operation: &'a str,
    },
}

impl fmt::Display for PolicyScope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "Global policy"),
            Self::Product(name) => write!(f, "Product policy \"{name}\""),
            Self::Api(name) => write!(f, "API policy \"{name}\""),
            Self::Operation {
                api,
                operation,
            } => write!(f, "Operation policy \"{operation}\" in API \"{api}\""),
        }
    }
}

/// A policy text together with the scope it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopedPolicy<'a> {
    /// Scope the text is attached to
    pub scope: PolicyScope<'a>,
    /// Raw policy text
    pub text: &'a str,
}

/// Declared named values and policy fragments of one configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyInventory {
    named_values: HashSet<String>,
    policy_fragments: HashSet<String>,
}

impl PolicyInventory {
    /// Build an inventory from explicit name lists.
    pub fn new<N, F>(named_values: N, policy_fragments: F) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            named_values: named_values.into_iter().map(Into::into).collect(),
            policy_fragments: policy_fragments.into_iter().map(Into::into).collect(),
        }
    }

    /// Collect the declarations of an APIM subtree.
    #[must_use]
    pub fn from_config(apim: &ApiManagementConfig) -> Self {
        Self::new(
            apim.named_values.iter().map(|nv| nv.name.as_str()),
            apim.policy_fragments.iter().map(|fragment| fragment.name.as_str()),
        )
    }

    /// Whether a named value is declared.
    #[must_use]
    pub fn has_named_value(&self, name: &str) -> bool {
        self.named_values.contains(name)
    }

    /// Whether a policy fragment is declared.
    #[must_use]
    pub fn has_policy_fragment(&self, name: &str) -> bool {
        self.policy_fragments.contains(name)
    }
}

/// Every non-empty policy text in cross-reference traversal order.
///
/// Order is global, then products, then APIs. Each API policy comes right
/// before its operations, and operations are only visited when the API itself
/// has a policy value.
#[must_use]
pub fn collect_policies(apim: &ApiManagementConfig) -> Vec<ScopedPolicy<'_>> {
    let mut policies = Vec::new();

    if let Some(text) = apim.global_policy_text() {
        policies.push(ScopedPolicy {
            scope: PolicyScope::Global,
            text,
        });
    }

    for product in &apim.products {
        if let Some(text) = product.policy_text() {
            policies.push(ScopedPolicy {
                scope: PolicyScope::Product(&product.name),
                text,
            });
        }
    }

    for api in &apim.apis {
        let Some(text) = api.policy_text() else {
            continue;
        };
        policies.push(ScopedPolicy {
            scope: PolicyScope::Api(&api.name),
            text,
        });

        let operations = api.policy.iter().flat_map(|policy| policy.operations.iter());
        for operation in operations {
            if let Some(text) = operation.value.as_deref().filter(|v| !v.is_empty()) {
                policies.push(ScopedPolicy {
                    scope: PolicyScope::Operation {
                        api: &api.name,
                        operation: &operation.name,
                    },
                    text,
                });
            }
        }
    }

    policies
}

/// Report every reference to an undeclared named value or fragment.
///
/// Within one policy, named-value issues come before fragment issues, each in
/// order of first appearance.
///
/// # Examples
///
/// ```
/// use apimlint_cli::policy::{PolicyInventory, PolicyScope, ScopedPolicy, validate_policy_references};
///
/// let inventory = PolicyInventory::default();
/// let policies = [ScopedPolicy {
///     scope: PolicyScope::Global,
///     text: "<policies>{{undeclaredKey}}</policies>",
/// }];
///
/// let issues = validate_policy_references(&inventory, &policies);
/// assert_eq!(issues.len(), 1);
/// assert_eq!(
///     issues[0].message,
///     "Global policy: References undefined named value \"undeclaredKey\""
/// );
/// ```
#[must_use]
pub fn validate_policy_references(
    inventory: &PolicyInventory,
    policies: &[ScopedPolicy<'_>],
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for policy in policies {
        let context = policy.scope.to_string();

        for reference in extract_named_value_references(policy.text) {
            if !inventory.has_named_value(&reference) {
                issues.push(
                    ValidationIssue::error(
                        IssueType::UndefinedNamedValue,
                        format!("{context}: References undefined named value \"{reference}\""),
                    )
                    .with_context(context.clone()),
                );
            }
        }

        for reference in extract_policy_fragment_references(policy.text) {
            if !inventory.has_policy_fragment(&reference) {
                issues.push(
                    ValidationIssue::error(
                        IssueType::UndefinedPolicyFragment,
                        format!("{context}: References undefined policy fragment \"{reference}\""),
                    )
                    .with_context(context.clone()),
                );
            }
        }
    }

    issues
}

/// Cross-reference check of a whole APIM subtree.
#[must_use]
pub fn check_policy_references(apim: &ApiManagementConfig) -> Vec<ValidationIssue> {
    let inventory = PolicyInventory::from_config(apim);
    validate_policy_references(&inventory, &collect_policies(apim))
}

/// Structural check of every policy text.
///
/// Global, product and API policies are checked when present. Operations are
/// checked whenever their API has a policy value, and fragments are always
/// checked, so a missing value there is reported as invalid.
#[must_use]
pub fn check_policy_syntax(apim: &ApiManagementConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let invalid = |text: Option<&str>| !text.is_some_and(is_valid_policy_xml);

    if let Some(text) = apim.global_policy_text()
        && !is_valid_policy_xml(text)
    {
        issues.push(
            ValidationIssue::error(IssueType::InvalidPolicyXml, "Invalid XML syntax in global policy")
                .with_context(PolicyScope::Global.to_string()),
        );
    }

    for (index, product) in apim.products.iter().enumerate() {
        if let Some(text) = product.policy_text()
            && !is_valid_policy_xml(text)
        {
            issues.push(
                ValidationIssue::error(
                    IssueType::InvalidPolicyXml,
                    format!(
                        "Invalid XML syntax in product policy for \"{}\" (index: {index})",
                        product.name
                    ),
                )
                .with_product_name(&product.name)
                .with_index(index.to_string()),
            );
        }
    }

    for (index, api) in apim.apis.iter().enumerate() {
        let Some(text) = api.policy_text() else {
            continue;
        };
        if !is_valid_policy_xml(text) {
            issues.push(
                ValidationIssue::error(
                    IssueType::InvalidPolicyXml,
                    format!("Invalid XML syntax in API policy for \"{}\" (index: {index})", api.name),
                )
                .with_api_name(&api.name)
                .with_index(index.to_string()),
            );
        }

        let operations = api.policy.iter().flat_map(|policy| policy.operations.iter());
        for (op_index, operation) in operations.enumerate() {
            if invalid(operation.value.as_deref()) {
                issues.push(
                    ValidationIssue::error(
                        IssueType::InvalidPolicyXml,
                        format!(
                            "Invalid XML syntax in operation policy \"{}\" for API \"{}\" (index: {index}.{op_index})",
                            operation.name, api.name
                        ),
                    )
                    .with_api_name(&api.name)
                    .with_index(format!("{index}.{op_index}")),
                );
            }
        }
    }

    for (index, fragment) in apim.policy_fragments.iter().enumerate() {
        if invalid(fragment.value.as_deref()) {
            issues.push(
                ValidationIssue::error(
                    IssueType::InvalidPolicyXml,
                    format!(
                        "Invalid XML syntax in policy fragment \"{}\" (index: {index})",
                        fragment.name
                    ),
                )
                .with_index(index.to_string()),
            );
        }
    }

    issues
}

/// Project-prefix check for named values and policy fragments.
///
/// Only meaningful for shared instances; callers decide whether to run it.
///
/// # Errors
///
/// Returns [`ApimError::ProjectNameRequired`] when `project_name` is missing
/// or empty, since no prefix can be derived.
pub fn check_policy_namespacing(
    apim: &ApiManagementConfig,
    project_name: Option<&str>,
) -> Result<Vec<ValidationIssue>, ApimError> {
    let project_name =
        project_name.filter(|name| !name.is_empty()).ok_or_else(|| ApimError::ProjectNameRequired {
            check: "policy namespacing in shared mode".to_string(),
        })?;
    let prefix = format!("{project_name}-");

    let mut issues = Vec::new();

    for named_value in &apim.named_values {
        if !named_value.name.starts_with(&prefix) {
            issues.push(ValidationIssue::error(
                IssueType::InvalidNamedValueNamespace,
                format!(
                    "Named value \"{}\" is not properly namespaced with project prefix \"{prefix}\"",
                    named_value.name
                ),
            ));
        }
    }

    for fragment in &apim.policy_fragments {
        if !fragment.name.starts_with(&prefix) {
            issues.push(ValidationIssue::error(
                IssueType::InvalidPolicyFragmentNamespace,
                format!(
                    "Policy fragment \"{}\" is not properly namespaced with project prefix \"{prefix}\"",
                    fragment.name
                ),
            ));
        }
    }

    Ok(issues)
}
