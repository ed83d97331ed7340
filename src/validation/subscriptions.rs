//! Semantic checks for subscription settings and the subscription-management
//! parameters document.

use crate::config::SubscriptionDocument;
use crate::config::SubscriptionSettings;
use crate::core::ApimError;
use crate::policy::is_balanced_xml;

use super::duplicates::find_duplicates;
use super::issue::{IssueType, ValidationIssue};

/// Whether a renewal period is a positive whole number of seconds.
///
/// The value must be all ASCII digits and not all zeros. There is no upper
/// bound, so long digit strings are accepted.
///
/// # Examples
///
/// ```
/// use apimlint_cli::validation::is_valid_renewal_period;
///
/// assert!(is_valid_renewal_period("3600"));
/// for bad in ["0", "-5", "abc", "", "1.5", " 60"] {
///     assert!(!is_valid_renewal_period(bad));
/// }
/// ```
#[must_use]
pub fn is_valid_renewal_period(period: &str) -> bool {
    !period.is_empty()
        && period.bytes().all(|b| b.is_ascii_digit())
        && period.bytes().any(|b| b != b'0')
}

/// Whether approval is demanded for a product that needs no subscription.
///
/// Only an explicit `subscriptionRequired: false` combined with an explicit
/// `approvalRequired: true` is contradictory; absent flags never are.
#[must_use]
pub const fn is_contradictory(settings: &SubscriptionSettings) -> bool {
    matches!(settings.subscription_required, Some(false))
        && matches!(settings.approval_required, Some(true))
}

/// Report contradictory subscription settings on a product.
#[must_use]
pub fn check_subscription_settings(
    product_name: &str,
    settings: &SubscriptionSettings,
) -> Option<ValidationIssue> {
    is_contradictory(settings).then(|| {
        ValidationIssue::error(
            IssueType::InvalidSubscriptionSettings,
            format!(
                "Product \"{product_name}\" has approvalRequired=true but subscriptionRequired=false, which is invalid"
            ),
        )
        .with_product_name(product_name)
    })
}

/// Check a subscription-management document.
///
/// Issues are reported in this order: duplicate subscription names, XML
/// subscription policies with unbalanced tags, duplicate quota names, then per
/// quota its renewal period and rate-limit renewal period, and finally usage
/// tracking. Only policies with `format: "xml"` are inspected.
///
/// # Errors
///
/// Returns [`ApimError::ProjectNameRequired`] when the `projectName`
/// parameter is missing or empty.
pub fn check_subscription_document(
    document: &SubscriptionDocument,
) -> Result<Vec<ValidationIssue>, ApimError> {
    if document.project_name().is_none() {
        return Err(ApimError::ProjectNameRequired {
            check: "subscription validation".to_string(),
        });
    }

    let mut issues = Vec::new();

    let subscriptions = document.subscriptions();
    for name in find_duplicates(subscriptions.iter().map(|s| s.name.as_str())) {
        issues.push(ValidationIssue::error(
            IssueType::DuplicateSubscriptionNames,
            format!("Duplicate subscription name found: {name}"),
        ));
    }

    for subscription in subscriptions {
        if let Some(policy) = &subscription.policy
            && policy.format == "xml"
            && !is_balanced_xml(&policy.value)
        {
            issues.push(ValidationIssue::error(
                IssueType::InvalidSubscriptionPolicy,
                format!("Invalid XML policy for subscription: {}", subscription.name),
            ));
        }
    }

    let quotas = document.quotas();
    for name in find_duplicates(quotas.iter().map(|q| q.name.as_str())) {
        issues.push(ValidationIssue::error(
            IssueType::DuplicateQuotaNames,
            format!("Duplicate quota name found: {name}"),
        ));
    }

    for quota in quotas {
        if !quota.renewal_period.as_deref().is_some_and(is_valid_renewal_period) {
            issues.push(ValidationIssue::error(
                IssueType::InvalidRenewalPeriod,
                format!("Invalid renewal period for quota: {}", quota.name),
            ));
        }
        if let Some(rate_limit) = &quota.rate_limit
            && !rate_limit.renewal_period.as_deref().is_some_and(is_valid_renewal_period)
        {
            issues.push(ValidationIssue::error(
                IssueType::InvalidRateLimitRenewalPeriod,
                format!("Invalid rate limit renewal period for quota: {}", quota.name),
            ));
        }
    }

    if let Some(tracking) = document.usage_tracking() {
        if !tracking.apis.is_empty() && tracking.application_insights_id().is_none() {
            issues.push(ValidationIssue::error(
                IssueType::MissingApplicationInsights,
                "Application Insights ID is required when APIs are configured for usage tracking",
            ));
        }
        for name in find_duplicates(tracking.apis.iter().map(|api| api.name.as_str())) {
            issues.push(
                ValidationIssue::error(
                    IssueType::DuplicateTrackedApiNames,
                    format!("Duplicate API name found in usage tracking: {name}"),
                )
                .with_api_name(name),
            );
        }
    }

    Ok(issues)
}
