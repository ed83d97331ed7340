//! Product naming and consistency checks.

use tracing::debug;

use crate::config::{ApiManagementConfig, OperationalMode};
use crate::constants::STANDARD_PRODUCT_TYPES;
use crate::core::ApimError;

use super::duplicates::find_duplicates;
use super::issue::{IssueType, ValidationIssue};
use super::subscriptions::check_subscription_settings;

/// The product type encoded in a shared-mode product name.
///
/// This is the name with its first `len(project_name) + 1` characters removed.
/// The prefix itself is not inspected, and everything after it is the type, so
/// `proj-internal-v2` has type `internal-v2`. Names no longer than the prefix
/// have an empty type.
///
/// # Examples
///
/// ```
/// use apimlint_cli::validation::product_type;
///
/// assert_eq!(product_type("proj-internal", "proj"), "internal");
/// assert_eq!(product_type("proj-internal-v2", "proj"), "internal-v2");
/// assert_eq!(product_type("other-internal", "proj"), "nternal");
/// ```
#[must_use]
pub fn product_type(product_name: &str, project_name: &str) -> String {
    product_name.chars().skip(project_name.chars().count() + 1).collect()
}

/// Shared-mode naming rules for a single product name.
///
/// A name without the `{project_name}-` prefix is an error. The product type
/// is checked against [`STANDARD_PRODUCT_TYPES`] independently, and a type
/// outside that set is only a warning.
#[must_use]
pub fn check_product_naming(product_name: &str, project_name: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !product_name.starts_with(&format!("{project_name}-")) {
        issues.push(
            ValidationIssue::error(
                IssueType::InvalidNamingConvention,
                format!(
                    "Product name \"{product_name}\" does not follow the naming convention \"{{projectName}}-{{productType}}\" in shared mode"
                ),
            )
            .with_product_name(product_name),
        );
    }

    let product_type = product_type(product_name, project_name);
    if !STANDARD_PRODUCT_TYPES.contains(&product_type.as_str()) {
        issues.push(
            ValidationIssue::warning(
                IssueType::NonStandardProductType,
                format!(
                    "Product type \"{product_type}\" is not one of the standard types: {}",
                    STANDARD_PRODUCT_TYPES.join(", ")
                ),
            )
            .with_product_name(product_name)
            .with_product_type(product_type),
        );
    }

    issues
}

/// Check every product of an APIM subtree.
///
/// Nothing is reported when no products are declared. Otherwise the checks
/// run in order: duplicate names, then per product (missing name, shared-mode
/// naming, display name, description, subscription settings), then API
/// `productName` references to undeclared products.
///
/// # Errors
///
/// Returns [`ApimError::ProjectNameRequired`] in shared mode when
/// `project_name` is missing or empty.
pub fn check_products(
    apim: &ApiManagementConfig,
    project_name: Option<&str>,
    mode: OperationalMode,
) -> Result<Vec<ValidationIssue>, ApimError> {
    let project_name = project_name.filter(|name| !name.is_empty());
    let shared_project = match mode {
        OperationalMode::Shared => Some(project_name.ok_or_else(|| ApimError::ProjectNameRequired {
            check: "product naming in shared mode".to_string(),
        })?),
        OperationalMode::Dedicated => None,
    };

    if apim.products.is_empty() {
        debug!("No products defined, skipping product checks");
        return Ok(Vec::new());
    }

    let mut issues = Vec::new();
    let product_names: Vec<&str> = apim.products.iter().map(|p| p.name.as_str()).collect();

    let duplicates = find_duplicates(product_names.iter().copied());
    if !duplicates.is_empty() {
        issues.push(ValidationIssue::error(
            IssueType::DuplicateProductNames,
            format!("Duplicate product names found: {}", duplicates.join(", ")),
        ));
    }

    for product in &apim.products {
        if product.name.is_empty() {
            issues.push(ValidationIssue::error(
                IssueType::MissingRequiredProperty,
                "Product is missing required \"name\" property",
            ));
            continue;
        }

        if let Some(project) = shared_project {
            issues.extend(check_product_naming(&product.name, project));
        }

        if product.display_name.as_deref().is_none_or(str::is_empty) {
            issues.push(
                ValidationIssue::warning(
                    IssueType::MissingDisplayName,
                    format!("Product \"{}\" is missing a display name", product.name),
                )
                .with_product_name(&product.name),
            );
        }

        if product.description.as_deref().is_none_or(str::is_empty) {
            issues.push(
                ValidationIssue::warning(
                    IssueType::MissingDescription,
                    format!("Product \"{}\" is missing a description", product.name),
                )
                .with_product_name(&product.name),
            );
        }

        if let Some(settings) = &product.subscription_settings
            && let Some(issue) = check_subscription_settings(&product.name, settings)
        {
            issues.push(issue);
        }
    }

    let missing: Vec<String> = apim
        .apis
        .iter()
        .filter_map(|api| api.product_name.as_deref())
        .filter(|name| !name.is_empty() && !product_names.contains(name))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        issues.push(
            ValidationIssue::error(
                IssueType::MissingReferencedProducts,
                format!("APIs reference products that don't exist: {}", missing.join(", ")),
            )
            .with_missing_products(missing),
        );
    }

    Ok(issues)
}
