//! API path conflict checks for shared APIM instances.

use tracing::debug;

use crate::config::{Api, ApiManagementConfig};
use crate::core::ApimError;

use super::duplicates::find_duplicates;
use super::issue::{IssueType, ValidationIssue};

/// Path rules for a single API.
///
/// - no path: `missing_path` error, nothing else is checked
/// - leading `/`: `invalid_path_format` error
/// - a path containing `/` whose first segment is not the project name:
///   `path_namespace_warning`
///
/// A leading slash makes the first segment empty, so such a path gets the
/// warning as well as the error.
#[must_use]
pub fn check_api_path(api: &Api, project_name: &str) -> Vec<ValidationIssue> {
    let Some(path) = api.path.as_deref().filter(|p| !p.is_empty()) else {
        return vec![
            ValidationIssue::error(IssueType::MissingPath, format!("API '{}' is missing a path", api.name))
                .with_api_name(&api.name),
        ];
    };

    let mut issues = Vec::new();

    if path.starts_with('/') {
        issues.push(
            ValidationIssue::error(
                IssueType::InvalidPathFormat,
                format!("API '{}' has a path that starts with a slash: {path}", api.name),
            )
            .with_api_name(&api.name)
            .with_path(path),
        );
    }

    if let Some((first_segment, _)) = path.split_once('/')
        && first_segment != project_name
    {
        issues.push(
            ValidationIssue::warning(
                IssueType::PathNamespaceWarning,
                format!("API '{}' path does not start with project name: {path}", api.name),
            )
            .with_api_name(&api.name)
            .with_path(path),
        );
    }

    issues
}

/// Check the API list of a shared APIM subtree.
///
/// Nothing is reported when no APIs are declared. Otherwise duplicate names
/// come first as a single issue, followed by the per-API path issues.
///
/// # Errors
///
/// Returns [`ApimError::ProjectNameRequired`] when `project_name` is missing
/// or empty.
pub fn check_api_paths(
    apim: &ApiManagementConfig,
    project_name: Option<&str>,
) -> Result<Vec<ValidationIssue>, ApimError> {
    let project_name =
        project_name.filter(|name| !name.is_empty()).ok_or_else(|| ApimError::ProjectNameRequired {
            check: "API path validation in shared mode".to_string(),
        })?;

    if apim.apis.is_empty() {
        debug!("No APIs defined, skipping API path checks");
        return Ok(Vec::new());
    }

    let mut issues = Vec::new();

    let duplicates = find_duplicates(apim.apis.iter().map(|api| api.name.as_str()));
    if !duplicates.is_empty() {
        issues.push(ValidationIssue::error(
            IssueType::DuplicateApiNames,
            format!("Duplicate API names found within the project: {}", duplicates.join(", ")),
        ));
    }

    for api in &apim.apis {
        issues.extend(check_api_path(api, project_name));
    }

    Ok(issues)
}
