//! Aggregated outcome of a validation pass.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::issue::{Severity, ValidationIssue};
use crate::config::OperationalMode;

/// The report written at the end of a validation run.
///
/// `validation_passed` is kept in step with `issues`: it turns false as soon
/// as an error-severity issue is pushed and never turns back. Warnings leave
/// it untouched.
///
/// # JSON Output Example
///
/// ```json
/// {
///   "projectName": "orders",
///   "timestamp": "2024-05-01T12:00:00.000Z",
///   "mode": "shared",
///   "validationPassed": false,
///   "issues": [
///     { "type": "invalid_path_format", "message": "...", "severity": "error", "apiName": "orders-api", "path": "/orders" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Project the configuration belongs to
    pub project_name: String,
    /// RFC 3339 timestamp with millisecond precision
    pub timestamp: String,
    /// Operational mode the checks ran in, absent for subscription documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<OperationalMode>,
    /// False iff any error-severity issue was found
    pub validation_passed: bool,
    /// Issues in detection order
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Start an empty, passing result stamped with the current time.
    pub fn new(project_name: impl Into<String>, mode: impl Into<Option<OperationalMode>>) -> Self {
        Self {
            project_name: project_name.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            mode: mode.into(),
            validation_passed: true,
            issues: Vec::new(),
        }
    }

    /// Append an issue, failing the result if it is an error.
    pub fn push(&mut self, issue: ValidationIssue) {
        if issue.is_error() {
            self.validation_passed = false;
        }
        self.issues.push(issue);
    }

    /// Append every issue in order.
    pub fn extend(&mut self, issues: impl IntoIterator<Item = ValidationIssue>) {
        for issue in issues {
            self.push(issue);
        }
    }

    /// Whether any error-severity issue was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.validation_passed
    }

    /// Error-severity issues in detection order.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    /// Warning-severity issues in detection order.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::IssueType;

    #[test]
    fn test_new_result_passes() {
        let result = ValidationResult::new("orders", OperationalMode::Shared);
        assert!(result.validation_passed);
        assert!(result.issues.is_empty());
        assert!(result.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_warning_does_not_fail() {
        let mut result = ValidationResult::new("orders", OperationalMode::Shared);
        result.push(ValidationIssue::warning(IssueType::MissingDescription, "no description"));
        assert!(result.validation_passed);
        assert_eq!(result.warnings().count(), 1);
        assert_eq!(result.errors().count(), 0);
    }

    #[test]
    fn test_error_fails_and_stays_failed() {
        let mut result = ValidationResult::new("orders", OperationalMode::Dedicated);
        result.extend([
            ValidationIssue::error(IssueType::MissingPath, "missing"),
            ValidationIssue::warning(IssueType::MissingDescription, "no description"),
        ]);
        assert!(!result.validation_passed);
        assert!(result.has_errors());
        assert_eq!(result.issues.len(), 2);
        assert_eq!(result.issues[0].issue_type, IssueType::MissingPath);
    }

    #[test]
    fn test_serializes_camel_case() {
        let result = ValidationResult::new("orders", OperationalMode::Shared);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["projectName"], "orders");
        assert_eq!(value["mode"], "shared");
        assert_eq!(value["validationPassed"], true);
        assert!(value["issues"].as_array().unwrap().is_empty());

        let without_mode = ValidationResult::new("orders", None::<OperationalMode>);
        let value = serde_json::to_value(&without_mode).unwrap();
        assert!(value.get("mode").is_none());
    }
}
