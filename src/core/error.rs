//! Error handling for apimlint
//!
//! apimlint distinguishes two tiers of failure:
//! 1. **Fatal preconditions** ([`ApimError`]) such as a missing configuration file,
//!    an unparseable document, a schema violation, or a missing project name in
//!    shared mode. These abort the run before any report is produced.
//! 2. **Validation issues** ([`crate::validation::ValidationIssue`]) which are
//!    collected by the checkers and never raised as errors.
//!
//! Only the first tier lives in this module. [`user_friendly_error`] turns any
//! `anyhow::Error` into an [`ErrorContext`] carrying a suggestion for the user.
//!
//! # Examples
//!
//! ```rust,no_run
//! use apimlint_cli::core::{ApimError, ErrorContext};
//!
//! let context = ErrorContext::new(ApimError::ProjectNameRequired {
//!     check: "policy namespacing".to_string(),
//! })
//! .with_suggestion("Set metadata.projectName in your configuration");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Fatal errors that abort a validation run.
///
/// Every variant here corresponds to a precondition that must hold before the
/// checkers can run at all. Rule violations found by the checkers are reported
/// as issues instead.
#[derive(Error, Debug)]
pub enum ApimError {
    /// The configuration file does not exist
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was looked up
        path: String,
    },

    /// The configuration file could not be parsed as JSON or YAML
    #[error("Error parsing configuration file {file}: {reason}")]
    ConfigParseError {
        /// File that failed to parse
        file: String,
        /// Parser message
        reason: String,
    },

    /// The configuration parsed but does not match the expected shape
    #[error("Invalid configuration structure: {reason}")]
    ConfigStructureError {
        /// Deserializer message
        reason: String,
    },

    /// The schema file does not exist
    #[error("Schema file not found: {path}")]
    SchemaNotFound {
        /// Path that was looked up
        path: String,
    },

    /// The schema could not be read, parsed, or compiled
    #[error("Failed to load schema {schema}: {reason}")]
    SchemaLoadError {
        /// Schema path or identifier
        schema: String,
        /// Reason the schema was rejected
        reason: String,
    },

    /// The document does not conform to its schema
    #[error("Schema validation failed with {count} error(s):\n{violations}")]
    SchemaValidationFailed {
        /// Number of violations
        count: usize,
        /// Formatted violation list, one per line
        violations: String,
    },

    /// A check that needs the project name ran without one
    #[error("Project name is required for {check}")]
    ProjectNameRequired {
        /// Which check required it
        check: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// A user-facing rendering of an error with optional details and suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The primary error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from an [`ApimError`].
    #[must_use]
    pub fn new(error: ApimError) -> Self {
        Self::from_message(error.to_string())
    }

    /// Create an error context from a plain message.
    #[must_use]
    pub const fn from_message(message: String) -> Self {
        Self {
            message,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with a suggestion where one is known.
///
/// The whole `anyhow` context chain is kept in the message so that
/// `with_context` annotations added by the CLI layer stay visible.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let message = chain_message(&error);

    if let Some(apim_error) = error.downcast_ref::<ApimError>() {
        let context = ErrorContext::from_message(message);
        return match apim_error {
            ApimError::ConfigNotFound { .. } => context
                .with_suggestion("Check the --config path or run from the repository root"),
            ApimError::ConfigParseError { .. } => context.with_suggestion(
                "Check the JSON/YAML syntax of the configuration file (quotes, commas, indentation)",
            ),
            ApimError::ConfigStructureError { .. } => context
                .with_suggestion("Run `apimlint config <FILE>` to check the file against its schema"),
            ApimError::SchemaNotFound { .. } => {
                context.with_suggestion("Pass the schema location explicitly with --schema")
            }
            ApimError::SchemaValidationFailed { .. } => context
                .with_details("The configuration must conform to its JSON Schema before semantic checks run"),
            ApimError::ProjectNameRequired { .. } => context
                .with_suggestion("Set metadata.projectName in the configuration file")
                .with_details("Shared APIM instances namespace every resource by project name"),
            _ => context,
        };
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::PermissionDenied {
            return ErrorContext::from_message(message)
                .with_suggestion("Check file ownership and permissions");
        }
    }

    ErrorContext::from_message(message)
}

fn chain_message(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    for cause in error.chain().skip(1) {
        let cause = cause.to_string();
        if !message.contains(&cause) {
            message.push_str(": ");
            message.push_str(&cause);
        }
    }
    message
}
