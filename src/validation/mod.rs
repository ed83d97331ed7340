//! Validation issues, results, and the semantic checkers.
//!
//! Checkers never fail on a rule violation. They return
//! [`ValidationIssue`]s, and callers gather them into a [`ValidationResult`]
//! whose `validation_passed` flag only turns false for error-severity issues.
//! A checker only returns [`crate::core::ApimError`] when a precondition such
//! as the project name is missing.
//!
//! # Modules
//!
//! - [`issue`] - severity, issue taxonomy and [`ValidationIssue`]
//! - [`results`] - [`ValidationResult`]
//! - [`duplicates`] - the [`find_duplicates`] primitive
//! - [`products`] - product naming, metadata and reference checks
//! - [`api_paths`] - API path conflict checks for shared instances
//! - [`subscriptions`] - subscription settings and subscription document checks
//! - [`pipeline`] - the combined check sequence

pub mod api_paths;
pub mod duplicates;
pub mod issue;
pub mod pipeline;
pub mod products;
pub mod results;
pub mod subscriptions;

pub use api_paths::{check_api_path, check_api_paths};
pub use duplicates::find_duplicates;
pub use issue::{IssueType, Severity, ValidationIssue};
pub use pipeline::{PipelineOutcome, SkipReason, resolve_mode, validate_configuration};
pub use products::{check_product_naming, check_products, product_type};
pub use results::ValidationResult;
pub use subscriptions::{
    check_subscription_document, check_subscription_settings, is_contradictory,
    is_valid_renewal_period,
};
