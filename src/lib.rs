//! apimlint - API Management configuration linter
//!
//! Pre-deployment validation for API Management (APIM) infrastructure-as-code.
//! A bicep configuration file (JSON or YAML) describes an APIM instance with
//! its APIs, products, policies, named values and policy fragments. apimlint
//! checks that configuration for structural and semantic problems before it
//! reaches a deployment pipeline.
//!
//! # Architecture Overview
//!
//! Checks are pure functions over typed configuration. Each returns a list of
//! [`validation::ValidationIssue`]s which are collected into a
//! [`validation::ValidationResult`]. Missing preconditions, such as a shared
//! instance without a `metadata.projectName`, are fatal and surface as
//! [`core::ApimError`] instead.
//!
//! An APIM instance runs in one of two operational modes:
//! - **dedicated**: one project owns the instance
//! - **shared**: several projects deploy into one instance, so product names,
//!   API paths and policy fragments must carry the project prefix
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and report output
//! - [`config`] - Typed configuration model and JSON/YAML loading
//! - [`constants`] - Section names, product types and default paths
//! - [`core`] - Fatal errors and user-facing error presentation
//! - [`policy`] - Policy XML heuristics, reference extraction and policy checks
//! - [`schema`] - JSON Schema validation and YAML schema conversion
//! - [`validation`] - Product, API path and subscription checks plus the pipeline
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Run everything against the default configuration
//! apimlint check
//!
//! # Validate a YAML configuration against the schema next to it
//! apimlint config environments/dev/bicep.config.yaml
//!
//! # Shared-mode product checks, failing on warnings
//! apimlint products --mode shared --strict
//!
//! # Machine-readable output
//! apimlint api-paths --format json
//! ```
//!
//! # Library Usage
//!
//! ```rust
//! use apimlint_cli::config::{Configuration, OperationalMode};
//! use apimlint_cli::validation::{PipelineOutcome, validate_configuration};
//! use serde_json::json;
//!
//! let config = Configuration::from_value(json!({
//!     "metadata": { "projectName": "orders" },
//!     "featureToggles": { "enableApiManagement": true },
//!     "moduleConfigurations": {
//!         "apiManagement": {
//!             "products": [
//!                 { "name": "orders-public", "displayName": "Orders", "description": "Public orders" }
//!             ]
//!         }
//!     }
//! }))?;
//!
//! match validate_configuration(&config, Some(OperationalMode::Shared))? {
//!     PipelineOutcome::Checked(result) => assert!(!result.has_errors()),
//!     PipelineOutcome::Skipped(reason) => println!("{}", reason.message()),
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod policy;
pub mod schema;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
