//! Validate product definitions.
//!
//! In shared mode product names must follow `{projectName}-{productType}`.
//! In every mode products should carry a display name and description, their
//! subscription settings must be consistent, and APIs may only reference
//! declared products. A report is always written.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use super::common::{
    OutputArgs, load_configuration, resolve_path, validate_against_schema, write_report,
};
use crate::config::OperationalMode;
use crate::constants::{DEFAULT_CONFIG_PATH, DEFAULT_PRODUCT_REPORT_PATH};
use crate::validation::{SkipReason, ValidationResult, check_products, resolve_mode};

/// Validate product naming conventions and requirements.
#[derive(Args, Debug)]
pub struct ProductsCommand {
    /// Configuration file (JSON or YAML)
    #[arg(short, long, env = "APIMLINT_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Optional schema to validate the configuration against first
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Operational mode; shared rules apply unless this is dedicated and the
    /// config does not say shared
    #[arg(short, long, value_enum, default_value = "shared")]
    pub mode: OperationalMode,

    /// Report location
    #[arg(short, long, default_value = DEFAULT_PRODUCT_REPORT_PATH)]
    pub output: PathBuf,

    #[command(flatten)]
    pub output_args: OutputArgs,
}

impl ProductsCommand {
    /// Execute the products command.
    ///
    /// # Errors
    ///
    /// Fails on a fatal precondition or when any product check reports an error.
    pub async fn execute(self, quiet: bool) -> Result<()> {
        let out = self.output_args.options(quiet);
        let config_path = resolve_path(&self.config);
        info!("Validating product configurations in {}", config_path.display());

        let (document, config) = load_configuration(&config_path).await?;
        if let Some(schema) = &self.schema {
            validate_against_schema(&document, &resolve_path(schema)).await?;
        }

        if !config.feature_toggles.enable_api_management {
            out.note(format!("{}. No validation needed.", SkipReason::ApiManagementDisabled.message()));
            return Ok(());
        }
        let Some(apim) = config.api_management() else {
            out.note(format!("{}. No validation needed.", SkipReason::NoApiManagementConfig.message()));
            return Ok(());
        };

        let mode = resolve_mode(&config, Some(self.mode));
        let issues = check_products(apim, config.project_name(), mode)?;
        if apim.products.is_empty() {
            out.note("No products defined in configuration. Nothing to validate.");
            return Ok(());
        }

        let mut result = ValidationResult::new(config.project_name().unwrap_or_default(), mode);
        result.extend(issues);

        write_report(&result, &resolve_path(&self.output)).await?;
        out.finish(&result, "Product configurations")
    }
}
