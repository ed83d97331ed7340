//! Validate APIM policy configurations.
//!
//! Checks the configuration against its schema, then runs the policy syntax
//! and cross-reference passes. Shared instances additionally get the
//! namespacing pass over named values and fragments.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use super::common::{
    OutputArgs, load_configuration, resolve_path, validate_against_schema, write_report,
};
use crate::config::OperationalMode;
use crate::constants::{DEFAULT_POLICY_CONFIG_PATH, DEFAULT_POLICY_SCHEMA_PATH};
use crate::policy::{check_policy_namespacing, check_policy_references, check_policy_syntax};
use crate::validation::{SkipReason, ValidationResult, resolve_mode};

/// Validate policy XML, references and namespacing.
#[derive(Args, Debug)]
pub struct PoliciesCommand {
    /// Configuration file (JSON or YAML)
    #[arg(short, long, default_value = DEFAULT_POLICY_CONFIG_PATH)]
    pub config: PathBuf,

    /// Schema file
    #[arg(short, long, default_value = DEFAULT_POLICY_SCHEMA_PATH)]
    pub schema: PathBuf,

    /// Operational mode override
    #[arg(short, long, value_enum)]
    pub mode: Option<OperationalMode>,

    /// Write the JSON report to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub output_args: OutputArgs,
}

impl PoliciesCommand {
    /// Execute the policies command.
    ///
    /// # Errors
    ///
    /// Fails on a fatal precondition or when any policy check reports an error.
    pub async fn execute(self, quiet: bool) -> Result<()> {
        let out = self.output_args.options(quiet);
        let config_path = resolve_path(&self.config);
        info!("Validating policy configuration in {}", config_path.display());

        let (document, config) = load_configuration(&config_path).await?;
        validate_against_schema(&document, &resolve_path(&self.schema)).await?;

        if !config.feature_toggles.enable_api_management {
            out.note(format!(
                "{}. Skipping policy validation.",
                SkipReason::ApiManagementDisabled.message()
            ));
            return Ok(());
        }
        let Some(apim) = config.api_management() else {
            out.note(format!(
                "{}. Skipping policy validation.",
                SkipReason::NoApiManagementConfig.message()
            ));
            return Ok(());
        };

        let mode = resolve_mode(&config, self.mode);
        let mut result = ValidationResult::new(config.project_name().unwrap_or_default(), mode);
        result.extend(check_policy_syntax(apim));
        result.extend(check_policy_references(apim));
        if mode == OperationalMode::Shared {
            result.extend(check_policy_namespacing(apim, config.project_name())?);
        }

        if let Some(output) = &self.output {
            write_report(&result, &resolve_path(output)).await?;
        }
        out.finish(&result, "Policy configurations")
    }
}
