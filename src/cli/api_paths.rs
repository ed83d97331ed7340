//! Validate API paths of a shared APIM instance.
//!
//! Only shared instances can have path conflicts between projects, so the
//! command exits successfully without checks in dedicated mode. The mode flag
//! defaults to shared, so skipping needs an explicit `--mode dedicated` on a
//! configuration that is not itself shared.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use super::common::{
    OutputArgs, load_configuration, resolve_path, validate_against_schema, write_report,
};
use crate::config::OperationalMode;
use crate::constants::{DEFAULT_CONFIG_PATH, DEFAULT_REPORT_PATH};
use crate::validation::{SkipReason, ValidationResult, check_api_paths, resolve_mode};

/// Validate API paths to prevent conflicts between projects.
#[derive(Args, Debug)]
pub struct ApiPathsCommand {
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
    #[arg(short, long, default_value = DEFAULT_REPORT_PATH)]
    pub output: PathBuf,

    #[command(flatten)]
    pub output_args: OutputArgs,
}

impl ApiPathsCommand {
    /// Execute the api-paths command.
    ///
    /// # Errors
    ///
    /// Fails on a fatal precondition or when any API path check reports an error.
    pub async fn execute(self, quiet: bool) -> Result<()> {
        let out = self.output_args.options(quiet);
        let config_path = resolve_path(&self.config);
        info!("Validating API paths in {}", config_path.display());

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
        if mode == OperationalMode::Dedicated {
            out.note("API Management is in dedicated mode. No path conflict validation needed.");
            return Ok(());
        }

        let issues = check_api_paths(apim, config.project_name())?;
        if apim.apis.is_empty() {
            out.note("No APIs defined in configuration. Nothing to validate.");
            return Ok(());
        }

        let mut result = ValidationResult::new(config.project_name().unwrap_or_default(), mode);
        result.extend(issues);

        write_report(&result, &resolve_path(&self.output)).await?;
        out.finish(&result, "API paths")
    }
}
