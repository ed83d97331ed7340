//! Run every check against a deployment configuration.
//!
//! `apimlint check` is the command CI pipelines call. It validates the
//! configuration against its schema when one can be found, then runs the
//! policy, product and API path checks in one pass and reports every issue
//! together.
//!
//! # Examples
//!
//! ```bash
//! # Default configuration location, mode taken from the file
//! apimlint check
//!
//! # Force shared-mode rules and keep a report
//! apimlint check -c infra/bicep/bicep.config.yaml --mode shared -o report.json
//!
//! # Machine-readable output, warnings fail the run
//! apimlint check --format json --strict
//! ```

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

use super::common::{
    OutputArgs, load_configuration, resolve_path, validate_against_schema, write_report,
};
use crate::config::OperationalMode;
use crate::constants::DEFAULT_CONFIG_PATH;
use crate::schema::sibling_schema_path;
use crate::validation::{PipelineOutcome, validate_configuration};

/// Validate policies, products and API paths of a configuration.
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Configuration file (JSON or YAML)
    #[arg(short, long, env = "APIMLINT_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Schema file, defaults to the schema next to the configuration
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Skip schema validation
    #[arg(long, conflicts_with = "schema")]
    pub no_schema: bool,

    /// Operational mode override; shared wins if either this or the config says so
    #[arg(short, long, value_enum)]
    pub mode: Option<OperationalMode>,

    /// Write the JSON report to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub output_args: OutputArgs,
}

impl CheckCommand {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Fails on any fatal precondition (missing file, schema violation,
    /// missing project name) or when the validation result fails.
    pub async fn execute(self, quiet: bool) -> Result<()> {
        let out = self.output_args.options(quiet);
        let config_path = resolve_path(&self.config);
        info!("Validating configuration in {}", config_path.display());

        let (document, config) = load_configuration(&config_path).await?;

        let schema_path = if self.no_schema {
            None
        } else if let Some(schema) = &self.schema {
            Some(resolve_path(schema))
        } else {
            let sibling = sibling_schema_path(&config_path);
            if tokio::fs::try_exists(&sibling).await.unwrap_or(false) {
                Some(sibling)
            } else {
                warn!("No schema found at {}, skipping schema validation", sibling.display());
                None
            }
        };

        if let Some(schema_path) = schema_path {
            validate_against_schema(&document, &schema_path).await?;
            out.success("Configuration matches its schema");
        }

        match validate_configuration(&config, self.mode)? {
            PipelineOutcome::Skipped(reason) => {
                out.note(format!("{}. Skipping validation.", reason.message()));
                Ok(())
            }
            PipelineOutcome::Checked(result) => {
                if let Some(output) = &self.output {
                    write_report(&result, &resolve_path(output)).await?;
                }
                out.finish(&result, "API Management configurations")
            }
        }
    }
}
