//! Validate a subscription-management parameters file.
//!
//! The schema file is created with the built-in default when it does not
//! exist yet, so a fresh repository can run this command without setup.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use super::common::{OutputArgs, resolve_path, validate_against_schema, write_report};
use crate::config::{OperationalMode, SubscriptionDocument, load_document};
use crate::constants::{DEFAULT_SUBSCRIPTION_CONFIG_PATH, DEFAULT_SUBSCRIPTION_SCHEMA_PATH};
use crate::schema::ensure_subscription_schema;
use crate::validation::{ValidationResult, check_subscription_document};

/// Validate subscriptions, quotas and usage tracking.
#[derive(Args, Debug)]
pub struct SubscriptionsCommand {
    /// Subscription-management parameters file
    #[arg(short, long, default_value = DEFAULT_SUBSCRIPTION_CONFIG_PATH)]
    pub config: PathBuf,

    /// Schema file, created with defaults when missing
    #[arg(short, long, default_value = DEFAULT_SUBSCRIPTION_SCHEMA_PATH)]
    pub schema: PathBuf,

    /// Write the JSON report to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub output_args: OutputArgs,
}

impl SubscriptionsCommand {
    /// Execute the subscriptions command.
    ///
    /// # Errors
    ///
    /// Fails on a fatal precondition or when any subscription check reports an
    /// error.
    pub async fn execute(self, quiet: bool) -> Result<()> {
        let out = self.output_args.options(quiet);
        let config_path = resolve_path(&self.config);
        let schema_path = resolve_path(&self.schema);
        info!("Validating subscription configuration in {}", config_path.display());

        if ensure_subscription_schema(&schema_path).await? {
            out.note(format!("Created default schema at {}", schema_path.display()));
        }

        let document = load_document(&config_path)
            .await
            .with_context(|| format!("Failed to load subscription configuration {}", config_path.display()))?;
        validate_against_schema(&document, &schema_path).await?;

        let subscriptions = SubscriptionDocument::from_value(document)?;
        let issues = check_subscription_document(&subscriptions)?;

        let mut result =
            ValidationResult::new(subscriptions.project_name().unwrap_or_default(), None::<OperationalMode>);
        result.extend(issues);

        if let Some(output) = &self.output {
            write_report(&result, &resolve_path(output)).await?;
        }
        out.finish(&result, "Subscription configurations")
    }
}
