//! Validate a configuration file against its JSON Schema.
//!
//! JSON and YAML configurations are both supported. Without `--schema` the
//! schema is looked up next to the configuration:
//!
//! ```text
//! infrastructure/
//! ├── bicep/
//! │   ├── bicep.config.schema.json   <- used for *.json configs
//! │   └── bicep.config.schema.yaml   <- used for *.yaml / *.yml configs
//! └── environments/
//!     └── bicep.config.yaml
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use super::common::{OutputFormat, resolve_path};
use crate::config::load_document;
use crate::schema::{SchemaValidator, Violation, sibling_schema_path, validation_failure};

/// Validate a configuration file against its schema.
#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Configuration file (JSON or YAML)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Schema file, defaults to the schema next to the configuration
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// JSON output of the config command.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SchemaReport<'a> {
    valid: bool,
    file: String,
    schema: String,
    violations: &'a [Violation],
}

impl ConfigCommand {
    /// Execute the config command.
    ///
    /// # Errors
    ///
    /// Fails if either file cannot be loaded or the configuration violates the
    /// schema.
    pub async fn execute(self, quiet: bool) -> Result<()> {
        let config_path = resolve_path(&self.file);
        let schema_path =
            self.schema.as_deref().map_or_else(|| sibling_schema_path(&config_path), resolve_path);
        info!("Validating {} against {}", config_path.display(), schema_path.display());

        let document = load_document(&config_path)
            .await
            .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
        let validator = SchemaValidator::load(&schema_path).await?;
        let violations = validator.violations(&document);

        match self.format {
            OutputFormat::Json => {
                let report = SchemaReport {
                    valid: violations.is_empty(),
                    file: config_path.display().to_string(),
                    schema: schema_path.display().to_string(),
                    violations: &violations,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text if !quiet => {
                if violations.is_empty() {
                    println!("{} Configuration is valid", "✓".green());
                } else {
                    println!("{} Configuration validation failed:", "✗".red());
                    for (i, violation) in violations.iter().enumerate() {
                        println!("  Error {}: {violation}", i + 1);
                    }
                }
            }
            OutputFormat::Text => {}
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(validation_failure(&violations).into())
        }
    }
}
