//! Shared plumbing for the validation commands.
//!
//! Every command follows the same shape: load a document, optionally check it
//! against a schema, run one or more checkers, then print a
//! [`ValidationResult`] and optionally write it to a report file. The helpers
//! here keep that flow identical across commands.

use anyhow::{Context, Result, anyhow};
use clap::Args;
use colored::Colorize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{Configuration, load_document};
use crate::schema::SchemaValidator;
use crate::validation::ValidationResult;

/// Output format for validation results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colored markers
    #[default]
    Text,
    /// The full result as pretty-printed JSON
    Json,
}

/// Output flags shared by every validation command.
#[derive(Args, Clone, Debug, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

impl OutputArgs {
    /// Combine with the global quiet flag.
    #[must_use]
    pub const fn options(&self, quiet: bool) -> OutputOptions {
        OutputOptions {
            format: self.format,
            quiet,
            strict: self.strict,
        }
    }
}

/// How results are presented and judged.
#[derive(Clone, Copy, Debug, Default)]
pub struct OutputOptions {
    /// Output format
    pub format: OutputFormat,
    /// Suppress text output
    pub quiet: bool,
    /// Treat warnings as failures
    pub strict: bool,
}

impl OutputOptions {
    /// Whether text lines should be printed.
    #[must_use]
    pub fn prints_text(&self) -> bool {
        self.format == OutputFormat::Text && !self.quiet
    }

    /// Print a success line in text mode.
    pub fn success(&self, message: impl AsRef<str>) {
        if self.prints_text() {
            println!("{} {}", "✓".green(), message.as_ref());
        }
    }

    /// Print an informational line in text mode.
    pub fn note(&self, message: impl AsRef<str>) {
        if self.prints_text() {
            println!("{}", message.as_ref());
        }
    }

    /// Print a result and turn it into the command's exit status.
    ///
    /// Text mode lists errors after a failure banner and warnings after a
    /// success banner. JSON mode prints the serialized result whatever the
    /// outcome.
    ///
    /// # Errors
    ///
    /// Fails when the result has errors, or when strict mode is on and it has
    /// warnings.
    pub fn finish(&self, result: &ValidationResult, subject: &str) -> Result<()> {
        let error_count = result.errors().count();
        let warning_count = result.warnings().count();
        let strict_failure = self.strict && warning_count > 0;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(result)?);
            }
            OutputFormat::Text if !self.quiet => {
                if result.validation_passed {
                    println!("{} Validation passed! {subject} are valid.", "✓".green());
                } else {
                    println!("{} Validation failed! {subject} have issues:", "✗".red());
                    for issue in result.errors() {
                        println!("  - {issue}");
                    }
                }
                for warning in result.warnings() {
                    println!("{} Warning: {}", "⚠".yellow(), warning.message);
                }
                if strict_failure && result.validation_passed {
                    println!("{} Strict mode: Warnings treated as errors", "✗".red());
                }
            }
            OutputFormat::Text => {}
        }

        if !result.validation_passed {
            return Err(anyhow!(
                "Validation failed with {error_count} error(s) and {warning_count} warning(s)"
            ));
        }
        if strict_failure {
            return Err(anyhow!("Strict mode validation failed"));
        }
        Ok(())
    }
}

/// Resolve a possibly relative path against the working directory.
#[must_use]
pub fn resolve_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
    }
}

/// Load a configuration file as both a raw tree and the typed model.
///
/// # Errors
///
/// Fails if the file is missing, unparseable, or structurally wrong.
pub async fn load_configuration(path: &Path) -> Result<(Value, Configuration)> {
    let value = load_document(path)
        .await
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    let config = Configuration::from_value(value.clone())
        .with_context(|| format!("Failed to interpret configuration {}", path.display()))?;
    Ok((value, config))
}

/// Validate a document against the schema at `schema_path`.
///
/// # Errors
///
/// Fails if the schema cannot be loaded or the document violates it.
pub async fn validate_against_schema(document: &Value, schema_path: &Path) -> Result<()> {
    info!("Using schema from {}", schema_path.display());
    let validator = SchemaValidator::load(schema_path).await?;
    validator.validate(document)?;
    debug!("Document conforms to {}", validator.name());
    Ok(())
}

/// Write a result as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Fails if the report cannot be serialized or written.
pub async fn write_report(result: &ValidationResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create report directory {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(result)?;
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    info!("Report written to {}", path.display());
    Ok(())
}
