//! Command-line interface for apimlint.
//!
//! Each subcommand lives in its own module and exposes an `execute` method.
//! Global flags (`--verbose`, `--quiet`) are collected into a [`CliConfig`]
//! before dispatch.
//!
//! # Commands
//!
//! | Command | Checks |
//! |---------|--------|
//! | `check` | schema, policies, products and API paths in one pass |
//! | `config` | JSON Schema conformance only |
//! | `policies` | policy XML, references and namespacing |
//! | `products` | product naming, metadata and references |
//! | `api-paths` | API path conflicts on shared instances |
//! | `subscriptions` | subscription-management parameter files |
//!
//! Every command exits non-zero on a fatal error or a failed validation.
//! With `--strict`, warnings fail the run as well.

mod api_paths;
mod check;
pub mod common;
mod config;
mod policies;
mod products;
mod subscriptions;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Settings derived from global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level for `tracing`, `None` disables logging
    pub log_level: Option<String>,
    /// Suppress text output
    pub quiet: bool,
}

impl CliConfig {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Lint API Management infrastructure-as-code before deployment.
#[derive(Parser, Debug)]
#[command(
    name = "apimlint",
    about = "Validate API Management infrastructure-as-code configuration",
    version,
    long_about = "apimlint checks APIM policies, products, API paths and subscription settings \
                  in bicep configuration files before they are deployed."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run every check against a configuration
    Check(check::CheckCommand),
    /// Validate a configuration file against its JSON Schema
    Config(config::ConfigCommand),
    /// Validate policy XML, references and namespacing
    Policies(policies::PoliciesCommand),
    /// Validate product naming conventions and requirements
    Products(products::ProductsCommand),
    /// Validate API paths on a shared instance
    ApiPaths(api_paths::ApiPathsCommand),
    /// Validate a subscription-management parameters file
    Subscriptions(subscriptions::SubscriptionsCommand),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// # Errors
    ///
    /// Propagates fatal errors and validation failures from the command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Derive the [`CliConfig`] from global flags.
    ///
    /// `--verbose` selects `debug`, `--quiet` disables logging, and the default
    /// is `warn` so text output is not interleaved with log lines.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
            quiet: self.quiet,
        }
    }

    /// Dispatch to the subcommand.
    ///
    /// # Errors
    ///
    /// Propagates fatal errors and validation failures from the command.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let quiet = config.quiet;
        match self.command {
            Commands::Check(cmd) => cmd.execute(quiet).await,
            Commands::Config(cmd) => cmd.execute(quiet).await,
            Commands::Policies(cmd) => cmd.execute(quiet).await,
            Commands::Products(cmd) => cmd.execute(quiet).await,
            Commands::ApiPaths(cmd) => cmd.execute(quiet).await,
            Commands::Subscriptions(cmd) => cmd.execute(quiet).await,
        }
    }
}
