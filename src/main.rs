//! apimlint CLI entry point
//!
//! Parses arguments, sets up logging, runs the selected command and turns
//! errors into a readable report with a non-zero exit code.
//!
//! - `check` - Run every check against a bicep configuration
//! - `config` - Validate a configuration against its JSON Schema
//! - `policies` - Validate policy XML, references and namespacing
//! - `products` - Validate product naming and settings
//! - `api-paths` - Validate API paths on shared instances
//! - `subscriptions` - Validate subscription-management parameters

use anyhow::Result;
use apimlint_cli::cli;
use apimlint_cli::core::error::user_friendly_error;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let config = cli.build_config();

    // RUST_LOG wins over the flags
    let filter = match (std::env::var("RUST_LOG").is_ok(), config.log_level.as_deref()) {
        (true, _) => Some(EnvFilter::from_default_env()),
        (false, Some(level)) => Some(EnvFilter::new(level)),
        (false, None) => None,
    };
    if let Some(filter) = filter {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute_with_config(config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
