//! Integration test suite for apimlint
//!
//! End-to-end tests that run the `apimlint` binary against configuration
//! files written to temporary directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **api_paths**: `apimlint api-paths`
//! - **check**: `apimlint check`, the combined pipeline
//! - **config**: `apimlint config`, schema-only validation
//! - **policies**: `apimlint policies`
//! - **products**: `apimlint products`
//! - **subscriptions**: `apimlint subscriptions`

use assert_cmd::Command;
use std::path::Path;

mod api_paths;
mod check;
mod config;
mod policies;
mod products;
mod subscriptions;

/// The `apimlint` binary running in `dir` with colors and logging off.
pub fn apimlint(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("apimlint").unwrap();
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("APIMLINT_CONFIG");
    cmd
}
