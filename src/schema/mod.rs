//! JSON Schema validation of configuration documents.
//!
//! Gross document shape is delegated to the `jsonschema` crate, compiled as
//! draft 7. Schema violations are fatal: the semantic checkers assume a
//! schema-valid tree and never run on a document that failed here.
//!
//! Schemas may be written in JSON or YAML. YAML schemas are wrapped by
//! [`convert_yaml_schema`] before compilation.
//!
//! # Modules
//!
//! - [`convert`] - YAML schema wrapping
//! - [`defaults`] - the built-in subscription-management schema

pub mod convert;
pub mod defaults;

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::DocumentFormat;
use crate::constants::{SIBLING_JSON_SCHEMA, SIBLING_YAML_SCHEMA};
use crate::core::ApimError;

pub use convert::convert_yaml_schema;
pub use defaults::default_subscription_schema;

/// One schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// JSON Pointer to the offending value, empty for the root
    pub instance_path: String,
    /// Validator message
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root) {}", self.message)
        } else {
            write!(f, "{} {}", self.instance_path, self.message)
        }
    }
}

/// A compiled schema.
pub struct SchemaValidator {
    name: String,
    validator: jsonschema::Validator,
}

impl SchemaValidator {
    /// Compile a schema value.
    ///
    /// # Errors
    ///
    /// Returns [`ApimError::SchemaLoadError`] if the schema is not a valid
    /// draft-7 schema.
    pub fn new(name: impl Into<String>, schema: &Value) -> Result<Self, ApimError> {
        let name = name.into();

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft7);
        let validator = opts.build(schema).map_err(|e| ApimError::SchemaLoadError {
            schema: name.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            name,
            validator,
        })
    }

    /// Read, parse and compile a schema file.
    ///
    /// `.yaml`/`.yml` files are parsed as YAML and wrapped with
    /// [`convert_yaml_schema`]; anything else is parsed as JSON.
    ///
    /// # Errors
    ///
    /// - [`ApimError::SchemaNotFound`] if `path` does not exist
    /// - [`ApimError::SchemaLoadError`] if it cannot be parsed or compiled
    pub async fn load(path: &Path) -> Result<Self, ApimError> {
        let name = path.display().to_string();
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(ApimError::SchemaNotFound {
                path: name,
            });
        }

        let content = tokio::fs::read_to_string(path).await?;
        let load_error = |reason: String| ApimError::SchemaLoadError {
            schema: name.clone(),
            reason,
        };

        let schema = match DocumentFormat::from_path(path) {
            DocumentFormat::Json => {
                serde_json::from_str(&content).map_err(|e| load_error(e.to_string()))?
            }
            DocumentFormat::Yaml => {
                let raw: Value =
                    serde_yaml::from_str(&content).map_err(|e| load_error(e.to_string()))?;
                debug!("Converting YAML schema {}", name);
                convert_yaml_schema(&raw)
            }
        };

        Self::new(name, &schema)
    }

    /// Path or identifier the schema was loaded from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every violation of `instance`, in validator order.
    #[must_use]
    pub fn violations(&self, instance: &Value) -> Vec<Violation> {
        self.validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                message: e.to_string(),
            })
            .collect()
    }

    /// Validate `instance`, failing with every violation listed.
    ///
    /// # Errors
    ///
    /// Returns [`ApimError::SchemaValidationFailed`] with one numbered line per
    /// violation.
    pub fn validate(&self, instance: &Value) -> Result<(), ApimError> {
        let violations = self.violations(instance);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(validation_failure(&violations))
        }
    }
}

/// Build the fatal error for a non-empty violation list.
#[must_use]
pub fn validation_failure(violations: &[Violation]) -> ApimError {
    let listing = violations
        .iter()
        .enumerate()
        .map(|(i, v)| format!("Error {}: {v}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    ApimError::SchemaValidationFailed {
        count: violations.len(),
        violations: listing,
    }
}

/// The schema that sits next to a configuration file.
///
/// YAML configurations use `../bicep/bicep.config.schema.yaml` and everything
/// else `../bicep/bicep.config.schema.json`, relative to the directory of
/// `config_path`.
///
/// # Examples
///
/// ```
/// use apimlint_cli::schema::sibling_schema_path;
/// use std::path::Path;
///
/// assert_eq!(
///     sibling_schema_path(Path::new("infra/env/bicep.config.yaml")),
///     Path::new("infra/env/../bicep/bicep.config.schema.yaml")
/// );
/// ```
#[must_use]
pub fn sibling_schema_path(config_path: &Path) -> PathBuf {
    let dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    match DocumentFormat::from_path(config_path) {
        DocumentFormat::Yaml => dir.join(SIBLING_YAML_SCHEMA),
        DocumentFormat::Json => dir.join(SIBLING_JSON_SCHEMA),
    }
}

/// Write the default subscription schema to `path` unless a file exists.
///
/// Returns whether a file was written.
///
/// # Errors
///
/// Returns [`ApimError::IoError`] or [`ApimError::JsonError`] if the schema
/// cannot be written.
pub async fn ensure_subscription_schema(path: &Path) -> Result<bool, ApimError> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let content = serde_json::to_string_pretty(&default_subscription_schema())?;
    tokio::fs::write(path, content).await?;
    info!("Created default subscription schema at {}", path.display());
    Ok(true)
}
