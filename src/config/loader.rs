//! Loading configuration documents from disk.
//!
//! Both JSON and YAML sources produce the same `serde_json::Value` tree, so the
//! schema validator and the typed model never need to know which format the
//! file was written in. The format is chosen from the file extension:
//! `.yaml` and `.yml` are parsed as YAML, everything else as JSON.

use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::core::ApimError;

/// Serialization format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON (the default for unknown extensions)
    Json,
    /// YAML
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension, case-insensitively.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase) {
            Some(ext) if ext == "yaml" || ext == "yml" => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parse document text in the given format.
///
/// # Errors
///
/// Returns [`ApimError::ConfigParseError`] naming `file` when the text is not
/// valid in the requested format.
pub fn parse_document(content: &str, format: DocumentFormat, file: &str) -> Result<Value, ApimError> {
    let parsed = match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|reason| ApimError::ConfigParseError {
        file: file.to_string(),
        reason,
    })
}

/// Read and parse a JSON or YAML document.
///
/// # Errors
///
/// - [`ApimError::ConfigNotFound`] if `path` does not exist
/// - [`ApimError::IoError`] if it cannot be read
/// - [`ApimError::ConfigParseError`] if it cannot be parsed
pub async fn load_document(path: &Path) -> Result<Value, ApimError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(ApimError::ConfigNotFound {
            path: path.display().to_string(),
        });
    }

    let format = DocumentFormat::from_path(path);
    debug!("Loading {:?} document from {}", format, path.display());

    let content = tokio::fs::read_to_string(path).await?;
    parse_document(&content, format, &path.display().to_string())
}
