//! The combined check sequence over one deployment configuration.

use tracing::{debug, info};

use crate::config::{Configuration, OperationalMode};
use crate::core::ApimError;
use crate::policy::{check_policy_namespacing, check_policy_references, check_policy_syntax};

use super::api_paths::check_api_paths;
use super::products::check_products;
use super::results::ValidationResult;

/// Why a configuration had nothing to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `featureToggles.enableApiManagement` is not set
    ApiManagementDisabled,
    /// The `moduleConfigurations.apiManagement` subtree is absent
    NoApiManagementConfig,
}

impl SkipReason {
    /// Human-readable explanation.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ApiManagementDisabled => "API Management is not enabled in this configuration",
            Self::NoApiManagementConfig => "No API Management configuration found",
        }
    }
}

/// Outcome of [`validate_configuration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Checks ran and produced this result
    Checked(ValidationResult),
    /// Nothing to check
    Skipped(SkipReason),
}

/// Resolve the operational mode for a configuration.
#[must_use]
pub fn resolve_mode(config: &Configuration, flag: Option<OperationalMode>) -> OperationalMode {
    let configured =
        config.module_configurations.api_management.as_ref().and_then(|apim| apim.operational_mode);
    OperationalMode::resolve(flag, configured)
}

/// Run every semantic check on a schema-valid configuration.
///
/// The sequence is policy syntax, policy references, policy namespacing
/// (shared only), products, then API paths (shared only). All issues land in
/// one result in that order.
///
/// # Errors
///
/// Returns [`ApimError::ProjectNameRequired`] when a shared-mode check runs
/// without `metadata.projectName`. No partial result is produced.
pub fn validate_configuration(
    config: &Configuration,
    mode_flag: Option<OperationalMode>,
) -> Result<PipelineOutcome, ApimError> {
    if !config.feature_toggles.enable_api_management {
        return Ok(PipelineOutcome::Skipped(SkipReason::ApiManagementDisabled));
    }
    let Some(apim) = config.api_management() else {
        return Ok(PipelineOutcome::Skipped(SkipReason::NoApiManagementConfig));
    };

    let mode = resolve_mode(config, mode_flag);
    let project_name = config.project_name();
    info!("Validating API Management configuration in {mode} mode");

    let mut result = ValidationResult::new(project_name.unwrap_or_default(), mode);

    debug!("Checking policy syntax");
    result.extend(check_policy_syntax(apim));

    debug!("Checking policy references");
    result.extend(check_policy_references(apim));

    if mode == OperationalMode::Shared {
        debug!("Checking policy namespacing");
        result.extend(check_policy_namespacing(apim, project_name)?);
    }

    debug!("Checking products");
    result.extend(check_products(apim, project_name, mode)?);

    if mode == OperationalMode::Shared {
        debug!("Checking API paths");
        result.extend(check_api_paths(apim, project_name)?);
    }

    info!(
        "Validation finished with {} error(s) and {} warning(s)",
        result.errors().count(),
        result.warnings().count()
    );

    Ok(PipelineOutcome::Checked(result))
}
