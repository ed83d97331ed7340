//! Global constants used throughout the apimlint codebase.
//!
//! Section names, product types, and default file locations are shared by
//! the checkers and the CLI, so they are defined here once.

/// Policy sections whose opening and closing tags must balance.
pub const POLICY_SECTIONS: [&str; 4] = ["inbound", "backend", "outbound", "on-error"];

/// Product types accepted after the `{projectName}-` prefix in shared mode.
pub const STANDARD_PRODUCT_TYPES: [&str; 5] = ["internal", "public", "partner", "system", "free"];

/// Default configuration file for the policy checks.
pub const DEFAULT_POLICY_CONFIG_PATH: &str = "./bicep.config.json";

/// Default schema file for the policy checks.
pub const DEFAULT_POLICY_SCHEMA_PATH: &str = "./bicep.config.schema.json";

/// Default configuration file for product, API path, and combined checks.
pub const DEFAULT_CONFIG_PATH: &str = "./infrastructure/bicep/bicep.config.json";

/// Default report location for `apimlint products`.
pub const DEFAULT_PRODUCT_REPORT_PATH: &str = "./infrastructure/bicep/product-validation-report.json";

/// Default report location for `apimlint api-paths` and `apimlint check`.
pub const DEFAULT_REPORT_PATH: &str = "./infrastructure/bicep/validation-report.json";

/// Default subscription-management document.
pub const DEFAULT_SUBSCRIPTION_CONFIG_PATH: &str =
    "infrastructure/bicep/templates/subscription-management-sample.json";

/// Default subscription schema, created on first use when missing.
pub const DEFAULT_SUBSCRIPTION_SCHEMA_PATH: &str =
    "infrastructure/bicep/subscription-config.schema.json";

/// Schema location relative to a configuration file's directory (JSON configs).
pub const SIBLING_JSON_SCHEMA: &str = "../bicep/bicep.config.schema.json";

/// Schema location relative to a configuration file's directory (YAML configs).
pub const SIBLING_YAML_SCHEMA: &str = "../bicep/bicep.config.schema.yaml";
