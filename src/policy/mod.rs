//! APIM policy text analysis.
//!
//! Policies are XML-like documents attached at four scopes (global, product,
//! API, operation) plus reusable fragments. This module checks their rough
//! structure and the names they reference.
//!
//! # Modules
//!
//! - [`xml`] - tag-count and tag-stack balance heuristics
//! - [`references`] - `{{named-value}}` and `<include-fragment>` extraction
//! - [`checks`] - syntax, cross-reference and namespacing passes over a config

pub mod checks;
pub mod references;
pub mod xml;

pub use checks::{
    PolicyInventory, PolicyScope, ScopedPolicy, check_policy_namespacing, check_policy_references,
    check_policy_syntax, collect_policies, validate_policy_references,
};
pub use references::{extract_named_value_references, extract_policy_fragment_references};
pub use xml::{is_balanced_xml, is_valid_policy_xml};
