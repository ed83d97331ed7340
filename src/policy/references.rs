//! Extraction of cross-reference tokens from policy text.
//!
//! Policies reference two kinds of declared entities:
//!
//! - **Named values** through `{{name}}` placeholders. The name is any run of
//!   characters other than `{` and `}`, captured verbatim (no trimming).
//! - **Policy fragments** through `<include-fragment fragment-id="name" />`.
//!
//! Both extractors return each identifier once, in order of first appearance.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static NAMED_VALUE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]+)\}\}").ok());

static FRAGMENT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"<include-fragment\s+fragment-id="([^"]+)""#).ok());

/// Extract the named values referenced by `{{name}}` placeholders.
///
/// # Examples
///
/// ```
/// use apimlint_cli::policy::extract_named_value_references;
///
/// let refs = extract_named_value_references(
///     r#"<set-header name="key"><value>{{api-key}}</value></set-header>{{api-key}}"#,
/// );
/// assert_eq!(refs, vec!["api-key".to_string()]);
/// ```
#[must_use]
pub fn extract_named_value_references(policy: &str) -> Vec<String> {
    capture_unique(NAMED_VALUE_PATTERN.as_ref(), policy)
}

/// Extract the fragment ids referenced by `<include-fragment>` directives.
///
/// # Examples
///
/// ```
/// use apimlint_cli::policy::extract_policy_fragment_references;
///
/// let refs = extract_policy_fragment_references(
///     r#"<inbound><include-fragment fragment-id="orders-cors" /></inbound>"#,
/// );
/// assert_eq!(refs, vec!["orders-cors".to_string()]);
/// ```
#[must_use]
pub fn extract_policy_fragment_references(policy: &str) -> Vec<String> {
    capture_unique(FRAGMENT_PATTERN.as_ref(), policy)
}

fn capture_unique(pattern: Option<&Regex>, text: &str) -> Vec<String> {
    let Some(pattern) = pattern else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    pattern
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|reference| seen.insert(reference.clone()))
        .collect()
}
