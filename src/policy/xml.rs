//! Structural checks for XML-like policy text.
//!
//! Neither function here is an XML parser. Both are counting heuristics whose
//! pass/fail boundary is relied upon by existing pipelines:
//!
//! - [`is_valid_policy_xml`] only looks at the four policy section names and
//!   `<base/>` markers. It ignores nesting order, attributes, comments, and
//!   any other element.
//! - [`is_balanced_xml`] walks tags with a stack but drops whitespace inside
//!   a tag, so an element with attributes is compared by its name and
//!   attributes run together.
//!
//! Neither should be turned into a conformant parser: configurations that pass
//! today would start failing (or vice versa).

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::POLICY_SECTIONS;

static BASE_MARKER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<base\s*/>").ok());

/// Heuristic balance check for an APIM policy document.
///
/// Returns `false` when any of the following holds:
/// - the text has no `<policies>` opening tag
/// - for one of `inbound`, `backend`, `outbound`, `on-error` the number of
///   `<section>` and `</section>` occurrences differ
/// - there are more `<base/>` markers (whitespace allowed before `/>`) than
///   sections present (a section is present when its opening tag occurs)
///
/// # Examples
///
/// ```
/// use apimlint_cli::policy::is_valid_policy_xml;
///
/// assert!(is_valid_policy_xml("<policies><inbound><base /></inbound></policies>"));
/// assert!(!is_valid_policy_xml("<inbound></inbound>"));
/// assert!(!is_valid_policy_xml("<policies><inbound></policies>"));
/// ```
#[must_use]
pub fn is_valid_policy_xml(text: &str) -> bool {
    if !text.contains("<policies>") {
        return false;
    }

    let mut present_sections = 0;
    for section in POLICY_SECTIONS {
        let open_tag = format!("<{section}>");
        let close_tag = format!("</{section}>");

        let open_count = text.matches(open_tag.as_str()).count();
        let close_count = text.matches(close_tag.as_str()).count();
        if open_count != close_count {
            return false;
        }
        if open_count > 0 {
            present_sections += 1;
        }
    }

    let base_count = BASE_MARKER.as_ref().map_or(0, |re| re.find_iter(text).count());
    base_count <= present_sections
}

/// Stack-based tag balance check used for subscription policies.
///
/// Walks the text tag by tag:
/// - `<name>` pushes `name` when the collected name is non-empty and the tag
///   does not end in `/>`
/// - `</name>` pops and fails unless the popped name matches
/// - whitespace inside a tag is skipped, so `<set-header name="x">` collects
///   `set-headername="x"`
///
/// The text is balanced when every close matched and the stack ends empty.
///
/// # Examples
///
/// ```
/// use apimlint_cli::policy::is_balanced_xml;
///
/// assert!(is_balanced_xml("<policies><inbound><base /></inbound></policies>"));
/// assert!(!is_balanced_xml("<policies><inbound></policies>"));
/// ```
#[must_use]
pub fn is_balanced_xml(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    let mut stack: Vec<String> = Vec::new();
    let mut in_tag = false;
    let mut in_closing_tag = false;
    let mut tag_name = String::new();

    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];

        if ch == '<' {
            in_tag = true;
            tag_name.clear();
            if chars.get(i + 1) == Some(&'/') {
                in_closing_tag = true;
                i += 1;
            }
        } else if ch == '>' {
            if in_tag {
                if in_closing_tag {
                    if stack.pop().as_deref() != Some(tag_name.as_str()) {
                        return false;
                    }
                    in_closing_tag = false;
                } else {
                    let self_closing = i > 0 && chars[i - 1] == '/';
                    if !tag_name.is_empty() && !tag_name.contains(' ') && !self_closing {
                        stack.push(tag_name.clone());
                    }
                }
                in_tag = false;
            }
        } else if in_tag && !ch.is_whitespace() {
            tag_name.push(ch);
        }

        i += 1;
    }

    stack.is_empty()
}
