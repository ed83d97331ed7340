//! Conversion of YAML-authored configuration schemas.
//!
//! The YAML schema shipped next to `bicep.config.yaml` describes the top-level
//! sections of the configuration as a flat mapping. Before it can be compiled
//! it is wrapped into a draft-07 root object whose `properties` are those
//! sections.

use serde_json::{Map, Value, json};

/// Draft declared by converted schemas.
pub const DRAFT_07_URI: &str = "http://json-schema.org/draft-07/schema#";

/// Wrap a YAML-authored schema into a draft-07 JSON Schema.
///
/// Every top-level entry whose value is an object or array becomes a property
/// of the root schema. Scalar top-level entries are dropped. The root requires
/// `metadata`.
///
/// # Examples
///
/// ```
/// use apimlint_cli::schema::convert_yaml_schema;
/// use serde_json::json;
///
/// let converted = convert_yaml_schema(&json!({
///     "metadata": { "type": "object", "required": ["projectName"] },
///     "version": 2
/// }));
///
/// assert_eq!(converted["required"], json!(["metadata"]));
/// assert_eq!(converted["properties"]["metadata"]["required"], json!(["projectName"]));
/// assert!(converted["properties"].get("version").is_none());
/// ```
#[must_use]
pub fn convert_yaml_schema(yaml_schema: &Value) -> Value {
    let mut properties = Map::new();

    if let Value::Object(entries) = yaml_schema {
        for (key, value) in entries {
            if value.is_object() || value.is_array() {
                properties.insert(key.clone(), convert_node(value));
            }
        }
    }

    json!({
        "$schema": DRAFT_07_URI,
        "title": "Bicep Configuration Schema",
        "description": "Schema for bicep.config.yaml that drives infrastructure deployment",
        "type": "object",
        "required": ["metadata"],
        "properties": properties,
    })
}

/// Copy a schema node, descending into nested objects. Arrays and scalars are
/// copied as they are.
fn convert_node(node: &Value) -> Value {
    match node {
        Value::Object(entries) => Value::Object(
            entries.iter().map(|(key, value)| (key.clone(), convert_node(value))).collect(),
        ),
        other => other.clone(),
    }
}
