//! Flattening of YAML documents into dotted property keys.

use serde_yaml::Value;

use crate::error::Result;
use crate::value::{PropertyMap, PropertyValue};

/// Separator used when a sequence of scalars is collapsed into one value.
const LIST_JOIN: &str = ",";

/// Parse a YAML document into a flat, ordered property map.
///
/// - Nested mappings become dotted keys (`db: {host: x}` gives `db.host`).
/// - A sequence of scalars becomes a single comma-separated value.
/// - Any other sequence is indexed (`servers.0.name`).
/// - `null` becomes an empty value.
///
/// # Errors
///
/// Returns [`crate::Error::Yaml`] if the text is not valid YAML.
///
/// # Examples
///
/// ```
/// use strata::source::yaml::parse;
///
/// let map = parse("db:\n  host: localhost\n  port: 5432\nhosts: [a, b]\n").unwrap();
/// assert_eq!(map["db.host"].value(), "localhost");
/// assert_eq!(map["db.port"].value(), "5432");
/// assert_eq!(map["hosts"].value(), "a,b");
/// ```
pub fn parse(text: &str) -> Result<PropertyMap> {
    let document: Value = serde_yaml::from_str(text)?;
    let mut map = PropertyMap::new();
    flatten(None, &document, &mut map);
    Ok(map)
}

fn flatten(prefix: Option<&str>, value: &Value, out: &mut PropertyMap) {
    match value {
        Value::Mapping(mapping) => {
            for (key, child) in mapping {
                let Some(segment) = scalar_text(key) else {
                    log::warn!("skipping YAML mapping key that is not a scalar");
                    continue;
                };
                let path = join(prefix, &segment);
                flatten(Some(&path), child, out);
            }
        }
        Value::Sequence(items) => {
            let Some(prefix) = prefix else {
                log::warn!("skipping top-level YAML sequence");
                return;
            };
            let scalars: Option<Vec<String>> = items.iter().map(scalar_text).collect();
            match scalars {
                Some(scalars) => insert(out, prefix, scalars.join(LIST_JOIN)),
                None => {
                    for (index, child) in items.iter().enumerate() {
                        let path = join(Some(prefix), &index.to_string());
                        flatten(Some(&path), child, out);
                    }
                }
            }
        }
        Value::Tagged(tagged) => flatten(prefix, &tagged.value, out),
        scalar => {
            if let (Some(prefix), Some(text)) = (prefix, scalar_text(scalar)) {
                insert(out, prefix, text);
            }
        }
    }
}

fn insert(out: &mut PropertyMap, key: &str, value: String) {
    out.insert(key.to_string(), PropertyValue::new(value));
}

fn join(prefix: Option<&str>, segment: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}.{segment}"),
        None => segment.to_string(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
