//! Pretty printer built on serde_json's `PrettyFormatter`.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::repr::repr;
use super::{Depth, PrettyConfig};
use crate::error::{FormatError, FormatErrorKind};

const ELIDED: &str = "...";

/// Replaces containers nested at or beyond `depth` with the text `...`.
fn truncate(value: &Value, depth: Depth, level: usize) -> Value {
    match value {
        Value::Array(items) if !items.is_empty() => {
            if depth.exceeded(level) {
                Value::String(ELIDED.to_owned())
            } else {
                Value::Array(items.iter().map(|item| truncate(item, depth, level + 1)).collect())
            }
        }
        Value::Object(map) if !map.is_empty() => {
            if depth.exceeded(level) {
                Value::String(ELIDED.to_owned())
            } else {
                Value::Object(
                    map.iter()
                        .map(|(key, item)| (key.clone(), truncate(item, depth, level + 1)))
                        .collect(),
                )
            }
        }
        other => other.clone(),
    }
}

pub(crate) fn format(value: &Value, config: &PrettyConfig) -> Result<String, FormatError> {
    let value = truncate(value, config.depth, 0);
    let inline = repr(&value);
    if config.compact || inline.chars().count() <= config.width {
        return Ok(inline);
    }

    let indent = " ".repeat(config.indent.max(1));
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(indent.as_bytes()));
    value
        .serialize(&mut serializer)
        .map_err(|err| FormatError::new(FormatErrorKind::Conversion, err.to_string()))?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn short_values_stay_inline() {
        let rendered = format(&json!({"a": [1, 2]}), &PrettyConfig::DEFAULT).unwrap();
        assert_eq!(rendered, "{\"a\": [1, 2]}");
    }

    #[test]
    fn long_values_expand_with_configured_indent() {
        let config = PrettyConfig {
            width: 10,
            indent: 2,
            ..PrettyConfig::DEFAULT
        };
        let rendered = format(&json!({"alpha": [1, 2]}), &config).unwrap();
        assert_eq!(rendered, "{\n  \"alpha\": [\n    1,\n    2\n  ]\n}");
    }

    #[test]
    fn compact_forces_single_line() {
        let config = PrettyConfig {
            width: 5,
            compact: true,
            ..PrettyConfig::DEFAULT
        };
        let rendered = format(&json!([1, 2, 3, 4]), &config).unwrap();
        assert_eq!(rendered, "[1, 2, 3, 4]");
    }

    #[test]
    fn depth_elides_nested_containers() {
        let config = PrettyConfig {
            depth: Depth::Limit(1),
            ..PrettyConfig::DEFAULT
        };
        let rendered = format(&json!({"a": {"b": 1}, "c": []}), &config).unwrap();
        assert_eq!(rendered, "{\"a\": \"...\", \"c\": []}");
    }
}
