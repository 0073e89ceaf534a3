//! Single-line representations of formatting values.

use serde_json::{Map, Value};

use super::Depth;
use crate::format::float_repr;

/// Quoted, escaped form of a string.
pub(crate) fn string_repr(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("{text:?}"))
}

fn number_repr(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() => float_repr(float),
        _ => number.to_string(),
    }
}

/// Mapping entries in key order, independent of the map's own ordering.
pub(crate) fn sorted_entries(map: &Map<String, Value>) -> Vec<(&String, &Value)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|left, right| left.0.cmp(right.0));
    entries
}

/// Inline representation with strings quoted: `{"a": [1, "b"]}`.
pub(crate) fn repr(value: &Value) -> String {
    limited_repr(value, Depth::Unlimited, 0)
}

/// Like [`repr`], but a top-level string renders raw, the way `print` shows it.
pub(crate) fn print_repr(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => repr(other),
    }
}

/// Inline representation where non-empty containers nested at or beyond
/// `depth` collapse to `[...]` / `{...}`.
pub(crate) fn limited_repr(value: &Value, depth: Depth, level: usize) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_repr(number),
        Value::String(text) => string_repr(text),
        Value::Array(items) if items.is_empty() => "[]".to_owned(),
        Value::Array(_) if depth.exceeded(level) => "[...]".to_owned(),
        Value::Array(items) => {
            let inner: Vec<String> = items
                .iter()
                .map(|item| limited_repr(item, depth, level + 1))
                .collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(map) if map.is_empty() => "{}".to_owned(),
        Value::Object(_) if depth.exceeded(level) => "{...}".to_owned(),
        Value::Object(map) => {
            let inner: Vec<String> = sorted_entries(map)
                .into_iter()
                .map(|(key, item)| format!("{}: {}", string_repr(key), limited_repr(item, depth, level + 1)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_render_like_json() {
        assert_eq!(repr(&json!(null)), "null");
        assert_eq!(repr(&json!(true)), "true");
        assert_eq!(repr(&json!(42)), "42");
        assert_eq!(repr(&json!(0.5)), "0.5");
        assert_eq!(repr(&json!(2.0)), "2.0");
        assert_eq!(repr(&json!("a\"b")), "\"a\\\"b\"");
    }

    #[test]
    fn print_repr_leaves_top_level_strings_raw() {
        assert_eq!(print_repr(&json!("plain")), "plain");
        assert_eq!(print_repr(&json!(["plain"])), "[\"plain\"]");
    }

    #[test]
    fn containers_use_spaced_separators() {
        assert_eq!(repr(&json!({"b": 1, "a": [1, 2]})), "{\"a\": [1, 2], \"b\": 1}");
    }

    #[test]
    fn depth_collapses_nested_containers() {
        let value = json!({"outer": {"inner": [1]}, "empty": []});
        assert_eq!(
            limited_repr(&value, Depth::Limit(1), 0),
            "{\"empty\": [], \"outer\": {...}}"
        );
        assert_eq!(limited_repr(&value, Depth::Limit(0), 0), "{...}");
    }
}
