//! Width-driven pretty printer.
//!
//! A container is written inline when its representation fits in the space
//! left on the current line. Otherwise its items go one per line, aligned
//! under the first item. With `compact` set, short sequence items are packed
//! several to a line.

use serde_json::{Map, Value};

use super::PrettyConfig;
use super::repr::{limited_repr, sorted_entries, string_repr};

pub(crate) fn format(value: &Value, config: &PrettyConfig) -> String {
    let mut out = String::new();
    Printer { config }.format(value, &mut out, 0, 0, 0);
    out
}

fn spaces(count: usize) -> String {
    " ".repeat(count)
}

fn width_of(text: &str) -> isize {
    text.chars().count() as isize
}

struct Printer<'c> {
    config: &'c PrettyConfig,
}

impl Printer<'_> {
    fn repr(&self, value: &Value, level: usize) -> String {
        limited_repr(value, self.config.depth, level)
    }

    /// Writes `value` starting at column `indent`, keeping `allowance`
    /// columns free at the end of its last line for closing delimiters.
    fn format(&self, value: &Value, out: &mut String, indent: usize, allowance: usize, level: usize) {
        let rep = self.repr(value, level);
        let max_width = self.config.width as isize - indent as isize - allowance as isize;
        if width_of(&rep) > max_width {
            match value {
                Value::Object(map) => return self.write_object(map, out, indent, allowance, level + 1),
                Value::Array(items) => return self.write_array(items, out, indent, allowance, level + 1),
                _ => {}
            }
        }
        out.push_str(&rep);
    }

    fn write_object(
        &self,
        map: &Map<String, Value>,
        out: &mut String,
        indent: usize,
        allowance: usize,
        level: usize,
    ) {
        out.push('{');
        if self.config.indent > 1 {
            out.push_str(&spaces(self.config.indent - 1));
        }
        if !map.is_empty() {
            self.write_entries(map, out, indent, allowance + 1, level);
        }
        out.push('}');
    }

    fn write_entries(
        &self,
        map: &Map<String, Value>,
        out: &mut String,
        indent: usize,
        allowance: usize,
        level: usize,
    ) {
        let indent = indent + self.config.indent;
        let newline_delimiter = format!(",\n{}", spaces(indent));
        let entries = sorted_entries(map);
        let last_index = entries.len() - 1;
        for (index, (key, entry)) in entries.into_iter().enumerate() {
            let last = index == last_index;
            let key_repr = string_repr(key);
            out.push_str(&key_repr);
            out.push_str(": ");
            self.format(
                entry,
                out,
                indent + key_repr.chars().count() + 2,
                if last { allowance } else { 1 },
                level,
            );
            if !last {
                out.push_str(&newline_delimiter);
            }
        }
    }

    fn write_array(&self, items: &[Value], out: &mut String, indent: usize, allowance: usize, level: usize) {
        out.push('[');
        self.write_items(items, out, indent, allowance + 1, level);
        out.push(']');
    }

    fn write_items(&self, items: &[Value], out: &mut String, indent: usize, allowance: usize, level: usize) {
        let indent = indent + self.config.indent;
        if self.config.indent > 1 {
            out.push_str(&spaces(self.config.indent - 1));
        }
        let newline_delimiter = format!(",\n{}", spaces(indent));
        let mut delimiter = String::new();
        let mut max_width = self.config.width as isize - indent as isize + 1;
        let mut width = max_width;

        for (index, item) in items.iter().enumerate() {
            let last = index + 1 == items.len();
            if last {
                max_width -= allowance as isize;
                width -= allowance as isize;
            }
            if self.config.compact {
                let rep = self.repr(item, level);
                let needed = width_of(&rep) + 2;
                if width < needed {
                    width = max_width;
                    if !delimiter.is_empty() {
                        delimiter.clone_from(&newline_delimiter);
                    }
                }
                if width >= needed {
                    width -= needed;
                    out.push_str(&delimiter);
                    delimiter = ", ".to_owned();
                    out.push_str(&rep);
                    continue;
                }
            }
            out.push_str(&delimiter);
            delimiter.clone_from(&newline_delimiter);
            self.format(item, out, indent, if last { allowance } else { 1 }, level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pretty::Depth;
    use serde_json::json;

    fn config(width: usize) -> PrettyConfig {
        PrettyConfig {
            width,
            ..PrettyConfig::DEFAULT
        }
    }

    #[test]
    fn fitting_values_stay_inline() {
        let value = json!({"b": [1, 2], "a": "x"});
        assert_eq!(format(&value, &PrettyConfig::DEFAULT), "{\"a\": \"x\", \"b\": [1, 2]}");
    }

    #[test]
    fn wide_lists_break_one_item_per_line() {
        let value = json!(["alpha", "bravo", "charlie"]);
        assert_eq!(
            format(&value, &config(12)),
            "[\"alpha\",\n \"bravo\",\n \"charlie\"]"
        );
    }

    #[test]
    fn wide_objects_align_values_after_keys() {
        let value = json!({"key": [1, 2, 3], "other": 1});
        assert_eq!(
            format(&value, &config(20)),
            "{\"key\": [1, 2, 3],\n \"other\": 1}"
        );
    }

    #[test]
    fn nested_values_break_recursively() {
        let value = json!({"k": ["aaaa", "bbbb"]});
        assert_eq!(
            format(&value, &config(14)),
            "{\"k\": [\"aaaa\",\n       \"bbbb\"]}"
        );
    }

    #[test]
    fn compact_packs_short_items() {
        let value = json!([1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        let compact = PrettyConfig {
            width: 12,
            compact: true,
            ..PrettyConfig::DEFAULT
        };
        assert_eq!(
            format(&value, &compact),
            "[1, 2, 3, 4,\n 5, 6, 7, 8,\n 9, 10]"
        );
    }

    #[test]
    fn larger_indent_pads_after_opening_bracket() {
        let value = json!(["alpha", "bravo"]);
        let indented = PrettyConfig {
            width: 10,
            indent: 2,
            ..PrettyConfig::DEFAULT
        };
        assert_eq!(format(&value, &indented), "[ \"alpha\",\n  \"bravo\"]");
    }

    #[test]
    fn depth_limit_collapses_nested_containers() {
        let value = json!([[1, [2]], 3]);
        let limited = PrettyConfig {
            depth: Depth::Limit(1),
            ..PrettyConfig::DEFAULT
        };
        assert_eq!(format(&value, &limited), "[[...], 3]");
    }
}
