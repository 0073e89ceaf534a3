use serde_json::{Map, Value};

use super::spec::FormatSpec;
use crate::error::{FormatError, FormatErrorKind};
use crate::pretty::repr;

/// Nested replacement fields inside a spec may themselves nest once more.
const MAX_NESTING: u8 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Numbering {
    Unset,
    Automatic(usize),
    Manual,
}

struct Renderer<'v> {
    positional: &'v [Value],
    named: &'v Map<String, Value>,
    numbering: Numbering,
    /// Only check structure and numbering; never look values up.
    validate_only: bool,
}

/// Substitutes `positional` and `named` values into a `{}`-style template.
///
/// Supports `{{`/`}}` escapes, automatic (`{}`) and explicit (`{0}`)
/// numbering, named fields (`{name}`), `.key`/`[index]` accessors, the `!s`
/// and `!r` conversions, nested fields inside the spec (`{:>{width}}`), and
/// the `[[fill]align][sign][#][0][width][,|_][.precision][type]` spec.
///
/// ```
/// use finelog::template_format;
/// use serde_json::{json, Map};
///
/// let mut named = Map::new();
/// named.insert("planet".into(), json!("Mars"));
/// let text = template_format("{} people on {planet} ({:.1f}%)", &[json!(3), json!(12.25)], &named)?;
/// assert_eq!(text, "3 people on Mars (12.2%)");
/// # Ok::<(), finelog::FormatError>(())
/// ```
pub fn template_format(
    template: &str,
    positional: &[Value],
    named: &Map<String, Value>,
) -> Result<String, FormatError> {
    Renderer {
        positional,
        named,
        numbering: Numbering::Unset,
        validate_only: false,
    }
    .render(template, 0)
}

/// Checks that `template` is well formed without substituting anything.
pub fn validate_template(template: &str) -> Result<(), FormatError> {
    let empty = Map::new();
    Renderer {
        positional: &[],
        named: &empty,
        numbering: Numbering::Unset,
        validate_only: true,
    }
    .render(template, 0)
    .map(drop)
}

impl Renderer<'_> {
    fn render(&mut self, template: &str, nesting: u8) -> Result<String, FormatError> {
        if nesting > MAX_NESTING {
            return Err(FormatError::syntax("Max string recursion exceeded"));
        }
        let mut out = String::with_capacity(template.len());
        let mut chars = template.char_indices().peekable();

        while let Some((index, c)) = chars.next() {
            match c {
                '{' if chars.next_if(|&(_, next)| next == '{').is_some() => out.push('{'),
                '{' => {
                    let start = index + c.len_utf8();
                    let mut open = 1usize;
                    let mut end = None;
                    for (position, inner) in chars.by_ref() {
                        match inner {
                            '{' => open += 1,
                            '}' => {
                                open -= 1;
                                if open == 0 {
                                    end = Some(position);
                                    break;
                                }
                            }
                            _ => {}
                        }
                    }
                    let end = end.ok_or_else(|| {
                        FormatError::syntax("expected '}' before end of string")
                    })?;
                    let field = &template[start..end];
                    out.push_str(&self.render_field(field, nesting)?);
                }
                '}' if chars.next_if(|&(_, next)| next == '}').is_some() => out.push('}'),
                '}' => {
                    return Err(FormatError::syntax(
                        "Single '}' encountered in format string",
                    ));
                }
                _ => out.push(c),
            }
        }
        Ok(out)
    }

    fn render_field(&mut self, field: &str, nesting: u8) -> Result<String, FormatError> {
        let (name, conversion, spec) = split_field(field)?;
        let value = self.resolve(name)?;
        let value = match conversion {
            None => value,
            Some('s') => Value::String(repr::print_repr(&value)),
            Some('r' | 'a') => Value::String(repr::repr(&value)),
            Some(other) => {
                return Err(FormatError::syntax(format!(
                    "Unknown conversion specifier {other}"
                )));
            }
        };

        let spec = if spec.contains('{') {
            self.render(spec, nesting + 1)?
        } else {
            spec.to_owned()
        };
        let spec = FormatSpec::parse(&spec)?;
        if self.validate_only {
            return Ok(String::new());
        }
        spec.apply(&value)
    }

    fn resolve(&mut self, name: &str) -> Result<Value, FormatError> {
        let split = name.find(['.', '[']).unwrap_or(name.len());
        let (base, accessors) = name.split_at(split);

        let root = if base.is_empty() {
            let index = match self.numbering {
                Numbering::Manual => {
                    return Err(FormatError::new(
                        FormatErrorKind::MixedNumbering,
                        "cannot switch from manual field specification to automatic field numbering",
                    ));
                }
                Numbering::Unset => 0,
                Numbering::Automatic(next) => next,
            };
            self.numbering = Numbering::Automatic(index + 1);
            self.positional_at(index)?
        } else if base.bytes().all(|b| b.is_ascii_digit()) {
            if matches!(self.numbering, Numbering::Automatic(_)) {
                return Err(FormatError::new(
                    FormatErrorKind::MixedNumbering,
                    "cannot switch from automatic field numbering to manual field specification",
                ));
            }
            self.numbering = Numbering::Manual;
            let index = base
                .parse::<usize>()
                .map_err(|_| FormatError::syntax(format!("Too many decimal digits in {base:?}")))?;
            self.positional_at(index)?
        } else if self.validate_only {
            Value::Null
        } else {
            self.named.get(base).cloned().ok_or_else(|| {
                FormatError::new(
                    FormatErrorKind::MissingNamed,
                    format!("missing named argument {base:?}"),
                )
            })?
        };

        if self.validate_only {
            parse_accessors(accessors)?;
            return Ok(Value::Null);
        }
        parse_accessors(accessors)?
            .into_iter()
            .try_fold(root, |value, accessor| accessor.apply(value, name))
    }

    fn positional_at(&self, index: usize) -> Result<Value, FormatError> {
        if self.validate_only {
            return Ok(Value::Null);
        }
        self.positional.get(index).cloned().ok_or_else(|| {
            FormatError::new(
                FormatErrorKind::MissingPositional(index),
                format!("{} positional argument(s) given", self.positional.len()),
            )
        })
    }
}

/// Splits `name!conversion:spec`; `:` and `!` inside `[...]` belong to the name.
fn split_field(field: &str) -> Result<(&str, Option<char>, &str), FormatError> {
    let mut in_brackets = false;
    let mut name_end = field.len();
    for (index, c) in field.char_indices() {
        match c {
            '[' => in_brackets = true,
            ']' => in_brackets = false,
            '!' | ':' if !in_brackets => {
                name_end = index;
                break;
            }
            _ => {}
        }
    }
    let (name, rest) = field.split_at(name_end);

    if let Some(after_bang) = rest.strip_prefix('!') {
        let mut chars = after_bang.chars();
        let conversion = chars
            .next()
            .ok_or_else(|| FormatError::syntax("end of string while looking for conversion specifier"))?;
        let remainder = chars.as_str();
        let spec = if remainder.is_empty() {
            ""
        } else {
            remainder.strip_prefix(':').ok_or_else(|| {
                FormatError::syntax("expected ':' after conversion specifier")
            })?
        };
        Ok((name, Some(conversion), spec))
    } else {
        Ok((name, None, rest.strip_prefix(':').unwrap_or(rest)))
    }
}

enum Accessor<'a> {
    Key(&'a str),
    Index(&'a str),
}

impl Accessor<'_> {
    fn apply(&self, value: Value, field: &str) -> Result<Value, FormatError> {
        let missing = || {
            FormatError::new(
                FormatErrorKind::MissingNamed,
                format!("field {field:?} does not resolve to a value"),
            )
        };
        match (self, value) {
            (Self::Index(key), Value::Array(mut items)) => {
                let position: usize = key.parse().map_err(|_| missing())?;
                if position < items.len() {
                    Ok(items.swap_remove(position))
                } else {
                    Err(missing())
                }
            }
            (Self::Key(key) | Self::Index(key), Value::Object(mut map)) => {
                map.remove(*key).ok_or_else(missing)
            }
            _ => Err(missing()),
        }
    }
}

fn parse_accessors(mut rest: &str) -> Result<Vec<Accessor<'_>>, FormatError> {
    let mut accessors = Vec::new();
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('.') {
            let end = after.find(['.', '[']).unwrap_or(after.len());
            if end == 0 {
                return Err(FormatError::syntax("Empty attribute in format string"));
            }
            accessors.push(Accessor::Key(&after[..end]));
            rest = &after[end..];
        } else if let Some(after) = rest.strip_prefix('[') {
            let end = after
                .find(']')
                .ok_or_else(|| FormatError::syntax("Missing ']' in format string"))?;
            if end == 0 {
                return Err(FormatError::syntax("Empty attribute in format string"));
            }
            accessors.push(Accessor::Index(&after[..end]));
            rest = &after[end + 1..];
        } else {
            return Err(FormatError::syntax(
                "Only '.' or '[' may follow ']' in format field specifier",
            ));
        }
    }
    Ok(accessors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn positional(template: &str, values: &[Value]) -> Result<String, FormatError> {
        template_format(template, values, &Map::new())
    }

    #[test]
    fn escapes_render_single_braces() {
        assert_eq!(positional("{{}} {}", &[json!(1)]).unwrap(), "{} 1");
    }

    #[test]
    fn automatic_and_manual_numbering() {
        assert_eq!(positional("{} {}", &[json!("a"), json!("b")]).unwrap(), "a b");
        assert_eq!(positional("{1} {0} {1}", &[json!("a"), json!("b")]).unwrap(), "b a b");
    }

    #[test]
    fn mixing_numbering_fails() {
        let err = positional("{} {0}", &[json!(1)]).unwrap_err();
        assert_eq!(err.kind(), FormatErrorKind::MixedNumbering);
        let err = positional("{0} {}", &[json!(1)]).unwrap_err();
        assert_eq!(err.kind(), FormatErrorKind::MixedNumbering);
    }

    #[test]
    fn missing_arguments_fail() {
        let err = positional("{} {}", &[json!(1)]).unwrap_err();
        assert_eq!(err.kind(), FormatErrorKind::MissingPositional(1));
        let err = positional("{who}", &[]).unwrap_err();
        assert_eq!(err.kind(), FormatErrorKind::MissingNamed);
    }

    #[test]
    fn unbalanced_braces_fail() {
        for template in ["{", "}", "a } b", "{0"] {
            let err = positional(template, &[json!(1)]).unwrap_err();
            assert_eq!(err.kind(), FormatErrorKind::Syntax, "{template}");
        }
    }

    #[test]
    fn conversions_quote_strings() {
        assert_eq!(positional("{!r}", &[json!("hi")]).unwrap(), "\"hi\"");
        assert_eq!(positional("{!s:>4}", &[json!("hi")]).unwrap(), "  hi");
        assert!(positional("{!x}", &[json!("hi")]).is_err());
        assert!(positional("{!rr}", &[json!("hi")]).is_err());
    }

    #[test]
    fn nested_spec_fields_are_substituted() {
        let mut named = Map::new();
        named.insert("width".into(), json!(6));
        named.insert("value".into(), json!(3.14159));
        let text = template_format("[{value:>{width}.2f}]", &[], &named).unwrap();
        assert_eq!(text, "[  3.14]");
    }

    #[test]
    fn accessors_walk_objects_and_arrays() {
        let data = json!({"user": {"name": "ada"}, "tags": ["x", "y"]});
        assert_eq!(positional("{0.user.name} {0[tags][1]}", &[data]).unwrap(), "ada y");
        assert!(positional("{0[missing]}", &[json!({})]).is_err());
    }

    #[test]
    fn containers_render_inline() {
        let text = positional("{} {}", &[json!({"a": 1}), json!([1, "b"])]).unwrap();
        assert_eq!(text, "{\"a\": 1} [1, \"b\"]");
    }

    #[test]
    fn validate_checks_structure_only() {
        assert!(validate_template("{asctime} {levelname}> {message}").is_ok());
        assert!(validate_template("{message:>{width}}").is_ok());
        assert!(validate_template("{message").is_err());
        assert!(validate_template("{} {0}").is_err());
    }
}
