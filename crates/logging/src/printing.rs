//! String helpers: print-style joining, time formats and container summaries.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use serde_json::{Map, Value};

use crate::error::{FormatError, FormatErrorKind};
use crate::format::template_format;
use crate::pretty::repr::print_repr;

/// Joins `values` the way `print` would: strings as-is, everything else in
/// its single-line representation.
///
/// ```
/// use finelog::print_join;
/// use serde_json::json;
///
/// assert_eq!(print_join(&[json!("a"), json!(1), json!({"k": null})], " "), "a 1 {\"k\": null}");
/// ```
#[must_use]
pub fn print_join(values: &[Value], sep: &str) -> String {
    values.iter().map(print_repr).collect::<Vec<_>>().join(sep)
}

/// Alias tokens and their strftime expansions, applied in this order.
const TIME_ALIASES: [(&str, &str); 11] = [
    ("MDY", "%m-%d-%y"),
    ("YMD", "%y-%m-%d"),
    ("DMY", "%d-%m-%y"),
    ("YDM", "%y-%d-%m"),
    ("MY", "%m-%y"),
    ("YM", "%y-%m"),
    ("MD", "%m-%d"),
    ("DM", "%d-%m"),
    ("HMS", "%H:%M:%S"),
    ("HM", "%H:%M"),
    ("MS", "%M:%S"),
];

/// Default time format for `{asctime}`: `2024-05-01 13:45:10,123`.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Expands date/time alias tokens into a strftime pattern.
///
/// `M`, `D`, `Y` combine into dash-separated dates (`MDY`, `YMD`, `DM`, ...)
/// and `H`, `M`, `S` into colon-separated times (`HMS`, `HM`, `MS`). A format
/// that already contains `%` is returned untouched.
///
/// ```
/// use finelog::expand_time_format;
///
/// assert_eq!(expand_time_format("MDY HMS"), "%m-%d-%y %H:%M:%S");
/// assert_eq!(expand_time_format("HM@MD"), "%H:%M@%m-%d");
/// assert_eq!(expand_time_format("%Y"), "%Y");
/// ```
#[must_use]
pub fn expand_time_format(format: &str) -> Cow<'_, str> {
    if format.contains('%') {
        return Cow::Borrowed(format);
    }
    let mut expanded = Cow::Borrowed(format);
    for (alias, pattern) in TIME_ALIASES {
        if expanded.contains(alias) {
            expanded = Cow::Owned(expanded.replace(alias, pattern));
        }
    }
    expanded
}

/// Checks that every directive in a strftime pattern is understood.
pub fn validate_time_format(format: &str) -> Result<(), FormatError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(FormatError::new(
            FormatErrorKind::TimeFormat,
            format!("invalid time format {format:?}"),
        ));
    }
    Ok(())
}

/// Formats `time` with a strftime pattern (aliases are not expanded).
pub fn format_time<Tz>(time: &DateTime<Tz>, format: &str) -> Result<String, FormatError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    validate_time_format(format)?;
    let mut out = String::new();
    write!(out, "{}", time.format(format)).map_err(|_| {
        FormatError::new(
            FormatErrorKind::TimeFormat,
            format!("cannot render time with {format:?}"),
        )
    })?;
    Ok(out)
}

/// The current local time rendered with `format`, after alias expansion.
pub fn time_to_string(format: &str) -> Result<String, FormatError> {
    format_time(&Local::now(), &expand_time_format(format))
}

/// A duration in seconds as `H:MM:SS`, with a day count and microseconds
/// when present: `1 day, 2:03:04.500000`.
///
/// ```
/// use finelog::seconds_to_string;
///
/// assert_eq!(seconds_to_string(3725.0), "1:02:05");
/// assert_eq!(seconds_to_string(90061.5), "1 day, 1:01:01.500000");
/// ```
#[must_use]
pub fn seconds_to_string(seconds: f64) -> String {
    let negative = seconds < 0.0;
    let total_micros = (seconds.abs() * 1_000_000.0).round() as u64;
    let micros = total_micros % 1_000_000;
    let whole = total_micros / 1_000_000;
    let days = whole / 86_400;
    let hours = whole % 86_400 / 3_600;
    let minutes = whole % 3_600 / 60;
    let secs = whole % 60;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days > 0 {
        let _ = write!(out, "{days} day{}, ", if days == 1 { "" } else { "s" });
    }
    let _ = write!(out, "{hours}:{minutes:02}:{secs:02}");
    if micros > 0 {
        let _ = write!(out, ".{micros:06}");
    }
    out
}

/// Layout for [`dict_to_string`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictStyle<'a> {
    /// Placed between key and value, surrounded by single spaces.
    pub sep: &'a str,
    /// Placed between entries.
    pub item_sep: &'a str,
    /// Format spec applied to each key.
    pub key_format: &'a str,
    /// Format spec applied to each value.
    pub value_format: &'a str,
    /// Opening and closing text.
    pub enclose: (&'a str, &'a str),
}

impl Default for DictStyle<'_> {
    fn default() -> Self {
        Self {
            sep: "=",
            item_sep: ", ",
            key_format: "",
            value_format: "",
            enclose: ("{", "}"),
        }
    }
}

/// Renders a mapping as `{key = value, ...}`.
///
/// ```
/// use finelog::{dict_to_string, DictStyle};
/// use serde_json::json;
///
/// let map = json!({"a": 1, "b": 2.5});
/// let text = dict_to_string(map.as_object().unwrap(), &DictStyle { value_format: ".2f", ..DictStyle::default() })?;
/// assert_eq!(text, "{a = 1.00, b = 2.50}");
/// # Ok::<(), finelog::FormatError>(())
/// ```
pub fn dict_to_string(map: &Map<String, Value>, style: &DictStyle<'_>) -> Result<String, FormatError> {
    let item_template = format!("{{:{}}} {} {{:{}}}", style.key_format, style.sep, style.value_format);
    let items = map
        .iter()
        .map(|(key, value)| {
            template_format(&item_template, &[Value::String(key.clone()), value.clone()], &Map::new())
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("{}{}{}", style.enclose.0, items.join(style.item_sep), style.enclose.1))
}

/// Renders a sequence as `[a, b, ...]`, applying `item_format` to each item.
///
/// ```
/// use finelog::list_to_string;
/// use serde_json::json;
///
/// assert_eq!(list_to_string(&[json!(1), json!(22)], ", ", ">3", ("<", ">"))?, "<  1,  22>");
/// # Ok::<(), finelog::FormatError>(())
/// ```
pub fn list_to_string(
    items: &[Value],
    sep: &str,
    item_format: &str,
    enclose: (&str, &str),
) -> Result<String, FormatError> {
    let item_template = format!("{{:{item_format}}}");
    let rendered = items
        .iter()
        .map(|item| template_format(&item_template, std::slice::from_ref(item), &Map::new()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("{}{}{}", enclose.0, rendered.join(sep), enclose.1))
}

/// An error followed by its `source()` chain, one cause per line.
///
/// ```
/// use finelog::exception_to_string;
/// use std::io;
///
/// let err = io::Error::new(io::ErrorKind::Other, "disk on fire");
/// assert_eq!(exception_to_string(&err), "disk on fire");
/// ```
#[must_use]
pub fn exception_to_string(error: &(dyn StdError + '_)) -> String {
    let mut out = error.to_string();
    let mut source = error.source();
    if source.is_some() {
        out.push_str("\n\nCaused by:");
    }
    let mut index = 0;
    while let Some(cause) = source {
        let _ = write!(out, "\n    {index}: {cause}");
        index += 1;
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn aliases_expand_in_declared_order() {
        assert_eq!(expand_time_format("YMD"), "%y-%m-%d");
        assert_eq!(expand_time_format("time: YMD MS"), "time: %y-%m-%d %M:%S");
        assert_eq!(expand_time_format("DM HM"), "%d-%m %H:%M");
        assert_eq!(expand_time_format("dhm"), "dhm");
    }

    #[test]
    fn percent_patterns_pass_through() {
        assert!(matches!(expand_time_format("%H:%M MD"), Cow::Borrowed("%H:%M MD")));
    }

    #[test]
    fn invalid_strftime_directives_are_rejected() {
        assert!(validate_time_format("%Y-%m-%d").is_ok());
        let err = validate_time_format("%Q").unwrap_err();
        assert_eq!(err.kind(), FormatErrorKind::TimeFormat);
    }

    #[test]
    fn format_time_renders_fixed_instant() {
        let time = chrono::Utc.with_ymd_and_hms(2018, 12, 25, 16, 38, 5).unwrap();
        assert_eq!(format_time(&time, &expand_time_format("MDY HMS")).unwrap(), "12-25-18 16:38:05");
    }

    #[test]
    fn seconds_cover_days_and_fractions() {
        assert_eq!(seconds_to_string(0.0), "0:00:00");
        assert_eq!(seconds_to_string(59.25), "0:00:59.250000");
        assert_eq!(seconds_to_string(2.0 * 86_400.0), "2 days, 0:00:00");
    }

    #[test]
    fn dict_to_string_uses_custom_layout() {
        let map = json!({"x": "a", "y": "b"});
        let style = DictStyle {
            sep: ":",
            item_sep: "; ",
            key_format: ">2",
            enclose: ("(", ")"),
            ..DictStyle::default()
        };
        assert_eq!(dict_to_string(map.as_object().unwrap(), &style).unwrap(), "( x : a;  y : b)");
    }

    #[test]
    fn exception_chain_lists_causes() {
        #[derive(Debug, thiserror::Error)]
        #[error("load failed")]
        struct Outer(#[source] std::io::Error);

        let err = Outer(std::io::Error::other("missing file"));
        assert_eq!(exception_to_string(&err), "load failed\n\nCaused by:\n    0: missing file");
    }
}
