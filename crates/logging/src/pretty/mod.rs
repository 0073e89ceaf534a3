//! Pretty-printing of logged values.
//!
//! Two backends are available: [`PrettyBackend::Builtin`], a width-driven
//! printer that keeps containers inline while they fit, and
//! [`PrettyBackend::ThirdParty`] (the default), which hands wide values to
//! serde_json's pretty formatter. The process-wide default printer is
//! adjusted with [`set_pretty_config`] and [`set_pretty_backend`]; callers
//! that need isolation build their own [`PrettyPrinter`].

mod builtin;
pub(crate) mod repr;
mod third_party;

use std::fmt;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, FormatError};
use crate::format::{Args, template_format};

/// How deep nested containers are expanded before being elided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Depth {
    /// Expand every level.
    #[default]
    Unlimited,
    /// Containers nested this many levels deep (or deeper) are elided.
    Limit(usize),
}

impl Depth {
    pub(crate) const fn exceeded(self, level: usize) -> bool {
        match self {
            Self::Unlimited => false,
            Self::Limit(limit) => level >= limit,
        }
    }
}

impl From<Option<usize>> for Depth {
    fn from(depth: Option<usize>) -> Self {
        depth.map_or(Self::Unlimited, Self::Limit)
    }
}

/// Layout parameters shared by both backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PrettyConfig {
    /// Spaces added per nesting level.
    pub indent: usize,
    /// Target line width.
    pub width: usize,
    /// Nesting limit.
    pub depth: Depth,
    /// Pack short sequence items onto shared lines (builtin) or keep the
    /// whole value on one line (third-party).
    pub compact: bool,
}

impl PrettyConfig {
    /// `indent = 1`, `width = 80`, unlimited depth, not compact.
    pub const DEFAULT: Self = Self {
        indent: 1,
        width: 80,
        depth: Depth::Unlimited,
        compact: false,
    };

    /// Returns a copy with every field set in `options` replaced.
    #[must_use]
    pub fn merged(mut self, options: &PrettyOptions) -> Self {
        if let Some(indent) = options.indent {
            self.indent = indent;
        }
        if let Some(width) = options.width {
            self.width = width;
        }
        if let Some(depth) = options.depth {
            self.depth = depth;
        }
        if let Some(compact) = options.compact {
            self.compact = compact;
        }
        self
    }
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Partial [`PrettyConfig`]; unset fields fall back to the printer's own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PrettyOptions {
    /// Indent override.
    pub indent: Option<usize>,
    /// Width override.
    pub width: Option<usize>,
    /// Depth override.
    pub depth: Option<Depth>,
    /// Compact override.
    pub compact: Option<bool>,
}

impl PrettyOptions {
    /// Options that override nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indent override.
    pub const fn indent(mut self, indent: usize) -> Self {
        self.indent = Some(indent);
        self
    }

    /// Sets the width override.
    pub const fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the depth override.
    pub const fn depth(mut self, depth: Depth) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Sets the compact override.
    pub const fn compact(mut self, compact: bool) -> Self {
        self.compact = Some(compact);
        self
    }
}

/// Which pretty-print algorithm renders containers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrettyBackend {
    /// Width-driven printer with sorted keys and `[...]` depth elision.
    Builtin,
    /// serde_json's pretty formatter.
    #[default]
    #[serde(alias = "third_party")]
    ThirdParty,
}

impl PrettyBackend {
    /// Lower-case name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Builtin => "builtin",
            Self::ThirdParty => "thirdparty",
        }
    }
}

impl fmt::Display for PrettyBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrettyBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "builtin" => Ok(Self::Builtin),
            "thirdparty" | "third_party" | "third-party" => Ok(Self::ThirdParty),
            _ => Err(Error::UnsupportedBackend(s.to_owned())),
        }
    }
}

/// A backend together with its layout.
///
/// ```
/// use finelog::{PrettyBackend, PrettyConfig, PrettyPrinter};
/// use serde_json::json;
///
/// let printer = PrettyPrinter::new(PrettyBackend::Builtin, PrettyConfig { width: 12, ..PrettyConfig::DEFAULT });
/// assert_eq!(printer.format(&json!(["alpha", "bravo"]))?, "[\"alpha\",\n \"bravo\"]");
/// assert_eq!(printer.format(&json!("left alone"))?, "left alone");
/// # Ok::<(), finelog::FormatError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PrettyPrinter {
    backend: PrettyBackend,
    config: PrettyConfig,
}

static GLOBAL_PRINTER: RwLock<PrettyPrinter> = RwLock::new(PrettyPrinter::DEFAULT);

impl PrettyPrinter {
    /// Third-party backend with [`PrettyConfig::DEFAULT`].
    pub const DEFAULT: Self = Self {
        backend: PrettyBackend::ThirdParty,
        config: PrettyConfig::DEFAULT,
    };

    /// Creates a printer.
    #[must_use]
    pub const fn new(backend: PrettyBackend, config: PrettyConfig) -> Self {
        Self { backend, config }
    }

    /// Snapshot of the process-wide printer.
    #[must_use]
    pub fn global() -> Self {
        *GLOBAL_PRINTER.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// The backend.
    #[must_use]
    pub const fn backend(&self) -> PrettyBackend {
        self.backend
    }

    /// The layout.
    #[must_use]
    pub const fn config(&self) -> &PrettyConfig {
        &self.config
    }

    /// Returns a copy with `options` layered over this printer's layout.
    #[must_use]
    pub fn with_options(&self, options: &PrettyOptions) -> Self {
        Self {
            backend: self.backend,
            config: self.config.merged(options),
        }
    }

    /// Renders `value`. Strings are returned unchanged.
    pub fn format(&self, value: &Value) -> Result<String, FormatError> {
        match value {
            Value::String(text) => Ok(text.clone()),
            other => match self.backend {
                PrettyBackend::Builtin => Ok(builtin::format(other, &self.config)),
                PrettyBackend::ThirdParty => third_party::format(other, &self.config),
            },
        }
    }

    /// Renders `value` for template substitution: strings, and numbers when
    /// `leave_numbers` is set, stay as they are so the template's spec can
    /// still format them.
    pub fn format_value(&self, value: Value, leave_numbers: bool) -> Result<Value, FormatError> {
        match value {
            Value::String(_) => Ok(value),
            Value::Number(_) if leave_numbers => Ok(value),
            other => self.format(&other).map(Value::String),
        }
    }

    /// Pretty-prints each positional value and joins them with the call's
    /// separator.
    pub fn render_print(&self, args: &Args<'_>) -> Result<String, FormatError> {
        let printer = self.with_options(args.pretty_options());
        let rendered = args
            .positional_values()?
            .iter()
            .map(|value| printer.format(value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rendered.join(args.separator()))
    }

    /// Pretty-prints every value (numbers excepted) and substitutes the
    /// results into `template`.
    pub fn render_template(&self, template: &str, args: &Args<'_>) -> Result<String, FormatError> {
        let printer = self.with_options(args.pretty_options());
        let positional = args
            .positional_values()?
            .into_iter()
            .map(|value| printer.format_value(value, true))
            .collect::<Result<Vec<_>, _>>()?;
        let named = args
            .named_values()?
            .into_iter()
            .map(|(name, value)| Ok((name, printer.format_value(value, true)?)))
            .collect::<Result<Map<_, _>, FormatError>>()?;
        template_format(template, &positional, &named)
    }
}

/// Pretty-formats one value with the process-wide printer and `options`.
///
/// Strings come back unchanged; numbers come back as numbers when
/// `leave_numbers` is set; everything else becomes a pretty-printed string.
pub fn pretty_format(
    value: Value,
    options: &PrettyOptions,
    leave_numbers: bool,
) -> Result<Value, FormatError> {
    PrettyPrinter::global()
        .with_options(options)
        .format_value(value, leave_numbers)
}

/// Updates the process-wide layout with the fields set in `options`.
pub fn set_pretty_config(options: &PrettyOptions) {
    let mut global = GLOBAL_PRINTER.write().unwrap_or_else(PoisonError::into_inner);
    global.config = global.config.merged(options);
    crate::tracing_macros::trace_config!("pretty-print config set to {:?}", global.config);
}

/// Selects the process-wide backend.
pub fn set_pretty_backend(backend: PrettyBackend) {
    GLOBAL_PRINTER
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .backend = backend;
    crate::tracing_macros::trace_config!("pretty-print backend set to {backend}");
}

/// The process-wide layout.
#[must_use]
pub fn pretty_config() -> PrettyConfig {
    PrettyPrinter::global().config
}

/// The process-wide backend.
#[must_use]
pub fn pretty_backend() -> PrettyBackend {
    PrettyPrinter::global().backend
}

/// Restores the process-wide printer to [`PrettyPrinter::DEFAULT`].
pub fn reset_pretty_config() {
    *GLOBAL_PRINTER.write().unwrap_or_else(PoisonError::into_inner) = PrettyPrinter::DEFAULT;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use serde_json::json;

    #[test]
    fn merged_only_replaces_set_fields() {
        let config = PrettyConfig::DEFAULT.merged(&PrettyOptions::new().width(40));
        assert_eq!(config.width, 40);
        assert_eq!(config.indent, 1);
        assert_eq!(config.depth, Depth::Unlimited);
    }

    #[test]
    fn backend_names_parse_case_insensitively() {
        assert_eq!("BuiltIn".parse::<PrettyBackend>().unwrap(), PrettyBackend::Builtin);
        assert_eq!("thirdparty".parse::<PrettyBackend>().unwrap(), PrettyBackend::ThirdParty);
        assert!(matches!(
            "rich".parse::<PrettyBackend>(),
            Err(Error::UnsupportedBackend(name)) if name == "rich"
        ));
    }

    #[test]
    fn format_value_leaves_numbers_when_asked() {
        let printer = PrettyPrinter::DEFAULT;
        assert_eq!(printer.format_value(json!(3.5), true).unwrap(), json!(3.5));
        assert_eq!(printer.format_value(json!(3.5), false).unwrap(), json!("3.5"));
        assert_eq!(printer.format_value(json!("s"), false).unwrap(), json!("s"));
    }

    #[test]
    fn render_template_keeps_number_specs_working() {
        let printer = PrettyPrinter::new(PrettyBackend::Builtin, PrettyConfig::DEFAULT);
        let text = printer
            .render_template("{:.2f} {}", &args![3.14159, [1, 2]])
            .unwrap();
        assert_eq!(text, "3.14 [1, 2]");
    }

    #[test]
    fn render_print_applies_call_overrides() {
        let printer = PrettyPrinter::new(PrettyBackend::Builtin, PrettyConfig::DEFAULT);
        let text = printer
            .render_print(&args!["list:", ["alpha", "bravo"]].width(12))
            .unwrap();
        assert_eq!(text, "list: [\"alpha\",\n \"bravo\"]");
    }

    #[test]
    fn depth_converts_from_option() {
        assert_eq!(Depth::from(None), Depth::Unlimited);
        assert_eq!(Depth::from(Some(2)), Depth::Limit(2));
    }
}
