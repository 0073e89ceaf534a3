use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::banner::BannerStyle;
use crate::error::{FormatError, FormatErrorKind};
use crate::pretty::{Depth, PrettyOptions};

/// A value that can be rendered into a log message.
///
/// Implemented for every [`Serialize`] type. Conversion into a
/// [`serde_json::Value`] happens only when a message is actually rendered.
pub trait Loggable {
    /// Serializes the value into the formatting data model.
    fn to_value(&self) -> Result<Value, FormatError>;
}

impl<T: Serialize + ?Sized> Loggable for T {
    fn to_value(&self) -> Result<Value, FormatError> {
        serde_json::to_value(self)
            .map_err(|err| FormatError::new(FormatErrorKind::Conversion, err.to_string()))
    }
}

/// The arguments of a single log call.
///
/// `Args` holds positional values, named values and the per-call rendering
/// options (print separator, banner style, pretty-print overrides). Values are
/// kept type-erased and untouched until the logger has decided the record is
/// enabled, so building `Args` for a suppressed level costs only the boxing.
///
/// Most calls build `Args` with the [`args!`](crate::args) macro or pass a
/// bare `&str`:
///
/// ```
/// use finelog::args;
///
/// let plain = args!["Hello", "World"];
/// let named = args!["x"; planet = "Mars", count = 3].sep(", ");
/// assert_eq!(plain.len(), 2);
/// assert_eq!(named.separator(), ", ");
/// ```
#[derive(Default)]
pub struct Args<'a> {
    positional: Vec<Box<dyn Loggable + 'a>>,
    named: Vec<(Cow<'a, str>, Box<dyn Loggable + 'a>)>,
    sep: Option<Cow<'a, str>>,
    banner: BannerStyle,
    pretty: PrettyOptions,
}

impl<'a> Args<'a> {
    /// Creates an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional value.
    pub fn arg<T: Serialize + 'a>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    /// Appends a named value used by `{name}` template fields.
    pub fn named<T: Serialize + 'a>(mut self, name: impl Into<Cow<'a, str>>, value: T) -> Self {
        self.push_named(name, value);
        self
    }

    /// Appends a positional value in place.
    pub fn push<T: Serialize + 'a>(&mut self, value: T) {
        self.positional.push(Box::new(value));
    }

    /// Appends a named value in place.
    pub fn push_named<T: Serialize + 'a>(&mut self, name: impl Into<Cow<'a, str>>, value: T) {
        self.named.push((name.into(), Box::new(value)));
    }

    /// Sets the separator placed between positional values (default `" "`).
    pub fn sep(mut self, sep: impl Into<Cow<'a, str>>) -> Self {
        self.sep = Some(sep.into());
        self
    }

    /// Replaces the banner style used by the banner operations.
    pub fn banner_style(mut self, style: BannerStyle) -> Self {
        self.banner = style;
        self
    }

    /// Sets the banner fill symbol.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.banner = self.banner.symbol(symbol);
        self
    }

    /// Sets the banner width (the half-fill is `width / 2` symbols).
    pub fn banner_width(mut self, width: usize) -> Self {
        self.banner = self.banner.width(width);
        self
    }

    /// Sets the total number of banner lines.
    pub fn banner_lines(mut self, lines: usize) -> Self {
        self.banner = self.banner.lines(lines);
        self
    }

    /// Replaces the pretty-print overrides used by the `pp` operations.
    pub fn pretty(mut self, options: PrettyOptions) -> Self {
        self.pretty = options;
        self
    }

    /// Overrides the pretty-print indent for this call.
    pub fn indent(mut self, indent: usize) -> Self {
        self.pretty.indent = Some(indent);
        self
    }

    /// Overrides the pretty-print width for this call.
    pub fn width(mut self, width: usize) -> Self {
        self.pretty.width = Some(width);
        self
    }

    /// Limits the pretty-print nesting depth for this call.
    pub fn depth(mut self, depth: usize) -> Self {
        self.pretty.depth = Some(Depth::Limit(depth));
        self
    }

    /// Overrides pretty-print compact packing for this call.
    pub fn compact(mut self, compact: bool) -> Self {
        self.pretty.compact = Some(compact);
        self
    }

    /// The separator placed between positional values.
    #[must_use]
    pub fn separator(&self) -> &str {
        self.sep.as_deref().unwrap_or(" ")
    }

    /// The banner style for this call.
    #[must_use]
    pub const fn banner(&self) -> &BannerStyle {
        &self.banner
    }

    /// The pretty-print overrides for this call.
    #[must_use]
    pub const fn pretty_options(&self) -> &PrettyOptions {
        &self.pretty
    }

    /// Number of positional values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positional.len()
    }

    /// Reports whether there are no positional values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty()
    }

    /// Number of named values.
    #[must_use]
    pub fn named_len(&self) -> usize {
        self.named.len()
    }

    /// Serializes the positional values, in order.
    pub fn positional_values(&self) -> Result<Vec<Value>, FormatError> {
        self.positional.iter().map(|value| value.to_value()).collect()
    }

    /// Serializes the named values. Later duplicates replace earlier ones.
    pub fn named_values(&self) -> Result<Map<String, Value>, FormatError> {
        let mut map = Map::with_capacity(self.named.len());
        for (name, value) in &self.named {
            map.insert(name.clone().into_owned(), value.to_value()?);
        }
        Ok(map)
    }

    /// Splits off the first positional value, leaving the rest.
    pub(crate) fn split_first(mut self) -> Option<(Box<dyn Loggable + 'a>, Self)> {
        if self.positional.is_empty() {
            return None;
        }
        let first = self.positional.remove(0);
        Some((first, self))
    }
}

impl fmt::Debug for Args<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("positional", &self.positional.len())
            .field(
                "named",
                &self.named.iter().map(|(name, _)| name.as_ref()).collect::<Vec<_>>(),
            )
            .field("sep", &self.separator())
            .field("banner", &self.banner)
            .field("pretty", &self.pretty)
            .finish()
    }
}

impl<'a> From<&'a str> for Args<'a> {
    fn from(message: &'a str) -> Self {
        Self::new().arg(message)
    }
}

impl From<String> for Args<'_> {
    fn from(message: String) -> Self {
        Self::new().arg(message)
    }
}

impl From<()> for Args<'_> {
    fn from((): ()) -> Self {
        Self::new()
    }
}

/// Builds an [`Args`](crate::Args) list.
///
/// Positional values come first, separated by commas; named values follow a
/// `;` as `name = value` pairs. Every value must implement
/// [`serde::Serialize`].
///
/// ```
/// use finelog::args;
///
/// let empty = args![];
/// let positional = args!["count:", 3, [1, 2]];
/// let both = args!["{} on {planet}", 3; planet = "Mars"];
/// let named_only = args![; user = "ada"];
/// assert!(empty.is_empty());
/// assert_eq!(positional.len(), 3);
/// assert_eq!(both.named_len(), 1);
/// assert_eq!(named_only.len(), 0);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };
    ($($value:expr),* ; $($name:ident = $named:expr),+ $(,)?) => {
        $crate::Args::new()
            $(.arg($value))*
            $(.named(stringify!($name), $named))+
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Args::new()$(.arg($value))+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn values_serialize_in_order() {
        let args = Args::new().arg("a").arg(1).arg(vec![true, false]);
        assert_eq!(
            args.positional_values().unwrap(),
            vec![json!("a"), json!(1), json!([true, false])]
        );
    }

    #[test]
    fn later_named_values_win() {
        let args = Args::new().named("x", 1).named("x", 2);
        assert_eq!(args.named_values().unwrap()["x"], json!(2));
    }

    #[test]
    fn default_separator_is_space() {
        assert_eq!(Args::new().separator(), " ");
        assert_eq!(Args::new().sep("|").separator(), "|");
    }

    #[test]
    fn banner_overrides_accumulate() {
        let args = Args::new().symbol("!").banner_width(10).banner_lines(3);
        assert_eq!(args.banner(), &BannerStyle::new().symbol("!").width(10).lines(3));
    }

    #[test]
    fn pretty_overrides_accumulate() {
        let args = Args::new().indent(2).width(30).depth(1).compact(true);
        let options = args.pretty_options();
        assert_eq!(options.indent, Some(2));
        assert_eq!(options.width, Some(30));
        assert_eq!(options.depth, Some(Depth::Limit(1)));
        assert_eq!(options.compact, Some(true));
    }

    #[test]
    fn split_first_detaches_template() {
        let (first, rest) = Args::new().arg("{}!").arg(5).split_first().unwrap();
        assert_eq!(first.to_value().unwrap(), json!("{}!"));
        assert_eq!(rest.len(), 1);
        assert!(Args::new().split_first().is_none());
    }

    #[test]
    fn borrowed_values_are_accepted() {
        let owned = String::from("borrowed");
        let args = crate::args![&owned, owned.as_str(); who = &owned];
        assert_eq!(args.len(), 2);
        assert_eq!(args.named_values().unwrap()["who"], json!("borrowed"));
    }
}
