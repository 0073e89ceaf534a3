//! Banner blocks: a message centred between runs of a fill symbol.

use crate::error::{FormatError, FormatErrorKind};
use crate::format::Args;

/// Shape of a banner.
///
/// `width` is the number of symbol characters around the message (half on
/// each side); `lines` is the total number of lines, the message line
/// included.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BannerStyle {
    symbol: String,
    width: usize,
    lines: usize,
}

impl Default for BannerStyle {
    fn default() -> Self {
        Self {
            symbol: "=".to_owned(),
            width: 20,
            lines: 1,
        }
    }
}

impl BannerStyle {
    /// `=` symbols, width 20, a single line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fill symbol; multi-character symbols repeat and are cut to length.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Sets the total symbol width around the message.
    pub const fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Sets the total number of lines. Zero behaves like one.
    pub const fn lines(mut self, lines: usize) -> Self {
        self.lines = lines;
        self
    }

    /// The fill symbol.
    #[must_use]
    pub fn fill_symbol(&self) -> &str {
        &self.symbol
    }

    /// The total symbol width around the message.
    #[must_use]
    pub const fn fill_width(&self) -> usize {
        self.width
    }

    /// The total number of lines.
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.lines
    }
}

/// `len` characters of `symbol` repeated, the last repetition cut short.
fn repeat_to(symbol: &str, len: usize) -> String {
    symbol.chars().cycle().take(len).collect()
}

/// Renders `message` as a banner.
///
/// The central line is `half + " " + message + " " + half` where `half` is
/// `width / 2` symbol characters (no spaces when the message is empty).
/// Extra lines are rows of symbols exactly as wide as the central line;
/// `(lines - 1) / 2` go above it and the rest below.
///
/// ```
/// use finelog::{banner_render, BannerStyle};
///
/// let style = BannerStyle::new().symbol("!").width(10).lines(3);
/// assert_eq!(
///     banner_render("world", &style)?,
///     "!!!!!!!!!!!!!!!!!\n!!!!! world !!!!!\n!!!!!!!!!!!!!!!!!"
/// );
/// # Ok::<(), finelog::FormatError>(())
/// ```
pub fn banner_render(message: &str, style: &BannerStyle) -> Result<String, FormatError> {
    if style.symbol.is_empty() {
        return Err(FormatError::new(
            FormatErrorKind::EmptySymbol,
            "banner symbol must not be empty",
        ));
    }

    let half = repeat_to(&style.symbol, style.width / 2);
    let central = if message.is_empty() {
        format!("{half}{half}")
    } else {
        format!("{half} {message} {half}")
    };
    let surround = repeat_to(&style.symbol, central.chars().count());
    let extra = style.lines.saturating_sub(1);
    let before = extra / 2;
    let after = extra - before;

    let mut block: Vec<&str> = Vec::with_capacity(extra + 1);
    block.extend(std::iter::repeat_n(surround.as_str(), before));
    block.push(&central);
    block.extend(std::iter::repeat_n(surround.as_str(), after));
    Ok(block.join("\n"))
}

/// Joins `args` print-style and renders the result with the call's banner style.
pub fn banner(args: &Args<'_>) -> Result<String, FormatError> {
    banner_render(&args.render_print()?, args.banner())
}

/// Substitutes `args` into `template` and renders the result with the call's
/// banner style.
pub fn bannerfmt(template: &str, args: &Args<'_>) -> Result<String, FormatError> {
    banner_render(&args.render_template(template)?, args.banner())
}
