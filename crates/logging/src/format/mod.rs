//! Message rendering: the lazily evaluated [`Args`] list, print-style joining
//! and the runtime `{}` template engine.

mod args;
mod number;
mod spec;
mod template;

pub use args::{Args, Loggable};
pub use template::{template_format, validate_template};

pub(crate) use number::float_repr;

use crate::error::FormatError;
use crate::printing::print_join;

impl Args<'_> {
    /// Joins the positional values print-style with the call's separator.
    ///
    /// ```
    /// use finelog::args;
    ///
    /// assert_eq!(args!["Hello", "World"].render_print()?, "Hello World");
    /// assert_eq!(args!["a", 1, [2, 3]].sep(", ").render_print()?, "a, 1, [2, 3]");
    /// # Ok::<(), finelog::FormatError>(())
    /// ```
    pub fn render_print(&self) -> Result<String, FormatError> {
        Ok(print_join(&self.positional_values()?, self.separator()))
    }

    /// Substitutes the positional and named values into `template`.
    ///
    /// ```
    /// use finelog::args;
    ///
    /// let args = args![3; planet = "Mars"];
    /// assert_eq!(args.render_template("{} on {planet}")?, "3 on Mars");
    /// # Ok::<(), finelog::FormatError>(())
    /// ```
    pub fn render_template(&self, template: &str) -> Result<String, FormatError> {
        template_format(template, &self.positional_values()?, &self.named_values()?)
    }
}
