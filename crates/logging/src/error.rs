//! Error types returned by level lookup, formatting and logger configuration.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Classification of a [`FormatError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FormatErrorKind {
    /// The template is malformed (unbalanced braces, bad field syntax).
    Syntax,
    /// A positional field referenced an index with no matching argument.
    MissingPositional(usize),
    /// A named field referenced a name with no matching argument.
    MissingNamed,
    /// Automatic `{}` numbering was mixed with explicit `{0}` numbering.
    MixedNumbering,
    /// The format spec after `:` could not be parsed.
    InvalidSpec,
    /// The format spec is not applicable to the value it formats.
    IncompatibleType,
    /// A logged value could not be serialized into a formattable value.
    Conversion,
    /// A banner was requested with an empty fill symbol.
    EmptySymbol,
    /// A strftime-style time format contains an invalid directive.
    TimeFormat,
}

/// Error returned when a template, format spec, banner or time format cannot
/// be rendered.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub struct FormatError {
    kind: FormatErrorKind,
    message: String,
}

impl FormatError {
    pub(crate) fn new(kind: FormatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        Self::new(FormatErrorKind::Syntax, message)
    }

    pub(crate) fn spec(message: impl Into<String>) -> Self {
        Self::new(FormatErrorKind::InvalidSpec, message)
    }

    pub(crate) fn incompatible(message: impl Into<String>) -> Self {
        Self::new(FormatErrorKind::IncompatibleType, message)
    }

    /// Returns the classification describing why rendering failed.
    #[must_use]
    pub const fn kind(&self) -> FormatErrorKind {
        self.kind
    }

    /// Returns the human-readable description of the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FormatErrorKind::MissingPositional(index) => {
                write!(f, "replacement index {index} out of range: {}", self.message)
            }
            _ => f.write_str(&self.message),
        }
    }
}

/// Errors produced by the `finelog` API.
#[derive(Debug, Error)]
pub enum Error {
    /// A level name is neither a registered name, an alias, nor `LEVEL<digits>`.
    #[error("invalid level name: {0:?}")]
    InvalidLevelName(String),

    /// File names and file modes could not be paired.
    #[error("{names} file names and {modes} file modes size mismatch")]
    ArgumentMismatch {
        /// Number of file names supplied.
        names: usize,
        /// Number of file modes supplied.
        modes: usize,
    },

    /// A stream selector named something other than stdout or stderr.
    #[error("unsupported stream name: {0:?}")]
    UnsupportedStream(String),

    /// A file mode was neither append nor overwrite.
    #[error("unsupported file mode: {0:?}")]
    InvalidFileMode(String),

    /// A pretty-print backend name is not recognised.
    #[error("unsupported pretty-print backend: {0:?}")]
    UnsupportedBackend(String),

    /// Rendering a message failed.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A formatter was supplied as something other than a pattern or a
    /// `{ "format", "time_format" }` object.
    #[error("formatter must be a pattern string or an object with string `format`/`time_format`, got {0}")]
    FormatterType(String),

    /// Opening a log file failed.
    #[error("cannot open log file {path}: {source}")]
    Io {
        /// The file that could not be opened.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing a rendered record to a handler failed.
    #[error("failed to write log record: {0}")]
    Write(#[from] io::Error),
}

impl Error {
    /// Creates an [`Error::Io`] carrying the path that failed to open.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_reports_kind_and_message() {
        let err = FormatError::syntax("Single '}' encountered in format string");
        assert_eq!(err.kind(), FormatErrorKind::Syntax);
        assert_eq!(err.to_string(), "Single '}' encountered in format string");
    }

    #[test]
    fn missing_positional_mentions_index() {
        let err = FormatError::new(FormatErrorKind::MissingPositional(2), "2 arguments given");
        assert_eq!(
            err.to_string(),
            "replacement index 2 out of range: 2 arguments given"
        );
    }

    #[test]
    fn mismatch_display_lists_both_counts() {
        let err = Error::ArgumentMismatch { names: 3, modes: 2 };
        assert_eq!(err.to_string(), "3 file names and 2 file modes size mismatch");
    }

    #[test]
    fn format_error_converts_transparently() {
        let err: Error = FormatError::incompatible("Unknown format code 'd' for str").into();
        assert!(matches!(err, Error::Format(_)));
        assert_eq!(err.to_string(), "Unknown format code 'd' for str");
    }

    #[test]
    fn io_error_carries_path() {
        let err = Error::io("/nope/app.log", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.to_string().starts_with("cannot open log file /nope/app.log"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
