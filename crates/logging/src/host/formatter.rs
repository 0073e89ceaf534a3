use crate::error::FormatError;
use crate::format::{template_format, validate_template};
use crate::printing::{DEFAULT_TIME_FORMAT, expand_time_format, format_time, validate_time_format};

use super::Record;

const MESSAGE_FIELD: &str = "{message}";
const LEVEL_PREFIX: &str = "{levelname}> ";
const TIME_PREFIX: &str = "{asctime} ";

/// Turns a [`Record`] into a line of text.
///
/// Patterns use the `{}` template syntax with record fields as named values:
/// `name`, `levelname`, `levelno`, `message`, `asctime`, `created`, `msecs`,
/// `relativeCreated`, `pathname`, `filename`, `module`, `lineno`, `funcName`,
/// `process`, `processName`, `thread`, `threadName`.
///
/// ```
/// use finelog::{Formatter, Level, Record};
///
/// let formatter = Formatter::new("[{name}] {levelname}: {message}", None)?;
/// let record = Record::new("db", Level::WARNING2, "slow query");
/// assert_eq!(formatter.format(&record)?, "[db] WARNING2: slow query");
/// # Ok::<(), finelog::FormatError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formatter {
    pattern: String,
    time_format: Option<String>,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            pattern: MESSAGE_FIELD.to_owned(),
            time_format: None,
        }
    }
}

impl Formatter {
    /// Creates a formatter after checking the pattern and the time format.
    ///
    /// The time format may use the aliases understood by
    /// [`expand_time_format`](crate::expand_time_format).
    pub fn new(pattern: impl Into<String>, time_format: Option<&str>) -> Result<Self, FormatError> {
        let pattern = pattern.into();
        validate_template(&pattern)?;
        let time_format = time_format.map(|format| expand_time_format(format).into_owned());
        if let Some(format) = &time_format {
            validate_time_format(format)?;
        }
        Ok(Self {
            pattern,
            time_format,
        })
    }

    /// Builds the `[format][{levelname}> ]{message}` pattern.
    ///
    /// Without an explicit `format`, the prefix is `"{asctime} "` when a time
    /// format is given and empty otherwise.
    ///
    /// ```
    /// use finelog::Formatter;
    ///
    /// let formatter = Formatter::from_parts(None, Some("HMS"), true)?;
    /// assert_eq!(formatter.pattern(), "{asctime} {levelname}> {message}");
    /// assert_eq!(formatter.time_format(), Some("%H:%M:%S"));
    /// # Ok::<(), finelog::FormatError>(())
    /// ```
    pub fn from_parts(
        format: Option<&str>,
        time_format: Option<&str>,
        show_level: bool,
    ) -> Result<Self, FormatError> {
        let prefix = match (format, time_format) {
            (Some(format), _) => format,
            (None, Some(_)) => TIME_PREFIX,
            (None, None) => "",
        };
        let level = if show_level { LEVEL_PREFIX } else { "" };
        Self::new(format!("{prefix}{level}{MESSAGE_FIELD}"), time_format)
    }

    /// The `{}` pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The expanded strftime pattern, if one was configured.
    #[must_use]
    pub fn time_format(&self) -> Option<&str> {
        self.time_format.as_deref()
    }

    /// Reports whether the pattern references `{asctime}`.
    #[must_use]
    pub fn uses_time(&self) -> bool {
        self.pattern.contains("{asctime")
    }

    /// Renders the record's creation time.
    pub fn format_time(&self, record: &Record) -> Result<String, FormatError> {
        format_time(
            record.created(),
            self.time_format.as_deref().unwrap_or(DEFAULT_TIME_FORMAT),
        )
    }

    /// Renders the record.
    pub fn format(&self, record: &Record) -> Result<String, FormatError> {
        let asctime = if self.uses_time() {
            Some(self.format_time(record)?)
        } else {
            None
        };
        template_format(&self.pattern, &[], &record.fields(asctime))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::Level;

    #[test]
    fn default_pattern_is_bare_message() {
        let record = Record::new("x", Level::INFO, "hello");
        assert_eq!(Formatter::default().format(&record).unwrap(), "hello");
    }

    #[test]
    fn explicit_format_wins_verbatim() {
        let formatter = Formatter::from_parts(Some("<{name}> "), Some("HM"), true).unwrap();
        assert_eq!(formatter.pattern(), "<{name}> {levelname}> {message}");
        assert_eq!(formatter.time_format(), Some("%H:%M"));
    }

    #[test]
    fn level_prefix_without_time() {
        let formatter = Formatter::from_parts(None, None, true).unwrap();
        let record = Record::new("x", Level::DEBUG4, "m");
        assert_eq!(formatter.format(&record).unwrap(), "DEBUG4> m");
    }

    #[test]
    fn asctime_uses_default_format_when_unset() {
        let formatter = Formatter::new("{asctime}|{message}", None).unwrap();
        let record = Record::new("x", Level::INFO, "m");
        let line = formatter.format(&record).unwrap();
        let (stamp, message) = line.split_once('|').unwrap();
        assert_eq!(message, "m");
        // 2024-05-01 13:45:10,123
        assert_eq!(stamp.len(), 23);
        assert_eq!(&stamp[19..20], ",");
    }

    #[test]
    fn invalid_patterns_and_time_formats_fail_early() {
        assert!(Formatter::new("{message", None).is_err());
        assert!(Formatter::new("{message}", Some("%Q")).is_err());
    }

    #[test]
    fn unknown_fields_fail_at_format_time() {
        let formatter = Formatter::new("{nope}", None).unwrap();
        assert!(formatter.format(&Record::new("x", Level::INFO, "m")).is_err());
    }
}
