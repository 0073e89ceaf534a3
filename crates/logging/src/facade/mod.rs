//! The [`Logger`] facade.
//!
//! A `Logger` wraps a shared [`HostLogger`] and adds:
//!
//! - level-taking operations ([`log`](Logger::log), [`logfmt`](Logger::logfmt),
//!   [`banner`](Logger::banner), [`bannerfmt`](Logger::bannerfmt),
//!   [`pp`](Logger::pp), [`ppfmt`](Logger::ppfmt)) and three hundred
//!   generated per-level shorthands (`info3`, `warningbanner`,
//!   `debugppfmt7`, ...);
//! - handler configuration through [`LoggerOptions`];
//! - by-name dispatch through [`Shorthand`].
//!
//! Every operation checks whether its level is enabled before looking at its
//! arguments. A suppressed call never serializes a value or parses a
//! template, so it cannot fail on them.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use serde_json::Value;

use crate::banner::banner_render;
use crate::error::{Error, FormatError, FormatErrorKind, Result};
use crate::format::Args;
use crate::host::{
    CoreLogger, FileHandler, Formatter, Handler, HandlerId, HostLogger, Record, registry,
};
use crate::levels::{Level, LevelSpec, number_for};
use crate::pretty::PrettyPrinter;
use crate::printing::{exception_to_string, print_join};

mod methods;
mod options;
mod shorthand;

pub use options::{LoggerOptions, StreamTarget, WriterTarget};
pub use shorthand::{Operation, Shorthand};

use options::expand_home;

/// Whether a logger has any handler attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandlerState {
    /// No handlers; records only reach ancestors.
    Unconfigured,
    /// At least one handler.
    Configured,
}

/// Formatter settings accepted by [`Logger::apply_formatter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatterSpec {
    /// A complete `{}` pattern with an optional time format.
    Pattern {
        /// The pattern, e.g. `"{asctime} {name}: {message}"`.
        format: String,
        /// strftime pattern or alias for `{asctime}`.
        time_format: Option<String>,
    },
    /// A ready-made formatter.
    Formatter(Formatter),
}

impl From<&str> for FormatterSpec {
    fn from(format: &str) -> Self {
        Self::Pattern {
            format: format.to_owned(),
            time_format: None,
        }
    }
}

impl From<String> for FormatterSpec {
    fn from(format: String) -> Self {
        Self::Pattern {
            format,
            time_format: None,
        }
    }
}

impl From<(&str, &str)> for FormatterSpec {
    fn from((format, time_format): (&str, &str)) -> Self {
        Self::Pattern {
            format: format.to_owned(),
            time_format: Some(time_format.to_owned()),
        }
    }
}

impl From<Formatter> for FormatterSpec {
    fn from(formatter: Formatter) -> Self {
        Self::Formatter(formatter)
    }
}

impl FormatterSpec {
    fn build(self) -> Result<Formatter> {
        match self {
            Self::Pattern {
                format,
                time_format,
            } => Ok(Formatter::new(format, time_format.as_deref())?),
            Self::Formatter(formatter) => Ok(formatter),
        }
    }
}

/// The error attached by [`Logger::exception`].
#[derive(Clone, Copy, Debug)]
pub enum ExceptionInfo<'e> {
    /// An error value; its `source()` chain is rendered too.
    Error(&'e (dyn StdError + 'e)),
    /// Pre-rendered error text, appended verbatim.
    Text(&'e str),
}

impl<'e> ExceptionInfo<'e> {
    /// Wraps an error value.
    pub fn error(error: &'e (dyn StdError + 'e)) -> Self {
        Self::Error(error)
    }
}

impl<'e> From<&'e (dyn StdError + 'e)> for ExceptionInfo<'e> {
    fn from(error: &'e (dyn StdError + 'e)) -> Self {
        Self::Error(error)
    }
}

impl<'e> From<&'e (dyn StdError + Send + Sync + 'e)> for ExceptionInfo<'e> {
    fn from(error: &'e (dyn StdError + Send + Sync + 'e)) -> Self {
        Self::Error(error)
    }
}

impl<'e> From<&'e str> for ExceptionInfo<'e> {
    fn from(text: &'e str) -> Self {
        Self::Text(text)
    }
}

impl ExceptionInfo<'_> {
    fn render(&self) -> Cow<'_, str> {
        match self {
            Self::Error(error) => Cow::Owned(exception_to_string(*error)),
            Self::Text(text) => Cow::Borrowed(text),
        }
    }
}

/// Convenience layer over a [`HostLogger`].
///
/// Cloning is cheap and shares the host logger.
///
/// ```
/// use finelog::{args, Logger, LoggerOptions};
/// use finelog_sink::SharedBuffer;
///
/// let out = SharedBuffer::new();
/// let log = Logger::get_or_create(
///     "doc.facade",
///     &LoggerOptions::new().level("INFO2").show_level(true).stream(out.clone()),
/// )?;
///
/// log.info3(args!["Hello", "World"])?;
/// log.infofmt1("{} + {} = {:.1f}", args![1, 2, 3.0])?;
/// log.warningbanner(args!["done"].symbol("*").banner_width(4))?;
/// assert_eq!(out.lines(), ["INFO3> Hello World", "WARNING> ** done **"]);
/// # Ok::<(), finelog::Error>(())
/// ```
pub struct Logger<H: HostLogger = CoreLogger> {
    host: Arc<H>,
}

impl<H: HostLogger> Clone for Logger<H> {
    fn clone(&self) -> Self {
        Self {
            host: Arc::clone(&self.host),
        }
    }
}

impl<H: HostLogger> fmt::Debug for Logger<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.host.name())
            .field("level", &self.host.level())
            .field("handlers", &self.host.handler_count())
            .finish()
    }
}

impl Logger {
    /// Wraps the registry logger called `name` without configuring it.
    #[must_use]
    pub fn wrap(name: &str) -> Self {
        Self::new(registry().get_logger(name))
    }

    /// Returns the logger called `name`, configured with `options`.
    ///
    /// A logger created by this call starts at INFO unless `options` sets a
    /// level; an existing logger keeps its level. Options are layered onto
    /// whatever handlers are already attached (use `reset_handlers` to start
    /// over). Propagation to ancestors is turned off so records are not
    /// printed twice.
    pub fn get_or_create(name: &str, options: &LoggerOptions) -> Result<Self> {
        let existed = registry().exists(name);
        let host = registry().get_logger(name);
        host.set_propagate(false);
        if !existed && options.level.is_none() {
            host.set_level(Level::INFO);
        }
        let logger = Self::new(host);
        logger.configure(options)?;
        Ok(logger)
    }

    /// Names of every logger created in the process registry, sorted.
    #[must_use]
    pub fn all_loggers() -> Vec<String> {
        registry().logger_names()
    }

    /// Reports whether the registry has a logger called `name`.
    #[must_use]
    pub fn exists(name: &str) -> bool {
        registry().exists(name)
    }
}

impl<H: HostLogger> Logger<H> {
    /// Wraps an existing host logger.
    pub const fn new(host: Arc<H>) -> Self {
        Self { host }
    }

    /// The wrapped host logger.
    #[must_use]
    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    /// Attaches handlers and sets the level according to `options`.
    ///
    /// Everything that can fail (file/mode pairing, the formatter pattern,
    /// the level name, opening files) is checked before the logger changes,
    /// so an error leaves the logger exactly as it was.
    pub fn configure(&self, options: &LoggerOptions) -> Result<&Self> {
        let pairs = options.file_pairs()?;
        let formatter = Formatter::from_parts(
            options.format.as_deref(),
            options.time_format.as_deref(),
            options.show_level,
        )?;
        let level = options.level.as_ref().map(LevelSpec::resolve).transpose()?;
        let files = pairs
            .iter()
            .map(|(path, mode)| {
                FileHandler::open(expand_home(path), *mode).map(|handler| handler.with_formatter(formatter.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        if options.reset_handlers {
            self.host.clear_handlers();
        }
        if let Some(level) = level {
            self.host.set_level(level);
        }
        for target in &options.stream {
            let handler = target.handler().with_formatter(formatter.clone());
            self.host.add_handler(Arc::new(handler));
        }
        for handler in files {
            self.host.add_handler(Arc::new(handler));
        }
        Ok(self)
    }

    /// Sets the level from a number or a name.
    pub fn set_level_spec(&self, level: impl Into<LevelSpec>) -> Result<()> {
        self.host.set_level(number_for(level)?);
        Ok(())
    }

    /// Reports whether a record at `level` would be handled.
    pub fn is_enabled_for(&self, level: impl Into<LevelSpec>) -> Result<bool> {
        Ok(self.host.is_enabled(number_for(level)?))
    }

    /// Sets the level until the returned guard is dropped.
    pub fn level_scope(&self, level: impl Into<LevelSpec>) -> Result<LevelGuard<'_, H>> {
        let level = number_for(level)?;
        let previous = self.host.level();
        self.host.set_level(level);
        Ok(LevelGuard {
            logger: self,
            previous,
        })
    }

    /// Whether any handler is attached.
    #[must_use]
    pub fn handler_state(&self) -> HandlerState {
        if self.host.handler_count() == 0 {
            HandlerState::Unconfigured
        } else {
            HandlerState::Configured
        }
    }

    /// Gives every attached handler the formatter described by `spec`.
    pub fn apply_formatter(&self, spec: impl Into<FormatterSpec>) -> Result<()> {
        let formatter = spec.into().build()?;
        self.host.set_formatter(&formatter);
        Ok(())
    }

    /// Like [`apply_formatter`](Self::apply_formatter), for loosely typed
    /// input: a pattern string, or an object with a string `format` and an
    /// optional string `time_format`. Anything else is
    /// [`Error::FormatterType`].
    pub fn set_formatter_value(&self, value: &Value) -> Result<()> {
        let spec = match value {
            Value::String(format) => FormatterSpec::from(format.as_str()),
            Value::Object(fields) => {
                let format = match fields.get("format") {
                    Some(Value::String(format)) => format.clone(),
                    _ => return Err(Error::FormatterType(value.to_string())),
                };
                let time_format = match fields.get("time_format") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(time_format)) => Some(time_format.clone()),
                    Some(_) => return Err(Error::FormatterType(value.to_string())),
                };
                FormatterSpec::Pattern {
                    format,
                    time_format,
                }
            }
            other => return Err(Error::FormatterType(other.to_string())),
        };
        self.apply_formatter(spec)
    }

    fn emit(&self, level: Level, message: String, location: &'static Location<'static>) -> Result<()> {
        let record = self.host.make_record(level, message, location);
        self.host.handle_record(&record)
    }

    /// Logs `args` joined print-style.
    #[track_caller]
    pub fn log<'a>(&self, level: impl Into<LevelSpec>, args: impl Into<Args<'a>>) -> Result<()> {
        let level = number_for(level)?;
        if !self.host.is_enabled(level) {
            return Ok(());
        }
        let message = args.into().render_print()?;
        self.emit(level, message, Location::caller())
    }

    /// Logs `template` filled from `args`.
    #[track_caller]
    pub fn logfmt<'a>(
        &self,
        level: impl Into<LevelSpec>,
        template: &str,
        args: impl Into<Args<'a>>,
    ) -> Result<()> {
        let level = number_for(level)?;
        if !self.host.is_enabled(level) {
            return Ok(());
        }
        let message = args.into().render_template(template)?;
        self.emit(level, message, Location::caller())
    }

    /// Logs `args` joined print-style inside a banner shaped by the call's
    /// banner style.
    #[track_caller]
    pub fn banner<'a>(&self, level: impl Into<LevelSpec>, args: impl Into<Args<'a>>) -> Result<()> {
        let level = number_for(level)?;
        if !self.host.is_enabled(level) {
            return Ok(());
        }
        let args = args.into();
        let message = banner_render(&args.render_print()?, args.banner())?;
        self.emit(level, message, Location::caller())
    }

    /// Logs a banner around `template` filled from `args`.
    #[track_caller]
    pub fn bannerfmt<'a>(
        &self,
        level: impl Into<LevelSpec>,
        template: &str,
        args: impl Into<Args<'a>>,
    ) -> Result<()> {
        let level = number_for(level)?;
        if !self.host.is_enabled(level) {
            return Ok(());
        }
        let args = args.into();
        let message = banner_render(&args.render_template(template)?, args.banner())?;
        self.emit(level, message, Location::caller())
    }

    /// Pretty-prints each value with the process-wide printer and the call's
    /// overrides, then joins them with the separator.
    #[track_caller]
    pub fn pp<'a>(&self, level: impl Into<LevelSpec>, args: impl Into<Args<'a>>) -> Result<()> {
        let level = number_for(level)?;
        if !self.host.is_enabled(level) {
            return Ok(());
        }
        let message = PrettyPrinter::global().render_print(&args.into())?;
        self.emit(level, message, Location::caller())
    }

    /// Pretty-prints every non-numeric value, then fills `template`.
    #[track_caller]
    pub fn ppfmt<'a>(
        &self,
        level: impl Into<LevelSpec>,
        template: &str,
        args: impl Into<Args<'a>>,
    ) -> Result<()> {
        let level = number_for(level)?;
        if !self.host.is_enabled(level) {
            return Ok(());
        }
        let message = PrettyPrinter::global().render_template(template, &args.into())?;
        self.emit(level, message, Location::caller())
    }

    /// Logs `args` followed by a newline and the rendered error at ERROR.
    #[track_caller]
    pub fn exception<'a, 'e>(&self, args: impl Into<Args<'a>>, info: impl Into<ExceptionInfo<'e>>) -> Result<()> {
        self.exception_at(Level::ERROR, args, info)
    }

    /// Logs `args` followed by a newline and the rendered error at `level`.
    #[track_caller]
    pub fn exception_at<'a, 'e>(
        &self,
        level: impl Into<LevelSpec>,
        args: impl Into<Args<'a>>,
        info: impl Into<ExceptionInfo<'e>>,
    ) -> Result<()> {
        let level = number_for(level)?;
        if !self.host.is_enabled(level) {
            return Ok(());
        }
        let mut message = args.into().render_print()?;
        message.push('\n');
        message.push_str(&info.into().render());
        self.emit(level, message, Location::caller())
    }

    /// Runs the shorthand called `name`.
    ///
    /// For the template operations (`infofmt3`, `warningbannerfmt`, ...) the
    /// first positional value is the template. Unknown names fail with
    /// [`Error::InvalidLevelName`].
    ///
    /// ```
    /// use finelog::{args, Logger, LoggerOptions};
    /// use finelog_sink::SharedBuffer;
    ///
    /// let out = SharedBuffer::new();
    /// let log = Logger::get_or_create("doc.dispatch", &LoggerOptions::new().stream(out.clone()))?;
    /// log.dispatch("infofmt2", args!["{} items", 4])?;
    /// log.dispatch("debug9", args!["hidden"])?;
    /// assert_eq!(out.lines(), ["4 items"]);
    /// # Ok::<(), finelog::Error>(())
    /// ```
    #[track_caller]
    pub fn dispatch<'a>(&self, name: &str, args: impl Into<Args<'a>>) -> Result<()> {
        let shorthand = Shorthand::lookup(name).ok_or_else(|| Error::InvalidLevelName(name.to_owned()))?;
        let level = shorthand.level();
        if !self.host.is_enabled(level) {
            return Ok(());
        }
        let args = args.into();
        if !shorthand.op().takes_template() {
            return match shorthand.op() {
                Operation::Banner => self.banner(level, args),
                Operation::Pp => self.pp(level, args),
                _ => self.log(level, args),
            };
        }

        let (template, rest) = args.split_first().ok_or_else(|| {
            FormatError::new(
                FormatErrorKind::MissingPositional(0),
                format!("{name} needs a template as its first argument"),
            )
        })?;
        let template = print_join(&[template.to_value()?], "");
        match shorthand.op() {
            Operation::BannerFmt => self.bannerfmt(level, &template, rest),
            Operation::PpFmt => self.ppfmt(level, &template, rest),
            _ => self.logfmt(level, &template, rest),
        }
    }
}

impl<H: HostLogger> HostLogger for Logger<H> {
    fn name(&self) -> &str {
        self.host.name()
    }

    fn level(&self) -> Level {
        self.host.level()
    }

    fn set_level(&self, level: Level) {
        self.host.set_level(level);
    }

    fn is_enabled(&self, level: Level) -> bool {
        self.host.is_enabled(level)
    }

    fn add_handler(&self, handler: Arc<dyn Handler>) -> HandlerId {
        self.host.add_handler(handler)
    }

    fn remove_handler(&self, id: HandlerId) -> bool {
        self.host.remove_handler(id)
    }

    fn clear_handlers(&self) -> usize {
        self.host.clear_handlers()
    }

    fn handlers(&self) -> Vec<(HandlerId, Arc<dyn Handler>)> {
        self.host.handlers()
    }

    fn handler_count(&self) -> usize {
        self.host.handler_count()
    }

    fn set_propagate(&self, propagate: bool) {
        self.host.set_propagate(propagate);
    }

    fn propagate(&self) -> bool {
        self.host.propagate()
    }

    fn set_formatter(&self, formatter: &Formatter) {
        self.host.set_formatter(formatter);
    }

    fn make_record(&self, level: Level, message: String, location: &'static Location<'static>) -> Record {
        self.host.make_record(level, message, location)
    }

    fn handle_record(&self, record: &Record) -> Result<()> {
        self.host.handle_record(record)
    }
}

/// Restores a logger's previous level when dropped.
///
/// Returned by [`Logger::level_scope`].
#[must_use = "the level is restored as soon as the guard is dropped"]
pub struct LevelGuard<'a, H: HostLogger = CoreLogger> {
    logger: &'a Logger<H>,
    previous: Level,
}

impl<H: HostLogger> LevelGuard<'_, H> {
    /// The level that will be restored.
    #[must_use]
    pub const fn previous(&self) -> Level {
        self.previous
    }
}

impl<H: HostLogger> fmt::Debug for LevelGuard<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelGuard")
            .field("logger", &self.logger.host.name())
            .field("previous", &self.previous)
            .finish()
    }
}

impl<H: HostLogger> Drop for LevelGuard<'_, H> {
    fn drop(&mut self) {
        self.logger.host.set_level(self.previous);
    }
}
