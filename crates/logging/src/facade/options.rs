use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};

use finelog_sink::SharedBuffer;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::host::{FileMode, StreamHandler};
use crate::levels::LevelSpec;

/// A caller-supplied writer shared by every handler built from it.
#[derive(Clone)]
pub struct WriterTarget {
    name: String,
    writer: Arc<Mutex<dyn Write + Send>>,
}

impl WriterTarget {
    /// Wraps `writer`; `name` is what the handler reports as its target.
    pub fn new(name: impl Into<String>, writer: impl Write + Send + 'static) -> Self {
        Self {
            name: name.into(),
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Write for WriterTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner).flush()
    }
}

impl fmt::Debug for WriterTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WriterTarget").field(&self.name).finish()
    }
}

/// Where a stream handler writes.
///
/// Parses from `out`/`stdout` and `err`/`stderr`; any other name fails with
/// [`Error::UnsupportedStream`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StreamTarget {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
    /// An explicit writer.
    Writer(WriterTarget),
}

impl StreamTarget {
    /// Wraps an explicit writer.
    pub fn writer(name: impl Into<String>, writer: impl Write + Send + 'static) -> Self {
        Self::Writer(WriterTarget::new(name, writer))
    }

    pub(crate) fn handler(&self) -> StreamHandler {
        match self {
            Self::Stdout => StreamHandler::stdout(),
            Self::Stderr => StreamHandler::stderr(),
            Self::Writer(target) => StreamHandler::new(target.name.clone(), target.clone()),
        }
    }
}

impl fmt::Display for StreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::Stderr => f.write_str("stderr"),
            Self::Writer(target) => f.write_str(&target.name),
        }
    }
}

impl FromStr for StreamTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "out" | "stdout" => Ok(Self::Stdout),
            "err" | "stderr" => Ok(Self::Stderr),
            other => Err(Error::UnsupportedStream(other.to_owned())),
        }
    }
}

impl TryFrom<String> for StreamTarget {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<StreamTarget> for String {
    fn from(target: StreamTarget) -> Self {
        target.to_string()
    }
}

impl From<SharedBuffer> for StreamTarget {
    fn from(buffer: SharedBuffer) -> Self {
        Self::writer("<buffer>", buffer)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

/// Accepts `null`, a single value or a list.
fn one_or_many<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    })
}

/// Settings applied by [`Logger::configure`](crate::Logger::configure).
///
/// Every field is optional. Handlers are added, never replaced, unless
/// `reset_handlers` is set.
///
/// ```
/// use finelog::{FileMode, LoggerOptions};
///
/// let options: LoggerOptions = serde_json::from_value(serde_json::json!({
///     "level": "info3",
///     "file_name": ["a.log", "b.log"],
///     "file_mode": "overwrite",
///     "show_level": true,
///     "stream": "stderr",
/// }))?;
/// assert_eq!(options.file_name.len(), 2);
/// assert_eq!(options.file_mode, vec![FileMode::Overwrite]);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerOptions {
    /// Level to set; `None` keeps the current one.
    pub level: Option<LevelSpec>,
    /// Log files, one handler per entry.
    #[serde(deserialize_with = "one_or_many")]
    pub file_name: Vec<PathBuf>,
    /// Modes paired positionally with `file_name`. One entry applies to
    /// every file; none means append.
    #[serde(deserialize_with = "one_or_many")]
    pub file_mode: Vec<FileMode>,
    /// `{}` prefix placed before the level prefix and the message.
    pub format: Option<String>,
    /// strftime pattern or alias for `{asctime}`.
    pub time_format: Option<String>,
    /// Prefix each message with `LEVELNAME> `.
    pub show_level: bool,
    /// Stream handlers to attach.
    #[serde(deserialize_with = "one_or_many")]
    pub stream: Vec<StreamTarget>,
    /// Remove every existing handler first.
    pub reset_handlers: bool,
}

impl LoggerOptions {
    /// Empty options: nothing is attached and the level is kept.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level.
    #[must_use]
    pub fn level(mut self, level: impl Into<LevelSpec>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Adds a log file.
    #[must_use]
    pub fn file_name(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_name.push(path.into());
        self
    }

    /// Adds a file mode.
    #[must_use]
    pub fn file_mode(mut self, mode: FileMode) -> Self {
        self.file_mode.push(mode);
        self
    }

    /// Sets the format prefix.
    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets the time format.
    #[must_use]
    pub fn time_format(mut self, time_format: impl Into<String>) -> Self {
        self.time_format = Some(time_format.into());
        self
    }

    /// Shows or hides the level prefix.
    #[must_use]
    pub const fn show_level(mut self, show_level: bool) -> Self {
        self.show_level = show_level;
        self
    }

    /// Adds a stream handler target.
    #[must_use]
    pub fn stream(mut self, target: impl Into<StreamTarget>) -> Self {
        self.stream.push(target.into());
        self
    }

    /// Removes existing handlers before attaching new ones.
    #[must_use]
    pub const fn reset_handlers(mut self, reset: bool) -> Self {
        self.reset_handlers = reset;
        self
    }

    /// Pairs file names with modes: equal lengths zip, a single entry on
    /// either side repeats, no modes means append.
    pub(crate) fn file_pairs(&self) -> Result<Vec<(PathBuf, FileMode)>> {
        let names = &self.file_name;
        let modes: &[FileMode] = if self.file_mode.is_empty() {
            &[FileMode::Append]
        } else {
            &self.file_mode
        };
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let pairs = match (names.len(), modes.len()) {
            (n, m) if n == m => names.iter().cloned().zip(modes.iter().copied()).collect(),
            (_, 1) => names.iter().map(|name| (name.clone(), modes[0])).collect(),
            (1, _) => modes.iter().map(|mode| (names[0].clone(), *mode)).collect(),
            (n, m) => return Err(Error::ArgumentMismatch { names: n, modes: m }),
        };
        Ok(pairs)
    }
}

/// Expands a leading `~` to `$HOME`.
pub(crate) fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_files(names: &[&str], modes: &[FileMode]) -> LoggerOptions {
        let mut options = LoggerOptions::new();
        options.file_name = names.iter().map(PathBuf::from).collect();
        options.file_mode = modes.to_vec();
        options
    }

    #[test]
    fn single_mode_broadcasts() {
        let pairs = with_files(&["a.log", "b.log"], &[FileMode::Overwrite]).file_pairs().unwrap();
        assert_eq!(
            pairs,
            vec![
                (PathBuf::from("a.log"), FileMode::Overwrite),
                (PathBuf::from("b.log"), FileMode::Overwrite),
            ]
        );
    }

    #[test]
    fn single_name_repeats_for_each_mode() {
        let pairs = with_files(&["a.log"], &[FileMode::Append, FileMode::Overwrite])
            .file_pairs()
            .unwrap();
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|(name, _)| name == Path::new("a.log")));
    }

    #[test]
    fn missing_modes_default_to_append() {
        let pairs = with_files(&["a.log", "b.log"], &[]).file_pairs().unwrap();
        assert!(pairs.iter().all(|(_, mode)| *mode == FileMode::Append));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = with_files(
            &["a.log", "b.log"],
            &[FileMode::Append, FileMode::Overwrite, FileMode::Append],
        )
        .file_pairs()
        .unwrap_err();
        assert!(matches!(err, Error::ArgumentMismatch { names: 2, modes: 3 }));
    }

    #[test]
    fn stream_names_parse() {
        assert!(matches!("out".parse::<StreamTarget>().unwrap(), StreamTarget::Stdout));
        assert!(matches!("stderr".parse::<StreamTarget>().unwrap(), StreamTarget::Stderr));
        assert!(matches!(
            "syslog".parse::<StreamTarget>(),
            Err(Error::UnsupportedStream(name)) if name == "syslog"
        ));
    }

    #[test]
    fn options_deserialize_null_single_and_list() {
        let options: LoggerOptions = serde_json::from_value(json!({
            "file_name": "only.log",
            "file_mode": null,
            "stream": ["out", "err"],
        }))
        .unwrap();
        assert_eq!(options.file_name, vec![PathBuf::from("only.log")]);
        assert!(options.file_mode.is_empty());
        assert_eq!(options.stream.len(), 2);
        assert!(options.level.is_none());
        assert!(!options.reset_handlers);
    }

    #[test]
    fn unknown_stream_fails_deserialization() {
        let result = serde_json::from_value::<LoggerOptions>(json!({"stream": "printer"}));
        assert!(result.is_err());
    }

    #[test]
    fn writer_targets_serialize_by_name() {
        let options = LoggerOptions::new().stream(SharedBuffer::new()).stream(StreamTarget::Stdout);
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["stream"], json!(["<buffer>", "stdout"]));
    }

    #[test]
    fn tilde_expands_to_home() {
        let Some(home) = std::env::var_os("HOME") else {
            return;
        };
        assert_eq!(expand_home(Path::new("~/x.log")), PathBuf::from(home).join("x.log"));
        assert_eq!(expand_home(Path::new("/tmp/x.log")), PathBuf::from("/tmp/x.log"));
    }
}
