use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use finelog_sink::MessageSink;
use serde::{Deserialize, Serialize};

use super::{Formatter, Record};
use crate::error::{Error, Result};

/// Identifies a handler attached to a logger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A destination for formatted records.
pub trait Handler: Send + Sync {
    /// Formats and writes one record.
    fn emit(&self, record: &Record) -> Result<()>;

    /// Replaces the formatter.
    fn set_formatter(&self, formatter: Formatter);

    /// A copy of the current formatter.
    fn formatter(&self) -> Formatter;

    /// Flushes buffered output.
    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Short description of the destination, such as `<stderr>` or a path.
    fn target(&self) -> String;
}

impl fmt::Debug for dyn Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("target", &self.target())
            .field("formatter", &self.formatter())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read_formatter(formatter: &RwLock<Formatter>) -> Formatter {
    formatter.read().unwrap_or_else(PoisonError::into_inner).clone()
}

fn write_formatter(slot: &RwLock<Formatter>, formatter: Formatter) {
    *slot.write().unwrap_or_else(PoisonError::into_inner) = formatter;
}

/// Writes records to stdout, stderr or any boxed writer, one per line.
pub struct StreamHandler {
    name: String,
    sink: Mutex<MessageSink<Box<dyn Write + Send>>>,
    formatter: RwLock<Formatter>,
}

impl StreamHandler {
    /// Wraps an arbitrary writer; `name` is reported by [`Handler::target`].
    pub fn new(name: impl Into<String>, writer: impl Write + Send + 'static) -> Self {
        Self {
            name: name.into(),
            sink: Mutex::new(MessageSink::new(Box::new(writer))),
            formatter: RwLock::new(Formatter::default()),
        }
    }

    /// Handler writing to the process's standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new("<stdout>", io::stdout())
    }

    /// Handler writing to the process's standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new("<stderr>", io::stderr())
    }

    /// Sets the formatter while building the handler.
    #[must_use]
    pub fn with_formatter(self, formatter: Formatter) -> Self {
        write_formatter(&self.formatter, formatter);
        self
    }
}

impl Handler for StreamHandler {
    fn emit(&self, record: &Record) -> Result<()> {
        let line = read_formatter(&self.formatter).format(record)?;
        let mut sink = lock(&self.sink);
        sink.write(line)?;
        sink.flush()?;
        Ok(())
    }

    fn set_formatter(&self, formatter: Formatter) {
        write_formatter(&self.formatter, formatter);
    }

    fn formatter(&self) -> Formatter {
        read_formatter(&self.formatter)
    }

    fn flush(&self) -> Result<()> {
        lock(&self.sink).flush().map_err(Error::from)
    }

    fn target(&self) -> String {
        self.name.clone()
    }
}

/// How a log file is opened.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FileMode {
    /// Keep existing content and append (`a`).
    #[default]
    Append,
    /// Truncate on open (`w`).
    Overwrite,
}

impl FileMode {
    /// Single-letter code: `a` or `w`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Append => "a",
            Self::Overwrite => "w",
        }
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "a" | "append" => Ok(Self::Append),
            "w" | "overwrite" | "write" => Ok(Self::Overwrite),
            _ => Err(Error::InvalidFileMode(s.to_owned())),
        }
    }
}

impl TryFrom<String> for FileMode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<FileMode> for String {
    fn from(mode: FileMode) -> Self {
        mode.as_str().to_owned()
    }
}

/// Writes records to a file. The file is closed when the handler is dropped.
pub struct FileHandler {
    path: PathBuf,
    mode: FileMode,
    sink: Mutex<MessageSink<File>>,
    formatter: RwLock<Formatter>,
}

impl FileHandler {
    /// Opens (creating if needed) `path` with `mode`.
    pub fn open(path: impl AsRef<Path>, mode: FileMode) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            FileMode::Append => options.append(true),
            FileMode::Overwrite => options.write(true).truncate(true),
        };
        let file = options.open(&path).map_err(|source| Error::io(&path, source))?;
        Ok(Self {
            path,
            mode,
            sink: Mutex::new(MessageSink::new(file)),
            formatter: RwLock::new(Formatter::default()),
        })
    }

    /// Sets the formatter while building the handler.
    #[must_use]
    pub fn with_formatter(self, formatter: Formatter) -> Self {
        write_formatter(&self.formatter, formatter);
        self
    }

    /// The file's path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The mode the file was opened with.
    #[must_use]
    pub const fn mode(&self) -> FileMode {
        self.mode
    }
}

impl Handler for FileHandler {
    fn emit(&self, record: &Record) -> Result<()> {
        let line = read_formatter(&self.formatter).format(record)?;
        let mut sink = lock(&self.sink);
        sink.write(line)?;
        sink.flush()?;
        Ok(())
    }

    fn set_formatter(&self, formatter: Formatter) {
        write_formatter(&self.formatter, formatter);
    }

    fn formatter(&self) -> Formatter {
        read_formatter(&self.formatter)
    }

    fn flush(&self) -> Result<()> {
        lock(&self.sink).flush().map_err(Error::from)
    }

    fn target(&self) -> String {
        format!("{} ({})", self.path.display(), self.mode)
    }
}
