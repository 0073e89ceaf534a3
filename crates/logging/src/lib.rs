#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `finelog` is a convenience layer over a named-logger engine. It splits
//! each standard severity tier into ten sub-levels (`INFO`, `INFO1` ..
//! `INFO9`, and likewise for `DEBUG`, `WARNING`, `ERROR` and `CRITICAL`),
//! generates a family of shorthand methods for every one of those fifty
//! levels, and wraps console/file handler setup behind a single
//! [`LoggerOptions`] value.
//!
//! # Design
//!
//! - [`levels`](Level) maps level numbers to names and back. The table is
//!   static; numbers without a name render as `LEVEL<n>`.
//! - [`Args`] carries the values of one log call type-erased behind
//!   [`serde::Serialize`]. Nothing is serialized until the logger has
//!   decided the level is enabled.
//! - The text utilities ([`print_join`], [`template_format`],
//!   [`banner_render`], [`PrettyPrinter`], [`expand_time_format`]) turn those
//!   values into message text.
//! - [`Logger`] is the facade. It forwards every host capability to a
//!   [`HostLogger`] (by default the registry-owned [`CoreLogger`]) and adds
//!   the six operations `log`, `logfmt`, `banner`, `bannerfmt`, `pp` and
//!   `ppfmt`, each in a generic level-taking form and in three hundred
//!   generated per-level shorthands such as `info3` or `warningbannerfmt`.
//!
//! # Invariants
//!
//! - A call at a disabled level returns `Ok(())` without touching its
//!   arguments.
//! - `number_for(name_for(n)) == n` for every level number.
//! - Multi-line messages are written to each handler as one unit.
//!
//! # Errors
//!
//! Fallible operations return [`Error`]. Template and format-spec problems
//! surface as [`Error::Format`] wrapping a [`FormatError`].
//!
//! # Examples
//!
//! ```
//! use finelog::{args, Level, Logger, LoggerOptions};
//! use finelog_sink::SharedBuffer;
//!
//! let out = SharedBuffer::new();
//! let log = Logger::get_or_create(
//!     "doc.crate",
//!     &LoggerOptions::new().level(Level::DEBUG5).show_level(true).stream(out.clone()),
//! )?;
//!
//! log.debug3(args!["not shown"])?;
//! log.debug7(args!["cache", "warm"])?;
//! log.infofmt("{:>6.2f}s", args![1.5])?;
//! log.errorbanner(args!["stop"].symbol("#").banner_width(6))?;
//!
//! assert_eq!(
//!     out.lines(),
//!     ["DEBUG7> cache warm", "INFO>   1.50s", "ERROR> ### stop ###"]
//! );
//! # Ok::<(), finelog::Error>(())
//! ```
//!
//! # See also
//!
//! - [`finelog_sink`] for the writer sinks the handlers are built on.
//! - `TracingHandler` (feature `tracing`) to forward records into a
//!   `tracing` subscriber.

mod banner;
mod error;
mod facade;
mod format;
mod host;
mod levels;
mod pretty;
mod printing;
#[cfg(feature = "tracing")]
mod tracing_bridge;
mod tracing_macros;

pub use banner::{BannerStyle, banner, banner_render, bannerfmt};
pub use error::{Error, FormatError, FormatErrorKind, Result};
pub use facade::{
    ExceptionInfo, FormatterSpec, HandlerState, LevelGuard, Logger, LoggerOptions, Operation,
    Shorthand, StreamTarget, WriterTarget,
};
pub use format::{Args, Loggable, template_format, validate_template};
pub use host::{
    CoreLogger, FileHandler, FileMode, Formatter, Handler, HandlerId, HostLogger, ROOT_NAME,
    Record, Registry, StreamHandler, registry,
};
pub use levels::{Level, LevelSpec, Tier, level_aliases, name_for, named_levels, number_for};
pub use pretty::{
    Depth, PrettyBackend, PrettyConfig, PrettyOptions, PrettyPrinter, pretty_backend,
    pretty_config, pretty_format, reset_pretty_config, set_pretty_backend, set_pretty_config,
};
pub use printing::{
    DEFAULT_TIME_FORMAT, DictStyle, dict_to_string, exception_to_string, expand_time_format,
    format_time, list_to_string, print_join, seconds_to_string, time_to_string,
    validate_time_format,
};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{TracingHandler, init_tracing};

pub use finelog_sink;
