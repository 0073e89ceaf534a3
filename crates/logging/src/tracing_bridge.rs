//! crates/logging/src/tracing_bridge.rs
//! Bridge from finelog records to the `tracing` ecosystem.
//!
//! [`TracingHandler`] is a [`Handler`] that re-emits each record as a
//! `tracing` event, so applications already running a subscriber see finelog
//! output alongside their own spans and events.
//!
//! # Level mapping
//!
//! `tracing` has five levels; finelog has a hundred. Records map by tier:
//! below 10 → `TRACE`, DEBUG* → `DEBUG`, INFO* → `INFO`, WARNING* → `WARN`,
//! everything from ERROR up → `ERROR`. The exact level is kept in the
//! `level` field of the event.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use finelog::{init_tracing, HostLogger, Logger, TracingHandler};
//!
//! init_tracing();
//! let log = Logger::wrap("app");
//! log.add_handler(Arc::new(TracingHandler::new()));
//! log.info3(finelog::args!["ready"])?;
//! ```

use std::sync::{PoisonError, RwLock};

use tracing::Level as TracingLevel;

use crate::error::Result;
use crate::host::{Formatter, Handler, Record};

/// Forwards records to the current `tracing` subscriber.
///
/// Events use the `finelog` target and carry the logger name in the
/// `logger` field and the level name in the `level` field.
#[derive(Debug, Default)]
pub struct TracingHandler {
    formatter: RwLock<Formatter>,
}

impl TracingHandler {
    /// Creates a handler that forwards the bare message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

macro_rules! forward {
    ($level:expr, $record:expr, $line:expr) => {
        ::tracing::event!(
            target: "finelog",
            $level,
            logger = $record.name(),
            level = %$record.level(),
            "{}",
            $line
        )
    };
}

impl Handler for TracingHandler {
    fn emit(&self, record: &Record) -> Result<()> {
        let line = self
            .formatter
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .format(record)?;
        match record.level().tracing_level() {
            TracingLevel::ERROR => forward!(TracingLevel::ERROR, record, line),
            TracingLevel::WARN => forward!(TracingLevel::WARN, record, line),
            TracingLevel::INFO => forward!(TracingLevel::INFO, record, line),
            TracingLevel::DEBUG => forward!(TracingLevel::DEBUG, record, line),
            TracingLevel::TRACE => forward!(TracingLevel::TRACE, record, line),
        }
        Ok(())
    }

    fn set_formatter(&self, formatter: Formatter) {
        *self.formatter.write().unwrap_or_else(PoisonError::into_inner) = formatter;
    }

    fn formatter(&self) -> Formatter {
        self.formatter
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn target(&self) -> String {
        "<tracing>".to_owned()
    }
}

/// Installs a `tracing-subscriber` fmt subscriber writing to stderr,
/// filtered by `RUST_LOG` (default `info`).
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
