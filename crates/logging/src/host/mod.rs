//! The logging engine the facade drives.
//!
//! A [`HostLogger`] owns a level, a list of [`Handler`]s and a propagation
//! flag. [`CoreLogger`] is the built-in implementation; named instances live
//! in the process-wide [`registry()`], which arranges them in a dotted-name
//! hierarchy under a root logger set to WARNING.
//!
//! Handlers turn [`Record`]s into text with a [`Formatter`] and write them to
//! a stream ([`StreamHandler`]) or a file ([`FileHandler`]).

use std::panic::Location;
use std::sync::Arc;

use crate::error::Result;
use crate::levels::Level;

mod formatter;
mod handler;
mod record;
mod registry;

pub use formatter::Formatter;
pub use handler::{FileHandler, FileMode, Handler, HandlerId, StreamHandler};
pub use record::Record;
pub use registry::{CoreLogger, ROOT_NAME, Registry, registry};

/// Capabilities a logger must offer to be driven by [`Logger`](crate::Logger).
///
/// Every method takes `&self`; implementations synchronise internally.
pub trait HostLogger: Send + Sync {
    /// The logger's name.
    fn name(&self) -> &str;

    /// The effective level: the logger's own, or the nearest ancestor's.
    fn level(&self) -> Level;

    /// Sets the logger's own level.
    fn set_level(&self, level: Level);

    /// Reports whether a record at `level` would be handled.
    fn is_enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    /// Attaches a handler.
    fn add_handler(&self, handler: Arc<dyn Handler>) -> HandlerId;

    /// Detaches one handler. Returns `false` when `id` was not attached.
    fn remove_handler(&self, id: HandlerId) -> bool;

    /// Detaches every handler and returns how many there were.
    fn clear_handlers(&self) -> usize;

    /// The attached handlers in attachment order.
    fn handlers(&self) -> Vec<(HandlerId, Arc<dyn Handler>)>;

    /// Number of attached handlers.
    fn handler_count(&self) -> usize {
        self.handlers().len()
    }

    /// Controls whether records continue to the parent's handlers.
    fn set_propagate(&self, propagate: bool);

    /// Whether records continue to the parent's handlers.
    fn propagate(&self) -> bool;

    /// Gives every attached handler a copy of `formatter`.
    fn set_formatter(&self, formatter: &Formatter) {
        for (_, handler) in self.handlers() {
            handler.set_formatter(formatter.clone());
        }
    }

    /// Builds a record for this logger.
    fn make_record(&self, level: Level, message: String, location: &'static Location<'static>) -> Record {
        Record::new(self.name(), level, message).with_location(location)
    }

    /// Dispatches a record to the handlers.
    fn handle_record(&self, record: &Record) -> Result<()>;
}
