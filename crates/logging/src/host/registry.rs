use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::record::mark_process_start;
use super::{Handler, HandlerId, HostLogger, Record};
use crate::error::Result;
use crate::levels::Level;
use crate::tracing_macros::trace_config;

/// Name of the logger at the top of the hierarchy.
pub const ROOT_NAME: &str = "root";

struct LoggerState {
    /// `None` inherits from the nearest ancestor with a level.
    level: Option<Level>,
    handlers: Vec<(HandlerId, Arc<dyn Handler>)>,
    propagate: bool,
}

/// A named logger owned by the process-wide [`Registry`].
///
/// Loggers form a tree through dotted names: `app.db` is a child of `app`,
/// which is a child of the root. A logger without its own level uses its
/// nearest ancestor's, and records are offered to ancestors' handlers while
/// `propagate` is set.
pub struct CoreLogger {
    name: String,
    parent: RwLock<Option<Arc<CoreLogger>>>,
    state: RwLock<LoggerState>,
}

impl CoreLogger {
    fn new(name: impl Into<String>, level: Option<Level>, parent: Option<Arc<Self>>) -> Self {
        Self {
            name: name.into(),
            parent: RwLock::new(parent),
            state: RwLock::new(LoggerState {
                level,
                handlers: Vec::new(),
                propagate: true,
            }),
        }
    }

    /// A standalone logger with no parent, not registered anywhere.
    ///
    /// Useful for isolated tests and for embedding a logger whose records
    /// must never reach the process-wide hierarchy.
    #[must_use]
    pub fn detached(name: impl Into<String>, level: Level) -> Self {
        Self::new(name, Some(level), None)
    }

    fn read(&self) -> RwLockReadGuard<'_, LoggerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LoggerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// The logger's parent in the hierarchy, if any.
    #[must_use]
    pub fn parent(&self) -> Option<Arc<Self>> {
        self.parent.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_parent(&self, parent: Arc<Self>) {
        *self.parent.write().unwrap_or_else(PoisonError::into_inner) = Some(parent);
    }

    /// The level set on this logger itself, without inheritance.
    #[must_use]
    pub fn own_level(&self) -> Option<Level> {
        self.read().level
    }

    /// Emits to this logger's own handlers. Returns whether the record
    /// should continue to the parent.
    fn emit_local(&self, record: &Record, found: &mut usize, first_error: &mut Option<crate::Error>) -> bool {
        let (handlers, propagate) = {
            let state = self.read();
            (state.handlers.clone(), state.propagate)
        };
        for (_, handler) in handlers {
            *found += 1;
            if let Err(err) = handler.emit(record)
                && first_error.is_none()
            {
                *first_error = Some(err);
            }
        }
        propagate
    }
}

impl std::fmt::Debug for CoreLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("CoreLogger")
            .field("name", &self.name)
            .field("level", &state.level)
            .field("handlers", &state.handlers.len())
            .field("propagate", &state.propagate)
            .finish()
    }
}

impl HostLogger for CoreLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> Level {
        if let Some(level) = self.own_level() {
            return level;
        }
        let mut ancestor = self.parent();
        while let Some(logger) = ancestor {
            if let Some(level) = logger.own_level() {
                return level;
            }
            ancestor = logger.parent();
        }
        Level::WARNING
    }

    fn set_level(&self, level: Level) {
        self.write().level = Some(level);
    }

    fn add_handler(&self, handler: Arc<dyn Handler>) -> HandlerId {
        let id = HandlerId::next();
        trace_config!("logger {:?}: attached handler {}", self.name, handler.target());
        self.write().handlers.push((id, handler));
        id
    }

    fn remove_handler(&self, id: HandlerId) -> bool {
        let mut state = self.write();
        let before = state.handlers.len();
        state.handlers.retain(|(existing, _)| *existing != id);
        let removed = state.handlers.len() != before;
        if removed {
            trace_config!("logger {:?}: removed handler {:?}", self.name, id);
        }
        removed
    }

    fn clear_handlers(&self) -> usize {
        let removed = std::mem::take(&mut self.write().handlers);
        for (_, handler) in &removed {
            let _ = handler.flush();
        }
        trace_config!("logger {:?}: cleared {} handler(s)", self.name, removed.len());
        removed.len()
    }

    fn handlers(&self) -> Vec<(HandlerId, Arc<dyn Handler>)> {
        self.read().handlers.clone()
    }

    fn handler_count(&self) -> usize {
        self.read().handlers.len()
    }

    fn set_propagate(&self, propagate: bool) {
        self.write().propagate = propagate;
    }

    fn propagate(&self) -> bool {
        self.read().propagate
    }

    /// Offers the record to this logger's handlers and, while propagation
    /// allows, to every ancestor's. When no handler exists anywhere on the
    /// path, records at WARNING or above are written bare to stderr.
    ///
    /// Every handler is tried; the first failure is returned.
    fn handle_record(&self, record: &Record) -> Result<()> {
        let mut found = 0;
        let mut first_error = None;
        let mut propagate = self.emit_local(record, &mut found, &mut first_error);
        let mut ancestor = self.parent();
        while propagate {
            let Some(logger) = ancestor else { break };
            propagate = logger.emit_local(record, &mut found, &mut first_error);
            ancestor = logger.parent();
        }

        if found == 0 && record.level() >= Level::WARNING {
            let mut stderr = io::stderr().lock();
            writeln!(stderr, "{}", record.message())?;
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// Process-wide table of named loggers.
pub struct Registry {
    root: Arc<CoreLogger>,
    loggers: Mutex<HashMap<String, Arc<CoreLogger>>>,
}

impl Registry {
    fn new() -> Self {
        Self {
            root: Arc::new(CoreLogger::new(ROOT_NAME, Some(Level::WARNING), None)),
            loggers: Mutex::new(HashMap::new()),
        }
    }

    /// The root logger.
    #[must_use]
    pub fn root(&self) -> Arc<CoreLogger> {
        Arc::clone(&self.root)
    }

    /// Returns the logger called `name`, creating it (and linking it into
    /// the hierarchy) on first use. An empty name or `"root"` is the root.
    pub fn get_logger(&self, name: &str) -> Arc<CoreLogger> {
        if name.is_empty() || name == ROOT_NAME {
            return self.root();
        }
        let mut loggers = self.loggers.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = loggers.get(name) {
            return Arc::clone(existing);
        }

        let parent = ancestors(name)
            .find_map(|ancestor| loggers.get(ancestor).cloned())
            .unwrap_or_else(|| self.root());
        let logger = Arc::new(CoreLogger::new(name, None, Some(parent)));

        // Children created earlier may point past the new logger; relink them.
        let prefix = format!("{name}.");
        for child in loggers.values().filter(|child| child.name.starts_with(&prefix)) {
            let skips_new = child
                .parent()
                .is_none_or(|current| !current.name.starts_with(&prefix));
            if skips_new {
                child.set_parent(Arc::clone(&logger));
            }
        }

        loggers.insert(name.to_owned(), Arc::clone(&logger));
        logger
    }

    /// Reports whether a logger called `name` has been created.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        name == ROOT_NAME
            || self
                .loggers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .contains_key(name)
    }

    /// Names of every created logger, sorted; the root is not included.
    #[must_use]
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .loggers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("loggers", &self.logger_names())
            .finish_non_exhaustive()
    }
}

/// `a.b.c` yields `a.b`, then `a`.
fn ancestors(name: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(name.rsplit_once('.').map(|(head, _)| head), |current| {
        current.rsplit_once('.').map(|(head, _)| head)
    })
}

/// The process-wide registry.
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        mark_process_start();
        Registry::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Formatter, StreamHandler};
    use finelog_sink::SharedBuffer;

    fn capture(logger: &CoreLogger) -> SharedBuffer {
        let buffer = SharedBuffer::new();
        logger.add_handler(Arc::new(StreamHandler::new("<buffer>", buffer.clone())));
        buffer
    }

    #[test]
    fn ancestors_walk_dotted_names() {
        assert_eq!(ancestors("a.b.c").collect::<Vec<_>>(), vec!["a.b", "a"]);
        assert_eq!(ancestors("solo").count(), 0);
    }

    #[test]
    fn effective_level_comes_from_nearest_ancestor() {
        let registry = Registry::new();
        let parent = registry.get_logger("svc");
        let child = registry.get_logger("svc.worker");
        assert_eq!(child.level(), Level::WARNING);
        parent.set_level(Level::DEBUG3);
        assert_eq!(child.level(), Level::DEBUG3);
        assert!(child.is_enabled(Level::DEBUG3));
        assert!(!child.is_enabled(Level::DEBUG2));
    }

    #[test]
    fn late_intermediate_logger_is_relinked() {
        let registry = Registry::new();
        let leaf = registry.get_logger("a.b.c");
        assert_eq!(leaf.parent().unwrap().name(), ROOT_NAME);
        let middle = registry.get_logger("a.b");
        assert_eq!(leaf.parent().unwrap().name(), "a.b");
        let top = registry.get_logger("a");
        assert_eq!(middle.parent().unwrap().name(), "a");
        assert_eq!(leaf.parent().unwrap().name(), "a.b");
        assert!(Arc::ptr_eq(&top, &registry.get_logger("a")));
    }

    #[test]
    fn records_propagate_until_disabled() {
        let registry = Registry::new();
        let parent = registry.get_logger("p");
        let child = registry.get_logger("p.c");
        let upstream = capture(&parent);
        let local = capture(&child);

        child.handle_record(&Record::new("p.c", Level::ERROR, "both")).unwrap();
        child.set_propagate(false);
        child.handle_record(&Record::new("p.c", Level::ERROR, "local")).unwrap();

        assert_eq!(local.lines(), vec!["both", "local"]);
        assert_eq!(upstream.lines(), vec!["both"]);
    }

    #[test]
    fn handlers_can_be_removed_and_cleared() {
        let logger = CoreLogger::detached("x", Level::INFO);
        let first = logger.add_handler(Arc::new(StreamHandler::new("a", SharedBuffer::new())));
        logger.add_handler(Arc::new(StreamHandler::new("b", SharedBuffer::new())));
        assert!(logger.remove_handler(first));
        assert!(!logger.remove_handler(first));
        assert_eq!(logger.handler_count(), 1);
        assert_eq!(logger.clear_handlers(), 1);
        assert_eq!(logger.handler_count(), 0);
    }

    #[test]
    fn formatter_restamps_every_handler() {
        let logger = CoreLogger::detached("x", Level::INFO);
        let buffer = capture(&logger);
        logger.set_formatter(&Formatter::new("{name}|{message}", None).unwrap());
        logger.handle_record(&Record::new("x", Level::INFO, "m")).unwrap();
        assert_eq!(buffer.lines(), vec!["x|m"]);
    }

    #[test]
    fn registry_tracks_names() {
        let registry = Registry::new();
        registry.get_logger("b");
        registry.get_logger("a");
        assert!(registry.exists("a"));
        assert!(registry.exists(ROOT_NAME));
        assert!(!registry.exists("c"));
        assert_eq!(registry.logger_names(), vec!["a", "b"]);
        assert!(Arc::ptr_eq(&registry.get_logger(""), &registry.root()));
    }
}
