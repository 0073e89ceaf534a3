use std::panic::Location;
use std::path::Path;
use std::sync::OnceLock;
use std::thread;
use std::time::Instant;

use chrono::{DateTime, Local};
use serde_json::{Map, Value, json};

use crate::levels::Level;

static PROCESS_START: OnceLock<Instant> = OnceLock::new();

/// Marks the reference point for `relativeCreated`. Called when the
/// registry is first touched; later calls are no-ops.
pub(crate) fn mark_process_start() -> Instant {
    *PROCESS_START.get_or_init(Instant::now)
}

fn process_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "MainProcess".to_owned())
}

/// `ThreadId(7)` formats as `ThreadId(7)`; keep only the number.
fn thread_number(id: thread::ThreadId) -> u64 {
    format!("{id:?}")
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}

/// One log event, captured when a logger decides to emit.
#[derive(Clone, Debug)]
pub struct Record {
    name: String,
    level: Level,
    message: String,
    created: DateTime<Local>,
    relative_ms: f64,
    location: Option<&'static Location<'static>>,
    thread_id: u64,
    thread_name: String,
    process: u32,
}

impl Record {
    /// Captures a record for logger `name` at the current time on the current thread.
    pub fn new(name: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        let start = mark_process_start();
        let current = thread::current();
        Self {
            name: name.into(),
            level,
            message: message.into(),
            created: Local::now(),
            relative_ms: start.elapsed().as_secs_f64() * 1000.0,
            location: None,
            thread_id: thread_number(current.id()),
            thread_name: current.name().unwrap_or("unnamed").to_owned(),
            process: std::process::id(),
        }
    }

    /// Attaches the source location of the logging call.
    #[must_use]
    pub const fn with_location(mut self, location: &'static Location<'static>) -> Self {
        self.location = Some(location);
        self
    }

    /// Name of the logger that created the record.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Severity.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Rendered message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Wall-clock creation time.
    #[must_use]
    pub const fn created(&self) -> &DateTime<Local> {
        &self.created
    }

    /// Source location of the logging call, when captured.
    #[must_use]
    pub const fn location(&self) -> Option<&'static Location<'static>> {
        self.location
    }

    /// Name of the emitting thread (`unnamed` when it has none).
    #[must_use]
    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    /// Field map used by formatter patterns. `asctime` is supplied by the
    /// formatter because it depends on the time format.
    pub(crate) fn fields(&self, asctime: Option<String>) -> Map<String, Value> {
        let pathname = self.location.map_or("", Location::file);
        let filename = Path::new(pathname)
            .file_name()
            .map_or_else(String::new, |name| name.to_string_lossy().into_owned());
        let module = Path::new(pathname)
            .file_stem()
            .map_or_else(|| "unknown".to_owned(), |stem| stem.to_string_lossy().into_owned());
        let created = self.created.timestamp_millis() as f64 / 1000.0;

        let mut fields = Map::new();
        fields.insert("name".into(), json!(self.name));
        fields.insert("levelname".into(), json!(self.level.name()));
        fields.insert("levelno".into(), json!(self.level.value()));
        fields.insert("message".into(), json!(self.message));
        fields.insert("created".into(), json!(created));
        fields.insert("msecs".into(), json!(f64::from(self.created.timestamp_subsec_millis())));
        fields.insert("relativeCreated".into(), json!(self.relative_ms));
        fields.insert("pathname".into(), json!(pathname));
        fields.insert("filename".into(), json!(filename));
        fields.insert("module".into(), json!(module));
        fields.insert("lineno".into(), json!(self.location.map_or(0, Location::line)));
        fields.insert("funcName".into(), json!("(unknown function)"));
        fields.insert("process".into(), json!(self.process));
        fields.insert("processName".into(), json!(process_name()));
        fields.insert("thread".into(), json!(self.thread_id));
        fields.insert("threadName".into(), json!(self.thread_name));
        if let Some(asctime) = asctime {
            fields.insert("asctime".into(), Value::String(asctime));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_expose_location_and_level() {
        let record = Record::new("app.db", Level::INFO3, "connected").with_location(Location::caller());
        let fields = record.fields(None);
        assert_eq!(fields["name"], json!("app.db"));
        assert_eq!(fields["levelname"], json!("INFO3"));
        assert_eq!(fields["levelno"], json!(23));
        assert_eq!(fields["message"], json!("connected"));
        assert_eq!(fields["filename"], json!("record.rs"));
        assert_eq!(fields["module"], json!("record"));
        assert!(fields["lineno"].as_u64().unwrap() > 0);
        assert!(!fields.contains_key("asctime"));
    }

    #[test]
    fn missing_location_yields_placeholders() {
        let fields = Record::new("x", Level(61), "m").fields(Some("now".into()));
        assert_eq!(fields["levelname"], json!("LEVEL61"));
        assert_eq!(fields["pathname"], json!(""));
        assert_eq!(fields["lineno"], json!(0));
        assert_eq!(fields["asctime"], json!("now"));
    }

    #[test]
    fn thread_number_extracts_digits() {
        assert!(thread_number(thread::current().id()) > 0);
    }
}
