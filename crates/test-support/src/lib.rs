//! Shared helpers for the finelog integration tests.
//!
//! Loggers live in a process-wide registry that every test in a binary
//! shares, so tests name their loggers with [`unique_name`] and capture
//! output through a [`SharedBuffer`] rather than the real stdout.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

pub use finelog_sink::SharedBuffer;
use tempfile::TempDir;

/// Creates a temporary directory removed when the returned value drops.
#[must_use]
pub fn scratch_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("finelog-test-")
        .tempdir()
        .expect("create scratch directory")
}

/// Reads a file and splits it into lines; a missing file reads as empty.
#[must_use]
pub fn read_lines(path: impl AsRef<Path>) -> Vec<String> {
    fs::read_to_string(path)
        .map(|text| text.lines().map(str::to_owned).collect())
        .unwrap_or_default()
}

/// A logger name no other caller in this process has received.
#[must_use]
pub fn unique_name(prefix: &str) -> String {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    format!("{prefix}.{}", NEXT.fetch_add(1, Ordering::Relaxed))
}

/// A fresh buffer for a stream target.
#[must_use]
pub fn capture() -> SharedBuffer {
    SharedBuffer::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_names_differ() {
        assert_ne!(unique_name("t"), unique_name("t"));
    }

    #[test]
    fn missing_files_read_as_empty() {
        let dir = scratch_dir();
        assert!(read_lines(dir.path().join("absent.log")).is_empty());
        fs::write(dir.path().join("two.log"), "a\nb\n").expect("write");
        assert_eq!(read_lines(dir.path().join("two.log")), ["a", "b"]);
    }
}
