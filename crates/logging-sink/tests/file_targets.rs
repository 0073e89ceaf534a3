//! Integration tests for sinks writing into files and shared buffers.

use std::fs::{self, OpenOptions};
use std::io::Write;

use finelog_sink::{LineMode, MessageSink, SharedBuffer};

#[test]
fn sink_over_file_appends_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.log");

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .expect("open");
    let mut sink = MessageSink::new(file);
    sink.write("first").expect("write");
    sink.write("second").expect("write");
    sink.flush().expect("flush");
    drop(sink);

    assert_eq!(fs::read_to_string(&path).expect("read"), "first\nsecond\n");
}

#[test]
fn shared_buffer_observes_sink_output() {
    let buffer = SharedBuffer::new();
    let mut sink = MessageSink::new(buffer.clone());
    sink.write("INFO> hello").expect("write");

    assert_eq!(buffer.lines(), vec!["INFO> hello"]);
}

#[test]
fn boxed_writer_keeps_raw_line_mode() {
    let buffer = SharedBuffer::new();
    let writer: Box<dyn Write + Send> = Box::new(buffer.clone());
    let mut sink = MessageSink::with_line_mode(writer, LineMode::Raw);
    sink.write("no newline").expect("write");

    assert_eq!(sink.line_mode(), LineMode::Raw);
    assert_eq!(buffer.contents(), "no newline");
}
