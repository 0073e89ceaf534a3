use std::io::{self, Write};

use crate::line_mode::LineMode;

/// Writes rendered log messages to an [`std::io::Write`] destination.
///
/// Each message is handed to the writer in a single `write_all`, together
/// with its terminator when the [`LineMode`] asks for one. A banner or a
/// pretty-printed value spanning several lines therefore arrives as one
/// block.
///
/// ```
/// use finelog_sink::MessageSink;
///
/// let mut sink = MessageSink::new(Vec::new());
/// sink.write("WARNING> disk almost full")?;
/// sink.write("== done ==\n== ok ==")?;
///
/// assert_eq!(sink.messages_written(), 2);
/// assert_eq!(sink.into_inner(), b"WARNING> disk almost full\n== done ==\n== ok ==\n".to_vec());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct MessageSink<W> {
    writer: W,
    line_mode: LineMode,
    written: u64,
}

impl<W> MessageSink<W> {
    /// Wraps `writer`, terminating every message with a newline.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::Newline)
    }

    /// Wraps `writer` with an explicit [`LineMode`].
    #[must_use]
    pub const fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            writer,
            line_mode,
            written: 0,
        }
    }

    /// The current line mode.
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Changes the line mode for later writes.
    pub fn set_line_mode(&mut self, line_mode: LineMode) {
        self.line_mode = line_mode;
    }

    /// Messages written so far; a multi-line message counts once.
    #[must_use]
    pub const fn messages_written(&self) -> u64 {
        self.written
    }

    /// Borrows the destination.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Unwraps the destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MessageSink<W> {
    /// Writes one message.
    pub fn write(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        let message = message.as_ref();
        let terminator = self.line_mode.terminator();
        if terminator.is_empty() {
            self.writer.write_all(message.as_bytes())?;
        } else {
            let block = [message, terminator].concat();
            self.writer.write_all(block.as_bytes())?;
        }
        self.written += 1;
        Ok(())
    }

    /// Writes several messages, stopping at the first failure.
    pub fn write_all<I>(&mut self, messages: I) -> io::Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        messages.into_iter().try_for_each(|message| self.write(message))
    }

    /// Flushes the destination.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
