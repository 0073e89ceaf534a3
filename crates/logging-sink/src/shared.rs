use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable in-memory writer whose clones all append to the same buffer.
///
/// Handing one clone to a handler and keeping another lets the caller read
/// back everything the handler wrote.
///
/// ```
/// use std::io::Write;
/// use finelog_sink::SharedBuffer;
///
/// let buffer = SharedBuffer::new();
/// let mut writer = buffer.clone();
/// writer.write_all(b"hello\n")?;
/// assert_eq!(buffer.contents(), "hello\n");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the buffered bytes decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Returns the buffered output split into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Drains the buffer and returns what it held.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Number of bytes currently buffered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether nothing has been written since creation or the last [`take`](Self::take).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let buffer = SharedBuffer::new();
        let mut a = buffer.clone();
        let mut b = buffer.clone();
        a.write_all(b"one\n").unwrap();
        b.write_all(b"two\n").unwrap();
        assert_eq!(buffer.lines(), vec!["one", "two"]);
    }

    #[test]
    fn take_drains_buffer() {
        let buffer = SharedBuffer::new();
        buffer.clone().write_all(b"abc").unwrap();
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.take(), "abc");
        assert!(buffer.is_empty());
    }
}
