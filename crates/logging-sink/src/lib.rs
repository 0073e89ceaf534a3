#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! Writer-side building blocks for the `finelog` handlers. A handler turns a
//! record into text and passes it to a [`MessageSink`], which owns the
//! destination and appends the terminator chosen by its [`LineMode`].
//!
//! [`SharedBuffer`] is an in-memory destination whose clones share one
//! buffer, so a test can keep one clone and give another to a handler.
//!
//! # Invariants
//!
//! - Message text is forwarded byte for byte.
//! - A message and its terminator reach the writer in a single `write_all`,
//!   so a multi-line banner is never split between concurrent writers that
//!   share the sink behind a lock.
//!
//! # Examples
//!
//! ```
//! use finelog_sink::{LineMode, MessageSink, SharedBuffer};
//!
//! let out = SharedBuffer::new();
//! let mut sink = MessageSink::new(out.clone());
//! sink.write("INFO> ready")?;
//! sink.set_line_mode(LineMode::Raw);
//! sink.write("50%... ")?;
//! sink.write("100%")?;
//!
//! assert_eq!(out.contents(), "INFO> ready\n50%... 100%");
//! # Ok::<(), std::io::Error>(())
//! ```

mod line_mode;
mod shared;
mod sink;

pub use line_mode::LineMode;
pub use shared::SharedBuffer;
pub use sink::MessageSink;
