//! Shared output stream.
//!
//! # Responsibilities
//! - Own the byte stream every handler in one lineage writes to
//! - Serialize writes so two rendered lines never interleave
//!
//! # Design Decisions
//! - Formatting happens outside the lock; only the final write is serialized
//! - Each line is written with one `write_all` and flushed before the lock
//!   is released, so unterminated console lines still reach the terminal
//! - A poisoned lock is recovered rather than propagated as a panic

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Whether a handler terminates each rendered record with a newline.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineMode {
    #[default]
    WithNewline,
    WithoutNewline,
}

impl LineMode {
    pub const fn append_newline(self) -> bool {
        matches!(self, Self::WithNewline)
    }
}

/// Clonable handle to a mutex-guarded writer. Clones share the writer and
/// the lock.
#[derive(Clone)]
pub struct Sink {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Sink {
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Write `line` as one unit. The lock is released when this returns,
    /// whether or not the write succeeded.
    pub fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(line)?;
        writer.flush()
    }

    /// Whether two handles refer to the same underlying writer.
    pub fn same_as(&self, other: &Sink) -> bool {
        Arc::ptr_eq(&self.writer, &other.writer)
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("handles", &Arc::strong_count(&self.writer))
            .finish()
    }
}
