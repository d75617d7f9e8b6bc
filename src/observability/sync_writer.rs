//! Mutex-guarded output sink.
//!
//! # Responsibilities
//! - Serialize writes from concurrent request handlers onto one destination
//! - Hand out writers to the `tracing` fmt layer
//!
//! # Design Decisions
//! - Every call takes the lock and releases it when the guard drops
//! - `write_all` holds the lock for the whole buffer so a log entry is never split
//! - No buffering, no retry: delegate errors are returned unchanged

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing_subscriber::fmt::MakeWriter;

/// A shared writer whose writes are totally ordered.
///
/// Clones share the same destination and the same lock.
#[derive(Debug)]
pub struct SyncWriter<W> {
    inner: Arc<Mutex<W>>,
}

impl<W: Write> SyncWriter<W> {
    /// Wrap a destination.
    pub fn new(inner: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    // A panic in another writer leaves `W` no worse than a failed write would.
    fn lock(&self) -> MutexGuard<'_, W> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the destination while holding the lock.
    pub fn with_inner<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.lock())
    }
}

impl<W> Clone for SyncWriter<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W: Write> Write for &SyncWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flush()
    }
}

impl<W: Write> Write for SyncWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self).write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        (&*self).write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (&*self).flush()
    }
}

impl<'a, W> MakeWriter<'a> for SyncWriter<W>
where
    W: Write + 'a,
{
    type Writer = &'a SyncWriter<W>;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}
