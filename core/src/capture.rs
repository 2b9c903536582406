//! Producer and consumer helpers around a shared [`RingStore`].
//!
//! The producer side reads from any blocking [`Read`] source (a serial port,
//! a socket, a file) into the store; the consumer side drains whatever is
//! unread into a [`Write`] sink. Both take the store behind a `Mutex` and
//! hold the lock only for the duration of one store call sequence.

use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tracing::debug;

use crate::buffer::RingStore;
use crate::errors::CaptureError;

/// Bytes requested from the source per read call.
pub const READ_CHUNK_SIZE: usize = 1024;

/// Pause before retrying a non-blocking source that had nothing to read.
const WOULD_BLOCK_BACKOFF: Duration = Duration::from_millis(5);

/// Read from `reader` into `store` until EOF or until `closed` is set.
///
/// Timeouts and `Interrupted` are retried at once. `WouldBlock` is retried
/// after a short pause, so a non-blocking source does not spin. Any other
/// read error is returned as [`CaptureError::Io`]. Returns the total number
/// of bytes pushed.
pub fn feed_store<R: Read + ?Sized>(
    reader: &mut R,
    store: &Mutex<RingStore>,
    closed: &AtomicBool,
) -> Result<u64, CaptureError> {
    let mut buf = [0u8; READ_CHUNK_SIZE];
    let mut total: u64 = 0;

    loop {
        if closed.load(Ordering::SeqCst) {
            debug!(total, "Capture stopped by request");
            return Ok(total);
        }

        match reader.read(&mut buf) {
            Ok(0) => {
                debug!(total, "Capture source reached EOF");
                return Ok(total);
            }
            Ok(n) => {
                lock(store).push_slice(&buf[..n]);
                total += n as u64;
            }
            Err(ref e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
                ) =>
            {
                continue;
            }
            Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => {
                std::thread::sleep(WOULD_BLOCK_BACKOFF);
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Pop every unread byte from `store` and write it to `out`.
///
/// The lock is released before writing, so a slow sink never stalls the
/// producer. Returns the number of bytes written.
pub fn drain_store<W: Write + ?Sized>(store: &Mutex<RingStore>, out: &mut W) -> io::Result<usize> {
    let pending = {
        let mut store = lock(store);
        let mut pending = vec![0u8; store.unread_len()];
        let n = store.pop_into(&mut pending);
        pending.truncate(n);
        pending
    };

    if pending.is_empty() {
        return Ok(0);
    }
    out.write_all(&pending)?;
    out.flush()?;
    Ok(pending.len())
}

/// Lock the store, recovering it if a previous holder panicked. Every
/// store method leaves the borders and cursors consistent on return.
pub(crate) fn lock(store: &Mutex<RingStore>) -> MutexGuard<'_, RingStore> {
    store
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
