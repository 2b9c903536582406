//! Consumer side of the agent: periodically drains the shared store.

use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

use cyclicbuf_core::capture::drain_store;
use cyclicbuf_core::RingStore;
use tracing::debug;

/// Drain `store` into `out` every `interval` until `finished` reports
/// `true`, then drain one final time. Returns the total number of bytes
/// written.
///
/// The final drain only runs once `finished` turns `true`, which for the
/// agent means the serial reader thread ended on its own (port EOF). A
/// serial port seldom reports EOF, so the agent usually runs until it is
/// killed, and bytes pushed after the last periodic drain (at most one
/// `interval` worth) are lost with the process.
pub fn run_consumer<W: Write>(
    store: &Mutex<RingStore>,
    out: &mut W,
    interval: Duration,
    finished: impl Fn() -> bool,
) -> std::io::Result<u64> {
    let mut total: u64 = 0;

    while !finished() {
        total += drain_store(store, out)? as u64;
        std::thread::sleep(interval);
    }
    total += drain_store(store, out)? as u64;

    debug!(total, "Consumer finished");
    Ok(total)
}
