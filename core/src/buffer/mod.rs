//! Bordered ring store for decoupling byte producers from byte consumers.
//!
//! A [`RingStore`] owns one contiguous block and exposes an adjustable
//! sub-window of it (the "borders"). Producers [`push`](RingStore::push)
//! bytes, consumers [`pop`](RingStore::pop) them, and either side may use
//! indexed access through an [`Addressing`] mode.

mod addressing;
mod io;
mod ring_store;

pub use addressing::{Addressing, Origin, Scope};
pub use ring_store::{RingStore, DEFAULT_CAPACITY};
