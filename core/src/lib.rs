pub mod buffer;
pub mod capture;
pub mod config;
pub mod errors;
#[cfg(feature = "serial")]
pub mod serial;

pub use buffer::{Addressing, Origin, RingStore, Scope};
pub use errors::{CaptureError, CoreError, StoreError};
