//! Error types for the cyclicbuf core crate.
//!
//! [`StoreError`] is the outcome of every fallible [`RingStore`] call and is
//! returned directly; the store keeps no hidden "last error" state.
//! [`CaptureError`] covers the producer side (serial ports, readers) and
//! [`CoreError`] covers loading configuration.
//!
//! [`RingStore`]: crate::buffer::RingStore

use thiserror::Error;

/// Errors raised while loading a capture configuration.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A configuration error (invalid values, missing fields, parse failures).
    #[error("Config error: {0}")]
    Config(String),

    /// A low-level I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejections reported by [`RingStore`](crate::buffer::RingStore).
///
/// A store that returns one of these is left exactly as it was before the
/// call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Zero capacity requested at construction.
    #[error("Invalid size: a store needs at least one byte")]
    InvalidSize,

    /// Zero capacity requested from `resize`.
    #[error("Incorrect size: a store cannot be resized to zero bytes")]
    IncorrectSize,

    /// The backing block could not be allocated or grown.
    #[error("Allocation of {requested} bytes failed")]
    AllocationFailure { requested: usize },

    /// Index lies above the highest position the operation accepts.
    #[error("Index {index} is greater than {limit}")]
    IndexGreater { index: usize, limit: usize },

    /// Index lies below the bottom border.
    #[error("Index {index} is less than {limit}")]
    IndexLess { index: usize, limit: usize },

    /// New top border would fall below the bottom border.
    #[error("Top border {index} would fall below bottom border {bottom}")]
    IndexCollisionLess { index: usize, bottom: usize },

    /// New bottom border would rise above the top border.
    #[error("Bottom border {index} would rise above top border {top}")]
    IndexCollisionGreater { index: usize, top: usize },

    /// Indexed write outside the range allowed by the addressing mode.
    #[error("Index {index} is out of range")]
    IndexOutOfRange { index: usize },
}

/// Errors raised while feeding a store from a byte source.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// The capture configuration is invalid.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// The byte source could not be opened.
    #[error("Open failed: {0}")]
    OpenFailed(String),

    /// A low-level I/O error while reading.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display() {
        let err = StoreError::IndexGreater {
            index: 20,
            limit: 15,
        };
        assert_eq!(err.to_string(), "Index 20 is greater than 15");

        let err = StoreError::IndexCollisionLess {
            index: 2,
            bottom: 4,
        };
        assert_eq!(
            err.to_string(),
            "Top border 2 would fall below bottom border 4"
        );

        let err = StoreError::AllocationFailure { requested: 64 };
        assert_eq!(err.to_string(), "Allocation of 64 bytes failed");
    }

    #[test]
    fn capture_error_display() {
        let err = CaptureError::InvalidConfig("empty port".into());
        assert_eq!(err.to_string(), "Invalid config: empty port");

        let err = CaptureError::OpenFailed("/dev/ttyUSB9".into());
        assert_eq!(err.to_string(), "Open failed: /dev/ttyUSB9");
    }

    #[test]
    fn core_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let core_err: CoreError = io_err.into();
        assert_eq!(core_err.to_string(), "I/O error: gone");
    }

    #[test]
    fn capture_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe broke");
        let err: CaptureError = io_err.into();
        assert_eq!(err.to_string(), "I/O error: pipe broke");
    }
}
