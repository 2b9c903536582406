use std::fmt;

use tracing::{debug, warn};

use super::addressing::Addressing;
use crate::errors::StoreError;

/// Default store capacity: 1 MiB.
pub const DEFAULT_CAPACITY: usize = 1_048_576;

/// Fixed-capacity byte store with movable borders and push/pop cursors.
///
/// The backing block holds `total_size()` bytes. The active window is the
/// closed range `[bottom, top]` inside it; both cursors always lie in that
/// window and wrap from `top` back to `bottom`.
///
/// The producer has priority: [`push`](Self::push) never fails and will
/// overwrite unread bytes if the consumer falls behind. When the write
/// cursor laps the read cursor and lands on it, the unread data is
/// indistinguishable from an empty store.
///
/// The [`io::Read`](std::io::Read) impl returns `Ok(0)` whenever nothing is
/// unread, so `read_to_end` and friends treat a momentarily empty store as
/// end of stream. Poll with [`is_empty`](Self::is_empty) or
/// [`pop`](Self::pop) when more bytes are still expected.
///
/// There is no internal locking. Share across threads as
/// `Arc<Mutex<RingStore>>`.
pub struct RingStore {
    data: Vec<u8>,
    bottom: usize,
    top: usize,
    /// Next slot `push` overwrites.
    write_pos: usize,
    /// Next slot `pop` returns.
    read_pos: usize,
}

impl RingStore {
    /// Allocate a zeroed store of `capacity` bytes with the window spanning
    /// the whole block.
    pub fn new(capacity: usize) -> Result<Self, StoreError> {
        if capacity == 0 {
            return Err(StoreError::InvalidSize);
        }

        let mut data = Vec::new();
        if data.try_reserve_exact(capacity).is_err() {
            warn!(capacity, "Ring store allocation failed");
            return Err(StoreError::AllocationFailure {
                requested: capacity,
            });
        }
        data.resize(capacity, 0);

        Ok(Self {
            data,
            bottom: 0,
            top: capacity - 1,
            write_pos: 0,
            read_pos: 0,
        })
    }

    /// Write `byte` at the write cursor and advance it, wrapping at `top`.
    pub fn push(&mut self, byte: u8) {
        self.data[self.write_pos] = byte;
        self.write_pos = self.next_pos(self.write_pos);
    }

    /// Push every byte of `bytes` in order.
    pub fn push_slice(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.push(byte);
        }
    }

    /// Return the byte at the read cursor and advance it, wrapping at `top`.
    ///
    /// Returns `None` without moving when the read cursor has caught up
    /// with the write cursor.
    pub fn pop(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let byte = self.data[self.read_pos];
        self.read_pos = self.next_pos(self.read_pos);
        Some(byte)
    }

    /// Pop into `buf` until it is full or nothing is left. Returns the
    /// number of bytes written to `buf`.
    pub fn pop_into(&mut self, buf: &mut [u8]) -> usize {
        let mut n = 0;
        while n < buf.len() {
            match self.pop() {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        n
    }

    /// `true` when the read cursor sits on the write cursor.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read_pos == self.write_pos
    }

    /// Number of bytes `pop` would return before reporting empty.
    pub fn unread_len(&self) -> usize {
        if self.write_pos >= self.read_pos {
            self.write_pos - self.read_pos
        } else {
            (self.top - self.read_pos + 1) + (self.write_pos - self.bottom)
        }
    }

    /// Move the read cursor to absolute position `index` in the window.
    pub fn set_pop_index(&mut self, index: usize) -> Result<(), StoreError> {
        self.read_pos = self.check_cursor(index)?;
        Ok(())
    }

    /// Move the write cursor to absolute position `index` in the window.
    pub fn set_push_index(&mut self, index: usize) -> Result<(), StoreError> {
        self.write_pos = self.check_cursor(index)?;
        Ok(())
    }

    /// Move the top border to `index`.
    ///
    /// Slots gained by growing the window are zeroed. Slots dropped by
    /// shrinking it keep their contents. A cursor left above the new top
    /// is sent back to `bottom`.
    pub fn set_top_index(&mut self, index: usize) -> Result<(), StoreError> {
        let highest = self.highest_index();
        if index > highest {
            return Err(StoreError::IndexGreater {
                index,
                limit: highest,
            });
        }
        if index < self.bottom {
            return Err(StoreError::IndexCollisionLess {
                index,
                bottom: self.bottom,
            });
        }

        if index > self.top {
            self.data[self.top + 1..=index].fill(0);
        }
        debug!(from = self.top, to = index, "Moving top border");
        self.top = index;

        if self.write_pos > self.top {
            self.write_pos = self.bottom;
        }
        if self.read_pos > self.top {
            self.read_pos = self.bottom;
        }
        Ok(())
    }

    /// Move the bottom border to `index`.
    ///
    /// Slots gained by growing the window downward are zeroed. Slots dropped
    /// by shrinking it keep their contents. A cursor left below the new
    /// bottom is moved up to it.
    pub fn set_bottom_index(&mut self, index: usize) -> Result<(), StoreError> {
        let highest = self.highest_index();
        if index > highest {
            return Err(StoreError::IndexGreater {
                index,
                limit: highest,
            });
        }
        if index > self.top {
            return Err(StoreError::IndexCollisionGreater {
                index,
                top: self.top,
            });
        }

        if index < self.bottom {
            self.data[index..self.bottom].fill(0);
        }
        debug!(from = self.bottom, to = index, "Moving bottom border");
        self.bottom = index;

        if self.write_pos < self.bottom {
            self.write_pos = self.bottom;
        }
        if self.read_pos < self.bottom {
            self.read_pos = self.bottom;
        }
        Ok(())
    }

    /// Reallocate the backing block to `new_size` bytes.
    ///
    /// Contents up to `min(old, new)` are kept; bytes gained by growing are
    /// zero and lie above `top`, which a grow does not move. On shrink,
    /// borders above the new highest index are clamped to it, and either
    /// cursor above it is sent back to `bottom`. If the allocation fails
    /// the store is left untouched.
    pub fn resize(&mut self, new_size: usize) -> Result<(), StoreError> {
        if new_size == 0 {
            return Err(StoreError::IncorrectSize);
        }
        let old_size = self.data.len();
        if new_size == old_size {
            return Ok(());
        }

        if new_size > old_size {
            if self.data.try_reserve_exact(new_size - old_size).is_err() {
                warn!(from = old_size, to = new_size, "Ring store reallocation failed");
                return Err(StoreError::AllocationFailure {
                    requested: new_size,
                });
            }
            self.data.resize(new_size, 0);
        } else {
            self.data.truncate(new_size);
            self.data.shrink_to_fit();
        }
        debug!(from = old_size, to = new_size, "Resized ring store");

        let highest = new_size - 1;
        self.top = self.top.min(highest);
        self.bottom = self.bottom.min(highest);
        if self.read_pos > highest {
            self.read_pos = self.bottom;
        }
        if self.write_pos > highest {
            self.write_pos = self.bottom;
        }
        Ok(())
    }

    /// Restore the freshly-constructed state: window over the whole block,
    /// cursors at `0`, every byte zeroed. Does not reallocate.
    pub fn reset(&mut self) {
        self.top = self.highest_index();
        self.bottom = 0;
        self.read_pos = 0;
        self.write_pos = 0;
        self.data.fill(0);
        debug!(capacity = self.data.len(), "Reset ring store");
    }

    /// Zero every byte of the window `[bottom, top]`, `top` included.
    /// Cursors and borders stay where they are.
    pub fn clear(&mut self) {
        self.data[self.bottom..=self.top].fill(0);
    }

    /// Read the byte at `index` under `addressing`, or `None` if the mode
    /// does not allow that position.
    pub fn value_at(&self, index: usize, addressing: Addressing) -> Option<u8> {
        let pos = addressing.resolve(index, self.data.len(), self.bottom, self.top)?;
        Some(self.data[pos])
    }

    /// Overwrite the byte at `index` under `addressing`.
    pub fn set_value_at(
        &mut self,
        index: usize,
        value: u8,
        addressing: Addressing,
    ) -> Result<(), StoreError> {
        let pos = addressing
            .resolve(index, self.data.len(), self.bottom, self.top)
            .ok_or(StoreError::IndexOutOfRange { index })?;
        self.data[pos] = value;
        Ok(())
    }

    /// Window-relative read; `get(0)` is the byte at `bottom`.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.value_at(index, Addressing::WINDOW)
    }

    /// Window-relative write; `set(0, v)` writes the byte at `bottom`.
    pub fn set(&mut self, index: usize, value: u8) -> Result<(), StoreError> {
        self.set_value_at(index, value, Addressing::WINDOW)
    }

    /// Size of the backing block in bytes.
    #[inline]
    pub fn total_size(&self) -> usize {
        self.data.len()
    }

    /// Size of the active window in bytes.
    #[inline]
    pub fn window_size(&self) -> usize {
        self.top - self.bottom + 1
    }

    #[inline]
    pub fn pop_index(&self) -> usize {
        self.read_pos
    }

    #[inline]
    pub fn push_index(&self) -> usize {
        self.write_pos
    }

    #[inline]
    pub fn bottom_index(&self) -> usize {
        self.bottom
    }

    #[inline]
    pub fn top_index(&self) -> usize {
        self.top
    }

    /// The active window `[bottom, top]` as a slice.
    pub fn window(&self) -> &[u8] {
        &self.data[self.bottom..=self.top]
    }

    fn check_cursor(&self, index: usize) -> Result<usize, StoreError> {
        if index > self.top {
            return Err(StoreError::IndexGreater {
                index,
                limit: self.top,
            });
        }
        if index < self.bottom {
            return Err(StoreError::IndexLess {
                index,
                limit: self.bottom,
            });
        }
        Ok(index)
    }

    #[inline]
    fn highest_index(&self) -> usize {
        self.data.len() - 1
    }

    #[inline]
    fn next_pos(&self, pos: usize) -> usize {
        if pos >= self.top {
            self.bottom
        } else {
            pos + 1
        }
    }
}

impl fmt::Debug for RingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingStore")
            .field("capacity", &self.data.len())
            .field("bottom", &self.bottom)
            .field("top", &self.top)
            .field("write_pos", &self.write_pos)
            .field("read_pos", &self.read_pos)
            .finish()
    }
}
