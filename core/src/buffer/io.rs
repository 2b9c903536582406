//! Standard I/O and collection traits for [`RingStore`].

use std::io;

use super::RingStore;

/// Pushes every byte; a write is never short, older unread bytes are
/// overwritten instead.
impl io::Write for RingStore {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.push_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Pops until `buf` is full or nothing is unread. `Ok(0)` means empty, not
/// end of stream.
impl io::Read for RingStore {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.pop_into(buf))
    }
}

impl Extend<u8> for RingStore {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        for byte in iter {
            self.push(byte);
        }
    }
}

impl<'a> Extend<&'a u8> for RingStore {
    fn extend<I: IntoIterator<Item = &'a u8>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};

    use super::*;

    #[test]
    fn write_then_read() {
        let mut rb = RingStore::new(16).unwrap();
        rb.write_all(b"hello").unwrap();
        let mut out = String::new();
        rb.read_to_string(&mut out).unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn write_overflowing_is_not_short() {
        let mut rb = RingStore::new(4).unwrap();
        assert_eq!(rb.write(b"ABCDEF").unwrap(), 6);
        assert_eq!(rb.window(), b"EFCD");
    }

    #[test]
    fn read_on_empty_returns_zero() {
        let mut rb = RingStore::new(4).unwrap();
        let mut buf = [0u8; 4];
        assert_eq!(rb.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn read_to_end_stops_at_empty_store_and_resumes_after_push() {
        let mut rb = RingStore::new(8).unwrap();
        rb.push_slice(b"ab");
        let mut out = Vec::new();
        assert_eq!(rb.read_to_end(&mut out).unwrap(), 2);
        assert!(rb.is_empty());

        rb.push_slice(b"cd");
        assert_eq!(rb.read_to_end(&mut out).unwrap(), 2);
        assert_eq!(out, b"abcd");
    }

    #[test]
    fn copy_between_stores() {
        let mut src = RingStore::new(8).unwrap();
        let mut dst = RingStore::new(8).unwrap();
        src.push_slice(b"serial");
        let copied = io::copy(&mut src, &mut dst).unwrap();
        assert_eq!(copied, 6);
        assert!(src.is_empty());
        assert_eq!(dst.unread_len(), 6);
    }

    #[test]
    fn extend_from_iterators() {
        let mut rb = RingStore::new(8).unwrap();
        rb.extend([1u8, 2, 3]);
        rb.extend(&[4u8, 5]);
        assert_eq!(rb.unread_len(), 5);
        assert_eq!(&rb.window()[..5], &[1, 2, 3, 4, 5]);
    }
}
