use bytes::Bytes;
use tracing::trace;

use crate::byte;
use crate::error::{BufferError, Result};

/// Smallest region the buffer will allocate.
const MIN_CAPACITY: usize = 16;

/// A growable byte region with independent read and write cursors.
///
/// Unread data lives in `data[start..end]`; the span `[end, capacity)` is
/// free for writing. Reading never shrinks the allocation — already-read
/// space at the front is reclaimed by [`Buffer::ensure`] when the tail runs
/// out, so a steady-state producer/consumer pair settles into a fixed region
/// with amortized-constant compaction.
///
/// The peek/seek split lets callers scan the unread span without committing
/// to consuming it, which is what streaming parse loops need: nothing is
/// consumed until a complete record has been recognized.
#[derive(Debug, Default)]
pub struct Buffer {
    data: Vec<u8>,
    start: usize,
    end: usize,
}

fn good_size(size: usize) -> usize {
    let mut newsize = MIN_CAPACITY;
    while newsize < size {
        newsize <<= 1;
    }
    newsize
}

impl Buffer {
    /// Create an empty buffer. Does not allocate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of unread bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when no unread bytes remain.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Allocated region size.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Guarantee at least `space` free bytes are available for writing.
    ///
    /// Tries, in order: the tail as-is, compacting already-read front space,
    /// and finally reallocating to the next power of two that fits. Unread
    /// bytes are never discarded, and a redundant call is a no-op. The only
    /// failure is allocation failure, which leaves the buffer in its last
    /// valid state.
    pub fn ensure(&mut self, space: usize) -> Result<()> {
        if !self.data.is_empty() {
            let free = self.data.len() - self.end;
            if free >= space {
                return Ok(());
            }
            if free + self.start >= space {
                self.data.copy_within(self.start..self.end, 0);
                self.end -= self.start;
                self.start = 0;
                return Ok(());
            }
        }
        let unread = self.end - self.start;
        let nsize = good_size(unread + space);
        let mut ndata = Vec::new();
        ndata
            .try_reserve_exact(nsize)
            .map_err(|_| BufferError::AllocationFailed { requested: nsize })?;
        ndata.resize(nsize, 0);
        ndata[..unread].copy_from_slice(&self.data[self.start..self.end]);
        trace!(
            old_capacity = self.data.len(),
            new_capacity = nsize,
            "buffer region grown"
        );
        self.data = ndata;
        self.start = 0;
        self.end = unread;
        Ok(())
    }

    /// The unread span.
    pub fn read_peek(&self) -> &[u8] {
        &self.data[self.start..self.end]
    }

    /// Advance the read cursor by `n` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds the unread length. Callers validate against
    /// [`Buffer::read_peek`] first; use [`Buffer::skip`] for a checked
    /// variant.
    pub fn read_seek(&mut self, n: usize) {
        assert!(
            n <= self.end - self.start,
            "read_seek({n}) past end of unread data ({})",
            self.end - self.start
        );
        self.start += n;
    }

    /// The free span available for writing.
    pub fn write_peek(&mut self) -> &mut [u8] {
        let end = self.end;
        &mut self.data[end..]
    }

    /// Advance the write cursor by `n` bytes, committing bytes previously
    /// placed into [`Buffer::write_peek`].
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds the free span.
    pub fn write_seek(&mut self, n: usize) {
        assert!(
            n <= self.data.len() - self.end,
            "write_seek({n}) past end of free space ({})",
            self.data.len() - self.end
        );
        self.end += n;
    }

    /// Append `bytes`, growing the region if needed.
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure(bytes.len())?;
        self.write_peek()[..bytes.len()].copy_from_slice(bytes);
        self.write_seek(bytes.len());
        Ok(())
    }

    /// The first `n` unread bytes without consuming them, or `None` when
    /// fewer than `n` are available.
    pub fn peek(&self, n: usize) -> Option<&[u8]> {
        if self.len() < n {
            return None;
        }
        Some(&self.data[self.start..self.start + n])
    }

    /// The whole unread span without consuming it.
    pub fn peek_all(&self) -> &[u8] {
        self.read_peek()
    }

    /// Consume and return the first `n` unread bytes, or `None` when fewer
    /// than `n` are available.
    pub fn read(&mut self, n: usize) -> Option<Bytes> {
        let out = Bytes::copy_from_slice(self.peek(n)?);
        self.read_seek(n);
        Some(out)
    }

    /// Consume and return all unread bytes.
    pub fn read_all(&mut self) -> Bytes {
        let out = Bytes::copy_from_slice(self.read_peek());
        self.start = self.end;
        out
    }

    /// Advance the read cursor by `n` if that many unread bytes exist.
    ///
    /// Returns the number of bytes skipped, or `None` when `n` exceeds the
    /// unread length (nothing is consumed).
    pub fn skip(&mut self, n: usize) -> Option<usize> {
        if n > self.len() {
            return None;
        }
        self.start += n;
        Some(n)
    }

    /// Scan the unread span for `delimiter`.
    ///
    /// On a match, returns the bytes strictly before the delimiter and
    /// advances the read cursor past the match plus `drop` extra bytes
    /// (clamped to the unread length). With no match, returns `None` and
    /// consumes nothing, so the caller can wait for more bytes and retry.
    pub fn read_until(&mut self, delimiter: &[u8], drop: usize) -> Option<Bytes> {
        let unread = self.read_peek();
        let avail = unread.len();
        let i = byte::find(unread, delimiter);
        if i == avail {
            return None;
        }
        let out = Bytes::copy_from_slice(&unread[..i]);
        let advance = (i + delimiter.len() + drop).min(avail);
        self.read_seek(advance);
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_does_not_allocate() {
        let b = Buffer::new();
        assert_eq!(b.capacity(), 0);
        assert_eq!(b.len(), 0);
        assert!(b.is_empty());
    }

    #[test]
    fn write_then_read_roundtrip() {
        let mut b = Buffer::new();
        b.write(b"hello").unwrap();
        assert_eq!(b.len(), 5);
        assert_eq!(b.read_peek(), b"hello");
        assert_eq!(b.read(5).unwrap().as_ref(), b"hello");
        assert!(b.is_empty());
    }

    #[test]
    fn capacity_grows_in_powers_of_two() {
        let mut b = Buffer::new();
        b.write(b"x").unwrap();
        assert_eq!(b.capacity(), 16);
        b.write(&[0u8; 20]).unwrap();
        assert_eq!(b.capacity(), 32);
        b.write(&[0u8; 100]).unwrap();
        assert_eq!(b.capacity(), 128);
    }

    #[test]
    fn ensure_is_idempotent() {
        let mut b = Buffer::new();
        b.write(b"abc").unwrap();
        b.ensure(8).unwrap();
        let cap = b.capacity();
        b.ensure(8).unwrap();
        assert_eq!(b.capacity(), cap);
        assert_eq!(b.read_peek(), b"abc");
    }

    #[test]
    fn ensure_compacts_instead_of_growing() {
        let mut b = Buffer::new();
        b.write(&[7u8; 12]).unwrap();
        assert_eq!(b.capacity(), 16);
        b.read_seek(10);
        // 4 bytes free at the tail, 10 reclaimable at the front.
        b.ensure(12).unwrap();
        assert_eq!(b.capacity(), 16);
        assert_eq!(b.read_peek(), &[7u8, 7]);
    }

    #[test]
    fn ensure_never_discards_unread_bytes() {
        let mut b = Buffer::new();
        b.write(b"keep me around").unwrap();
        b.read_seek(5);
        let before = b.read_peek().to_vec();

        b.ensure(4).unwrap();
        assert_eq!(b.read_peek(), before.as_slice());

        // Force a reallocation as well.
        b.ensure(1 << 12).unwrap();
        assert_eq!(b.read_peek(), before.as_slice());
    }

    #[test]
    fn interleaved_reads_and_writes() {
        let mut b = Buffer::new();
        for chunk in 0..50u8 {
            b.write(&[chunk; 7]).unwrap();
            assert_eq!(b.read(3).unwrap().as_ref(), &[chunk; 3]);
            b.read_seek(4);
        }
        assert!(b.is_empty());
        // Steady-state producer/consumer never needs more than one chunk.
        assert!(b.capacity() <= 32);
    }

    #[test]
    fn peek_and_read_require_full_count() {
        let mut b = Buffer::new();
        b.write(b"abc").unwrap();
        assert!(b.peek(4).is_none());
        assert!(b.read(4).is_none());
        assert_eq!(b.len(), 3);
        assert_eq!(b.peek(2).unwrap(), b"ab");
        assert_eq!(b.read(2).unwrap().as_ref(), b"ab");
        assert_eq!(b.read_peek(), b"c");
    }

    #[test]
    fn skip_is_checked() {
        let mut b = Buffer::new();
        b.write(b"abcd").unwrap();
        assert_eq!(b.skip(2), Some(2));
        assert_eq!(b.skip(5), None);
        assert_eq!(b.read_peek(), b"cd");
    }

    #[test]
    #[should_panic(expected = "read_seek")]
    fn read_seek_past_end_panics() {
        let mut b = Buffer::new();
        b.write(b"ab").unwrap();
        b.read_seek(3);
    }

    #[test]
    fn write_peek_and_seek_commit() {
        let mut b = Buffer::new();
        b.ensure(4).unwrap();
        b.write_peek()[..4].copy_from_slice(b"wxyz");
        b.write_seek(4);
        assert_eq!(b.read_peek(), b"wxyz");
    }

    #[test]
    fn read_until_finds_delimiter() {
        let mut b = Buffer::new();
        b.write(b"foo\r\nbar").unwrap();
        let line = b.read_until(b"\r\n", 0).unwrap();
        assert_eq!(line.as_ref(), b"foo");
        assert_eq!(b.read_peek(), b"bar");
    }

    #[test]
    fn read_until_without_match_consumes_nothing() {
        let mut b = Buffer::new();
        b.write(b"incomplete line").unwrap();
        assert!(b.read_until(b"\r\n", 0).is_none());
        assert_eq!(b.read_peek(), b"incomplete line");

        // Retry after more data arrives.
        b.write(b"\r\ntail").unwrap();
        let line = b.read_until(b"\r\n", 0).unwrap();
        assert_eq!(line.as_ref(), b"incomplete line");
        assert_eq!(b.read_peek(), b"tail");
    }

    #[test]
    fn read_until_drops_extra_bytes() {
        let mut b = Buffer::new();
        b.write(b"key=value;rest").unwrap();
        let key = b.read_until(b"=", 0).unwrap();
        assert_eq!(key.as_ref(), b"key");
        let value = b.read_until(b";", 4).unwrap();
        assert_eq!(value.as_ref(), b"value");
        assert_eq!(b.read_peek(), b"");
    }

    #[test]
    fn read_until_on_empty_buffer() {
        let mut b = Buffer::new();
        assert!(b.read_until(b"\n", 0).is_none());
    }

    #[test]
    fn read_all_drains() {
        let mut b = Buffer::new();
        b.write(b"drain").unwrap();
        assert_eq!(b.read_all().as_ref(), b"drain");
        assert!(b.is_empty());
        assert_eq!(b.read_all().as_ref(), b"");
    }
}
