use std::io::{ErrorKind, Read};

use bytes::Bytes;
use tracing::trace;
use wireprims_buffer::Buffer;

use crate::error::{CodecError, Result};
use crate::format::{unpack_as, Endian};
use crate::value::Record;

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Struct decoding over a [`Buffer`]'s unread span.
///
/// `peek_struct` never moves the read cursor; `read_struct` advances it by
/// exactly the consumed count, and only when the decode did not report a
/// shortage. Both return `Ok(None)` on shortage, so a caller loop can write
/// more transport bytes into the buffer and retry.
pub trait StructBuffer {
    /// Decode the unread span without consuming it.
    fn peek_struct_as(&self, fmt: &str, endian: Endian) -> Result<Option<Record>>;

    /// Decode the unread span and consume exactly the decoded bytes.
    fn read_struct_as(&mut self, fmt: &str, endian: Endian) -> Result<Option<Record>>;

    /// [`StructBuffer::peek_struct_as`] at native byte order.
    fn peek_struct(&self, fmt: &str) -> Result<Option<Record>> {
        self.peek_struct_as(fmt, Endian::native())
    }

    /// [`StructBuffer::read_struct_as`] at native byte order.
    fn read_struct(&mut self, fmt: &str) -> Result<Option<Record>> {
        self.read_struct_as(fmt, Endian::native())
    }
}

impl StructBuffer for Buffer {
    fn peek_struct_as(&self, fmt: &str, endian: Endian) -> Result<Option<Record>> {
        unpack_as(self.read_peek(), fmt, endian)
    }

    fn read_struct_as(&mut self, fmt: &str, endian: Endian) -> Result<Option<Record>> {
        match unpack_as(self.read_peek(), fmt, endian)? {
            Some(record) => {
                self.read_seek(record.consumed);
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }
}

/// Reads complete records from any `Read` stream.
///
/// Handles partial reads internally — callers always get complete records.
pub struct StructReader<T> {
    inner: T,
    buf: Buffer,
}

impl<T: Read> StructReader<T> {
    /// Create a new record reader.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: Buffer::new(),
        }
    }

    /// Read the next complete record described by `fmt` (blocking).
    ///
    /// Returns `Err(CodecError::UnexpectedEof)` when the stream ends before
    /// a complete record is available.
    pub fn read_record(&mut self, fmt: &str) -> Result<Record> {
        self.read_record_as(fmt, Endian::native())
    }

    /// As [`StructReader::read_record`], with an explicit starting byte order.
    pub fn read_record_as(&mut self, fmt: &str, endian: Endian) -> Result<Record> {
        loop {
            if let Some(record) = self.buf.read_struct_as(fmt, endian)? {
                return Ok(record);
            }
            if self.fill()? == 0 {
                return Err(CodecError::UnexpectedEof);
            }
        }
    }

    /// Read bytes up to (and consuming) the next `delimiter` (blocking).
    pub fn read_delimited(&mut self, delimiter: &[u8]) -> Result<Bytes> {
        loop {
            if let Some(span) = self.buf.read_until(delimiter, 0) {
                return Ok(span);
            }
            if self.fill()? == 0 {
                return Err(CodecError::UnexpectedEof);
            }
        }
    }

    /// Pull one chunk from the underlying stream into the buffer.
    fn fill(&mut self) -> Result<usize> {
        self.buf.ensure(READ_CHUNK_SIZE)?;
        loop {
            match self.inner.read(self.buf.write_peek()) {
                Ok(n) => {
                    self.buf.write_seek(n);
                    trace!(read = n, buffered = self.buf.len(), "reader refill");
                    return Ok(n);
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(CodecError::Io(err)),
            }
        }
    }

    /// The unread bytes buffered beyond the last returned record.
    pub fn buffer(&self) -> &[u8] {
        self.buf.read_peek()
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::value::Value;

    #[test]
    fn peek_struct_leaves_cursor_alone() {
        let mut buf = Buffer::new();
        buf.write(&[0x01, 0x00, b'h', b'i', 0x00]).unwrap();

        let rec = buf.peek_struct_as("u2 z", Endian::Little).unwrap().unwrap();
        assert_eq!(rec.consumed, 5);
        assert_eq!(buf.len(), 5);

        // Peeking twice is identical.
        let again = buf.peek_struct_as("u2 z", Endian::Little).unwrap().unwrap();
        assert_eq!(again, rec);
    }

    #[test]
    fn read_struct_consumes_exactly_what_was_decoded() {
        let mut buf = Buffer::new();
        buf.write(&[0x2A, 0xFF, 0x01, 0x02]).unwrap();

        let rec = buf.read_struct_as("u1 s1", Endian::Little).unwrap().unwrap();
        assert_eq!(rec.consumed, 2);
        assert_eq!(rec.values, vec![Value::Uint(42), Value::Int(-1)]);
        assert_eq!(buf.read_peek(), &[0x01, 0x02]);
    }

    #[test]
    fn read_struct_shortage_consumes_nothing() {
        let mut buf = Buffer::new();
        buf.write(&[0x01, 0x02]).unwrap();

        assert!(buf.read_struct_as("u4", Endian::Little).unwrap().is_none());
        assert_eq!(buf.len(), 2);

        // More bytes arrive; the identical retry now succeeds.
        buf.write(&[0x03, 0x04]).unwrap();
        let rec = buf.read_struct_as("u4", Endian::Little).unwrap().unwrap();
        assert_eq!(rec.values, vec![Value::Uint(0x0403_0201)]);
        assert!(buf.is_empty());
    }

    #[test]
    fn read_struct_propagates_format_errors() {
        let mut buf = Buffer::new();
        buf.write(&[0u8; 8]).unwrap();
        assert!(buf.read_struct_as("f3", Endian::Little).is_err());
        // A bad format never consumes.
        assert_eq!(buf.len(), 8);
    }

    #[test]
    fn reader_returns_complete_records() {
        let mut wire = Vec::new();
        wire.extend_from_slice(&[2, 0]);
        wire.extend_from_slice(b"okx");

        let mut reader = StructReader::new(Cursor::new(wire));
        let rec = reader.read_record_as("u2 c0", Endian::Little).unwrap();
        assert_eq!(rec.values, vec![Value::Bytes(Bytes::from_static(b"ok"))]);
        assert_eq!(reader.buffer(), b"x");
    }

    #[test]
    fn reader_handles_byte_by_byte_input() {
        let wire = [0x01u8, 0x00, b'h', b'i', 0x00].to_vec();
        let mut reader = StructReader::new(ByteByByteReader { bytes: wire, pos: 0 });

        let rec = reader.read_record_as("u2 z", Endian::Little).unwrap();
        assert_eq!(
            rec.values,
            vec![Value::Uint(1), Value::Bytes(Bytes::from_static(b"hi"))]
        );
    }

    #[test]
    fn reader_eof_mid_record() {
        let mut reader = StructReader::new(Cursor::new(vec![0x01u8, 0x02]));
        let err = reader.read_record_as("u4", Endian::Little).unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedEof));
    }

    #[test]
    fn reader_eof_on_empty_stream() {
        let mut reader = StructReader::new(Cursor::new(Vec::<u8>::new()));
        let err = reader.read_record("u1").unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedEof));
    }

    #[test]
    fn reader_sequential_records() {
        let mut wire = Vec::new();
        for v in [100u16, 200, 300] {
            wire.extend_from_slice(&v.to_le_bytes());
        }
        let mut reader = StructReader::new(Cursor::new(wire));
        for expected in [100u64, 200, 300] {
            let rec = reader.read_record_as("u2", Endian::Little).unwrap();
            assert_eq!(rec.values, vec![Value::Uint(expected)]);
        }
    }

    #[test]
    fn reader_delimited_lines() {
        let mut reader = StructReader::new(Cursor::new(b"foo\r\nbar\r\ntail".to_vec()));
        assert_eq!(reader.read_delimited(b"\r\n").unwrap().as_ref(), b"foo");
        assert_eq!(reader.read_delimited(b"\r\n").unwrap().as_ref(), b"bar");
        let err = reader.read_delimited(b"\r\n").unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedEof));
    }

    #[test]
    fn interrupted_read_retries() {
        let wire = vec![0x0Au8, 0x0B];
        let reader = InterruptedThenData {
            interrupted: false,
            bytes: wire,
            pos: 0,
        };
        let mut reader = StructReader::new(reader);
        let rec = reader.read_record_as("u2", Endian::Little).unwrap();
        assert_eq!(rec.values, vec![Value::Uint(0x0B0A)]);
    }

    #[test]
    fn accessors_and_into_inner() {
        let mut reader = StructReader::new(Cursor::new(Vec::<u8>::new()));
        let _ = reader.get_ref();
        let _ = reader.get_mut();
        let _inner = reader.into_inner();
    }

    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct InterruptedThenData {
        interrupted: bool,
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for InterruptedThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            if self.pos >= self.bytes.len() {
                return Ok(0);
            }
            let n = (self.bytes.len() - self.pos).min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }
}
