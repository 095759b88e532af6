use wireprims_buffer::BufferError;

/// Errors that can occur while decoding or encoding binary data.
///
/// "Not enough input" is deliberately absent: a shortage is a normal
/// streaming outcome, reported as `Ok(None)` by the decode entry points so
/// that callers retry once more bytes arrive. Everything here is either a
/// malformed caller-supplied format (fail fast, never retried) or a failure
/// of the underlying stream or allocator.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A float field was declared with a width other than 4 or 8.
    #[error("the size of a float must be 4 or 8 bytes (got {width})")]
    BadFloatWidth { width: usize },

    /// An integer field was declared with width 0 or wider than 8 bytes.
    #[error("integer fields must be 1-8 bytes wide (got {width})")]
    BadIntWidth { width: usize },

    /// `c0` was used without a preceding numeric value to take its length from.
    #[error("a numeric length must come before the c0 format")]
    MissingLength,

    /// The format string contains a character outside the grammar.
    #[error("unknown format directive {directive:?}")]
    UnknownDirective { directive: char },

    /// A bit-layout entry has a missing, zero, or non-decimal width.
    #[error("bad width in bit-layout entry {entry:?}")]
    BadBitWidth { entry: String },

    /// The bit-layout widths sum past the 32 bits available.
    #[error("bit layout declares {bits} bits, more than the 32 available")]
    BitLayoutOverflow { bits: u64 },

    /// The input is not valid base64.
    #[error("invalid base64 string: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// XOR keying requires a non-empty key.
    #[error("xor key must not be empty")]
    EmptyKey,

    /// The backing buffer could not grow.
    #[error(transparent)]
    Buffer(#[from] BufferError),

    /// An I/O error occurred while refilling from the underlying stream.
    #[error("stream I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before a complete record was received.
    #[error("stream closed (incomplete record)")]
    UnexpectedEof,
}

pub type Result<T> = std::result::Result<T, CodecError>;
