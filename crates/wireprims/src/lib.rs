//! Byte buffer and binary struct/bitfield codec with permissive licensing.
//!
//! wireprims converts between raw byte streams and typed values. Transports
//! (serial lines, sockets, USB bulk endpoints, I2C/SPI exchanges) push bytes
//! into a growable [`buffer::Buffer`]; a textual format string drives the
//! codec that pulls typed records back out, with "not enough input yet"
//! reported as a retry-safe non-event rather than an error.
//!
//! # Crate Structure
//!
//! - [`buffer`] — Growable byte buffer with independent read/write cursors
//! - [`codec`] — Struct format interpreter, bitfield codec, stream readers

/// Re-export buffer types.
pub mod buffer {
    pub use wireprims_buffer::*;
}

/// Re-export codec types.
pub mod codec {
    pub use wireprims_codec::*;
}
