//! Binary struct and bitfield codec driven by textual format strings.
//!
//! This is the core value-add layer of wireprims. A format string such as
//! `"u1 <u2 c0 f4 z"` describes a sequence of fields to extract from a byte
//! span; [`unpack`] interprets it in a single left-to-right pass and returns
//! the decoded values plus the number of bytes consumed. Running out of
//! input mid-field is not an error: the pass reports `Ok(None)` without
//! producing or consuming anything, so streaming callers retry once the
//! transport delivers more bytes.
//!
//! The sibling [`unpack_bits`] interprets a bit-layout string over a single
//! 32-bit value, for hardware status registers and packed flag words.
//!
//! [`StructBuffer`] and [`StructReader`] connect the codec to
//! `wireprims-buffer`'s cursor discipline: peek without consuming, consume
//! exactly what decoded, never consume a partial record.

pub mod b64;
pub mod bits;
pub mod error;
pub mod format;
pub mod stream;
pub mod value;

pub use b64::{b64_decode, b64_encode, xor_cycle};
pub use bits::{unpack_bits, unpack_bits_into, BitValue};
pub use error::{CodecError, Result};
pub use format::{pack_float, unpack, unpack_as, Endian};
pub use stream::{StructBuffer, StructReader};
pub use value::{Record, Value};
