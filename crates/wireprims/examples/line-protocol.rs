//! Line-protocol example — decodes a mixed text/binary device stream.
//!
//! Run with:
//!   cargo run --example line-protocol

use wireprims::buffer::Buffer;
use wireprims::codec::{Endian, StructBuffer, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut buf = Buffer::new();

    // The transport delivers bytes in arbitrary chunks: a text banner line,
    // then length-prefixed binary readings.
    buf.write(b"SENSOR v2\r\n")?;
    buf.write(&[0x01, 0x05, 0x00])?; // record type 1, payload length 5...
    buf.write(b"hel")?; // ...but the payload is still in flight.

    let banner = buf
        .read_until(b"\r\n", 0)
        .expect("banner line should be complete");
    println!("banner: {}", String::from_utf8_lossy(&banner));

    // Not enough bytes yet: the decode reports a shortage and consumes
    // nothing, so we can simply retry after the next chunk arrives.
    assert!(buf.read_struct_as("u1 u2 c0", Endian::Little)?.is_none());
    buf.write(b"lo")?;

    let record = buf
        .read_struct_as("u1 u2 c0", Endian::Little)?
        .expect("record should now be complete");
    println!("consumed: {} bytes", record.consumed);
    for value in &record.values {
        match value {
            Value::Uint(v) => println!("  uint  {v}"),
            Value::Int(v) => println!("  int   {v}"),
            Value::Float(v) => println!("  float {v}"),
            Value::Bytes(b) => println!("  bytes {}", String::from_utf8_lossy(b)),
        }
    }

    Ok(())
}
