//! Register-bits example — pulls named fields out of a status register.
//!
//! Run with:
//!   cargo run --example register-bits

use wireprims::codec::unpack_bits;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A status word as read from an imaginary motor controller.
    let status: u32 = 0b0110_1001_0011;

    let fields = unpack_bits(status, "ready fault direction:2 _:4 speed:4")?;
    for (name, value) in &fields {
        println!("{name:<10} {value:?}");
    }

    Ok(())
}
