use std::collections::BTreeMap;

use crate::error::{CodecError, Result};

/// A single extracted bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitValue {
    /// Width-1 fields are reported as a bit test.
    Flag(bool),
    /// Wider fields are reported masked to their declared width.
    Uint(u32),
}

impl BitValue {
    pub fn as_flag(&self) -> Option<bool> {
        match *self {
            BitValue::Flag(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u32> {
        match *self {
            BitValue::Uint(v) => Some(v),
            _ => None,
        }
    }
}

/// Decode named bit fields out of a 32-bit value.
///
/// The layout is a sequence of `name[:width]` entries separated by
/// whitespace; width defaults to 1 and `_` consumes without reporting.
/// Entries bind from the least-significant bits upward, in the order
/// written:
///
/// ```text
/// ready busy:1 channel:4 _:2 count:8
/// ```
///
/// binds `ready` to bit 0, `busy` to bit 1, `channel` to bits 2-5, skips
/// bits 6-7 and binds `count` to bits 8-15. Layouts whose widths sum past
/// 32 bits are rejected before anything is extracted.
pub fn unpack_bits(value: u32, layout: &str) -> Result<BTreeMap<String, BitValue>> {
    let mut out = BTreeMap::new();
    unpack_bits_into(value, layout, &mut out)?;
    Ok(out)
}

/// As [`unpack_bits`], accumulating into a caller-supplied map so repeated
/// calls (for example one per status register) can build one structure.
pub fn unpack_bits_into(
    value: u32,
    layout: &str,
    out: &mut BTreeMap<String, BitValue>,
) -> Result<()> {
    let entries = parse_layout(layout)?;
    let mut rest = value;
    for (name, width) in entries {
        if name != "_" {
            let field = if width == 1 {
                BitValue::Flag(rest & 1 != 0)
            } else {
                BitValue::Uint(rest & (!0u32 >> (32 - width)))
            };
            out.insert(name.to_string(), field);
        }
        rest = rest.checked_shr(width).unwrap_or(0);
    }
    Ok(())
}

fn parse_layout(layout: &str) -> Result<Vec<(&str, u32)>> {
    let mut entries = Vec::new();
    let mut total = 0u64;
    for entry in layout.split_whitespace() {
        let (name, width) = match entry.split_once(':') {
            Some((name, digits)) => {
                let width: u32 = digits
                    .parse()
                    .map_err(|_| CodecError::BadBitWidth {
                        entry: entry.to_string(),
                    })?;
                if width == 0 {
                    return Err(CodecError::BadBitWidth {
                        entry: entry.to_string(),
                    });
                }
                (name, width)
            }
            None => (entry, 1),
        };
        total += u64::from(width);
        if total > 32 {
            return Err(CodecError::BitLayoutOverflow { bits: total });
        }
        entries.push((name, width));
    }
    Ok(entries)
}
