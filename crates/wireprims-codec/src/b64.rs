//! Base64 and XOR byte-string helpers.
//!
//! Small conveniences for shuttling binary payloads through text-only
//! collaborators (config files, line protocols, logs). Not a substitute for
//! real encryption; `xor_cycle` exists for protocols that whiten or mask
//! payloads with a repeating key.

use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;

use crate::error::{CodecError, Result};

/// Encode `data` with the standard base64 alphabet.
pub fn b64_encode(data: &[u8]) -> String {
    general_purpose::STANDARD.encode(data)
}

/// Decode standard-alphabet base64 text.
pub fn b64_decode(text: &str) -> Result<Bytes> {
    let decoded = general_purpose::STANDARD.decode(text)?;
    Ok(Bytes::from(decoded))
}

/// XOR `data` against `key` repeated cyclically. The key must be non-empty.
pub fn xor_cycle(data: &[u8], key: &[u8]) -> Result<Bytes> {
    if key.is_empty() {
        return Err(CodecError::EmptyKey);
    }
    Ok(Bytes::from(wireprims_buffer::byte::xor_cycle(data, key)))
}
