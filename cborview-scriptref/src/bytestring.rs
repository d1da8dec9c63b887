//! Minimal-head CBOR byte-string encoding
//!
//! CBOR byte strings (major type 2) prefix the payload with a head that
//! carries the payload length in the smallest size class that fits:
//! lengths up to 23 live in the head byte itself, larger ones follow in a
//! big-endian length field of 1, 2, 4 or 8 bytes.

use crate::Error;

const MAJOR_TYPE_BYTES: u8 = 0x40;

/// Build the minimal byte-string head for a payload of `len` bytes
pub fn header(len: usize) -> Vec<u8> {
    match len as u64 {
        len @ 0..=0x17 => vec![MAJOR_TYPE_BYTES | len as u8],
        len @ 0x18..=0xff => vec![0x58, len as u8],
        len @ 0x100..=0xffff => {
            let mut head = vec![0x59];
            head.extend_from_slice(&(len as u16).to_be_bytes());
            head
        }
        len @ 0x1_0000..=0xffff_ffff => {
            let mut head = vec![0x5a];
            head.extend_from_slice(&(len as u32).to_be_bytes());
            head
        }
        // no real script gets here, but the head stays well-formed
        len => {
            let mut head = vec![0x5b];
            head.extend_from_slice(&len.to_be_bytes());
            head
        }
    }
}

/// Encode a payload as a definite-length CBOR byte string
pub fn encode(payload: &[u8]) -> Vec<u8> {
    let mut out = header(payload.len());
    out.extend_from_slice(payload);
    out
}

/// Hex-text form of [encode]
pub fn encode_hex(payload: &str) -> Result<String, Error> {
    let payload = hex::decode(payload)?;
    Ok(hex::encode(encode(&payload)))
}
