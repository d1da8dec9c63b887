//! Inspect CBOR payloads as position-annotated JSON trees
//!
//! Hex-editor style tooling needs to know which byte range of the original
//! payload every decoded value came from, so that selecting a node in the
//! tree view can highlight the matching bytes and vice versa. The [tree]
//! module decodes arbitrary CBOR into `serde_json` values where each node
//! carries its byte offsets; [input] normalizes pasted hex or base64 text
//! into raw bytes.

pub mod input;
pub mod tree;

/// Shared re-export of the minicbor lib for downstream decoding needs
pub use minicbor;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("error decoding cbor: {0}")]
    InvalidCbor(#[from] minicbor::decode::Error),

    #[error("input is not valid hex: {0}")]
    BadHex(#[from] hex::FromHexError),

    #[error("input is not valid base64: {0}")]
    BadBase64(#[from] base64::DecodeError),
}
