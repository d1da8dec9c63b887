//! Adapt raw Cardano script bytes into the ScriptRef envelope
//!
//! Reference scripts travel on-chain as a 2-element CBOR array
//! `[tag, script_bytes]`, where the tag discriminates the script language
//! (native script or a Plutus version). Chain indexers hand back the bare
//! script bytes plus a free-form type label; decoding libraries expect the
//! enveloped form. This crate bridges the two: a minimal-head CBOR
//! byte-string encoder (see [bytestring]), a total label-to-tag mapping
//! ([ScriptKind]), a shallow envelope detector and an idempotent wrapper.
//!
//! Bytes are manipulated as byte slices internally; hex text only appears at
//! the `_hex` boundary functions, which validate their input.

pub mod bytestring;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("payload is not valid hex: {0}")]
    BadHex(#[from] hex::FromHexError),
}

/// CBOR head for a definite-length 2-element array, the envelope marker
pub const ENVELOPE_HEAD: u8 = 0x82;

/// Script language discriminant carried in a ScriptRef envelope
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ScriptKind {
    Native,
    PlutusV1,
    PlutusV2,
    #[default]
    PlutusV3,
}

impl ScriptKind {
    /// Tag byte used inside the envelope
    pub fn tag(self) -> u8 {
        match self {
            ScriptKind::Native => 0,
            ScriptKind::PlutusV1 => 1,
            ScriptKind::PlutusV2 => 2,
            ScriptKind::PlutusV3 => 3,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(ScriptKind::Native),
            1 => Some(ScriptKind::PlutusV1),
            2 => Some(ScriptKind::PlutusV2),
            3 => Some(ScriptKind::PlutusV3),
            _ => None,
        }
    }

    /// Map an indexer-reported type label to a script kind
    ///
    /// Case-insensitive and total: anything outside the known label set
    /// (including the empty string) falls back to [ScriptKind::PlutusV3].
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "native" | "timelock" | "multisig" => ScriptKind::Native,
            "plutusv1" => ScriptKind::PlutusV1,
            "plutusv2" => ScriptKind::PlutusV2,
            _ => ScriptKind::PlutusV3,
        }
    }
}

/// Check whether bytes already carry the envelope prefix
///
/// Shallow heuristic on the first two bytes only; the remainder is not
/// parsed as CBOR.
pub fn is_script_ref(bytes: &[u8]) -> bool {
    matches!(bytes, [ENVELOPE_HEAD, tag, ..] if *tag <= 0x03)
}

/// Hex-text form of [is_script_ref]
///
/// Returns false for anything whose first four characters don't decode to
/// the envelope prefix, including non-hex input.
pub fn is_script_ref_hex(payload: &str) -> bool {
    match payload.get(..4).map(hex::decode) {
        Some(Ok(head)) => is_script_ref(&head),
        _ => false,
    }
}

/// Wrap script bytes into the envelope, idempotently
///
/// Already-enveloped input is returned as-is, regardless of `kind`. For the
/// Plutus kinds the caller is expected to have applied
/// [bytestring::encode] to the payload beforehand; native scripts go in as
/// raw script CBOR.
pub fn wrap_script_ref(script: &[u8], kind: ScriptKind) -> Vec<u8> {
    if is_script_ref(script) {
        return script.to_vec();
    }

    let mut out = Vec::with_capacity(script.len() + 2);
    out.push(ENVELOPE_HEAD);
    out.push(kind.tag());
    out.extend_from_slice(script);
    out
}

/// Hex-text form of [wrap_script_ref]
///
/// The label (if any) is mapped through [ScriptKind::from_label]; no label
/// means [ScriptKind::PlutusV3]. Already-enveloped input is returned
/// unchanged without being re-validated as hex.
pub fn wrap_script_ref_hex(payload: &str, label: Option<&str>) -> Result<String, Error> {
    if is_script_ref_hex(payload) {
        return Ok(payload.to_string());
    }

    let script = hex::decode(payload)?;
    let kind = label.map(ScriptKind::from_label).unwrap_or_default();

    Ok(hex::encode(wrap_script_ref(&script, kind)))
}

/// Entry point for adapting an indexer-supplied reference script
///
/// Missing and empty payloads pass through unchanged so callers can feed
/// optional API fields straight in; everything else is delegated to
/// [wrap_script_ref_hex].
pub fn format_reference_script(
    payload: Option<&str>,
    label: Option<&str>,
) -> Result<Option<String>, Error> {
    match payload {
        None => Ok(None),
        Some("") => Ok(Some(String::new())),
        Some(payload) => wrap_script_ref_hex(payload, label).map(Some),
    }
}
