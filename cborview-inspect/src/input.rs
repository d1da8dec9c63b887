//! Pasted-text normalization for raw transaction bytes

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::Error;

/// Textual encodings accepted for pasted byte strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Hex,
    Base64,
}

/// Guess the encoding of pasted text
///
/// Even-length strings made of hex digits are hex; everything else is
/// treated as base64. Hex wins the ambiguous cases (e.g. `"abcd"`) since
/// that is what Cardano tooling emits.
pub fn detect(text: &str) -> Encoding {
    let text = text.trim();

    if !text.is_empty() && text.len() % 2 == 0 && text.bytes().all(|b| b.is_ascii_hexdigit()) {
        Encoding::Hex
    } else {
        Encoding::Base64
    }
}

/// Decode pasted text into raw bytes per its detected encoding
pub fn normalize(text: &str) -> Result<Vec<u8>, Error> {
    let text = text.trim();

    match detect(text) {
        Encoding::Hex => Ok(hex::decode(text)?),
        Encoding::Base64 => Ok(STANDARD.decode(text)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_detected_for_even_hex_digit_strings() {
        assert_eq!(detect("84a400d90102"), Encoding::Hex);
        assert_eq!(detect("ABCDEF00"), Encoding::Hex);
        assert_eq!(detect("  84a4  "), Encoding::Hex);
    }

    #[test]
    fn everything_else_falls_back_to_base64() {
        assert_eq!(detect("hKQA2QEC"), Encoding::Base64);
        assert_eq!(detect("84a40"), Encoding::Base64);
        assert_eq!(detect(""), Encoding::Base64);
    }

    #[test]
    fn both_encodings_normalize_to_the_same_bytes() {
        let from_hex = normalize("84a400d90102").unwrap();
        let from_base64 = normalize("hKQA2QEC").unwrap();

        assert_eq!(from_hex, from_base64);
    }

    #[test]
    fn empty_input_normalizes_to_no_bytes() {
        assert_eq!(normalize("").unwrap(), Vec::<u8>::new());
        assert_eq!(normalize("  \n").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(normalize("not valid in either!").is_err());
    }
}
