//! # Intcodes
//!
//! The numeric twin of the mnemonic. Each intcode packs two consecutive
//! block bytes plus a positional index into 20 bits, printed as six
//! decimal digits:
//!
//! ```text
//! value = index·2¹⁶ + b₀·2⁸ + b₁        index = (i/2) mod 13
//! ```
//!
//! where `i` is the byte offset of `b₀`. The index is a checksum against
//! the classic transcription failure: skipping a row or starting in the
//! wrong column. Twelve is the highest index, so every value stays below
//! 13·65536 = 851 968 and six digits always suffice.
//!
//! The mod-13 wrap means positions repeat after 26 bytes; blocks longer
//! than that still encode fine but lean on the caller keeping codes in
//! order. Parsing verifies each code's index against the position it was
//! supplied for and rejects mismatches rather than guessing intent.

use thiserror::Error;

use crate::config;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntcodeError {
    /// Not six decimal digits / not a valid 20-bit value.
    #[error("malformed intcode '{code}'")]
    Malformed { code: String },

    /// The embedded index disagrees with the code's position.
    #[error("intcode at position {pos} carries index {got}, expected {expected}")]
    Checksum { pos: usize, expected: u32, got: u32 },

    /// Intcodes carry byte pairs; an odd byte count cannot be rendered.
    #[error("cannot render {len} bytes as intcodes (odd length)")]
    OddLength { len: usize },

    /// Not enough combined input to reconstruct the block.
    #[error("only {known} of {total} block bytes known, need at least {needed}")]
    InsufficientData { known: usize, total: usize, needed: usize },
}

/// Render a byte pair at intcode position `pos` (i.e. byte offset
/// `2·pos`) as six decimal digits.
pub fn encode_intcode(pos: usize, b0: u8, b1: u8) -> String {
    let index = (pos as u32) % config::INTCODE_INDEX_MOD;
    let value = (index << 16) | ((b0 as u32) << 8) | b1 as u32;
    format!("{:06}", value)
}

/// Parse one intcode into `(index, b0, b1)`.
pub fn decode_intcode(code: &str) -> Result<(u32, u8, u8), IntcodeError> {
    let trimmed = code.trim();
    let malformed = || IntcodeError::Malformed {
        code: trimmed.to_string(),
    };
    if trimmed.is_empty() || trimmed.len() > 6 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let value: u32 = trimmed.parse().map_err(|_| malformed())?;
    let index = value >> 16;
    if index >= config::INTCODE_INDEX_MOD {
        return Err(malformed());
    }
    Ok((index, (value >> 8) as u8, value as u8))
}

/// Render a whole block as intcodes, two bytes each.
pub fn bytes_to_intcodes(data: &[u8]) -> Result<Vec<String>, IntcodeError> {
    if data.len() % 2 != 0 {
        return Err(IntcodeError::OddLength { len: data.len() });
    }
    Ok(data
        .chunks_exact(2)
        .enumerate()
        .map(|(pos, pair)| encode_intcode(pos, pair[0], pair[1]))
        .collect())
}

/// Parse a complete, ordered run of intcodes back into bytes, verifying
/// every positional index.
pub fn intcodes_to_bytes<S: AsRef<str>>(codes: &[S]) -> Result<Vec<u8>, IntcodeError> {
    let mut out = Vec::with_capacity(codes.len() * 2);
    for (pos, code) in codes.iter().enumerate() {
        let (index, b0, b1) = decode_intcode(code.as_ref())?;
        let expected = (pos as u32) % config::INTCODE_INDEX_MOD;
        if index != expected {
            return Err(IntcodeError::Checksum {
                pos,
                expected,
                got: index,
            });
        }
        out.push(b0);
        out.push(b1);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_packs_index_and_payload() {
        // pos 0, bytes 0x01 0x02 → value 0x0102 = 258.
        assert_eq!(encode_intcode(0, 0x01, 0x02), "000258");
        // pos 1 → index 1: 0x010000 + 0x0102 = 65536 + 258.
        assert_eq!(encode_intcode(1, 0x01, 0x02), "065794");
        // Index wraps at 13.
        assert_eq!(encode_intcode(13, 0x01, 0x02), "000258");
    }

    #[test]
    fn values_stay_within_six_digits() {
        let code = encode_intcode(12, 0xFF, 0xFF);
        assert_eq!(code.len(), 6);
        let value: u32 = code.parse().unwrap();
        assert!(value < 851_968);
    }

    #[test]
    fn round_trip_with_index_verification() {
        let data: Vec<u8> = (0u8..52).collect();
        let codes = bytes_to_intcodes(&data).unwrap();
        assert_eq!(codes.len(), 26);
        assert_eq!(intcodes_to_bytes(&codes).unwrap(), data);

        // Index at position i decodes to (i) mod 13 of the pair stream.
        for (pos, code) in codes.iter().enumerate() {
            let (index, _, _) = decode_intcode(code).unwrap();
            assert_eq!(index, (pos as u32) % 13);
        }
    }

    #[test]
    fn swapped_codes_fail_the_position_check() {
        let data: Vec<u8> = (0u8..8).collect();
        let mut codes = bytes_to_intcodes(&data).unwrap();
        codes.swap(0, 2);
        assert!(matches!(
            intcodes_to_bytes(&codes).unwrap_err(),
            IntcodeError::Checksum { pos: 0, expected: 0, got: 2 }
        ));
    }

    #[test]
    fn malformed_codes_are_rejected()  {
        for bad in ["", "12345a", "1234567", "999999"] {
            assert!(matches!(
                decode_intcode(bad),
                Err(IntcodeError::Malformed { .. })
            ), "input {:?}", bad);
        }
        // 851967 = index 12, payload 0xFFFF: the largest legal code.
        assert_eq!(decode_intcode("851967").unwrap(), (12, 0xFF, 0xFF));
        // 851968 would be index 13.
        assert!(decode_intcode("851968").is_err());
    }

    #[test]
    fn short_codes_parse_with_implied_zeros() {
        // Users drop leading zeros; "258" means 000258.
        assert_eq!(decode_intcode("258").unwrap(), (0, 0x01, 0x02));
    }

    #[test]
    fn odd_byte_counts_cannot_be_rendered() {
        assert_eq!(
            bytes_to_intcodes(&[1, 2, 3]).unwrap_err(),
            IntcodeError::OddLength { len: 3 }
        );
    }
}
