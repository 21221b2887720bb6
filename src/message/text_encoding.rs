//! Base-N text packing used by the free-text and compound-callsign message
//! fields.
//!
//! Ported from `examples/N0YPR-RustyFt8/src/message/text_encoding.rs`: free
//! text packs 13 characters into 71 bits via base-42 digits big-endian in a
//! 9-byte accumulator (`multiply_add`/`divide_inplace`, unchanged from the
//! teacher). Compound-callsign packing (58 bits / 11 characters, base-38)
//! is the same digit-accumulation scheme the teacher's `decode_type4`
//! inlines directly; here it is factored into a named encode/decode pair
//! so [`crate::message::encode`] can produce Type 1 nonstandard and Type 4
//! payloads symmetrically with how they're decoded.

use super::constants::{CHARSET_BASE38, CHARSET_BASE42};

const FREE_TEXT_LEN: usize = 13;
const COMPOUND_CALL_LEN: usize = 11;

/// Packs up to 13 characters of free text into 71 bits (a 9-byte
/// big-endian accumulator, top bit always zero).
pub fn encode_free_text(text: &str) -> Result<[u8; 9], String> {
    if text.chars().count() > FREE_TEXT_LEN {
        return Err(format!("free text must be {FREE_TEXT_LEN} characters or less, got '{text}'"));
    }

    let padded = format!("{text:>FREE_TEXT_LEN$}");
    let mut acc = [0u8; 9];
    for ch in padded.bytes() {
        let idx = CHARSET_BASE42
            .iter()
            .position(|&c| c == ch)
            .ok_or_else(|| format!("invalid character in free text: '{}'", ch as char))?;
        multiply_add(&mut acc, 42, idx as u64);
    }
    acc[0] &= 0x7F;
    Ok(acc)
}

/// Inverse of [`encode_free_text`].
pub fn decode_free_text(bits: &[u8; 9]) -> Result<String, String> {
    let mut acc = *bits;
    acc[0] &= 0x7F;

    let mut result = String::with_capacity(FREE_TEXT_LEN);
    for _ in 0..FREE_TEXT_LEN {
        let remainder = divide_inplace(&mut acc, 42);
        result.push(CHARSET_BASE42[remainder as usize] as char);
    }
    Ok(result.chars().rev().collect())
}

/// Packs up to 11 characters of a compound (non-standard) callsign into 58
/// bits, base-38.
pub fn encode_compound_callsign(text: &str) -> Result<u64, String> {
    if text.chars().count() > COMPOUND_CALL_LEN {
        return Err(format!(
            "compound callsign must be {COMPOUND_CALL_LEN} characters or less, got '{text}'"
        ));
    }

    let padded = format!("{text:>COMPOUND_CALL_LEN$}");
    let mut acc: u64 = 0;
    for ch in padded.to_uppercase().bytes() {
        let idx = CHARSET_BASE38
            .iter()
            .position(|&c| c == ch)
            .ok_or_else(|| format!("invalid character in compound callsign: '{}'", ch as char))?;
        acc = acc * 38 + idx as u64;
    }
    Ok(acc)
}

/// Inverse of [`encode_compound_callsign`].
pub fn decode_compound_callsign(value: u64) -> String {
    let mut acc = value;
    let mut result = String::with_capacity(COMPOUND_CALL_LEN);
    for _ in 0..COMPOUND_CALL_LEN {
        let idx = (acc % 38) as usize;
        result.push(CHARSET_BASE38[idx] as char);
        acc /= 38;
    }
    result.chars().rev().collect::<String>().trim_start().to_string()
}

fn multiply_add(acc: &mut [u8; 9], multiplier: u64, addend: u64) {
    let mut carry = addend;
    for byte in acc.iter_mut().rev() {
        let val = (*byte as u64) * multiplier + carry;
        *byte = (val & 0xFF) as u8;
        carry = val >> 8;
    }
}

fn divide_inplace(acc: &mut [u8; 9], divisor: u64) -> u64 {
    let mut remainder = 0u64;
    for byte in acc.iter_mut() {
        let val = (remainder << 8) | (*byte as u64);
        *byte = (val / divisor) as u8;
        remainder = val % divisor;
    }
    remainder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_text_roundtrip() {
        for text in ["HELLO WORLD", "", "TNX 73 GL", "TEST1234DE5"] {
            let packed = encode_free_text(text).unwrap();
            let unpacked = decode_free_text(&packed).unwrap();
            assert_eq!(unpacked.trim_end(), text.trim_end());
        }
    }

    #[test]
    fn free_text_top_bit_is_always_clear() {
        let packed = encode_free_text("?????????????").unwrap();
        assert_eq!(packed[0] & 0x80, 0);
    }

    #[test]
    fn free_text_rejects_too_long_input() {
        assert!(encode_free_text("THIS IS WAY TOO LONG").is_err());
    }

    #[test]
    fn compound_callsign_roundtrip() {
        for call in ["KH1/KH7Z", "PJ4/K1ABC", "3D2AG"] {
            let packed = encode_compound_callsign(call).unwrap();
            assert!(packed < (1u64 << 58));
            assert_eq!(decode_compound_callsign(packed), call);
        }
    }
}
