//! Packs plain-text FT8 messages into 77-bit payloads, the inverse of
//! [`super::decode`].
//!
//! Ported in spirit from `examples/N0YPR-RustyFt8/src/message/encode/`: the
//! teacher dispatches on a parsed `MessageVariant` produced by a full
//! outbound-message parser. This crate carries no such parser (encoding is
//! test-only support for the synthetic-signal scenarios in spec.md §8,
//! never exposed on the decode path per spec.md's transmit-path
//! Non-goal), so dispatch instead reads the shape of the input text
//! directly: two callsign-shaped tokens plus an optional grid/report
//! become a standard Type 1 exchange (§4.6), anything else is packed as
//! free text (Type 0, n3=0).

use super::callsign::pack_callsign;
use super::grid::encode_grid;
use super::text_encoding::encode_free_text;
use bitvec::prelude::*;

/// Packs `text` into a 77-bit payload.
pub fn encode_message_bits(text: &str) -> Result<BitVec<u8, Msb0>, String> {
    let trimmed = text.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    if let Some(result) = try_encode_standard(&tokens) {
        return result;
    }

    encode_free_text_message(trimmed)
}

/// Attempts the standard two-callsign exchange. Returns `None` (not an
/// error) when the token shape doesn't even look like one, so the caller
/// falls through to free text; returns `Some(Err(..))` when it looks like
/// one but a field fails to pack (e.g. a malformed grid).
fn try_encode_standard(tokens: &[&str]) -> Option<Result<BitVec<u8, Msb0>, String>> {
    if tokens.len() != 2 && tokens.len() != 3 {
        return None;
    }

    let n28a = pack_callsign(tokens[0]).ok()?;
    let n28b = pack_callsign(tokens[1]).ok()?;
    let call1_suffix = tokens[0].ends_with("/R");
    let call2_suffix = tokens[1].ends_with("/R");

    let (r_flag, grid_token) = match tokens.get(2) {
        Some(&tok) if tok.len() > 1 && tok.starts_with('R') && matches!(tok.as_bytes()[1], b'+' | b'-') => {
            (true, tok[1..].to_string())
        }
        Some(&tok) => (false, tok.to_string()),
        None => (false, String::new()),
    };

    let grid_value = match encode_grid(&grid_token) {
        Ok(v) => v,
        Err(e) => return Some(Err(e)),
    };

    let mut bits = BitVec::<u8, Msb0>::repeat(false, 77);
    bits[0..28].store_be(n28a);
    bits.set(28, call1_suffix);
    bits[29..57].store_be(n28b);
    bits.set(57, call2_suffix);
    bits.set(58, r_flag);
    bits[59..74].store_be(grid_value);
    bits[74..77].store_be(1u8); // i3 = 1: standard exchange

    Some(Ok(bits))
}

fn encode_free_text_message(text: &str) -> Result<BitVec<u8, Msb0>, String> {
    let packed = encode_free_text(text)?;
    let mut bits = BitVec::<u8, Msb0>::repeat(false, 77);
    let text_bits = BitSlice::<u8, Msb0>::from_slice(&packed);
    bits[0..71].copy_from_bitslice(&text_bits[1..72]);
    // n3 = 0 (free text) at bits[71..74] and i3 = 0 at bits[74..77] are
    // both already zero from the `repeat(false, ..)` above.
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::decode::decode_message_bits;

    #[test]
    fn standard_exchange_encodes_to_type1() {
        let bits = encode_message_bits("N0YPR K1JT DM42").unwrap();
        assert_eq!(bits.len(), 77);
        let i3: u8 = bits[74..77].load_be::<u8>();
        assert_eq!(i3, 1);
    }

    #[test]
    fn free_text_encodes_to_type0_n3_zero() {
        let bits = encode_message_bits("TNX FER 73 GL").unwrap();
        let i3: u8 = bits[74..77].load_be::<u8>();
        let n3: u8 = bits[71..74].load_be::<u8>();
        assert_eq!(i3, 0);
        assert_eq!(n3, 0);
    }

    #[test]
    fn unparseable_standard_shape_falls_back_to_free_text() {
        let bits = encode_message_bits("HI THERE BOB").unwrap();
        let decoded = decode_message_bits(&bits, None).unwrap();
        assert_eq!(decoded.trim_end(), "HI THERE BOB");
    }
}
