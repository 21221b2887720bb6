//! Decodes a 77-bit payload back into the human-readable message text.
//!
//! Ported from `examples/N0YPR-RustyFt8/src/message/decode/{mod,standard,
//! free_text,nonstandard}.rs`. Message type is selected by `i3` (bits
//! 74..77); Type 0 carries a further `n3` subtype (bits 71..74).
//!
//! Type 2 (EU VHF contest) and Type 3 (RTTY Roundup) are region-specific
//! extensions whose exact bit layouts could not be grounded against a
//! verified source in this pack, so they're reported as unsupported rather
//! than guessed. ARRL Field Day (Type 0, n3=3/4) is scoped out for the same
//! reason: it depends on an ~80-entry section abbreviation table this pack
//! does not carry a verified copy of.

use super::callsign::unpack_callsign;
use super::constants::{MAX22, NTOKENS};
use super::grid::decode_grid;
use super::hash_cache::CallsignHashCache;
use super::text_encoding::{decode_compound_callsign, decode_free_text};
use bitvec::prelude::*;

/// Decodes a 77-bit payload into its textual message.
pub fn decode_message_bits(bits: &BitSlice<u8, Msb0>, cache: Option<&CallsignHashCache>) -> Result<String, String> {
    assert_eq!(bits.len(), 77, "decode_message_bits expects a 77-bit payload");
    let i3: u8 = bits[74..77].load_be();

    match i3 {
        0 => decode_type0(bits, cache),
        1 => decode_type1(bits, cache),
        2 => Err("message type 2 (EU VHF contest) is not supported".to_string()),
        3 => Err("message type 3 (RTTY Roundup) is not supported".to_string()),
        4 => decode_type4(bits, cache),
        _ => Err(format!("invalid message type i3={i3}")),
    }
}

fn decode_type0(bits: &BitSlice<u8, Msb0>, cache: Option<&CallsignHashCache>) -> Result<String, String> {
    let n3: u8 = bits[71..74].load_be();
    match n3 {
        0 => decode_free_text_msg(bits),
        1 => decode_dxpedition(bits, cache),
        5 => decode_telemetry(bits),
        _ => Err(format!("message type 0 subtype n3={n3} is not supported")),
    }
}

fn decode_free_text_msg(bits: &BitSlice<u8, Msb0>) -> Result<String, String> {
    let mut text_bytes = [0u8; 9];
    let text_bits = BitSlice::<u8, Msb0>::from_slice_mut(&mut text_bytes);
    text_bits[1..72].copy_from_bitslice(&bits[0..71]);
    let text = decode_free_text(&text_bytes)?;
    Ok(text.trim_end().to_string())
}

fn decode_dxpedition(bits: &BitSlice<u8, Msb0>, cache: Option<&CallsignHashCache>) -> Result<String, String> {
    let call1 = unpack_callsign(bits[0..28].load_be())?;
    let call2 = unpack_callsign(bits[28..56].load_be())?;
    let n10: u16 = bits[56..66].load_be();
    let n5: u8 = bits[66..71].load_be();
    let report = (n5 as i8) * 2 - 30;

    let hash_display = match cache.and_then(|c| c.lookup_10bit(n10)) {
        Some(call) => format!("<{call}>"),
        None => format!("<...{n10}>"),
    };
    let report_str = if report >= 0 {
        format!("+{report:02}")
    } else {
        format!("{report:03}")
    };

    Ok(format!("{call1} RR73; {call2} {hash_display} {report_str}"))
}

fn decode_telemetry(bits: &BitSlice<u8, Msb0>) -> Result<String, String> {
    let ntel1: u32 = bits[0..23].load_be();
    let ntel2: u32 = bits[23..47].load_be();
    let ntel3: u32 = bits[47..71].load_be();
    let hex = format!("{ntel1:06X}{ntel2:06X}{ntel3:06X}");
    let trimmed = hex.trim_start_matches('0');
    Ok(if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() })
}

fn decode_type1(bits: &BitSlice<u8, Msb0>, cache: Option<&CallsignHashCache>) -> Result<String, String> {
    let n3: u8 = bits[3..6].load_be();
    if n3 == 4 {
        decode_type1_nonstandard(bits)
    } else {
        decode_type1_standard(bits, cache)
    }
}

fn decode_hashed_or_standard_call(n28: u32, cache: Option<&CallsignHashCache>) -> Result<String, String> {
    if n28 >= NTOKENS && n28 < NTOKENS + MAX22 {
        let ihash = n28 - NTOKENS;
        Ok(match cache.and_then(|c| c.lookup_22bit(ihash)) {
            Some(call) => format!("<{call}>"),
            None => format!("<...{ihash:06X}>"),
        })
    } else {
        unpack_callsign(n28)
    }
}

fn decode_type1_standard(bits: &BitSlice<u8, Msb0>, cache: Option<&CallsignHashCache>) -> Result<String, String> {
    let n28a: u32 = bits[0..28].load_be();
    let mut call1 = decode_hashed_or_standard_call(n28a, cache)?;
    let call1_suffix = bits[28];

    let n28b: u32 = bits[29..57].load_be();
    let mut call2 = decode_hashed_or_standard_call(n28b, cache)?;
    let call2_suffix = bits[57];

    let r_flag = bits[58];
    let grid_value: u16 = bits[59..74].load_be();
    let mut grid_or_report = decode_grid(grid_value)?;

    if r_flag {
        grid_or_report = if grid_or_report.starts_with('+') || grid_or_report.starts_with('-') {
            format!("R{grid_or_report}")
        } else {
            format!("R {grid_or_report}")
        };
    }

    if call1_suffix {
        call1.push_str("/R");
    }
    if call2_suffix {
        call2.push_str("/R");
    }

    if grid_or_report.is_empty() {
        Ok(format!("{call1} {call2}"))
    } else {
        Ok(format!("{call1} {call2} {grid_or_report}"))
    }
}

fn decode_type1_nonstandard(bits: &BitSlice<u8, Msb0>) -> Result<String, String> {
    let _n12: u16 = bits[6..18].load_be();
    let c58: u64 = bits[18..76].load_be();
    let callsign = decode_compound_callsign(c58);
    Ok(callsign)
}

fn decode_type4(bits: &BitSlice<u8, Msb0>, cache: Option<&CallsignHashCache>) -> Result<String, String> {
    let n12: u16 = bits[0..12].load_be();
    let n58: u64 = bits[12..70].load_be();
    let callsign = decode_compound_callsign(n58);

    let iflip = bits[70];
    let nrpt: u8 = bits[71..73].load_be();
    let icq = bits[73];

    let mut msg = if icq {
        format!("CQ {callsign}")
    } else {
        let hash_call = match cache.and_then(|c| c.lookup_12bit(n12)) {
            Some(call) => format!("<{call}>"),
            None => "<...>".to_string(),
        };
        if iflip {
            format!("{callsign} {hash_call}")
        } else {
            format!("{hash_call} {callsign}")
        }
    };

    match nrpt {
        1 => msg.push_str(" RRR"),
        2 => msg.push_str(" RR73"),
        3 => msg.push_str(" 73"),
        _ => {}
    }

    Ok(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::encode::encode_message_bits;

    #[test]
    fn standard_exchange_roundtrips_through_decode() {
        let bits = encode_message_bits("N0YPR K1JT DM42").unwrap();
        let text = decode_message_bits(&bits, None).unwrap();
        assert_eq!(text, "N0YPR K1JT DM42");
    }

    #[test]
    fn signal_report_with_r_prefix_roundtrips() {
        let bits = encode_message_bits("N0YPR K1JT R-15").unwrap();
        let text = decode_message_bits(&bits, None).unwrap();
        assert_eq!(text, "N0YPR K1JT R-15");
    }

    #[test]
    fn rr73_roundtrips() {
        let bits = encode_message_bits("N0YPR K1JT RR73").unwrap();
        let text = decode_message_bits(&bits, None).unwrap();
        assert_eq!(text, "N0YPR K1JT RR73");
    }

    #[test]
    fn free_text_roundtrips() {
        let bits = encode_message_bits("TNX FER 73 GL").unwrap();
        let text = decode_message_bits(&bits, None).unwrap();
        assert_eq!(text, "TNX FER 73 GL");
    }

    #[test]
    fn unsupported_types_report_clear_errors() {
        let mut bits = bitvec![u8, Msb0; 0; 77];
        bits[74..77].store_be(2u8);
        assert!(decode_message_bits(&bits, None).unwrap_err().contains("not supported"));
    }
}
