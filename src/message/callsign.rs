//! Callsign packing: the WSJT-X `pack28`/`unpack28` algorithm.
//!
//! Ported from `examples/N0YPR-RustyFt8/src/message/callsign.rs`. A 28-bit
//! field encodes one of: a handful of special tokens (`DE`, `QRZ`, `CQ`),
//! a directed CQ (`CQ 073`, `CQ DX`), a 22-bit hash standing in for a
//! callsign too irregular to pack directly, or a right-adjusted
//! six-character standard callsign via mixed-radix positional encoding.

use super::constants::{CHARSET_A1, CHARSET_A2, CHARSET_A3, CHARSET_A4, CHARSET_BASE38, MAX22, NTOKENS};

/// Unpacks a 28-bit callsign field into its textual form. Hash-range
/// values (which carry no recoverable text) decode to the placeholder
/// `"<...>"`; callers holding a [`super::CallsignHashCache`] should check
/// the hash range themselves and look the callsign up before falling
/// back to this.
pub fn unpack_callsign(n28: u32) -> Result<String, String> {
    if n28 == 0 {
        return Ok("DE".to_string());
    }
    if n28 == 1 {
        return Ok("QRZ".to_string());
    }
    if n28 == 2 {
        return Ok("CQ".to_string());
    }

    if n28 >= 3 && n28 < NTOKENS {
        if n28 <= 1002 {
            return Ok(format!("CQ {:03}", n28 - 3));
        }

        let value = n28 - 1003;
        if value <= 26 {
            let ch = (b'A' + (value - 1) as u8) as char;
            return Ok(format!("CQ {ch}"));
        }

        let max_2letter = 27 + 27 * 26;
        let max_3letter = max_2letter + 27 * 27 * 26;
        let len = if value < max_2letter {
            2
        } else if value < max_3letter {
            3
        } else {
            4
        };

        let mut remaining = value;
        let mut chars = Vec::new();
        for i in (0..len).rev() {
            let divisor = 27u32.pow(i);
            let idx = remaining / divisor;
            remaining %= divisor;
            if idx == 0 {
                chars.push(' ');
            } else if idx <= 26 {
                chars.push((b'A' + (idx - 1) as u8) as char);
            } else {
                return Err(format!("invalid directed CQ value: {n28}"));
            }
        }
        let suffix: String = chars.into_iter().collect();
        return Ok(format!("CQ {}", suffix.trim_start()));
    }

    if n28 >= NTOKENS && n28 < NTOKENS + MAX22 {
        return Ok("<...>".to_string());
    }

    if n28 >= NTOKENS + MAX22 {
        let n = n28 - NTOKENS - MAX22;

        let base1 = 36 * 10 * 27 * 27 * 27;
        let i1 = (n / base1) as usize;
        let mut rem = n % base1;
        let base2 = 10 * 27 * 27 * 27;
        let i2 = (rem / base2) as usize;
        rem %= base2;
        let base3 = 27 * 27 * 27;
        let i3 = (rem / base3) as usize;
        rem %= base3;
        let base4 = 27 * 27;
        let i4 = (rem / base4) as usize;
        rem %= base4;
        let i5 = (rem / 27) as usize;
        let i6 = (rem % 27) as usize;

        let a1: Vec<char> = CHARSET_A1.chars().collect();
        let a2: Vec<char> = CHARSET_A2.chars().collect();
        let a3: Vec<char> = CHARSET_A3.chars().collect();
        let a4: Vec<char> = CHARSET_A4.chars().collect();
        if i1 >= a1.len() || i2 >= a2.len() || i3 >= a3.len() || i4 >= a4.len() || i5 >= a4.len() || i6 >= a4.len() {
            return Err(format!("n28 {n28} produces out-of-range callsign indices"));
        }

        let six: String = [a1[i1], a2[i2], a3[i3], a4[i4], a4[i5], a4[i6]].iter().collect();
        return Ok(six.trim().to_string());
    }

    Err(format!("invalid n28 value: {n28}"))
}

/// Packs a callsign (and the small set of directed-CQ/special-token
/// forms, and `<...>`-bracketed hash references) into a 28-bit field.
pub fn pack_callsign(callsign: &str) -> Result<u32, String> {
    if callsign == "DE" {
        return Ok(0);
    }
    if callsign == "QRZ" {
        return Ok(1);
    }
    if callsign == "CQ" {
        return Ok(2);
    }

    if let Some(suffix) = callsign.strip_prefix("CQ ") {
        if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()) {
            let n: u32 = suffix
                .parse()
                .map_err(|_| format!("invalid numeric directed CQ: '{callsign}'"))?;
            if n > 999 {
                return Err(format!("numeric directed CQ suffix must be 0-999: '{callsign}'"));
            }
            return Ok(3 + n);
        }
        if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_alphabetic()) {
            let upper = suffix.to_uppercase();
            let len = upper.chars().count();
            if len > 4 {
                return Err(format!("alphabetic directed CQ suffix must be 1-4 letters: '{callsign}'"));
            }
            let mut value = 0u32;
            for (i, ch) in upper.chars().enumerate() {
                let idx = (ch as u32) - ('A' as u32) + 1;
                value += idx * 27u32.pow((len - 1 - i) as u32);
            }
            return Ok(1003 + value);
        }
        return Err(format!(
            "directed CQ suffix must be numeric 000-999 or alphabetic A-ZZZZ: '{callsign}'"
        ));
    }

    if let Some(inner) = callsign.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        return Ok(NTOKENS + hash22(inner));
    }

    let mut base_call = callsign;
    if let Some((head, tail)) = callsign.split_once('/') {
        base_call = match tail.to_uppercase().as_str() {
            "P" | "R" => head,
            _ => tail,
        };
    }

    let call = base_call.to_uppercase();
    let chars: Vec<char> = call.chars().collect();
    let n = chars.len();
    if !(3..=6).contains(&n) {
        return Err(format!("callsign length must be 3-6 characters: '{base_call}'"));
    }

    let iarea = (1..n)
        .rev()
        .find(|&i| chars[i].is_ascii_digit())
        .filter(|&pos| pos <= 2)
        .ok_or_else(|| format!("callsign must have a digit in position 2 or 3: '{callsign}'"))?;

    let nplet = chars[..iarea].iter().filter(|c| c.is_ascii_alphabetic()).count();
    let npdig = chars[..iarea].iter().filter(|c| c.is_ascii_digit()).count();
    let nslet = chars[iarea + 1..].iter().filter(|c| c.is_ascii_alphabetic()).count();
    if nplet == 0 || npdig >= iarea || nslet > 3 {
        return Err(format!("invalid standard callsign shape: '{callsign}'"));
    }

    let callsign_6 = if iarea == 1 {
        format!(" {call:<5}")
    } else {
        format!("{call:<6}")
    };
    let c6: Vec<char> = callsign_6.chars().collect();

    let i1 = CHARSET_A1.find(c6[0]).ok_or_else(|| format!("invalid character at position 1: '{}'", c6[0]))?;
    let i2 = CHARSET_A2.find(c6[1]).ok_or_else(|| format!("invalid character at position 2: '{}'", c6[1]))?;
    let i3 = CHARSET_A3.find(c6[2]).ok_or_else(|| format!("invalid character at position 3: '{}'", c6[2]))?;
    let i4 = CHARSET_A4.find(c6[3]).ok_or_else(|| format!("invalid character at position 4: '{}'", c6[3]))?;
    let i5 = CHARSET_A4.find(c6[4]).ok_or_else(|| format!("invalid character at position 5: '{}'", c6[4]))?;
    let i6 = CHARSET_A4.find(c6[5]).ok_or_else(|| format!("invalid character at position 6: '{}'", c6[5]))?;

    let n28 = 36 * 10 * 27 * 27 * 27 * (i1 as u32)
        + 10 * 27 * 27 * 27 * (i2 as u32)
        + 27 * 27 * 27 * (i3 as u32)
        + 27 * 27 * (i4 as u32)
        + 27 * (i5 as u32)
        + (i6 as u32)
        + NTOKENS
        + MAX22;

    Ok(n28 & ((1 << 28) - 1))
}

/// WSJT-X `ihashcall`: folds a callsign into an `m`-bit hash via a base-38
/// digit expansion multiplied by a fixed odd constant.
pub fn ihashcall(callsign: &str, m: u32) -> u32 {
    let mut padded = callsign.to_uppercase();
    padded.truncate(11);
    while padded.chars().count() < 11 {
        padded.push(' ');
    }

    let mut n8: u64 = 0;
    for ch in padded.chars() {
        let j = CHARSET_BASE38.iter().position(|&c| c == ch as u8).unwrap_or(0) as u64;
        n8 = 38 * n8 + j;
    }

    let result = n8.wrapping_mul(47_055_833_459u64);
    let shifted = result >> (64 - m);
    (shifted & ((1u64 << m) - 1)) as u32
}

pub fn hash10(callsign: &str) -> u16 {
    ihashcall(callsign, 10) as u16
}

pub fn hash12(callsign: &str) -> u16 {
    ihashcall(callsign, 12) as u16
}

pub fn hash22(callsign: &str) -> u32 {
    ihashcall(callsign, 22)
}

/// Whether `callsign` can be packed by [`pack_callsign`] without falling
/// back to the 22-bit hash form.
pub fn is_standard_callsign(callsign: &str) -> bool {
    pack_callsign(callsign).map(|n28| n28 >= NTOKENS + MAX22).unwrap_or(false)
}
