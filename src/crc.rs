//! CRC-14 validation of the 77-bit payload.
//!
//! Ported verbatim from `examples/N0YPR-RustyFt8/src/crc.rs`: the 77
//! payload bits are packed MSB-first into a `u128` (bit 0 at position 76),
//! left-shifted by 5 so the zero-extension to 82 bits lands at the *low*
//! end rather than padding a byte-aligned `BitVec` at the tail, then
//! `to_be_bytes()` and the trailing 11 bytes (88 bits, the low 82 of which
//! are the zero-extended message) are run through the WSJT-X CRC-14
//! algorithm (poly `0x2757`, no reflection, zero init/xorout). Packing
//! through a front-packed `BitVec::into_vec()` instead would put the
//! zero-extension's padding at the tail and misalign every payload byte
//! by one bit short of a byte boundary — this integer-shift route avoids
//! that.

use crate::constants::{CRC_BITS, CRC_POLYNOMIAL, PAYLOAD_BITS};
use bitvec::prelude::*;
use crc::{Algorithm, Crc};

const CRC14_ALGORITHM: Algorithm<u16> = Algorithm {
    width: 14,
    poly: CRC_POLYNOMIAL,
    init: 0,
    refin: false,
    refout: false,
    xorout: 0,
    check: 0,
    residue: 0,
};

/// Computes the CRC-14 of a 77-bit payload. `bits` must be exactly
/// [`PAYLOAD_BITS`] long.
pub fn crc14(bits: &BitSlice<u8, Msb0>) -> u16 {
    assert_eq!(bits.len(), PAYLOAD_BITS, "crc14 expects a 77-bit payload");

    let mut msg: u128 = 0;
    for (i, bit) in bits.iter().enumerate() {
        if *bit {
            msg |= 1u128 << (PAYLOAD_BITS - 1 - i);
        }
    }

    // Zero-extend from 77 to 82 bits by left-shifting by 5: the low 5
    // bits of the shifted value are the zero-extension, matching the
    // spec's "zero-extended from 77 to 82 bits" wording exactly.
    let padded_msg = msg << 5;
    let msg_bytes = padded_msg.to_be_bytes();
    let trimmed_bytes = &msg_bytes[msg_bytes.len() - 11..];

    let crc = Crc::<u16>::new(&CRC14_ALGORITHM);
    crc.checksum(trimmed_bytes)
}

/// Validates a 91-bit payload+CRC word: recomputes the CRC over the first
/// 77 bits and compares it with the trailing 14.
pub fn crc14_check(bits: &BitSlice<u8, Msb0>) -> bool {
    assert_eq!(bits.len(), PAYLOAD_BITS + CRC_BITS, "crc14_check expects a 91-bit word");
    let payload = &bits[..PAYLOAD_BITS];
    let extracted: u16 = bits[PAYLOAD_BITS..].load_be();
    crc14(payload) == extracted
}
