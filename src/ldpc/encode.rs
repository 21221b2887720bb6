//! LDPC(174,91) systematic encoding.
//!
//! Ported from `examples/N0YPR-RustyFt8/src/ldpc.rs`'s `ldpc_encode`: the
//! 91-bit message is copied unchanged into the first 91 codeword bits, and
//! each of the 83 parity bits is the GF(2) dot product of the message with
//! one row of the generator matrix.

use super::constants::generator_bit;
use crate::constants::{LDPC_K, LDPC_M, LDPC_N};
use bitvec::prelude::*;

/// Encodes a 91-bit message (77 payload bits + 14 CRC bits) into a
/// 174-bit LDPC codeword.
pub fn encode(message: &BitSlice<u8, Msb0>) -> BitVec<u8, Msb0> {
    assert_eq!(message.len(), LDPC_K, "LDPC message must be {LDPC_K} bits");

    let mut codeword = BitVec::<u8, Msb0>::repeat(false, LDPC_N);
    codeword[..LDPC_K].copy_from_bitslice(message);

    for i in 0..LDPC_M {
        let mut parity = false;
        for j in 0..LDPC_K {
            parity ^= message[j] & (generator_bit(i, j) != 0);
        }
        codeword.set(LDPC_K + i, parity);
    }

    codeword
}
