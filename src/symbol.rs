//! Channel symbol mapping: LDPC codeword bits to/from transmitted tones.
//!
//! Ported from `examples/N0YPR-RustyFt8/src/symbol.rs`'s `map`/`demap`,
//! generalized over [`ProtocolParams`] so the same code serves FT8's
//! 3-bits/8-tone symbols and FT4's 2-bits/4-tone symbols. This module is
//! the inverse of [`crate::demod`]: `demod` turns magnitudes into soft
//! LLRs for the decoder, while `map`/`demap` here deal in hard tone
//! indices, used by the test-signal synthesizer and by round-trip tests.

use crate::protocol::ProtocolParams;
use bitvec::prelude::*;

/// Maps a 174-bit LDPC codeword onto the full channel symbol sequence
/// (Costas sync tones interleaved with Gray-coded data tones).
pub fn map(codeword: &BitSlice<u8, Msb0>, params: &ProtocolParams) -> Vec<u8> {
    assert_eq!(codeword.len(), params.num_data_symbols * params.bits_per_symbol);

    let mut symbols = vec![0u8; params.num_channel_symbols];
    let mut is_sync = vec![false; params.num_channel_symbols];
    for block in params.costas_blocks {
        for (k, &tone) in params.costas_pattern.iter().enumerate() {
            symbols[block.start_symbol + k] = tone;
            is_sync[block.start_symbol + k] = true;
        }
    }

    let mut bit_pos = 0;
    for s in 0..params.num_channel_symbols {
        if is_sync[s] {
            continue;
        }
        let mut coded = 0u8;
        for _ in 0..params.bits_per_symbol {
            coded = (coded << 1) | (codeword[bit_pos] as u8);
            bit_pos += 1;
        }
        symbols[s] = params.gray_encode[coded as usize];
    }

    symbols
}

/// Inverse of [`map`]: recovers the 174 coded bits from a hard tone
/// sequence, ignoring Costas positions.
pub fn demap(symbols: &[u8], params: &ProtocolParams) -> BitVec<u8, Msb0> {
    assert_eq!(symbols.len(), params.num_channel_symbols);

    let mut is_sync = vec![false; params.num_channel_symbols];
    for block in params.costas_blocks {
        for k in 0..params.costas_pattern.len() {
            is_sync[block.start_symbol + k] = true;
        }
    }

    let mut bits = BitVec::<u8, Msb0>::with_capacity(params.num_data_symbols * params.bits_per_symbol);
    for s in 0..params.num_channel_symbols {
        if is_sync[s] {
            continue;
        }
        let coded = params.gray_decode[symbols[s] as usize];
        for b in (0..params.bits_per_symbol).rev() {
            bits.push((coded >> b) & 1 != 0);
        }
    }

    bits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Protocol;

    #[test]
    fn ft8_map_demap_roundtrip() {
        let params = Protocol::Ft8.params();
        let mut codeword = BitVec::<u8, Msb0>::repeat(false, 174);
        for i in (0..174).step_by(3) {
            codeword.set(i, true);
        }
        let symbols = map(&codeword, &params);
        assert_eq!(symbols.len(), 79);
        let recovered = demap(&symbols, &params);
        assert_eq!(recovered, codeword);
    }

    #[test]
    fn ft8_sync_positions_carry_costas_pattern() {
        let params = Protocol::Ft8.params();
        let codeword = BitVec::<u8, Msb0>::repeat(false, 174);
        let symbols = map(&codeword, &params);
        assert_eq!(&symbols[0..7], params.costas_pattern);
        assert_eq!(&symbols[36..43], params.costas_pattern);
        assert_eq!(&symbols[72..79], params.costas_pattern);
    }

    #[test]
    fn ft4_map_demap_roundtrip() {
        let params = Protocol::Ft4.params();
        let mut codeword = BitVec::<u8, Msb0>::repeat(false, 174);
        codeword.set(0, true);
        codeword.set(173, true);
        let symbols = map(&codeword, &params);
        let recovered = demap(&symbols, &params);
        assert_eq!(recovered, codeword);
    }
}
