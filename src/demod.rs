//! Soft demodulation: turn a sync [`Candidate`] into 174 log-likelihood
//! ratios, one per LDPC codeword bit.
//!
//! For each data symbol the demodulator reads the quantized magnitude of
//! every tone and, for each coded bit that symbol carries, takes a
//! max-log approximation of the LLR: the best magnitude among tones whose
//! Gray-coded value has that bit set to 1, minus the best magnitude among
//! tones with the bit set to 0. This is the standard max-log simplification
//! of the true LLR sum (`examples/N0YPR-RustyFt8/src/ldpc/decode.rs` takes
//! LLRs as its primary input, and the teacher's `decoder.rs` uses the same
//! demodulate-then-decode split).

use crate::protocol::ProtocolParams;
use crate::sync::Candidate;
use crate::waterfall::Waterfall;

/// Channel symbol indices (0-based, within one transmission) that carry
/// data rather than Costas sync tones, in transmission order.
pub fn data_symbol_positions(params: &ProtocolParams) -> Vec<usize> {
    let mut is_sync = vec![false; params.num_channel_symbols];
    for block in params.costas_blocks {
        for k in 0..params.costas_pattern.len() {
            is_sync[block.start_symbol + k] = true;
        }
    }
    (0..params.num_channel_symbols)
        .filter(|&s| !is_sync[s])
        .collect()
}

/// Computes the 174 codeword-bit LLRs for `candidate`. Positive values
/// favor a `0` bit, negative favor a `1` (matching the teacher's LDPC
/// decoder convention in `ldpc/decode.rs`).
pub fn demodulate(waterfall: &Waterfall, params: &ProtocolParams, candidate: &Candidate) -> Vec<f32> {
    let positions = data_symbol_positions(params);
    let mut llrs = Vec::with_capacity(positions.len() * params.bits_per_symbol);

    for &data_symbol in &positions {
        let block = candidate.time_offset + data_symbol as i32;
        let mut tone_db = vec![f32::NEG_INFINITY; params.num_tones];
        for tone in 0..params.num_tones {
            if block < 0 {
                continue;
            }
            let bin = candidate.freq_offset + tone as i32;
            if bin < 0 {
                continue;
            }
            tone_db[tone] = waterfall.mag_db(
                block as usize,
                candidate.time_sub,
                candidate.freq_sub,
                bin as usize,
            );
        }

        for bit in 0..params.bits_per_symbol {
            let bit_mask = 1u8 << (params.bits_per_symbol - 1 - bit);
            let mut best1 = f32::NEG_INFINITY;
            let mut best0 = f32::NEG_INFINITY;
            for tone in 0..params.num_tones {
                let coded = params.gray_decode[tone];
                if coded & bit_mask != 0 {
                    best1 = best1.max(tone_db[tone]);
                } else {
                    best0 = best0.max(tone_db[tone]);
                }
            }
            // LLR convention: positive favors bit = 0.
            llrs.push(best0 - best1);
        }
    }

    llrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Protocol;

    #[test]
    fn ft8_produces_174_llrs() {
        let params = Protocol::Ft8.params();
        let sample_rate = 12000u32;
        let num_samples = (params.slot_time * sample_rate as f32) as usize;
        let samples = vec![0.0f32; num_samples];
        let wf = Waterfall::build(&samples, sample_rate, &params);
        let candidate = Candidate {
            score: 0,
            time_offset: 0,
            freq_offset: 10,
            time_sub: 0,
            freq_sub: 0,
        };
        let llrs = demodulate(&wf, &params, &candidate);
        assert_eq!(llrs.len(), 174);
    }

    #[test]
    fn data_symbol_positions_exclude_costas_blocks() {
        let params = Protocol::Ft8.params();
        let positions = data_symbol_positions(&params);
        assert_eq!(positions.len(), params.num_data_symbols);
        assert!(!positions.contains(&0));
        assert!(!positions.contains(&36));
        assert!(!positions.contains(&72));
    }
}
