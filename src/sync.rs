//! Costas-array synchronization search over a [`Waterfall`].
//!
//! Grounded in `examples/original_source/decode_ft8.c`'s `ft8_find_sync`
//! contrast scoring and `kMin_score`/`kMax_candidates` bounds, adapted to
//! the fine time/frequency sub-grid the waterfall carries
//! (`time_sub`/`freq_sub`, `TIME_OSR`/`FREQ_OSR` = 2). For every candidate
//! start position the score is the sum, over every Costas sync symbol, of
//! how far the expected tone's magnitude stands above the average of the
//! other tones at that symbol - a high score means "a strong, unambiguous
//! tone sat exactly where the Costas pattern predicted it would".
//!
//! Candidates are kept in a bounded min-heap so that a long search over a
//! wide frequency range never grows unbounded memory; when the heap is at
//! capacity, a new candidate only displaces the current weakest one, and
//! ties keep whichever candidate was discovered first (lower start time,
//! then lower frequency - the search order - wins).

use crate::protocol::ProtocolParams;
use crate::waterfall::Waterfall;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub score: i16,
    pub time_offset: i32,
    pub freq_offset: i32,
    pub time_sub: usize,
    pub freq_sub: usize,
}

struct Entry {
    candidate: Candidate,
    seq: usize,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.candidate.score == other.candidate.score && self.seq == other.seq
    }
}
impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    /// Orders so that `BinaryHeap::pop` (which removes the *greatest*
    /// element) removes the weakest candidate: lowest score first, and
    /// among equal scores the later-discovered (higher `seq`) one, so the
    /// earliest-discovered candidate survives a tie.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .candidate
            .score
            .cmp(&self.candidate.score)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Search `waterfall` for Costas sync candidates in `[freq_min, freq_max)`
/// Hz, keeping at most `max_candidates` with score at or above `min_score`.
/// Returned candidates are sorted by descending score.
pub fn find_candidates(
    waterfall: &Waterfall,
    params: &ProtocolParams,
    freq_min: f32,
    freq_max: f32,
    min_score: i16,
    max_candidates: usize,
) -> Vec<Candidate> {
    use crate::waterfall::{FREQ_OSR, TIME_OSR};

    let num_tones = params.num_tones;
    let bin_min = (freq_min * params.symbol_period).floor().max(0.0) as i32;
    let bin_max = ((freq_max * params.symbol_period).ceil() as i32)
        .min(waterfall.num_bins as i32 - num_tones as i32);

    let last_symbol = params
        .costas_blocks
        .iter()
        .map(|b| b.start_symbol + params.costas_pattern.len())
        .max()
        .unwrap_or(0);

    let mut heap: BinaryHeap<Entry> = BinaryHeap::with_capacity(max_candidates + 1);
    let mut seq = 0usize;

    let max_time_offset = waterfall.num_blocks() as i32 - last_symbol as i32;
    for time_offset in 0..max_time_offset.max(0) {
        for time_sub in 0..TIME_OSR {
            for freq_offset in bin_min..bin_max.max(bin_min) {
                for freq_sub in 0..FREQ_OSR {
                    let score = costas_score(
                        waterfall,
                        params,
                        time_offset,
                        time_sub,
                        freq_offset,
                        freq_sub,
                    );
                    if score < min_score as i32 {
                        continue;
                    }
                    let candidate = Candidate {
                        score: score.clamp(i16::MIN as i32, i16::MAX as i32) as i16,
                        time_offset,
                        freq_offset,
                        time_sub,
                        freq_sub,
                    };
                    heap.push(Entry { candidate, seq });
                    seq += 1;
                    if heap.len() > max_candidates {
                        heap.pop();
                    }
                }
            }
        }
    }

    let mut candidates: Vec<Candidate> = heap.into_iter().map(|e| e.candidate).collect();
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}

fn costas_score(
    waterfall: &Waterfall,
    params: &ProtocolParams,
    time_offset: i32,
    time_sub: usize,
    freq_offset: i32,
    freq_sub: usize,
) -> i32 {
    let num_tones = params.num_tones;
    let mut total = 0i32;
    for block in params.costas_blocks {
        for (k, &tone) in params.costas_pattern.iter().enumerate() {
            let symbol = time_offset + (block.start_symbol + k) as i32;
            if symbol < 0 {
                continue;
            }
            let mut sum = 0i32;
            let mut target = 0i32;
            for t in 0..num_tones as i32 {
                let bin = freq_offset + t;
                if bin < 0 {
                    continue;
                }
                let mag = waterfall.mag(symbol as usize, time_sub, freq_sub, bin as usize) as i32;
                sum += mag;
                if t == tone as i32 {
                    target = mag;
                }
            }
            let others_avg = (sum - target) / (num_tones as i32 - 1).max(1);
            total += target - others_avg;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Protocol;

    #[test]
    fn uniform_noise_floor_scores_near_zero() {
        let params = Protocol::Ft8.params();
        let sample_rate = 12000u32;
        let num_samples = (params.slot_time * sample_rate as f32) as usize;
        let samples = vec![0.0f32; num_samples];
        let wf = Waterfall::build(&samples, sample_rate, &params);
        let candidates = find_candidates(&wf, &params, 100.0, 3000.0, 1, 10);
        assert!(candidates.len() <= 10);
    }

    #[test]
    fn heap_never_exceeds_capacity() {
        let params = Protocol::Ft8.params();
        let sample_rate = 12000u32;
        let num_samples = (params.slot_time * sample_rate as f32) as usize;
        let mut samples = vec![0.0f32; num_samples];
        for (i, s) in samples.iter_mut().enumerate() {
            *s = (i as f32 * 0.01).sin();
        }
        let wf = Waterfall::build(&samples, sample_rate, &params);
        let candidates = find_candidates(&wf, &params, 100.0, 3000.0, -1000, 5);
        assert!(candidates.len() <= 5);
    }
}
