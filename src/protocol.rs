//! Protocol-dependent constants for FT8 and FT4.
//!
//! `Protocol` is a tagged enumeration rather than an `is_ft8: bool` so that
//! every protocol-dependent quantity (symbol timing, tone count, Costas
//! sync layout, data symbol count) lives in one place keyed off the tag,
//! instead of scattered `if is_ft8 { .. } else { .. }` branches. See
//! Design Note "Tagged protocol variant" in spec.md.

/// Which of the two weak-signal protocols a buffer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Ft4,
    Ft8,
}

/// A contiguous run of Costas sync symbols at a fixed position in the
/// channel symbol sequence.
#[derive(Debug, Clone, Copy)]
pub struct CostasBlock {
    /// Index of the first symbol of this sync block in the channel symbol
    /// sequence.
    pub start_symbol: usize,
}

/// All protocol-dependent parameters needed by the waterfall builder, the
/// sync searcher, and the soft demodulator.
#[derive(Debug, Clone, Copy)]
pub struct ProtocolParams {
    pub protocol: Protocol,
    /// Duration of one channel symbol, in seconds.
    pub symbol_period: f32,
    /// Duration of a full transmission slot, in seconds.
    pub slot_time: f32,
    /// Number of FSK tones (8 for FT8, 4 for FT4).
    pub num_tones: usize,
    /// log2(num_tones): coded bits carried by one symbol.
    pub bits_per_symbol: usize,
    /// Number of data (non-sync) channel symbols.
    pub num_data_symbols: usize,
    /// Total channel symbols (data + sync) in one transmission.
    pub num_channel_symbols: usize,
    /// Starting symbol index of each Costas sync block.
    pub costas_blocks: &'static [CostasBlock],
    /// The Costas tone sequence repeated at each sync block.
    pub costas_pattern: &'static [u8],
    /// Gray code: tone index -> coded value. `gray[tone] = value`.
    pub gray_decode: &'static [u8],
    /// Inverse Gray code: coded value -> tone index.
    pub gray_encode: &'static [u8],
    /// Minimum input duration, in seconds, the caller must provide (spec
    /// §6.1 rejection rule: `num_samples < min_seconds * sample_rate`).
    pub min_seconds: f32,
}

/// FT8 Costas tone pattern (verified against the teacher's test vectors,
/// `examples/N0YPR-RustyFt8/src/symbol.rs`).
const FT8_COSTAS_PATTERN: [u8; 7] = [3, 1, 4, 0, 6, 5, 2];
const FT8_COSTAS_BLOCKS: [CostasBlock; 3] = [
    CostasBlock { start_symbol: 0 },
    CostasBlock { start_symbol: 36 },
    CostasBlock { start_symbol: 72 },
];
/// 3-bit Gray code: coded value -> tone, ported from the teacher's
/// `FT8_GRAY_CODE` / `symbol::GRAY_MAP`.
const FT8_GRAY_ENCODE: [u8; 8] = [0, 1, 3, 2, 5, 6, 4, 7];
/// Inverse: tone -> coded value, ported from the teacher's `GRAY_MAP_INV`.
const FT8_GRAY_DECODE: [u8; 8] = [0, 1, 3, 2, 6, 4, 5, 7];

/// FT4 Costas tone pattern. The real protocol rotates among four slot-phase
/// dependent 4-tone Costas arrays (selected by the UTC second within the
/// 7.5s cycle); spec.md §6.3 treats Costas tables as a supplied protocol
/// constant "listed abstractly, not re-derived", so this implementation
/// uses one representative 4-tone Costas array rather than reproducing the
/// WSJT-X slot-phase rotation table, which is not recoverable from the
/// spec text alone. See DESIGN.md.
const FT4_COSTAS_PATTERN: [u8; 4] = [0, 1, 3, 2];
const FT4_COSTAS_BLOCKS: [CostasBlock; 4] = [
    CostasBlock { start_symbol: 0 },
    CostasBlock { start_symbol: 33 },
    CostasBlock { start_symbol: 66 },
    CostasBlock { start_symbol: 99 },
];
/// 2-bit Gray code, standard bijection for 4-FSK.
const FT4_GRAY_ENCODE: [u8; 4] = [0, 1, 3, 2];
const FT4_GRAY_DECODE: [u8; 4] = [0, 1, 3, 2];

impl Protocol {
    pub fn params(self) -> ProtocolParams {
        match self {
            Protocol::Ft8 => ProtocolParams {
                protocol: self,
                symbol_period: 0.16,
                slot_time: 15.0,
                num_tones: 8,
                bits_per_symbol: 3,
                num_data_symbols: 58,
                num_channel_symbols: 79,
                costas_blocks: &FT8_COSTAS_BLOCKS,
                costas_pattern: &FT8_COSTAS_PATTERN,
                gray_decode: &FT8_GRAY_DECODE,
                gray_encode: &FT8_GRAY_ENCODE,
                min_seconds: 12.64,
            },
            Protocol::Ft4 => ProtocolParams {
                protocol: self,
                symbol_period: 0.048,
                slot_time: 7.5,
                num_tones: 4,
                bits_per_symbol: 2,
                num_data_symbols: 87,
                num_channel_symbols: 103,
                costas_blocks: &FT4_COSTAS_BLOCKS,
                costas_pattern: &FT4_COSTAS_PATTERN,
                gray_decode: &FT4_GRAY_DECODE,
                gray_encode: &FT4_GRAY_ENCODE,
                min_seconds: 4.48,
            },
        }
    }
}
