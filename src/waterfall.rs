//! Short-time Fourier waterfall: the byte-quantized magnitude tensor the
//! sync searcher and soft demodulator both read from.
//!
//! Grounded in `examples/original_source/decode_ft8.c` (`monitor_init`,
//! `monitor_process`, `waterfall_t`): a Hann-windowed STFT is taken every
//! `subblock_size` samples at `nfft = block_size * freq_osr` resolution,
//! converted to decibels, and quantized to a single byte per bin
//! (`scaled = (int)(2*db + 240)`, clamped to `[0, 255]`). `time_osr` and
//! `freq_osr` (both fixed at 2, matching `kTime_osr`/`kFreq_osr`) give four
//! overlapping sub-grids per coarse (block, bin) cell, which the sync
//! searcher uses to refine time and frequency offsets below one symbol /
//! one tone spacing.

use crate::fft::fft_real;
use crate::protocol::ProtocolParams;

pub const TIME_OSR: usize = 2;
pub const FREQ_OSR: usize = 2;

/// A Hann-windowed, byte-quantized STFT waterfall for one audio buffer.
///
/// `magnitudes` is laid out as `[block][time_sub][freq_sub][bin]`, flattened
/// with `block_stride = TIME_OSR * FREQ_OSR * num_bins` bytes per block, so
/// that `mag(block, time_sub, freq_sub, bin)` is a single indexed lookup.
#[derive(Debug, Clone)]
pub struct Waterfall {
    pub sample_rate: u32,
    pub symbol_period: f32,
    pub num_bins: usize,
    pub max_blocks: usize,
    pub block_stride: usize,
    num_blocks: usize,
    magnitudes: Vec<u8>,
}

impl Waterfall {
    /// Builds the complete waterfall for `samples` (mono, `sample_rate`-Hz
    /// PCM already normalized to `[-1.0, 1.0]`) under protocol `params`.
    /// Extra samples beyond `max_blocks` worth of slot time are ignored;
    /// short buffers are zero-padded for the trailing frames, matching the
    /// original's tolerance for a slot that ends slightly early.
    pub fn build(samples: &[f32], sample_rate: u32, params: &ProtocolParams) -> Waterfall {
        let block_size = (sample_rate as f32 * params.symbol_period) as usize;
        let subblock_size = block_size / TIME_OSR;
        let nfft = block_size * FREQ_OSR;
        let fft_norm = 2.0 / nfft as f32;
        let num_bins = block_size / 2;
        let max_blocks = (params.slot_time / params.symbol_period) as usize;
        let block_stride = TIME_OSR * FREQ_OSR * num_bins;

        let window = hann_window(nfft);
        let mut magnitudes = vec![0u8; max_blocks * block_stride];
        let mut num_blocks = 0;

        'blocks: for block in 0..max_blocks {
            for time_sub in 0..TIME_OSR {
                let t = block * TIME_OSR + time_sub;
                let frame_start = t * subblock_size;
                if frame_start >= samples.len() {
                    break 'blocks;
                }
                let frame = windowed_frame(samples, frame_start, nfft, &window);
                let spectrum = fft_real(&frame);

                let base = block * block_stride + time_sub * FREQ_OSR * num_bins;
                for bin in 0..num_bins {
                    for freq_sub in 0..FREQ_OSR {
                        let spectral_index = bin * FREQ_OSR + freq_sub;
                        let c = spectrum[spectral_index];
                        let mag2 = (c.re * fft_norm).powi(2) + (c.im * fft_norm).powi(2);
                        let db = 10.0 * libm::log10f(1e-12 + mag2);
                        let scaled = (2.0 * db + 240.0).round();
                        let byte = scaled.clamp(0.0, 255.0) as u8;
                        magnitudes[base + freq_sub * num_bins + bin] = byte;
                    }
                }
            }
            num_blocks = block + 1;
        }

        Waterfall {
            sample_rate,
            symbol_period: params.symbol_period,
            num_bins,
            max_blocks,
            block_stride,
            num_blocks,
            magnitudes,
        }
    }

    pub fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    /// Quantized magnitude byte at `(block, time_sub, freq_sub, bin)`.
    /// Returns `0` (the quantizer's floor) for blocks beyond what was
    /// actually filled.
    pub fn mag(&self, block: usize, time_sub: usize, freq_sub: usize, bin: usize) -> u8 {
        if block >= self.num_blocks || bin >= self.num_bins {
            return 0;
        }
        let idx = block * self.block_stride + time_sub * FREQ_OSR * self.num_bins + freq_sub * self.num_bins + bin;
        self.magnitudes[idx]
    }

    /// Approximate dB magnitude recovered from the quantized byte, inverse
    /// of the `(int)(2*db + 240)` encoding.
    pub fn mag_db(&self, block: usize, time_sub: usize, freq_sub: usize, bin: usize) -> f32 {
        (self.mag(block, time_sub, freq_sub, bin) as f32 - 240.0) / 2.0
    }

    /// Center frequency in Hz of `(bin, freq_sub)`: tone spacing is
    /// `1 / symbol_period`, and `freq_sub` refines within one tone spacing
    /// at `FREQ_OSR` steps.
    pub fn bin_freq_hz(&self, bin: usize, freq_sub: usize) -> f32 {
        (bin as f32 + freq_sub as f32 / FREQ_OSR as f32) / self.symbol_period
    }
}

fn hann_window(n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| {
            let s = libm::sinf(std::f32::consts::PI * i as f32 / n as f32);
            s * s
        })
        .collect()
}

fn windowed_frame(samples: &[f32], start: usize, n: usize, window: &[f32]) -> Vec<f32> {
    let mut frame = vec![0.0f32; n];
    for i in 0..n {
        if let Some(&s) = samples.get(start + i) {
            frame[i] = s * window[i];
        }
    }
    frame
}
