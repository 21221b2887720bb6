//! Crate-wide error taxonomy.
//!
//! Per-candidate decode failures (LDPC non-convergence, CRC mismatch,
//! unpack error, below-threshold sync) are not represented here: the spec
//! treats those as local, non-fatal outcomes recorded in
//! [`crate::decoder::DecodeStatus`] and logged at `debug`, not propagated as
//! `Err`. This module covers the boundary conditions that make a whole
//! buffer or file unusable.

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DecodeError {
    #[snafu(display("signal too short: {num_samples} samples at {sample_rate} Hz, need at least {min_samples}"))]
    SignalTooShort {
        num_samples: usize,
        sample_rate: u32,
        min_samples: usize,
    },
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum WavError {
    #[snafu(display("failed to open WAV file {path}: {source}"))]
    Open { path: String, source: hound::Error },

    #[snafu(display("failed to read samples from {path}: {source}"))]
    ReadSamples { path: String, source: hound::Error },

    #[snafu(display("expected mono audio, got {channels} channels in {path}"))]
    NotMono { path: String, channels: u16 },

    #[snafu(display("unsupported sample format in {path}: {bits_per_sample}-bit"))]
    UnsupportedBitDepth { path: String, bits_per_sample: u16 },
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SpoolError {
    #[snafu(display("failed to read directory {path}: {source}"))]
    ReadDir {
        path: String,
        source: std::io::Error,
    },
}
