//! Batch decoder for the FT8 and FT4 weak-signal digital radio protocols.
//!
//! The core of this crate is the signal-to-message decode pipeline for one
//! audio buffer: short-time Fourier analysis into a waterfall of
//! logarithmic magnitudes, Costas-array synchronization search, symbol-level
//! soft-information extraction, LDPC belief-propagation decoding, CRC-14
//! validation, and 77-bit payload unpacking into text. The WAV file reader
//! and the spool/queue layer that discovers and retires recordings on disk
//! are collaborators, not part of the core; see [`wav`] and [`spool`].

pub mod error;
pub mod protocol;
pub mod constants;
pub mod waterfall;
pub mod fft;
pub mod sync;
pub mod demod;
pub mod crc;
pub mod ldpc;
pub mod symbol;
pub mod message;
pub mod dedup;
pub mod emit;
pub mod decoder;
pub mod wav;
pub mod spool;
pub mod tracing_init;

pub use decoder::{decode_buffer, DecoderConfig};
pub use emit::Message;
pub use protocol::Protocol;
pub use waterfall::Waterfall;
