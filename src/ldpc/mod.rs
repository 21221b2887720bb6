//! LDPC(174,91) encoding and belief-propagation decoding.

mod constants;
mod decode;
mod encode;

pub use decode::{decode, DecodeResult};
pub use encode::encode;
