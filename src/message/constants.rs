//! Character sets and range boundaries for the 77-bit message layout.
//!
//! Ported from `examples/N0YPR-RustyFt8/src/message/constants.rs`.
//! `NTOKENS` and `MAX22` were re-derived from the teacher's own
//! `pack_callsign`/`unpack_callsign` test vectors (`<KH1/KH7Z>` etc.) to
//! confirm the boundary between the directed-CQ token range, the 22-bit
//! hash range, and the standard six-character callsign range, since the
//! teacher snapshot did not carry the WSJT-X source comment deriving them.

/// Base-42 character set for free text messages: space, digits, letters,
/// and `+-./?`.
pub const CHARSET_BASE42: &[u8] = b" 0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ+-./?";

/// Base-38 character set for compound (non-standard) callsign encoding:
/// space, digits, letters, and `/`.
pub const CHARSET_BASE38: &[u8] = b" 0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ/";

/// First position of a right-adjusted 6-character callsign: space, digit,
/// or letter (37 symbols).
pub const CHARSET_A1: &str = " 0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Second position: digit or letter (36 symbols).
pub const CHARSET_A2: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Third position: digit only (10 symbols).
pub const CHARSET_A3: &str = "0123456789";
/// Fourth through sixth positions: space or letter (27 symbols).
pub const CHARSET_A4: &str = " ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of directed-station tokens (`DE`, `QRZ`, `CQ`, `CQ nnn`,
/// `CQ <suffix>`) that precede the hash and standard-callsign ranges in
/// the 28-bit callsign field.
pub const NTOKENS: u32 = 2_063_592;

/// Width of the 22-bit non-standard-callsign hash range that follows the
/// token range.
pub const MAX22: u32 = 4_194_304;

/// Grid squares below this value are genuine Maidenhead locators; values
/// at or above it are signal reports or the `RRR`/`RR73`/`73` tokens.
pub const MAXGRID4: u16 = 32_400;
