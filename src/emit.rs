//! Decoded-message record and the textual emission format (spec §4.8).
//!
//! The line format is ported directly from
//! `examples/original_source/decode_ft8.c`'s final `fprintf`:
//! ```text
//! %4d/%02d/%02d %02d:%02d:%02d %3d %+4.2f %'.1lf ~ %s\n
//! ```
//! i.e. a UTC timestamp, the Costas sync score, the signed time offset
//! within the slot, the absolute dial frequency with a thousands
//! separator, and the decoded text. The teacher's stack carries no
//! `chrono`/`time` crate and no locale crate, so both the timestamp and
//! the grouped-frequency formatting are small hand-rolled helpers here,
//! matching the original's reliance on libc's `setlocale`-driven `'`
//! flag with a dependency-free equivalent.

use std::fmt;

/// One decoded message, ready for deduplication and emission.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    /// Dedup fingerprint (spec §4.7), not displayed.
    pub hash: u16,
    pub freq_hz: f32,
    pub time_sec: f32,
    pub score: i16,
    /// Order the candidate was discovered in, before deduplication. Spec
    /// §4.8 requires equal-frequency messages to come out in insertion
    /// order; [`crate::dedup::DedupTable`] stores messages by hash slot,
    /// not discovery order, so this field is the only thing that survives
    /// the trip through the dedup table to make that tie-break possible.
    pub seq: u64,
}

/// A broken-down UTC timestamp, parsed from a spool filename
/// (`YYYYMMDDTHHMMSSZ_...`) by [`crate::spool`]. Stands in for the
/// `chrono`/`time` crate the teacher's stack doesn't carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferTimestamp {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl fmt::Display for BufferTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}/{:02}/{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Formats one decoded message as a single output line, matching the
/// original's `fprintf` column layout exactly:
/// `timestamp score time_sec freq_hz ~ text`.
///
/// `base_freq_hz` is the dial (carrier) frequency the buffer was tuned
/// to; `message.freq_hz` is the audio-baseband offset within it, so the
/// displayed frequency is their sum (`1.0e6 * base_freq_mhz + freq_hz`
/// in the original).
pub fn format_line(timestamp: &BufferTimestamp, base_freq_hz: f64, message: &Message) -> String {
    let absolute_freq_hz = base_freq_hz + message.freq_hz as f64;
    format!(
        "{} {:3} {:+4.2} {} ~ {}",
        timestamp,
        message.score,
        message.time_sec,
        group_thousands(absolute_freq_hz),
        message.text
    )
}

/// Formats `value` with one decimal place and thousands-grouping commas
/// on the integer part, e.g. `14_074_123.4` -> `"14,074,123.4"`. Stands
/// in for the original's locale-dependent `'` printf flag.
fn group_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let formatted = format!("{:.1}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "0"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-{int_grouped}.{frac_part}")
    } else {
        format!("{int_grouped}.{frac_part}")
    }
}

/// Emits every message in `messages` (already deduplicated, per
/// [`crate::dedup::DedupTable`]) to `writer`, one line each, sorted by
/// ascending `freq_hz`, ties broken by discovery order (spec §4.8).
pub fn emit_all<W: std::io::Write>(
    writer: &mut W,
    timestamp: &BufferTimestamp,
    base_freq_hz: f64,
    messages: &[Message],
) -> std::io::Result<()> {
    let mut sorted: Vec<&Message> = messages.iter().collect();
    sorted.sort_by(|a, b| {
        a.freq_hz
            .partial_cmp(&b.freq_hz)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.seq.cmp(&b.seq))
    });
    for message in sorted {
        writeln!(writer, "{}", format_line(timestamp, base_freq_hz, message))?;
    }
    Ok(())
}
