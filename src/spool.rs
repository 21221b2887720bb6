//! Spool / queue layer (spec §6.4): the narrow file-or-directory calling
//! contract around [`crate::decoder::decode_buffer`].
//!
//! `spec.md` scopes the spool manager itself out, naming only the
//! calling contract; this module is grounded directly in
//! `examples/original_source/decode_ft8.c`'s `main()` + `process_file()`,
//! trimmed to the parts that contract actually specifies:
//!
//! - A `.wav.lock` sibling marks a file as claimed; this implementation
//!   only *checks* for the sibling (skip if present) rather than
//!   replicating the reference's `flock`-based multi-process locking,
//!   which is a deployment concern outside this crate's scope.
//! - Per-file failures (unreadable, too short, wrong format) are logged
//!   at `warn` and the file is skipped, not fatal to the run.
//! - The base frequency comes from `-f <megahertz>` if given, otherwise
//!   parsed from a `YYYYMMDDTHHMMSSZ_FFFFFFFFF_usb.wav`-shaped filename,
//!   the reference's exact convention.
//! - Deleting a spooled file after a successful decode is opt-in
//!   (`--delete`), not the reference's unconditional default, since
//!   silently destroying input is not a default this crate should carry.

use crate::decoder::{decode_buffer, DecoderConfig};
use crate::emit::{self, BufferTimestamp, Message};
use crate::error::SpoolError;
use crate::protocol::Protocol;
use crate::wav;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One spool entry ready to decode: a WAV path plus the dial frequency
/// and timestamp context needed to emit absolute-frequency, timestamped
/// output lines.
#[derive(Debug, Clone)]
pub struct SpoolJob {
    pub path: PathBuf,
    pub base_freq_hz: f64,
    pub timestamp: BufferTimestamp,
}

/// Expands `input` (a single WAV file or a directory of them) into the
/// jobs that should be decoded, skipping files with a `.lock` sibling
/// and any name that isn't plausibly a WAV recording. `override_freq_mhz`
/// corresponds to the CLI's `-f` flag.
pub fn collect_jobs(input: &Path, override_freq_mhz: Option<f64>) -> Result<Vec<SpoolJob>, SpoolError> {
    let mut paths = Vec::new();
    if input.is_dir() {
        let entries = fs::read_dir(input).map_err(|source| SpoolError::ReadDir {
            path: input.display().to_string(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| SpoolError::ReadDir {
                path: input.display().to_string(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
    } else {
        paths.push(input.to_path_buf());
    }

    let mut jobs = Vec::new();
    for path in paths {
        if is_lock_file(&path) {
            continue;
        }
        if lock_sibling_exists(&path) {
            warn!(path = %path.display(), "skipping, lock sibling present");
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(timestamp) = parse_timestamp(file_name) else {
            warn!(path = %path.display(), "skipping, filename does not match the expected timestamp pattern");
            continue;
        };
        let base_freq_hz = match override_freq_mhz {
            Some(mhz) => mhz * 1.0e6,
            None => parse_base_freq_hz(file_name).unwrap_or(0.0),
        };
        jobs.push(SpoolJob {
            path,
            base_freq_hz,
            timestamp,
        });
    }
    Ok(jobs)
}

/// Decodes one spool job and writes its emitted lines to `writer`. Per
/// spec §6.4, a file that's unreadable or too short is logged at `warn`
/// and skipped (returns `Ok(0)`, not an error) rather than aborting the
/// whole run; `delete_on_success` mirrors the CLI's opt-in `--delete`.
pub fn process_job<W: std::io::Write>(
    job: &SpoolJob,
    protocol: Protocol,
    config: &DecoderConfig,
    delete_on_success: bool,
    writer: &mut W,
) -> usize {
    let (samples, sample_rate) = match wav::load_wav(&job.path) {
        Ok(v) => v,
        Err(err) => {
            warn!(path = %job.path.display(), error = %err, "skipping, failed to load WAV");
            return 0;
        }
    };

    let messages: Vec<Message> = match decode_buffer(&samples, sample_rate, protocol, config) {
        Ok(messages) => messages,
        Err(err) => {
            warn!(path = %job.path.display(), error = %err, "skipping, buffer rejected");
            return 0;
        }
    };

    if emit::emit_all(writer, &job.timestamp, job.base_freq_hz, &messages).is_err() {
        warn!(path = %job.path.display(), "failed to write decoded output");
    }

    if delete_on_success && !messages.is_empty() {
        if let Err(err) = fs::remove_file(&job.path) {
            warn!(path = %job.path.display(), error = %err, "failed to delete spooled file");
        }
    }

    messages.len()
}

fn is_lock_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("lock")
}

fn lock_sibling_exists(path: &Path) -> bool {
    let mut lock_path = path.as_os_str().to_os_string();
    lock_path.push(".lock");
    Path::new(&lock_path).exists()
}

/// Parses a `YYYYMMDDTHHMMSSZ...`-shaped filename prefix into a
/// timestamp, matching the reference's
/// `sscanf(bn, "%04d%02d%02d%c%02d%02d%02d", ...)`.
fn parse_timestamp(file_name: &str) -> Option<BufferTimestamp> {
    let bytes = file_name.as_bytes();
    if bytes.len() < 15 {
        return None;
    }
    let year: u32 = file_name.get(0..4)?.parse().ok()?;
    let month: u32 = file_name.get(4..6)?.parse().ok()?;
    let day: u32 = file_name.get(6..8)?.parse().ok()?;
    // bytes[8] is the separator character ('T' in the canonical form);
    // any single non-digit byte matches, mirroring `%c` in the sscanf.
    let hour: u32 = file_name.get(9..11)?.parse().ok()?;
    let minute: u32 = file_name.get(11..13)?.parse().ok()?;
    let second: u32 = file_name.get(13..15)?.parse().ok()?;
    Some(BufferTimestamp {
        year,
        month,
        day,
        hour,
        minute,
        second,
    })
}

/// Parses the dial frequency in Hz out of a
/// `YYYYMMDDTHHMMSSZ_FFFFFFFFF_usb.wav`-shaped filename: the value
/// between the first and last underscore, per the reference's
/// `strchr`/`strrchr` pair.
fn parse_base_freq_hz(file_name: &str) -> Option<f64> {
    let first = file_name.find('_')?;
    let last = file_name.rfind('_')?;
    if last <= first {
        return None;
    }
    file_name[first + 1..last].parse().ok()
}
