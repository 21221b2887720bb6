//! Batch FT8/FT4 decoder CLI.
//!
//! Usage (ported from `examples/original_source/decode_ft8.c`'s
//! `-v`/`-4`/`-d`/`-f basefreq` getopt parsing, manual `env::args()`
//! handling in the teacher's own style rather than a `clap` dependency
//! the teacher's stack doesn't carry, per `examples/N0YPR-RustyFt8/src/
//! bin/ft8detect.rs`):
//!
//! ```text
//! ft8dec [-4] [-v] [--delete] [-f megahertz] file_or_directory
//! ```
//!
//! `-4` selects FT4 instead of FT8; `-v` raises the default log level to
//! debug; `--delete` opts into deleting a spooled file after a
//! successful decode (disabled by default, a deliberate divergence from
//! the reference's unconditional `unlink`, documented in DESIGN.md).

use rustyft8::decoder::DecoderConfig;
use rustyft8::protocol::Protocol;
use rustyft8::spool;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

struct Args {
    input: PathBuf,
    protocol: Protocol,
    verbose: bool,
    delete: bool,
    base_freq_mhz: Option<f64>,
}

fn parse_args() -> Result<Args, String> {
    let mut input: Option<PathBuf> = None;
    let mut protocol = Protocol::Ft8;
    let mut verbose = false;
    let mut delete = false;
    let mut base_freq_mhz = None;

    let mut args = env::args().skip(1).peekable();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-4" => protocol = Protocol::Ft4,
            "-v" | "--verbose" => verbose = true,
            "-d" | "--delete" => delete = true,
            "-f" => {
                let value = args.next().ok_or("-f requires a megahertz value")?;
                base_freq_mhz = Some(value.parse::<f64>().map_err(|e| format!("invalid -f value: {e}"))?);
            }
            other if !other.starts_with('-') => {
                input = Some(PathBuf::from(other));
            }
            other => return Err(format!("unknown option: {other}")),
        }
    }

    let input = input.ok_or_else(usage)?;
    Ok(Args {
        input,
        protocol,
        verbose,
        delete,
        base_freq_mhz,
    })
}

fn usage() -> String {
    "usage: ft8dec [-4] [-v] [--delete] [-f basefreq_mhz] file_or_directory".to_string()
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{}", usage());
            return ExitCode::FAILURE;
        }
    };

    if args.verbose && env::var_os("RUST_LOG").is_none() {
        // SAFETY: single-threaded at this point in `main`, before any
        // worker or logging thread has been spawned.
        unsafe {
            env::set_var("RUST_LOG", "rustyft8=debug");
        }
    }
    rustyft8::tracing_init::init_tracing();

    let jobs = match spool::collect_jobs(&args.input, args.base_freq_mhz) {
        Ok(jobs) => jobs,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let config = DecoderConfig::default();
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let mut total = 0usize;
    for job in &jobs {
        total += spool::process_job(job, args.protocol, &config, args.delete, &mut handle);
    }
    tracing::info!(decoded = total, files = jobs.len(), "batch complete");

    ExitCode::SUCCESS
}
