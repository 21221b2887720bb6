//! WAV file loading (spec §6.1).
//!
//! Uses `hound`, already a teacher dependency and already used this way
//! in the teacher's own `tests/test_utils.rs::read_wav_file`: open,
//! validate mono + a supported sample format, then convert every sample
//! to `f32` normalized to `[-1.0, 1.0]` (PCM-to-float policy: divide by
//! 32768.0, per spec §9's Numeric Policy). Stereo files are rejected
//! rather than silently downmixed or read as interleaved mono, since
//! erroring at the boundary is more idiomatic than the original C
//! reference's silent tolerance of `num_channels == 1` alone.

use crate::error::{OpenSnafu, ReadSamplesSnafu, WavError};
use hound::{SampleFormat, WavReader};
use snafu::ResultExt;
use std::path::Path;

/// Loads `path` as mono PCM, returning `(samples, sample_rate)` with
/// samples normalized to `[-1.0, 1.0]`.
pub fn load_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, u32), WavError> {
    let path_ref = path.as_ref();
    let path_str = path_ref.display().to_string();

    let mut reader = WavReader::open(path_ref).context(OpenSnafu { path: path_str.clone() })?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(WavError::NotMono {
            path: path_str,
            channels: spec.channels,
        });
    }

    let samples = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / 32768.0))
            .collect::<Result<Vec<f32>, hound::Error>>()
            .context(ReadSamplesSnafu { path: path_str.clone() })?,
        (SampleFormat::Int, 8) => reader
            .samples::<i8>()
            .map(|s| s.map(|v| v as f32 / 128.0))
            .collect::<Result<Vec<f32>, hound::Error>>()
            .context(ReadSamplesSnafu { path: path_str.clone() })?,
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .collect::<Result<Vec<f32>, hound::Error>>()
            .context(ReadSamplesSnafu { path: path_str.clone() })?,
        (_, bits) => {
            return Err(WavError::UnsupportedBitDepth {
                path: path_str,
                bits_per_sample: bits,
            });
        }
    };

    Ok((samples, spec.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use std::io::Cursor;

    fn write_mono_i16(samples: &[i16], sample_rate: u32) -> Vec<u8> {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut buffer = Vec::new();
        {
            let cursor = Cursor::new(&mut buffer);
            let mut writer = WavWriter::new(cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        buffer
    }

    fn write_stereo_i16(samples: &[i16], sample_rate: u32) -> Vec<u8> {
        let spec = WavSpec {
            channels: 2,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut buffer = Vec::new();
        {
            let cursor = Cursor::new(&mut buffer);
            let mut writer = WavWriter::new(cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        buffer
    }

    #[test]
    fn loads_mono_pcm16_normalized_to_unit_range() {
        let bytes = write_mono_i16(&[0, 16384, -32768, 32767], 12000);
        let dir = std::env::temp_dir().join(format!("rustyft8_test_{}.wav", std::process::id()));
        std::fs::write(&dir, &bytes).unwrap();

        let (samples, sample_rate) = load_wav(&dir).unwrap();
        std::fs::remove_file(&dir).ok();

        assert_eq!(sample_rate, 12000);
        assert_eq!(samples.len(), 4);
        assert!((samples[0] - 0.0).abs() < 1e-6);
        assert!((samples[1] - 0.5).abs() < 1e-3);
        assert!((samples[2] - (-1.0)).abs() < 1e-3);
    }

    #[test]
    fn rejects_stereo_files() {
        let bytes = write_stereo_i16(&[0, 0, 0, 0], 12000);
        let dir = std::env::temp_dir().join(format!("rustyft8_test_stereo_{}.wav", std::process::id()));
        std::fs::write(&dir, &bytes).unwrap();

        let err = load_wav(&dir).unwrap_err();
        std::fs::remove_file(&dir).ok();

        assert!(matches!(err, WavError::NotMono { channels: 2, .. }));
    }

    #[test]
    fn missing_file_reports_open_error() {
        let err = load_wav("/nonexistent/path/does-not-exist.wav").unwrap_err();
        assert!(matches!(err, WavError::Open { .. }));
    }
}
