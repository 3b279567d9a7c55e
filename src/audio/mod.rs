//! Audio I/O for the CLI frontend.
//!
//! Reads raw mono f32 little-endian PCM from stdin and writes the same
//! format to stdout. Scaling to a playback-safe range happens here, never in
//! the solver.

use std::io::{self, Read, Write};

use crate::error::{RlcError, Result};

/// Buffer size for audio I/O (in samples).
pub const BUFFER_SIZE: usize = 4096;

/// Peak level used by [`normalize_peak`], leaving a little headroom.
pub const PLAYBACK_PEAK: f64 = 0.9;

/// Decode raw f32le bytes. A trailing partial sample is dropped.
pub fn decode_f32le(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

/// Encode samples as raw f32le bytes.
pub fn encode_f32le(samples: &[f64]) -> Vec<u8> {
    samples
        .iter()
        .flat_map(|&s| (s as f32).to_le_bytes())
        .collect()
}

/// Read all of `reader` as mono f32le samples.
pub fn read_samples<R: Read>(reader: &mut R) -> Result<Vec<f32>> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| RlcError::AudioInputError {
            message: e.to_string(),
        })?;

    if bytes.len() % 4 != 0 {
        log::warn!("Dropping {} trailing byte(s) of partial sample", bytes.len() % 4);
    }
    Ok(decode_f32le(&bytes))
}

/// Write samples to `writer` as f32le, in blocks of [`BUFFER_SIZE`].
pub fn write_samples<W: Write>(writer: &mut W, samples: &[f64]) -> Result<()> {
    let to_err = |e: io::Error| RlcError::AudioOutputError {
        message: e.to_string(),
    };

    for block in samples.chunks(BUFFER_SIZE) {
        writer.write_all(&encode_f32le(block)).map_err(to_err)?;
    }
    writer.flush().map_err(to_err)
}

/// Read all of stdin.
pub fn read_stdin() -> Result<Vec<f32>> {
    read_samples(&mut io::stdin().lock())
}

/// Write to stdout.
pub fn write_stdout(samples: &[f64]) -> Result<()> {
    write_samples(&mut io::stdout().lock(), samples)
}

/// Scale so the largest magnitude equals [`PLAYBACK_PEAK`].
///
/// Silent (all-zero) or non-finite sequences are returned unchanged.
pub fn normalize_peak(samples: &[f64]) -> Vec<f64> {
    let peak = samples.iter().fold(0.0_f64, |m, s| m.max(s.abs()));
    if peak == 0.0 || !peak.is_finite() {
        return samples.to_vec();
    }
    let gain = PLAYBACK_PEAK / peak;
    samples.iter().map(|s| s * gain).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pcm_round_trip_through_io() {
        let samples = vec![0.5, -0.25, 1.0];
        let mut buffer = Vec::new();
        write_samples(&mut buffer, &samples).unwrap();
        assert_eq!(buffer.len(), 12);

        let decoded = read_samples(&mut buffer.as_slice()).unwrap();
        assert_eq!(decoded, vec![0.5_f32, -0.25, 1.0]);
    }

    #[test]
    fn test_partial_sample_dropped() {
        let mut bytes = 1.0_f32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0, 1]);
        assert_eq!(decode_f32le(&bytes), vec![1.0]);
    }

    #[test]
    fn test_normalize_peak() {
        let out = normalize_peak(&[0.0, 4.0, -8.0]);
        assert_relative_eq!(out[1], 0.45);
        assert_relative_eq!(out[2], -0.9);

        assert_eq!(normalize_peak(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert!(normalize_peak(&[]).is_empty());
    }
}
