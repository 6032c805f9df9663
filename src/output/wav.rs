// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Writing sample buffers as mono 16 bit PCM wave files with the canonical 44 byte header.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use log::{info, warn};
use snafu::{ensure, ResultExt, Snafu};

use crate::wave::SampleBuffer;

/// Size of the RIFF, fmt and data chunk headers preceding the samples.
pub const HEADER_LEN: u64 = 44;

/// Most samples a wave file can hold, the RIFF chunk size being a `u32`.
pub const MAX_SAMPLES: usize = ((u32::MAX - 36) / 2) as usize;

/// Possible errors when encoding a wave file.
#[derive(Debug, Snafu)]
pub enum WavError {
    #[snafu(display(
        "Buffer size is smaller than expected: {} samples instead of {}",
        actual,
        expected
    ))]
    BufferUnderrun { expected: usize, actual: usize },
    #[snafu(display(
        "Song is too long for a wave file: {} samples, at most {} are possible",
        num_samples,
        MAX_SAMPLES
    ))]
    TooLong { num_samples: usize },
    #[snafu(display("Unable to open output file {}: {}", path.display(), source))]
    CreateOutput { path: PathBuf, source: io::Error },
    #[snafu(display("Unable to write wave data: {}", source))]
    Encode { source: hound::Error },
}

/// Format of the generated files: one channel of 16 bit integer samples.
pub fn spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Convert a floating point sample to 16 bit, clipping it to [-1, 1] first.
/// Fractions are truncated towards zero.
///
/// # Examples
///
/// ```
/// use syn_score::output::wav::quantize;
///
/// assert_eq!(quantize(0.0), 0);
/// assert_eq!(quantize(0.5), 16383);
/// assert_eq!(quantize(1.5), 32767);
/// assert_eq!(quantize(-2.0), -32767);
/// ```
pub fn quantize(sample: f64) -> i16 {
    (sample.max(-1.0).min(1.0) * i16::MAX as f64) as i16
}

/// Fail if `num_samples` samples do not fit into a single wave file.
///
/// # Examples
///
/// ```
/// use syn_score::output::wav::{check_len, MAX_SAMPLES};
///
/// assert!(check_len(44100).is_ok());
/// assert!(check_len(MAX_SAMPLES + 1).is_err());
/// ```
pub fn check_len(num_samples: usize) -> Result<(), WavError> {
    ensure!(num_samples <= MAX_SAMPLES, TooLong { num_samples });
    Ok(())
}

/// Size of a file holding `num_samples` samples, in bytes.
pub fn encoded_len(num_samples: usize) -> u64 {
    HEADER_LEN + 2 * num_samples as u64
}

/// Encode the first `num_samples` samples of the buffer.
///
/// Fails with [`WavError::BufferUnderrun`] before writing anything if the buffer is shorter,
/// and with [`WavError::TooLong`] if the samples do not fit into a wave file.
pub fn write_wav<W: io::Write + io::Seek>(
    writer: W,
    buffer: &SampleBuffer,
    num_samples: usize,
) -> Result<(), WavError> {
    check_len(num_samples)?;
    let samples = buffer
        .samples()
        .get(..num_samples)
        .ok_or(WavError::BufferUnderrun {
            expected: num_samples,
            actual: buffer.len(),
        })?;

    let mut wav = hound::WavWriter::new(writer, spec(buffer.sample_rate())).context(Encode)?;
    for &sample in samples {
        wav.write_sample(quantize(sample)).context(Encode)?;
    }
    // write errors of buffered writers only surface here
    wav.flush().context(Encode)?;
    wav.finalize().context(Encode)
}

/// Encode the first `num_samples` samples of the buffer into a file.
///
/// A file that could not be written completely is removed again.
/// Returns the size of the written file in bytes.
pub fn write_wav_file(
    path: &Path,
    buffer: &SampleBuffer,
    num_samples: usize,
) -> Result<u64, WavError> {
    write_wav_file_with(path, buffer, num_samples, BufWriter::new)
}

fn write_wav_file_with<W, F>(
    path: &Path,
    buffer: &SampleBuffer,
    num_samples: usize,
    sink: F,
) -> Result<u64, WavError>
where
    W: io::Write + io::Seek,
    F: FnOnce(File) -> W,
{
    check_len(num_samples)?;
    ensure!(
        buffer.len() >= num_samples,
        BufferUnderrun {
            expected: num_samples,
            actual: buffer.len(),
        }
    );

    let file = File::create(path).context(CreateOutput { path })?;
    if let Err(err) = write_wav(sink(file), buffer, num_samples) {
        if let Err(remove_err) = fs::remove_file(path) {
            warn!(
                "unable to remove incomplete file {}: {}",
                path.display(),
                remove_err
            );
        }
        return Err(err);
    }

    let bytes = encoded_len(num_samples);
    info!("wrote {} samples ({} bytes) to {}", num_samples, bytes, path.display());
    Ok(bytes)
}
