// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! This is the namespace for all parts dealing with data in sampled waves.

/// Number of samples per second of the generated audio.
pub const SAMPLE_RATE: u32 = 44100;

/// Number of whole samples covered by a span of time, dropping any partial sample.
///
/// # Examples
///
/// ```
/// use syn_score::wave::*;
///
/// assert_eq!(seconds_to_samples(1.0, SAMPLE_RATE), 44100);
/// assert_eq!(seconds_to_samples(0.5 / 44100.0, SAMPLE_RATE), 0);
/// assert_eq!(seconds_to_samples(-1.0, SAMPLE_RATE), 0);
/// ```
pub fn seconds_to_samples(seconds: f64, sample_rate: u32) -> usize {
    (seconds * sample_rate as f64) as usize
}

/// A buffer holding mono floating point audio data.
///
/// The length is fixed on construction. Samples are meant to be accumulated,
/// and may leave the [-1, 1] range until they are quantized for output.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f64>,
    sample_rate: u32,
}

#[allow(clippy::len_without_is_empty)]
impl SampleBuffer {
    /// A silent buffer of `sample_count` samples.
    pub fn new(sample_count: usize, sample_rate: u32) -> Self {
        Self {
            samples: vec![0.0; sample_count],
            sample_rate,
        }
    }

    pub fn from_samples(samples: Vec<f64>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Size of the buffer in samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [f64] {
        &mut self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_silent() {
        let buffer = SampleBuffer::new(1000, SAMPLE_RATE);
        assert_eq!(buffer.len(), 1000);
        assert!(buffer.samples().iter().all(|&s| s == 0.0));
    }
}
