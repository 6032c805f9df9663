// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The glue responsible for turning single notes into actual waveforms.

use std::f64::consts::PI;

use crate::harmonics::HarmonicProfile;
use crate::wave::{self, SampleBuffer};

/// Mixes notes into a buffer as the sum of the partials of a harmonic profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoteRenderer {
    profile: HarmonicProfile,
}

impl NoteRenderer {
    pub fn new(profile: HarmonicProfile) -> Self {
        Self { profile }
    }

    /// Add a note to the buffer, on top of whatever is already there.
    ///
    /// The waveform is evaluated with its phase starting at zero at `start_seconds`.
    /// Samples that would land past the end of the buffer are dropped.
    /// Nothing is clipped or normalized, sums may exceed the [-1, 1] range.
    ///
    /// Returns the number of samples of the note that fit into the buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use syn_score::render::NoteRenderer;
    /// use syn_score::wave::{SampleBuffer, SAMPLE_RATE};
    ///
    /// let mut buffer = SampleBuffer::new(SAMPLE_RATE as usize, SAMPLE_RATE);
    /// let renderer = NoteRenderer::default();
    /// // half a second starting at 0.75 s only has room for a quarter second
    /// assert_eq!(renderer.render(&mut buffer, 440.0, 0.5, 0.75, 0.1), 11025);
    /// assert_eq!(buffer.len(), 44100);
    /// ```
    pub fn render(
        &self,
        buffer: &mut SampleBuffer,
        frequency: f64,
        duration_seconds: f64,
        start_seconds: f64,
        amplitude: f64,
    ) -> usize {
        let sample_rate = buffer.sample_rate();
        let num_samples = wave::seconds_to_samples(duration_seconds, sample_rate);
        let start_sample = wave::seconds_to_samples(start_seconds, sample_rate);
        let sample_duration = 1.0 / sample_rate as f64;

        let samples = buffer.samples_mut();
        let begin = start_sample.min(samples.len());
        let end = start_sample.saturating_add(num_samples).min(samples.len());
        let span = &mut samples[begin..end];

        for harmonic in self.profile.components() {
            let gain = amplitude * harmonic.relative_amplitude;
            let harmonic_frequency = frequency * harmonic.frequency_multiplier as f64;
            for (i, sample) in span.iter_mut().enumerate() {
                let time = i as f64 * sample_duration;
                *sample += gain * (2.0 * PI * harmonic_frequency * time).sin();
            }
        }
        span.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmonics::HarmonicComponent;
    use crate::wave::SAMPLE_RATE;

    const FUNDAMENTAL_ONLY: [HarmonicComponent; 1] = [HarmonicComponent {
        relative_amplitude: 1.0,
        frequency_multiplier: 1,
    }];
    const PURE: HarmonicProfile = HarmonicProfile::new(&FUNDAMENTAL_ONLY);

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn pure_sine() {
        let mut buffer = SampleBuffer::new(200, SAMPLE_RATE);
        // 441 Hz has a period of exactly 100 samples
        let written = NoteRenderer::new(PURE).render(&mut buffer, 441.0, 1.0, 0.0, 0.5);
        assert_eq!(written, 200);
        assert_close(buffer.samples()[0], 0.0);
        assert_close(buffer.samples()[25], 0.5);
        assert_close(buffer.samples()[75], -0.5);
        assert_close(buffer.samples()[125], 0.5);
    }

    #[test]
    fn silent_outside_of_note() {
        let mut buffer = SampleBuffer::new(SAMPLE_RATE as usize, SAMPLE_RATE);
        let renderer = NoteRenderer::default();
        let written = renderer.render(&mut buffer, 523.25, 0.25, 0.5, 0.1);
        assert_eq!(written, 11025);

        let samples = buffer.samples();
        assert!(samples[..22050].iter().all(|&s| s == 0.0));
        assert!(samples[22050 + 11025..].iter().all(|&s| s == 0.0));
        assert!(samples[22050..22050 + 11025].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn phase_starts_at_note_start() {
        let mut buffer = SampleBuffer::new(22200, SAMPLE_RATE);
        NoteRenderer::new(PURE).render(&mut buffer, 441.0, 1.0, 0.5, 1.0);
        assert_close(buffer.samples()[22050], 0.0);
        assert_close(buffer.samples()[22075], 1.0);
    }

    #[test]
    fn accumulates() {
        let renderer = NoteRenderer::default();
        let mut once = SampleBuffer::new(1000, SAMPLE_RATE);
        renderer.render(&mut once, 440.0, 1.0, 0.0, 0.1);
        let mut twice = once.clone();
        renderer.render(&mut twice, 440.0, 1.0, 0.0, 0.1);
        for (a, b) in once.samples().iter().zip(twice.samples()) {
            assert_close(*b, 2.0 * a);
        }
    }

    #[test]
    fn all_harmonics_contribute() {
        let mut buffer = SampleBuffer::new(2, SAMPLE_RATE);
        NoteRenderer::default().render(&mut buffer, 1000.0, 1.0, 0.0, 1.0);
        assert_eq!(buffer.samples()[0], 0.0);

        let t = 1.0 / 44100.0;
        let expected: f64 = [(1.0, 1.0), (0.75, 2.0), (0.5, 4.0), (0.14, 8.0), (0.05, 16.0)]
            .iter()
            .map(|(a, m)| a * (2.0 * PI * 1000.0 * m * t).sin())
            .sum();
        assert_close(buffer.samples()[1], expected);
    }

    #[test]
    fn truncates_at_buffer_end() {
        let mut buffer = SampleBuffer::new(100, SAMPLE_RATE);
        let written = NoteRenderer::default().render(&mut buffer, 440.0, 10.0, 0.0, 0.1);
        assert_eq!(written, 100);
        assert_eq!(buffer.len(), 100);
    }

    #[test]
    fn starting_past_the_end_writes_nothing() {
        let mut buffer = SampleBuffer::new(100, SAMPLE_RATE);
        let written = NoteRenderer::default().render(&mut buffer, 440.0, 1.0, 5.0, 0.1);
        assert_eq!(written, 0);
        assert!(buffer.samples().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn zero_duration_writes_nothing() {
        let mut buffer = SampleBuffer::new(100, SAMPLE_RATE);
        let written = NoteRenderer::default().render(&mut buffer, 440.0, 0.0, 0.0, 0.1);
        assert_eq!(written, 0);
        assert!(buffer.samples().iter().all(|&s| s == 0.0));
    }
}
