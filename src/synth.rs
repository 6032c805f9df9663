// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! This namespace contains all the parts converting from a score to wave data.

use log::{debug, info, trace};

use crate::harmonics::HarmonicProfile;
use crate::pitch::{FrequencyTable, PitchError};
use crate::render::NoteRenderer;
use crate::score::{Note, Score};
use crate::wave::{self, SampleBuffer};

/// Amplitude every note is rendered with, before its harmonics are applied.
pub const NOTE_AMPLITUDE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    /// Samples per second rate of the generated audio signal.
    pub sample_rate: u32,
    /// Amplitude of every note. There are no per-note dynamics.
    pub note_amplitude: f64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        SynthConfig {
            sample_rate: wave::SAMPLE_RATE,
            note_amplitude: NOTE_AMPLITUDE,
        }
    }
}

/// Number of samples needed for a song of the given length.
///
/// # Examples
///
/// ```
/// use syn_score::synth::timeline_len;
///
/// assert_eq!(timeline_len(120.0, 4.0, 44100), 88200);
/// assert_eq!(timeline_len(60.0, 1.0, 44100), 44100);
/// ```
pub fn timeline_len(tempo_bpm: f64, total_beats: f64, sample_rate: u32) -> usize {
    wave::seconds_to_samples(total_beats * 60.0 / tempo_bpm, sample_rate)
}

/// Renders all notes of a score into a single buffer spanning the whole song.
///
/// Notes are rendered one after another in score order. Since rendering only ever
/// adds to the buffer, the order of the notes does not matter beyond the rounding
/// of the floating point sums.
pub struct TimelineSynthesizer<'t> {
    config: SynthConfig,
    /// Determines the pitch of all notes.
    frequencies: &'t FrequencyTable,
    renderer: NoteRenderer,
}

impl<'t> TimelineSynthesizer<'t> {
    pub fn new(config: SynthConfig, frequencies: &'t FrequencyTable) -> Self {
        Self {
            config,
            frequencies,
            renderer: NoteRenderer::new(HarmonicProfile::PIANO),
        }
    }

    /// Number of samples of the buffer synthesized for `score`.
    pub fn buffer_len(&self, score: &Score) -> usize {
        timeline_len(score.tempo_bpm, score.total_beats, self.config.sample_rate)
    }

    /// Render the whole score.
    ///
    /// Fails on the first note whose pitch is not in the frequency table.
    pub fn synthesize(&self, score: &Score) -> Result<SampleBuffer, PitchError> {
        let len = self.buffer_len(score);
        info!(
            "rendering {} notes at {} bpm at {} Hz",
            score.notes.len(),
            score.tempo_bpm,
            self.config.sample_rate
        );
        info!(
            "total length {} samples ({:.2} seconds)",
            len,
            score.duration()
        );

        let mut buffer = SampleBuffer::new(len, self.config.sample_rate);
        for note in score.notes.iter() {
            self.render_note(&mut buffer, score, note)?;
        }
        Ok(buffer)
    }

    /// Add a single note of `score` to the buffer.
    pub fn render_note(
        &self,
        buffer: &mut SampleBuffer,
        score: &Score,
        note: &Note,
    ) -> Result<(), PitchError> {
        let frequency = self.frequencies.frequency(&note.pitch)?;
        let start = score.beats_to_seconds(note.start_beat);
        let duration = score.beats_to_seconds(note.duration_beats);

        trace!(
            "{:7.3}: play {} ({:.2} Hz) for {:.3} s",
            start,
            note.pitch,
            frequency,
            duration
        );
        let written = self.renderer.render(
            buffer,
            frequency,
            duration,
            start,
            self.config.note_amplitude,
        );
        if written < wave::seconds_to_samples(duration, buffer.sample_rate()) {
            debug!(
                "note {} at beat {} cut off at the end of the song",
                note.pitch, note.start_beat
            );
        }
        Ok(())
    }
}
