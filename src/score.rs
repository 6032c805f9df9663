// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Description of a song as a list of notes, and the text format it is written in.
//!
//! ```text
//! 120          tempo in beats per minute
//! 8            length of the song in beats
//! 0 C04 1      <start beat> <pitch> <duration in beats>
//! 1 E04 1
//! 2 G04 2
//! ```
//!
//! Anything after the third field of a note is ignored.

use std::str::FromStr;

use snafu::{ResultExt, Snafu};

use crate::pitch::{Pitch, PitchError};

/// A note placed on the timeline of a score.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Time when the note starts, in beats since the start of the song.
    pub start_beat: f64,
    pub pitch: Pitch,
    /// How long the note lasts, in beats.
    pub duration_beats: f64,
}

/// A complete song.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    /// The speed of the song measured in beats per minute.
    pub tempo_bpm: f64,
    /// Length of the song in beats. Notes extending past it are cut off.
    pub total_beats: f64,
    /// The notes in the order they were written.
    pub notes: Vec<Note>,
}

/// Possible errors when parsing a score. Line numbers start at 1.
#[derive(Debug, Clone, PartialEq, Snafu)]
pub enum ScoreError {
    #[snafu(display("line {}: missing {}", line, what))]
    MissingHeader { line: usize, what: &'static str },
    #[snafu(display("line {}: {} is not a number: {:?}", line, what, text))]
    InvalidNumber {
        line: usize,
        what: &'static str,
        text: String,
    },
    #[snafu(display("line {}: {} must be {}, got {}", line, what, expected, value))]
    OutOfRange {
        line: usize,
        what: &'static str,
        expected: &'static str,
        value: f64,
    },
    #[snafu(display(
        "line {}: expected `<start beat> <pitch> <duration>`, got {:?}",
        line,
        text
    ))]
    MalformedNote { line: usize, text: String },
    #[snafu(display("line {}: {}", line, source))]
    InvalidPitch { line: usize, source: PitchError },
}

impl Score {
    /// Parse a score from its text format.
    ///
    /// # Examples
    ///
    /// ```
    /// use syn_score::score::Score;
    ///
    /// let score = Score::parse("120\n4\n0 C04 1\n2 G04 2 fermata\n").unwrap();
    /// assert_eq!(score.tempo_bpm, 120.0);
    /// assert_eq!(score.total_beats, 4.0);
    /// assert_eq!(score.notes.len(), 2);
    /// assert_eq!(score.notes[1].pitch.to_string(), "G04");
    /// ```
    pub fn parse(input: &str) -> Result<Score, ScoreError> {
        let mut lines = input.lines().enumerate().map(|(index, text)| (index + 1, text));

        let tempo_bpm = parse_header(lines.next(), 1, "tempo")?;
        let total_beats = parse_header(lines.next(), 2, "song length")?;

        let mut notes = Vec::new();
        for (line, text) in lines {
            if text.trim().is_empty() {
                continue;
            }
            notes.push(parse_note(line, text)?);
        }

        Ok(Score {
            tempo_bpm,
            total_beats,
            notes,
        })
    }

    /// Convert a time in beats to seconds at the tempo of this score.
    pub fn beats_to_seconds(&self, beats: f64) -> f64 {
        beats * 60.0 / self.tempo_bpm
    }

    /// Length of the song in seconds.
    pub fn duration(&self) -> f64 {
        self.beats_to_seconds(self.total_beats)
    }
}

impl FromStr for Score {
    type Err = ScoreError;

    fn from_str(input: &str) -> Result<Score, ScoreError> {
        Score::parse(input)
    }
}

fn parse_header(
    line: Option<(usize, &str)>,
    expected_line: usize,
    what: &'static str,
) -> Result<f64, ScoreError> {
    let missing = ScoreError::MissingHeader {
        line: expected_line,
        what,
    };
    let (line, text) = line.ok_or_else(|| missing.clone())?;
    let token = text.split_whitespace().next().ok_or(missing)?;
    let value = parse_number(line, what, token)?;
    if value <= 0.0 {
        return Err(ScoreError::OutOfRange {
            line,
            what,
            expected: "positive",
            value,
        });
    }
    Ok(value)
}

fn parse_note(line: usize, text: &str) -> Result<Note, ScoreError> {
    let mut fields = text.split_whitespace();
    let (start, pitch, duration) = match (fields.next(), fields.next(), fields.next()) {
        (Some(start), Some(pitch), Some(duration)) => (start, pitch, duration),
        _ => {
            return Err(ScoreError::MalformedNote {
                line,
                text: text.to_string(),
            })
        }
    };

    let start_beat = parse_number(line, "start beat", start)?;
    if start_beat < 0.0 {
        return Err(ScoreError::OutOfRange {
            line,
            what: "start beat",
            expected: "non-negative",
            value: start_beat,
        });
    }
    let pitch = pitch.parse::<Pitch>().context(InvalidPitch { line })?;
    let duration_beats = parse_number(line, "duration", duration)?;
    if duration_beats <= 0.0 {
        return Err(ScoreError::OutOfRange {
            line,
            what: "duration",
            expected: "positive",
            value: duration_beats,
        });
    }

    Ok(Note {
        start_beat,
        pitch,
        duration_beats,
    })
}

fn parse_number(line: usize, what: &'static str, text: &str) -> Result<f64, ScoreError> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ScoreError::InvalidNumber {
            line,
            what,
            text: text.to_string(),
        }),
    }
}
