// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Pitches as written in scores, and the frequencies they sound at.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use snafu::Snafu;

/// The name of a note in standard notation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NoteName {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

/// Any offset applied to a note in standard notation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Accidental {
    /// The note is a half-tone lower then indicated by its name.
    Flat,
    /// The note is left unchanged.
    Natural,
    /// The note is a half-tone higher then indicated by its name.
    Sharp,
}

impl NoteName {
    fn from_char(ch: char) -> Option<NoteName> {
        Some(match ch {
            'A' => NoteName::A,
            'B' => NoteName::B,
            'C' => NoteName::C,
            'D' => NoteName::D,
            'E' => NoteName::E,
            'F' => NoteName::F,
            'G' => NoteName::G,
            _ => return None,
        })
    }

    fn to_char(self) -> char {
        match self {
            NoteName::A => 'A',
            NoteName::B => 'B',
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
        }
    }
}

impl Accidental {
    fn from_char(ch: char) -> Option<Accidental> {
        match ch {
            '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            '0' => Some(Accidental::Natural),
            _ => None,
        }
    }

    fn to_char(self) -> char {
        match self {
            Accidental::Sharp => '#',
            Accidental::Flat => 'b',
            Accidental::Natural => '0',
        }
    }
}

/// The octave in which a pitch sounds at exactly its base frequency.
pub const REFERENCE_OCTAVE: i32 = 5;

/// A pitch in score notation: a two character note code followed by an octave,
/// e.g. `C04` (C in octave 4), `F#3` or `Bb-1`.
///
/// # Examples
///
/// ```
/// use syn_score::pitch::*;
///
/// let pitch: Pitch = "C#4".parse().unwrap();
/// assert_eq!(pitch, Pitch::new(NoteName::C, Accidental::Sharp, 4));
/// assert_eq!(pitch.to_string(), "C#4");
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Pitch {
    pub name: NoteName,
    pub accidental: Accidental,
    pub octave: i32,
}

impl Pitch {
    pub fn new(name: NoteName, accidental: Accidental, octave: i32) -> Self {
        Pitch {
            name,
            accidental,
            octave,
        }
    }
}

/// Possible errors when turning a pitch label into a frequency.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum PitchError {
    #[snafu(display("Invalid note: {}", label))]
    InvalidPitch { label: String },
    #[snafu(display("Invalid octave: {:?} in {}", octave, label))]
    InvalidOctave { label: String, octave: String },
}

impl FromStr for Pitch {
    type Err = PitchError;

    /// Split the label into the note code (always the first two bytes) and the octave.
    fn from_str(label: &str) -> Result<Pitch, PitchError> {
        let invalid_pitch = || PitchError::InvalidPitch {
            label: label.to_string(),
        };
        let code = label.get(..2).ok_or_else(invalid_pitch)?;
        let mut code_chars = code.chars();
        let name = code_chars
            .next()
            .and_then(NoteName::from_char)
            .ok_or_else(invalid_pitch)?;
        let accidental = code_chars
            .next()
            .and_then(Accidental::from_char)
            .ok_or_else(invalid_pitch)?;

        let octave_str = &label[code.len()..];
        let octave = octave_str
            .parse::<i32>()
            .map_err(|_| PitchError::InvalidOctave {
                label: label.to_string(),
                octave: octave_str.to_string(),
            })?;
        Ok(Pitch::new(name, accidental, octave))
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.name.to_char(),
            self.accidental.to_char(),
            self.octave
        )
    }
}

/// Frequencies of every spelling of a note in the reference octave.
/// Enharmonic spellings are listed separately even where they coincide.
const BASE_FREQUENCIES: [(NoteName, Accidental, f64); 21] = [
    (NoteName::C, Accidental::Flat, 493.88),
    (NoteName::C, Accidental::Natural, 523.25),
    (NoteName::C, Accidental::Sharp, 554.37),
    (NoteName::D, Accidental::Flat, 554.37),
    (NoteName::D, Accidental::Natural, 587.33),
    (NoteName::D, Accidental::Sharp, 622.25),
    (NoteName::E, Accidental::Flat, 622.25),
    (NoteName::E, Accidental::Natural, 659.25),
    (NoteName::E, Accidental::Sharp, 698.46),
    (NoteName::F, Accidental::Flat, 659.25),
    (NoteName::F, Accidental::Natural, 698.46),
    (NoteName::F, Accidental::Sharp, 739.99),
    (NoteName::G, Accidental::Flat, 739.99),
    (NoteName::G, Accidental::Natural, 783.99),
    (NoteName::G, Accidental::Sharp, 830.61),
    (NoteName::A, Accidental::Flat, 830.61),
    (NoteName::A, Accidental::Natural, 880.00),
    (NoteName::A, Accidental::Sharp, 932.33),
    (NoteName::B, Accidental::Flat, 932.33),
    (NoteName::B, Accidental::Natural, 987.77),
    (NoteName::B, Accidental::Sharp, 1046.50),
];

/// Compute a factor measured in octaves (one octave corresponds to a factor of two).
fn from_octaves(octaves: i32) -> f64 {
    2.0f64.powi(octaves)
}

/// Assigns a frequency to every note code in the reference octave,
/// which defines the frequencies of the same code in all other octaves.
///
/// # Examples
///
/// ```
/// use syn_score::pitch::*;
///
/// let table = FrequencyTable::standard();
/// assert_eq!(table.resolve("A05"), Ok(880.0));
/// assert_eq!(table.resolve("A04"), Ok(440.0));
/// assert_eq!(table.resolve("Db5"), table.resolve("C#5"));
/// ```
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    base: HashMap<(NoteName, Accidental), f64>,
}

impl FrequencyTable {
    /// The standard table covering all natural, sharp and flat spellings.
    pub fn standard() -> Self {
        Self::from_entries(BASE_FREQUENCIES.iter().copied())
    }

    pub fn from_entries<I: IntoIterator<Item = (NoteName, Accidental, f64)>>(entries: I) -> Self {
        FrequencyTable {
            base: entries
                .into_iter()
                .map(|(name, accidental, frequency)| ((name, accidental), frequency))
                .collect(),
        }
    }

    /// The frequency of a note code in the reference octave, if the table knows it.
    pub fn base_frequency(&self, name: NoteName, accidental: Accidental) -> Option<f64> {
        self.base.get(&(name, accidental)).copied()
    }

    /// Return the frequency of a pitch relative to this table.
    pub fn frequency(&self, pitch: &Pitch) -> Result<f64, PitchError> {
        let base = self
            .base_frequency(pitch.name, pitch.accidental)
            .ok_or_else(|| PitchError::InvalidPitch {
                label: pitch.to_string(),
            })?;
        Ok(base * from_octaves(pitch.octave.saturating_sub(REFERENCE_OCTAVE)))
    }

    /// Parse a pitch label and return its frequency.
    pub fn resolve(&self, label: &str) -> Result<f64, PitchError> {
        let pitch: Pitch = label.parse()?;
        self.frequency(&pitch)
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::standard()
    }
}
