// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Static timbres made of harmonically related sine waves.

/// A single sine partial of a timbre, relative to the fundamental of a note.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HarmonicComponent {
    /// Amplitude relative to the note amplitude, in (0, 1].
    pub relative_amplitude: f64,
    /// Integer multiple of the fundamental frequency.
    pub frequency_multiplier: u32,
}

const PIANO_COMPONENTS: [HarmonicComponent; 5] = [
    HarmonicComponent {
        relative_amplitude: 1.00,
        frequency_multiplier: 1,
    },
    HarmonicComponent {
        relative_amplitude: 0.75,
        frequency_multiplier: 2,
    },
    HarmonicComponent {
        relative_amplitude: 0.50,
        frequency_multiplier: 4,
    },
    HarmonicComponent {
        relative_amplitude: 0.14,
        frequency_multiplier: 8,
    },
    HarmonicComponent {
        relative_amplitude: 0.05,
        frequency_multiplier: 16,
    },
];

/// A fixed additive spectrum.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HarmonicProfile {
    components: &'static [HarmonicComponent],
}

impl HarmonicProfile {
    /// Piano-like spectrum, dominated by the fundamental and its octaves.
    pub const PIANO: HarmonicProfile = HarmonicProfile::new(&PIANO_COMPONENTS);

    pub const fn new(components: &'static [HarmonicComponent]) -> Self {
        HarmonicProfile { components }
    }

    pub fn components(&self) -> &'static [HarmonicComponent] {
        self.components
    }
}

impl Default for HarmonicProfile {
    fn default() -> Self {
        HarmonicProfile::PIANO
    }
}
