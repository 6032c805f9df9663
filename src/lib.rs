// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

// Making sounds
pub mod harmonics;
pub mod pitch;
pub mod render;
pub mod synth;
pub mod wave;

// Reading and writing files
pub mod compile;
pub mod output;
pub mod score;
