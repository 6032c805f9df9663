// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Implementation of the score compiler, turning score files into wave files.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::info;
use snafu::{ResultExt, Snafu};

use crate::output::wav::{self, WavError};
use crate::pitch::{FrequencyTable, PitchError};
use crate::score::{Score, ScoreError};
use crate::synth::{SynthConfig, TimelineSynthesizer};

/// Extension a score file must have.
pub const SOURCE_EXTENSION: &str = "txt";
/// Extension of the generated audio files.
pub const OUTPUT_EXTENSION: &str = "wav";

/// Everything that can make a compilation fail. None of these are recoverable.
#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("{}", message))]
    InvalidArguments { message: String },
    #[snafu(display(
        "Input file {} does not have the .{} extension",
        path.display(),
        SOURCE_EXTENSION
    ))]
    InvalidFileExtension { path: PathBuf },
    #[snafu(display("Unable to open input file {}: {}", path.display(), source))]
    ReadScore { path: PathBuf, source: io::Error },
    #[snafu(display("{}: {}", path.display(), source))]
    MalformedScore { path: PathBuf, source: ScoreError },
    #[snafu(display("{}", source))]
    Synthesis { source: PitchError },
    #[snafu(display("{}", source))]
    Output { source: WavError },
    #[snafu(display("Unable to dump score to {}: {}", path.display(), source))]
    DumpScore { path: PathBuf, source: io::Error },
}

/// Settings of a single compilation.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Where to write the audio. Derived from the source path if not given.
    pub output: Option<PathBuf>,
    /// Where to write a description of the parsed score, if anywhere.
    pub dump_score: Option<PathBuf>,
    pub synth: SynthConfig,
}

/// What a successful compilation produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub output: PathBuf,
    /// Number of notes in the score.
    pub notes: usize,
    pub samples: usize,
    /// Size of the written wave file.
    pub bytes_written: u64,
}

/// The path of the wave file generated for a score file.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use syn_score::compile::output_path;
///
/// assert_eq!(output_path(Path::new("songs/intro.txt")).unwrap(), Path::new("songs/intro.wav"));
/// assert!(output_path(Path::new("songs/intro.wav")).is_err());
/// ```
pub fn output_path(source: &Path) -> Result<PathBuf, Error> {
    match source.extension() {
        Some(ext) if ext == SOURCE_EXTENSION => Ok(source.with_extension(OUTPUT_EXTENSION)),
        _ => InvalidFileExtension { path: source }.fail(),
    }
}

/// Compile the score at `source` into a wave file.
pub fn compile_file(source: &Path, options: &Options) -> Result<Summary, Error> {
    let derived_output = output_path(source)?;
    let output = options.output.clone().unwrap_or(derived_output);

    let input = fs::read_to_string(source).context(ReadScore { path: source })?;
    info!("compiling {}", source.display());
    let score = Score::parse(&input).context(MalformedScore { path: source })?;

    if let Some(dump_path) = &options.dump_score {
        dump_score(&score, dump_path).context(DumpScore { path: dump_path })?;
    }

    let frequencies = FrequencyTable::standard();
    let synth = TimelineSynthesizer::new(options.synth, &frequencies);
    let samples = synth.buffer_len(&score);
    wav::check_len(samples).context(Output)?;
    let buffer = synth.synthesize(&score).context(Synthesis)?;
    let bytes_written = wav::write_wav_file(&output, &buffer, samples).context(Output)?;

    Ok(Summary {
        output,
        notes: score.notes.len(),
        samples,
        bytes_written,
    })
}

fn dump_score(score: &Score, path: &Path) -> io::Result<()> {
    let mut f = fs::File::create(path)?;
    writeln!(f, "{:#?}", score)
}
