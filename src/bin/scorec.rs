// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `scorec` - the score compiler, rendering note scores to wav files.

use std::path::PathBuf;
use std::process;

use structopt::clap::ErrorKind;
use structopt::StructOpt;

use syn_score::compile::{self, Error};
use syn_score::synth::{SynthConfig, NOTE_AMPLITUDE};

#[derive(Debug, StructOpt)]
#[structopt(name = "scorec", about = "Compiling note scores into wave files")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// The score to compile, a `.txt` file.
    #[structopt(parse(from_os_str))]
    source: PathBuf,

    /// Output file. Defaults to the source file with a `.wav` extension.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Dump the description of the parsed score.
    #[structopt(long)]
    #[allow(clippy::option_option)]
    dump_score: Option<Option<PathBuf>>,

    /// Amplitude of a single note before mixing.
    #[structopt(long, default_value = "0.1")]
    amplitude: f64,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("scorec: {}", err);
        process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let opt = match Opt::from_iter_safe(std::env::args_os()) {
        Ok(opt) => opt,
        Err(err) => match err.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => {
                println!("{}", err.message);
                return Ok(());
            }
            _ => {
                return Err(Error::InvalidArguments {
                    message: err.message,
                })
            }
        },
    };

    if !opt.amplitude.is_finite() || opt.amplitude <= 0.0 {
        return Err(Error::InvalidArguments {
            message: format!(
                "amplitude must be a positive number (default {}), got {}",
                NOTE_AMPLITUDE, opt.amplitude
            ),
        });
    }

    let level = match opt.verbose {
        0 => log::Level::Warn,
        1 => log::Level::Info,
        2 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    if let Err(err) = simple_logger::init_with_level(level) {
        eprintln!("scorec: unable to set up logging: {}", err);
    }

    let options = compile::Options {
        output: opt.output,
        dump_score: opt
            .dump_score
            .map(|path| path.unwrap_or_else(|| "/dev/stdout".into())),
        synth: SynthConfig {
            note_amplitude: opt.amplitude,
            ..SynthConfig::default()
        },
    };
    let summary = compile::compile_file(&opt.source, &options)?;
    println!("Generated {} notes", summary.notes);
    println!(
        "Wrote {} ({} bytes)",
        summary.output.display(),
        summary.bytes_written
    );
    Ok(())
}
