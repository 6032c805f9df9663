// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Exit codes and output of the `scorec` binary.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn scorec<I: IntoIterator<Item = S>, S: AsRef<OsStr>>(args: I) -> Output {
    Command::new(env!("CARGO_BIN_EXE_scorec"))
        .args(args)
        .output()
        .expect("scorec failed to start")
}

fn write_score(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn compiles_score() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_score(dir.path(), "scale.txt", "120\n4\n0 C04 1\n1 D04 1\n2 E04 2\n");

    let out = scorec(&[&source]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Generated 3 notes"), "{}", stdout);
    assert!(stdout.contains("(176444 bytes)"), "{}", stdout);

    let wav = fs::metadata(dir.path().join("scale.wav")).unwrap();
    assert_eq!(wav.len(), 44 + 2 * 88200);
}

#[test]
fn missing_argument() {
    let out = scorec(Vec::<&str>::new());
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn wrong_extension() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_score(dir.path(), "scale.notes", "120\n4\n0 C04 1\n");
    let out = scorec(&[&source]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("scale.wav").exists());
}

#[test]
fn unreadable_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = scorec(&[dir.path().join("nothing.txt")]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Unable to open input file"));
}

#[test]
fn invalid_pitch() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_score(dir.path(), "bad.txt", "120\n4\n0 C04 1\n1 Q04 1\n");
    let out = scorec(&[&source]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid note: Q04"));
    assert!(!dir.path().join("bad.wav").exists());
}

#[test]
fn invalid_octave() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_score(dir.path(), "bad.txt", "120\n4\n0 C0four 1\n");
    let out = scorec(&[&source]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid octave"));
}

#[test]
fn invalid_amplitude() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_score(dir.path(), "song.txt", "120\n4\n0 C04 1\n");
    let out = scorec(&[
        source.as_os_str(),
        OsStr::new("--amplitude"),
        OsStr::new("0"),
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("song.wav").exists());
}

#[test]
fn song_too_long() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_score(dir.path(), "huge.txt", "60\n1e30\n0 C04 1\n");
    let out = scorec(&[&source]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("too long"), "{}", stderr);
    assert!(!dir.path().join("huge.wav").exists());
}
