use std::fs::File;
use std::io::Write;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

/// Write a silent 16-bit mono PCM WAV with the given number of frames.
fn write_test_wav(path: &Path, frames: u32) {
    const SAMPLE_RATE: u32 = 8_000;
    let data_len = frames * 2;

    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    bytes.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes()); // block align
    bytes.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.extend(std::iter::repeat(0u8).take(data_len as usize));

    File::create(path).unwrap().write_all(&bytes).unwrap();
}

#[test]
fn no_arguments_prints_usage() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tonearm"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn probe_reports_the_duration() {
    let dir = tempfile::tempdir().unwrap();
    let wav = dir.path().join("tone.wav");
    write_test_wav(&wav, 8_000); // exactly one second

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tonearm"));
    cmd.args(["probe", wav.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("0:01"))
        .stdout(predicate::str::contains("1000 ms"));
}

#[test]
fn probe_rejects_a_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.wav");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tonearm"));
    cmd.args(["probe", missing.to_str().unwrap()])
        .assert()
        .failure();
}

#[test]
fn quiet_mode_requires_an_input_file() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tonearm"));
    cmd.arg("--quiet").assert().failure();
}
