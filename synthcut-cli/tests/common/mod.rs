#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;

/// Builds a `synthcut` invocation with the small fragment bounds used
/// throughout these tests.
pub fn synthcut() -> Command {
    let mut cmd = Command::cargo_bin("synthcut").unwrap();
    cmd.args([
        "--min-length",
        "50",
        "--max-length",
        "70",
        "--min-overlap",
        "5",
        "--max-overlap",
        "10",
        "-q",
    ]);
    cmd
}

/// Runs `synthcut` on a score file and returns stdout.
pub fn run_synthcut_scores(scores: &Path, extra: &[&str]) -> String {
    let output = synthcut()
        .arg("--scores")
        .arg(scores)
        .args(extra)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).unwrap()
}

pub fn write_scores(dir: &Path, name: &str, values: &[f64]) -> PathBuf {
    let path = dir.join(name);
    let body: String = values.iter().map(|v| format!("{v}\n")).collect();
    fs::write(&path, body).unwrap();
    path
}

pub fn write_fasta(dir: &Path, name: &str, records: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(name);
    let body: String = records
        .iter()
        .map(|(id, seq)| format!(">{id}\n{seq}\n"))
        .collect();
    fs::write(&path, body).unwrap();
    path
}

/// 120 bp with balanced GC content.
pub fn balanced_sequence() -> String {
    "ACGT".repeat(30)
}
