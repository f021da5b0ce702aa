//! End-to-end CLI tests.
//!
//! The determinism checks run the binary twice and require byte-identical
//! output: this is the contract the whole service depends on, exercised
//! through the same code path the web server uses.

use assert_cmd::Command;
use predicates::prelude::*;

fn paleoseq() -> Command {
    Command::cargo_bin("paleoseq").expect("binary builds")
}

fn fixture_csv() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/samples.csv")
}

#[test]
fn generate_from_seed_is_reproducible() {
    let first = paleoseq()
        .args(["generate", "--seed", "101", "--length", "10"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let second = paleoseq()
        .args(["generate", "--seed", "101", "--length", "10"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(first, second);

    let sequence = String::from_utf8(first).unwrap();
    let sequence = sequence.trim();
    assert_eq!(sequence.len(), 10);
    assert!(sequence.chars().all(|c| "ACGT".contains(c)));
}

#[test]
fn generate_distinct_seeds_differ() {
    let a = paleoseq()
        .args(["generate", "--seed", "101", "--length", "10"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let b = paleoseq()
        .args(["generate", "--seed", "102", "--length", "10"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_ne!(a, b);
}

#[test]
fn generate_from_csv_sample() {
    let first = paleoseq()
        .args(["generate", "--csv", fixture_csv(), "--sample-id", "S001"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let second = paleoseq()
        .args(["generate", "--csv", fixture_csv(), "--sample-id", "S001"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(first, second);
    assert_eq!(String::from_utf8(first).unwrap().trim().len(), 200);
}

#[test]
fn generate_unknown_sample_fails_cleanly() {
    paleoseq()
        .args([
            "generate",
            "--csv",
            fixture_csv(),
            "--sample-id",
            "nonexistent-id",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn compare_sample_with_itself_is_100() {
    paleoseq()
        .args(["compare", "--csv", fixture_csv(), "S001", "S001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Similarity: 100.00%"));
}

#[test]
fn compare_raw_seeds_tsv_in_range() {
    let output = paleoseq()
        .args([
            "compare", "--seeds", "101", "102", "--length", "10", "--format", "tsv",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    let data_line = text.lines().nth(1).expect("tsv data line");
    let similarity: f64 = data_line
        .split('\t')
        .last()
        .unwrap()
        .parse()
        .expect("similarity column parses");
    assert!((0.0..=100.0).contains(&similarity));
}

#[test]
fn samples_lists_fixture_records() {
    paleoseq()
        .args(["samples", fixture_csv(), "--format", "tsv"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("S001\tSiberia\t24000\ttag-1")
                .and(predicate::str::contains("S002\tAltai\t40000\ttag-2"))
                .and(predicate::str::contains("S003\tIberia\t6000\ttag-3")),
        );
}

#[test]
fn samples_json_reports_count() {
    paleoseq()
        .args(["samples", fixture_csv(), "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 3"));
}
