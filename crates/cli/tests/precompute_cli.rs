use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const CATALOG: &str = r#"[
  {"full_name": "Earth-like", "a": 1.0, "e": 0.0167, "i": 0.0, "node": 0.0, "peri": 0.0, "M": 0.0},
  {"full_name": "Interstellar", "a": -1.27, "e": 1.2, "i": 122.7, "node": 24.6, "peri": 241.8, "M": 0.0}
]"#;

#[test]
fn precompute_writes_enriched_json_and_summary() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("catalog.json");
    let output = dir.path().join("out/precomputed.json");
    let failures = dir.path().join("failures.json");
    fs::write(&input, CATALOG).expect("write catalog");

    Command::cargo_bin("precompute")
        .expect("precompute bin")
        .args([
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--failures",
            failures.to_str().unwrap(),
            "--sequential",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("computed 1 of 2 records (1 failed)"));

    let rows: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).expect("output")).expect("json");
    assert_eq!(rows.as_array().map(Vec::len), Some(1));
    let x = rows[0]["x"].as_f64().expect("x");
    assert!((x - 0.9833).abs() < 1e-6, "x = {x}");

    let report = fs::read_to_string(&failures).expect("failure report");
    assert!(report.contains("Interstellar"));
    assert!(report.contains("invalid_eccentricity"));
}

#[test]
fn csv_to_stdout_with_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("catalog.json");
    let config = dir.path().join("snapshot.toml");
    fs::write(&input, CATALOG).expect("write catalog");
    fs::write(&config, "[output]\nformat = \"csv\"\ninclude_distance = false\n").expect("config");

    Command::cargo_bin("precompute")
        .expect("precompute bin")
        .args([
            "--input",
            input.to_str().unwrap(),
            "--output",
            "-",
            "--config",
            config.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "index,full_name,x,y,z,eccentric_anomaly,true_anomaly",
        ))
        .stdout(predicate::str::contains("0,Earth-like,"));
}

#[test]
fn invalid_tolerance_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("catalog.json");
    fs::write(&input, CATALOG).expect("write catalog");

    Command::cargo_bin("precompute")
        .expect("precompute bin")
        .args([
            "--input",
            input.to_str().unwrap(),
            "--output",
            "-",
            "--tolerance",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tolerance"));
}

#[test]
fn missing_input_fails_with_context() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.json");

    Command::cargo_bin("precompute")
        .expect("precompute bin")
        .args(["--input", missing.to_str().unwrap(), "--output", "-"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("precomputing"));
}

#[test]
fn help_explains_where_skipped_records_go() {
    Command::cargo_bin("precompute")
        .expect("precompute bin")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--failures"))
        .stdout(predicate::str::contains("only logged as warnings"));
}
