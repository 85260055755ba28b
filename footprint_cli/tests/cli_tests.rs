//! Integration tests for the provo binary.
//!
//! These tests verify end-to-end behavior including:
//! - Profile input (defaults, file, stdin) and validation
//! - JSON and text output of a calculation
//! - Saving: stored profile, history triggers, summary, export
//! - Introspection commands (factors, averages, score)

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// CLI isolated from the user's real config file
fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("provo"));
    cmd.env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(dir.path().join("data"));
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is JSON")
}

fn write_profile(dir: &Path, name: &str, json: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, json).expect("Failed to write profile");
    path
}

#[test]
fn test_cli_help() {
    let temp_dir = setup_test_dir();
    cli(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Personal CO2 footprint calculator"));
}

#[test]
fn test_default_profile_json() {
    let temp_dir = setup_test_dir();
    let result = stdout_json(cli(&temp_dir).args(["calculate", "--json"]));

    let total = result["total_co2_kg_year"].as_f64().unwrap();
    assert!((total - 5568.8).abs() < 1e-6);
    assert_eq!(result["sec_score"].as_f64(), Some(7.3));
    assert_eq!(result["calculation_version"], "1.0");
    assert_eq!(result["profile_complete"], false);
    assert_eq!(result["recommendations"].as_array().unwrap().len(), 4);
    assert_eq!(result["comparison"]["vs_germany_percent"].as_f64(), Some(-48.4));
}

#[test]
fn test_text_output_is_default_command() {
    let temp_dir = setup_test_dir();
    cli(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("CO2 FOOTPRINT"))
        .stdout(predicate::str::contains("SEC-score: 7.3 / 10"))
        .stdout(predicate::str::contains(
            "Switch to green electricity (−468 kg, easy) [EN-1]",
        ))
        .stdout(predicate::str::contains("Easy").not());
}

#[test]
fn test_profile_from_file() {
    let temp_dir = setup_test_dir();
    let profile = write_profile(
        temp_dir.path(),
        "flyer.json",
        r#"{"mobility": {"flights_long_haul": 3}}"#,
    );

    let result = stdout_json(
        cli(&temp_dir)
            .args(["calculate", "--json", "--profile"])
            .arg(&profile),
    );

    let mobility = result["breakdown"]["mobility_kg"].as_f64().unwrap();
    assert!((mobility - 5040.0).abs() < 1e-6);
    let first = &result["recommendations"][0];
    assert_eq!(first["challenge_id"], "MO-3");
    assert_eq!(first["potential_savings_kg"].as_f64(), Some(2520.0));
}

#[test]
fn test_profile_from_stdin() {
    let temp_dir = setup_test_dir();
    let result = stdout_json(
        cli(&temp_dir)
            .args(["calculate", "--json", "--profile", "-"])
            .write_stdin(r#"{"nutrition": {"diet_type": "vegan"}}"#),
    );

    assert_eq!(result["breakdown"]["nutrition_kg"].as_f64(), Some(940.0));
}

#[test]
fn test_invalid_profile_rejected() {
    let temp_dir = setup_test_dir();
    let profile = write_profile(
        temp_dir.path(),
        "car.json",
        r#"{"mobility": {"has_car": true, "car_km_year": 12000}}"#,
    );

    cli(&temp_dir)
        .args(["calculate", "--profile"])
        .arg(&profile)
        .assert()
        .failure()
        .stderr(predicate::str::contains("car_fuel_type"));
}

#[test]
fn test_unknown_enum_value_rejected() {
    let temp_dir = setup_test_dir();
    let profile = write_profile(
        temp_dir.path(),
        "bad.json",
        r#"{"housing": {"heating_type": "coal"}}"#,
    );

    cli(&temp_dir)
        .args(["calculate", "--profile"])
        .arg(&profile)
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not parse profile"));
}

#[test]
fn test_save_records_history_triggers() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");

    let first = stdout_json(cli(&temp_dir).args(["calculate", "--save", "--json"]));
    assert_eq!(first["profile_complete"], true);
    cli(&temp_dir).args(["calculate", "--save"]).assert().success();

    assert!(data_dir.join("profile.json").exists());

    let history = fs::read_to_string(data_dir.join("footprint_history.jsonl")).unwrap();
    let triggers: Vec<String> = history
        .lines()
        .map(|l| serde_json::from_str::<Value>(l).unwrap()["trigger"].to_string())
        .collect();
    assert_eq!(triggers, vec!["\"initial\"", "\"update\""]);
}

#[test]
fn test_recalculates_from_stored_profile() {
    let temp_dir = setup_test_dir();
    let profile = write_profile(
        temp_dir.path(),
        "vegan.json",
        r#"{"nutrition": {"diet_type": "vegan"}}"#,
    );

    cli(&temp_dir)
        .args(["calculate", "--save", "--profile"])
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("Footprint saved"));

    let result = stdout_json(cli(&temp_dir).args(["calculate", "--json"]));
    assert_eq!(result["breakdown"]["nutrition_kg"].as_f64(), Some(940.0));
}

#[test]
fn test_summary_and_history() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("No footprint calculated yet"));

    cli(&temp_dir).args(["calculate", "--save"]).assert().success();
    cli(&temp_dir).args(["calculate", "--save"]).assert().success();

    cli(&temp_dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Main source  : consumption"))
        .stdout(predicate::str::contains("SEC-score    : 7.3 / 10"));

    let records = stdout_json(cli(&temp_dir).args(["history", "--limit", "1", "--json"]));
    assert_eq!(records.as_array().unwrap().len(), 1);
    assert_eq!(records[0]["trigger"], "update");

    let all = stdout_json(cli(&temp_dir).args(["history", "--json"]));
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[test]
fn test_export_csv() {
    let temp_dir = setup_test_dir();
    let out = temp_dir.path().join("export").join("history.csv");

    cli(&temp_dir)
        .args(["export", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to export"));

    cli(&temp_dir).args(["calculate", "--save"]).assert().success();

    cli(&temp_dir)
        .args(["export", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 records"));

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("id,recorded_at,calculation_version,trigger"));
    assert!(csv.contains("initial"));

    // Exporting again replaces the file rather than appending to it
    cli(&temp_dir)
        .args(["export", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 records"));
    assert_eq!(fs::read_to_string(&out).unwrap().lines().count(), 2);
}

#[test]
fn test_score_command() {
    let temp_dir = setup_test_dir();
    for (total, expected) in [("2000", "10.0"), ("8500", "5.0"), ("15000", "0.0")] {
        cli(&temp_dir)
            .args(["score", total])
            .assert()
            .success()
            .stdout(predicate::str::diff(format!("{}\n", expected)));
    }

    cli(&temp_dir).args(["score", "NaN"]).assert().failure();
}

#[test]
fn test_factors_and_averages() {
    let temp_dir = setup_test_dir();

    let factors = stdout_json(cli(&temp_dir).args(["factors", "--json"]));
    assert_eq!(factors["version"], "1.0");
    let entries = factors["factors"].as_array().unwrap();
    assert!(entries
        .iter()
        .any(|e| e["category"] == "heating" && e["subcategory"] == "heatpump"));
    assert_eq!(factors["sources"].as_array().unwrap().len(), 4);

    cli(&temp_dir)
        .arg("factors")
        .assert()
        .success()
        .stdout(predicate::str::contains("Emission factors v1.0"));

    let averages = stdout_json(cli(&temp_dir).args(["averages", "--json"]));
    assert_eq!(averages["germany_average_kg"].as_f64(), Some(10800.0));
    assert_eq!(averages["breakdown_germany"]["mobility_kg"].as_f64(), Some(3200.0));
}

#[test]
fn test_json_output_from_config() {
    let temp_dir = setup_test_dir();
    let config_dir = temp_dir.path().join("config").join("provolution");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[output]\nformat = \"json\"\n").unwrap();

    let result = stdout_json(cli(&temp_dir).arg("calculate"));
    assert!(result["breakdown"].is_object());
}
