//! Corruption recovery and concurrency tests for provo.
//!
//! These tests verify the CLI copes with:
//! - A corrupted stored profile
//! - Corrupted lines in the history log
//! - Several processes saving at the same time

use assert_cmd::Command;
use std::fs;
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use std::thread;
use tempfile::TempDir;

fn cli(config_home: &Path, data_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("provo"));
    cmd.env("XDG_CONFIG_HOME", config_home)
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

fn setup() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_home = temp_dir.path().join("config");
    let data_dir = temp_dir.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();
    (temp_dir, config_home, data_dir)
}

#[test]
fn test_corrupted_profile_falls_back_to_defaults() {
    let (_temp_dir, config_home, data_dir) = setup();
    fs::write(data_dir.join("profile.json"), "{ invalid json }}}}").unwrap();

    let output = cli(&config_home, &data_dir)
        .args(["calculate", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let result: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(result["breakdown"]["nutrition_kg"].as_f64(), Some(1760.0));
}

#[test]
fn test_corrupted_history_lines_skipped() {
    let (_temp_dir, config_home, data_dir) = setup();

    cli(&config_home, &data_dir)
        .args(["calculate", "--save"])
        .assert()
        .success();

    {
        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(data_dir.join("footprint_history.jsonl"))
            .unwrap();
        writeln!(file, "{{ partial write").unwrap();
    }

    cli(&config_home, &data_dir)
        .args(["calculate", "--save"])
        .assert()
        .success();

    let output = cli(&config_home, &data_dir)
        .args(["history", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let records: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 2);

    cli(&config_home, &data_dir).arg("summary").assert().success();
}

#[test]
fn test_concurrent_saves_keep_every_record() {
    let (_temp_dir, config_home, data_dir) = setup();

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let config_home = config_home.clone();
            let data_dir = data_dir.clone();
            thread::spawn(move || {
                cli(&config_home, &data_dir)
                    .args(["calculate", "--save"])
                    .assert()
                    .success();
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("CLI thread panicked");
    }

    let history = fs::read_to_string(data_dir.join("footprint_history.jsonl")).unwrap();
    let parsed: Vec<serde_json::Value> = history
        .lines()
        .map(|l| serde_json::from_str(l).expect("every line is a whole record"))
        .collect();
    assert_eq!(parsed.len(), 6);

    // Only one of the racing first saves is recorded as the initial one
    let initial = parsed.iter().filter(|r| r["trigger"] == "initial").count();
    assert_eq!(initial, 1);
    assert_eq!(parsed[0]["trigger"], "initial");

    // The stored profile is always a complete document
    let profile = fs::read_to_string(data_dir.join("profile.json")).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&profile).is_ok());
}
