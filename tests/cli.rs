#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const CONFIG: &str = r#"{
  "start_date": "2024-01-07",
  "end_date": "2024-01-28",
  "roles": [
    { "name": "Sound", "layout_priority": 1 },
    { "name": "Lead", "layout_priority": 5 }
  ],
  "people": [
    { "name": "Neil", "roles": [{ "role": "Lead" }], "availability": { "period": 2, "unit": "weeks" } },
    { "name": "Daniel", "roles": [{ "role": "Sound" }] }
  ]
}"#;

#[test]
fn schedule_prints_rows_and_writes_json() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("rota.json");
    let out = dir.path().join("out.json");
    fs::write(&config, CONFIG).unwrap();

    Command::cargo_bin("rota-cli")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .arg("schedule")
        .arg("--out-json")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("2024/1/7@0 | Lead: Neil | Sound: Daniel"))
        .stdout(predicate::str::contains("2024/1/14@0 | Lead: - | Sound: Daniel"));

    let rows: serde_json::Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 3);
    assert_eq!(rows[2]["Lead"][0]["name"], "Neil");
}

#[test]
fn fields_lists_columns_by_priority() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("rota.json");
    fs::write(&config, CONFIG).unwrap();

    Command::cargo_bin("rota-cli")
        .unwrap()
        .args(["--config", config.to_str().unwrap(), "fields"])
        .assert()
        .success()
        .stdout("date,Lead,Sound\n");
}

#[test]
fn check_exits_with_two_when_excluded() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("rota.json");
    fs::write(&config, CONFIG).unwrap();

    Command::cargo_bin("rota-cli")
        .unwrap()
        .args(["--config", config.to_str().unwrap(), "check"])
        .args(["--person", "Neil", "--role", "Lead", "--date", "2024-01-14"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("excluded from role"));

    Command::cargo_bin("rota-cli")
        .unwrap()
        .args(["--config", config.to_str().unwrap(), "check"])
        .args(["--person", "Neil", "--role", "Lead", "--date", "2024-02-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Neil: available"));
}

#[test]
fn unknown_rule_fails() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("rota.json");
    fs::write(&config, CONFIG).unwrap();

    Command::cargo_bin("rota-cli")
        .unwrap()
        .args(["--config", config.to_str().unwrap(), "--rule", "random", "schedule"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown rule"));
}
