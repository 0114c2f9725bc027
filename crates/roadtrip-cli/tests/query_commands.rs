use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/minimal")
        .canonicalize()
        .expect("fixture dataset present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("roadtrip");
    cmd.env("RUST_LOG", "error").env_remove("ROADTRIP_DATA_DIR");
    cmd
}

fn prepare_command() -> Command {
    let mut cmd = cli();
    cmd.arg("--data-dir").arg(fixture_dir());
    cmd
}

#[test]
fn distance_prints_total_kilometres() {
    let mut cmd = prepare_command();
    cmd.args(["distance", "--from", "Canada", "--to", "Guatemala"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Canada -> Guatemala: 4805 km"));
}

#[test]
fn path_prints_each_crossing() {
    let mut cmd = prepare_command();
    cmd.args(["path", "--from", "Canada", "--to", "Guatemala"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Canada --> United States of America (731 km.)",
        ))
        .stdout(predicate::str::contains(
            "United States of America --> Mexico (3024 km.)",
        ))
        .stdout(predicate::str::contains("Mexico --> Guatemala (1050 km.)"))
        .stdout(predicate::str::contains("Total distance: 4805 km"));
}

#[test]
fn unreachable_pair_is_not_an_error() {
    let mut cmd = prepare_command();
    cmd.args(["path", "--from", "Canada", "--to", "Denmark"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No path exists!"));
}

#[test]
fn unknown_country_error_is_friendly() {
    let mut cmd = prepare_command();
    cmd.args(["distance", "--from", "Guatamala", "--to", "Mexico"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown country 'Guatamala'."))
        .stderr(predicate::str::contains("Did you mean"));
}

#[test]
fn json_format_serialises_route_summary() {
    let mut cmd = prepare_command();
    cmd.args([
        "--format",
        "json",
        "path",
        "--from",
        "Belize",
        "--to",
        "Guatemala",
    ]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(json["distance_km"], 0);
    assert_eq!(json["unmeasured_hops"], 1);
    assert_eq!(json["segments"][0]["kind"], "unmeasured");
}

#[test]
fn data_dir_can_come_from_the_environment() {
    let mut cmd = cli();
    cmd.env("ROADTRIP_DATA_DIR", fixture_dir())
        .args(["distance", "--from", "Denmark", "--to", "Lithuania"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Denmark -> Lithuania: 1264 km"));
}

#[test]
fn individual_files_can_be_overridden() {
    let temp = tempdir().expect("create temp dir");
    let borders = temp.path().join("custom-borders.txt");
    fs::write(&borders, "Canada = US 8,891 km\nUS = Canada 8,891 km\n").expect("write borders");

    let mut cmd = prepare_command();
    cmd.arg("--borders")
        .arg(&borders)
        .args(["path", "--from", "US", "--to", "Mexico"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No path exists!"));
}

#[test]
fn missing_dataset_reports_the_path() {
    let temp = tempdir().expect("create temp dir");
    let mut cmd = cli();
    cmd.arg("--data-dir")
        .arg(temp.path())
        .args(["distance", "--from", "Canada", "--to", "Mexico"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load dataset"))
        .stderr(predicate::str::contains("state_name.tsv"));
}
