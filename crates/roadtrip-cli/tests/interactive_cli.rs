use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn prepare_command() -> Command {
    let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/minimal");
    let mut cmd = cargo_bin_cmd!("roadtrip");
    cmd.env("RUST_LOG", "error").arg("--data-dir").arg(fixture);
    cmd
}

#[test]
fn interactive_is_the_default_command() {
    let mut cmd = prepare_command();
    cmd.write_stdin("Denmark\nLithuania\nEXIT\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Enter the name of the first country (type EXIT to quit):",
        ))
        .stdout(predicate::str::contains("Denmark --> Germany (355 km.)"))
        .stdout(predicate::str::contains("Germany --> Poland (517 km.)"))
        .stdout(predicate::str::contains("Poland --> Lithuania (392 km.)"))
        .stdout(predicate::str::ends_with("Exiting program. Thank you!\n"));
}

#[test]
fn invalid_names_and_unreachable_pairs() {
    let mut cmd = prepare_command();
    cmd.arg("interactive")
        .write_stdin("Narnia\nCanada\nJapan\nexit\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Invalid country name. Please enter a valid country name.",
        ))
        .stdout(predicate::str::contains("No path exists!"))
        .stdout(predicate::str::contains("Exiting program. Thank you!"));
}

#[test]
fn closed_stdin_exits_cleanly() {
    let mut cmd = prepare_command();
    cmd.write_stdin("");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Exiting program. Thank you!"));
}
