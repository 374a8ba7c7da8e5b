//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;

fn abacus_flash() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("abacus-flash").unwrap()
}

#[test]
fn help_lists_training_options() {
    abacus_flash()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--digits"))
        .stdout(predicate::str::contains("--display-time"))
        .stdout(predicate::str::contains("--series"))
        .stdout(predicate::str::contains("--round-100-900"));
}

#[test]
fn version_flag() {
    abacus_flash()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn rejects_out_of_range_digits() {
    abacus_flash()
        .args(["--digits", "12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--digits"));
}

#[test]
fn rejects_display_time_outside_limits() {
    abacus_flash()
        .args(["--display-time", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0.1 and 5"));
}

#[test]
fn rejects_unknown_language() {
    abacus_flash()
        .args(["--language", "fr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ua"));
}

#[test]
fn requires_a_terminal() {
    abacus_flash()
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("stdin must be a tty"));
}
