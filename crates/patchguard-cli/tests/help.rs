use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a Command for the patchguard binary.
#[allow(deprecated)]
fn patchguard_cmd() -> Command {
    Command::cargo_bin("patchguard").unwrap()
}

#[test]
fn help_works() {
    patchguard_cmd().arg("--help").assert().success();
}

#[test]
fn analyse_help_lists_the_flags() {
    patchguard_cmd()
        .args(["analyse", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--auto-theme-update"))
        .stdout(predicate::str::contains("--threeway-diff"))
        .stdout(predicate::str::contains("--vendor-namespaces"));
}

#[test]
fn explain_known_check_type() {
    patchguard_cmd()
        .args(["explain", "override.plugin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Review guidance"));
}

#[test]
fn explain_unknown_check_type_fails_with_catalog() {
    patchguard_cmd()
        .args(["explain", "override.bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("override.file"));
}
