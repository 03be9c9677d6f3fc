use assert_cmd::Command;
use predicates::prelude::*;

fn graph_formatting() -> Command {
    Command::cargo_bin("graph-formatting").unwrap()
}

#[test]
fn latex_strings_on_stdout() {
    graph_formatting()
        .args(["--demo", "latex"])
        .assert()
        .success()
        .stdout("$\\theta$\n$\\theta$ = 35.43\n$\\Delta_{\\mu}$ = 3.14\n");
}

#[test]
fn save_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("figures");
    graph_formatting()
        .arg("--demo=latex")
        .arg("--save")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("$\\theta$ = 35.43"));
    assert!(out.is_dir());
}

#[test]
fn invalid_style_is_rejected() {
    graph_formatting()
        .args(["--demo", "latex", "--label-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid style"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn non_positive_dpi_is_rejected() {
    graph_formatting()
        .args(["--demo", "latex", "--dpi=-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--dpi"));
}
