use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn quiet_config(dir: &Path) -> PathBuf {
    let p = dir.join("config.xml");
    fs::write(&p, "<config>\n  <log_level>quiet</log_level>\n</config>\n").unwrap();
    p
}

fn run(dir: &Path, args: &[&str]) -> std::process::Output {
    let me = assert_cmd::cargo::cargo_bin!("move_log");
    Command::new(me)
        .env("MOVE_LOG_CONFIG", quiet_config(dir))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("spawn binary")
}

#[test]
fn no_arguments_exits_1_with_usage() {
    let td = tempdir().unwrap();
    let out = run(td.path(), &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("usage: move_log"), "stderr: {stderr}");
}

#[test]
fn operation_without_file_exits_1() {
    let td = tempdir().unwrap();
    let out = run(td.path(), &["list"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}

#[test]
fn arity_is_checked_before_operation_name() {
    let td = tempdir().unwrap();
    let out = run(td.path(), &["bogus"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn add_without_move_exits_2() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("moves.txt"), "e4\n").unwrap();
    let out = run(td.path(), &["add", "moves.txt"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("missing move for add"), "stderr: {stderr}");
}

#[test]
fn add_with_empty_move_exits_2() {
    let td = tempdir().unwrap();
    let out = run(td.path(), &["add", "moves.txt", ""]);
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
}

#[test]
fn unknown_operation_exits_3() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("moves.txt"), "e4\n").unwrap();
    let out = run(td.path(), &["redo", "moves.txt"]);
    assert_eq!(out.status.code(), Some(3));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unknown command"), "stderr: {stderr}");
}

#[test]
fn operation_names_are_case_sensitive() {
    let td = tempdir().unwrap();
    let out = run(td.path(), &["LIST", "moves.txt"]);
    assert_eq!(out.status.code(), Some(3));
}

#[test]
fn missing_explicit_config_is_a_runtime_failure() {
    let td = tempdir().unwrap();
    let me = assert_cmd::cargo::cargo_bin!("move_log");
    let out = Command::new(me)
        .env("MOVE_LOG_CONFIG", td.path().join("nope.xml"))
        .arg("list")
        .arg(td.path().join("moves.txt"))
        .output()
        .expect("spawn binary");
    assert_eq!(out.status.code(), Some(4));
    assert!(out.stdout.is_empty());
}

#[test]
fn usage_errors_win_over_broken_config() {
    let td = tempdir().unwrap();
    let me = assert_cmd::cargo::cargo_bin!("move_log");
    let out = Command::new(me)
        .env("MOVE_LOG_CONFIG", td.path().join("nope.xml"))
        .arg("add")
        .arg(td.path().join("moves.txt"))
        .output()
        .expect("spawn binary");
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn unrecognized_flag_does_not_reuse_missing_move_code() {
    let td = tempdir().unwrap();
    let out = run(td.path(), &["--bogus", "list", "moves.txt"]);
    assert_eq!(out.status.code(), Some(4));
    assert!(out.stdout.is_empty());
}
