use std::process::Command;

#[test]
fn binary_print_config_succeeds() {
    let me = assert_cmd::cargo::cargo_bin!("move_log");
    let out = Command::new(me)
        .arg("--print-config")
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "binary should succeed with --print-config");
    assert!(String::from_utf8_lossy(&out.stdout).contains("config"));
}

#[test]
fn binary_help_mentions_operations() {
    let me = assert_cmd::cargo::cargo_bin!("move_log");
    let out = Command::new(me).arg("--help").output().expect("spawn binary");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("add|undo|list|clear"), "help: {stdout}");
}
