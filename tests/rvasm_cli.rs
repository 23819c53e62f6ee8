use std::path::PathBuf;
use std::process::Command;

fn temp_source(name: &str, text: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("rvm_rs_cli_{}_{}", std::process::id(), name));
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn echoes_every_token() {
    let src = temp_source("ok.s", "mov r0, r1\n");
    let out = Command::new(env!("CARGO_BIN_EXE_rvasm")).arg(&src).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    for kind in ["tok: opname", "tok: reg", "tok: comma", "tok: newline", "tok: eof"] {
        assert!(stdout.contains(kind), "missing {kind} in {stdout}");
    }
    assert!(stdout.contains("    1 | mov r0, r1"));
    let _ = std::fs::remove_file(&src);
}

#[test]
fn unknown_token_fails_the_run() {
    let src = temp_source("bad.s", "nop\nfoo\n");
    let out = Command::new(env!("CARGO_BIN_EXE_rvasm")).arg(&src).output().unwrap();
    assert!(!out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("tok: unknown"));
    assert!(stdout.contains("      | ^^^"));
    let _ = std::fs::remove_file(&src);
}

#[test]
fn missing_file_is_reported() {
    let missing = std::env::temp_dir().join("rvm_rs_cli_missing.s");
    let out = Command::new(env!("CARGO_BIN_EXE_rvasm")).arg(&missing).output().unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Could not open file"));
}
