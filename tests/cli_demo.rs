//! CLI integration tests for the demo and scripted modes.

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

fn summary_value<'a>(stdout: &'a str, key: &str) -> &'a str {
    let prefix = format!("{key}=");
    stdout
        .lines()
        .find_map(|line| line.strip_prefix(prefix.as_str()))
        .unwrap_or_else(|| panic!("{key} line missing"))
        .trim()
}

#[test]
fn demo_cli_reports_blocked_move_and_final_pose() {
    let bin = env!("CARGO_BIN_EXE_mars_rover");
    let dir = tempfile::tempdir().expect("tempdir");
    let output = Command::new(bin)
        .arg("demo")
        .current_dir(dir.path())
        .output()
        .expect("failed to run demo binary");

    assert!(
        output.status.success(),
        "demo exited with non-zero status: {:?}",
        output.status
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("MISSION SUMMARY"), "summary missing from output");
    assert_eq!(summary_value(&stdout, "final_position"), "(1, 3)");
    assert_eq!(summary_value(&stdout, "final_heading"), "North");
    assert_eq!(summary_value(&stdout, "commands_executed"), "7");
    // The demo route runs into the obstacle at (2, 2) once.
    assert_eq!(summary_value(&stdout, "blocked"), "1");
    assert!(stdout.contains("Cannot move - obstacle detected!"));
}

#[test]
fn scripted_run_uses_config_and_saves_telemetry() {
    let bin = env!("CARGO_BIN_EXE_mars_rover");
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("mission.yaml");
    fs::write(
        &config,
        "grid:\n  width: 10\n  height: 10\nmission:\n  name: Scripted\n  telemetry_folder: out\n",
    )
    .expect("write config");

    let output = Command::new(bin)
        .args(["run", "MMRM"])
        .arg(&config)
        .current_dir(dir.path())
        .output()
        .expect("failed to run binary");
    assert!(output.status.success(), "run failed: {:?}", output.status);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(summary_value(&stdout, "final_position"), "(1, 2)");
    assert_eq!(summary_value(&stdout, "final_heading"), "East");
    assert_eq!(summary_value(&stdout, "moves"), "3");
    assert_eq!(summary_value(&stdout, "turns"), "1");

    let saved: Vec<_> = fs::read_dir(dir.path().join("out"))
        .expect("telemetry folder")
        .collect();
    assert_eq!(saved.len(), 1);
}

#[test]
fn interactive_session_reads_stdin_until_quit() {
    let bin = env!("CARGO_BIN_EXE_mars_rover");
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("config.yaml");
    fs::write(&config, "mission:\n  enable_telemetry: false\n").expect("write config");

    let mut child = Command::new(bin)
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to spawn binary");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"L\nM\nx\nR\nQ\nM\n")
        .expect("write commands");
    let output = child.wait_with_output().expect("wait for binary");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    // Turning west at the origin leaves the rover pinned against the edge.
    assert_eq!(summary_value(&stdout, "final_position"), "(0, 0)");
    assert_eq!(summary_value(&stdout, "final_heading"), "North");
    assert_eq!(summary_value(&stdout, "blocked"), "1");
    assert_eq!(summary_value(&stdout, "commands_executed"), "3");
    assert!(stdout.contains("Invalid command. Please try again."));
}

#[test]
fn invalid_config_exits_with_error() {
    let bin = env!("CARGO_BIN_EXE_mars_rover");
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("bad.yaml");
    fs::write(&config, "grid:\n  width: 3\n  height: 3\n  obstacles: [[4, 4]]\n")
        .expect("write config");

    let output = Command::new(bin)
        .args(["run", "M"])
        .arg(&config)
        .current_dir(dir.path())
        .output()
        .expect("failed to run binary");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("outside the 3x3 grid"), "stderr: {stderr}");
}

#[test]
fn unknown_script_token_is_a_usage_error() {
    let bin = env!("CARGO_BIN_EXE_mars_rover");
    let output = Command::new(bin)
        .args(["run", "MXM"])
        .output()
        .expect("failed to run binary");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn uncreatable_telemetry_folder_exits_with_error() {
    let bin = env!("CARGO_BIN_EXE_mars_rover");
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("blocker"), "not a directory").expect("write blocker");
    let config = dir.path().join("mission.yaml");
    fs::write(&config, "mission:\n  telemetry_folder: blocker/telemetry\n")
        .expect("write config");

    let output = Command::new(bin)
        .args(["run", "M"])
        .arg(&config)
        .current_dir(dir.path())
        .output()
        .expect("failed to run binary");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to create telemetry folder"), "stderr: {stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Executing:"), "stdout: {stdout}");
}
