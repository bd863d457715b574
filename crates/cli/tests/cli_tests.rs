// Integration tests for the `sheetdash` binary.
// Run with: cargo test -p sheetdash-cli --test cli_tests

use std::path::Path;
use std::process::Command;

/// The binary with its config directory pointed at an empty scratch dir,
/// so a real per-user config never leaks into a test.
fn sheetdash(config_home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sheetdash"));
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("SHEETDASH_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_json_lists_tabs_by_priority() {
    let dir = tempfile::tempdir().unwrap();
    let low = write(dir.path(), "low.csv", "s:priority=1\nrun,1\n");
    let high = write(dir.path(), "high.csv", "s:priority=50\ns:axis=ms\nrun,2\n");

    let output = sheetdash(dir.path())
        .args(["show", "--json", "-f", low.as_str(), high.as_str()])
        .output()
        .expect("sheetdash show --json");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let sources = report["sources"].as_array().unwrap();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0]["name"], "low.csv");
    assert_eq!(sources[1]["name"], "high.csv");
    assert_eq!(sources[1]["tabs"][0]["axis"], "ms");
    assert!(report["last_update"].is_string());
}

#[test]
fn show_text_prints_frame() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "bench.csv", "b:target,10\n2024-03-01,v1,12.5\n");

    let output = sheetdash(dir.path()).args(["show", "-f", file.as_str()]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[bench]"), "stdout:\n{}", stdout);
    assert!(stdout.contains("* v1"));
    assert!(stdout.contains("12.5"));
    assert!(stdout.contains("b:target"));
    assert!(stdout.contains("last update: "));
}

#[test]
fn hidden_table_is_not_shown() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "secret.csv", "s:hide\nrun,1\n");

    let output = sheetdash(dir.path())
        .args(["show", "--json", "-f", file.as_str()])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["sources"][0]["tabs"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// exit codes
// ---------------------------------------------------------------------------

#[test]
fn missing_file_exits_50() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.xlsx");

    let output = sheetdash(dir.path())
        .args(["show", "-f", missing.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(50));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: nope.xlsx"), "stderr: {}", stderr);
}

#[test]
fn corrupt_workbook_exits_51() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "broken.xlsx", "this is not a workbook");

    let output = sheetdash(dir.path()).args(["show", "-f", file.as_str()]).output().unwrap();
    assert_eq!(output.status.code(), Some(51));
}

#[test]
fn invalid_setting_exits_52() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "bench.csv", "s:keep_last=many\nrun,1\n");

    let output = sheetdash(dir.path()).args(["show", "-f", file.as_str()]).output().unwrap();
    assert_eq!(output.status.code(), Some(52));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("keep_last"), "stderr: {}", stderr);
}

#[test]
fn no_sources_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let output = sheetdash(dir.path()).args(["show"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("hint:"));
}

#[test]
fn zero_interval_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "bench.csv", "run,1\n");
    let output = sheetdash(dir.path())
        .args(["run", "-f", file.as_str(), "-s", "0"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn oversized_interval_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "bench.csv", "run,1\n");
    let output = sheetdash(dir.path())
        .args(["run", "-f", file.as_str(), "-u", "18446744073709551615", "--frames", "1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn bad_config_file_exits_3() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "dash.toml", "update_interval_secs = 0\n");
    let file = write(dir.path(), "bench.csv", "run,1\n");

    let output = sheetdash(dir.path())
        .args(["show", "--config", config.as_str(), "-f", file.as_str()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
}

// ---------------------------------------------------------------------------
// config / run
// ---------------------------------------------------------------------------

#[test]
fn config_file_supplies_sources() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "bench.csv", "run,1\n");
    let config = write(
        dir.path(),
        "dash.toml",
        &format!("files = [{:?}]\nplots_per_line = 1\n", file),
    );

    let output = sheetdash(dir.path())
        .args(["show", "--json", "--config", config.as_str()])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["sources"][0]["name"], "bench.csv");
}

#[test]
fn config_init_then_path() {
    let dir = tempfile::tempdir().unwrap();

    let output = sheetdash(dir.path()).args(["config", "path"]).output().unwrap();
    assert!(output.status.success());
    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    assert!(path.ends_with("dashboard.toml"), "path: {}", path);

    let target = dir.path().join("conf").join("dashboard.toml");
    let target = target.to_str().unwrap();
    assert!(sheetdash(dir.path()).args(["config", "init", target]).status().unwrap().success());
    assert!(Path::new(target).exists());

    let again = sheetdash(dir.path()).args(["config", "init", target]).output().unwrap();
    assert_eq!(again.status.code(), Some(2));
}

#[test]
fn run_stops_after_requested_frames() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "bench.csv", "run,1\n");

    let output = sheetdash(dir.path())
        .args(["run", "-f", file.as_str(), "--frames", "1"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("bench.csv"));
    assert!(stdout.contains("last update: "));
}

#[test]
fn run_keeps_going_when_a_source_fails() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(dir.path(), "good.csv", "run,1\n");
    let missing = dir.path().join("gone.csv");

    let output = sheetdash(dir.path())
        .args(["run", "-f", good.as_str(), missing.to_str().unwrap(), "--frames", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("warning: gone.csv"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("(nothing to show)"));
}
