use std::io::Write;
use std::process::{Command, Output, Stdio};

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "treasure-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn play_with_input(args: &[&str], input: &str) -> Output {
    let exe = env!("CARGO_BIN_EXE_treasure-hunter");
    let mut child = Command::new(exe)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn cli");
    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(input.as_bytes())
        .expect("write input");
    child.wait_with_output().expect("run cli")
}

#[test]
fn simulate_writes_json_report() {
    let exe = env!("CARGO_BIN_EXE_treasure-hunter");
    let output_path = temp_path("sim.json");
    let status = Command::new(exe)
        .args([
            "--mode",
            "simulate",
            "--strategies",
            "cautious,gambler",
            "--difficulties",
            "easy,hard",
            "--seeds",
            "1,2",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(&output_path).expect("read output");
    let report: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(report["runs"].as_array().map(Vec::len), Some(8));
    assert_eq!(report["aggregates"].as_array().map(Vec::len), Some(4));
    let _ = std::fs::remove_file(output_path);
}

#[test]
fn simulate_markdown_to_stdout() {
    let exe = env!("CARGO_BIN_EXE_treasure-hunter");
    let output = Command::new(exe)
        .args([
            "--mode",
            "simulate",
            "--strategies",
            "brawler",
            "--report",
            "markdown",
            "--max-turns",
            "5",
        ])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("# Treasure Hunter Simulation Results"));
    assert!(stdout.contains("| Brawler | normal |"));
}

#[test]
fn simulate_rejects_unknown_strategy() {
    let exe = env!("CARGO_BIN_EXE_treasure-hunter");
    let output = Command::new(exe)
        .args(["--mode", "simulate", "--strategies", "coward"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown strategy"));
}

#[test]
fn bad_config_file_is_a_startup_error() {
    let config_path = temp_path("bad-config.json");
    std::fs::write(&config_path, r#"{ "win_target": 0 }"#).expect("write config");
    let exe = env!("CARGO_BIN_EXE_treasure-hunter");
    let output = Command::new(exe)
        .args(["--mode", "simulate", "--config"])
        .arg(&config_path)
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("win target"));
    let _ = std::fs::remove_file(config_path);
}

#[test]
fn play_exits_with_farewell() {
    let output = play_with_input(&["--seed", "3"], "Ada\nn\ne\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Welcome to TREASURE HUNTER!"));
    assert!(stdout.contains("Game set to normal mode."));
    assert!(stdout.contains("Welcome to town, Ada."));
    assert!(stdout.contains("Fare thee well, Ada!"));
}

#[test]
fn play_treats_end_of_input_as_exit() {
    let output = play_with_input(&["--name", "Bo", "--difficulty", "hard", "--seed", "1"], "");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Fare thee well, Bo!"));
}
