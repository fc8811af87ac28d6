use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("agnes-{nanos}-{file_name}"))
}

fn run_interactive_with(store_path: &Path, args: &[&str], input: &[u8]) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_agnes");

    let mut child = Command::new(exe)
        .args(args)
        .env("AGNES_STORE_PATH", store_path)
        .env("AGNES_CONFIG_PATH", temp_path("no-config.json"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn interactive session");

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin
            .write_all(input)
            .expect("failed to write to stdin");
    }

    child
        .wait_with_output()
        .expect("failed to read interactive output")
}

fn run_interactive(input: &str) -> std::process::Output {
    let store_path = temp_path("cli-interactive.txt");
    let output = run_interactive_with(&store_path, &[], input.as_bytes());
    std::fs::remove_file(&store_path).ok();
    output
}

#[test]
fn interactive_session_greets_and_says_goodbye() {
    let output = run_interactive("bye\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Hello thereeee! I'm Agnes"));
    assert!(stdout.contains("Goodbye"));
}

#[test]
fn interactive_errors_do_not_end_the_session() {
    let output = run_interactive("nope\nmark 1\nmark x\ntodo after errors\nlist\nbye\n");
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_command"));
    assert!(stderr.contains("ERROR: index_out_of_bounds"));
    assert!(stderr.contains("ERROR: invalid_task_number"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1. [T][ ] after errors"));
}

#[test]
fn interactive_stops_reading_after_bye() {
    let store_path = temp_path("cli-interactive-bye.txt");
    let output = run_interactive_with(&store_path, &[], b"todo first\nBYE\ntodo second\n");
    let stored = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    assert_eq!(stored, "T | 0 | first\n");
}

#[test]
fn interactive_ends_quietly_at_end_of_input() {
    let output = run_interactive("\n   \nlist\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No tasks in your list yet!"));
    assert!(!stdout.contains("Goodbye"));
}

#[test]
fn interactive_update_and_find() {
    let output = run_interactive(
        "event camp /from 2024-12-01 /to 2024-12-03\nupdate 1 /to 2024-12-04 1800\nupdate 1 /by 2024-12-01\nfind camp\nfind Camp\nbye\n",
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Existing task updated"));
    assert!(stdout.contains("1. [E][ ] camp (from: Dec 01 2024 to: Dec 04 2024 18:00)"));
    assert!(stdout.contains("No tasks with keyword 'Camp' found."));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_description"));
}

#[test]
fn interactive_aliases_come_from_overrides() {
    let store_path = temp_path("cli-interactive-alias.txt");
    let output = run_interactive_with(
        &store_path,
        &["--config-override", "aliases.t=todo", "--config-override", "aliases.ls=list"],
        b"t water plants\nls\nbye\n",
    );
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1. [T][ ] water plants"));
}

#[test]
fn interactive_survives_invalid_utf8() {
    let store_path = temp_path("cli-interactive-utf8.txt");
    let output = run_interactive_with(
        &store_path,
        &[],
        b"todo caf\xff\ntodo after\nlist\nbye\n",
    );
    let stored = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2. [T][ ] after"));
    assert!(stdout.contains("Goodbye"));
    assert_eq!(stored, "T | 0 | caf\u{FFFD}\nT | 0 | after\n");
}
