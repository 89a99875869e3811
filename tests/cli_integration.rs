//! Integration tests for the `tk` CLI.
//!
//! Each test creates a temp data directory, runs `tk` as a subprocess,
//! and verifies stdout and/or the stored file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Get the path to the built `tk` binary.
fn tk_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tk");
    path
}

fn tk_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(tk_bin());
    cmd.arg("-C")
        .arg(dir)
        .args(args)
        .env_remove("TICKOFF_DIR")
        .env_remove("TICKOFF_LOG");
    cmd
}

fn run_tk(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = tk_command(dir, args)
        .stdin(Stdio::null())
        .output()
        .expect("failed to run tk");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn run_tk_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tk(dir, args);
    if !success {
        panic!(
            "tk {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

fn run_tk_with_input(dir: &Path, args: &[&str], input: &str) -> String {
    let mut child = tk_command(dir, args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run tk");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(
        output.status.success(),
        "tk {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stored_tasks(dir: &Path) -> Vec<serde_json::Value> {
    let raw = fs::read_to_string(dir.join("todos.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

/// Add a task and return its id
fn add(dir: &Path, text: &str, date: &str) -> i64 {
    let out = run_tk_ok(dir, &["--json", "add", text, "--date", date]);
    let task: serde_json::Value = serde_json::from_str(&out).unwrap();
    task["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// list / add
// ---------------------------------------------------------------------------

#[test]
fn list_on_fresh_dir_prints_placeholder() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tk_ok(tmp.path(), &["list"]);
    assert_eq!(out.trim(), "No tasks yet");
    assert!(!tmp.path().join("todos.json").exists());
}

#[test]
fn add_persists_task() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tk_ok(tmp.path(), &["add", "  Buy milk  ", "--date", "today"]);
    assert!(out.starts_with("Added "), "{}", out);
    assert!(out.contains("Buy milk"), "{}", out);

    let tasks = stored_tasks(tmp.path());
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["text"], "Buy milk");
    assert_eq!(tasks[0]["completed"], false);
    assert!(tasks[0]["createdAt"].is_string());
}

#[test]
fn add_rejects_past_missing_and_empty() {
    let tmp = tempfile::TempDir::new().unwrap();

    let (_, stderr, success) = run_tk(tmp.path(), &["add", "Old", "--date", "2000-01-01"]);
    assert!(!success);
    assert!(stderr.contains("in the past"), "{}", stderr);

    let (_, stderr, success) = run_tk(tmp.path(), &["add", "No date"]);
    assert!(!success);
    assert!(stderr.contains("due date is required"), "{}", stderr);

    let (_, stderr, success) = run_tk(tmp.path(), &["add", "   ", "--date", "today"]);
    assert!(!success);
    assert!(stderr.contains("cannot be empty"), "{}", stderr);

    let (_, stderr, success) = run_tk(tmp.path(), &["add", "Typo", "--date", "2025-13-40"]);
    assert!(!success);
    assert!(stderr.contains("invalid date"), "{}", stderr);

    assert!(!tmp.path().join("todos.json").exists());
}

#[test]
fn list_is_sorted_by_due_date() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), "Later", "2099-12-31");
    add(tmp.path(), "Sooner", "tomorrow");
    add(tmp.path(), "Now", "today");

    let out = run_tk_ok(tmp.path(), &["list"]);
    let order: Vec<&str> = out
        .lines()
        .map(|l| l.rsplit("  ").next().unwrap())
        .collect();
    assert_eq!(order, vec!["Now", "Sooner", "Later"]);

    // storage keeps insertion order
    let texts: Vec<String> = stored_tasks(tmp.path())
        .iter()
        .map(|t| t["text"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(texts, vec!["Later", "Sooner", "Now"]);
}

#[test]
fn ids_are_unique() {
    let tmp = tempfile::TempDir::new().unwrap();
    let a = add(tmp.path(), "A", "today");
    let b = add(tmp.path(), "B", "today");
    let c = add(tmp.path(), "C", "today");
    assert!(a < b && b < c);
}

// ---------------------------------------------------------------------------
// toggle / filter
// ---------------------------------------------------------------------------

#[test]
fn toggle_and_filter() {
    let tmp = tempfile::TempDir::new().unwrap();
    let milk = add(tmp.path(), "Buy milk", "today");
    add(tmp.path(), "Pay rent", "tomorrow");

    let out = run_tk_ok(tmp.path(), &["toggle", &milk.to_string()]);
    assert_eq!(out.trim(), format!("{} is now completed", milk));

    let pending = run_tk_ok(tmp.path(), &["list", "--filter", "pending"]);
    assert!(pending.contains("Pay rent"));
    assert!(!pending.contains("Buy milk"));

    let completed = run_tk_ok(tmp.path(), &["list", "--filter", "completed"]);
    assert!(completed.contains("[x]"));
    assert!(completed.contains("Buy milk"));

    let out = run_tk_ok(tmp.path(), &["done", &milk.to_string()]);
    assert_eq!(out.trim(), format!("{} is now pending", milk));
    let completed = run_tk_ok(tmp.path(), &["list", "-f", "completed"]);
    assert_eq!(completed.trim(), "No completed tasks");
}

#[test]
fn unknown_id_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), "A", "today");
    for cmd in ["toggle", "rm", "edit"] {
        let (_, stderr, success) = run_tk(tmp.path(), &[cmd, "42"]);
        assert!(!success, "{} should fail", cmd);
        assert!(stderr.contains("task not found: 42"), "{}", stderr);
    }
    assert_eq!(stored_tasks(tmp.path()).len(), 1);
}

// ---------------------------------------------------------------------------
// edit / rm / clear
// ---------------------------------------------------------------------------

#[test]
fn edit_with_text_argument() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), "Buy milk", "today");
    let out = run_tk_ok(tmp.path(), &["edit", &id.to_string(), "Buy oat milk"]);
    assert!(out.starts_with("Updated"), "{}", out);
    assert_eq!(stored_tasks(tmp.path())[0]["text"], "Buy oat milk");

    let out = run_tk_ok(tmp.path(), &["edit", &id.to_string(), "   "]);
    assert_eq!(out.trim(), format!("{} unchanged", id));
    assert_eq!(stored_tasks(tmp.path())[0]["text"], "Buy oat milk");
}

#[test]
fn edit_prompts_when_text_is_omitted() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), "Buy milk", "today");
    let out = run_tk_with_input(tmp.path(), &["edit", &id.to_string()], "Buy bread\n");
    assert!(out.contains("Buy bread"), "{}", out);
    assert_eq!(stored_tasks(tmp.path())[0]["text"], "Buy bread");
}

#[test]
fn edit_prompt_empty_answer_leaves_task_unchanged() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), "Buy milk", "today");
    let before = fs::read_to_string(tmp.path().join("todos.json")).unwrap();

    let out = run_tk_with_input(tmp.path(), &["edit", &id.to_string()], "\n");
    assert_eq!(out.trim(), format!("{} unchanged", id));

    let out = run_tk_with_input(tmp.path(), &["--json", "edit", &id.to_string()], "\n");
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["changed"], false);

    assert_eq!(fs::read_to_string(tmp.path().join("todos.json")).unwrap(), before);
}

#[test]
fn rm_deletes_one_task() {
    let tmp = tempfile::TempDir::new().unwrap();
    let a = add(tmp.path(), "A", "today");
    add(tmp.path(), "B", "today");
    let out = run_tk_ok(tmp.path(), &["rm", &a.to_string()]);
    assert_eq!(out.trim(), format!("Deleted {}", a));
    let tasks = stored_tasks(tmp.path());
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["text"], "B");
}

#[test]
fn clear_asks_for_confirmation() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), "A", "today");
    add(tmp.path(), "B", "today");

    let out = run_tk_with_input(tmp.path(), &["clear"], "n\n");
    assert_eq!(out.trim(), "Cancelled");
    assert_eq!(stored_tasks(tmp.path()).len(), 2);

    let out = run_tk_with_input(tmp.path(), &["clear"], "y\n");
    assert_eq!(out.trim(), "Deleted 2 tasks");
    assert!(stored_tasks(tmp.path()).is_empty());
}

#[test]
fn clear_yes_skips_prompt() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), "A", "today");
    let out = run_tk_ok(tmp.path(), &["clear", "--yes"]);
    assert_eq!(out.trim(), "Deleted 1 tasks");

    let out = run_tk_ok(tmp.path(), &["clear", "--yes"]);
    assert_eq!(out.trim(), "Nothing to delete");
}

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

#[test]
fn json_list_output() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), "Later", "2099-01-01");
    add(tmp.path(), "Sooner", "today");

    let out = run_tk_ok(tmp.path(), &["--json", "list"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["filter"], "all");
    let tasks = json["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["text"], "Sooner");
    assert_eq!(tasks[1]["date"], "2099-01-01");
}

// ---------------------------------------------------------------------------
// Storage failures and recovery
// ---------------------------------------------------------------------------

#[test]
fn corrupt_store_starts_empty_and_is_preserved() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("todos.json"), "{not json").unwrap();

    let out = run_tk_ok(tmp.path(), &["list"]);
    assert_eq!(out.trim(), "No tasks yet");

    let log = run_tk_ok(tmp.path(), &["recovery"]);
    assert!(log.contains("parser"), "{}", log);
    assert!(log.contains("{not json"), "{}", log);

    // the next save replaces the corrupt file
    add(tmp.path(), "Fresh", "today");
    assert_eq!(stored_tasks(tmp.path()).len(), 1);

    let out = run_tk_ok(tmp.path(), &["recovery", "--clear"]);
    assert!(out.starts_with("Removed"), "{}", out);
    let out = run_tk_ok(tmp.path(), &["recovery"]);
    assert_eq!(out.trim(), "Recovery log is empty");
}

#[test]
fn null_store_is_an_empty_list() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("todos.json"), "null").unwrap();
    let out = run_tk_ok(tmp.path(), &["list"]);
    assert_eq!(out.trim(), "No tasks yet");
}

#[test]
fn reads_tasks_written_elsewhere() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("todos.json"),
        r#"[{"id":1736071200123,"text":"Call mom","date":"2099-02-01","completed":true,"createdAt":"2025-01-05T10:00:00.123Z"}]"#,
    )
    .unwrap();
    let out = run_tk_ok(tmp.path(), &["list"]);
    assert!(out.contains("1736071200123"), "{}", out);
    assert!(out.contains("[x]"), "{}", out);
    assert!(out.contains("Feb 1, 2099"), "{}", out);
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn config_key_changes_storage_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[storage]\nkey = \"work\"\n",
    )
    .unwrap();
    add(tmp.path(), "Standup", "today");
    assert!(tmp.path().join("work.json").exists());
    assert!(!tmp.path().join("todos.json").exists());

    let out = run_tk_ok(tmp.path(), &["config"]);
    assert!(out.contains("key = \"work\""), "{}", out);
}

#[test]
fn bad_config_is_an_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[storage\n").unwrap();
    let (_, stderr, success) = run_tk(tmp.path(), &["list"]);
    assert!(!success);
    assert!(stderr.starts_with("error:"), "{}", stderr);
}
