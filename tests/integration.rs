//! Tests of the `askai` binary against the stub answering service.

mod common;

use common::{dead_base_url, spawn_stub};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tempfile::TempDir;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

fn askai_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_askai"))
}

fn askai_command(cwd: &Path) -> Command {
    let mut cmd = Command::new(askai_binary());
    cmd.current_dir(cwd)
        .env_remove("ASKAI_BASE_URL")
        .env_remove("ASKAI_LOG")
        .env_remove("RUST_LOG");
    cmd
}

async fn run_askai(cwd: &Path, args: &[&str]) -> (String, String, bool) {
    let output = askai_command(cwd)
        .args(args)
        .output()
        .await
        .unwrap_or_else(|e| panic!("Failed to run askai binary: {}", e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("askai.toml");
    fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn test_ask_prints_answer_and_sources() {
    let tmp = TempDir::new().unwrap();
    let stub = spawn_stub().await;

    let (stdout, stderr, success) = run_askai(
        tmp.path(),
        &["--base-url", &stub.base_url(), "ask", "What is Physical AI?"],
    )
    .await;

    assert!(success, "ask failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Answer:"));
    assert!(stdout.contains("  Answer to What is Physical AI?"));
    assert!(stdout.contains("  Second line"));
    assert!(stdout.contains("Sources:\n  - chapter1.txt\n  - chapter2.txt"));
    assert_eq!(stub.ask_count(), 1);
}

#[tokio::test]
async fn test_ask_blank_question_fails_without_request() {
    let tmp = TempDir::new().unwrap();
    let stub = spawn_stub().await;

    let (_, stderr, success) =
        run_askai(tmp.path(), &["--base-url", &stub.base_url(), "ask", "   "]).await;

    assert!(!success);
    assert!(stderr.contains("Please enter a question"), "{}", stderr);
    assert_eq!(stub.ask_count(), 0);
}

#[tokio::test]
async fn test_ask_server_error_exits_nonzero() {
    let tmp = TempDir::new().unwrap();
    let stub = spawn_stub().await;

    let (stdout, _, success) =
        run_askai(tmp.path(), &["--base-url", &stub.base_url(), "ask", "boom"]).await;

    assert!(!success);
    assert!(stdout.contains("Error: Could not get answer."), "{}", stdout);
    assert!(!stdout.contains("Sources:"));
}

#[tokio::test]
async fn test_ask_json_output() {
    let tmp = TempDir::new().unwrap();
    let stub = spawn_stub().await;

    let (stdout, stderr, success) = run_askai(
        tmp.path(),
        &["--base-url", &stub.base_url(), "ask", "Explain ROS 2", "--json"],
    )
    .await;
    assert!(success, "stderr={}", stderr);

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["state"], "resolved");
    assert_eq!(json["query"], "Explain ROS 2");
    assert_eq!(json["sources"][1], "chapter2.txt");
}

#[tokio::test]
async fn test_base_url_from_config_file() {
    let tmp = TempDir::new().unwrap();
    let stub = spawn_stub().await;
    let config = write_config(
        tmp.path(),
        &format!("[service]\nbase_url = \"{}\"\n", stub.base_url()),
    );

    let (stdout, stderr, success) = run_askai(
        tmp.path(),
        &["--config", config.to_str().unwrap(), "ask", "What is Gazebo?"],
    )
    .await;

    assert!(success, "stdout={}, stderr={}", stdout, stderr);
    assert_eq!(stub.ask_count(), 1);
}

#[tokio::test]
async fn test_cli_base_url_beats_env_and_config() {
    let tmp = TempDir::new().unwrap();
    let stub = spawn_stub().await;
    let config = write_config(
        tmp.path(),
        &format!("[service]\nbase_url = \"{}\"\n", dead_base_url()),
    );

    let output = askai_command(tmp.path())
        .env("ASKAI_BASE_URL", dead_base_url())
        .args([
            "--config",
            config.to_str().unwrap(),
            "--base-url",
            stub.base_url().as_str(),
            "ask",
            "What is NVIDIA Isaac Sim?",
        ])
        .output()
        .await
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stub.ask_count(), 1);
}

#[tokio::test]
async fn test_env_base_url_beats_config() {
    let tmp = TempDir::new().unwrap();
    let stub = spawn_stub().await;
    let config = write_config(
        tmp.path(),
        &format!("[service]\nbase_url = \"{}\"\n", dead_base_url()),
    );

    let output = askai_command(tmp.path())
        .env("ASKAI_BASE_URL", stub.base_url())
        .args(["--config", config.to_str().unwrap(), "ask", "What is Gazebo?"])
        .output()
        .await
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stub.ask_count(), 1);
}

#[tokio::test]
async fn test_explicit_missing_config_is_an_error() {
    let tmp = TempDir::new().unwrap();

    let (_, stderr, success) =
        run_askai(tmp.path(), &["--config", "missing.toml", "examples"]).await;

    assert!(!success);
    assert!(stderr.contains("Failed to read config file"), "{}", stderr);
}

#[tokio::test]
async fn test_invalid_base_url_is_rejected() {
    let tmp = TempDir::new().unwrap();

    let (_, stderr, success) =
        run_askai(tmp.path(), &["--base-url", "ftp://nope", "ask", "hi"]).await;

    assert!(!success);
    assert!(stderr.contains("http or https"), "{}", stderr);
}

#[tokio::test]
async fn test_examples_lists_defaults() {
    let tmp = TempDir::new().unwrap();

    let (stdout, _, success) = run_askai(tmp.path(), &["examples"]).await;

    assert!(success);
    assert!(stdout.contains(" 1. What is Physical AI?"));
    assert!(stdout.contains(" 6. What are VLA models in robotics?"));
}

#[tokio::test]
async fn test_examples_from_config() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(
        tmp.path(),
        "[examples]\nquestions = [\"What is Gazebo?\", \"Explain ROS 2\"]\n",
    );

    let (stdout, _, success) =
        run_askai(tmp.path(), &["--config", config.to_str().unwrap(), "examples"]).await;

    assert!(success);
    assert!(stdout.contains(" 2. Explain ROS 2"));
    assert!(!stdout.contains("Physical AI"));
}

#[tokio::test]
async fn test_chat_session() {
    let tmp = TempDir::new().unwrap();
    let stub = spawn_stub().await;

    let mut child = askai_command(tmp.path())
        .args(["--base-url", stub.base_url().as_str(), "chat"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let mut stdin = child.stdin.take().unwrap();
    stdin
        .write_all(b"What is ROS 2?\n\n/example 3\n\nmulti\\\nline\n/quit\n")
        .await
        .unwrap();
    drop(stdin);

    let output = child.wait_with_output().await.unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{}", stdout);

    assert!(stdout.contains("Answer to What is ROS 2?"));
    assert!(stdout.contains("Please enter a question"));
    assert!(stdout.contains("Selected: How does Gazebo simulation work?"));
    assert!(stdout.contains("Answer to How does Gazebo simulation work?"));
    assert!(stdout.contains("Answer to multi"));
    assert_eq!(
        stub.raw_queries(),
        vec![
            "q=What%20is%20ROS%202%3F".to_string(),
            "q=How%20does%20Gazebo%20simulation%20work%3F".to_string(),
            "q=multi%0Aline".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_health_and_status() {
    let tmp = TempDir::new().unwrap();
    let stub = spawn_stub().await;

    let (stdout, stderr, success) =
        run_askai(tmp.path(), &["--base-url", &stub.base_url(), "health"]).await;
    assert!(success, "stderr={}", stderr);
    assert!(stdout.contains("healthy"));

    let (stdout, _, success) =
        run_askai(tmp.path(), &["--base-url", &stub.base_url(), "status"]).await;
    assert!(success);
    assert!(stdout.contains("Physical AI Textbook RAG API"));
    assert!(stdout.contains("DOCUMENTS  5"));
}

#[tokio::test]
async fn test_health_unreachable_fails() {
    let tmp = TempDir::new().unwrap();

    let (_, stderr, success) =
        run_askai(tmp.path(), &["--base-url", &dead_base_url(), "health"]).await;

    assert!(!success);
    assert!(stderr.contains("health check failed"), "{}", stderr);
}

#[tokio::test]
async fn test_debug_reports_index_counters() {
    let tmp = TempDir::new().unwrap();
    let stub = spawn_stub().await;

    let (stdout, stderr, success) =
        run_askai(tmp.path(), &["--base-url", &stub.base_url(), "debug"]).await;

    assert!(success, "stderr={}", stderr);
    assert!(stdout.contains("DOCUMENTS  5"));
    assert!(stdout.contains("VECTORIZER loaded"));
    assert!(stdout.contains("Physical AI is..."));
}
