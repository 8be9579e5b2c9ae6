use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn qa(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("qa-threads").unwrap();
    cmd.current_dir(temp.path())
        .env_remove("QA_THREADS_DATA_DIR")
        .arg("--data-dir")
        .arg(temp.path().join("data"))
        .arg("--no-color");
    cmd
}

fn threads(temp: &TempDir, expert: &str) -> Vec<Value> {
    let output = qa(temp).args(["list", expert, "--json"]).output().unwrap();
    assert!(output.status.success());
    let envelope: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(envelope["success"], Value::Bool(true));
    envelope["data"].as_array().cloned().unwrap()
}

#[test]
fn test_add_answer_and_list() {
    let temp = TempDir::new().unwrap();

    qa(&temp)
        .args(["profile", "set", "ada", "--name", "Ada"])
        .assert()
        .success();

    qa(&temp)
        .args(["add", "-e", "jane", "-a", "ada", "-t", "How do I start?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\": true"));

    let listed = threads(&temp, "jane");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["authorName"], "Ada");
    let root = listed[0]["id"].as_str().unwrap().to_string();

    qa(&temp)
        .args(["add", "-e", "jane", "-a", "jane", "-t", "Read the docs", "-p", &root])
        .assert()
        .success();

    let listed = threads(&temp, "jane");
    assert_eq!(listed[0]["answers"].as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["answers"][0]["authorName"], Value::Null);

    qa(&temp)
        .args(["list", "jane"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada (@ada)"))
        .stdout(predicate::str::contains("Read the docs"));
}

#[test]
fn test_like_then_dislike() {
    let temp = TempDir::new().unwrap();
    qa(&temp)
        .args(["add", "-e", "jane", "-a", "ada", "-t", "question"])
        .assert()
        .success();
    let root = threads(&temp, "jane")[0]["id"].as_str().unwrap().to_string();

    qa(&temp).args(["like", &root, "-a", "bob"]).assert().success();
    assert_eq!(threads(&temp, "jane")[0]["voters"][0]["slug"], "bob");

    qa(&temp).args(["dislike", &root, "-a", "bob"]).assert().success();
    assert!(threads(&temp, "jane")[0]["voters"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[test]
fn test_delete_removes_thread() {
    let temp = TempDir::new().unwrap();
    qa(&temp)
        .args(["add", "-e", "jane", "-a", "ada", "-t", "question"])
        .assert()
        .success();
    let root = threads(&temp, "jane")[0]["id"].as_str().unwrap().to_string();
    qa(&temp)
        .args(["add", "-e", "jane", "-a", "bob", "-t", "answer", "-p", &root])
        .assert()
        .success();

    qa(&temp).args(["delete", &root, "--yes"]).assert().success();
    assert!(threads(&temp, "jane").is_empty());
}

#[test]
fn test_missing_text_is_validation_failure() {
    let temp = TempDir::new().unwrap();
    qa(&temp)
        .args(["add", "-e", "jane", "-a", "ada"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("ValidationError"))
        .stderr(predicate::str::contains("You must provide a comment"));
}

#[test]
fn test_unknown_parent_is_not_found() {
    let temp = TempDir::new().unwrap();
    qa(&temp)
        .args(["add", "-e", "jane", "-a", "ada", "-t", "hi", "-p", "nope"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("NotFound"));
}

#[test]
fn test_init_then_config_show() {
    let temp = TempDir::new().unwrap();
    Command::cargo_bin("qa-threads")
        .unwrap()
        .current_dir(temp.path())
        .args(["--no-color", "init"])
        .assert()
        .success();
    assert!(temp.path().join(".qa-threads/config.toml").exists());

    Command::cargo_bin("qa-threads")
        .unwrap()
        .current_dir(temp.path())
        .env_remove("QA_THREADS_DATA_DIR")
        .args(["--no-color", "config", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_text_length\": 10000"));
}
