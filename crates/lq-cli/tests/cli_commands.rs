//! Integration tests for lq CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lq(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lq").unwrap();
    cmd.current_dir(dir);
    cmd
}

fn store(dir: &TempDir) -> PathBuf {
    dir.path().join("questions.json")
}

/// A temp dir whose store holds two expression questions.
fn bank() -> TempDir {
    let dir = TempDir::new().unwrap();
    add_sinc(&dir);
    lq(dir.path())
        .args([
            "add",
            "--prompt",
            "Where does 1/x go from the right?",
            "--expression",
            "1/x",
            "--point",
            "0",
            "--side",
            "right",
            "-o",
            "0",
            "-o",
            "∞",
            "-o",
            "−∞",
            "--correct",
            "2",
        ])
        .assert()
        .success();
    dir
}

fn add_sinc(dir: &TempDir) {
    lq(dir.path())
        .args([
            "add",
            "--prompt",
            "What is the limit?",
            "--expression",
            "sin(x)/x",
            "--point",
            "0",
            "-o",
            "0",
            "-o",
            "1",
            "--correct",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added question 1: lim x→0 sin(x)/x"));
}

// ---------------------------------------------------------------------------
// add
// ---------------------------------------------------------------------------

#[test]
fn add_writes_versioned_store() {
    let dir = TempDir::new().unwrap();
    add_sinc(&dir);

    let text = fs::read_to_string(store(&dir)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["version"], 1);
    let question = &json["questions"][0];
    assert_eq!(question["kind"], "expression");
    assert_eq!(question["expression"], "sin(x)/x");
    assert_eq!(question["limitPoint"], "0");
    assert_eq!(question["side"], "none");
    assert_eq!(question["answerOptions"], serde_json::json!(["0", "1"]));
    assert_eq!(question["correctAnswer"], "1");
}

#[test]
fn add_rejects_answer_not_among_options() {
    let dir = TempDir::new().unwrap();
    lq(dir.path())
        .args([
            "add", "-p", "Limit?", "-e", "x", "--point", "1", "-o", "1", "-c", "2",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not one of the options"));
    assert!(!store(&dir).exists());
}

#[test]
fn add_rejects_bad_expression_with_diagnostic() {
    let dir = TempDir::new().unwrap();
    lq(dir.path())
        .args([
            "add", "-p", "Limit?", "-e", "sin(x", "--point", "0", "-o", "1", "-c", "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid expression"));
    assert!(!store(&dir).exists());
}

#[test]
fn add_requires_a_stimulus() {
    let dir = TempDir::new().unwrap();
    lq(dir.path())
        .args(["add", "-p", "Limit?", "-o", "1", "-c", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--expression"));
}

#[test]
fn add_image_question() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("graph.png"), b"png").unwrap();
    lq(dir.path())
        .args([
            "add",
            "-p",
            "Read the limit from the graph",
            "--image",
            "graph.png",
            "-o",
            "2",
            "-o",
            "3",
            "-c",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[image] file://"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store(&dir)).unwrap()).unwrap();
    let question = &json["questions"][0];
    assert_eq!(question["kind"], "image");
    assert!(
        question["imageReference"]
            .as_str()
            .unwrap()
            .ends_with("graph.png")
    );
}

#[test]
fn add_uses_store_flag() {
    let dir = TempDir::new().unwrap();
    lq(dir.path())
        .args([
            "--store",
            "custom.json",
            "add",
            "-p",
            "Limit?",
            "--image-ref",
            "https://example.org/g.png",
            "-o",
            "1",
            "-c",
            "1",
        ])
        .assert()
        .success();
    assert!(dir.path().join("custom.json").exists());
    assert!(!store(&dir).exists());
}

// ---------------------------------------------------------------------------
// list / show / remove
// ---------------------------------------------------------------------------

#[test]
fn list_empty() {
    let dir = TempDir::new().unwrap();
    lq(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No questions yet"));
}

#[test]
fn list_shows_questions_in_order() {
    let dir = bank();
    lq(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("What is the limit?")
                .and(predicate::str::contains("Where does 1/x go"))
                .and(predicate::str::contains("2 questions")),
        );
}

#[test]
fn show_hides_answer_unless_revealed() {
    let dir = bank();
    lq(dir.path())
        .args(["show", "2"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("lim x→0⁺ 1/x")
                .and(predicate::str::contains("\\lim_{x \\to 0^{+}} \\frac{1}{x}"))
                .and(predicate::str::contains("✓").not()),
        );

    lq(dir.path())
        .args(["show", "2", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("∞ ✓"));
}

#[test]
fn show_out_of_range() {
    let dir = bank();
    lq(dir.path())
        .args(["show", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("choose 1 to 2"));
}

#[test]
fn remove_keeps_order_of_the_rest() {
    let dir = bank();
    add_third(&dir);

    lq(dir.path())
        .args(["remove", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 questions left"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store(&dir)).unwrap()).unwrap();
    let prompts: Vec<&str> = json["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["prompt"].as_str().unwrap())
        .collect();
    assert_eq!(prompts, ["What is the limit?", "Third"]);
}

fn add_third(dir: &TempDir) {
    lq(dir.path())
        .args([
            "add", "-p", "Third", "-e", "x^2", "--point", "2", "-o", "4", "-c", "4",
        ])
        .assert()
        .success();
}

#[test]
fn corrupt_store_is_set_aside() {
    let dir = TempDir::new().unwrap();
    fs::write(store(&dir), "{ definitely not json").unwrap();

    lq(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No questions yet"))
        .stderr(predicate::str::contains("set aside"));

    assert!(dir.path().join("questions.json.corrupt").exists());
}

#[test]
fn unreadable_store_is_left_untouched() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(store(&dir)).unwrap();

    lq(dir.path())
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("left untouched"));

    lq(dir.path())
        .args(["add", "-p", "Q", "-e", "x", "--point", "0", "-o", "0", "-c", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not be read"));

    assert!(store(&dir).is_dir());
    assert!(!dir.path().join("questions.json.corrupt").exists());
}

#[test]
fn legacy_array_store_is_read() {
    let dir = TempDir::new().unwrap();
    fs::write(
        store(&dir),
        r#"[{"kind":"expression","expression":"1/x","limitPoint":"inf",
             "prompt":"Old question","answerOptions":["0","1"],"correctAnswer":"0"}]"#,
    )
    .unwrap();

    lq(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Old question"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_perfect_game() {
    let dir = bank();
    lq(dir.path())
        .arg("play")
        .write_stdin("2\n∞\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Question 1 / 2 | Score 0")
                .and(predicate::str::contains("Correct!"))
                .and(predicate::str::contains("Final score: 2/2"))
                .and(predicate::str::contains("Impressive!")),
        );
}

#[test]
fn play_partial_game() {
    let dir = bank();
    lq(dir.path())
        .arg("play")
        .write_stdin("2\n1\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("The answer was ∞")
                .and(predicate::str::contains("Final score: 1/2"))
                .and(predicate::str::contains("Well done!")),
        );
}

#[test]
fn play_empty_bank_fails() {
    let dir = TempDir::new().unwrap();
    lq(dir.path())
        .arg("play")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no questions to play"));
}

// ---------------------------------------------------------------------------
// preview / config
// ---------------------------------------------------------------------------

#[test]
fn preview_tabulates_approach() {
    let dir = TempDir::new().unwrap();
    lq(dir.path())
        .args(["preview", "(x^2 - 1)/(x - 1)", "--point", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("lim x→1 (x² − 1)/(x − 1)")
                .and(predicate::str::contains("estimate: ≈ 2")),
        );
}

#[test]
fn preview_reports_syntax_errors() {
    let dir = TempDir::new().unwrap();
    lq(dir.path())
        .args(["preview", "2 * * x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid expression"));
}

#[test]
fn config_file_sets_store_and_domain() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("lq.toml"),
        "store = \"bank.json\"\n[plot]\nstart = 0.0\nstep = 1.0\nsamples = 3\n",
    )
    .unwrap();

    lq(dir.path())
        .args(["preview", "1/x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 points from 0 to 2, 1 undefined"));

    lq(dir.path())
        .args(["add", "-p", "Q", "-e", "x", "--point", "0", "-o", "0", "-c", "0"])
        .assert()
        .success();
    assert!(dir.path().join("bank.json").exists());
    assert!(!store(&dir).exists());
}

#[test]
fn verbose_flag_logs_resolved_configuration() {
    let dir = TempDir::new().unwrap();
    lq(dir.path())
        .env_remove("RUST_LOG")
        .args(["-v", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("resolved configuration"));
}

#[test]
fn invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("lq.toml"), "tip_interval_secs = \"soon\"").unwrap();
    lq(dir.path()).arg("list").assert().failure();

    lq(dir.path())
        .args(["--config", "missing.toml", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
