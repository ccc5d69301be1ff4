//! CLI tests for the `stepdoc` binary.
//!
//! Spawns the binary in a temporary directory and checks stdout, written
//! files and exit codes.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use stepdoc::exit_codes;
use stepdoc::test_support::RECIPE;
use stepdoc::validate::validate_document_str;

const TIMESTAMP: &str = "2024-05-01T12:30:00+02:00";

fn stepdoc(dir: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_stepdoc"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn stepdoc");
    // The child may exit (e.g. on a usage error) before reading stdin.
    if let Err(err) = child.stdin.take().expect("stdin").write_all(stdin.as_bytes()) {
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe, "write stdin: {err}");
    }
    child.wait_with_output().expect("wait stepdoc")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf-8 stdout")
}

#[test]
fn render_xml_from_stdin() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = stepdoc(temp.path(), &["render", "--timestamp", TIMESTAMP], RECIPE);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let xml = stdout_of(&output);
    assert!(xml.contains(r#"CreatedAt="2024-05-01T12:30:00+02:00""#));
    assert!(xml.contains("<Details>Preheat oven</Details>"));
    assert!(xml.contains("<StepRef>2</StepRef>"));
}

#[test]
fn render_json_to_file_validates() {
    let temp = tempfile::tempdir().expect("tempdir");
    let input = temp.path().join("notes.txt");
    fs::write(&input, RECIPE).expect("write input");

    let output = stepdoc(
        temp.path(),
        &[
            "render",
            "notes.txt",
            "--format",
            "json",
            "--title",
            "Cake",
            "--keyword",
            "Task",
            "--timestamp",
            TIMESTAMP,
            "-o",
            "out/doc.json",
        ],
        "",
    );
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(stdout_of(&output).is_empty());

    let raw = fs::read_to_string(temp.path().join("out/doc.json")).expect("read output");
    let doc = validate_document_str(&raw).expect("valid document");
    assert_eq!(doc.title, "Cake");
    assert_eq!(doc.steps[0].title, "Task 1");
    assert_eq!(doc.steps[2].dependencies, vec![2]);

    let validated = stepdoc(temp.path(), &["validate", "out/doc.json"], "");
    assert_eq!(validated.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout_of(&validated), "ok: 3 steps\n");
}

#[test]
fn render_with_manual_dependencies() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = stepdoc(
        temp.path(),
        &["render", "--format", "json", "--depends", "2=1", "--timestamp", TIMESTAMP],
        RECIPE,
    );
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let doc = validate_document_str(&stdout_of(&output)).expect("valid");
    assert_eq!(doc.steps[1].dependencies, vec![1]);
    assert!(doc.steps[2].dependencies.is_empty());
}

#[test]
fn render_rejects_forward_manual_dependency() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = stepdoc(temp.path(), &["render", "--depends", "1=2"], RECIPE);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("step 1: dependency 2"));
}

#[test]
fn render_rejects_blank_title_and_keyword() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = stepdoc(
        temp.path(),
        &["render", "--title", "", "--format", "json", "-o", "doc.json"],
        RECIPE,
    );
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("title must not be blank"));
    assert!(!temp.path().join("doc.json").exists());

    let output = stepdoc(temp.path(), &["demo", "--keyword", "  "], "");
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("step_keyword must not be blank"));
}

#[test]
fn render_without_dependencies() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = stepdoc(
        temp.path(),
        &["render", "--no-dependencies", "--format", "markdown", "--timestamp", TIMESTAMP],
        RECIPE,
    );
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let md = stdout_of(&output);
    assert!(md.contains("3. **Step 3**: Add eggs after flour and sugar were mixed\n"));
    assert!(!md.contains("depends on"));
}

#[test]
fn segment_and_deps_print_plain_lines() {
    let temp = tempfile::tempdir().expect("tempdir");
    let text = "Collect tools\nSand the board\nafter sanding, paint and see step 1";

    let segmented = stepdoc(temp.path(), &["segment"], text);
    assert_eq!(
        stdout_of(&segmented),
        "1\tCollect tools\n2\tSand the board\n3\tafter sanding, paint and see step 1\n"
    );

    let deps = stepdoc(temp.path(), &["deps", "-"], text);
    assert_eq!(stdout_of(&deps), "3: 1, 2\n");
}

#[test]
fn config_file_supplies_language_and_rules() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(
        temp.path().join("stepdoc.toml"),
        "language = \"de\"\n\n[[triggers]]\npattern = '(?i)\\bdanach\\b'\neffect = \"preceding-step\"\n",
    )
    .expect("write config");

    let deps = stepdoc(
        temp.path(),
        &["deps"],
        "Teig kneten\ndanach ruhen lassen\nSchritt 1 wiederholen",
    );
    assert_eq!(deps.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout_of(&deps), "2: 1\n3: 1\n");

    let english = stepdoc(
        temp.path(),
        &["deps", "--language", "en"],
        "Knead\nafter kneading, rest\nSchritt 1 again",
    );
    assert_eq!(stdout_of(&english), "2: 1\n");
}

#[test]
fn missing_explicit_config_is_an_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = stepdoc(temp.path(), &["segment", "--config", "nope.toml"], "a");
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
}

#[test]
fn demo_renders_german_recipe() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = stepdoc(temp.path(), &["demo", "--timestamp", TIMESTAMP], "");
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let xml = stdout_of(&output);
    assert!(xml.contains(r#"<Anleitung Titel="Kuchenrezept""#));
    assert!(xml.contains("4 Schritte erkannt."));
    assert!(xml.contains("<Titel>Aufgabe 1</Titel>"));
    assert!(xml.contains("<Details>Backofen auf 180 Grad vorheizen</Details>"));
    assert_eq!(xml.matches("<SchrittRef>").count(), 2);
}

#[test]
fn unknown_format_is_a_usage_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = stepdoc(temp.path(), &["render", "--format", "yaml"], RECIPE);
    assert_eq!(output.status.code(), Some(exit_codes::USAGE));
}

#[test]
fn validate_reports_invalid_document() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("bad.json"), r#"{"title":"x"}"#).expect("write");
    let output = stepdoc(temp.path(), &["validate", "bad.json"], "");
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
}
