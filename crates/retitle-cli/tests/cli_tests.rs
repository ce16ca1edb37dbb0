//! Integration tests for the retitle CLI
//!
//! These tests invoke the actual `retitle` binary and verify:
//! - Exit codes (0 = success, 1 = titles left duplicated, 2 = error)
//! - stdout/stderr output
//! - JSON output format
//! - The written import file

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

// ── Helpers ───────────────────────────────────────────────

fn retitle_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_retitle"))
}

fn run_retitle(args: &[&str]) -> std::process::Output {
    Command::new(retitle_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute retitle")
}

fn write_export(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("export.csv");
    std::fs::write(&path, contents).expect("write export");
    path
}

fn read_output(path: &Path) -> String {
    std::fs::read_to_string(path).expect("read output")
}

const EXPORT: &str = "\
Handle,Title,Variant SKU
leggings-black-1,Black Leggings,L1
leggings-black-1,,L1-M
leggings-black-2,Women's Black Leggings,L2
yoga-pants-alex,Women's Yoga Pants Khaki - Alex,Y1
alpha-leggings-white,White Leggings,W1
beta-leggings-white,White Leggings,W2
gym-shorts,Khaki Gym Shorts,G1
";

// ── Version ───────────────────────────────────────────────

#[test]
fn test_version_command() {
    let output = run_retitle(&["version"]);
    assert!(output.status.success(), "version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("retitle"), "should contain 'retitle'");
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "should contain version"
    );
    assert!(
        stdout.contains(&format!("retitle-core {}", retitle_core::VERSION)),
        "should report the library version"
    );
}

#[test]
fn test_version_flag() {
    let output = run_retitle(&["--version"]);
    assert!(output.status.success(), "--version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

// ── Transform ─────────────────────────────────────────────

#[test]
fn test_transform_writes_import_file() {
    let dir = TempDir::new().unwrap();
    let input = write_export(&dir, EXPORT);
    let out = dir.path().join("import.csv");

    let output = run_retitle(&[
        "transform",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "transform should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Wrote 6 products"), "stdout: {}", stdout);

    assert_eq!(
        read_output(&out),
        "\
Handle,Title
leggings-black-1,Leggings Black 1
leggings-black-2,Leggings Black 2
yoga-pants-alex,Yoga Pants Alex
alpha-leggings-white,Leggings White Alpha
beta-leggings-white,Leggings White Beta
gym-shorts,Gym Shorts Khaki
"
    );
}

#[test]
fn test_transform_json_stats() {
    let dir = TempDir::new().unwrap();
    let input = write_export(&dir, EXPORT);
    let out = dir.path().join("import.csv");

    let output = run_retitle(&[
        "transform",
        "--json",
        input.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("should be valid JSON");
    assert_eq!(json["input_rows"], 7);
    assert_eq!(json["skipped_empty"], 1);
    assert_eq!(json["products"], 6);
    assert_eq!(json["collided_titles"], 2);
    assert_eq!(json["tiers"]["first_segment"], 1);
    assert_eq!(json["unresolved"], serde_json::json!([]));
}

#[test]
fn test_transform_quiet() {
    let dir = TempDir::new().unwrap();
    let input = write_export(&dir, EXPORT);
    let out = dir.path().join("import.csv");

    let output = run_retitle(&[
        "--quiet",
        "transform",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty(), "quiet mode should produce no stdout");
    assert!(out.exists());
}

#[test]
fn test_transform_unresolved_exits_1() {
    let dir = TempDir::new().unwrap();
    let input = write_export(
        &dir,
        "Handle,Title\nalpha-black,Black Leggings\nalpha-leggings-black,Black Leggings\n",
    );
    let out = dir.path().join("import.csv");

    let output = run_retitle(&["transform", input.to_str().unwrap(), "-o", out.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1), "duplicates should exit 1");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("still duplicated: Leggings Black Alpha"));
    // The file is still written
    assert_eq!(
        read_output(&out),
        "Handle,Title\nalpha-black,Leggings Black Alpha\nalpha-leggings-black,Leggings Black Alpha\n"
    );
}

#[test]
fn test_transform_strict_resolves() {
    let dir = TempDir::new().unwrap();
    let input = write_export(
        &dir,
        "Handle,Title\nalpha-black,Black Leggings\nalpha-leggings-black,Black Leggings\n",
    );
    let out = dir.path().join("import.csv");

    let output = run_retitle(&[
        "transform",
        "--strict",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "strict should exit 0");
    assert_eq!(
        read_output(&out),
        "Handle,Title\n\
         alpha-black,Leggings Black Alpha alpha-black\n\
         alpha-leggings-black,Leggings Black Alpha alpha-leggings-black\n"
    );
}

#[test]
fn test_transform_custom_columns() {
    let dir = TempDir::new().unwrap();
    let input = write_export(&dir, "slug,name\ngym-shorts,Khaki Gym Shorts\n");
    let out = dir.path().join("import.csv");

    let output = run_retitle(&[
        "transform",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "--handle-column",
        "slug",
        "--title-column",
        "name",
    ]);
    assert!(output.status.success());
    assert_eq!(read_output(&out), "Handle,Title\ngym-shorts,Gym Shorts Khaki\n");
}

#[test]
fn test_transform_missing_column_exits_2() {
    let dir = TempDir::new().unwrap();
    let input = write_export(&dir, "Handle,Name\ngym-shorts,Khaki Gym Shorts\n");
    let out = dir.path().join("import.csv");

    let output = run_retitle(&["transform", input.to_str().unwrap(), "-o", out.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing column 'Title'"), "stderr: {}", stderr);
}

#[test]
fn test_transform_nonexistent_file() {
    let output = run_retitle(&["transform", "nonexistent.csv"]);
    assert_eq!(output.status.code(), Some(2), "missing file should exit 2");
}

// ── Title ─────────────────────────────────────────────────

#[test]
fn test_title_command() {
    let output = run_retitle(&[
        "title",
        "White-Green Leggings",
        "Women's Yoga Pants Khaki - Alex",
        "Women's Tote Bag",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "Leggings White-Green\nYoga Pants Alex\nTote Bag\n");
}

#[test]
fn test_title_with_custom_vocabulary() {
    let dir = TempDir::new().unwrap();
    let vocab = dir.path().join("vocab.json");
    std::fs::write(&vocab, r#"{"tokens": ["Navy"]}"#).unwrap();

    let output = run_retitle(&[
        "title",
        "--vocabulary",
        vocab.to_str().unwrap(),
        "Navy Swim Top",
        "Khaki Gym Shorts",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "Swim Top Navy\nKhaki Gym Shorts\n");
}

// ── Vocabulary ────────────────────────────────────────────

#[test]
fn test_vocabulary_lists_longest_first() {
    let output = run_retitle(&["vocabulary"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 21);
    assert_eq!(lines[0], "Leopard Print");
    assert_eq!(lines[20], "Red");
}

#[test]
fn test_vocabulary_json() {
    let output = run_retitle(&["vocabulary", "--json"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("should be valid JSON");
    assert_eq!(json["tokens"][0], "Leopard Print");
}

#[test]
fn test_vocabulary_invalid_file_exits_2() {
    let dir = TempDir::new().unwrap();
    let vocab = dir.path().join("vocab.json");
    std::fs::write(&vocab, r#"{"tokens": ["Red", "red"]}"#).unwrap();

    let output = run_retitle(&["vocabulary", "--vocabulary", vocab.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("duplicate token"), "stderr: {}", stderr);
}
