//! CLI integration tests for the `robolang` binary.
//!
//! Uses `assert_cmd` to spawn the binary and verify exit codes, stdout
//! content, and stderr content. Fixtures are written to temp dirs.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn robolang() -> Command {
    cargo_bin_cmd!("robolang")
}

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

const CELL_KL: &str = r#"
CONST
    N_SLOTS = 8
TYPE
    slot_t = STRUCTURE
        occupied : BOOLEAN   -- part present
        part_id  : STRING[12]
    ENDSTRUCTURE
    rack_t = ARRAY[N_SLOTS] OF slot_t
"#;

const RETRY_TP_JSON: &str = r#"{
  "name": "PICK",
  "instructions": [
    {
      "line_number": 3,
      "kind": {
        "kind": "motion",
        "motion_type": "linear",
        "position": "P[2]",
        "speed": "500mm/sec",
        "termination": "FINE",
        "options": [
          {
            "kind": "skip",
            "label": {
              "number": { "kind": "direct", "number": 1, "comment": null },
              "range": { "start": { "line": 3, "column": 30 }, "end": { "line": 3, "column": 36 } }
            }
          }
        ]
      }
    },
    {
      "line_number": 10,
      "kind": {
        "kind": "label_definition",
        "label": {
          "number": { "kind": "direct", "number": 1, "comment": "Retry" },
          "range": { "start": { "line": 10, "column": 4 }, "end": { "line": 10, "column": 16 } }
        }
      }
    }
  ]
}"#;

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    robolang()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("KAREL and TP language tools"));
}

#[test]
fn version_exits_0() {
    robolang()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("robolang"));
}

// ──────────────────────────────────────────────
// 2. parse
// ──────────────────────────────────────────────

#[test]
fn parse_prints_canonical_form() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_fixture(&dir, "cell.kl", CELL_KL);
    robolang()
        .arg("parse")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("N_SLOTS = 8"))
        .stdout(predicate::str::contains("rack_t = ARRAY[N_SLOTS] OF slot_t"))
        .stdout(predicate::str::contains("part_id : STRING[12]"));
}

#[test]
fn parse_json_output_is_valid_json() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_fixture(&dir, "cell.kl", CELL_KL);
    let output = robolang()
        .args(["--output", "json", "parse"])
        .arg(&file)
        .output()
        .expect("run robolang");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["types"][0]["node"]["identifier"], "slot_t");
    assert_eq!(json["types"][1]["node"]["user_type"]["node"]["kind"], "data");
    assert_eq!(json["constants"][0]["node"]["value"]["node"]["value"], 8);
}

#[test]
fn parse_error_exits_1_with_position() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_fixture(&dir, "bad.kl", "TYPE\n    empty_t = STRUCTURE ENDSTRUCTURE\n");
    robolang()
        .arg("parse")
        .arg(&file)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("2:25: expected identifier"));
}

#[test]
fn parse_error_json_has_line_and_column() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_fixture(&dir, "bad.kl", "TYPE\n    t = ARRAY[2] INTEGER\n");
    let output = robolang()
        .args(["--output", "json", "parse"])
        .arg(&file)
        .output()
        .expect("run robolang");
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).expect("valid JSON");
    assert_eq!(json["line"], 2);
    assert_eq!(json["column"], 18);
    assert_eq!(json["expected"][0], "'OF'");
}

#[test]
fn quiet_suppresses_text_errors() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_fixture(&dir, "bad.kl", "TYPE t =");
    robolang()
        .args(["--quiet", "parse"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::is_empty());
}

#[test]
fn parse_missing_file_exits_1() {
    robolang()
        .args(["parse", "/definitely/not/here.kl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error reading file"));
}

// ──────────────────────────────────────────────
// 3. hover
// ──────────────────────────────────────────────

#[test]
fn hover_prints_label_comment() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_fixture(&dir, "pick.json", RETRY_TP_JSON);
    robolang()
        .arg("hover")
        .arg(&file)
        .args(["--line", "2", "--character", "31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Retry (line 10)"));
}

#[test]
fn hover_json_reports_zero_based_range() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_fixture(&dir, "pick.json", RETRY_TP_JSON);
    let output = robolang()
        .args(["--output", "json", "hover"])
        .arg(&file)
        .args(["--line", "2"])
        .output()
        .expect("run robolang");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["contents"]["kind"], "plaintext");
    assert_eq!(json["range"]["start"]["line"], 9);
    assert_eq!(json["range"]["start"]["character"], 3);
    assert_eq!(json["range"]["end"]["character"], 15);
}

#[test]
fn hover_without_result_is_not_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_fixture(&dir, "pick.json", RETRY_TP_JSON);
    robolang()
        .args(["--output", "json", "hover"])
        .arg(&file)
        .args(["--line", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("null"));
}

#[test]
fn hover_rejects_malformed_program() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_fixture(&dir, "broken.json", "{ \"name\": \"X\" }");
    robolang()
        .arg("hover")
        .arg(&file)
        .args(["--line", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error parsing TP program JSON"));
}
