use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn seqcfg(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_seqcfg"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run seqcfg")
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

#[test]
fn test_check_accepts_valid_search_file() {
    let dir = TempDir::new().unwrap();
    let file = write(
        dir.path(),
        "search.toml",
        r#"
domain = "search"

[[element]]
kind = "max_error"
total = 3

[[element]]
kind = "output"
output = "index_cursor"
"#,
    );

    let output = seqcfg(dir.path(), &["check", &file]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("search configuration is valid (2 elements)"));
    assert!(stdout.contains("index_cursor"));
}

#[test]
fn test_check_rejects_incompatible_limits() {
    let dir = TempDir::new().unwrap();
    let file = write(
        dir.path(),
        "search.toml",
        r#"
domain = "search"

[[element]]
kind = "max_error_rate"
total = 0.05

[[element]]
kind = "max_error"
substitution = 1
"#,
    );

    let output = seqcfg(dir.path(), &["check", &file]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("`max_error_rate` cannot be combined with `max_error`"));
    assert!(stderr.contains("seqcfg table --domain"));
}

#[test]
fn test_check_json_output() {
    let dir = TempDir::new().unwrap();
    let file = write(
        dir.path(),
        "align.toml",
        r#"
domain = "alignment"

[[element]]
kind = "scoring"
match_score = 2
mismatch_score = -3

[[element]]
kind = "global"
"#,
    );

    let output = seqcfg(dir.path(), &["check", &file, "--format", "json"]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["domain"], "alignment");
    assert_eq!(report["elements"], serde_json::json!(["scoring", "global"]));
    assert_eq!(report["settings"]["global"], true);
    assert_eq!(report["settings"]["gap"]["open"], -10);
}

#[test]
fn test_config_file_enables_conflict_listing() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "seqcfg.toml",
        "[check]\nreport_all_conflicts = true\nshow_settings = false\n",
    );
    let file = write(
        dir.path(),
        "search.toml",
        r#"
domain = "search"

[[element]]
kind = "mode"
mode = "best"

[[element]]
kind = "mode"
mode = "all"

[[element]]
kind = "max_error"
total = 1

[[element]]
kind = "max_error_rate"
total = 0.1
"#,
    );

    let output = seqcfg(dir.path(), &["check", &file]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("element #2"));
    assert!(stderr.contains("element #4"));
}

#[test]
fn test_missing_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let output = seqcfg(dir.path(), &["check", "does-not-exist.toml"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("File not found"));
}

#[test]
fn test_example_output_checks_clean() {
    let dir = TempDir::new().unwrap();
    for domain in ["alignment", "search"] {
        let example = seqcfg(dir.path(), &["example", "--domain", domain]);
        assert!(example.status.success());

        let file = write(
            dir.path(),
            &format!("{}.toml", domain),
            &String::from_utf8_lossy(&example.stdout),
        );
        let output = seqcfg(dir.path(), &["check", &file]);
        assert!(output.status.success(), "{} example failed", domain);
    }
}

#[test]
fn test_table_and_kinds() {
    let dir = TempDir::new().unwrap();

    let table = seqcfg(dir.path(), &["table", "--domain", "search"]);
    assert!(table.status.success());
    assert!(String::from_utf8_lossy(&table.stdout).contains("max_error / max_error_rate"));

    let kinds = seqcfg(dir.path(), &["kinds", "--domain", "alignment", "--format", "json"]);
    assert!(kinds.status.success());
    let entries: serde_json::Value = serde_json::from_slice(&kinds.stdout).unwrap();
    assert_eq!(entries.as_array().map(Vec::len), Some(7));
    assert_eq!(entries[6]["name"], "scoring");
}

#[test]
fn test_config_example_written_to_file() {
    let dir = TempDir::new().unwrap();
    let output = seqcfg(dir.path(), &["config", "--example", "--output", "seqcfg.toml"]);
    assert!(output.status.success());

    let written = fs::read_to_string(dir.path().join("seqcfg.toml")).unwrap();
    assert!(written.contains("[check]"));
    assert!(written.contains("show_settings = true"));
}

#[test]
fn test_quiet_keeps_reports_and_silences_logs() {
    let dir = TempDir::new().unwrap();

    let output = seqcfg(dir.path(), &["-q", "-vv", "table", "--domain", "search"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("search compatibility"));
    assert!(output.stderr.is_empty());

    let help = seqcfg(dir.path(), &["--help"]);
    assert!(String::from_utf8_lossy(&help.stdout).contains("Only log errors"));
}
