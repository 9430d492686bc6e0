#![allow(clippy::unwrap_used, clippy::non_ascii_literal)]
//! Integration tests for the `langcheck` command dispatch.
//!
//! These tests cover:
//! - Default command and argument parsing
//! - Language check exit status and JSON output
//! - Syntax check over the standard layout
//! - Repair dry run and `--write`
//! - YAML configuration with relative paths
//! - Single-record classification

use std::fs;
use std::path::Path;

use clap::Parser;
use langcheck_cli::cli::{Cli, Command, EXIT_FINDINGS, EXIT_OK, OutputFormat, run};
use tempfile::TempDir;

const EN_RECORD: &str = r#"{"sections": [{"title": "Concept", "body": "A relaxed beachside cafe known for its specialty coffee and long brunches."}]}"#;
const ZH_RECORD: &str =
    r#"{"sections": [{"title": "概念与氛围", "body": "这是一家位于海边的精品咖啡馆，提供手冲咖啡和早午餐。"}]}"#;

fn write_record(root: &Path, code: &str, id: &str, content: &str) {
    let dir = root.join(code).join("descriptions");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{id}.json")), content).unwrap();
}

fn run_args(args: &[&str]) -> (u8, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut buf = Vec::new();
    let code = run(&cli, &mut buf).unwrap();
    (code, String::from_utf8(buf).unwrap())
}

#[test]
fn test_parse_defaults() {
    let cli = Cli::try_parse_from(["langcheck"]).unwrap();
    assert!(cli.command.is_none());
    assert_eq!(cli.root, Path::new("public/locales"));
    assert_eq!(cli.format, OutputFormat::Human);
    assert_eq!(cli.verbose, 0);

    let cli = Cli::try_parse_from(["langcheck", "repair", "--write", "-vv"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Repair { write: true })));
    assert_eq!(cli.verbose, 2);
}

#[test]
fn test_languages_ok_and_mismatch_exit_codes() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_str().unwrap();
    for code in ["zh", "en", "ru", "ko"] {
        fs::create_dir_all(tmp.path().join(code).join("descriptions")).unwrap();
    }
    write_record(tmp.path(), "zh", "venue", ZH_RECORD);
    write_record(tmp.path(), "en", "venue", EN_RECORD);

    let (code, output) = run_args(&["langcheck", "--root", root, "languages"]);
    assert_eq!(code, EXIT_OK, "got: {output}");
    assert!(output.contains("Records checked:  2"));

    write_record(tmp.path(), "zh", "copy", EN_RECORD);
    let (code, output) = run_args(&["langcheck", "--root", root, "--format", "json"]);
    assert_eq!(code, EXIT_FINDINGS);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["findings"][0]["record_id"], "copy");
    assert_eq!(json["findings"][0]["detected"], "english");
    assert_eq!(json["findings"][0]["expected"], "chinese");
    assert_eq!(json["findings"][0]["kind"], "LanguageMismatch");
}

#[test]
fn test_syntax_command() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_str().unwrap();
    write_record(tmp.path(), "en", "good", EN_RECORD);
    write_record(tmp.path(), "en", "bad", "{\"sections\": [}");

    let (code, output) = run_args(&["langcheck", "syntax", "--root", root]);
    assert_eq!(code, EXIT_FINDINGS);
    assert!(output.contains("en/bad"), "got: {output}");
    assert!(output.contains("EN: 1/2 passed (50.0%)"), "got: {output}");
}

#[test]
fn test_repair_dry_run_then_write() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_str().unwrap();
    let broken = "{\u{201C}sections\u{201D}: [{\u{201C}title\u{201D}: \u{201C}\u{7ED3}\u{8BBA}\u{201D}, \u{201C}body\u{201D}: \u{201C}\u{5FC5}\u{53BB}\u{201D}}]}";
    write_record(tmp.path(), "zh", "venue", broken);
    let path = tmp.path().join("zh").join("descriptions").join("venue.json");

    let (code, output) = run_args(&["langcheck", "repair", "--root", root]);
    assert_eq!(code, EXIT_OK);
    assert!(output.contains("zh/venue: would repair (1 sections)"), "got: {output}");
    assert_eq!(fs::read_to_string(&path).unwrap(), broken, "dry run must not write");

    let (code, output) = run_args(&["langcheck", "repair", "--write", "--root", root]);
    assert_eq!(code, EXIT_OK);
    assert!(output.contains("zh/venue: repaired (1 sections)"), "got: {output}");
    let repaired: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(repaired["sections"][0]["title"], "\u{7ED3}\u{8BBA}");

    let (_, output) = run_args(&["langcheck", "repair", "--root", root]);
    assert!(output.contains("No broken records found"), "got: {output}");
}

#[test]
fn test_repair_reports_unrepairable() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_str().unwrap();
    write_record(tmp.path(), "ko", "junk", "<html>not a record</html>");

    let (code, output) = run_args(&["langcheck", "repair", "--root", root, "--format", "json"]);
    assert_eq!(code, EXIT_FINDINGS);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json[0]["record_id"], "junk");
    assert_eq!(json[0]["status"], "failed");
}

#[test]
fn test_yaml_config_relative_paths() {
    let tmp = TempDir::new().unwrap();
    write_record(tmp.path(), "en", "venue", EN_RECORD);
    let config_path = tmp.path().join("langcheck.yaml");
    fs::write(
        &config_path,
        "directories:\n  - name: english\n    path: en/descriptions\n    expected: en\n",
    )
    .unwrap();

    let (code, output) = run_args(&[
        "langcheck",
        "--config",
        config_path.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert_eq!(code, EXIT_OK, "got: {output}");
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["directories"][0]["directory"], "english");
    assert_eq!(json["checked_records"], 1);
}

#[test]
fn test_missing_config_file_is_error() {
    let cli = Cli::try_parse_from(["langcheck", "--config", "/definitely/not/here.yaml"]).unwrap();
    let mut buf = Vec::new();
    let err = run(&cli, &mut buf).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read config file"));
}

#[test]
fn test_classify_record_file() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("record.json");
    fs::write(&file, ZH_RECORD).unwrap();

    let (code, output) = run_args(&[
        "langcheck",
        "classify",
        file.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert_eq!(code, EXIT_OK);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["tag"], "chinese");
    assert_eq!(json["counts"]["latin"], 0);

    fs::write(&file, "{").unwrap();
    let (code, _) = run_args(&["langcheck", "classify", file.to_str().unwrap()]);
    assert_eq!(code, EXIT_FINDINGS);
}

#[test]
fn test_classify_parse_error_stays_json() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("record.json");
    fs::write(&file, "{\"sections\": [").unwrap();

    let (code, output) = run_args(&[
        "langcheck",
        "classify",
        file.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert_eq!(code, EXIT_FINDINGS);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["tag"], "error");
    assert_eq!(json["error"]["category"], "eof");
    assert!(json.get("counts").is_none());
}

#[test]
fn test_classify_rejects_invalid_thresholds() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("record.json");
    fs::write(&file, ZH_RECORD).unwrap();
    let config_path = tmp.path().join("langcheck.yaml");
    fs::write(&config_path, "classifier:\n  script_share_percent: 0\n").unwrap();

    let cli = Cli::try_parse_from([
        "langcheck",
        "--config",
        config_path.to_str().unwrap(),
        "classify",
        file.to_str().unwrap(),
    ])
    .unwrap();
    let mut buf = Vec::new();
    let err = run(&cli, &mut buf).unwrap_err();
    assert!(format!("{err:#}").contains("script share must be between 1 and 99 percent"));
}
