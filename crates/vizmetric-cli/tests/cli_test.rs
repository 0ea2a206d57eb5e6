//! Integration tests for the `vizmetric` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const WORKBOOK: &str = r#"<?xml version='1.0' encoding='utf-8' ?>
<workbook version='18.1'>
  <worksheets>
    <worksheet name='Sales Overview'>
      <table>
        <view><filter class='categorical' column='[Region]'/></view>
        <rows><column field='[Sales]'/></rows>
        <cols><column field='[SUM(Profit)]'/></cols>
      </table>
    </worksheet>
  </worksheets>
</workbook>"#;

fn vizmetric(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vizmetric"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run vizmetric binary")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "vizmetric failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_single_workbook_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sales.twb"), WORKBOOK).unwrap();

    let output = vizmetric(&["sales.twb"], dir.path());
    let json = stdout_json(&output);
    assert_eq!(json["summary"]["overall_score"], 2.3);
    assert_eq!(json["worksheets"][0]["name"], "Sales Overview");
    assert_eq!(json["worksheets"][0]["mark_types"][0], "bar");
}

#[test]
fn test_single_workbook_csv_with_sidecars() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sales.twb"), WORKBOOK).unwrap();

    let output = vizmetric(&["sales.twb", "--out", "report.csv"], dir.path());
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Wrote 1 worksheet rows"));

    assert!(dir.path().join("report.csv").exists());
    assert!(dir.path().join("report_summary.json").exists());
    assert!(dir.path().join("report_summary.csv").exists());
}

#[test]
fn test_directory_with_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let books = dir.path().join("books");
    fs::create_dir_all(books.join("archive")).unwrap();
    fs::write(books.join("sales.twb"), WORKBOOK).unwrap();
    fs::write(books.join("broken.twb"), "<workbook>").unwrap();
    fs::write(books.join("archive").join("old.twb"), WORKBOOK).unwrap();

    let output = vizmetric(&["books", "--corpus", "--recursive"], dir.path());
    let corpus = stdout_json(&output);
    assert_eq!(corpus["num_workbooks"], 3);
    assert_eq!(corpus["errors_count"], 1);
    assert_eq!(corpus["total_sheets"], 2);
    assert_eq!(corpus["top_mark_types"][0][0], "bar");
}

#[test]
fn test_directory_tsv_output() {
    let dir = tempfile::tempdir().unwrap();
    let books = dir.path().join("books");
    fs::create_dir_all(&books).unwrap();
    fs::write(books.join("sales.twb"), WORKBOOK).unwrap();

    let output = vizmetric(&["books", "-o", "all.tsv", "--corpus"], dir.path());
    assert!(output.status.success());

    let rows = fs::read_to_string(dir.path().join("all.tsv")).unwrap();
    assert!(rows.starts_with("workbook\tname\tmark_types"));
    assert!(rows.contains("sales.twb\tSales Overview\tbar"));
    assert!(dir.path().join("all_summaries.tsv").exists());
    assert!(dir.path().join("all_corpus.json").exists());
}

#[test]
fn test_config_file_changes_weights() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sales.twb"), WORKBOOK).unwrap();
    fs::write(dir.path().join("weights.toml"), "[weights]\nfilters = 0.0\n").unwrap();

    let output = vizmetric(&["sales.twb", "--config", "weights.toml"], dir.path());
    let json = stdout_json(&output);
    assert_eq!(json["worksheets"][0]["complexity_score"], 1.7);
}

#[test]
fn test_unsupported_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "hello").unwrap();

    let output = vizmetric(&["notes.txt"], dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Use .twb or .twbx"));
}

#[test]
fn test_unsupported_output_extension_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sales.twb"), WORKBOOK).unwrap();

    let output = vizmetric(&["sales.twb", "--out", "report.xlsx"], dir.path());
    assert!(!output.status.success());
    assert!(!dir.path().join("report.xlsx").exists());
}
