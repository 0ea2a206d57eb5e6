//! Packaged workbook (`.twbx`) integration tests.

use vizmetric::core::config::AnalysisConfig;
use vizmetric::extraction::archive::read_twb_from_twbx;
use vizmetric::extraction::{load_workbook_bytes, load_workbook_file};
use vizmetric::{VizmetricError, WorkbookFormat, analyze_file, analyze_file_outcome};

mod helpers;
use helpers::{sales_workbook, twbx_bytes, workbook, write_file};

#[test]
fn test_twbx_matches_bare_twb() {
    let dir = tempfile::tempdir().unwrap();
    let xml = sales_workbook();
    let twb = write_file(dir.path(), "sales.twb", &xml);
    let twbx = write_file(
        dir.path(),
        "sales.twbx",
        twbx_bytes(&[
            ("Data/Extracts/orders.hyper", "\u{0}\u{1}binary"),
            ("Sales.twb", xml.as_str()),
        ]),
    );

    let config = AnalysisConfig::default();
    let bare = analyze_file(&twb, &config).unwrap();
    let packaged = analyze_file(&twbx, &config).unwrap();
    assert_eq!(bare, packaged);
}

#[test]
fn test_first_twb_entry_wins() {
    let first = workbook("", "<worksheet name='First'/>");
    let second = workbook("", "<worksheet name='Second'/>");
    let bytes = twbx_bytes(&[
        ("Image/logo.png", "png"),
        ("nested/First.TWB", first.as_str()),
        ("Second.twb", second.as_str()),
    ]);

    let packaged = read_twb_from_twbx(&bytes).unwrap();
    assert_eq!(packaged.entry_name, "nested/First.TWB");

    let source = load_workbook_bytes(&bytes, WorkbookFormat::Twbx).unwrap();
    let doc = source.parse().unwrap();
    let records = vizmetric::analyze(&doc);
    assert_eq!(records[0].name, "First");
}

#[test]
fn test_twbx_without_workbook_is_unsupported_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "extract-only.twbx",
        twbx_bytes(&[("Data/orders.hyper", "data"), ("workbook.twbr", "<workbook/>")]),
    );

    let err = load_workbook_file(&path).unwrap_err();
    assert!(matches!(err, VizmetricError::UnsupportedFormat(_)));
    assert!(err.to_string().contains("No .twb found inside the .twbx archive"));

    let outcome = analyze_file_outcome(&path, &AnalysisConfig::default());
    assert_eq!(outcome.workbook, "extract-only.twbx");
    assert!(outcome.worksheets.is_empty());
    assert_eq!(outcome.summary.sheet_count, 0);
    assert_eq!(outcome.error.unwrap().error_type, "unsupported_format");
}

#[test]
fn test_corrupt_twbx_is_parsing_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "corrupt.twbx", b"PK\x03\x04 definitely not a zip");

    let err = analyze_file(&path, &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, VizmetricError::Parsing { .. }));
}

#[test]
fn test_twbx_with_malformed_inner_markup() {
    let bytes = twbx_bytes(&[("Broken.twb", "<workbook><worksheets>")]);
    let source = load_workbook_bytes(&bytes, WorkbookFormat::Twbx).unwrap();
    assert_eq!(source.entry_name.as_deref(), Some("Broken.twb"));
    assert!(matches!(source.parse(), Err(VizmetricError::Parsing { .. })));
}
