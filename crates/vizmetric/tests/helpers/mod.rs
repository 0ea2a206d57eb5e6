//! Shared fixtures for integration tests.
//!
//! Workbooks are built in memory so the tests do not depend on checked-in Tableau files.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::{FileOptions, ZipWriter};

/// Wrap worksheet markup in a minimal workbook document.
pub fn workbook(datasources: &str, worksheets: &str) -> String {
    format!(
        r#"<?xml version='1.0' encoding='utf-8' ?>
<workbook source-build='2023.1.0' version='18.1' xmlns:user='http://www.tableausoftware.com/xml/user'>
  <datasources>{datasources}</datasources>
  <worksheets>{worksheets}</worksheets>
</workbook>"#
    )
}

/// One sheet with a filter, `[Sales]` on rows and `[SUM(Profit)]` on columns.
pub fn sales_workbook() -> String {
    workbook(
        "",
        r#"<worksheet name='Sales Overview'>
      <table>
        <view>
          <filter class='categorical' column='[federated].[Region]'/>
        </view>
        <rows><column field='[Sales]'/></rows>
        <cols><column field='[SUM(Profit)]'/></cols>
      </table>
    </worksheet>"#,
    )
}

/// Zip `entries` into an in-memory `.twbx`.
pub fn twbx_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut zip = ZipWriter::new(&mut cursor);
        let options = FileOptions::<'_, ()>::default();

        for (name, content) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }

        zip.finish().unwrap();
    }
    cursor.into_inner()
}

pub fn write_file(dir: &Path, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}
