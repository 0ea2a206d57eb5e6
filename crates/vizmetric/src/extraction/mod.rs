//! Document loading: container handling, decoding and the markup tree adapter.
//!
//! - [`archive`] pulls the `.twb` document out of a packaged `.twbx`
//! - [`source`] turns file bytes into owned, decoded markup
//! - [`xml`] exposes the parsed markup through a namespace-agnostic node API

pub mod archive;
pub mod source;
pub mod xml;

pub use source::{WorkbookSource, load_workbook_bytes, load_workbook_file};
pub use xml::{WorkbookDocument, XmlNode};
