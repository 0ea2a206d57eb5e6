//! Error types for vizmetric.
//!
//! Only complete unreadability of an input produces an error. Schema variance inside a
//! workbook that parses (missing attributes, absent shelves, empty field sets) always resolves
//! to a documented default instead.
//!
//! - `Io` - File system errors, surfaced unchanged
//! - `UnsupportedFormat` - Unsupported file extension, or a `.twbx` with no inner `.twb`
//! - `Parsing` - Malformed markup or a corrupt archive
//! - `Validation` - Invalid configuration, paths or parameters
//! - `Serialization` - JSON/CSV encoding failures in the output writers
//!
//! # Example
//!
//! ```rust
//! use vizmetric::{Result, VizmetricError};
//!
//! fn read_markup(path: &str) -> Result<String> {
//!     let content = std::fs::read_to_string(path)?;
//!
//!     if content.trim().is_empty() {
//!         return Err(VizmetricError::parsing(format!("Workbook is empty: {}", path)));
//!     }
//!
//!     Ok(content)
//! }
//! ```
use thiserror::Error;

/// Result type alias using `VizmetricError`.
pub type Result<T> = std::result::Result<T, VizmetricError>;

/// Main error type for all vizmetric operations.
#[derive(Debug, Error)]
pub enum VizmetricError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for VizmetricError {
    fn from(err: serde_json::Error) -> Self {
        VizmetricError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<csv::Error> for VizmetricError {
    fn from(err: csv::Error) -> Self {
        VizmetricError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<roxmltree::Error> for VizmetricError {
    fn from(err: roxmltree::Error) -> Self {
        VizmetricError::Parsing {
            message: format!("Malformed workbook markup: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl VizmetricError {
    error_constructor!(parsing, Parsing);
    error_constructor!(validation, Validation);
    error_constructor!(serialization, Serialization);

    /// Short machine-friendly kind name, used in per-workbook error records.
    pub fn kind(&self) -> &'static str {
        match self {
            VizmetricError::Io(_) => "io",
            VizmetricError::Parsing { .. } => "parsing",
            VizmetricError::Validation { .. } => "validation",
            VizmetricError::Serialization { .. } => "serialization",
            VizmetricError::UnsupportedFormat(_) => "unsupported_format",
            VizmetricError::Other(_) => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VizmetricError = io_err.into();
        assert!(matches!(err, VizmetricError::Io(_)));
        assert!(err.to_string().contains("IO error"));
        assert_eq!(err.kind(), "io");
    }

    #[test]
    fn test_parsing_error() {
        let err = VizmetricError::parsing("invalid markup");
        assert_eq!(err.to_string(), "Parsing error: invalid markup");
        assert_eq!(err.kind(), "parsing");
    }

    #[test]
    fn test_parsing_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad data");
        let err = VizmetricError::parsing_with_source("invalid markup", source);
        assert_eq!(err.to_string(), "Parsing error: invalid markup");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_validation_error() {
        let err = VizmetricError::validation("not a directory");
        assert_eq!(err.to_string(), "Validation error: not a directory");
    }

    #[test]
    fn test_serialization_error_with_source() {
        let source = std::io::Error::other("broken pipe");
        let err = VizmetricError::serialization_with_source("CSV write failed", source);
        assert_eq!(err.to_string(), "Serialization error: CSV write failed");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_unsupported_format_error() {
        let err = VizmetricError::UnsupportedFormat("Use .twb or .twbx".to_string());
        assert_eq!(err.to_string(), "Unsupported format: Use .twb or .twbx");
        assert_eq!(err.kind(), "unsupported_format");
    }

    #[test]
    fn test_roxmltree_error_conversion() {
        let xml_err = roxmltree::Document::parse("<workbook><worksheet></workbook>").unwrap_err();
        let err: VizmetricError = xml_err.into();
        assert!(matches!(err, VizmetricError::Parsing { .. }));
        assert!(err.to_string().contains("Malformed workbook markup"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: VizmetricError = json_err.into();
        assert!(matches!(err, VizmetricError::Serialization { .. }));
    }

    #[test]
    fn test_io_error_bubbles_unchanged() {
        fn read_file() -> Result<String> {
            let content = std::fs::read_to_string("/nonexistent/workbook.twb")?;
            Ok(content)
        }

        let result = read_file();
        assert!(matches!(result.unwrap_err(), VizmetricError::Io(_)));
    }
}
