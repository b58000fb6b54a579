//! Error types for the prodtable library.

use std::io;
use thiserror::Error;

/// Result type alias for prodtable operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or rendering a product dataset.
///
/// Every variant returned by the loader counts as a load failure; the page
/// controller catches it and renders the error row instead of propagating.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The dataset format could not be determined.
    #[error("Unknown dataset format")]
    UnknownFormat,

    /// The format is recognized but support for it was compiled out.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Invalid or malformed data in the dataset.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A required workbook component is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// Error during text encoding conversion.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The dataset has no header row.
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Error during rendering.
    #[error("Render error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(err.to_string(), "Unknown dataset format");

        let err = Error::MissingComponent("xl/workbook.xml".to_string());
        assert_eq!(err.to_string(), "Missing component: xl/workbook.xml");

        assert_eq!(Error::EmptyDataset.to_string(), "Dataset is empty");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
