//! Dataset format detection.

use crate::container::decode_xml_bytes;
use crate::error::{Error, Result};
use std::io::{Cursor, Read};

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Content type for the XLSX workbook part.
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";

/// Detected dataset format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// Excel workbook (.xlsx)
    Xlsx,
    /// Header line followed by delimiter-separated records
    Delimited,
}

impl DatasetFormat {
    /// Returns the usual file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            DatasetFormat::Xlsx => "xlsx",
            DatasetFormat::Delimited => "csv",
        }
    }

    /// Returns a human-readable name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            DatasetFormat::Xlsx => "Excel Workbook",
            DatasetFormat::Delimited => "Delimited Text",
        }
    }
}

impl std::fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the dataset format from its raw bytes.
///
/// ZIP archives are accepted only when they look like a workbook: the
/// `[Content_Types].xml` names the spreadsheet main part, or the archive has
/// an `xl/` folder. Anything else that is valid UTF-8 text is delimited.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DatasetFormat> {
    if is_zip_file(data) {
        return detect_zip_workbook(data);
    }

    match std::str::from_utf8(data) {
        Ok(_) => Ok(DatasetFormat::Delimited),
        Err(_) => Err(Error::UnknownFormat),
    }
}

fn detect_zip_workbook(data: &[u8]) -> Result<DatasetFormat> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;

    if let Ok(mut file) = archive.by_name("[Content_Types].xml") {
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        if decode_xml_bytes(&bytes)?.contains(XLSX_CONTENT_TYPE) {
            return Ok(DatasetFormat::Xlsx);
        }
    }

    if archive.file_names().any(|n| n.starts_with("xl/")) {
        Ok(DatasetFormat::Xlsx)
    } else {
        Err(Error::UnknownFormat)
    }
}

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn zip_with(name: &str, body: &[u8]) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buffer));
            zip.start_file(name, SimpleFileOptions::default()).unwrap();
            zip.write_all(body).unwrap();
            zip.finish().unwrap();
        }
        buffer
    }

    #[test]
    fn test_format_display() {
        assert_eq!(DatasetFormat::Xlsx.to_string(), "Excel Workbook");
        assert_eq!(DatasetFormat::Delimited.to_string(), "Delimited Text");
        assert_eq!(DatasetFormat::Delimited.extension(), "csv");
    }

    #[test]
    fn test_is_zip_file() {
        assert!(is_zip_file(&[0x50, 0x4B, 0x03, 0x04, 0x00]));
        assert!(!is_zip_file(&[0x00, 0x00, 0x00, 0x00]));
        assert!(!is_zip_file(&[0x50, 0x4B]));
    }

    #[test]
    fn test_detect_text() {
        let data = b"Name,Category,Description,Price\nA,B,C,D";
        assert_eq!(detect_format_from_bytes(data).unwrap(), DatasetFormat::Delimited);
    }

    #[test]
    fn test_detect_binary_garbage() {
        let result = detect_format_from_bytes(&[0xC3, 0x28, 0xFF, 0x00]);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_workbook_by_folder() {
        let data = zip_with("xl/workbook.xml", b"<workbook/>");
        assert_eq!(detect_format_from_bytes(&data).unwrap(), DatasetFormat::Xlsx);
    }

    #[test]
    fn test_detect_foreign_zip() {
        let data = zip_with("word/document.xml", b"<document/>");
        assert!(matches!(
            detect_format_from_bytes(&data),
            Err(Error::UnknownFormat)
        ));
    }
}
