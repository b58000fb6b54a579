//! Dataset loading.
//!
//! Reads a dataset, detects whether it is a workbook or delimited text,
//! and normalizes its rows. Every error returned here is a load failure;
//! the page controller turns it into the visible error row.

use crate::delimited::parse_delimited_bytes;
use crate::detect::{detect_format_from_bytes, DatasetFormat};
use crate::error::Result;
use crate::model::{ProductRecord, RawTable};
use crate::normalize::normalize_table;
use crate::options::CatalogOptions;
use std::path::Path;

/// Parse raw bytes into a table, detecting the format from the content.
pub fn read_table(data: &[u8], delimiter: char) -> Result<RawTable> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "xlsx")]
        DatasetFormat::Xlsx => crate::xlsx::XlsxParser::from_bytes(data.to_vec())?.read_first_sheet(),
        #[cfg(not(feature = "xlsx"))]
        DatasetFormat::Xlsx => Err(crate::error::Error::UnsupportedFormat(
            DatasetFormat::Xlsx.to_string(),
        )),
        DatasetFormat::Delimited => parse_delimited_bytes(data, delimiter),
    }
}

/// Load records from in-memory dataset bytes.
pub fn load_bytes(data: &[u8], options: &CatalogOptions) -> Result<Vec<ProductRecord>> {
    let table = read_table(data, options.delimiter)?;
    let records = normalize_table(&table, options.variant);
    tracing::debug!(
        columns = table.headers.len(),
        rows = table.row_count(),
        records = records.len(),
        "normalized dataset"
    );
    Ok(records)
}

/// Load records from a dataset file.
pub fn load_dataset(path: impl AsRef<Path>, options: &CatalogOptions) -> Result<Vec<ProductRecord>> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), variant = %options.variant, "loading dataset");

    let data = std::fs::read(path)?;
    let records = load_bytes(&data, options)?;

    tracing::info!(path = %path.display(), records = records.len(), "dataset loaded");
    Ok(records)
}

/// Load records from a dataset file without blocking the runtime on I/O.
#[cfg(feature = "async")]
pub async fn load_dataset_async(
    path: impl AsRef<Path>,
    options: &CatalogOptions,
) -> Result<Vec<ProductRecord>> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), variant = %options.variant, "loading dataset");

    let data = tokio::fs::read(path).await?;
    let records = load_bytes(&data, options)?;

    tracing::info!(path = %path.display(), records = records.len(), "dataset loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::DatasetVariant;
    use std::io::Write;

    #[test]
    fn test_load_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "Name,Category,Description,Price\nBeaker,Glassware,250 ml,4.50\nPipette,Glassware,10 ml,1.20\n"
        )
        .unwrap();

        let options = CatalogOptions::new().with_variant(DatasetVariant::Catalog);
        let records = load_dataset(file.path(), &options).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].cells(), ["Pipette", "Glassware", "10 ml", "1.20"]);
    }

    #[test]
    fn test_custom_delimiter() {
        let options = CatalogOptions::new()
            .with_variant(DatasetVariant::Catalog)
            .with_delimiter('|');
        let records = load_bytes(b"n|c|d|p\nFlask|Glass|1,000 ml|9", &options).unwrap();
        assert_eq!(records[0].cells(), ["Flask", "Glass", "1,000 ml", "9"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_dataset("does/not/exist.csv", &CatalogOptions::new());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_unrecognized_bytes() {
        let result = load_bytes(&[0xFF, 0xFF, 0x00, 0x80], &CatalogOptions::new());
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_load_dataset_async() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Name,Category,Description,Price\nFunnel,Glassware,,2\n").unwrap();

        let options = CatalogOptions::new().with_variant(DatasetVariant::Catalog);
        let records = load_dataset_async(file.path(), &options).await.unwrap();
        assert_eq!(records[0].cells(), ["Funnel", "Glassware", "", "2"]);

        let missing = load_dataset_async("does/not/exist.csv", &options).await;
        assert!(matches!(missing, Err(Error::Io(_))));
    }
}
