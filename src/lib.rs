//! # prodtable
//!
//! Searchable, filterable product tables from spreadsheet and delimited
//! datasets.
//!
//! A dataset (the first sheet of an XLSX workbook, or header-plus-records
//! delimited text) is read into raw rows, normalized into immutable
//! [`ProductRecord`]s through a [`DatasetVariant`]'s column mapping, and
//! rendered into a text-only HTML table that re-filters on every search or
//! category change.
//!
//! ## Quick Start
//!
//! ```no_run
//! // Load, apply the page query, and render in one call
//! let html = prodtable::render_page("products/pro.xlsx", "?category=Solvent");
//! std::fs::write("catalog.html", html)?;
//!
//! // Or just the records
//! let records = prodtable::load_file("products/products.csv")?;
//! println!("Products: {}", records.len());
//! # Ok::<(), prodtable::Error>(())
//! ```
//!
//! ## Driving a page
//!
//! ```
//! use prodtable::{CatalogOptions, CatalogPage, DatasetVariant};
//!
//! let options = CatalogOptions::new().with_variant(DatasetVariant::Catalog);
//! let mut page = CatalogPage::with_query(options, "?search=beak");
//! page.load_bytes(b"Name,Category,Description,Price\nBeaker,Glassware,250 ml,4.50\nGloves,Safety,,8");
//!
//! assert_eq!(page.visible_records().len(), 1);
//! page.change_category("Safety");
//! assert!(page.visible_records().is_empty());
//! ```
//!
//! ## Features
//!
//! - `xlsx` (default): Excel workbook support
//! - `async`: `loader::load_dataset_async` and `CatalogPage::load_async` with Tokio

pub mod container;
pub mod delimited;
pub mod detect;
pub mod dom;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod options;
pub mod page;
pub mod query;
pub mod render;

#[cfg(feature = "xlsx")]
pub mod xlsx;

// Re-exports
pub use detect::{detect_format_from_bytes, DatasetFormat};
pub use error::{Error, Result};
pub use filter::Filter;
pub use model::{CellValue, DatasetVariant, ProductRecord, RawRow, RawTable, RecordDetail};
pub use options::CatalogOptions;
pub use page::{CatalogPage, LoadState};
pub use query::QueryParams;

use std::path::Path;

/// Load the records of a dataset file.
///
/// The variant is chosen from the file extension: `.xlsx` files are
/// chemical lists, anything else a delimited catalog.
///
/// # Example
///
/// ```no_run
/// let records = prodtable::load_file("products/pro.xlsx")?;
/// for record in &records {
///     println!("{} ({})", record.name(), record.category());
/// }
/// # Ok::<(), prodtable::Error>(())
/// ```
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<ProductRecord>> {
    let path = path.as_ref();
    let options = CatalogOptions::for_path(path);
    loader::load_dataset(path, &options)
}

/// Build a catalog page for a dataset file, apply `query`, and return its HTML.
///
/// Load failures do not surface as errors: the returned page shows the
/// error row instead.
pub fn render_page(path: impl AsRef<Path>, query: &str) -> String {
    let mut page = CatalogPage::with_query(CatalogOptions::for_path(path.as_ref()), query);
    page.load();
    page.to_html()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_page_missing_file() {
        let html = render_page("no/such/products.csv", "");
        assert!(html.contains("Unable to load products. Please try again later."));
    }

    #[test]
    fn test_load_file_picks_variant() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.csv");
        std::fs::write(&path, "Name,Category,Description,Price\nBeaker,Glassware,250 ml,4.50\n")
            .unwrap();

        let records = load_file(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].variant(), DatasetVariant::Catalog);
    }
}
