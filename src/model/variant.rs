//! Named dataset schemas and their column mappings.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where a record field is read from in a raw row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRef {
    /// Column whose header text equals this name
    Header(&'static str),
    /// Column at this zero-based position
    Index(usize),
}

/// Column-to-field mapping for one dataset variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Source of the product name
    pub name: ColumnRef,
    /// Source of the category
    pub category: ColumnRef,
    /// Sources of the two variant-specific fields, in record order
    pub detail: [ColumnRef; 2],
}

/// The two supported record schemas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetVariant {
    /// Chemicals: name, CAS number, category, purity. Read from a workbook.
    #[default]
    Chemical,
    /// General products: name, category, description, price. Read from delimited text.
    Catalog,
}

impl DatasetVariant {
    /// Number of columns a record of this variant renders into.
    pub const COLUMN_COUNT: usize = 4;

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            DatasetVariant::Chemical => "chemical",
            DatasetVariant::Catalog => "catalog",
        }
    }

    /// Column mapping used by normalization.
    pub fn mapping(&self) -> ColumnMapping {
        match self {
            DatasetVariant::Chemical => ColumnMapping {
                name: ColumnRef::Header("ProductName"),
                category: ColumnRef::Header("Category"),
                detail: [ColumnRef::Header("CAS No."), ColumnRef::Header("Purity")],
            },
            // Delimited catalogs are positional; the header line is not consulted.
            DatasetVariant::Catalog => ColumnMapping {
                name: ColumnRef::Index(0),
                category: ColumnRef::Index(1),
                detail: [ColumnRef::Index(2), ColumnRef::Index(3)],
            },
        }
    }

    /// Table headings in render order.
    pub fn headings(&self) -> [&'static str; Self::COLUMN_COUNT] {
        match self {
            DatasetVariant::Chemical => ["Product Name", "CAS No.", "Category", "Purity"],
            DatasetVariant::Catalog => ["Name", "Category", "Description", "Price"],
        }
    }

    /// Fixed relative location the dataset is fetched from by default.
    pub fn default_location(&self) -> &'static str {
        match self {
            DatasetVariant::Chemical => "../products/pro.xlsx",
            DatasetVariant::Catalog => "../products/products.csv",
        }
    }

    /// Whether free-text search also matches the identifier field.
    pub fn searches_identifier(&self) -> bool {
        matches!(self, DatasetVariant::Chemical)
    }

    /// Pick a variant from a dataset file name: workbooks are chemical lists,
    /// everything else is a catalog.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let is_workbook = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));

        if is_workbook {
            DatasetVariant::Chemical
        } else {
            DatasetVariant::Catalog
        }
    }
}

impl std::fmt::Display for DatasetVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DatasetVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chemical" => Ok(DatasetVariant::Chemical),
            "catalog" => Ok(DatasetVariant::Catalog),
            other => Err(format!("unknown dataset variant: {}", other)),
        }
    }
}
