//! Normalized product records.

use super::DatasetVariant;
use serde::{Deserialize, Serialize};

/// Variant-specific record fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum RecordDetail {
    /// Chemical product fields
    Chemical {
        /// CAS registry number
        cas: String,
        /// Purity, already formatted for display (e.g. "97%")
        purity: String,
    },
    /// General catalog fields
    Catalog {
        /// Free-text description
        description: String,
        /// Price as given by the source
        price: String,
    },
}

/// One normalized product entry.
///
/// Every field is a plain string; absent source values are empty strings.
/// Fields are private so a record cannot change after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    name: String,
    category: String,
    #[serde(flatten)]
    detail: RecordDetail,
}

impl ProductRecord {
    /// Create a chemical record.
    pub fn chemical(
        name: impl Into<String>,
        cas: impl Into<String>,
        category: impl Into<String>,
        purity: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            detail: RecordDetail::Chemical {
                cas: cas.into(),
                purity: purity.into(),
            },
        }
    }

    /// Create a catalog record.
    pub fn catalog(
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            detail: RecordDetail::Catalog {
                description: description.into(),
                price: price.into(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn detail(&self) -> &RecordDetail {
        &self.detail
    }

    /// The variant this record belongs to.
    pub fn variant(&self) -> DatasetVariant {
        match self.detail {
            RecordDetail::Chemical { .. } => DatasetVariant::Chemical,
            RecordDetail::Catalog { .. } => DatasetVariant::Catalog,
        }
    }

    /// Identifier field used by search, if the variant has one.
    pub fn identifier(&self) -> Option<&str> {
        match &self.detail {
            RecordDetail::Chemical { cas, .. } => Some(cas.as_str()),
            RecordDetail::Catalog { .. } => None,
        }
    }

    /// Field values in table column order for this record's variant.
    pub fn cells(&self) -> [&str; DatasetVariant::COLUMN_COUNT] {
        match &self.detail {
            RecordDetail::Chemical { cas, purity } => [
                self.name.as_str(),
                cas.as_str(),
                self.category.as_str(),
                purity.as_str(),
            ],
            RecordDetail::Catalog { description, price } => [
                self.name.as_str(),
                self.category.as_str(),
                description.as_str(),
                price.as_str(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chemical_cells_order() {
        let record = ProductRecord::chemical("Acetone", "67-64-1", "Solvent", "99%");
        assert_eq!(record.cells(), ["Acetone", "67-64-1", "Solvent", "99%"]);
        assert_eq!(record.identifier(), Some("67-64-1"));
        assert_eq!(record.variant(), DatasetVariant::Chemical);
    }

    #[test]
    fn test_catalog_cells_order() {
        let record = ProductRecord::catalog("Beaker", "Glassware", "250 ml", "4.50");
        assert_eq!(record.cells(), ["Beaker", "Glassware", "250 ml", "4.50"]);
        assert_eq!(record.identifier(), None);
        assert_eq!(record.variant(), DatasetVariant::Catalog);
    }

    #[test]
    fn test_serialized_shape() {
        let record = ProductRecord::chemical("Acetone", "67-64-1", "Solvent", "99%");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"variant\":\"chemical\""));
        assert!(json.contains("\"cas\":\"67-64-1\""));

        let parsed: ProductRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
