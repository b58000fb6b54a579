//! Catalog configuration.

use crate::delimited::DEFAULT_DELIMITER;
use crate::model::DatasetVariant;
use crate::query::{MAX_CATEGORY_LEN, MAX_SEARCH_LEN};
use crate::render::{LOAD_ERROR_MESSAGE, NO_PRODUCTS_MESSAGE};
use std::path::PathBuf;

/// Options for loading and rendering a product catalog.
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    /// Record schema of the dataset
    pub variant: DatasetVariant,

    /// Dataset location; `None` uses the variant's default location
    pub location: Option<PathBuf>,

    /// Field delimiter for delimited text
    pub delimiter: char,

    /// Maximum characters kept from the `search` query parameter
    pub max_search_len: usize,

    /// Maximum characters kept from the `category` query parameter
    pub max_category_len: usize,

    /// Row text shown when no record passes the filter
    pub empty_message: String,

    /// Row text shown when the dataset fails to load
    pub error_message: String,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            variant: DatasetVariant::default(),
            location: None,
            delimiter: DEFAULT_DELIMITER,
            max_search_len: MAX_SEARCH_LEN,
            max_category_len: MAX_CATEGORY_LEN,
            empty_message: NO_PRODUCTS_MESSAGE.to_string(),
            error_message: LOAD_ERROR_MESSAGE.to_string(),
        }
    }
}

impl CatalogOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a dataset file, picking the variant from its extension.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::new()
            .with_variant(DatasetVariant::from_path(&path))
            .with_location(path)
    }

    /// Set the dataset variant.
    pub fn with_variant(mut self, variant: DatasetVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the dataset location.
    pub fn with_location(mut self, location: impl Into<PathBuf>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the delimiter for delimited text.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the query parameter length limits. Zero is raised to one.
    pub fn with_param_limits(mut self, max_search: usize, max_category: usize) -> Self {
        self.max_search_len = max_search.max(1);
        self.max_category_len = max_category.max(1);
        self
    }

    /// Set the empty-state message.
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Set the load-failure message.
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    /// Where the dataset is read from.
    pub fn dataset_location(&self) -> PathBuf {
        self.location
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.variant.default_location()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = CatalogOptions::default();
        assert_eq!(opts.variant, DatasetVariant::Chemical);
        assert_eq!(opts.delimiter, ',');
        assert_eq!(opts.max_search_len, 100);
        assert_eq!(opts.max_category_len, 50);
        assert_eq!(opts.dataset_location(), PathBuf::from("../products/pro.xlsx"));
    }

    #[test]
    fn test_builder_pattern() {
        let opts = CatalogOptions::new()
            .with_variant(DatasetVariant::Catalog)
            .with_delimiter(';')
            .with_empty_message("Nothing here");

        assert_eq!(opts.dataset_location(), PathBuf::from("../products/products.csv"));
        assert_eq!(opts.delimiter, ';');
        assert_eq!(opts.empty_message, "Nothing here");
    }

    #[test]
    fn test_for_path() {
        let opts = CatalogOptions::for_path("data/list.csv");
        assert_eq!(opts.variant, DatasetVariant::Catalog);
        assert_eq!(opts.dataset_location(), PathBuf::from("data/list.csv"));
    }

    #[test]
    fn test_param_limits_clamp() {
        let opts = CatalogOptions::new().with_param_limits(0, 10);
        assert_eq!(opts.max_search_len, 1);
        assert_eq!(opts.max_category_len, 10);
    }
}
