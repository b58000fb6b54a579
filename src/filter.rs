//! Search and category filtering.

use crate::model::ProductRecord;

/// Current filter inputs.
///
/// An empty category means "all categories".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    search: String,
    category: String,
}

impl Filter {
    /// Create a filter from a search text and a selected category.
    pub fn new(search: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            category: category.into(),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    /// Whether this filter can exclude anything.
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || !self.category.is_empty()
    }

    /// Check a single record against the filter.
    pub fn matches(&self, record: &ProductRecord) -> bool {
        let needle = self.needle();
        self.matches_with(record, &needle)
    }

    /// Records that pass the filter, in their original order.
    pub fn apply<'a>(&self, records: &'a [ProductRecord]) -> Vec<&'a ProductRecord> {
        let needle = self.needle();
        records
            .iter()
            .filter(|record| self.matches_with(record, &needle))
            .collect()
    }

    fn needle(&self) -> String {
        self.search.trim().to_lowercase()
    }

    fn matches_with(&self, record: &ProductRecord, needle: &str) -> bool {
        let matches_search = record.name().to_lowercase().contains(needle)
            || (record.variant().searches_identifier()
                && record
                    .identifier()
                    .is_some_and(|id| id.to_lowercase().contains(needle)));

        let matches_category = self.category.is_empty() || record.category() == self.category;

        matches_search && matches_category
    }
}
