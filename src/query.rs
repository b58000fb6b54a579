//! Initial filter values from a page query string.

use crate::normalize::clean_field;

/// Maximum length, in characters, of the `search` parameter.
pub const MAX_SEARCH_LEN: usize = 100;

/// Maximum length, in characters, of the `category` parameter.
pub const MAX_CATEGORY_LEN: usize = 50;

/// The `search` and `category` parameters after clamping and cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Initial search text
    pub search: Option<String>,
    /// Initially requested category
    pub category: Option<String>,
}

impl QueryParams {
    /// Parse a query string with the default length limits.
    pub fn parse(query: &str) -> Self {
        Self::parse_with_limits(query, MAX_SEARCH_LEN, MAX_CATEGORY_LEN)
    }

    /// Parse a query string such as `?category=Solvent&search=ace`.
    ///
    /// The leading `?` is optional. Only the first occurrence of each name
    /// counts. Values are trimmed, cut to their limit, and cleaned; a value
    /// that ends up empty is treated as absent.
    pub fn parse_with_limits(query: &str, max_search: usize, max_category: usize) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut search = None;
        let mut category = None;

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "search" if search.is_none() => search = Some(clamp_param(&value, max_search)),
                "category" if category.is_none() => {
                    category = Some(clamp_param(&value, max_category))
                }
                _ => {}
            }
        }

        Self {
            search: search.flatten(),
            category: category.flatten(),
        }
    }

    /// Build parameters from already-separate values, applying the same
    /// clamping as a parsed query string.
    pub fn from_values(search: Option<&str>, category: Option<&str>) -> Self {
        Self::from_values_with_limits(search, category, MAX_SEARCH_LEN, MAX_CATEGORY_LEN)
    }

    /// [`QueryParams::from_values`] with explicit length limits.
    pub fn from_values_with_limits(
        search: Option<&str>,
        category: Option<&str>,
        max_search: usize,
        max_category: usize,
    ) -> Self {
        Self {
            search: search.and_then(|s| clamp_param(s, max_search)),
            category: category.and_then(|c| clamp_param(c, max_category)),
        }
    }

    /// Overlay explicit values on top of this set; `Some` wins.
    pub fn merged_with(self, other: QueryParams) -> Self {
        Self {
            search: other.search.or(self.search),
            category: other.category.or(self.category),
        }
    }
}

/// Trim, truncate to `max_len` characters, and clean a parameter value.
pub fn clamp_param(value: &str, max_len: usize) -> Option<String> {
    let truncated: String = value.trim().chars().take(max_len).collect();
    let cleaned = clean_field(&truncated);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both() {
        let params = QueryParams::parse("?category=Solvent&search=ace+tone");
        assert_eq!(params.category.as_deref(), Some("Solvent"));
        assert_eq!(params.search.as_deref(), Some("ace tone"));
    }

    #[test]
    fn test_percent_decoding_and_markup() {
        let params = QueryParams::parse("search=%3Cscript%3Ealert(1)%3C%2Fscript%3E");
        assert_eq!(params.search.as_deref(), Some("<script>alert(1)</script>"));
        assert_eq!(params.category, None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let params = QueryParams::parse("category=A&category=B");
        assert_eq!(params.category.as_deref(), Some("A"));
    }

    #[test]
    fn test_truncated_to_limits() {
        let long = "x".repeat(500);
        let params = QueryParams::parse(&format!("search={}&category={}", long, long));
        assert_eq!(params.search.map(|s| s.chars().count()), Some(MAX_SEARCH_LEN));
        assert_eq!(params.category.map(|s| s.chars().count()), Some(MAX_CATEGORY_LEN));
    }

    #[test]
    fn test_truncation_counts_characters() {
        let value = "é".repeat(60);
        assert_eq!(clamp_param(&value, 50).map(|s| s.chars().count()), Some(50));
    }

    #[test]
    fn test_blank_values_absent() {
        let params = QueryParams::parse("?search=%20%20&category=");
        assert_eq!(params, QueryParams::default());
        assert_eq!(QueryParams::parse(""), QueryParams::default());
    }

    #[test]
    fn test_merged_with() {
        let base = QueryParams::parse("search=a&category=B");
        let merged = base.merged_with(QueryParams::from_values(Some("z"), None));
        assert_eq!(merged.search.as_deref(), Some("z"));
        assert_eq!(merged.category.as_deref(), Some("B"));
    }

    #[test]
    fn test_from_values_with_limits() {
        let params = QueryParams::from_values_with_limits(Some(" abcdef "), Some("Solvent"), 3, 4);
        assert_eq!(params.search.as_deref(), Some("abc"));
        assert_eq!(params.category.as_deref(), Some("Solv"));

        let defaults = QueryParams::from_values(Some(&"x".repeat(150)), None);
        assert_eq!(defaults.search.map(|s| s.chars().count()), Some(MAX_SEARCH_LEN));
    }
}
