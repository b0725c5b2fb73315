//! Product listing queries.
//!
//! [`ProductQuery`] is the normalized form of the `GET /products` query
//! string: filters, sort order, and page window. The repository turns it into
//! SQL; handlers never build query syntax themselves.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Page number used when none is given.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when none is given.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: i64 = 100;

// ---------------------------------------------------------------------------
// Sort order
// ---------------------------------------------------------------------------

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Name,
    NameDesc,
    Price,
    PriceDesc,
}

impl ProductSort {
    /// `ORDER BY` clause for this sort. `id` breaks ties so pages are stable.
    pub fn order_by(self) -> &'static str {
        match self {
            ProductSort::Name => "p.name ASC, p.id ASC",
            ProductSort::NameDesc => "p.name DESC, p.id ASC",
            ProductSort::Price => "p.price ASC, p.id ASC",
            ProductSort::PriceDesc => "p.price DESC, p.id ASC",
        }
    }
}

// ---------------------------------------------------------------------------
// Listing query
// ---------------------------------------------------------------------------

/// A normalized product listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// Trimmed search term, matched case-insensitively against name and SKU.
    pub search: Option<String>,
    /// Restrict to one category.
    pub category_id: Option<DbId>,
    pub sort: ProductSort,
    /// 1-based page number.
    pub page: i64,
    pub page_size: i64,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            search: None,
            category_id: None,
            sort: ProductSort::default(),
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProductQuery {
    /// Build a query from raw request values.
    ///
    /// Blank search terms and non-positive category ids are dropped, the page
    /// is at least 1, and the page size is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(
        search: Option<&str>,
        category_id: Option<DbId>,
        sort: Option<ProductSort>,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            search,
            category_id: category_id.filter(|id| *id > 0),
            sort: sort.unwrap_or_default(),
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            page_size: page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// `ILIKE` pattern for the search term, if any.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(contains_pattern)
    }
}

/// Build a `%term%` pattern with `LIKE` wildcards in `term` escaped.
///
/// PostgreSQL uses backslash as the default `LIKE` escape character.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_given() {
        let query = ProductQuery::new(None, None, None, None, None);
        assert_eq!(query, ProductQuery::default());
        assert_eq!(query.offset(), 0);
        assert_eq!(query.search_pattern(), None);
    }

    #[test]
    fn blank_search_is_dropped() {
        let query = ProductQuery::new(Some("   "), None, None, None, None);
        assert_eq!(query.search, None);
    }

    #[test]
    fn search_is_trimmed() {
        let query = ProductQuery::new(Some("  laptop "), None, None, None, None);
        assert_eq!(query.search.as_deref(), Some("laptop"));
        assert_eq!(query.search_pattern().as_deref(), Some("%laptop%"));
    }

    #[test]
    fn non_positive_category_is_ignored() {
        assert_eq!(ProductQuery::new(None, Some(0), None, None, None).category_id, None);
        assert_eq!(ProductQuery::new(None, Some(-3), None, None, None).category_id, None);
        assert_eq!(ProductQuery::new(None, Some(2), None, None, None).category_id, Some(2));
    }

    #[test]
    fn page_window_is_clamped() {
        let query = ProductQuery::new(None, None, None, Some(0), Some(0));
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 1);

        let query = ProductQuery::new(None, None, None, Some(3), Some(10_000));
        assert_eq!(query.page_size, MAX_PAGE_SIZE);
        assert_eq!(query.offset(), 2 * MAX_PAGE_SIZE);
    }

    #[test]
    fn second_page_of_ten_skips_ten() {
        let query = ProductQuery::new(None, None, None, Some(2), Some(10));
        assert_eq!(query.offset(), 10);
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(contains_pattern("50%_off"), r"%50\%\_off%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }

    #[test]
    fn sort_parses_from_snake_case() {
        let sort: ProductSort = serde_json::from_str("\"price_desc\"").unwrap();
        assert_eq!(sort, ProductSort::PriceDesc);
        assert_eq!(sort.order_by(), "p.price DESC, p.id ASC");
    }
}
