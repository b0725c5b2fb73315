//! Query parameter types for API handlers.

use std::fmt;
use std::str::FromStr;

use inventory_core::listing::{ProductQuery, ProductSort};
use inventory_core::types::DbId;
use serde::de::{self, Deserializer};
use serde::Deserialize;

/// Query string of `GET /api/products`
/// (`?q=&categoryId=&page=&pageSize=&sort=`).
///
/// Normalization (trimming, clamping) happens in [`ProductQuery::new`].
/// Blank numeric parameters (`categoryId=`) count as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListParams {
    pub q: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category_id: Option<DbId>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page_size: Option<i64>,
    pub sort: Option<ProductSort>,
}

impl ProductListParams {
    pub fn into_query(self) -> ProductQuery {
        ProductQuery::new(
            self.q.as_deref(),
            self.category_id,
            self.sort,
            self.page,
            self.page_size,
        )
    }
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::Query;
    use axum::http::Uri;

    use super::*;

    fn parse(uri: &str) -> ProductQuery {
        let uri: Uri = uri.parse().unwrap();
        let Query(params) = Query::<ProductListParams>::try_from_uri(&uri).unwrap();
        params.into_query()
    }

    #[test]
    fn camel_case_params_are_read() {
        let query = parse("/api/products?q=%20tee%20&categoryId=2&pageSize=500&sort=price");

        assert_eq!(query.search.as_deref(), Some("tee"));
        assert_eq!(query.category_id, Some(2));
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 100);
        assert_eq!(query.sort, ProductSort::Price);
    }

    #[test]
    fn blank_numbers_are_absent() {
        let query = parse("/api/products?categoryId=&page=&pageSize=");
        assert_eq!(query, ProductQuery::default());
    }

    #[test]
    fn garbage_number_is_rejected() {
        let uri: Uri = "/api/products?page=two".parse().unwrap();
        assert!(Query::<ProductListParams>::try_from_uri(&uri).is_err());
    }
}
