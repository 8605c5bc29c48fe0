use std::collections::HashMap;

use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::{domain::entities::resource::Resource, errors::AppError};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: &'static str,
    pub column: &'static str,
    pub descending: bool,
}

/// Parses `sort` into keys. Fields are separated by commas or spaces and a
/// leading `-` sorts descending. An empty value falls back to `default`.
pub fn parse_sort(
    raw: &str,
    default: &str,
    allowed: &'static [(&'static str, &'static str)],
) -> Result<Vec<SortKey>, AppError> {
    let source = if raw.trim().is_empty() { default } else { raw };

    source
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            let (name, descending) = match token.strip_prefix('-') {
                Some(rest) => (rest, true),
                None => (token.strip_prefix('+').unwrap_or(token), false),
            };

            allowed
                .iter()
                .find(|(field, _)| *field == name)
                .map(|&(field, column)| SortKey { field, column, descending })
                .ok_or_else(|| {
                    let fields: Vec<&str> = allowed.iter().map(|(field, _)| *field).collect();
                    AppError::operational(StatusCode::BAD_REQUEST, format!("Invalid sort field: {}", name))
                        .with_details(serde_json::json!({ "allowed": fields }))
                })
        })
        .collect()
}

/// Offset and row cap derived from `page` and `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub skip: u64,
    /// `None` lists every remaining document.
    pub take: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct ListQuery<F> {
    pub sort: Vec<SortKey>,
    pub page: i64,
    pub limit: i64,
    pub filter: F,
}

impl<F> ListQuery<F> {
    pub fn from_params<R>(params: &HashMap<String, String>) -> Result<Self, AppError>
    where
        R: Resource<Filter = F>,
    {
        let sort = parse_sort(
            params.get("sort").map(String::as_str).unwrap_or_default(),
            R::DEFAULT_SORT,
            R::SORT_FIELDS,
        )?;
        let page = params.get("page").and_then(|v| v.trim().parse::<i64>().ok()).unwrap_or(DEFAULT_PAGE);
        let limit = params.get("limit").and_then(|v| v.trim().parse::<i64>().ok()).unwrap_or(DEFAULT_LIMIT);

        Ok(ListQuery {
            sort,
            page,
            limit,
            filter: R::filter_from_params(params),
        })
    }

    /// `skip = (page - 1) * limit`, floored at zero. A zero limit means no cap
    /// and a negative limit caps at its magnitude.
    pub fn window(&self) -> Window {
        let skip = self.page.saturating_sub(1).saturating_mul(self.limit).max(0) as u64;
        let take = match self.limit {
            0 => None,
            limit => Some(limit.unsigned_abs()),
        };
        Window { skip, take }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub page: i64,
    pub limit: i64,
    pub pages: u64,
}

impl Pagination {
    pub fn new(total: u64, page: i64, limit: i64) -> Self {
        let pages = match limit.unsigned_abs() {
            0 => u64::from(total > 0),
            per_page => total.div_ceil(per_page),
        };
        Pagination { total, page, limit, pages }
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::project::Project;

    fn query(page: i64, limit: i64) -> ListQuery<()> {
        ListQuery { sort: Vec::new(), page, limit, filter: () }
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn pages_round_up() {
        for page in 1..=3 {
            assert_eq!(Pagination::new(25, page, 10).pages, 3);
        }
        assert_eq!(Pagination::new(0, 1, 10).pages, 0);
        assert_eq!(Pagination::new(30, 1, 10).pages, 3);
    }

    #[test]
    fn skip_follows_page_and_limit() {
        assert_eq!(query(1, 10).window(), Window { skip: 0, take: Some(10) });
        assert_eq!(query(3, 10).window(), Window { skip: 20, take: Some(10) });
    }

    #[test]
    fn zero_and_negative_values_are_defined() {
        assert_eq!(query(0, 10).window(), Window { skip: 0, take: Some(10) });
        assert_eq!(query(-2, 10).window(), Window { skip: 0, take: Some(10) });
        assert_eq!(query(2, 0).window(), Window { skip: 0, take: None });
        assert_eq!(query(2, -5).window(), Window { skip: 0, take: Some(5) });
        assert_eq!(Pagination::new(7, 1, 0).pages, 1);
        assert_eq!(Pagination::new(7, 1, -5).pages, 2);
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        assert_eq!(query(i64::MIN, i64::MAX).window().skip, 0);
        assert_eq!(query(i64::MAX, i64::MAX).window().skip, i64::MAX as u64);
    }

    #[test]
    fn sort_prefix_sets_direction() {
        let keys = parse_sort("-title,createdAt", "-createdAt", Project::SORT_FIELDS).unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0], SortKey { field: "title", column: "title", descending: true });
        assert_eq!(keys[1], SortKey { field: "createdAt", column: "created_at", descending: false });
    }

    #[test]
    fn empty_sort_uses_default() {
        let keys = parse_sort("  ", "-createdAt", Project::SORT_FIELDS).unwrap();
        assert_eq!(keys, vec![SortKey { field: "createdAt", column: "created_at", descending: true }]);
    }

    #[test]
    fn unknown_sort_field_is_operational_error() {
        let err = parse_sort("password", "-createdAt", Project::SORT_FIELDS).unwrap_err();
        match err {
            AppError::Operational { status, message, details } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Invalid sort field: password");
                assert!(details.unwrap()["allowed"].as_array().unwrap().len() > 1);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn non_numeric_paging_falls_back_to_defaults() {
        let q = ListQuery::from_params::<Project>(&params(&[("page", "abc"), ("limit", "")])).unwrap();
        assert_eq!((q.page, q.limit), (DEFAULT_PAGE, DEFAULT_LIMIT));

        let q = ListQuery::from_params::<Project>(&params(&[("page", "2"), ("limit", "5"), ("featured", "true")])).unwrap();
        assert_eq!((q.page, q.limit), (2, 5));
        assert!(q.filter.featured_only);
    }
}
