//! Query-string driven search and pagination.
//!
//! Recognised parameters for a searchable entity:
//! - `page` (default 1) and `limit` (default 10), both floored at 1
//! - `<column>_like=<text>`: case-insensitive substring match
//! - `<column>_match=<value>` (also `<column>_match[]`), repeatable: exact set membership
//!
//! Only columns named by the entity's [`SearchFields`] are ever turned into
//! filters. Anything else is ignored.

use thiserror::Error;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Upper bound on distinct values returned by a coincidence lookup.
pub const COINCIDENCE_LIMIT: i64 = 20;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Property '{0}' cannot be searched")]
    UnknownProperty(String),

    #[error("search_text is required")]
    EmptySearchText,
}

/// Allow-list of searchable columns for one entity.
#[derive(Debug, Clone, Copy)]
pub struct SearchFields {
    columns: &'static [&'static str],
}

impl SearchFields {
    pub const fn new(columns: &'static [&'static str]) -> Self {
        Self { columns }
    }

    /// Resolve a caller-supplied name to the allow-listed column.
    pub fn resolve(&self, name: &str) -> Option<&'static str> {
        self.columns.iter().copied().find(|column| *column == name)
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// `ceil(total_records / limit)`, written so a huge `limit` cannot overflow.
    pub fn total_pages(&self, total_records: i64) -> i64 {
        if total_records <= 0 {
            0
        } else {
            (total_records - 1) / self.limit + 1
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

/// Substring filter on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeFilter {
    pub column: &'static str,
    pub text: String,
}

/// Set-membership filter on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchFilter {
    pub column: &'static str,
    pub values: Vec<String>,
}

/// Parsed search request. Every filter is ANDed with every other one,
/// including a `_like` and a `_match` on the same column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub pagination: Pagination,
    pub likes: Vec<LikeFilter>,
    pub matches: Vec<MatchFilter>,
}

impl SearchQuery {
    pub fn from_params(params: &[(String, String)], fields: &SearchFields) -> Self {
        let mut page = DEFAULT_PAGE;
        let mut limit = DEFAULT_LIMIT;
        let mut likes = Vec::new();
        let mut matches: Vec<MatchFilter> = Vec::new();

        for (key, value) in params {
            match key.as_str() {
                "page" => page = value.trim().parse().unwrap_or(DEFAULT_PAGE),
                "limit" => limit = value.trim().parse().unwrap_or(DEFAULT_LIMIT),
                _ => {
                    if value.is_empty() {
                        continue;
                    }

                    if let Some(column) = key.strip_suffix("_like").and_then(|n| fields.resolve(n))
                    {
                        likes.push(LikeFilter {
                            column,
                            text: value.clone(),
                        });
                    } else if let Some(column) = key
                        .strip_suffix("_match[]")
                        .or_else(|| key.strip_suffix("_match"))
                        .and_then(|n| fields.resolve(n))
                    {
                        match matches.iter_mut().find(|m| m.column == column) {
                            Some(existing) => existing.values.push(value.clone()),
                            None => matches.push(MatchFilter {
                                column,
                                values: vec![value.clone()],
                            }),
                        }
                    }
                }
            }
        }

        Self {
            pagination: Pagination::new(page, limit),
            likes,
            matches,
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub current_page: i64,
    pub page_size: i64,
    pub total_records: i64,
    pub total_pages: i64,
    pub records: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(records: Vec<T>, total_records: i64, pagination: Pagination) -> Self {
        Self {
            current_page: pagination.page,
            page_size: pagination.limit,
            total_records,
            total_pages: pagination.total_pages(total_records),
            records,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            current_page: self.current_page,
            page_size: self.page_size,
            total_records: self.total_records,
            total_pages: self.total_pages,
            records: self.records.into_iter().map(f).collect(),
        }
    }
}

/// Distinct-value lookup on one allow-listed column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoincidenceQuery {
    pub column: &'static str,
    pub search_text: String,
}

impl CoincidenceQuery {
    pub fn parse(
        property: Option<&str>,
        search_text: Option<&str>,
        fields: &SearchFields,
    ) -> Result<Self, SearchError> {
        let property = property.unwrap_or_default();
        let column = fields
            .resolve(property)
            .ok_or_else(|| SearchError::UnknownProperty(property.to_string()))?;

        match search_text {
            Some(text) if !text.is_empty() => Ok(Self {
                column,
                search_text: text.to_string(),
            }),
            _ => Err(SearchError::EmptySearchText),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: SearchFields = SearchFields::new(&["username", "email", "job_position"]);

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let query = SearchQuery::from_params(&[], &FIELDS);

        assert_eq!(query.pagination, Pagination::new(1, 10));
        assert!(query.likes.is_empty());
        assert!(query.matches.is_empty());
    }

    #[test]
    fn test_page_and_limit_are_floored_and_fall_back() {
        let query = SearchQuery::from_params(&params(&[("page", "0"), ("limit", "-5")]), &FIELDS);
        assert_eq!(query.pagination, Pagination::new(1, 1));

        let query =
            SearchQuery::from_params(&params(&[("page", "abc"), ("limit", "")]), &FIELDS);
        assert_eq!(query.pagination, Pagination::new(1, 10));

        let query = SearchQuery::from_params(&params(&[("page", "3"), ("limit", "25")]), &FIELDS);
        assert_eq!(query.pagination.offset(), 50);
    }

    #[test]
    fn test_like_and_match_filters() {
        let query = SearchQuery::from_params(
            &params(&[
                ("username_like", "ali"),
                ("email_match", "a@example.com"),
                ("email_match[]", "b@example.com"),
                ("job_position_match", "nurse"),
            ]),
            &FIELDS,
        );

        assert_eq!(
            query.likes,
            vec![LikeFilter {
                column: "username",
                text: "ali".to_string()
            }]
        );
        assert_eq!(
            query.matches,
            vec![
                MatchFilter {
                    column: "email",
                    values: vec!["a@example.com".to_string(), "b@example.com".to_string()],
                },
                MatchFilter {
                    column: "job_position",
                    values: vec!["nurse".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_unknown_and_empty_parameters_are_ignored() {
        let query = SearchQuery::from_params(
            &params(&[
                ("password_hash_like", "x"),
                ("id_match", "1"),
                ("username_like", ""),
                ("sort", "desc"),
            ]),
            &FIELDS,
        );

        assert!(query.likes.is_empty());
        assert!(query.matches.is_empty());
    }

    #[test]
    fn test_page_math() {
        let pagination = Pagination::new(2, 10);

        assert_eq!(pagination.total_pages(0), 0);
        assert_eq!(pagination.total_pages(10), 1);
        assert_eq!(pagination.total_pages(11), 2);

        let page = Page::new(vec![1, 2, 3], 13, pagination).map(|n| n * 2);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.total_records, 13);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.records, vec![2, 4, 6]);
    }

    #[test]
    fn test_page_math_with_huge_limit() {
        let query = SearchQuery::from_params(
            &[("limit".to_string(), i64::MAX.to_string())],
            &FIELDS,
        );
        assert_eq!(query.pagination.limit, i64::MAX);

        let page: Page<i64> = Page::new(vec![], 5, query.pagination);
        assert_eq!(page.total_pages, 1);
        assert_eq!(Pagination::new(1, i64::MAX).total_pages(i64::MAX), 1);
        assert_eq!(Pagination::new(1, 1).total_pages(i64::MAX), i64::MAX);
    }

    #[test]
    fn test_coincidence_query() {
        let query = CoincidenceQuery::parse(Some("email"), Some("exa"), &FIELDS).unwrap();
        assert_eq!(query.column, "email");
        assert_eq!(query.search_text, "exa");

        assert_eq!(
            CoincidenceQuery::parse(Some("password_hash"), Some("x"), &FIELDS),
            Err(SearchError::UnknownProperty("password_hash".to_string()))
        );
        assert_eq!(
            CoincidenceQuery::parse(Some("email"), Some(""), &FIELDS),
            Err(SearchError::EmptySearchText)
        );
        assert_eq!(
            CoincidenceQuery::parse(Some("email"), None, &FIELDS),
            Err(SearchError::EmptySearchText)
        );
        assert!(CoincidenceQuery::parse(None, Some("x"), &FIELDS).is_err());
    }
}
