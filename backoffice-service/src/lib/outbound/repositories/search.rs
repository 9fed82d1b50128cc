//! Shared SQL for the paginated search and coincidence lookups.
//!
//! Filters come from a parsed [`SearchQuery`], whose columns were resolved
//! against a static allow-list. User text only ever reaches the statement as a
//! bound parameter.

use sqlx::postgres::PgRow;
use sqlx::FromRow;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;

use crate::domain::search::CoincidenceQuery;
use crate::domain::search::SearchQuery;
use crate::domain::search::COINCIDENCE_LIMIT;

/// Where a searchable entity lives.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchSource<'a> {
    /// `FROM` clause, possibly a join.
    pub from: &'a str,
    /// Prefix for column references, e.g. `"u."` when `from` aliases the table.
    pub qualifier: &'a str,
    /// Condition every returned row must satisfy, e.g. excluding soft-deleted rows.
    pub live: Option<&'a str>,
}

impl<'a> SearchSource<'a> {
    pub const fn table(from: &'a str) -> Self {
        Self {
            from,
            qualifier: "",
            live: None,
        }
    }

    pub const fn live_only(self, condition: &'a str) -> Self {
        Self {
            live: Some(condition),
            ..self
        }
    }
}

/// Escape `%`, `_` and the escape character itself so text matches literally.
pub(crate) fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn contains_pattern(text: &str) -> String {
    format!("%{}%", escape_like(text))
}

fn push_conditions(
    builder: &mut QueryBuilder<'_, Postgres>,
    source: &SearchSource<'_>,
    query: &SearchQuery,
) {
    let mut separated = false;
    let mut separate = |builder: &mut QueryBuilder<Postgres>| {
        builder.push(if separated { " AND " } else { " WHERE " });
        separated = true;
    };

    if let Some(live) = source.live {
        separate(builder);
        builder.push(live);
    }

    for like in &query.likes {
        separate(builder);
        builder
            .push(source.qualifier)
            .push(like.column)
            .push(" ILIKE ")
            .push_bind(contains_pattern(&like.text))
            .push(" ESCAPE '\\'");
    }

    for filter in &query.matches {
        separate(builder);
        builder
            .push(source.qualifier)
            .push(filter.column)
            .push(" = ANY(")
            .push_bind(filter.values.clone())
            .push(")");
    }
}

fn count_statement<'args>(
    source: &SearchSource<'_>,
    query: &SearchQuery,
) -> QueryBuilder<'args, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", source.from));
    push_conditions(&mut builder, source, query);
    builder
}

fn page_statement<'args>(
    columns: &str,
    source: &SearchSource<'_>,
    query: &SearchQuery,
) -> QueryBuilder<'args, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", columns, source.from));
    push_conditions(&mut builder, source, query);
    builder
        .push(format!(" ORDER BY {}id", source.qualifier))
        .push(" LIMIT ")
        .push_bind(query.pagination.limit)
        .push(" OFFSET ")
        .push_bind(query.pagination.offset());
    builder
}

fn coincidence_statement<'args>(
    source: &SearchSource<'_>,
    query: &CoincidenceQuery,
) -> QueryBuilder<'args, Postgres> {
    let column = format!("{}{}", source.qualifier, query.column);

    let mut builder = QueryBuilder::new(format!(
        "SELECT DISTINCT {} FROM {} WHERE {} ILIKE ",
        column, source.from, column
    ));
    builder
        .push_bind(contains_pattern(&query.search_text))
        .push(" ESCAPE '\\'");
    if let Some(live) = source.live {
        builder.push(" AND ").push(live);
    }
    builder
        .push(format!(" ORDER BY {} LIMIT ", column))
        .push_bind(COINCIDENCE_LIMIT);
    builder
}

/// Run the count and page statements for `query`, returning the page rows and
/// the total number of matching rows.
pub(crate) async fn search_rows<R>(
    pool: &PgPool,
    columns: &str,
    source: &SearchSource<'_>,
    query: &SearchQuery,
) -> Result<(Vec<R>, i64), sqlx::Error>
where
    R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let total = count_statement(source, query)
        .build_query_scalar::<i64>()
        .fetch_one(pool)
        .await?;

    let rows = page_statement(columns, source, query)
        .build_query_as::<R>()
        .fetch_all(pool)
        .await?;

    Ok((rows, total))
}

pub(crate) async fn coincidences(
    pool: &PgPool,
    source: &SearchSource<'_>,
    query: &CoincidenceQuery,
) -> Result<Vec<String>, sqlx::Error> {
    coincidence_statement(source, query)
        .build_query_scalar::<String>()
        .fetch_all(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::SearchFields;

    const FIELDS: SearchFields = SearchFields::new(&["description", "laboratory"]);

    fn query(pairs: &[(&str, &str)]) -> SearchQuery {
        let params: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SearchQuery::from_params(&params, &FIELDS)
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_page_statement_without_filters() {
        let source = SearchSource::table("roles");
        let builder = page_statement("id, name", &source, &query(&[]));

        assert_eq!(
            builder.sql(),
            "SELECT id, name FROM roles ORDER BY id LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn test_filters_are_anded_after_live_condition() {
        let source = SearchSource::table("medicines").live_only("is_deleted = FALSE");
        let q = query(&[
            ("description_like", "para"),
            ("laboratory_match", "Acme"),
            ("laboratory_match", "Bayer"),
            ("unknown_like", "ignored"),
        ]);

        assert_eq!(
            count_statement(&source, &q).sql(),
            "SELECT COUNT(*) FROM medicines WHERE is_deleted = FALSE \
             AND description ILIKE $1 ESCAPE '\\' AND laboratory = ANY($2)"
        );
    }

    #[test]
    fn test_qualified_columns_for_joins() {
        let source = SearchSource {
            from: "users u JOIN roles r ON r.id = u.role_id",
            qualifier: "u.",
            live: None,
        };
        let q = query(&[("description_like", "x")]);

        assert_eq!(
            page_statement("u.id", &source, &q).sql(),
            "SELECT u.id FROM users u JOIN roles r ON r.id = u.role_id \
             WHERE u.description ILIKE $1 ESCAPE '\\' ORDER BY u.id LIMIT $2 OFFSET $3"
        );
    }

    #[test]
    fn test_coincidence_statement() {
        let source = SearchSource::table("clients").live_only("is_deleted = 0");
        let q = CoincidenceQuery::parse(Some("laboratory"), Some("ac"), &FIELDS).unwrap();

        assert_eq!(
            coincidence_statement(&source, &q).sql(),
            "SELECT DISTINCT laboratory FROM clients WHERE laboratory ILIKE $1 ESCAPE '\\' \
             AND is_deleted = 0 ORDER BY laboratory LIMIT $2"
        );
    }
}
