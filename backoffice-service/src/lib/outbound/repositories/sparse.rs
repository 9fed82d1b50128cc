use sqlx::Encode;
use sqlx::Postgres;
use sqlx::QueryBuilder;
use sqlx::Type;

/// `UPDATE <table> SET ...` that only assigns the columns it is given.
///
/// Column names are always literals from the calling repository; values are bound.
pub(crate) struct SparseUpdate<'args> {
    builder: QueryBuilder<'args, Postgres>,
    assignments: usize,
}

impl<'args> SparseUpdate<'args> {
    pub fn new(table: &str) -> Self {
        Self {
            builder: QueryBuilder::new(format!("UPDATE {} SET ", table)),
            assignments: 0,
        }
    }

    pub fn set<T>(&mut self, column: &str, value: Option<T>) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if let Some(value) = value {
            self.separate();
            self.builder.push(column).push(" = ").push_bind(value);
            self.assignments += 1;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments == 0
    }

    /// Bump `updated_at` alongside the assigned columns.
    pub fn touch(&mut self) -> &mut Self {
        if !self.is_empty() {
            self.separate();
            self.builder.push("updated_at = NOW()");
        }
        self
    }

    /// Close the statement on `id`, plus an optional literal condition, returning `id`.
    pub fn finish(mut self, id: i64, condition: Option<&str>) -> QueryBuilder<'args, Postgres> {
        self.builder.push(" WHERE id = ").push_bind(id);
        if let Some(condition) = condition {
            self.builder.push(" AND ").push(condition);
        }
        self.builder.push(" RETURNING id");
        self.builder
    }

    fn separate(&mut self) {
        if self.assignments > 0 {
            self.builder.push(", ");
        }
    }
}
