use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    postgres::PgRow,
    query_builder::Separated,
    FromRow, PgPool, Postgres, QueryBuilder,
};
use uuid::Uuid;

use crate::{
    entities::{query::{ListQuery, SortKey}, resource::Resource},
    errors::AppError,
    repositories::resource::ResourceRepository,
};

/// PostgreSQL-backed store, one table per resource.
#[derive(Clone)]
pub struct SqlxRepo {
    pub pool: PgPool,
}

impl SqlxRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxRepo { pool }
    }
}

/// Table mapping for a resource stored in PostgreSQL.
pub trait SqlDocument: Resource {
    type Row: for<'r> FromRow<'r, PgRow> + Send + Unpin + Into<Self>;

    /// Insert column order, matching [`SqlDocument::bind_values`].
    const COLUMNS: &'static [&'static str];
    /// Unique constraints as `(constraint name, wire field)` pairs.
    const UNIQUE_CONSTRAINTS: &'static [(&'static str, &'static str)] = &[];
    /// Sortable text columns, ordered bytewise regardless of the database collation.
    const TEXT_SORT_COLUMNS: &'static [&'static str] = &[];

    fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &Self::Filter);
    fn bind_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>);
    fn bind_assignments(draft: &Self::Draft, sets: &mut Separated<'_, '_, Postgres, &'static str>);
}

/// Escapes `%`, `_` and `\` so user input matches literally inside `ILIKE`.
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn push_order<R: SqlDocument>(builder: &mut QueryBuilder<'_, Postgres>, sort: &[SortKey]) {
    builder.push(" ORDER BY ");
    for key in sort {
        builder.push(key.column);
        if R::TEXT_SORT_COLUMNS.contains(&key.column) {
            builder.push(" COLLATE \"C\"");
        }
        builder.push(if key.descending { " DESC NULLS LAST, " } else { " ASC NULLS FIRST, " });
    }
    builder.push("id ASC");
}

fn map_write_error<R: SqlDocument>(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        let field = db_err.constraint().and_then(|constraint| {
            R::UNIQUE_CONSTRAINTS
                .iter()
                .find(|(name, _)| *name == constraint)
                .map(|(_, field)| *field)
        });
        if let Some(field) = field {
            return AppError::Duplicate { field: field.to_string() };
        }
    }
    AppError::from(err)
}

#[async_trait]
impl<R: SqlDocument> ResourceRepository<R> for SqlxRepo {
    async fn find_all(&self, query: &ListQuery<R::Filter>) -> Result<Vec<R>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT * FROM {} WHERE TRUE", R::COLLECTION));
        R::push_filter(&mut builder, &query.filter);
        push_order::<R>(&mut builder, &query.sort);

        let window = query.window();
        if let Some(take) = window.take {
            builder.push(" LIMIT ").push_bind(i64::try_from(take).unwrap_or(i64::MAX));
        }
        builder.push(" OFFSET ").push_bind(i64::try_from(window.skip).unwrap_or(i64::MAX));

        let rows: Vec<R::Row> = builder
            .build_query_as::<R::Row>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &R::Filter) -> Result<u64, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {} WHERE TRUE", R::COLLECTION));
        R::push_filter(&mut builder, filter);

        let count: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<R>, AppError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", R::COLLECTION);
        let row = sqlx::query_as::<_, R::Row>(&sql)
            .bind(*id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn insert(&self, document: &R) -> Result<R, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "INSERT INTO {} ({}) VALUES (",
            R::COLLECTION,
            R::COLUMNS.join(", ")
        ));
        let mut values = builder.separated(", ");
        document.bind_values(&mut values);
        values.push_unseparated(") RETURNING *");

        let row = builder
            .build_query_as::<R::Row>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error::<R>)?;

        Ok(row.into())
    }

    async fn replace(&self, id: &Uuid, draft: &R::Draft, updated_at: DateTime<Utc>) -> Result<Option<R>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("UPDATE {} SET ", R::COLLECTION));
        let mut sets = builder.separated(", ");
        R::bind_assignments(draft, &mut sets);
        sets.push("updated_at = ").push_bind_unseparated(updated_at);
        builder.push(" WHERE id = ").push_bind(*id).push(" RETURNING *");

        let row = builder
            .build_query_as::<R::Row>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error::<R>)?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<R>, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING *", R::COLLECTION);
        let row = sqlx::query_as::<_, R::Row>(&sql)
            .bind(*id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
