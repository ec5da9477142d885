// src/infrastructure/repositories/sqlite_slug.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{FieldValue, RecordId, Slug, SlugLookup, SlugQuery, SlugWriteRepository};
use crate::infrastructure::repositories::error::map_sqlx;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::fmt;
use std::sync::Arc;

/// A table or column name that is safe to splice into SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlIdentifier(String);

impl SqlIdentifier {
    pub fn parse(value: &str) -> DomainResult<Self> {
        let mut chars = value.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(DomainError::Configuration(format!(
                "invalid sql identifier: {value:?}"
            )));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SqlIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Slug lookup and write-back against one SQLite table.
#[derive(Clone)]
pub struct SqliteSlugRepository {
    pool: Arc<SqlitePool>,
    table: SqlIdentifier,
    id_column: SqlIdentifier,
}

impl SqliteSlugRepository {
    pub fn new(pool: Arc<SqlitePool>, table: &str, id_column: &str) -> DomainResult<Self> {
        Ok(Self {
            pool,
            table: SqlIdentifier::parse(table)?,
            id_column: SqlIdentifier::parse(id_column)?,
        })
    }
}

fn push_equals(builder: &mut QueryBuilder<'_, Sqlite>, value: &FieldValue) {
    match value {
        FieldValue::Null => {
            builder.push(" IS NULL");
        }
        FieldValue::Text(text) => {
            builder.push(" = ").push_bind(text.clone());
        }
        FieldValue::Bytes(bytes) => {
            builder.push(" = ").push_bind(bytes.clone());
        }
        FieldValue::Integer(int) => {
            builder.push(" = ").push_bind(*int);
        }
        FieldValue::Float(float) => {
            builder.push(" = ").push_bind(*float);
        }
        FieldValue::Boolean(flag) => {
            builder.push(" = ").push_bind(*flag);
        }
    }
}

#[async_trait]
impl SlugLookup for SqliteSlugRepository {
    async fn slug_taken(&self, query: &SlugQuery) -> DomainResult<bool> {
        let slug_column = SqlIdentifier::parse(&query.slug_field)?;

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT EXISTS(SELECT 1 FROM ");
        builder
            .push(self.table.as_str())
            .push(" WHERE ")
            .push(slug_column.as_str())
            .push(" = ")
            .push_bind(query.candidate.clone());

        for (field, value) in &query.scope {
            let column = SqlIdentifier::parse(field)?;
            builder.push(" AND ").push(column.as_str());
            push_equals(&mut builder, value);
        }

        if let Some(id) = query.exclude {
            builder
                .push(" AND ")
                .push(self.id_column.as_str())
                .push(" <> ")
                .push_bind(i64::from(id));
        }
        builder.push(")");

        let exists: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(exists != 0)
    }
}

#[async_trait]
impl SlugWriteRepository for SqliteSlugRepository {
    async fn update_slug(&self, slug_field: &str, id: RecordId, slug: &Slug) -> DomainResult<()> {
        let slug_column = SqlIdentifier::parse(slug_field)?;

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE ");
        builder
            .push(self.table.as_str())
            .push(" SET ")
            .push(slug_column.as_str())
            .push(" = ")
            .push_bind(slug.as_str().to_owned())
            .push(" WHERE ")
            .push(self.id_column.as_str())
            .push(" = ")
            .push_bind(i64::from(id));

        let result = builder
            .build()
            .execute(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!(
                "{} row {id} not found",
                self.table
            )));
        }
        Ok(())
    }
}
