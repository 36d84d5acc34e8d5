#![forbid(unsafe_code)]

//! PostgreSQL block source.
//!
//! Free-space values come from `pg_freespace()` of the `pg_freespacemap`
//! extension, one `avail` value per block.

use std::time::Duration;

use async_trait::async_trait;
use pgbv_core::model::{Metric, Relation, Table, Toast};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::postgres::types::Oid;

use crate::{BlockSource, DbError};

const RELATION_EXISTS: &str = "SELECT to_regclass($1) IS NOT NULL";

const FREESPACE_BY_NAME: &str = "SELECT avail FROM pg_freespace($1::regclass)";

const FREESPACE_BY_OID: &str = "SELECT avail FROM pg_freespace($1::oid::regclass)";

const INDEXES: &str = "\
SELECT i.indexrelid, c.relname::text
FROM pg_index i
JOIN pg_class c ON c.oid = i.indexrelid
WHERE i.indrelid = to_regclass($1)
ORDER BY c.relname";

// Index columns are NULL when the toast relation has no index.
const TOAST: &str = "\
SELECT t.oid, t.relname::text, i.indexrelid, ti.relname::text
FROM pg_class c
JOIN pg_class t ON t.oid = c.reltoastrelid
LEFT JOIN pg_index i ON i.indrelid = t.oid
LEFT JOIN pg_class ti ON ti.oid = i.indexrelid
WHERE c.oid = to_regclass($1)";

// Names are printed through regclass so they resolve back to the same table.
const TABLE_NAMES: &str = "\
SELECT c.oid::regclass::text
FROM pg_class c
JOIN pg_namespace n ON n.oid = c.relnamespace
WHERE c.relkind = 'r' AND n.nspname NOT IN ('pg_catalog', 'information_schema')
ORDER BY c.oid DESC";

type ToastRow = (Oid, String, Option<Oid>, Option<String>);

/// Toast relation and its index, each as `(name, oid)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ToastParts {
    pub relation: (String, Oid),
    pub index: (String, Oid),
}

/// Check a toast lookup row: a toast relation without an index is an error.
pub(crate) fn toast_parts(
    table: &str,
    row: Option<ToastRow>,
) -> Result<Option<ToastParts>, DbError> {
    match row {
        None => Ok(None),
        Some((toast_oid, toast_name, Some(index_oid), Some(index_name))) => {
            Ok(Some(ToastParts {
                relation: (toast_name, toast_oid),
                index: (index_name, index_oid),
            }))
        }
        Some(_) => Err(DbError::InconsistentToast {
            table: table.to_owned(),
        }),
    }
}

/// Block source reading a live database.
#[derive(Debug, Clone)]
pub struct PgBlockSource {
    pool: PgPool,
}

impl PgBlockSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a small pool on `url`.
    ///
    /// # Errors
    ///
    /// [`DbError::Connect`] when the URL is invalid or the server cannot be
    /// reached within `acquire_timeout`.
    pub async fn connect(url: &str, acquire_timeout: Duration) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await
            .map_err(DbError::Connect)?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn ensure_exists(&self, name: &str) -> Result<(), DbError> {
        let exists: bool = sqlx::query_scalar(RELATION_EXISTS)
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::query(format!("checking relation {name}")))?;
        if exists {
            Ok(())
        } else {
            Err(DbError::RelationNotFound(name.to_owned()))
        }
    }

    async fn relation_by_name(&self, name: &str) -> Result<Relation, DbError> {
        tracing::debug!(relation = name, "fetching free space map");
        let metrics: Vec<Metric> = sqlx::query_scalar(FREESPACE_BY_NAME)
            .bind(name)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::query(format!("fetching free space of {name}")))?;
        Ok(Relation::new(name, metrics))
    }

    async fn relation_by_oid(&self, name: String, oid: Oid) -> Result<Relation, DbError> {
        tracing::debug!(relation = %name, oid = oid.0, "fetching free space map");
        let metrics: Vec<Metric> = sqlx::query_scalar(FREESPACE_BY_OID)
            .bind(oid)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::query(format!("fetching free space of {name}")))?;
        Ok(Relation::new(name, metrics))
    }

    async fn indexes(&self, table: &str) -> Result<Vec<Relation>, DbError> {
        tracing::debug!(relation = table, "fetching indexes");
        let rows: Vec<(Oid, String)> = sqlx::query_as(INDEXES)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::query(format!("listing indexes of {table}")))?;

        let mut indexes = Vec::with_capacity(rows.len());
        for (oid, name) in rows {
            indexes.push(self.relation_by_oid(name, oid).await?);
        }
        Ok(indexes)
    }

    async fn toast(&self, table: &str) -> Result<Option<Toast>, DbError> {
        tracing::debug!(relation = table, "fetching toast");
        let row: Option<ToastRow> = sqlx::query_as(TOAST)
            .bind(table)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::query(format!("looking up toast of {table}")))?;

        let Some(ToastParts { relation, index }) = toast_parts(table, row)? else {
            return Ok(None);
        };
        let relation = self.relation_by_oid(relation.0, relation.1).await?;
        let index = self.relation_by_oid(index.0, index.1).await?;
        Ok(Some(Toast::new(relation, index)))
    }
}

#[async_trait]
impl BlockSource for PgBlockSource {
    async fn fetch_table(&self, name: &str) -> Result<Table, DbError> {
        tracing::info!(relation = name, "fetching buffer information");
        self.ensure_exists(name).await?;

        let relation = self.relation_by_name(name).await?;
        let indexes = self.indexes(name).await?;
        let toast = self.toast(name).await?;

        let mut table = Table::new(relation);
        table.indexes = indexes;
        table.toast = toast;
        tracing::info!(
            relation = name,
            indexes = table.indexes.len(),
            toast = table.toast.is_some(),
            "fetched table"
        );
        Ok(table)
    }

    async fn list_relation_names(&self) -> Result<Vec<String>, DbError> {
        sqlx::query_scalar(TABLE_NAMES)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::query("listing relation names"))
    }
}
