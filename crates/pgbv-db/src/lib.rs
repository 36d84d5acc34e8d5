#![forbid(unsafe_code)]

//! Where block free-space maps come from.
//!
//! [`BlockSource`] hands out fully built [`Table`] values: the primary
//! relation, its indexes and its toast pair. A table that reaches the layout
//! engine is always consistent; inconsistencies are reported here as
//! [`DbError`] instead.
//!
//! - [`PgBlockSource`] reads `pg_freespace` over a connection pool
//! - [`MemoryBlockSource`] serves prepared tables, for tests and demos

use std::time::Duration;

use async_trait::async_trait;
use pgbv_core::model::Table;

mod error;
mod memory;
mod postgres;

pub use error::DbError;
pub use memory::MemoryBlockSource;
pub use postgres::PgBlockSource;

/// Source of table block maps.
#[async_trait]
pub trait BlockSource: Send + Sync {
    /// Fetch `name` with its indexes and toast relation.
    async fn fetch_table(&self, name: &str) -> Result<Table, DbError>;

    /// Names of ordinary tables, newest first.
    async fn list_relation_names(&self) -> Result<Vec<String>, DbError>;
}

/// [`BlockSource::fetch_table`] bounded by `limit`.
///
/// # Errors
///
/// [`DbError::Timeout`] when the source does not answer in time, otherwise
/// whatever the source reports.
pub async fn fetch_table_within(
    source: &dyn BlockSource,
    name: &str,
    limit: Duration,
) -> Result<Table, DbError> {
    match tokio::time::timeout(limit, source.fetch_table(name)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(relation = name, ?limit, "fetching table timed out");
            Err(DbError::Timeout(limit))
        }
    }
}
