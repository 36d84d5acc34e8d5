#![forbid(unsafe_code)]

use std::time::Duration;

use async_trait::async_trait;
use pgbv_core::model::Table;

use crate::{BlockSource, DbError};

/// Block source over tables held in memory.
///
/// Tables are listed newest first, i.e. in reverse insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlockSource {
    tables: Vec<Table>,
    delay: Option<Duration>,
}

impl MemoryBlockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table, replacing any table with the same name.
    #[must_use]
    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.retain(|t| t.name() != table.name());
        self.tables.push(table);
        self
    }

    /// Wait `delay` before answering each fetch.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl BlockSource for MemoryBlockSource {
    async fn fetch_table(&self, name: &str) -> Result<Table, DbError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.tables
            .iter()
            .find(|t| t.name() == name)
            .cloned()
            .ok_or_else(|| DbError::RelationNotFound(name.to_owned()))
    }

    async fn list_relation_names(&self) -> Result<Vec<String>, DbError> {
        Ok(self
            .tables
            .iter()
            .rev()
            .map(|t| t.name().to_owned())
            .collect())
    }
}
