#![forbid(unsafe_code)]

use std::time::Duration;

/// Failure while fetching block maps.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("failed to connect to the database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("{context}: {source}")]
    Query {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("relation \"{0}\" does not exist")]
    RelationNotFound(String),

    /// The table has a toast relation but no index on it.
    #[error("toast relation of \"{table}\" has no index")]
    InconsistentToast { table: String },

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl DbError {
    pub(crate) fn query(context: impl Into<String>) -> impl FnOnce(sqlx::Error) -> Self {
        let context = context.into();
        move |source| Self::Query { context, source }
    }

    /// Whether the request named something that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RelationNotFound(_))
    }
}
