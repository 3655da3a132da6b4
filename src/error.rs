use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a dashboard render cycle.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The store could not be opened or was closed underneath us.
    #[error("cannot open book database at {}", path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    /// A table or column the catalog relies on is missing.
    #[error("book database schema mismatch: {0}")]
    Schema(String),
    #[error("query `{query}` failed")]
    Query {
        query: &'static str,
        #[source]
        source: rusqlite::Error,
    },
}

impl DashboardError {
    /// Classify a SQLite failure raised while preparing or stepping a catalog
    /// query. SQLite reports absent tables and columns only through the message
    /// text, so that is what we match on.
    pub(crate) fn from_query(query: &'static str, source: rusqlite::Error) -> Self {
        let message = source.to_string();
        if message.contains("no such table") || message.contains("no such column") {
            DashboardError::Schema(format!("{query}: {message}"))
        } else {
            DashboardError::Query { query, source }
        }
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
