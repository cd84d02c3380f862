//! Database error types for parley-db.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors from ledger operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// The daily token quota is or would be exceeded.
    ///
    /// The only ledger error surfaced to end users; carries the unlock
    /// timestamp so the caller can say when service resumes.
    #[error("Daily token limit reached, unlocks at {}", .unlock_at.to_rfc3339())]
    LimitReached { unlock_at: DateTime<Utc> },

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
