//! Error types for query execution.

use thiserror::Error;

use crate::paginate::SelectStats;

/// Errors from the pagination engine.
///
/// Database execution errors are the only hard failures in the pipeline;
/// everything upstream degrades leniently instead of erroring.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database error from sqlx (the count query, or any other execution).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The row query failed after the count query succeeded. The stats that
    /// were already computed ride along so callers can still render them.
    #[error("row query error: {source}")]
    RowQuery {
        /// The underlying sqlx error.
        #[source]
        source: sqlx::Error,
        /// Stats computed before the row query ran.
        stats: Box<SelectStats>,
    },
}

/// Result type alias for pagination operations.
pub type Result<T> = std::result::Result<T, DbError>;
