//! Error type for store operations that combine rule checks with storage.
//!
//! Multi-step operations run inside a transaction. Any `?` before
//! `commit()` drops the transaction, which rolls it back, so a returned
//! error never leaves partial writes behind.

use scholarship_core::error::CoreError;
use scholarship_core::interview::InterviewError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain rule rejected the operation before anything was written.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The storage round-trip itself failed.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<InterviewError> for StoreError {
    fn from(err: InterviewError) -> Self {
        Self::Core(CoreError::Interview(err))
    }
}

/// Whether `err` is a unique violation on the named constraint or index.
pub(crate) fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505") && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
