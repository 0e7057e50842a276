//! Typed error type for the db crate.

use thiserror::Error;

use crate::store::Sequence;

#[derive(Debug, Error)]
pub enum DbError {
    /// No row for the requested id.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// The id counter could not be advanced, or ran past `i32::MAX`.
    #[error("cannot allocate {sequence} id: {reason}")]
    Allocation { sequence: Sequence, reason: String },

    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Failure reported by a non-sqlx store backend.
    #[error("store error: {0}")]
    Store(String),

    /// A row came back that cannot be turned into a domain value.
    #[error("invalid row: {0}")]
    InvalidRow(String),
}

impl DbError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
