//! Repository failures as graph error entries.

use async_graphql::{Error, ErrorExtensions};
use db::DbError;
use tracing::error;

/// Stable `extensions.code` for a repository failure.
pub fn error_code(err: &DbError) -> &'static str {
    match err {
        DbError::NotFound { .. } => "NOT_FOUND",
        DbError::Allocation { .. } => "ALLOCATION_FAILED",
        DbError::Sqlx(_) | DbError::Store(_) | DbError::InvalidRow(_) => "PERSISTENCE_FAILED",
    }
}

pub fn graph_error(err: DbError) -> Error {
    error!(error = %err, "graph resolver failed");
    let code = error_code(&err);
    Error::new(err.to_string()).extend_with(|_, extensions| extensions.set("code", code))
}
