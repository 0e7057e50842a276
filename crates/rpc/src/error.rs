//! Repository failures as RPC statuses.

use db::DbError;
use tonic::Status;
use tracing::error;

pub fn status_from(err: DbError) -> Status {
    error!(error = %err, "rpc call failed");
    match err {
        DbError::NotFound { .. } => Status::not_found(err.to_string()),
        DbError::Allocation { .. } => Status::unavailable(err.to_string()),
        DbError::Sqlx(_) | DbError::Store(_) | DbError::InvalidRow(_) => {
            Status::internal(err.to_string())
        }
    }
}
