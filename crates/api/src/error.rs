//! Typed error type for the api crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
