//! The store seam.
//!
//! One typed method per named statement.  Repositories only talk to a
//! `dyn Store`, so the same persistence rules run against Postgres in
//! production and against [`memory::MemoryStore`] in tests.

pub mod memory;
pub mod postgres;

use std::pin::Pin;

use async_trait::async_trait;
use tokio_stream::Stream;

use crate::models::{AddressRow, PersonRow};
use crate::DbError;

/// Lazily produced rows.  Finite, and consumed at most once.
pub type RowStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T, DbError>> + Send + 'a>>;

/// Per-entity id counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sequence {
    Address,
    Person,
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Person => write!(f, "person"),
        }
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Advance `sequence` and return the new value.
    async fn next_val(&self, sequence: Sequence) -> Result<i64, DbError>;

    /// `select-address`
    async fn select_address(&self, id: i32) -> Result<Option<AddressRow>, DbError>;

    /// `insert-address`; returns the affected row count.
    async fn insert_address(&self, row: &AddressRow) -> Result<u64, DbError>;

    /// `select-person`
    async fn select_person(&self, id: i32) -> Result<Option<PersonRow>, DbError>;

    /// `select-all-person`, in store order.
    fn select_all_person(&self) -> RowStream<'_, PersonRow>;

    /// `select-all-person-firstname`, exact match.
    fn select_all_person_firstname<'a>(&'a self, firstname: &'a str) -> RowStream<'a, PersonRow>;

    /// `insert-person`; returns the affected row count.
    async fn insert_person(&self, row: &PersonRow) -> Result<u64, DbError>;
}
