//! `db` crate: persistence layer for persons and addresses.
//!
//! Provides the [`Store`] seam (one typed method per named statement), a
//! Postgres and an in-memory implementation of it, the id allocator, and the
//! two repositories that turn rows into domain values.

pub mod allocator;
pub mod error;
pub mod models;
pub mod repository;
pub mod statements;
pub mod store;

pub use allocator::IdAllocator;
pub use error::DbError;
pub use repository::{AddressRepository, PersonRepository, PersonStream};
pub use statements::Statements;
pub use store::{memory::MemoryStore, postgres::PgStore, RowStream, Sequence, Store};
