//! `graph` crate: graph query/mutation adapter.
//!
//! Resolvers translate graph arguments into repository calls and domain
//! values into graph objects.  Query parsing and execution belong to
//! `async-graphql`; nothing here talks to the store directly.

pub mod error;
pub mod schema;
pub mod types;

pub use schema::{build_schema, sdl, MutationRoot, PersonSchema, QueryRoot};
pub use types::{AddressNode, GenderValue, PersonNode};
