//! `domain` crate: in-memory `Person` / `Address` model.
//!
//! Nothing in here knows about SQL rows, graph types or protobuf messages.
//! The store and both protocol adapters translate to and from these types.

pub mod error;
pub mod models;

pub use error::DomainError;
pub use models::{
    Address, AddressRef, Gender, NewAddress, NewPerson, Person, PersonWithAddress,
    PersonWithAddressRef,
};
