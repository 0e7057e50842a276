//! Repositories: one per entity.
//!
//! Each method is one or more store round trips with no retry.  Repositories
//! hold no per-request state and are cheap to clone; both protocol adapters
//! share the same instances.

pub mod addresses;
pub mod persons;

pub use addresses::AddressRepository;
pub use persons::{PersonRepository, PersonStream};
