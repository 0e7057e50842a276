//! `rpc` crate: gRPC adapter generated from `proto/person.proto`.
//!
//! Unlike the graph adapter there is no later, per-field resolution on this
//! protocol, so every person leaves with its address already loaded.

pub mod addresses;
pub mod convert;
pub mod error;
pub mod persons;

/// Messages, server stubs and clients for the `person` package.
pub mod proto {
    tonic::include_proto!("person");
}

use tonic::service::Routes;

pub use addresses::AddressGrpcService;
pub use persons::PersonGrpcService;
pub use proto::address_service_server::{AddressService, AddressServiceServer};
pub use proto::person_service_server::{PersonService, PersonServiceServer};

/// Both services, ready to be served on their canonical
/// `/person.<Service>/<Method>` paths.
pub fn routes(persons: PersonGrpcService, addresses: AddressGrpcService) -> Routes {
    Routes::new(PersonServiceServer::new(persons)).add_service(AddressServiceServer::new(addresses))
}
