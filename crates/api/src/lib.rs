//! `api` crate: HTTP front door for both protocol adapters.
//!
//! Exposes, on one listener (HTTP/1.1 and h2c):
//!   GET|POST /graphql                    graph queries and mutations
//!   GET      /graphql/sdl                schema text
//!   POST     /person.PersonService/*     gRPC
//!   POST     /person.AddressService/*    gRPC

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use async_graphql_axum::GraphQL;
use db::{AddressRepository, PersonRepository, Store};
use graph::PersonSchema;
use rpc::{AddressGrpcService, PersonGrpcService};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::ApiError;

/// Shared handles for every request.
///
/// One repository instance per entity type backs both adapters.
#[derive(Clone)]
pub struct AppState {
    pub schema: PersonSchema,
    pub persons: PersonGrpcService,
    pub addresses: AddressGrpcService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        let addresses = AddressRepository::new(store.clone());
        let persons = PersonRepository::new(store, addresses.clone());

        Self {
            schema: graph::build_schema(addresses.clone(), persons.clone()),
            persons: PersonGrpcService::new(persons, addresses.clone()),
            addresses: AddressGrpcService::new(addresses),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let grpc = rpc::routes(state.persons.clone(), state.addresses.clone()).into_axum_router();

    Router::new()
        .route_service("/graphql", GraphQL::new(state.schema.clone()))
        .route("/graphql/sdl", get(handlers::graph::sdl))
        .with_state(state)
        .merge(grpc)
        .layer(TraceLayer::new_for_http())
}

/// Bind `bind` and serve until the process is stopped.
pub async fn serve(bind: &str, state: AppState) -> Result<(), ApiError> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|source| ApiError::Bind {
            addr: bind.to_string(),
            source,
        })?;
    info!("listening on {}", listener.local_addr().map_err(ApiError::Serve)?);

    axum::serve(listener, router(state))
        .await
        .map_err(ApiError::Serve)
}
