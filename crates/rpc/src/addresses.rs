//! `AddressService` over the address repository.

use db::AddressRepository;
use tonic::{Request, Response, Status};
use tracing::instrument;

use crate::convert::{address_message, new_address};
use crate::error::status_from;
use crate::proto::address_service_server::AddressService;
use crate::proto::{Address, AddressToSave, QueryAddress};

#[derive(Clone)]
pub struct AddressGrpcService {
    addresses: AddressRepository,
}

impl AddressGrpcService {
    pub fn new(addresses: AddressRepository) -> Self {
        Self { addresses }
    }
}

#[tonic::async_trait]
impl AddressService for AddressGrpcService {
    #[instrument(skip_all)]
    async fn create_address(
        &self,
        request: Request<AddressToSave>,
    ) -> Result<Response<Address>, Status> {
        let address = self
            .addresses
            .create(new_address(request.into_inner()))
            .await
            .map_err(status_from)?;
        Ok(Response::new(address_message(address)))
    }

    #[instrument(skip_all)]
    async fn address_by_id(&self, request: Request<QueryAddress>) -> Result<Response<Address>, Status> {
        let id = request.into_inner().id;
        if id == 0 {
            return Err(Status::invalid_argument("id is required"));
        }

        let address = self.addresses.get_by_id(id).await.map_err(status_from)?;
        Ok(Response::new(address_message(address)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use db::store::memory::{Fault, MemoryStore};
    use tonic::Code;

    use super::*;

    fn service() -> (Arc<MemoryStore>, AddressGrpcService) {
        let store = Arc::new(MemoryStore::new());
        let service = AddressGrpcService::new(AddressRepository::new(store.clone()));
        (store, service)
    }

    fn main_street() -> AddressToSave {
        AddressToSave {
            street: "1 Main St".into(),
            zip_code: "00000".into(),
            city: "Springfield".into(),
        }
    }

    #[tokio::test]
    async fn created_address_is_returned_by_id() {
        let (_, service) = service();

        let created = service
            .create_address(Request::new(main_street()))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(created.id, 1);

        let found = service
            .address_by_id(Request::new(QueryAddress { id: created.id }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(found, created);
        assert_eq!(found.zip_code, "00000");
    }

    #[tokio::test]
    async fn unknown_address_is_not_found() {
        let (_, service) = service();

        let status = service
            .address_by_id(Request::new(QueryAddress { id: 3 }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn absent_id_is_invalid() {
        let (_, service) = service();

        let status = service
            .address_by_id(Request::new(QueryAddress::default()))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn failed_insert_is_internal() {
        let (store, service) = service();
        store.arm(Fault::InsertAddress);

        let status = service
            .create_address(Request::new(main_street()))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::Internal);
    }
}
