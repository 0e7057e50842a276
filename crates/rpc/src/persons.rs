//! `PersonService` over the person and address repositories.

use db::{AddressRepository, PersonRepository, PersonStream};
use domain::PersonWithAddressRef;
use tokio_stream::StreamExt;
use tonic::{Request, Response, Status};
use tracing::instrument;

use crate::convert::{address_message, new_person, person_message, shallow_address_message};
use crate::error::status_from;
use crate::proto::person_service_server::PersonService;
use crate::proto::{self, PersonWithAddressToSave, Persons, QueryPerson};

#[derive(Clone)]
pub struct PersonGrpcService {
    persons: PersonRepository,
    addresses: AddressRepository,
}

impl PersonGrpcService {
    pub fn new(persons: PersonRepository, addresses: AddressRepository) -> Self {
        Self { persons, addresses }
    }

    /// Load the referenced address and build the message.
    ///
    /// Unsaved references (`id <= 0`) go out as they are.  A failed lookup
    /// fails the call.
    async fn rehydrate(&self, person: PersonWithAddressRef) -> Result<proto::Person, Status> {
        let address = if person.address.is_persisted() {
            let address = self
                .addresses
                .get_by_id(person.address_id())
                .await
                .map_err(status_from)?;
            address_message(address)
        } else {
            shallow_address_message(person.address)
        };
        Ok(person_message(person, address))
    }

    async fn persons_message(&self, persons: PersonStream<'_>) -> Result<Persons, Status> {
        let persons: Vec<_> = persons
            .collect::<Result<_, _>>()
            .await
            .map_err(status_from)?;

        let mut messages = Vec::with_capacity(persons.len());
        for person in persons {
            messages.push(self.rehydrate(person).await?);
        }
        Ok(Persons { persons: messages })
    }
}

#[tonic::async_trait]
impl PersonService for PersonGrpcService {
    #[instrument(skip_all)]
    async fn persons(&self, _request: Request<QueryPerson>) -> Result<Response<Persons>, Status> {
        let persons = self.persons_message(self.persons.list()).await?;
        Ok(Response::new(persons))
    }

    #[instrument(skip_all)]
    async fn person_by_id(
        &self,
        request: Request<QueryPerson>,
    ) -> Result<Response<proto::Person>, Status> {
        let id = request.into_inner().id;
        if id == 0 {
            return Err(Status::invalid_argument("id is required"));
        }

        let person = self.persons.get_by_id(id).await.map_err(status_from)?;
        Ok(Response::new(self.rehydrate(person).await?))
    }

    #[instrument(skip_all)]
    async fn persons_by_first_name(
        &self,
        request: Request<QueryPerson>,
    ) -> Result<Response<Persons>, Status> {
        let firstname = request.into_inner().firstname;
        if firstname.is_empty() {
            return Err(Status::invalid_argument("firstname is required"));
        }

        let persons = self
            .persons_message(self.persons.list_by_first_name(&firstname))
            .await?;
        Ok(Response::new(persons))
    }

    #[instrument(skip_all)]
    async fn create_person_with_address(
        &self,
        request: Request<PersonWithAddressToSave>,
    ) -> Result<Response<proto::Person>, Status> {
        let person = new_person(request.into_inner())?;
        let person = self.persons.create(person).await.map_err(status_from)?;

        // Re-read the address like every other path does.
        Ok(Response::new(self.rehydrate(person.to_ref()).await?))
    }
}
