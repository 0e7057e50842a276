//! Person create / lookup / listing.
//!
//! Reads never join the address table: every person they return carries an
//! [`AddressRef`](domain::AddressRef) that callers resolve through
//! [`AddressRepository::get_by_id`] when they need more than the id.  Only
//! `create` returns the hydrated address, because it just wrote it.

use std::sync::Arc;

use domain::{NewPerson, Person, PersonWithAddress, PersonWithAddressRef};
use tokio_stream::StreamExt;
use tracing::{info, instrument};

use crate::{
    models::PersonRow,
    store::{RowStream, Sequence, Store},
    AddressRepository, DbError, IdAllocator,
};

/// Lazily decoded persons, each with a shallow address.
pub type PersonStream<'a> = RowStream<'a, PersonWithAddressRef>;

#[derive(Clone)]
pub struct PersonRepository {
    store: Arc<dyn Store>,
    ids: IdAllocator,
    addresses: AddressRepository,
}

impl PersonRepository {
    pub fn new(store: Arc<dyn Store>, addresses: AddressRepository) -> Self {
        Self {
            ids: IdAllocator::new(store.clone()),
            store,
            addresses,
        }
    }

    /// Store the address, then the person referencing it.
    ///
    /// The two inserts are independent statements.  If the person insert
    /// fails the address stays behind; nothing is rolled back.
    #[instrument(skip(self, person), fields(firstname = %person.firstname))]
    pub async fn create(&self, person: NewPerson) -> Result<PersonWithAddress, DbError> {
        let address = self.addresses.create(person.address).await?;
        let id = self.ids.next_id(Sequence::Person).await?;

        let person = Person {
            id,
            firstname: person.firstname,
            lastname: person.lastname,
            age: person.age,
            gender: person.gender,
            address,
        };

        let count = self.store.insert_person(&PersonRow::from(&person)).await?;
        info!(id, address_id = person.address.id, count, "insert person");

        Ok(person)
    }

    /// Fetch a person with a shallow address reference.
    ///
    /// Returns `DbError::NotFound` if no row matches.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<PersonWithAddressRef, DbError> {
        let row = self
            .store
            .select_person(id)
            .await?
            .ok_or(DbError::NotFound { entity: "person", id })?;

        PersonWithAddressRef::try_from(row)
    }

    /// Every person, in store order.
    pub fn list(&self) -> PersonStream<'_> {
        decode(self.store.select_all_person())
    }

    /// Persons whose first name is exactly `firstname`.  No match is an empty
    /// stream, not an error.
    pub fn list_by_first_name<'a>(&'a self, firstname: &'a str) -> PersonStream<'a> {
        decode(self.store.select_all_person_firstname(firstname))
    }
}

fn decode(rows: RowStream<'_, PersonRow>) -> PersonStream<'_> {
    Box::pin(rows.map(|row| row.and_then(PersonWithAddressRef::try_from)))
}
