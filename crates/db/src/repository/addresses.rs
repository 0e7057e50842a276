//! Address create / lookup.

use std::sync::Arc;

use domain::{Address, NewAddress};
use tracing::{info, instrument};

use crate::{
    models::AddressRow,
    store::{Sequence, Store},
    DbError, IdAllocator,
};

#[derive(Clone)]
pub struct AddressRepository {
    store: Arc<dyn Store>,
    ids: IdAllocator,
}

impl AddressRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            ids: IdAllocator::new(store.clone()),
            store,
        }
    }

    /// Allocate an id and insert the address.
    ///
    /// The id is consumed even if the insert fails.
    #[instrument(skip(self, address), fields(city = %address.city))]
    pub async fn create(&self, address: NewAddress) -> Result<Address, DbError> {
        let id = self.ids.next_id(Sequence::Address).await?;
        let address = address.with_id(id);

        let count = self.store.insert_address(&AddressRow::from(&address)).await?;
        info!(id, count, "insert address");

        Ok(address)
    }

    /// Fetch a fully hydrated address.
    ///
    /// Returns `DbError::NotFound` if no row matches.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<Address, DbError> {
        let row = self
            .store
            .select_address(id)
            .await?
            .ok_or(DbError::NotFound { entity: "address", id })?;

        Ok(row.into())
    }
}
