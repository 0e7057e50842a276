//! Graph object types.

use async_graphql::{Context, Enum, Object, Result, SimpleObject};
use db::AddressRepository;
use domain::{Address, Gender, PersonWithAddress, PersonWithAddressRef};

use crate::error::graph_error;

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(name = "Gender")]
pub enum GenderValue {
    Man,
    Woman,
    Other,
}

impl From<Gender> for GenderValue {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Man => Self::Man,
            Gender::Woman => Self::Woman,
            Gender::Other => Self::Other,
        }
    }
}

impl From<GenderValue> for Gender {
    fn from(gender: GenderValue) -> Self {
        match gender {
            GenderValue::Man => Self::Man,
            GenderValue::Woman => Self::Woman,
            GenderValue::Other => Self::Other,
        }
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

#[derive(SimpleObject, Debug, Clone, PartialEq, Eq)]
#[graphql(name = "Address")]
pub struct AddressNode {
    pub id: i32,
    pub street: String,
    pub zip_code: String,
    pub city: String,
}

impl From<Address> for AddressNode {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            street: address.street,
            zip_code: address.zip_code,
            city: address.city,
        }
    }
}

// ---------------------------------------------------------------------------
// Person
// ---------------------------------------------------------------------------

/// A person as the graph sees it.
///
/// Only the address id is kept; `address` is fetched when the query selects
/// it, whether the person was just created or read back.
#[derive(Debug, Clone)]
pub struct PersonNode {
    person: PersonWithAddressRef,
}

impl From<PersonWithAddressRef> for PersonNode {
    fn from(person: PersonWithAddressRef) -> Self {
        Self { person }
    }
}

impl From<PersonWithAddress> for PersonNode {
    fn from(person: PersonWithAddress) -> Self {
        Self {
            person: person.to_ref(),
        }
    }
}

#[Object(name = "Person")]
impl PersonNode {
    async fn id(&self) -> i32 {
        self.person.id
    }

    async fn firstname(&self) -> &str {
        &self.person.firstname
    }

    async fn lastname(&self) -> &str {
        &self.person.lastname
    }

    async fn age(&self) -> i32 {
        self.person.age
    }

    async fn gender(&self) -> GenderValue {
        self.person.gender.into()
    }

    /// The owned address, or the one named by `id` when given.
    async fn address(&self, ctx: &Context<'_>, id: Option<i32>) -> Result<AddressNode> {
        let id = id.unwrap_or(self.person.address_id());
        let addresses = ctx.data::<AddressRepository>()?;
        let address = addresses.get_by_id(id).await.map_err(graph_error)?;
        Ok(address.into())
    }
}
