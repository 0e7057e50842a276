//! Row structs that map 1-to-1 onto database tables.
//!
//! These are *persistence* models.  Domain types live in the `domain` crate;
//! the conversions below are the only place the two meet.

use domain::{Address, AddressRef, Gender, Person, PersonWithAddress, PersonWithAddressRef};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::DbError;

// ---------------------------------------------------------------------------
// ADDRESS
// ---------------------------------------------------------------------------

/// `ADDRESS(ID, STREET, ZIPCODE, CITY)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AddressRow {
    pub id: i32,
    pub street: String,
    #[sqlx(rename = "zipcode")]
    pub zip_code: String,
    pub city: String,
}

impl From<&Address> for AddressRow {
    fn from(address: &Address) -> Self {
        Self {
            id: address.id,
            street: address.street.clone(),
            zip_code: address.zip_code.clone(),
            city: address.city.clone(),
        }
    }
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: row.id,
            street: row.street,
            zip_code: row.zip_code,
            city: row.city,
        }
    }
}

// ---------------------------------------------------------------------------
// PERSON
// ---------------------------------------------------------------------------

/// `PERSON(ID, FIRSTNAME, LASTNAME, AGE, GENDER, ADDRESS_ID)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PersonRow {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub age: i32,
    /// Upper-case [`Gender`] name.
    pub gender: String,
    pub address_id: i32,
}

impl From<&PersonWithAddress> for PersonRow {
    fn from(person: &PersonWithAddress) -> Self {
        Self {
            id: person.id,
            firstname: person.firstname.clone(),
            lastname: person.lastname.clone(),
            age: person.age,
            gender: person.gender.as_str().to_string(),
            address_id: person.address.id,
        }
    }
}

impl TryFrom<PersonRow> for PersonWithAddressRef {
    type Error = DbError;

    /// The person table only knows the address id, so this is always shallow.
    fn try_from(row: PersonRow) -> Result<Self, Self::Error> {
        let gender: Gender = row
            .gender
            .parse()
            .map_err(|e| DbError::InvalidRow(format!("person {}: {e}", row.id)))?;
        Ok(Person {
            id: row.id,
            firstname: row.firstname,
            lastname: row.lastname,
            age: row.age,
            gender,
            address: AddressRef::new(row.address_id),
        })
    }
}
