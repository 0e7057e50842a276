//! Core domain models.
//!
//! A person owns exactly one address through its `address_id` foreign key.
//! Whether that address is loaded is part of the type: a
//! [`PersonWithAddress`] carries the full [`Address`], a
//! [`PersonWithAddressRef`] only its [`AddressRef`].  Reads that skip the
//! join hand out the latter, so code that wants the street has to resolve
//! the reference first.

use serde::{Deserialize, Serialize};

use crate::DomainError;

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

/// Gender of a person.  The upper-case name is what the store keeps in
/// `PERSON.GENDER` and what both wire protocols carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Man,
    Woman,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Man, Gender::Woman, Gender::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Man => "MAN",
            Self::Woman => "WOMAN",
            Self::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = DomainError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MAN"   => Ok(Self::Man),
            "WOMAN" => Ok(Self::Woman),
            "OTHER" => Ok(Self::Other),
            other   => Err(DomainError::UnknownGender(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// An address that has not been stored yet.  It has no id to get wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAddress {
    pub street: String,
    pub zip_code: String,
    pub city: String,
}

impl NewAddress {
    pub fn new(
        street: impl Into<String>,
        zip_code: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            zip_code: zip_code.into(),
            city: city.into(),
        }
    }

    /// Attach the id handed out by the allocator.
    pub fn with_id(self, id: i32) -> Address {
        Address {
            id,
            street: self.street,
            zip_code: self.zip_code,
            city: self.city,
        }
    }
}

/// A fully hydrated, stored address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: i32,
    pub street: String,
    pub zip_code: String,
    pub city: String,
}

impl Address {
    pub fn to_ref(&self) -> AddressRef {
        AddressRef { id: self.id }
    }
}

/// Shallow reference to an address: the id and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressRef {
    pub id: i32,
}

impl AddressRef {
    pub fn new(id: i32) -> Self {
        Self { id }
    }

    /// `false` for the `0`/negative ids used by unsaved values.
    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }
}

// ---------------------------------------------------------------------------
// Person
// ---------------------------------------------------------------------------

/// A person not stored yet, together with the address it will own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    pub firstname: String,
    pub lastname: String,
    pub age: i32,
    pub gender: Gender,
    pub address: NewAddress,
}

impl NewPerson {
    pub fn new(
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        age: i32,
        gender: Gender,
        address: NewAddress,
    ) -> Self {
        Self {
            firstname: firstname.into(),
            lastname: lastname.into(),
            age,
            gender,
            address,
        }
    }
}

/// A stored person.  `A` is the hydration state of the owned address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person<A = Address> {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub age: i32,
    pub gender: Gender,
    pub address: A,
}

/// Person with the address loaded.  Returned by `create`.
pub type PersonWithAddress = Person<Address>;

/// Person holding only the address id.  Returned by every read.
pub type PersonWithAddressRef = Person<AddressRef>;

impl<A> Person<A> {
    fn with_address<B>(self, address: B) -> Person<B> {
        Person {
            id: self.id,
            firstname: self.firstname,
            lastname: self.lastname,
            age: self.age,
            gender: self.gender,
            address,
        }
    }
}

impl PersonWithAddress {
    /// Drop the loaded address down to its reference.
    pub fn to_ref(self) -> PersonWithAddressRef {
        let address = self.address.to_ref();
        self.with_address(address)
    }
}

impl PersonWithAddressRef {
    /// Id of the referenced address.
    pub fn address_id(&self) -> i32 {
        self.address.id
    }

    /// Swap the reference for the loaded address.
    ///
    /// Hands both values back untouched if `address` is not the one this
    /// person references.
    pub fn hydrate(self, address: Address) -> Result<PersonWithAddress, (Self, Address)> {
        if address.id != self.address.id {
            return Err((self, address));
        }
        Ok(self.with_address(address))
    }
}
