//! Domain values to and from wire messages.  Pure functions, no I/O.

use domain::{Address, AddressRef, Gender, NewAddress, NewPerson, Person};
use tonic::Status;

use crate::proto;

impl From<Gender> for proto::Gender {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Man => Self::Man,
            Gender::Woman => Self::Woman,
            Gender::Other => Self::Other,
        }
    }
}

impl From<proto::Gender> for Gender {
    fn from(gender: proto::Gender) -> Self {
        match gender {
            proto::Gender::Man => Self::Man,
            proto::Gender::Woman => Self::Woman,
            proto::Gender::Other => Self::Other,
        }
    }
}

pub fn address_message(address: Address) -> proto::Address {
    proto::Address {
        id: address.id,
        street: address.street,
        zip_code: address.zip_code,
        city: address.city,
    }
}

/// What goes on the wire for a reference that could not be resolved: the
/// id and empty fields.
pub fn shallow_address_message(address: AddressRef) -> proto::Address {
    proto::Address {
        id: address.id,
        ..Default::default()
    }
}

pub fn person_message<A>(person: Person<A>, address: proto::Address) -> proto::Person {
    proto::Person {
        id: person.id,
        firstname: person.firstname,
        lastname: person.lastname,
        age: person.age,
        gender: proto::Gender::from(person.gender) as i32,
        address: Some(address),
    }
}

pub fn new_address(request: proto::AddressToSave) -> NewAddress {
    NewAddress::new(request.street, request.zip_code, request.city)
}

pub fn new_person(request: proto::PersonWithAddressToSave) -> Result<NewPerson, Status> {
    let gender = proto::Gender::try_from(request.gender)
        .map_err(|_| Status::invalid_argument(format!("unknown gender value {}", request.gender)))?;
    Ok(NewPerson::new(
        request.firstname,
        request.lastname,
        request.age,
        gender.into(),
        NewAddress::new(request.street, request.zip_code, request.city),
    ))
}
