//! Query and mutation roots.
//!
//! The repositories are registered as schema data; every resolver looks them
//! up from the context, so the roots themselves carry no state.

use async_graphql::{Context, EmptySubscription, Object, Result, Schema};
use db::{AddressRepository, PersonRepository, PersonStream};
use domain::{NewAddress, NewPerson};
use tokio_stream::StreamExt;

use crate::error::graph_error;
use crate::types::{AddressNode, GenderValue, PersonNode};

pub type PersonSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema over the shared repositories.
pub fn build_schema(addresses: AddressRepository, persons: PersonRepository) -> PersonSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(addresses)
        .data(persons)
        .finish()
}

/// Schema definition language text for the schema.
pub fn sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

/// The graph response is one document, so list reads are drained eagerly.
async fn drain(persons: PersonStream<'_>) -> Result<Vec<PersonNode>> {
    let persons: Vec<_> = persons
        .collect::<std::result::Result<_, _>>()
        .await
        .map_err(graph_error)?;
    Ok(persons.into_iter().map(PersonNode::from).collect())
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn persons(&self, ctx: &Context<'_>) -> Result<Vec<PersonNode>> {
        let persons = ctx.data::<PersonRepository>()?;
        drain(persons.list()).await
    }

    async fn person_by_id(&self, ctx: &Context<'_>, id: i32) -> Result<PersonNode> {
        let persons = ctx.data::<PersonRepository>()?;
        let person = persons.get_by_id(id).await.map_err(graph_error)?;
        Ok(person.into())
    }

    async fn persons_by_first_name(
        &self,
        ctx: &Context<'_>,
        firstname: String,
    ) -> Result<Vec<PersonNode>> {
        let persons = ctx.data::<PersonRepository>()?;
        drain(persons.list_by_first_name(&firstname)).await
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_address(
        &self,
        ctx: &Context<'_>,
        street: String,
        zip_code: String,
        city: String,
    ) -> Result<AddressNode> {
        let addresses = ctx.data::<AddressRepository>()?;
        let address = addresses
            .create(NewAddress::new(street, zip_code, city))
            .await
            .map_err(graph_error)?;
        Ok(address.into())
    }

    async fn create_person_with_address(
        &self,
        ctx: &Context<'_>,
        firstname: String,
        lastname: String,
        age: i32,
        street: String,
        zip_code: String,
        city: String,
        gender: GenderValue,
    ) -> Result<PersonNode> {
        let persons = ctx.data::<PersonRepository>()?;
        let person = NewPerson::new(
            firstname,
            lastname,
            age,
            gender.into(),
            NewAddress::new(street, zip_code, city),
        );
        let person = persons.create(person).await.map_err(graph_error)?;
        Ok(person.into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use db::store::memory::{Fault, MemoryStore};
    use serde_json::{json, Value};

    use super::*;

    fn schema() -> (Arc<MemoryStore>, PersonSchema) {
        let store = Arc::new(MemoryStore::new());
        let addresses = AddressRepository::new(store.clone());
        let persons = PersonRepository::new(store.clone(), addresses.clone());
        (store, build_schema(addresses, persons))
    }

    async fn run(schema: &PersonSchema, query: &str) -> Value {
        let response = schema.execute(query).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        response.data.into_json().unwrap()
    }

    const CREATE_ADA: &str = r#"mutation {
        createPersonWithAddress(firstname: "Ada", lastname: "Lovelace", age: 30,
            street: "1 Main St", zipCode: "00000", city: "Springfield", gender: MAN) {
            id firstname gender address { id street zipCode city }
        }
    }"#;

    #[tokio::test]
    async fn create_address_returns_the_new_id() {
        let (_, schema) = schema();
        let data = run(
            &schema,
            r#"mutation { createAddress(street: "1 Main St", zipCode: "00000", city: "Springfield") { id street } }"#,
        )
        .await;
        assert_eq!(data, json!({ "createAddress": { "id": 1, "street": "1 Main St" } }));
    }

    #[tokio::test]
    async fn created_person_returns_the_new_address() {
        let (_, schema) = schema();
        let data = run(&schema, CREATE_ADA).await;
        assert_eq!(
            data["createPersonWithAddress"],
            json!({
                "id": 1,
                "firstname": "Ada",
                "gender": "MAN",
                "address": { "id": 1, "street": "1 Main St", "zipCode": "00000", "city": "Springfield" }
            })
        );
    }

    #[tokio::test]
    async fn created_person_address_goes_through_the_repository() {
        let (store, schema) = schema();
        // Inserts still succeed; only the address lookup can fail.
        store.arm(Fault::Select);
        let response = schema.execute(CREATE_ADA).await;

        assert_eq!(store.person_count(), 1);
        assert_eq!(response.errors.len(), 1);
        let code = response.errors[0]
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(async_graphql::Value::from("PERSISTENCE_FAILED")));
    }

    #[tokio::test]
    async fn person_by_id_resolves_the_address_on_demand() {
        let (_, schema) = schema();
        run(&schema, CREATE_ADA).await;

        let data = run(&schema, "{ personById(id: 1) { lastname address { id city } } }").await;
        assert_eq!(
            data,
            json!({ "personById": { "lastname": "Lovelace", "address": { "id": 1, "city": "Springfield" } } })
        );
    }

    #[tokio::test]
    async fn address_field_honours_an_explicit_id() {
        let (_, schema) = schema();
        run(&schema, CREATE_ADA).await;
        run(
            &schema,
            r#"mutation { createAddress(street: "2 Side St", zipCode: "11111", city: "Shelbyville") { id } }"#,
        )
        .await;

        let data = run(&schema, "{ personById(id: 1) { address(id: 2) { street } } }").await;
        assert_eq!(data["personById"]["address"]["street"], "2 Side St");
    }

    #[tokio::test]
    async fn persons_and_first_name_filter() {
        let (_, schema) = schema();
        run(&schema, CREATE_ADA).await;

        let data = run(&schema, "{ persons { firstname } }").await;
        assert_eq!(data, json!({ "persons": [{ "firstname": "Ada" }] }));

        let data = run(&schema, r#"{ personsByFirstName(firstname: "nonexistent") { id } }"#).await;
        assert_eq!(data, json!({ "personsByFirstName": [] }));
    }

    #[tokio::test]
    async fn unknown_person_is_a_not_found_error() {
        let (_, schema) = schema();
        let response = schema.execute("{ personById(id: 99) { id } }").await;

        assert_eq!(response.errors.len(), 1);
        let code = response.errors[0]
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(async_graphql::Value::from("NOT_FOUND")));
    }

    #[tokio::test]
    async fn missing_required_argument_is_rejected() {
        let (_, schema) = schema();
        let response = schema.execute("{ personById { id } }").await;
        assert!(!response.errors.is_empty());
    }

    #[test]
    fn sdl_exposes_the_contract_names() {
        let sdl = sdl();
        for name in [
            "persons",
            "personById",
            "personsByFirstName",
            "createAddress",
            "createPersonWithAddress",
            "zipCode",
        ] {
            assert!(sdl.contains(name), "missing {name} in\n{sdl}");
        }
    }
}
