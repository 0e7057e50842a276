//! End-to-end scenarios through the HTTP router, in-memory store.
//!
//! Graph calls go through `/graphql` as JSON in-process; gRPC calls use the
//! generated clients against the same router on a real listener.

use std::sync::Arc;

use api::{router, AppState};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use db::MemoryStore;
use rpc::proto::{
    self, address_service_client::AddressServiceClient,
    person_service_client::PersonServiceClient,
};
use serde_json::{json, Value};
use tonic::Code;
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::new(Arc::new(MemoryStore::new())))
}

async fn graph(app: &Router, query: &str) -> Value {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "query": query }).to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Serve `app` on an ephemeral port and return its base URL for gRPC clients.
async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

const CREATE_ADDRESS: &str = r#"mutation {
    createAddress(street: "1 Main St", zipCode: "00000", city: "Springfield") { id street zipCode city }
}"#;

const CREATE_ADA: &str = r#"mutation {
    createPersonWithAddress(firstname: "Ada", lastname: "Lovelace", age: 30,
        street: "1 Main St", zipCode: "00000", city: "Springfield", gender: MAN) {
        id address { id street }
    }
}"#;

#[tokio::test]
async fn scenario_1_create_address_then_read_it_back() {
    let app = app();

    let created = graph(&app, CREATE_ADDRESS).await;
    assert_eq!(
        created["data"]["createAddress"],
        json!({ "id": 1, "street": "1 Main St", "zipCode": "00000", "city": "Springfield" })
    );

    let mut client = AddressServiceClient::connect(spawn(app.clone()).await).await.unwrap();
    let found = client
        .address_by_id(proto::QueryAddress { id: 1 })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(found.street, "1 Main St");
    assert_eq!(found.zip_code, "00000");
    assert_eq!(found.city, "Springfield");
}

#[tokio::test]
async fn scenario_2_create_person_returns_the_hydrated_address() {
    let app = app();

    let created = graph(&app, CREATE_ADA).await;
    assert_eq!(
        created["data"]["createPersonWithAddress"],
        json!({ "id": 1, "address": { "id": 1, "street": "1 Main St" } })
    );
}

#[tokio::test]
async fn scenario_3_read_person_by_id() {
    let app = app();
    graph(&app, CREATE_ADA).await;

    let found = graph(&app, "{ personById(id: 1) { lastname address { id } } }").await;
    assert_eq!(
        found["data"]["personById"],
        json!({ "lastname": "Lovelace", "address": { "id": 1 } })
    );
}

#[tokio::test]
async fn scenario_4_rpc_create_person_rehydrates_the_address() {
    let app = app();

    let mut client = PersonServiceClient::connect(spawn(app.clone()).await).await.unwrap();
    let person = client
        .create_person_with_address(proto::PersonWithAddressToSave {
            firstname: "Ada".into(),
            lastname: "Lovelace".into(),
            age: 30,
            gender: proto::Gender::Man as i32,
            street: "1 Main St".into(),
            zip_code: "00000".into(),
            city: "Springfield".into(),
        })
        .await
        .unwrap()
        .into_inner();

    assert_eq!(person.id, 1);
    assert_eq!(
        person.address,
        Some(proto::Address {
            id: 1,
            street: "1 Main St".into(),
            zip_code: "00000".into(),
            city: "Springfield".into(),
        })
    );

    // Both front ends share the same repositories.
    let listed = graph(&app, "{ persons { firstname address { city } } }").await;
    assert_eq!(
        listed["data"]["persons"],
        json!([{ "firstname": "Ada", "address": { "city": "Springfield" } }])
    );
}

#[tokio::test]
async fn grpc_failures_carry_their_status() {
    let url = spawn(app()).await;
    let mut persons = PersonServiceClient::connect(url.clone()).await.unwrap();
    let mut addresses = AddressServiceClient::connect(url).await.unwrap();

    let status = persons
        .person_by_id(proto::QueryPerson { id: 7, ..Default::default() })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    let status = persons
        .persons_by_first_name(proto::QueryPerson::default())
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);

    let status = addresses
        .address_by_id(proto::QueryAddress::default())
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn grpc_is_served_on_the_canonical_path() {
    let app = app();
    // One empty gRPC frame: no compression flag, zero length.
    let request = Request::builder()
        .method(Method::POST)
        .uri("/person.PersonService/Persons")
        .header(header::CONTENT_TYPE, "application/grpc")
        .header("te", "trailers")
        .body(Body::from(vec![0u8; 5]))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/grpc");
}

#[tokio::test]
async fn sdl_is_served() {
    let app = app();
    let request = Request::builder()
        .uri("/graphql/sdl")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&body).contains("createPersonWithAddress"));
}
