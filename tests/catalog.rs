use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use catalog_back::{
    AppError, app,
    queries::product_queries,
    store::{EnsureOutcome, MemoryStore},
};

async fn build_app() -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new());
    let app = app::build_with_store(store.clone())
        .await
        .expect("router should build against the memory store");

    (store, app)
}

async fn response_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("body should be JSON")
}

fn list_request() -> Request<Body> {
    Request::builder()
        .uri("/products")
        .body(Body::empty())
        .unwrap()
}

fn add_request(id: &str, name: &str, price: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "id": id, "name": name, "price": price }).to_string(),
        ))
        .unwrap()
}

#[tokio::test]
async fn ensure_table_is_idempotent() {
    let store = MemoryStore::new();

    let first = product_queries::ensure_table(&store).await.unwrap();
    let second = product_queries::ensure_table(&store).await.unwrap();

    assert_eq!(first, EnsureOutcome::Created);
    assert_eq!(second, EnsureOutcome::AlreadyExists);
    assert!(store.table_exists());
}

#[tokio::test]
async fn provisioning_failure_aborts_startup() {
    let store = Arc::new(MemoryStore::new());
    store.fail_ensure(true);

    let err = app::build_with_store(store.clone())
        .await
        .expect_err("startup must not continue without a table");

    assert!(matches!(err, AppError::Schema(_)));
    assert!(err.is_fatal());
    assert!(!store.table_exists());
}

#[tokio::test]
async fn empty_catalog_reports_no_products() {
    let (_store, app) = build_app().await;

    let response = app.oneshot(list_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["products"], json!([]));
    assert_eq!(body["notice"], "No products available.");
}

#[tokio::test]
async fn added_product_shows_up_with_truncated_price() {
    let (_store, app) = build_app().await;

    let response = app
        .clone()
        .oneshot(add_request("1", "Widget", "9.99"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["message"], "Product added successfully!");

    let response = app.oneshot(list_request()).await.unwrap();
    let body = response_json(response).await;
    assert_eq!(
        body["products"],
        json!([{ "id": 1, "name": "Widget", "price": 9 }])
    );
    assert_eq!(body.get("notice"), None);
}

#[tokio::test]
async fn adding_an_existing_id_overwrites_the_record() {
    let (_store, app) = build_app().await;

    let response = app
        .clone()
        .oneshot(add_request("1", "Widget", "9.99"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(add_request("1", "Widget-v2", "15"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(list_request()).await.unwrap();
    let body = response_json(response).await;
    assert_eq!(
        body["products"],
        json!([{ "id": 1, "name": "Widget-v2", "price": 15 }])
    );
}

#[tokio::test]
async fn empty_fields_are_rejected_before_the_store() {
    let (store, app) = build_app().await;

    let response = app
        .clone()
        .oneshot(add_request("", "", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["message"], "Please fill all fields.");
    assert_eq!(store.put_calls(), 0);

    let response = app.oneshot(list_request()).await.unwrap();
    let body = response_json(response).await;
    assert_eq!(body["products"], json!([]));
}

#[tokio::test]
async fn malformed_numbers_are_rejected_before_the_store() {
    let (store, app) = build_app().await;

    for (id, name, price) in [("abc", "Widget", "10"), ("1", "Widget", "free")] {
        let response = app
            .clone()
            .oneshot(add_request(id, name, price))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await;
        assert_eq!(
            body["message"],
            "Invalid input. Ensure that the ID is an integer and the price is a number."
        );
    }

    assert_eq!(store.put_calls(), 0);
}

#[tokio::test]
async fn read_failure_yields_an_empty_catalog_and_the_service_keeps_running() {
    let (store, app) = build_app().await;

    store.fail_reads(true);

    let response = app.clone().oneshot(list_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["products"], json!([]));
    assert_eq!(
        body["notice"],
        "Error retrieving products. Please try again later."
    );

    // The service still answers once the store recovers.
    store.fail_reads(false);

    let response = app.oneshot(list_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["notice"], "No products available.");
}

#[tokio::test]
async fn write_failure_is_reported_and_recoverable() {
    let (store, app) = build_app().await;

    store.fail_writes(true);

    let response = app
        .clone()
        .oneshot(add_request("1", "Widget", "10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response).await;
    assert_eq!(
        body["message"],
        "Error adding product. Please check your input and try again."
    );

    store.fail_writes(false);

    let response = app
        .clone()
        .oneshot(add_request("1", "Widget", "10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(list_request()).await.unwrap();
    let body = response_json(response).await;
    assert_eq!(
        body["products"],
        json!([{ "id": 1, "name": "Widget", "price": 10 }])
    );
}

#[tokio::test]
async fn health_endpoints_answer() {
    let (_store, app) = build_app().await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health/ready")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "ready");
}
