use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{error::ErrorVerbosity, server, state::ApiState};

/// Router with a freshly seeded registry. Clones share the same state, so one
/// test can issue several requests against the same store.
fn app() -> Router {
    server::router(ApiState::new(ErrorVerbosity::Message))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    let body = match bytes.is_empty() {
        true => Value::Null,
        false => serde_json::from_slice(&bytes).expect("Response body is not JSON"),
    };

    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

fn patch(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::PATCH)
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

#[tokio::test]
async fn list_books_returns_seed_records_in_order() {
    let app = app();

    let (status, body) = send(&app, get("/books")).await;

    assert_eq!(status, StatusCode::OK);

    let books = body.as_array().expect("Expected an array");
    assert_eq!(books.len(), 4);

    let ids: Vec<_> = books.iter().map(|b| b["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["1", "2", "3", "4"]);

    let quantities: Vec<_> = books.iter().map(|b| b["quantity"].as_i64().unwrap()).collect();
    assert_eq!(quantities, [2, 20, 30, 40]);
}

#[tokio::test]
async fn create_book_appends_in_call_order() {
    let app = app();

    let first = json!({"id": "5", "title": "Refactoring", "author": "Martin Fowler", "quantity": 3});
    let second = json!({"id": "6", "title": "Clean Code", "author": "Robert C. Martin", "quantity": 7});

    let (status, body) = send(&app, post_json("/books", first.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, first);

    let (status, _) = send(&app, post_json("/books", second.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, get("/books")).await;
    let books = body.as_array().expect("Expected an array");
    assert_eq!(books.len(), 6);
    assert_eq!(books[4], first);
    assert_eq!(books[5], second);
}

#[tokio::test]
async fn create_book_allows_duplicate_ids() {
    let app = app();

    let duplicate = json!({"id": "1", "title": "Impostor", "author": "Nobody", "quantity": 9});

    let (status, _) = send(&app, post_json("/books", duplicate)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, get("/books")).await;
    assert_eq!(body.as_array().unwrap().len(), 5);

    // Lookups still resolve to the first match.
    let (status, body) = send(&app, get("/books/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "The Pragmatic Programmer");
}

#[tokio::test]
async fn create_book_rejects_malformed_payload() {
    let app = app();

    let (status, body) = send(&app, post_json("/books", json!({"id": "9", "title": "Partial"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to parse request body");

    // The failed create left the store untouched.
    let (_, body) = send(&app, get("/books")).await;
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn get_book_returns_matching_record() {
    let app = app();

    let (status, body) = send(&app, get("/books/2")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "2");
    assert_eq!(body["quantity"], 20);
}

#[tokio::test]
async fn get_book_unknown_id_is_not_found() {
    let app = app();

    let (status, body) = send(&app, get("/books/999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
async fn checkout_book_decrements_quantity() {
    let app = app();

    let (status, body) = send(&app, patch("/checkout?id=1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "success");
    assert_eq!(body["data"]["quantity"], 1);
}

#[tokio::test]
async fn checkout_book_fails_once_exhausted() {
    let app = app();

    // Seed quantity of book "1" is 2.
    for expected in [1, 0] {
        let (status, body) = send(&app, patch("/checkout?id=1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["quantity"], expected);
    }

    let (status, body) = send(&app, patch("/checkout?id=1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "book is not available at the moment, check in again later"
    );

    // The failed checkout did not touch the record.
    let (_, body) = send(&app, get("/books/1")).await;
    assert_eq!(body["quantity"], 0);
}

#[tokio::test]
async fn return_book_increments_quantity() {
    let app = app();

    let (status, body) = send(&app, patch("/return?id=1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity"], 3);
}

#[tokio::test]
async fn return_book_increments_past_seed_quantity() {
    let app = app();

    // No upper bound on returns.
    for expected in [41, 42, 43] {
        let (status, body) = send(&app, patch("/return?id=4")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quantity"], expected);
    }
}

#[tokio::test]
async fn checkout_book_without_id_is_bad_request() {
    let app = app();

    let (status, body) = send(&app, patch("/checkout")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "missing query parameter 'id'");

    // The store is untouched.
    let (_, body) = send(&app, get("/books")).await;
    let quantities: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["quantity"].as_i64().unwrap())
        .collect();
    assert_eq!(quantities, [2, 20, 30, 40]);
}

#[tokio::test]
async fn return_book_without_id_is_bad_request() {
    let app = app();

    let (status, body) = send(&app, patch("/return")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "missing query parameter 'id'");
}

#[tokio::test]
async fn checkout_book_unknown_id_is_not_found() {
    let app = app();

    let (status, body) = send(&app, patch("/checkout?id=999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "book not found");
}

#[tokio::test]
async fn return_book_unknown_id_is_not_found() {
    let app = app();

    let (status, body) = send(&app, patch("/return?id=999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "book not found");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = app();

    let (status, body) = send(&app, get("/shelves")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "The requested resource was not found");
}

#[tokio::test]
async fn wrong_method_is_method_not_allowed() {
    let app = app();

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/books")
        .body(Body::empty())
        .expect("Failed to build request");

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["message"], "Method not allowed");
}
