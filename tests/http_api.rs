//! End-to-end tests of the HTTP surface over the in-memory store.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use todograph::{MemoryStore, TodoService, http};
use tower::ServiceExt;

fn app() -> Router {
    http::router(TodoService::new(Arc::new(MemoryStore::new())), None)
}

/// Issue one request and return status plus parsed JSON body (Null for an
/// empty body).
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn list_starts_empty() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn full_lifecycle() {
    let app = app();

    // POST -> 201 with a generated id and completed=false.
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/todos",
        Some(json!({ "title": "Pay rent", "category": "Travail" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "Pay rent");
    assert_eq!(created["category"], "Travail");
    assert_eq!(created["completed"], false);
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    // PUT -> 200 with completed=true.
    let (status, updated) = send(
        &app,
        Method::PUT,
        "/api/todos",
        Some(json!({ "id": id, "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["completed"], true);

    // DELETE -> 204 with an empty body.
    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/todos?id={id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    // GET -> the id is gone.
    let (status, todos) = send(&app, Method::GET, "/api/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        todos
            .as_array()
            .unwrap()
            .iter()
            .all(|t| t["id"].as_str() != Some(id.as_str()))
    );
}

#[tokio::test]
async fn post_without_required_fields_is_rejected() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/todos",
        Some(json!({ "category": "Course" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "title is required");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/todos",
        Some(json!({ "title": "Buy milk" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "category is required");
}

#[tokio::test]
async fn post_with_unknown_category_is_not_found() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/todos",
        Some(json!({ "title": "Buy milk", "category": "Invalid" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "category \"Invalid\" not found");
}

#[tokio::test]
async fn post_returns_canonical_category_casing() {
    let app = app();
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/todos",
        Some(json!({ "title": "Buy milk", "category": "course" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["category"], "Course");
}

#[tokio::test]
async fn put_without_id_is_rejected() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/todos",
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_with_unknown_id_is_not_found() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/todos",
        Some(json!({ "id": "missing", "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "todo \"missing\" not found");
}

#[tokio::test]
async fn delete_without_id_is_rejected() {
    let app = app();
    let (status, _) = send(&app, Method::DELETE, "/api/todos", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_with_unknown_id_is_not_found() {
    let app = app();
    let (status, _) = send(&app, Method::DELETE, "/api/todos?id=missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_supports_a_category_filter() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/api/todos",
        Some(json!({ "title": "Pay rent", "category": "Travail" })),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/api/todos",
        Some(json!({ "title": "Buy milk", "category": "Course" })),
    )
    .await;

    let (status, todos) = send(&app, Method::GET, "/api/todos?category=travail", None).await;
    assert_eq!(status, StatusCode::OK);
    let todos = todos.as_array().unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["title"], "Pay rent");
}

#[tokio::test]
async fn stats_reports_every_category() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/api/todos",
        Some(json!({ "title": "Buy milk", "category": "Course" })),
    )
    .await;

    let (status, stats) = send(&app, Method::GET, "/api/todos/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["completed"], 0);
    assert_eq!(stats["by_category"]["Course"], 1);
    assert_eq!(stats["by_category"]["Personnel"], 0);
    assert_eq!(stats["by_category"]["Travail"], 0);
}

#[tokio::test]
async fn categories_endpoint_serves_the_registry() {
    let app = app();
    let (status, categories) = send(&app, Method::GET, "/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    let categories = categories.as_array().unwrap();
    assert_eq!(categories.len(), 3);
    assert_eq!(categories[0]["name"], "Course");
    assert_eq!(categories[0]["color"], "#4CAF50");
}

#[tokio::test]
async fn health_endpoint_answers() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
