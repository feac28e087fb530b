//! HTTP surface: one resource path for todos plus a few read-only endpoints.
//!
//! | Method | Path               | Success                  |
//! |--------|--------------------|--------------------------|
//! | GET    | `/api/todos`       | 200, array               |
//! | POST   | `/api/todos`       | 201, created record      |
//! | PUT    | `/api/todos`       | 200, updated record      |
//! | DELETE | `/api/todos?id=`   | 204, empty body          |
//! | GET    | `/api/todos/stats` | 200, aggregate counts    |
//! | GET    | `/api/categories`  | 200, the fixed registry  |
//! | GET    | `/api/health`      | 200                      |
//!
//! Failures map through `Error`: 400 for missing fields, 404 for unknown
//! todos or categories, 500 for store trouble. The single-page UI is served
//! from the static directory behind a fallback file service.

use crate::category::CategoryRecord;
use crate::error::{Error, Result};
use crate::service::TodoService;
use crate::todo::{NewTodo, Stats, Todo, TodoPatch};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
struct AppState {
    service: TodoService,
}

/// Build the application router. When `static_dir` is given, unmatched paths
/// fall through to the file service hosting the UI.
pub fn router(service: TodoService, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route(
            "/api/todos",
            get(list_todos)
                .post(create_todo)
                .put(update_todo)
                .delete(delete_todo),
        )
        .route("/api/todos/stats", get(todo_stats))
        .route("/api/categories", get(list_categories))
        .route("/api/health", get(health))
        .with_state(AppState { service });

    let router = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(Debug, Deserialize)]
struct ListParams {
    category: Option<String>,
}

async fn list_todos(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Todo>>> {
    let filter = params.category.as_deref().filter(|c| !c.is_empty());
    let todos = state.service.list(filter).await?;
    Ok(Json(todos))
}

async fn create_todo(
    State(state): State<AppState>,
    Json(new): Json<NewTodo>,
) -> Result<(StatusCode, Json<Todo>)> {
    let todo = state.service.create(new).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(state): State<AppState>,
    Json(patch): Json<TodoPatch>,
) -> Result<Json<Todo>> {
    let todo = state.service.update(patch).await?;
    Ok(Json(todo))
}

#[derive(Debug, Deserialize)]
struct DeleteParams {
    id: Option<String>,
}

async fn delete_todo(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> Result<StatusCode> {
    let id = params
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| Error::Validation("id query parameter is required".into()))?;
    state.service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn todo_stats(State(state): State<AppState>) -> Result<Json<Stats>> {
    Ok(Json(state.service.stats().await?))
}

async fn list_categories(State(state): State<AppState>) -> Json<Vec<CategoryRecord>> {
    Json(state.service.categories())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
