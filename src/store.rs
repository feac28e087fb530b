//! The persistence seam.
//!
//! `TodoStore` mirrors the operations the service needs from the graph
//! store, so the HTTP and service layers can run against either the Neo4j
//! backend or the in-memory one used by tests and `--memory` mode.

use crate::category::Category;
use crate::error::Result;
use crate::todo::{Stats, Todo, TodoUpdate};
use async_trait::async_trait;

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Idempotently seed the three category nodes. Running it repeatedly
    /// leaves exactly one node per category name.
    async fn ensure_categories(&self) -> Result<()>;

    /// All todos joined with their category, ordered by category name then
    /// title. An optional filter restricts the result to one category.
    async fn list(&self, category: Option<Category>) -> Result<Vec<Todo>>;

    /// Persist a new todo and link it to its category.
    async fn insert(&self, todo: &Todo) -> Result<()>;

    /// Apply the provided fields to an existing todo and return the updated
    /// record. Fails with `NotFound` when the id matches nothing.
    async fn update(&self, update: &TodoUpdate) -> Result<Todo>;

    /// Remove a todo and its category edge. Fails with `NotFound` when the
    /// id matches nothing.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Aggregate counts: total, completed, and per-category.
    async fn stats(&self) -> Result<Stats>;
}
