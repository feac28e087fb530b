//! The task service: validation and canonicalization in front of the store.
//!
//! Category names arrive as free-form strings and are resolved against the
//! closed registry here, at the service boundary, so the store layers only
//! ever see canonical categories.

use crate::category::{Category, CategoryRecord};
use crate::error::{Error, Result};
use crate::store::TodoStore;
use crate::todo::{NewTodo, Stats, Todo, TodoPatch, TodoUpdate};
use std::sync::Arc;

#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// Seed the category registry. Idempotent; safe to run at every startup.
    pub async fn init_categories(&self) -> Result<()> {
        self.store.ensure_categories().await?;
        tracing::info!(count = Category::ALL.len(), "category registry seeded");
        Ok(())
    }

    /// List todos, optionally restricted to one category (name matched
    /// case-insensitively).
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<Todo>> {
        let filter = match category {
            Some(name) => Some(name.parse()?),
            None => None,
        };
        self.store.list(filter).await
    }

    /// Create a todo from a wire request. The title must be non-empty and
    /// the category must resolve against the registry; the returned record
    /// carries the canonical category name, not the caller's casing.
    pub async fn create(&self, new: NewTodo) -> Result<Todo> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(Error::Validation("title is required".into()));
        }
        if new.category.trim().is_empty() {
            return Err(Error::Validation("category is required".into()));
        }
        let category: Category = new.category.parse()?;

        let todo = Todo::new(title, category);
        self.store.insert(&todo).await?;
        tracing::debug!(id = %todo.id, category = %todo.category, "todo created");
        Ok(todo)
    }

    /// Apply a partial update. Any provided field is validated and applied;
    /// a category change moves the todo to the new category.
    pub async fn update(&self, patch: TodoPatch) -> Result<Todo> {
        if patch.id.trim().is_empty() {
            return Err(Error::Validation("id is required".into()));
        }
        let title = match patch.title {
            Some(title) => {
                let title = title.trim().to_string();
                if title.is_empty() {
                    return Err(Error::Validation("title must not be empty".into()));
                }
                Some(title)
            }
            None => None,
        };
        let category = match patch.category {
            Some(name) => Some(name.parse()?),
            None => None,
        };

        let update = TodoUpdate {
            id: patch.id,
            completed: patch.completed,
            title,
            category,
        };
        self.store.update(&update).await
    }

    /// Delete a todo and its category edge.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(id).await?;
        tracing::debug!(%id, "todo deleted");
        Ok(())
    }

    /// Aggregate counts over the whole store.
    pub async fn stats(&self) -> Result<Stats> {
        self.store.stats().await
    }

    /// The fixed category registry, for clients that need names and colors.
    pub fn categories(&self) -> Vec<CategoryRecord> {
        Category::ALL.into_iter().map(CategoryRecord::from).collect()
    }
}
