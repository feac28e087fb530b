//! In-memory implementation of the persistence seam.
//!
//! Ephemeral storage for tests and for running the server without a Neo4j
//! instance (`--memory`). Category nodes have no separate representation
//! here: the registry is compiled in, so seeding is trivially idempotent.

use crate::category::Category;
use crate::error::{Error, Result};
use crate::store::TodoStore;
use crate::todo::{Stats, Todo, TodoUpdate};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

/// Thread-safe in-memory todo storage.
#[derive(Default)]
pub struct MemoryStore {
    todos: Mutex<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn ensure_categories(&self) -> Result<()> {
        // The registry is compiled in; nothing to persist.
        Ok(())
    }

    async fn list(&self, category: Option<Category>) -> Result<Vec<Todo>> {
        let todos = self.todos.lock().await;
        let mut listed: Vec<Todo> = todos
            .iter()
            .filter(|t| category.is_none_or(|c| t.category == c))
            .cloned()
            .collect();
        listed.sort_by(|a, b| {
            (a.category.as_str(), a.title.as_str()).cmp(&(b.category.as_str(), b.title.as_str()))
        });
        Ok(listed)
    }

    async fn insert(&self, todo: &Todo) -> Result<()> {
        self.todos.lock().await.push(todo.clone());
        Ok(())
    }

    async fn update(&self, update: &TodoUpdate) -> Result<Todo> {
        let mut todos = self.todos.lock().await;
        let todo = todos
            .iter_mut()
            .find(|t| t.id == update.id)
            .ok_or_else(|| Error::NotFound(update.id.clone()))?;

        if let Some(completed) = update.completed {
            todo.completed = completed;
        }
        if let Some(title) = &update.title {
            todo.title = title.clone();
        }
        if let Some(category) = update.category {
            todo.category = category;
        }
        Ok(todo.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut todos = self.todos.lock().await;
        match todos.iter().position(|t| t.id == id) {
            Some(index) => {
                todos.remove(index);
                Ok(())
            }
            None => Err(Error::NotFound(id.to_string())),
        }
    }

    async fn stats(&self) -> Result<Stats> {
        let todos = self.todos.lock().await;
        let mut by_category: BTreeMap<String, u64> = Category::ALL
            .into_iter()
            .map(|c| (c.as_str().to_string(), 0))
            .collect();
        for todo in todos.iter() {
            *by_category.entry(todo.category.as_str().to_string()).or_insert(0) += 1;
        }
        Ok(Stats {
            total: todos.len() as u64,
            completed: todos.iter().filter(|t| t.completed).count() as u64,
            by_category,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn list_orders_by_category_then_title() {
        let store = MemoryStore::new();
        store
            .insert(&Todo::new("Payer le loyer", Category::Travail))
            .await
            .unwrap();
        store
            .insert(&Todo::new("Acheter du lait", Category::Course))
            .await
            .unwrap();
        store
            .insert(&Todo::new("Appeler maman", Category::Course))
            .await
            .unwrap();

        let titles: Vec<String> = store
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["Acheter du lait", "Appeler maman", "Payer le loyer"]);
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let err = store.delete("missing").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(id) if id == "missing"));
    }
}
