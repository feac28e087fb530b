//! Domain records: todos, their request shapes, and aggregate statistics.

use crate::category::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A titled, completable unit of work belonging to exactly one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub category: Category,
    /// Timestamp when the todo was created (RFC 3339, UTC).
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Build a fresh todo with a generated id, not yet completed.
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            completed: false,
            category,
            created_at: Utc::now(),
        }
    }
}

/// Wire shape for creating a todo. Both fields are required; they default to
/// empty strings so that missing fields surface as validation errors rather
/// than deserialization failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTodo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
}

/// Wire shape for updating a todo. Only `id` is required; any provided
/// optional field is applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoPatch {
    #[serde(default)]
    pub id: String,
    pub completed: Option<bool>,
    pub title: Option<String>,
    pub category: Option<String>,
}

/// A validated update, with the category already canonicalized. This is what
/// the store layer receives.
#[derive(Debug, Clone)]
pub struct TodoUpdate {
    pub id: String,
    pub completed: Option<bool>,
    pub title: Option<String>,
    pub category: Option<Category>,
}

/// Aggregate counts over the whole store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total: u64,
    pub completed: u64,
    /// Todo count per category, keyed by canonical name. Every category is
    /// present, empty ones with a count of zero.
    pub by_category: BTreeMap<String, u64>,
}
