//! The fixed category registry.
//!
//! Every todo belongs to exactly one of three categories. The set is closed:
//! categories are seeded once at startup and never created, renamed, or
//! deleted by users. Lookup by name is case-insensitive, but the canonical
//! casing below is what gets stored and returned.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// One of the three todo categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Course,
    Personnel,
    Travail,
}

impl Category {
    /// All categories, in canonical (alphabetical) order.
    pub const ALL: [Category; 3] = [Category::Course, Category::Personnel, Category::Travail];

    /// Canonical name, as stored on the graph node.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Course => "Course",
            Category::Personnel => "Personnel",
            Category::Travail => "Travail",
        }
    }

    /// Stable identifier from the seed table.
    pub fn id(&self) -> &'static str {
        match self {
            Category::Course => "1",
            Category::Personnel => "2",
            Category::Travail => "3",
        }
    }

    /// Display color for the UI.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Course => "#4CAF50",
            Category::Personnel => "#2196F3",
            Category::Travail => "#F44336",
        }
    }

    /// Resolve a category by name, ignoring case. Returns `None` for names
    /// outside the registry.
    pub fn resolve(name: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Category::resolve(s).ok_or_else(|| Error::CategoryNotFound(s.to_string()))
    }
}

/// A category as served to clients: identifier, canonical name, and color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: String,
    pub name: Category,
    pub color: String,
}

impl From<Category> for CategoryRecord {
    fn from(category: Category) -> Self {
        Self {
            id: category.id().to_string(),
            name: category,
            color: category.color().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_case_insensitive() {
        assert_eq!(Category::resolve("course"), Some(Category::Course));
        assert_eq!(Category::resolve("TRAVAIL"), Some(Category::Travail));
        assert_eq!(Category::resolve("pErSoNnEl"), Some(Category::Personnel));
    }

    #[test]
    fn resolve_rejects_unknown_names() {
        assert_eq!(Category::resolve("Invalid"), None);
        assert_eq!(Category::resolve(""), None);
    }

    #[test]
    fn from_str_reports_the_offending_name() {
        let err = "Shopping".parse::<Category>().unwrap_err();
        assert!(matches!(err, Error::CategoryNotFound(name) if name == "Shopping"));
    }

    #[test]
    fn registry_matches_the_seed_table() {
        assert_eq!(Category::ALL.len(), 3);
        assert_eq!(Category::Course.id(), "1");
        assert_eq!(Category::Course.color(), "#4CAF50");
        assert_eq!(Category::Personnel.id(), "2");
        assert_eq!(Category::Personnel.color(), "#2196F3");
        assert_eq!(Category::Travail.id(), "3");
        assert_eq!(Category::Travail.color(), "#F44336");
    }

    #[test]
    fn serializes_as_the_canonical_name() {
        assert_eq!(
            serde_json::to_string(&Category::Course).unwrap(),
            "\"Course\""
        );
    }
}
