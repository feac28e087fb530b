//! Neo4j implementation of the persistence seam.
//!
//! Todos and categories are nodes; each todo carries one `BELONGS_TO` edge to
//! its category. All queries are parameterized Cypher executed through the
//! shared `neo4rs` connection pool, so each operation's connection is scoped
//! to that one call and released on success or failure alike.

use crate::category::Category;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::TodoStore;
use crate::todo::{Stats, Todo, TodoUpdate};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use neo4rs::{Graph, query};
use std::collections::BTreeMap;

/// Uniqueness constraints created at connect time. Creation errors are logged
/// and skipped; on an already-initialized database they are expected.
const CONSTRAINTS: [&str; 2] = [
    "CREATE CONSTRAINT todo_id IF NOT EXISTS FOR (t:Todo) REQUIRE t.id IS UNIQUE",
    "CREATE CONSTRAINT category_name IF NOT EXISTS FOR (c:Category) REQUIRE c.name IS UNIQUE",
];

/// Graph store backed by a Neo4j server over Bolt.
pub struct Neo4jStore {
    graph: Graph,
}

impl Neo4jStore {
    /// Connect to the server, verify the connection, and ensure the schema
    /// constraints exist.
    pub async fn connect(config: &Config) -> Result<Self> {
        let graph =
            Graph::new(config.uri.as_str(), config.user.as_str(), config.password.as_str()).await?;

        // A trivial round trip surfaces bad credentials or an unreachable
        // server at startup instead of on the first request.
        graph.run(query("RETURN 1")).await?;

        for constraint in CONSTRAINTS {
            if let Err(err) = graph.run(query(constraint)).await {
                tracing::warn!(error = %err, "constraint creation skipped");
            }
        }

        tracing::info!(uri = %config.uri, "connected to graph store");
        Ok(Self { graph })
    }
}

#[async_trait]
impl TodoStore for Neo4jStore {
    async fn ensure_categories(&self) -> Result<()> {
        for category in Category::ALL {
            let q = query("MERGE (c:Category {name: $name}) SET c.id = $id, c.color = $color")
                .param("name", category.as_str())
                .param("id", category.id())
                .param("color", category.color());
            self.graph.run(q).await?;
            tracing::debug!(category = %category, "category ensured");
        }
        Ok(())
    }

    async fn list(&self, category: Option<Category>) -> Result<Vec<Todo>> {
        let q = match category {
            Some(category) => query(
                "MATCH (t:Todo)-[:BELONGS_TO]->(c:Category {name: $category}) \
                 RETURN t, c.name AS category \
                 ORDER BY c.name, t.title",
            )
            .param("category", category.as_str()),
            None => query(
                "MATCH (t:Todo)-[:BELONGS_TO]->(c:Category) \
                 RETURN t, c.name AS category \
                 ORDER BY c.name, t.title",
            ),
        };

        let mut result = self.graph.execute(q).await?;
        let mut todos = Vec::new();
        while let Some(row) = result.next().await? {
            let node: neo4rs::Node = row.get("t")?;
            let category: String = row.get("category")?;
            todos.push(node_to_todo(&node, &category)?);
        }
        Ok(todos)
    }

    async fn insert(&self, todo: &Todo) -> Result<()> {
        let q = query(
            "MATCH (c:Category {name: $category}) \
             CREATE (t:Todo {id: $id, title: $title, completed: false, created_at: $created_at}) \
             CREATE (t)-[:BELONGS_TO]->(c) \
             RETURN t",
        )
        .param("category", todo.category.as_str())
        .param("id", todo.id.as_str())
        .param("title", todo.title.as_str())
        .param("created_at", todo.created_at.to_rfc3339());

        let mut result = self.graph.execute(q).await?;
        match result.next().await? {
            // Zero rows means the category node is absent, i.e. seeding
            // failed earlier.
            Some(_) => Ok(()),
            None => Err(Error::CategoryNotFound(todo.category.to_string())),
        }
    }

    async fn update(&self, update: &TodoUpdate) -> Result<Todo> {
        let mut set_clauses = Vec::new();
        if update.completed.is_some() {
            set_clauses.push("t.completed = $completed");
        }
        if update.title.is_some() {
            set_clauses.push("t.title = $title");
        }
        let set = if set_clauses.is_empty() {
            String::new()
        } else {
            format!("SET {} ", set_clauses.join(", "))
        };

        // A category change re-links the BELONGS_TO edge; otherwise the
        // existing edge is only read to return the category name.
        let cypher = if update.category.is_some() {
            format!(
                "MATCH (t:Todo {{id: $id}})-[r:BELONGS_TO]->(:Category) \
                 MATCH (c:Category {{name: $category}}) \
                 DELETE r \
                 CREATE (t)-[:BELONGS_TO]->(c) \
                 {set}RETURN t, c.name AS category"
            )
        } else {
            format!(
                "MATCH (t:Todo {{id: $id}})-[:BELONGS_TO]->(c:Category) \
                 {set}RETURN t, c.name AS category"
            )
        };

        let mut q = query(&cypher).param("id", update.id.as_str());
        if let Some(completed) = update.completed {
            q = q.param("completed", completed);
        }
        if let Some(title) = &update.title {
            q = q.param("title", title.as_str());
        }
        if let Some(category) = update.category {
            q = q.param("category", category.as_str());
        }

        let mut result = self.graph.execute(q).await?;
        match result.next().await? {
            Some(row) => {
                let node: neo4rs::Node = row.get("t")?;
                let category: String = row.get("category")?;
                node_to_todo(&node, &category)
            }
            None => Err(Error::NotFound(update.id.clone())),
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let q = query(
            "MATCH (t:Todo {id: $id}) \
             OPTIONAL MATCH (t)-[r:BELONGS_TO]->(:Category) \
             DELETE t, r \
             RETURN count(t) AS deleted",
        )
        .param("id", id);

        let mut result = self.graph.execute(q).await?;
        let deleted: i64 = match result.next().await? {
            Some(row) => row.get("deleted")?,
            None => 0,
        };
        if deleted == 0 {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn stats(&self) -> Result<Stats> {
        let totals = query(
            "MATCH (t:Todo) \
             RETURN count(t) AS total, count(CASE WHEN t.completed THEN 1 END) AS completed",
        );
        let mut result = self.graph.execute(totals).await?;
        let (total, completed) = match result.next().await? {
            Some(row) => (row.get::<i64>("total")?, row.get::<i64>("completed")?),
            None => (0, 0),
        };

        let per_category = query(
            "MATCH (c:Category) \
             OPTIONAL MATCH (t:Todo)-[:BELONGS_TO]->(c) \
             RETURN c.name AS name, count(t) AS count",
        );
        let mut by_category = BTreeMap::new();
        let mut result = self.graph.execute(per_category).await?;
        while let Some(row) = result.next().await? {
            let name: String = row.get("name")?;
            let count: i64 = row.get("count")?;
            by_category.insert(name, count as u64);
        }
        // Seeding may have failed; report every registry category regardless.
        for category in Category::ALL {
            by_category.entry(category.as_str().to_string()).or_insert(0);
        }

        Ok(Stats {
            total: total as u64,
            completed: completed as u64,
            by_category,
        })
    }
}

/// Translate a Todo node plus its joined category name into a domain record.
fn node_to_todo(node: &neo4rs::Node, category: &str) -> Result<Todo> {
    let category = Category::resolve(category)
        .ok_or_else(|| Error::Store(anyhow!("node linked to unknown category \"{category}\"")))?;
    let created_at: String = node.get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|err| Error::Store(anyhow!("bad created_at on todo node: {err}")))?;

    Ok(Todo {
        id: node.get("id")?,
        title: node.get("title")?,
        completed: node.get("completed")?,
        category,
        created_at,
    })
}
