//! Graph store connection settings, read from the environment.
//!
//! All three variables are required; the process fails fast at startup when
//! one is absent rather than limping along and failing on the first query.

use crate::error::{Error, Result};

/// Connection parameters for the Neo4j server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bolt endpoint, e.g. `bolt://localhost:7687`.
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Config {
    /// Read `NEO4J_URI`, `NEO4J_USER`, and `NEO4J_PASSWORD` from the
    /// environment, failing on the first missing one.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            uri: require("NEO4J_URI")?,
            user: require("NEO4J_USER")?,
            password: require("NEO4J_PASSWORD")?,
        })
    }
}

fn require(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Config(name)),
    }
}
