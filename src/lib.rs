pub mod category;
pub mod config;
pub mod error;
pub mod http;
pub mod memory;
pub mod neo4j;
pub mod service;
pub mod store;
pub mod todo;

pub use category::{Category, CategoryRecord};
pub use config::Config;
pub use error::{Error, Result};
pub use http::router;
pub use memory::MemoryStore;
pub use neo4j::Neo4jStore;
pub use service::TodoService;
pub use store::TodoStore;
pub use todo::{NewTodo, Stats, Todo, TodoPatch, TodoUpdate};
