//! Error taxonomy and its HTTP mapping.
//!
//! Three kinds of failure flow through the service: invalid input, a lookup
//! that matched nothing, and trouble talking to the graph store. Keeping them
//! as distinct variants lets the HTTP layer answer 400, 404, and 500
//! respectively instead of collapsing everything into 500.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required field is missing or empty.
    #[error("{0}")]
    Validation(String),

    /// The named category is not in the registry.
    #[error("category \"{0}\" not found")]
    CategoryNotFound(String),

    /// No todo matched the given id.
    #[error("todo \"{0}\" not found")]
    NotFound(String),

    /// A required environment variable is absent.
    #[error("missing required environment variable {0}")]
    Config(&'static str),

    /// The graph store failed: unreachable, query error, or a record that
    /// could not be decoded.
    #[error("graph store error: {0}")]
    Store(#[source] anyhow::Error),
}

impl From<neo4rs::Error> for Error {
    fn from(err: neo4rs::Error) -> Self {
        Error::Store(err.into())
    }
}

impl From<neo4rs::DeError> for Error {
    fn from(err: neo4rs::DeError) -> Self {
        Error::Store(err.into())
    }
}

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::CategoryNotFound(_) | Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Config(_) | Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
