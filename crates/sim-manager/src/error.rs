//! Store and request errors

use std::io;
use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tokio::task::JoinError;
use tracing::error;

/// Store result type
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by the simulation store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("simulation already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid simulation name: {0:?}")]
    InvalidName(String),

    #[error("i/o error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Unrecovered failure inside a request handler.
///
/// Rendered as a bare `500 Internal Server Error`; the server keeps serving
/// subsequent requests.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("blocking store task failed: {0}")]
    Task(#[from] JoinError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {self}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
