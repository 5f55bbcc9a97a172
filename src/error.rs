//! Error taxonomy shared by the catalog, episode and inbox operations

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Missing or invalid field, or a field illegal for the category
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Episode {0} already exists")]
    DuplicateEpisodeNumber(u32),

    #[error("This content is not a series")]
    CategoryMismatch,

    #[error("Invalid or missing admin key")]
    Unauthorized,

    /// The record kept changing underneath a write
    #[error("Content was modified concurrently, try again")]
    Conflict,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        CatalogError::NotFound(what.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::Validation(_)
            | CatalogError::DuplicateEpisodeNumber(_)
            | CatalogError::CategoryMismatch => StatusCode::BAD_REQUEST,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Unauthorized => StatusCode::UNAUTHORIZED,
            CatalogError::Conflict => StatusCode::CONFLICT,
            CatalogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        CatalogError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Storage(format!("corrupt document: {}", err))
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            CatalogError::Storage(detail) => {
                tracing::error!("Storage failure: {}", detail);
                "Database error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(serde_json::json!({ "message": message }))).into_response()
    }
}
