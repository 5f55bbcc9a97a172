//! Shared-secret admin gate

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::CatalogError;
use crate::AppState;

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Query params for admin operations
#[derive(Debug, Deserialize)]
struct AdminQuery {
    /// Fallback when the header cannot be set (simple protection)
    key: Option<String>,
}

/// Extractor that only succeeds when the request carries the admin key,
/// in the `x-admin-key` header or a `key` query parameter.
#[derive(Debug, Clone, Copy)]
pub struct AdminKey;

fn provided_key(parts: &Parts) -> Option<String> {
    if let Some(value) = parts.headers.get(ADMIN_KEY_HEADER) {
        return value.to_str().ok().map(str::to_string);
    }

    Query::<AdminQuery>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(q)| q.key)
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminKey {
    type Rejection = CatalogError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        match provided_key(parts) {
            Some(key) if key == state.config.admin_key => Ok(AdminKey),
            _ => {
                tracing::warn!("Rejected admin request to {}", parts.uri.path());
                Err(CatalogError::Unauthorized)
            }
        }
    }
}
