//! Admin dashboard endpoints (protected by ADMIN_KEY)

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::error::Result;
use crate::models::ListParams;
use crate::routes::auth::AdminKey;
use crate::AppState;

/// GET /api/admin/verify - Check a key without side effects
pub async fn verify(_admin: AdminKey) -> impl IntoResponse {
    Json(serde_json::json!({ "valid": true }))
}

/// GET /api/admin/movies - All content, inactive included, optional `isActive` filter
pub async fn list_all(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse> {
    let response = state.catalog.admin_list(&params).await?;
    Ok(Json(response))
}

/// GET /api/admin/movies/:id - Raw record with inactive episodes
pub async fn get_raw(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let record = state.catalog.get(&id).await?;
    Ok(Json(record))
}
