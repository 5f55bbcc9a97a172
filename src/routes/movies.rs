//! Content endpoints: public browsing plus admin CRUD and status toggles

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::error::Result;
use crate::models::{ContentPayload, ListParams, StatusFlag, SuggestionParams};
use crate::routes::auth::AdminKey;
use crate::AppState;

/// GET /api/movies - Active content with filters and pagination
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse> {
    let response = state.catalog.list(&params).await?;
    Ok(Json(response))
}

/// GET /api/movies/series - Active Web/TV series
pub async fn list_series(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse> {
    let response = state.catalog.list_series(&params).await?;
    Ok(Json(response))
}

/// GET /api/movies/search-suggestions?q=
pub async fn search_suggestions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestionParams>,
) -> Result<impl IntoResponse> {
    let suggestions = state.catalog.suggestions(params.q.as_deref()).await?;
    Ok(Json(suggestions))
}

/// GET /api/movies/related/:id
pub async fn related(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let related = state.catalog.related(&id).await?;
    Ok(Json(related))
}

/// GET /api/movies/:id - Public detail
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let record = state.catalog.get_public(&id).await?;
    Ok(Json(record))
}

/// POST /api/movies (admin)
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Json(payload): Json<ContentPayload>,
) -> Result<impl IntoResponse> {
    let record = state.catalog.create(payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/movies/:id (admin)
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(id): Path<String>,
    Json(payload): Json<ContentPayload>,
) -> Result<impl IntoResponse> {
    let record = state.catalog.update(&id, payload).await?;
    Ok(Json(record))
}

/// DELETE /api/movies/:id (admin)
pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.catalog.delete(&id).await?;
    Ok(Json(serde_json::json!({ "message": "Movie deleted successfully" })))
}

/// POST /api/movies/:id/download - Count one download
pub async fn record_download(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let count = state.catalog.record_download(&id).await?;
    Ok(Json(serde_json::json!({ "downloadCount": count })))
}

async fn toggle(state: &AppState, id: &str, flag: StatusFlag) -> Result<impl IntoResponse> {
    let record = state.catalog.toggle(id, flag).await?;
    Ok(Json(record))
}

/// PATCH /api/movies/:id/toggle-active (admin)
pub async fn toggle_active(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    toggle(&state, &id, StatusFlag::Active).await
}

/// PATCH /api/movies/:id/toggle-trending (admin)
pub async fn toggle_trending(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    toggle(&state, &id, StatusFlag::Trending).await
}

/// PATCH /api/movies/:id/toggle-featured (admin)
pub async fn toggle_featured(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    toggle(&state, &id, StatusFlag::Featured).await
}
