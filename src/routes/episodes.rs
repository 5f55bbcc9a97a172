//! Episode endpoints nested under a series

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::error::Result;
use crate::models::{EpisodePatch, EpisodePayload};
use crate::routes::auth::AdminKey;
use crate::AppState;

/// GET /api/movies/:id/episodes - Active episodes, by number
pub async fn list_episodes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let listing = state.catalog.list_active_episodes(&id).await?;
    Ok(Json(listing))
}

/// POST /api/movies/:id/episodes (admin)
pub async fn add_episode(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(id): Path<String>,
    Json(payload): Json<EpisodePayload>,
) -> Result<impl IntoResponse> {
    let episode = state.catalog.add_episode(&id, payload).await?;
    Ok((StatusCode::CREATED, Json(episode)))
}

/// PATCH /api/movies/:id/episodes/:episode_id (admin)
pub async fn update_episode(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path((id, episode_id)): Path<(String, String)>,
    Json(patch): Json<EpisodePatch>,
) -> Result<impl IntoResponse> {
    let episode = state.catalog.update_episode(&id, &episode_id, patch).await?;
    Ok(Json(episode))
}

/// DELETE /api/movies/:id/episodes/:episode_id (admin)
pub async fn delete_episode(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path((id, episode_id)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    state.catalog.delete_episode(&id, &episode_id).await?;
    Ok(Json(serde_json::json!({ "message": "Episode deleted successfully" })))
}
