//! Admin notification inbox endpoints
//!
//! Submitting is public (viewers report broken links and request titles);
//! everything else requires the admin key.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{NewNotification, NotificationSettings, ReplyRequest};
use crate::routes::auth::AdminKey;
use crate::services::Submission;
use crate::AppState;

/// POST /api/admin/notifications
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewNotification>,
) -> Result<impl IntoResponse> {
    let response = match state.inbox.submit(input)? {
        Submission::Stored(notification) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "notification": notification,
                "message": "Notification sent successfully"
            })),
        ),
        Submission::Muted(_) => (
            StatusCode::ACCEPTED,
            Json(json!({
                "success": true,
                "message": "Notification type is disabled; not stored"
            })),
        ),
    };

    Ok(response)
}

/// GET /api/admin/notifications
pub async fn list(State(state): State<Arc<AppState>>, _admin: AdminKey) -> impl IntoResponse {
    let listing = state.inbox.list();
    Json(json!({
        "success": true,
        "notifications": listing.notifications,
        "total": listing.total,
        "unread": listing.unread
    }))
}

/// PATCH /api/admin/notifications/:id/read
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let notification = state.inbox.mark_read(&id)?;
    Ok(Json(json!({
        "success": true,
        "notification": notification,
        "message": "Notification marked as read"
    })))
}

/// DELETE /api/admin/notifications/:id
pub async fn delete(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.inbox.delete(&id)?;
    Ok(Json(json!({ "success": true, "message": "Notification deleted" })))
}

/// POST /api/admin/notifications/reply
pub async fn reply(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Json(request): Json<ReplyRequest>,
) -> Result<impl IntoResponse> {
    let reply = state.inbox.reply(request)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "reply": reply,
            "message": "Reply sent successfully"
        })),
    ))
}

/// GET /api/admin/notifications/:id/replies
pub async fn replies(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let replies = state.inbox.replies(&id)?;
    Ok(Json(json!({
        "success": true,
        "total": replies.len(),
        "replies": replies
    })))
}

/// GET /api/admin/notifications/settings
pub async fn get_settings(State(state): State<Arc<AppState>>, _admin: AdminKey) -> impl IntoResponse {
    Json(state.inbox.settings())
}

/// PUT /api/admin/notifications/settings
pub async fn put_settings(
    State(state): State<Arc<AppState>>,
    _admin: AdminKey,
    Json(settings): Json<NotificationSettings>,
) -> impl IntoResponse {
    Json(state.inbox.update_settings(settings))
}
