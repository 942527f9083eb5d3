//! Notification API handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::Notification;

use crate::auth::RequestContext;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /api/notifications - the caller's notifications, newest first
pub async fn list(
    State(state): State<ServerState>,
    ctx: RequestContext,
) -> AppResult<Json<Vec<Notification>>> {
    let mut notifications = state
        .storage
        .list_notifications(&ctx.user_id)
        .map_err(|e| AppError::database(e.to_string()))?;
    notifications.sort_by_key(|n| std::cmp::Reverse(n.created_at));
    Ok(Json(notifications))
}

/// PUT /api/notifications/{id}/read - mark one of the caller's notifications read
pub async fn mark_read(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let found = state
        .storage
        .mark_notification_read(&ctx.user_id, &id)
        .map_err(|e| AppError::database(e.to_string()))?;
    if !found {
        return Err(AppError::not_found(format!("Notification {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}
