//! Review API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::{Review, ReviewUpdate, util};

use crate::auth::RequestContext;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/reviews - the caller's reviews, newest first
pub async fn list(
    State(state): State<ServerState>,
    ctx: RequestContext,
) -> AppResult<Json<Vec<Review>>> {
    let reviews = state.engine.list_reviews(&ctx.user_id)?;
    Ok(Json(reviews))
}

/// PUT /api/reviews/{id} - edit a review while its order's window is open
pub async fn update(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    Json(payload): Json<ReviewUpdate>,
) -> AppResult<Json<Review>> {
    let review = state
        .engine
        .update_review(&ctx.user_id, &id, payload, util::now_millis())?;
    Ok(Json(review))
}
