//! Loyalty API handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use shared::{
    PointsTransaction, RedemptionTransaction, RewardOption, RewardOptionCreate, util,
};

use crate::auth::RequestContext;
use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_TEXT_LEN, validate_required_text};

/// Redemption response: the pending redemption plus the balance left
#[derive(Debug, Serialize)]
pub struct RedeemResponse {
    pub redemption: RedemptionTransaction,
    pub remaining_points: u32,
}

/// Loyalty overview: balance plus award history
#[derive(Debug, Serialize)]
pub struct LoyaltyResponse {
    pub points: u32,
    pub history: Vec<PointsTransaction>,
}

/// GET /api/rewards - redeemable rewards, cheapest first
pub async fn list_rewards(
    State(state): State<ServerState>,
    _ctx: RequestContext,
) -> AppResult<Json<Vec<RewardOption>>> {
    let rewards = state.catalog.list_rewards()?;
    Ok(Json(rewards))
}

/// POST /api/rewards - create a reward option (admin)
pub async fn create_reward(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Json(payload): Json<RewardOptionCreate>,
) -> AppResult<(StatusCode, Json<RewardOption>)> {
    ctx.require_admin()?;
    if let Some(description) = &payload.description {
        validate_required_text(description, "description", MAX_TEXT_LEN)?;
    }
    let reward = state.catalog.create_reward(payload, util::now_millis())?;
    Ok((StatusCode::CREATED, Json(reward)))
}

/// DELETE /api/rewards/{id} - delete a reward option (admin)
pub async fn delete_reward(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    ctx.require_admin()?;
    state.catalog.delete_reward(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/rewards/{id}/redeem - spend points against a reward
pub async fn redeem(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<RedeemResponse>)> {
    let (redemption, remaining_points) =
        state.engine.redeem(&ctx.user_id, &id, util::now_millis())?;
    Ok((
        StatusCode::CREATED,
        Json(RedeemResponse {
            redemption,
            remaining_points,
        }),
    ))
}

/// GET /api/redemptions - the caller's redemption history
pub async fn list_redemptions(
    State(state): State<ServerState>,
    ctx: RequestContext,
) -> AppResult<Json<Vec<RedemptionTransaction>>> {
    let redemptions = state.engine.list_redemptions(&ctx.user_id)?;
    Ok(Json(redemptions))
}

/// PUT /api/redemptions/{id}/delivered - mark a redemption delivered (admin)
pub async fn mark_delivered(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> AppResult<Json<RedemptionTransaction>> {
    ctx.require_admin()?;
    let redemption = state.engine.mark_delivered(&id)?;
    Ok(Json(redemption))
}

/// DELETE /api/redemptions/{id} - archive a delivered redemption (admin)
pub async fn delete_redemption(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    ctx.require_admin()?;
    state.engine.delete_redemption(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/loyalty - the caller's points balance and award history
pub async fn loyalty(
    State(state): State<ServerState>,
    ctx: RequestContext,
) -> AppResult<Json<LoyaltyResponse>> {
    let points = state.engine.balance(&ctx.user_id)?;
    let history = state.engine.points_history(&ctx.user_id)?;
    Ok(Json(LoyaltyResponse { points, history }))
}
