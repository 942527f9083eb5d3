//! Cart API handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::{AddCartLine, CartLineView, CartView, UpdateCartLine, util};

use crate::auth::RequestContext;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/cart - the caller's cart, priced now
pub async fn view(
    State(state): State<ServerState>,
    ctx: RequestContext,
) -> AppResult<Json<CartView>> {
    let cart = state.engine.view_cart(&ctx.user_id, util::now_millis())?;
    Ok(Json(cart))
}

/// POST /api/cart/items - add a line to the cart
pub async fn add_line(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Json(payload): Json<AddCartLine>,
) -> AppResult<(StatusCode, Json<CartLineView>)> {
    let line = state.engine.add_cart_line(
        &ctx.user_id,
        &payload.item_id,
        payload.quantity,
        util::now_millis(),
    )?;
    Ok((StatusCode::CREATED, Json(line)))
}

/// PUT /api/cart/items/{line_id} - replace a line's quantity
pub async fn update_line(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(line_id): Path<String>,
    Json(payload): Json<UpdateCartLine>,
) -> AppResult<Json<CartLineView>> {
    let line = state.engine.update_cart_line(
        &ctx.user_id,
        &line_id,
        payload.quantity,
        util::now_millis(),
    )?;
    Ok(Json(line))
}

/// DELETE /api/cart/items/{line_id} - remove a line
pub async fn remove_line(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(line_id): Path<String>,
) -> AppResult<StatusCode> {
    state
        .engine
        .remove_cart_line(&ctx.user_id, &line_id, util::now_millis())?;
    Ok(StatusCode::NO_CONTENT)
}
