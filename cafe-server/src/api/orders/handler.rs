//! Order API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{AdvanceStatus, ConfirmPayment, Order, OrderStatus, Review, ReviewCreate, util};

use crate::auth::RequestContext;
use crate::core::ServerState;
use crate::utils::validation::validate_estimated_time;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    status: Option<String>,
}

fn parse_status(query: &OrderListQuery) -> Result<Option<OrderStatus>, AppError> {
    query
        .status
        .as_deref()
        .map(|s| {
            s.parse::<OrderStatus>()
                .map_err(|e| AppError::validation(e.to_string()))
        })
        .transpose()
}

/// Payment confirmation response: the updated order plus the points it earned
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub order: Order,
    pub points_awarded: u32,
    pub total_paid: Decimal,
}

/// POST /api/orders - place the caller's cart as an order
pub async fn place(
    State(state): State<ServerState>,
    ctx: RequestContext,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = state.engine.place_order(&ctx.user_id, util::now_millis())?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders?status=... - the caller's orders, newest first
pub async fn list_mine(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let status = parse_status(&query)?;
    let orders = state.engine.list_orders(&ctx.user_id, status)?;
    Ok(Json(orders))
}

/// GET /api/orders/all?status=... - every order (kitchen view, admin)
pub async fn list_all(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    ctx.require_admin()?;
    let status = parse_status(&query)?;
    let orders = state.engine.list_all_orders(status)?;
    Ok(Json(orders))
}

/// GET /api/orders/{id} - one of the caller's orders
pub async fn get_by_id(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.engine.get_order(&ctx.user_id, &id)?;
    Ok(Json(order))
}

/// POST /api/orders/{id}/payment - confirm payment and seat at a table
pub async fn confirm_payment(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    Json(payload): Json<ConfirmPayment>,
) -> AppResult<Json<PaymentResponse>> {
    let (order, points_awarded) = state.engine.confirm_payment(
        &ctx.user_id,
        &id,
        &payload.table_id,
        util::now_millis(),
    )?;
    let total_paid = order.total_price;
    Ok(Json(PaymentResponse {
        order,
        points_awarded,
        total_paid,
    }))
}

/// PUT /api/orders/{id}/status - advance fulfillment status (admin)
pub async fn advance_status(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    Json(payload): Json<AdvanceStatus>,
) -> AppResult<Json<Order>> {
    ctx.require_admin()?;
    if let Some(minutes) = payload.estimated_time {
        validate_estimated_time(minutes)?;
    }
    let order = state.engine.advance_status(
        &id,
        payload.status,
        payload.estimated_time,
        util::now_millis(),
    )?;
    Ok(Json(order))
}

/// DELETE /api/orders/{id} - cancel an unpaid order
pub async fn cancel(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.engine.cancel_order(&ctx.user_id, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/orders/{id}/review - review an order while its window is open
pub async fn create_review(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let review = state
        .engine
        .create_review(&ctx.user_id, &id, payload, util::now_millis())?;
    Ok((StatusCode::CREATED, Json(review)))
}
