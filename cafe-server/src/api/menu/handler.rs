//! Menu API handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::{MenuItem, MenuItemCreate, MenuItemUpdate, SpecialOffer, SpecialOfferSet, util};

use crate::auth::RequestContext;
use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_NAME_LEN, MAX_TEXT_LEN, validate_required_text};

/// GET /api/menu/items - the full menu
pub async fn list_items(
    State(state): State<ServerState>,
    _ctx: RequestContext,
) -> AppResult<Json<Vec<MenuItem>>> {
    let items = state.catalog.list_menu_items()?;
    Ok(Json(items))
}

/// GET /api/menu/items/{id} - one menu item
pub async fn get_item(
    State(state): State<ServerState>,
    _ctx: RequestContext,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let item = state.catalog.get_menu_item(&id)?;
    Ok(Json(item))
}

/// POST /api/menu/items - create a menu item (admin)
pub async fn create_item(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    ctx.require_admin()?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    if let Some(description) = &payload.description {
        validate_required_text(description, "description", MAX_TEXT_LEN)?;
    }
    let item = state.catalog.create_menu_item(payload, util::now_millis())?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/menu/items/{id} - update a menu item (admin)
pub async fn update_item(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    ctx.require_admin()?;
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    let item = state
        .catalog
        .update_menu_item(&id, payload, util::now_millis())?;
    Ok(Json(item))
}

/// DELETE /api/menu/items/{id} - delete a menu item and its offer (admin)
pub async fn delete_item(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    ctx.require_admin()?;
    state.catalog.delete_menu_item(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/menu/items/{id}/offer - set or replace the item's offer (admin)
pub async fn set_offer(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    Json(payload): Json<SpecialOfferSet>,
) -> AppResult<Json<SpecialOffer>> {
    ctx.require_admin()?;
    let offer = state.catalog.set_offer(&id, payload)?;
    Ok(Json(offer))
}

/// DELETE /api/menu/items/{id}/offer - clear the item's offer (admin)
pub async fn clear_offer(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    ctx.require_admin()?;
    state.catalog.clear_offer(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/menu/offers - every configured offer
pub async fn list_offers(
    State(state): State<ServerState>,
    _ctx: RequestContext,
) -> AppResult<Json<Vec<SpecialOffer>>> {
    let offers = state.catalog.list_offers()?;
    Ok(Json(offers))
}
