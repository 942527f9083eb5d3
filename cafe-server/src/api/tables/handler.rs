//! Dining table API handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::{DiningTable, DiningTableCreate, util};

use crate::auth::RequestContext;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/tables - all dining tables, by table number
pub async fn list(
    State(state): State<ServerState>,
    _ctx: RequestContext,
) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = state.catalog.list_tables()?;
    Ok(Json(tables))
}

/// POST /api/tables - create a dining table (admin)
pub async fn create(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<(StatusCode, Json<DiningTable>)> {
    ctx.require_admin()?;
    let table = state.catalog.create_table(payload, util::now_millis())?;
    Ok((StatusCode::CREATED, Json(table)))
}

/// DELETE /api/tables/{id} - delete a dining table (admin)
pub async fn delete(
    State(state): State<ServerState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    ctx.require_admin()?;
    state.catalog.delete_table(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
