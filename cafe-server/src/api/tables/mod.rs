//! Dining table API module

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", table_routes())
}

fn table_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", delete(handler::delete))
}
