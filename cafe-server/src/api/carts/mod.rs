//! Cart API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", cart_routes())
}

fn cart_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::view))
        .route("/items", post(handler::add_line))
        .route(
            "/items/{line_id}",
            put(handler::update_line).delete(handler::remove_line),
        )
}
