//! Order API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", order_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::place).get(handler::list_mine))
        .route("/all", get(handler::list_all))
        .route("/{id}", get(handler::get_by_id).delete(handler::cancel))
        .route("/{id}/payment", post(handler::confirm_payment))
        .route("/{id}/status", put(handler::advance_status))
        .route("/{id}/review", post(handler::create_review))
}
