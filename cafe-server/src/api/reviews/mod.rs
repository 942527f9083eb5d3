//! Review API module (creation lives under the order routes)

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/reviews", get(handler::list))
        .route("/api/reviews/{id}", put(handler::update))
}
