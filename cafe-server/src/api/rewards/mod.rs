//! Loyalty API module - rewards, redemptions, balance

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/rewards", reward_routes())
        .nest("/api/redemptions", redemption_routes())
        .route("/api/loyalty", get(handler::loyalty))
}

fn reward_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_rewards).post(handler::create_reward))
        .route("/{id}", delete(handler::delete_reward))
        .route("/{id}/redeem", post(handler::redeem))
}

fn redemption_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_redemptions))
        .route("/{id}", delete(handler::delete_redemption))
        .route("/{id}/delivered", put(handler::mark_delivered))
}
