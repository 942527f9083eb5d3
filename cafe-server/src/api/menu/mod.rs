//! Menu API module - items and special offers

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", menu_routes())
}

fn menu_routes() -> Router<ServerState> {
    Router::new()
        .route("/items", get(handler::list_items).post(handler::create_item))
        .route(
            "/items/{id}",
            get(handler::get_item)
                .put(handler::update_item)
                .delete(handler::delete_item),
        )
        .route(
            "/items/{id}/offer",
            put(handler::set_offer).delete(handler::clear_offer),
        )
        .route("/offers", get(handler::list_offers))
}
