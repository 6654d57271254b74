//! Banner API 模块

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/banner", banner_routes())
}

fn banner_routes() -> Router<ServerState> {
    Router::new()
        .route("/add-banner", post(handler::create))
        .route("/get-banner", get(handler::get_all))
        .route("/update-banner/{id}", put(handler::update))
        .route("/delete-banner/{id}", delete(handler::delete))
}
