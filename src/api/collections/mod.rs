//! Collection API 模块

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/collections", collection_routes())
}

fn collection_routes() -> Router<ServerState> {
    Router::new()
        .route("/add-collection", post(handler::create))
        .route("/get-collection", get(handler::get_all))
        .route("/update-collection/{id}", put(handler::update))
        .route("/delete-collection/{id}", delete(handler::delete))
}
