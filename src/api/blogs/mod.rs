//! Blog API 模块

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/blog", blog_routes())
}

fn blog_routes() -> Router<ServerState> {
    Router::new()
        .route("/add-blog", post(handler::create))
        .route("/get-blog", get(handler::get_all))
        .route("/get-blog/{slug}", get(handler::get_by_slug))
        .route("/update-blog/{id}", put(handler::update))
        .route("/delete-blog/{id}", delete(handler::delete))
}
