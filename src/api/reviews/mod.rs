//! Review API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/reviews", review_routes())
}

fn review_routes() -> Router<ServerState> {
    Router::new()
        .route("/add-review", post(handler::create))
        .route("/product-reviews/{product_id}", get(handler::get_by_product))
}
