//! Product API 模块

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/product", product_routes())
}

fn product_routes() -> Router<ServerState> {
    Router::new()
        .route("/add-product", post(handler::create))
        .route("/update-product/{id}", put(handler::update))
        .route("/delete-product/{id}", delete(handler::delete))
        .route("/get-products", get(handler::get_products))
        .route("/get-product/{slug}", get(handler::get_by_slug))
        .route("/get-product-by-search", get(handler::get_by_search))
        .route("/get-product-by-collection", get(handler::get_by_collection))
        .route("/get-product-by-price", get(handler::get_by_price))
        .route("/get-product-by-rating", get(handler::get_by_rating))
        .route("/get-product-by-sort", get(handler::get_by_sort))
}
