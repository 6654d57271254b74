//! Enquiry API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/enquiry", enquiry_routes())
}

fn enquiry_routes() -> Router<ServerState> {
    Router::new()
        .route("/add-enquiry", post(handler::create))
        .route("/get-enquiries", get(handler::get_all))
}
