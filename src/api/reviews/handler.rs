//! Review API Handlers
//!
//! Reviews are append-only; count and average are derived per read.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{AddReviewRequest, ProductReviews, Review};
use crate::db::repository::{ProductRepository, ReviewRepository};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// POST /reviews/add-review - 新增评论 (JSON)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AddReviewRequest>,
) -> AppResult<(StatusCode, Json<AppResponse<Review>>)> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    // The target product must exist; its verified id becomes the record link
    let products = ProductRepository::new(state.get_db());
    let product = products
        .find_by_id(&payload.product_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {}", payload.product_id)))?;
    let product_id = product
        .id
        .ok_or_else(|| AppError::internal("stored product has no id"))?;

    let repo = ReviewRepository::new(state.get_db());
    let review = repo.create(product_id, payload).await?;

    Ok((StatusCode::CREATED, ok_with_message(review, "review added")))
}

/// GET /reviews/product-reviews/:product_id - 某商品全部评论 + 聚合
pub async fn get_by_product(
    State(state): State<ServerState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<AppResponse<ProductReviews>>> {
    let repo = ReviewRepository::new(state.get_db());
    let reviews = repo.find_by_product(&product_id).await?;
    Ok(ok(ProductReviews::from_reviews(reviews)))
}
