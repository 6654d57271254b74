//! Enquiry API Handlers

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{AddEnquiryRequest, Enquiry};
use crate::db::repository::EnquiryRepository;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// POST /enquiry/add-enquiry - 提交留言 (JSON)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AddEnquiryRequest>,
) -> AppResult<(StatusCode, Json<AppResponse<Enquiry>>)> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = EnquiryRepository::new(state.get_db());
    let enquiry = repo.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        ok_with_message(enquiry, "enquiry received"),
    ))
}

/// GET /enquiry/get-enquiries - 留言列表 (最新在前)
pub async fn get_all(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Enquiry>>>> {
    let repo = EnquiryRepository::new(state.get_db());
    Ok(ok(repo.find_all().await?))
}
