//! Banner API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{Banner, BannerCreate};
use crate::db::repository::BannerRepository;
use crate::media::{MediaKind, MultipartForm};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// POST /banner/add-banner - 新增横幅 (multipart, 单图)
pub async fn create(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<AppResponse<Banner>>)> {
    let form = MultipartForm::read(&mut multipart).await?;

    let file = form
        .file("bannerImage")
        .ok_or_else(|| AppError::validation("'bannerImage' file is required"))?;
    let banner_image = state
        .media
        .save(MediaKind::Banner, &file.filename, &file.bytes)?;

    let repo = BannerRepository::new(state.get_db());
    let banner = repo.create(BannerCreate { banner_image }).await?;

    Ok((StatusCode::CREATED, ok_with_message(banner, "banner created")))
}

/// GET /banner/get-banner - 全部横幅 (轮播顺序)
pub async fn get_all(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Banner>>>> {
    let repo = BannerRepository::new(state.get_db());
    Ok(ok(repo.find_all().await?))
}

/// PUT /banner/update-banner/:id - 替换横幅图片 (multipart)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> AppResult<Json<AppResponse<Banner>>> {
    let form = MultipartForm::read(&mut multipart).await?;

    let file = form
        .file("bannerImage")
        .ok_or_else(|| AppError::validation("'bannerImage' file is required"))?;
    let banner_image = state
        .media
        .save(MediaKind::Banner, &file.filename, &file.bytes)?;

    let repo = BannerRepository::new(state.get_db());
    let banner = repo.update_image(&id, banner_image).await?;

    Ok(ok_with_message(banner, "banner updated"))
}

/// DELETE /banner/delete-banner/:id - 删除横幅
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = BannerRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(ok_with_message(true, "banner deleted"))
}
