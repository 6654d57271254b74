//! Collection API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{Collection, CollectionCreate, CollectionUpdate};
use crate::db::repository::CollectionRepository;
use crate::media::{MediaKind, MultipartForm};
use crate::utils::{AppResponse, AppResult, ok, ok_with_message};

/// POST /collections/add-collection - 创建系列 (multipart, 图片可选)
pub async fn create(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<AppResponse<Collection>>)> {
    let form = MultipartForm::read(&mut multipart).await?;

    let name = form.require_text("name")?;
    let image = match form.file("image") {
        Some(file) => Some(state.media.save(MediaKind::Image, &file.filename, &file.bytes)?),
        None => None,
    };

    let repo = CollectionRepository::new(state.get_db());
    let collection = repo.create(CollectionCreate { name, image }).await?;

    Ok((
        StatusCode::CREATED,
        ok_with_message(collection, "collection created"),
    ))
}

/// GET /collections/get-collection - 全部系列 (创建顺序)
pub async fn get_all(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Collection>>>> {
    let repo = CollectionRepository::new(state.get_db());
    Ok(ok(repo.find_all().await?))
}

/// PUT /collections/update-collection/:id - 更新系列
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> AppResult<Json<AppResponse<Collection>>> {
    let form = MultipartForm::read(&mut multipart).await?;

    let image = match form.file("image") {
        Some(file) => Some(state.media.save(MediaKind::Image, &file.filename, &file.bytes)?),
        None => None,
    };

    let data = CollectionUpdate {
        name: form.text("name").map(str::to_string),
        image,
    };

    let repo = CollectionRepository::new(state.get_db());
    let collection = repo.update(&id, data).await?;

    Ok(ok_with_message(collection, "collection updated"))
}

/// DELETE /collections/delete-collection/:id - 删除系列
///
/// Products referencing the collection keep their dangling link; they stay
/// readable with a null collection.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = CollectionRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(ok_with_message(true, "collection deleted"))
}
